use crate::models::*;
use crate::services::KepalaKeluargaService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/kepala-keluarga",
    tag = "kepala_keluarga",
    request_body = CreateKepalaKeluargaRequest,
    responses(
        (status = 201, description = "Record created", body = KepalaKeluargaResponse),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "User not found"),
        (status = 409, description = "no_kk already registered")
    )
)]
pub async fn create_kepala_keluarga(
    service: web::Data<KepalaKeluargaService>,
    request: web::Json<CreateKepalaKeluargaRequest>,
) -> Result<HttpResponse> {
    match service.create(request.into_inner()).await {
        Ok(record) => Ok(HttpResponse::Created().json(ApiResponse::success(record))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/kepala-keluarga",
    tag = "kepala_keluarga",
    params(("id_user" = i32, Query, description = "Owning user id")),
    responses(
        (status = 200, description = "Records of the user", body = [KepalaKeluargaResponse])
    )
)]
pub async fn list_kepala_keluarga(
    service: web::Data<KepalaKeluargaService>,
    query: web::Query<KepalaKeluargaQuery>,
) -> Result<HttpResponse> {
    match service.list_by_user(query.id_user).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/kepala-keluarga/{id}",
    tag = "kepala_keluarga",
    params(("id" = i32, Path, description = "Record id")),
    responses(
        (status = 200, description = "Record", body = KepalaKeluargaResponse),
        (status = 404, description = "Record not found")
    )
)]
pub async fn get_kepala_keluarga(
    service: web::Data<KepalaKeluargaService>,
    id: web::Path<i32>,
) -> Result<HttpResponse> {
    match service.get(id.into_inner()).await {
        Ok(record) => Ok(HttpResponse::Ok().json(ApiResponse::success(record))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/kepala-keluarga/no-kk/{no_kk}",
    tag = "kepala_keluarga",
    params(("no_kk" = String, Path, description = "16-digit family card number")),
    responses(
        (status = 200, description = "Record", body = KepalaKeluargaResponse),
        (status = 400, description = "Malformed no_kk"),
        (status = 404, description = "Record not found")
    )
)]
pub async fn get_kepala_keluarga_by_no_kk(
    service: web::Data<KepalaKeluargaService>,
    no_kk: web::Path<String>,
) -> Result<HttpResponse> {
    match service.find_by_no_kk(&no_kk).await {
        Ok(record) => Ok(HttpResponse::Ok().json(ApiResponse::success(record))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/kepala-keluarga/{id}",
    tag = "kepala_keluarga",
    params(("id" = i32, Path, description = "Record id")),
    request_body = UpdateKepalaKeluargaRequest,
    responses(
        (status = 200, description = "Record updated", body = KepalaKeluargaResponse),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Record not found"),
        (status = 409, description = "no_kk already registered")
    )
)]
pub async fn update_kepala_keluarga(
    service: web::Data<KepalaKeluargaService>,
    id: web::Path<i32>,
    request: web::Json<UpdateKepalaKeluargaRequest>,
) -> Result<HttpResponse> {
    match service.update(id.into_inner(), request.into_inner()).await {
        Ok(record) => Ok(HttpResponse::Ok().json(ApiResponse::success(record))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/kepala-keluarga/{id}",
    tag = "kepala_keluarga",
    params(("id" = i32, Path, description = "Record id")),
    responses(
        (status = 200, description = "Record deleted", body = DeletedResponse),
        (status = 404, description = "Record not found")
    )
)]
pub async fn delete_kepala_keluarga(
    service: web::Data<KepalaKeluargaService>,
    id: web::Path<i32>,
) -> Result<HttpResponse> {
    let id = id.into_inner();
    match service.delete(id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success(DeletedResponse {
            id: id.into(),
            deleted: true,
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn kepala_keluarga_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/kepala-keluarga")
            .route("", web::post().to(create_kepala_keluarga))
            .route("", web::get().to(list_kepala_keluarga))
            .route("/no-kk/{no_kk}", web::get().to(get_kepala_keluarga_by_no_kk))
            .route("/{id}", web::get().to(get_kepala_keluarga))
            .route("/{id}", web::put().to(update_kepala_keluarga))
            .route("/{id}", web::delete().to(delete_kepala_keluarga)),
    );
}
