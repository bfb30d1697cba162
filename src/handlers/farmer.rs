use crate::models::*;
use crate::services::FarmerService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/farmers",
    tag = "farmer",
    request_body = CreateFarmerRequest,
    responses(
        (status = 201, description = "Farmer created", body = FarmerResponse),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_farmer(
    service: web::Data<FarmerService>,
    request: web::Json<CreateFarmerRequest>,
) -> Result<HttpResponse> {
    match service.create(request.into_inner()).await {
        Ok(farmer) => Ok(HttpResponse::Created().json(ApiResponse::success(farmer))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/farmers",
    tag = "farmer",
    params(
        ("page" = Option<u32>, Query, description = "Page number, starts at 1"),
        ("per_page" = Option<u32>, Query, description = "Page size"),
        ("crop" = Option<String>, Query, description = "Exact crop"),
        ("location" = Option<String>, Query, description = "Exact location")
    ),
    responses(
        (status = 200, description = "Paginated farmers")
    )
)]
pub async fn list_farmers(
    service: web::Data<FarmerService>,
    query: web::Query<FarmerQuery>,
) -> Result<HttpResponse> {
    match service.list(&query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(page))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/farmers/{id}",
    tag = "farmer",
    params(("id" = i32, Path, description = "Farmer id")),
    responses(
        (status = 200, description = "Farmer", body = FarmerResponse),
        (status = 404, description = "Farmer not found")
    )
)]
pub async fn get_farmer(
    service: web::Data<FarmerService>,
    id: web::Path<i32>,
) -> Result<HttpResponse> {
    match service.get(id.into_inner()).await {
        Ok(farmer) => Ok(HttpResponse::Ok().json(ApiResponse::success(farmer))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/farmers/{id}",
    tag = "farmer",
    params(("id" = i32, Path, description = "Farmer id")),
    request_body = UpdateFarmerRequest,
    responses(
        (status = 200, description = "Farmer updated", body = FarmerResponse),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Farmer not found")
    )
)]
pub async fn update_farmer(
    service: web::Data<FarmerService>,
    id: web::Path<i32>,
    request: web::Json<UpdateFarmerRequest>,
) -> Result<HttpResponse> {
    match service.update(id.into_inner(), request.into_inner()).await {
        Ok(farmer) => Ok(HttpResponse::Ok().json(ApiResponse::success(farmer))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/farmers/{id}",
    tag = "farmer",
    params(("id" = i32, Path, description = "Farmer id")),
    responses(
        (status = 200, description = "Farmer deleted", body = DeletedResponse),
        (status = 404, description = "Farmer not found")
    )
)]
pub async fn delete_farmer(
    service: web::Data<FarmerService>,
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

pub fn farmer_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/farmers")
            .route("", web::post().to(create_farmer))
            .route("", web::get().to(list_farmers))
            .route("/{id}", web::get().to(get_farmer))
            .route("/{id}", web::put().to(update_farmer))
            .route("/{id}", web::delete().to(delete_farmer)),
    );
}
