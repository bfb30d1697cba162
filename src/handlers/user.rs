use crate::models::*;
use crate::services::UserService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/users",
    tag = "user",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_user(
    user_service: web::Data<UserService>,
    request: web::Json<CreateUserRequest>,
) -> Result<HttpResponse> {
    match user_service.create_user(request.into_inner()).await {
        Ok(user) => Ok(HttpResponse::Created().json(ApiResponse::success(user))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "user",
    params(
        ("page" = Option<u32>, Query, description = "Page number, starts at 1"),
        ("per_page" = Option<u32>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "Paginated users")
    )
)]
pub async fn list_users(
    user_service: web::Data<UserService>,
    query: web::Query<UserQuery>,
) -> Result<HttpResponse> {
    match user_service.list_users(&query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(page))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "user",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    user_service: web::Data<UserService>,
    id: web::Path<i32>,
) -> Result<HttpResponse> {
    match user_service.get_user(id.into_inner()).await {
        Ok(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(user))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "user",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User and dependent kepala keluarga rows deleted", body = DeleteUserResponse),
        (status = 404, description = "User not found"),
        (status = 409, description = "User still referenced")
    )
)]
pub async fn delete_user(
    user_service: web::Data<UserService>,
    id: web::Path<i32>,
) -> Result<HttpResponse> {
    match user_service.delete_user(id.into_inner()).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(resp))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn user_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::post().to(create_user))
            .route("", web::get().to(list_users))
            .route("/{id}", web::get().to(get_user))
            .route("/{id}", web::delete().to(delete_user)),
    );
}
