use crate::models::*;
use crate::services::OrderDetailService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/order-details",
    tag = "order_detail",
    request_body = CreateOrderDetailRequest,
    responses(
        (status = 201, description = "Order line created", body = OrderDetailResponse),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_order_detail(
    service: web::Data<OrderDetailService>,
    request: web::Json<CreateOrderDetailRequest>,
) -> Result<HttpResponse> {
    match service.create(request.into_inner()).await {
        Ok(line) => Ok(HttpResponse::Created().json(ApiResponse::success(line))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/order-details",
    tag = "order_detail",
    params(
        ("page" = Option<u32>, Query, description = "Page number, starts at 1"),
        ("per_page" = Option<u32>, Query, description = "Page size"),
        ("order_id" = Option<i32>, Query, description = "Only lines of this order"),
        ("product_id" = Option<i32>, Query, description = "Only lines of this product")
    ),
    responses(
        (status = 200, description = "Paginated order lines")
    )
)]
pub async fn list_order_details(
    service: web::Data<OrderDetailService>,
    query: web::Query<OrderDetailQuery>,
) -> Result<HttpResponse> {
    match service.list(&query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(page))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/order-details/{id}",
    tag = "order_detail",
    params(("id" = i64, Path, description = "Order line id")),
    responses(
        (status = 200, description = "Order line", body = OrderDetailResponse),
        (status = 404, description = "Order line not found")
    )
)]
pub async fn get_order_detail(
    service: web::Data<OrderDetailService>,
    id: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get(id.into_inner()).await {
        Ok(line) => Ok(HttpResponse::Ok().json(ApiResponse::success(line))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/order-details/{id}",
    tag = "order_detail",
    params(("id" = i64, Path, description = "Order line id")),
    request_body = UpdateOrderDetailRequest,
    responses(
        (status = 200, description = "Order line updated", body = OrderDetailResponse),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Order line not found")
    )
)]
pub async fn update_order_detail(
    service: web::Data<OrderDetailService>,
    id: web::Path<i64>,
    request: web::Json<UpdateOrderDetailRequest>,
) -> Result<HttpResponse> {
    match service.update(id.into_inner(), request.into_inner()).await {
        Ok(line) => Ok(HttpResponse::Ok().json(ApiResponse::success(line))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/order-details/{id}",
    tag = "order_detail",
    params(("id" = i64, Path, description = "Order line id")),
    responses(
        (status = 200, description = "Order line deleted", body = DeletedResponse),
        (status = 404, description = "Order line not found")
    )
)]
pub async fn delete_order_detail(
    service: web::Data<OrderDetailService>,
    id: web::Path<i64>,
) -> Result<HttpResponse> {
    let id = id.into_inner();
    match service.delete(id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success(DeletedResponse {
            id,
            deleted: true,
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/orders/{order_id}/summary",
    tag = "order_detail",
    params(("order_id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Totals over the order's lines", body = OrderSummaryResponse)
    )
)]
pub async fn get_order_summary(
    service: web::Data<OrderDetailService>,
    order_id: web::Path<i32>,
) -> Result<HttpResponse> {
    match service.order_summary(order_id.into_inner()).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success(summary))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn order_detail_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/order-details")
            .route("", web::post().to(create_order_detail))
            .route("", web::get().to(list_order_details))
            .route("/{id}", web::get().to(get_order_detail))
            .route("/{id}", web::put().to(update_order_detail))
            .route("/{id}", web::delete().to(delete_order_detail)),
    )
    .route("/orders/{order_id}/summary", web::get().to(get_order_summary));
}
