use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::bench::{BenchOutcome, BenchReport, BenchTaskResult, QueryBinding};
use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::user::create_user,
        handlers::user::list_users,
        handlers::user::get_user,
        handlers::user::delete_user,
        handlers::order_detail::create_order_detail,
        handlers::order_detail::list_order_details,
        handlers::order_detail::get_order_detail,
        handlers::order_detail::update_order_detail,
        handlers::order_detail::delete_order_detail,
        handlers::order_detail::get_order_summary,
        handlers::farmer::create_farmer,
        handlers::farmer::list_farmers,
        handlers::farmer::get_farmer,
        handlers::farmer::update_farmer,
        handlers::farmer::delete_farmer,
        handlers::kepala_keluarga::create_kepala_keluarga,
        handlers::kepala_keluarga::list_kepala_keluarga,
        handlers::kepala_keluarga::get_kepala_keluarga,
        handlers::kepala_keluarga::get_kepala_keluarga_by_no_kk,
        handlers::kepala_keluarga::update_kepala_keluarga,
        handlers::kepala_keluarga::delete_kepala_keluarga,
        handlers::bench::run_bench,
    ),
    components(
        schemas(
            ApiError,
            DeletedResponse,
            CreateUserRequest,
            UserResponse,
            DeleteUserResponse,
            CreateOrderDetailRequest,
            UpdateOrderDetailRequest,
            OrderDetailResponse,
            OrderSummaryResponse,
            CreateFarmerRequest,
            UpdateFarmerRequest,
            FarmerResponse,
            CreateKepalaKeluargaRequest,
            UpdateKepalaKeluargaRequest,
            KepalaKeluargaResponse,
            QueryBinding,
            BenchOutcome,
            BenchTaskResult,
            BenchReport,
        )
    ),
    tags(
        (name = "user", description = "Users owning kepala keluarga records"),
        (name = "order_detail", description = "Order line API"),
        (name = "farmer", description = "Farmer registry API"),
        (name = "kepala_keluarga", description = "Head of household API"),
        (name = "bench", description = "Schema bench tasks"),
    ),
    info(
        title = "Registry Backend API",
        version = "0.1.0",
        description = "Registry Backend REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
