use crate::bench::BenchReport;
use crate::models::ApiResponse;
use crate::services::BenchService;
use actix_web::{HttpResponse, Result, web};

#[utoipa::path(
    post,
    path = "/bench/run",
    tag = "bench",
    responses(
        (status = 200, description = "Bench run finished; failed tasks are reported in the body", body = BenchReport)
    )
)]
pub async fn run_bench(bench_service: web::Data<BenchService>) -> Result<HttpResponse> {
    let report = bench_service.run().await;
    let message = format!(
        "{} passed, {} failed, {} unsupported",
        report.passed, report.failed, report.unsupported
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(report, message)))
}

pub fn bench_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/bench").route("/run", web::post().to(run_bench)));
}
