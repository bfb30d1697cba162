use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use registry_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    handlers,
    middlewares::create_cors,
    services::*,
    swagger::swagger_config,
    tasks,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = Config::from_toml().expect("Failed to load configuration file");

    // 创建数据库连接池
    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    // 运行数据库迁移
    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    // 创建服务
    let user_service = UserService::new(pool.clone());
    let order_detail_service = OrderDetailService::new(pool.clone());
    let farmer_service = FarmerService::new(pool.clone());
    let kepala_keluarga_service = KepalaKeluargaService::new(pool.clone());
    let bench_service = BenchService::new(pool.clone(), config.bench.clone());

    if config.bench.run_on_startup {
        let report = bench_service.run().await;
        if !report.is_success() {
            log::error!(
                "Startup bench run {} had {} failed tasks",
                report.run_id,
                report.failed
            );
        }
    }

    tasks::spawn_all(bench_service.clone(), &config.bench);

    // 启动HTTP服务器
    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(order_detail_service.clone()))
            .app_data(web::Data::new(farmer_service.clone()))
            .app_data(web::Data::new(kepala_keluarga_service.clone()))
            .app_data(web::Data::new(bench_service.clone()))
            .configure(swagger_config)
            .service(
                web::scope("/api/v1")
                    .configure(handlers::user_config)
                    .configure(handlers::order_detail_config)
                    .configure(handlers::farmer_config)
                    .configure(handlers::kepala_keluarga_config)
                    .configure(handlers::bench_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
