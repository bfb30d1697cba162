mod common;

use actix_web::{App, http::StatusCode, test, web};
use registry_backend::config::BenchConfig;
use registry_backend::handlers;
use registry_backend::services::*;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};

macro_rules! init_app {
    ($db:expr) => {{
        let db: DatabaseConnection = $db;
        test::init_service(
            App::new()
                .app_data(web::Data::new(UserService::new(db.clone())))
                .app_data(web::Data::new(OrderDetailService::new(db.clone())))
                .app_data(web::Data::new(FarmerService::new(db.clone())))
                .app_data(web::Data::new(KepalaKeluargaService::new(db.clone())))
                .app_data(web::Data::new(BenchService::new(
                    db.clone(),
                    BenchConfig {
                        iterations: 5,
                        ..Default::default()
                    },
                )))
                .service(
                    web::scope("/api/v1")
                        .configure(handlers::user_config)
                        .configure(handlers::order_detail_config)
                        .configure(handlers::farmer_config)
                        .configure(handlers::kepala_keluarga_config)
                        .configure(handlers::bench_config),
                ),
        )
        .await
    }};
}

#[actix_web::test]
async fn test_kepala_keluarga_endpoints() {
    let db = common::setup_db().await;
    let user = common::insert_user(&db, "api@example.com").await;
    let app = init_app!(db);

    let body = json!({
        "id_user": user.id,
        "no_kk": "3273010101010001",
        "nama_kk": "Budi",
        "alamat": "Jl. Merdeka 1",
        "kode_pos": "40111",
        "status_rumah": "milik sendiri"
    });
    let req = test::TestRequest::post()
        .uri("/api/v1/kepala-keluarga")
        .set_json(&body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["success"], true);
    let id = created["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/kepala-keluarga")
        .set_json(&body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let err: Value = test::read_body_json(resp).await;
    assert_eq!(err["success"], false);
    assert_eq!(err["error"]["code"], "CONFLICT");

    let req = test::TestRequest::get()
        .uri("/api/v1/kepala-keluarga/no-kk/3273010101010001")
        .to_request();
    let found: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(found["data"]["id"].as_i64(), Some(id));

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/kepala-keluarga?id_user={}", user.id))
        .to_request();
    let list: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(list["data"].as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/users/{}", user.id))
        .to_request();
    let deleted: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(deleted["data"]["kepala_keluarga_removed"], 1);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/kepala-keluarga/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_validation_errors_return_bad_request() {
    let db = common::setup_db().await;
    let user = common::insert_user(&db, "bad@example.com").await;
    let app = init_app!(db);

    let req = test::TestRequest::post()
        .uri("/api/v1/kepala-keluarga")
        .set_json(json!({
            "id_user": user.id,
            "no_kk": "12ab",
            "nama_kk": "Budi",
            "alamat": "Jl. Merdeka 1",
            "kode_pos": "40111",
            "status_rumah": "kontrak"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: Value = test::read_body_json(resp).await;
    assert_eq!(err["error"]["code"], "VALIDATION_ERROR");

    let req = test::TestRequest::post()
        .uri("/api/v1/order-details")
        .set_json(json!({
            "order_id": 1,
            "product_id": 1,
            "product_name": "Benih",
            "quantity": -1,
            "price": 2.0
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_order_detail_summary_endpoint() {
    let db = common::setup_db().await;
    let app = init_app!(db);

    for (quantity, price) in [(2, 5.0), (1, 2.5)] {
        let req = test::TestRequest::post()
            .uri("/api/v1/order-details")
            .set_json(json!({
                "order_id": 42,
                "product_id": 7,
                "product_name": "Bibit",
                "quantity": quantity,
                "price": price
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/orders/42/summary")
        .to_request();
    let summary: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(summary["data"]["line_count"], 2);
    assert_eq!(summary["data"]["total_quantity"], 3);
    assert_eq!(summary["data"]["total_amount"], 12.5);

    let req = test::TestRequest::get()
        .uri("/api/v1/order-details?order_id=42&per_page=1")
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["data"]["total"], 2);
    assert_eq!(page["data"]["total_pages"], 2);
}

#[actix_web::test]
async fn test_farmer_endpoints() {
    let db = common::setup_db().await;
    let app = init_app!(db);

    let req = test::TestRequest::post()
        .uri("/api/v1/farmers")
        .set_json(json!({
            "name": "Nyoman",
            "gender": "male",
            "location": "Bangli",
            "crop": "jeruk",
            "contact": "0812",
            "profile_picture": null
        }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/farmers/{id}"))
        .set_json(json!({ "crop": "kopi" }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["data"]["crop"], "kopi");
    assert_eq!(updated["data"]["name"], "Nyoman");

    let req = test::TestRequest::get()
        .uri("/api/v1/farmers?crop=jeruk")
        .to_request();
    let list: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(list["data"]["total"], 0);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/farmers/{id}"))
        .to_request();
    let deleted: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(deleted["data"]["deleted"], true);
}

#[actix_web::test]
async fn test_bench_run_endpoint() {
    let db = common::setup_db().await;
    let app = init_app!(db);

    let req = test::TestRequest::post().uri("/api/v1/bench/run").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let report = &body["data"];
    assert_eq!(report["failed"], 0);
    assert_eq!(report["passed"], 3);
    assert_eq!(
        report["results"][0]["binding"],
        json!({"DataSourceID": "primary", "QueryID": "unique_no_kk"})
    );
}
