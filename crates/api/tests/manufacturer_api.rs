//! HTTP-level integration tests for the `/manufacturers` resource.
//!
//! Each test runs against a fresh database created by `#[sqlx::test]`.

mod common;

use axum::http::header::LOCATION;
use axum::http::StatusCode;
use common::{body_json, build_test_app, create, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_ignores_client_id(pool: PgPool) {
    let body = json!({"id": 77, "name": "Bosch", "details": "parts"});
    let response = post_json(build_test_app(pool), "/manufacturers", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()[LOCATION].to_str().unwrap().to_string();
    let json = body_json(response).await;
    assert_ne!(json["id"], 77);
    assert_eq!(location, format!("/manufacturers/{}", json["id"]));
    assert_eq!(json["details"], "parts");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_overwrites_name_and_details(pool: PgPool) {
    let body = json!({"name": "Bosch", "details": "parts"});
    let created = create(build_test_app(pool.clone()), "/manufacturers", body).await;
    let id = created["id"].as_i64().unwrap();

    let body = json!({"name": "Robert Bosch"});
    let uri = format!("/manufacturers/{id}");
    let response = put_json(build_test_app(pool.clone()), &uri, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Robert Bosch");
    assert!(json["details"].is_null());

    let response = get(build_test_app(pool), &format!("/manufacturers/{id}")).await;
    assert_eq!(body_json(response).await, json);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn linked_manufacturer_cannot_be_deleted(pool: PgPool) {
    let body = json!({"name": "Valeo"});
    let created = create(build_test_app(pool.clone()), "/manufacturers", body).await;
    let id = created["id"].as_i64().unwrap();
    for name in ["Headlamp", "Wiper motor", "Clutch"] {
        let body = json!({
            "name": name,
            "description": "oem",
            "acquisitionYear": 2019,
            "value": 80.0,
            "installationMinutes": 40,
            "manufacturers": [{"id": id}]
        });
        create(build_test_app(pool.clone()), "/accessories", body).await;
    }

    let response = delete(build_test_app(pool.clone()), &format!("/manufacturers/{id}")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "Cannot delete manufacturer: 3 accessory(ies) still linked"
    );

    let response = get(build_test_app(pool), &format!("/manufacturers/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_matches_name_or_details(pool: PgPool) {
    for (name, details) in [
        ("Bosch", Some("German")),
        ("Denso", Some("Japanese, Bosch partner")),
        ("Valeo", None),
    ] {
        let body = json!({"name": name, "details": details});
        create(build_test_app(pool.clone()), "/manufacturers", body).await;
    }

    let uri = "/manufacturers/search?q=bosch&size=1";
    let response = get(build_test_app(pool.clone()), uri).await;
    let json = body_json(response).await;
    assert_eq!(json["TotalManufacturers"], 2);
    assert_eq!(json["TotalPages"], 2);
    assert_eq!(json["Manufacturers"][0]["name"], "Bosch");
    assert_eq!(
        json["NextPage"],
        format!(
            "{}/manufacturers/search?q=bosch&sort=id&direction=asc&page=1&size=1",
            common::BASE_URL
        )
    );

    let response = get(build_test_app(pool), "/manufacturers/search").await;
    let json = body_json(response).await;
    assert_eq!(json["TotalManufacturers"], 3);
    assert_eq!(json["HasMore"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn maximal_page_size_returns_one_page(pool: PgPool) {
    for name in ["Bosch", "Denso"] {
        create(build_test_app(pool.clone()), "/manufacturers", json!({"name": name})).await;
    }

    let uri = format!("/manufacturers/search?size={}", i64::MAX);
    let response = get(build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["TotalManufacturers"], 2);
    assert_eq!(json["TotalPages"], 1);
    assert_eq!(json["HasMore"], false);
    assert_eq!(json["NextPage"], "");

    let uri = format!("/manufacturers/search?page={}&size={}", i64::MAX, i64::MAX);
    let response = get(build_test_app(pool), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["Manufacturers"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reports_database_and_catalog_size(pool: PgPool) {
    for name in ["Bosch", "Denso"] {
        create(build_test_app(pool.clone()), "/manufacturers", json!({"name": name})).await;
    }

    let response = get(build_test_app(pool), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert_eq!(
        json["catalog"],
        json!({"vehicles": 0, "accessories": 0, "manufacturers": 2})
    );
}
