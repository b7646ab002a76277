//! HTTP-level integration tests for the `/vehicles` resource.
//!
//! Each test runs against a fresh database created by `#[sqlx::test]`.

mod common;

use axum::http::header::LOCATION;
use axum::http::StatusCode;
use common::{body_json, build_test_app, create, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

fn corolla() -> serde_json::Value {
    json!({
        "model": "Corolla",
        "versionName": "XEi 2.0",
        "manufactureDate": "2020-03-01",
        "countryOfAssembly": "Brazil",
        "technicalSheet": {
            "engineDetails": "2.0 flex",
            "fuelType": "flex",
            "factoryOptions": "sunroof"
        }
    })
}

// ---------------------------------------------------------------------------
// Test: create returns 201 with Location and the nested sheet
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_returns_location_and_sheet(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(app, "/vehicles", corolla()).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()[LOCATION].to_str().unwrap().to_string();
    let json = body_json(response).await;
    assert_eq!(location, format!("/vehicles/{}", json["id"]));
    assert_eq!(json["model"], "Corolla");
    assert_eq!(json["manufactureDate"], "2020-03-01");
    assert_eq!(json["technicalSheet"]["fuelType"], "flex");
    assert!(json["technicalSheet"]["id"].is_i64());
}

// ---------------------------------------------------------------------------
// Test: get, list and 404
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_and_list_return_created_vehicle(pool: PgPool) {
    let created = create(build_test_app(pool.clone()), "/vehicles", corolla()).await;
    let id = created["id"].as_i64().unwrap();

    let response = get(build_test_app(pool.clone()), &format!("/vehicles/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);

    let response = get(build_test_app(pool), "/vehicles").await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_vehicle_is_404_everywhere(pool: PgPool) {
    let response = get(build_test_app(pool.clone()), "/vehicles/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = json!({"model": "Golf", "countryOfAssembly": "Germany"});
    let response = put_json(build_test_app(pool.clone()), "/vehicles/999999", body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete(build_test_app(pool), "/vehicles/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: update without a sheet detaches it
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_without_sheet_removes_it(pool: PgPool) {
    let created = create(build_test_app(pool.clone()), "/vehicles", corolla()).await;
    let id = created["id"].as_i64().unwrap();

    let body = json!({"model": "Corolla Cross", "countryOfAssembly": "Brazil"});
    let response = put_json(build_test_app(pool), &format!("/vehicles/{id}"), body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["model"], "Corolla Cross");
    assert!(json["technicalSheet"].is_null());
    assert!(json["manufactureDate"].is_null());
}

// ---------------------------------------------------------------------------
// Test: delete is refused while accessories reference the vehicle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_with_linked_accessories_is_conflict(pool: PgPool) {
    let vehicle = create(build_test_app(pool.clone()), "/vehicles", corolla()).await;
    let id = vehicle["id"].as_i64().unwrap();
    for name in ["ABS", "Airbag"] {
        let body = json!({
            "name": name,
            "description": "safety",
            "acquisitionYear": 2020,
            "value": 500.0,
            "installationMinutes": 30,
            "vehicle": {"id": id}
        });
        create(build_test_app(pool.clone()), "/accessories", body).await;
    }

    let response = delete(build_test_app(pool.clone()), &format!("/vehicles/{id}")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert!(json["error"].as_str().unwrap().contains('2'));

    let response = get(build_test_app(pool), &format!("/vehicles/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_unreferenced_vehicle_returns_204(pool: PgPool) {
    let vehicle = create(build_test_app(pool.clone()), "/vehicles", corolla()).await;
    let id = vehicle["id"].as_i64().unwrap();

    let response = delete(build_test_app(pool.clone()), &format!("/vehicles/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(build_test_app(pool), &format!("/vehicles/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: search envelope, paging and next-page link
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_pages_through_matches(pool: PgPool) {
    for (model, country) in [
        ("Onix", "Brazil"),
        ("Polo", "Brazil"),
        ("Kwid", "Brazil"),
        ("Golf", "Germany"),
        ("Argo", "Brazil"),
    ] {
        let body = json!({"model": model, "countryOfAssembly": country});
        create(build_test_app(pool.clone()), "/vehicles", body).await;
    }

    let response = get(
        build_test_app(pool.clone()),
        "/vehicles/search?q=BRAZIL&sort=model&size=3",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["TotalVehicles"], 4);
    assert_eq!(json["TotalPages"], 2);
    assert_eq!(json["HasMore"], true);
    let models: Vec<_> = json["Vehicles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["model"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(models, vec!["Argo", "Kwid", "Onix"]);
    assert_eq!(
        json["NextPage"],
        format!(
            "{}/vehicles/search?q=BRAZIL&sort=model&direction=asc&page=1&size=3",
            common::BASE_URL
        )
    );

    let response = get(
        build_test_app(pool),
        "/vehicles/search?q=BRAZIL&sort=model&page=1&size=3",
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["Vehicles"].as_array().unwrap().len(), 1);
    assert_eq!(json["HasMore"], false);
    assert_eq!(json["NextPage"], "");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_with_unknown_sort_orders_by_id(pool: PgPool) {
    for model in ["Zafira", "Astra"] {
        let body = json!({"model": model, "countryOfAssembly": "Brazil"});
        create(build_test_app(pool.clone()), "/vehicles", body).await;
    }

    let response = get(build_test_app(pool), "/vehicles/search?sort=password&page=-4").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["Vehicles"][0]["model"], "Zafira");
    assert_eq!(json["Vehicles"][1]["model"], "Astra");
}
