//! Response types shared by the resource handlers.
//!
//! Search endpoints return a per-resource envelope with PascalCase keys,
//! e.g. `{ "Vehicles": [...], "TotalVehicles": 9, "TotalPages": 3,
//! "HasMore": true, "NextPage": "http://.../vehicles/search?...&page=1" }`.

use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::Json;
use autocatalog_core::search::{PageInfo, SearchRequest, SortField};
use autocatalog_db::models::accessory::Accessory;
use autocatalog_db::models::manufacturer::Manufacturer;
use autocatalog_db::models::page::Page;
use autocatalog_db::models::vehicle::Vehicle;
use serde::Serialize;
use url::Url;

/// `201 Created` with a `Location` header pointing at the new record.
pub type Created<T> = (StatusCode, [(axum::http::HeaderName, String); 1], Json<T>);

pub fn created<T>(resource: &str, id: i64, body: T) -> Created<T> {
    (
        StatusCode::CREATED,
        [(LOCATION, format!("/{resource}/{id}"))],
        Json(body),
    )
}

/// Paging fields common to every search envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PageMeta {
    pub total_pages: i64,
    pub has_more: bool,
    pub next_page: String,
}

impl PageMeta {
    /// Page totals plus the next-page link rooted at `base`.
    pub fn build<F: SortField, T>(
        request: &SearchRequest<F>,
        page: &Page<T>,
        base: &Url,
        resource: &str,
    ) -> Self {
        let info = PageInfo::compute(page.total_items, &request.page);
        Self {
            total_pages: info.total_pages,
            has_more: info.has_more,
            next_page: request.next_page_url(base, resource, &info),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VehicleSearchResponse {
    pub vehicles: Vec<Vehicle>,
    pub total_vehicles: i64,
    #[serde(flatten)]
    pub meta: PageMeta,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccessorySearchResponse {
    pub accessories: Vec<Accessory>,
    pub total_accessories: i64,
    #[serde(flatten)]
    pub meta: PageMeta,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ManufacturerSearchResponse {
    pub manufacturers: Vec<Manufacturer>,
    pub total_manufacturers: i64,
    #[serde(flatten)]
    pub meta: PageMeta,
}
