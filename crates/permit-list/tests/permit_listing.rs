use std::future::Future;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use permit_list::permits::{
    map_responses, permit_router, to_legacy, PermitListService, PermitStatus,
};
use permit_list::source::{QueryParams, ResponseSource, SourceError};
use serde_json::{json, Value};
use tower::ServiceExt;

struct CannedSource {
    payload: Value,
}

impl ResponseSource for CannedSource {
    fn get_project_responses(
        &self,
        _project_id: &str,
        _params: &QueryParams,
        _max_count: usize,
    ) -> impl Future<Output = Result<Value, SourceError>> + Send {
        let payload = self.payload.clone();
        async move { Ok(payload) }
    }
}

fn screendoor_page() -> Value {
    json!([
        {
            "id": 101,
            "sequential_id": 1,
            "status": "Approved",
            "labels": ["Post on Website", "Planning - Referred", "Police - Referred"],
            "responses": {
                "uqqrsogr": "PRE-2018-0101",
                "t00kheyd": "Sunset Ventures LLC",
                "60w4ep9y": "Sunset Leaf",
                "kbqz4189": {
                    "street": "2400 Irving St",
                    "city": "San Francisco",
                    "state": "CA",
                    "zipcode": "94122"
                },
                "kvrgbqrl": "1768/012",
                "dd8a5g7g": { "checked": ["Retailer (medical and adult use)"] }
            }
        },
        {
            "id": 102,
            "sequential_id": 2,
            "status": "Denied",
            "labels": [],
            "responses": {
                "t00kheyd": "Denied Co",
                "dd8a5g7g": { "checked": ["Retailer (medical and adult use)"] }
            }
        },
        {
            "id": 103,
            "sequential_id": 3,
            "status": "Submitted",
            "labels": [],
            "responses": {
                "t00kheyd": "No Activity Co"
            }
        }
    ])
}

fn router(payload: Value) -> axum::Router {
    let source = Arc::new(CannedSource { payload });
    permit_router(Arc::new(PermitListService::new(source, "4321")))
}

async fn get(router: axum::Router, path: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::get(path).body(Body::empty()).unwrap())
        .await
        .expect("route executes");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, serde_json::from_slice(&bytes).expect("json body"))
}

#[tokio::test]
async fn retail_listing_returns_only_qualifying_permits() {
    let (status, body) = get(router(screendoor_page()), "/list/retail").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    let list = body["data"]["list"].as_array().expect("list array");
    assert_eq!(list.len(), 1);

    let permit = &list[0];
    assert_eq!(permit["retailer (medical and adult use)"], "approved");
    assert_eq!(permit["application_id"], "PRE-2018-0101");
    assert_eq!(permit["address"], "2400 Irving St, San Francisco, CA 94122");
    assert_eq!(permit["referred"], "Planning Department, Police Department");
}

#[tokio::test]
async fn legacy_listing_is_keyed_by_name_and_id() {
    let (status, body) = get(router(screendoor_page()), "/list/retail_legacy").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({
            "SUNSET LEAF PRE-2018-0101": {
                "application_id": "PRE-2018-0101",
                "dba_name": "Sunset Leaf",
                "address": "2400 Irving St, San Francisco, CA 94122",
                "parcel": "1768/012",
                "activities": "retailer (medical and adult use)",
                "referring_dept": "Planning Department, Police Department",
                "status": "Approved"
            }
        })
    );
}

#[tokio::test]
async fn bogus_permit_type_is_rejected() {
    let (status, body) = get(router(screendoor_page()), "/list/bogus").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn source_error_payload_is_rejected() {
    let (status, body) = get(router(json!({ "errors": ["unauthorized"] })), "/list/retail").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

#[test]
fn disqualified_responses_are_tracked_as_missing() {
    let mapped = map_responses(screendoor_page()).expect("maps");
    assert_eq!(mapped.permits.len(), 1);
    let missing: Vec<String> = mapped
        .missing
        .iter()
        .map(|entry| entry.id.to_string())
        .collect();
    assert_eq!(missing, vec!["102", "103"]);
}

#[test]
fn mapped_statuses_are_always_canonical() {
    let statuses = ["Submitted", "Processing", "On Hold", "Approved", "Build-out", "Denied", "Withdrawn"];
    let page: Vec<Value> = statuses
        .iter()
        .enumerate()
        .map(|(index, status)| {
            json!({
                "id": index,
                "sequential_id": index,
                "status": status,
                "responses": {
                    "60w4ep9y": "Shop",
                    "dd8a5g7g": { "checked": ["Retailer (medical and adult use)"] }
                }
            })
        })
        .collect();

    let mapped = map_responses(Value::Array(page)).expect("maps");
    assert_eq!(mapped.permits.len(), 5);
    assert_eq!(mapped.missing.len(), 2);
    for permit in &mapped.permits {
        assert!(["submitted", "on hold", "approved"].contains(&permit.status.label()));
        let value = serde_json::to_value(permit).expect("serializes");
        assert_eq!(value["retailer (medical and adult use)"], permit.status.label());
    }
}

#[test]
fn legacy_collisions_collapse_to_unique_keys() {
    let duplicate = |parcel: &str| {
        json!({
            "id": 1,
            "sequential_id": 1,
            "status": "Approved",
            "responses": {
                "uqqrsogr": "PRE-9",
                "60w4ep9y": "Twin Shop",
                "kvrgbqrl": parcel,
                "dd8a5g7g": { "checked": ["Retailer (medical and adult use)"] }
            }
        })
    };
    let mapped = map_responses(json!([duplicate("first"), duplicate("second")])).expect("maps");
    assert_eq!(mapped.permits.len(), 2);
    assert!(mapped
        .permits
        .iter()
        .all(|permit| permit.status == PermitStatus::Approved));

    let legacy = to_legacy(&mapped.permits);
    assert_eq!(legacy.len(), 1);
    assert_eq!(legacy["TWIN SHOP PRE-9"].parcel, "second");
}
