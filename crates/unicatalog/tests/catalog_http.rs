use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use unicatalog::catalog::{
    catalog_router, ApplicationId, CatalogService, InMemoryCatalogStore, University,
};

fn university(id: i64, country: &str, degree_level: &str, fee: f64, ranking: i32) -> University {
    University {
        id,
        name: format!("University {id}"),
        country: country.to_string(),
        degree_level: degree_level.to_string(),
        tuition_fee: fee,
        required_gpa: 3.0,
        required_ielts: 6.5,
        ranking,
    }
}

fn router() -> (Router, InMemoryCatalogStore) {
    let store = InMemoryCatalogStore::with_universities(vec![
        university(10, "Netherlands", "Master", 18000.0, 60),
        university(11, "Netherlands", "Bachelor", 12000.0, 45),
        university(12, "Japan", "Master", 9000.0, 45),
    ]);
    let shared = Arc::new(store.clone());
    let service = CatalogService::new(shared.clone(), shared);
    (catalog_router(Arc::new(service)), store)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json payload")
}

#[tokio::test]
async fn browse_then_apply() {
    let (router, store) = router();

    let response = router
        .clone()
        .oneshot(
            Request::get("/universities/filter?min_fee=10000&max_fee=20000")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let listing = body_json(response).await;
    let names: Vec<&str> = listing
        .as_array()
        .expect("array")
        .iter()
        .map(|row| row["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, vec!["University 11", "University 10"]);

    let chosen = &listing[0];
    let response = router
        .oneshot(
            Request::post("/applications")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "university_id": chosen["id"],
                        "university_name": chosen["name"],
                        "full_name": "Sofia Lindqvist",
                        "email": "sofia@example.com",
                        "phone": null,
                    })
                    .to_string(),
                ))
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CREATED);
    let receipt = body_json(response).await;
    let id = ApplicationId(receipt["application_id"].as_u64().expect("id"));

    let saved = store.applications().expect("readable");
    let (saved_id, application) = &saved[0];
    assert_eq!(*saved_id, id);
    assert_eq!(application.university_id, 11);
    assert_eq!(application.university_name, "University 11");
    assert!(application.phone.is_none());
}

#[tokio::test]
async fn ranking_ties_break_by_id() {
    let (router, _) = router();

    let response = router
        .oneshot(
            Request::get("/universities/filter")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    let listing = body_json(response).await;
    let ids: Vec<i64> = listing
        .as_array()
        .expect("array")
        .iter()
        .map(|row| row["id"].as_i64().expect("id"))
        .collect();
    assert_eq!(ids, vec![11, 12, 10]);
}
