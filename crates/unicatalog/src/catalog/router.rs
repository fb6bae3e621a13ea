use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::{error, warn};

use super::domain::{ApplicationSubmission, FilterCriteria};
use super::repository::{ApplicationRepository, UniversityRepository};
use super::service::{CatalogError, CatalogService};
use super::validation::ValidationError;

pub const LISTING_FAILURE: &str = "Database error";
pub const SUBMISSION_FAILURE: &str = "Failed to save application";
pub const REQUIRED_FIELDS_MISSING: &str = "Required fields missing";
pub const INVALID_NUMBER: &str = "Invalid numeric value";
pub const INVALID_BODY: &str = "Invalid request body";
pub const INVALID_QUERY: &str = "Invalid query string";

/// Router exposing the catalog listing and application intake endpoints.
pub fn catalog_router<U, A>(service: Arc<CatalogService<U, A>>) -> Router
where
    U: UniversityRepository + 'static,
    A: ApplicationRepository + 'static,
{
    Router::new()
        .route("/universities", get(list_handler::<U, A>))
        .route("/universities/filter", get(filter_handler::<U, A>))
        .route("/applications", post(submit_handler::<U, A>))
        .with_state(service)
}

pub(crate) async fn list_handler<U, A>(
    State(service): State<Arc<CatalogService<U, A>>>,
) -> Response
where
    U: UniversityRepository + 'static,
    A: ApplicationRepository + 'static,
{
    match service.list_all().await {
        Ok(universities) => (StatusCode::OK, Json(universities)).into_response(),
        Err(err) => listing_failure(err),
    }
}

pub(crate) async fn filter_handler<U, A>(
    State(service): State<Arc<CatalogService<U, A>>>,
    criteria: Result<Query<FilterCriteria>, QueryRejection>,
) -> Response
where
    U: UniversityRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let criteria = match criteria {
        Ok(Query(criteria)) => criteria,
        Err(rejection) => {
            warn!(reason = %rejection.body_text(), "unreadable filter query");
            return bad_request(json!({ "error": INVALID_QUERY }));
        }
    };

    match service.list_filtered(&criteria).await {
        Ok(universities) => (StatusCode::OK, Json(universities)).into_response(),
        Err(err) => listing_failure(err),
    }
}

pub(crate) async fn submit_handler<U, A>(
    State(service): State<Arc<CatalogService<U, A>>>,
    payload: Result<Json<ApplicationSubmission>, JsonRejection>,
) -> Response
where
    U: UniversityRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let submission = match payload {
        Ok(Json(submission)) => submission,
        // Without a JSON content type the body reads as empty.
        Err(JsonRejection::MissingJsonContentType(_)) => ApplicationSubmission::default(),
        Err(rejection) => {
            warn!(reason = %rejection.body_text(), "unreadable application body");
            return bad_request(json!({ "error": INVALID_BODY }));
        }
    };

    match service.submit_application(submission).await {
        Ok(receipt) => (StatusCode::CREATED, Json(receipt)).into_response(),
        Err(CatalogError::Validation(err)) => validation_failure(&err),
        Err(CatalogError::Storage(err)) => {
            error!(error = %err, "failed to save application");
            internal_error(SUBMISSION_FAILURE)
        }
    }
}

fn listing_failure(err: CatalogError) -> Response {
    match err {
        CatalogError::Validation(err) => validation_failure(&err),
        CatalogError::Storage(err) => {
            error!(error = %err, "university listing failed");
            internal_error(LISTING_FAILURE)
        }
    }
}

fn validation_failure(err: &ValidationError) -> Response {
    warn!(%err, "request rejected");
    match err {
        ValidationError::MissingRequiredFields(fields) => bad_request(json!({
            "error": REQUIRED_FIELDS_MISSING,
            "missing": fields,
        })),
        ValidationError::InvalidNumber { field, .. } => bad_request(json!({
            "error": INVALID_NUMBER,
            "field": field,
        })),
    }
}

fn bad_request(payload: serde_json::Value) -> Response {
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}

fn internal_error(message: &'static str) -> Response {
    let payload = json!({ "error": message });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
}
