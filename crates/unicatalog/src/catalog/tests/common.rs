use std::sync::Arc;

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::catalog::domain::{ApplicationId, NewApplication, University};
use crate::catalog::filter::FilterQuery;
use crate::catalog::repository::{ApplicationRepository, RepositoryError, UniversityRepository};
use crate::catalog::{catalog_router, CatalogService, InMemoryCatalogStore};

pub(super) type MemoryService = CatalogService<InMemoryCatalogStore, InMemoryCatalogStore>;

#[allow(clippy::too_many_arguments)]
pub(super) fn university(
    id: i64,
    name: &str,
    country: &str,
    degree_level: &str,
    tuition_fee: f64,
    required_gpa: f64,
    required_ielts: f64,
    ranking: i32,
) -> University {
    University {
        id,
        name: name.to_string(),
        country: country.to_string(),
        degree_level: degree_level.to_string(),
        tuition_fee,
        required_gpa,
        required_ielts,
        ranking,
    }
}

/// Six records, stored out of ranking order, with two ranking ties.
pub(super) fn catalog() -> Vec<University> {
    vec![
        university(1, "University of Toronto", "Canada", "Bachelor", 30000.0, 3.0, 6.5, 20),
        university(2, "McGill University", "Canada", "Master", 25000.0, 3.3, 7.0, 30),
        university(3, "TU Munich", "Germany", "Master", 500.0, 2.8, 6.0, 15),
        university(4, "University of Oxford", "United Kingdom", "Bachelor", 40000.0, 3.8, 7.5, 5),
        university(5, "University of Melbourne", "Australia", "Master", 35000.0, 3.2, 6.5, 30),
        university(6, "University of British Columbia", "Canada", "Bachelor", 28000.0, 3.1, 6.5, 20),
    ]
}

pub(super) fn build_service() -> (MemoryService, InMemoryCatalogStore) {
    let store = InMemoryCatalogStore::with_universities(catalog());
    let shared = Arc::new(store.clone());
    (CatalogService::new(shared.clone(), shared), store)
}

pub(super) fn memory_router() -> (axum::Router, InMemoryCatalogStore) {
    let (service, store) = build_service();
    (catalog_router(Arc::new(service)), store)
}

pub(super) fn unavailable_router() -> axum::Router {
    let store = Arc::new(UnavailableStore);
    catalog_router(Arc::new(CatalogService::new(store.clone(), store)))
}

pub(super) fn ids(universities: &[University]) -> Vec<i64> {
    universities.iter().map(|university| university.id).collect()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) struct UnavailableStore;

#[async_trait]
impl UniversityRepository for UnavailableStore {
    async fn list_all(&self) -> Result<Vec<University>, RepositoryError> {
        Err(RepositoryError::Unavailable("connection refused".to_string()))
    }

    async fn list_filtered(&self, _filter: &FilterQuery) -> Result<Vec<University>, RepositoryError> {
        Err(RepositoryError::Unavailable("connection refused".to_string()))
    }
}

#[async_trait]
impl ApplicationRepository for UnavailableStore {
    async fn insert(&self, _application: NewApplication) -> Result<ApplicationId, RepositoryError> {
        Err(RepositoryError::Unavailable("connection refused".to_string()))
    }
}
