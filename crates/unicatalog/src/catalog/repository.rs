use async_trait::async_trait;

use super::domain::{ApplicationId, NewApplication, University};
use super::filter::FilterQuery;

/// Read access to the university catalog.
#[async_trait]
pub trait UniversityRepository: Send + Sync {
    /// Every record, in store order.
    async fn list_all(&self) -> Result<Vec<University>, RepositoryError>;

    /// Records matching every clause, ranking ascending then id.
    async fn list_filtered(&self, filter: &FilterQuery) -> Result<Vec<University>, RepositoryError>;
}

/// Write access for application intake. Inserts only.
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn insert(&self, application: NewApplication) -> Result<ApplicationId, RepositoryError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
