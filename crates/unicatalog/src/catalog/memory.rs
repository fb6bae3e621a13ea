use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;

use super::domain::{ApplicationId, NewApplication, University};
use super::filter::FilterQuery;
use super::repository::{ApplicationRepository, RepositoryError, UniversityRepository};

/// Process-local catalog store evaluating filters in memory.
///
/// Runs the same [`FilterQuery`] the MySQL store renders, so listings can be
/// exercised without a database.
#[derive(Clone, Default)]
pub struct InMemoryCatalogStore {
    universities: Arc<RwLock<Vec<University>>>,
    applications: Arc<Mutex<Vec<(ApplicationId, NewApplication)>>>,
    sequence: Arc<AtomicU64>,
}

impl InMemoryCatalogStore {
    pub fn with_universities(universities: Vec<University>) -> Self {
        Self {
            universities: Arc::new(RwLock::new(universities)),
            ..Self::default()
        }
    }

    /// Snapshot of saved applications in insertion order.
    pub fn applications(&self) -> Result<Vec<(ApplicationId, NewApplication)>, RepositoryError> {
        let guard = self.applications.lock().map_err(|_| poisoned())?;
        Ok(guard.clone())
    }
}

fn poisoned() -> RepositoryError {
    RepositoryError::Unavailable("in-memory store lock poisoned".to_string())
}

#[async_trait]
impl UniversityRepository for InMemoryCatalogStore {
    async fn list_all(&self) -> Result<Vec<University>, RepositoryError> {
        let guard = self.universities.read().map_err(|_| poisoned())?;
        Ok(guard.clone())
    }

    async fn list_filtered(&self, filter: &FilterQuery) -> Result<Vec<University>, RepositoryError> {
        let guard = self.universities.read().map_err(|_| poisoned())?;
        let mut rows: Vec<University> = guard
            .iter()
            .filter(|university| filter.matches(university))
            .cloned()
            .collect();
        rows.sort_by(FilterQuery::listing_order);
        Ok(rows)
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryCatalogStore {
    async fn insert(&self, application: NewApplication) -> Result<ApplicationId, RepositoryError> {
        let mut guard = self.applications.lock().map_err(|_| poisoned())?;
        let id = ApplicationId(self.sequence.fetch_add(1, Ordering::Relaxed) + 1);
        guard.push((id, application));
        Ok(id)
    }
}
