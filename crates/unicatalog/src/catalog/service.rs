use std::sync::Arc;

use tracing::{debug, info};

use super::domain::{ApplicationReceipt, ApplicationSubmission, FilterCriteria, University};
use super::filter::FilterQuery;
use super::repository::{ApplicationRepository, RepositoryError, UniversityRepository};
use super::validation::ValidationError;

/// Service composing catalog reads and application intake over the stores.
pub struct CatalogService<U, A> {
    universities: Arc<U>,
    applications: Arc<A>,
}

impl<U, A> CatalogService<U, A>
where
    U: UniversityRepository + 'static,
    A: ApplicationRepository + 'static,
{
    pub fn new(universities: Arc<U>, applications: Arc<A>) -> Self {
        Self {
            universities,
            applications,
        }
    }

    /// Every university, unfiltered.
    pub async fn list_all(&self) -> Result<Vec<University>, CatalogError> {
        Ok(self.universities.list_all().await?)
    }

    /// Universities matching every supplied criterion, best ranked first.
    pub async fn list_filtered(
        &self,
        criteria: &FilterCriteria,
    ) -> Result<Vec<University>, CatalogError> {
        let filter = FilterQuery::from_criteria(criteria)?;
        debug!(clauses = filter.clauses().len(), "listing filtered universities");
        Ok(self.universities.list_filtered(&filter).await?)
    }

    /// Validate and persist one application. No deduplication is attempted.
    pub async fn submit_application(
        &self,
        submission: ApplicationSubmission,
    ) -> Result<ApplicationReceipt, CatalogError> {
        let application = submission.validate()?;
        let university_id = application.university_id;
        let application_id = self.applications.insert(application).await?;

        info!(
            application_id = application_id.0,
            university_id, "application saved"
        );
        Ok(ApplicationReceipt::new(application_id))
    }
}

/// Error raised by the catalog service.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] RepositoryError),
}
