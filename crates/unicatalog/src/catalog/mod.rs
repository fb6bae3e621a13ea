//! University catalog listing and application intake.
//!
//! Reads go through [`UniversityRepository`], writes through
//! [`ApplicationRepository`]; [`CatalogService`] composes both and
//! [`catalog_router`] exposes them over HTTP.

pub mod domain;
pub mod filter;
pub mod memory;
pub mod mysql;
pub mod repository;
pub mod router;
pub mod service;
pub(crate) mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationId, ApplicationReceipt, ApplicationSubmission, FilterCriteria, NewApplication,
    University,
};
pub use filter::{FilterClause, FilterQuery, FilterValue, ALL_COUNTRIES, ALL_DEGREES};
pub use memory::InMemoryCatalogStore;
pub use mysql::MySqlCatalogStore;
pub use repository::{ApplicationRepository, RepositoryError, UniversityRepository};
pub use router::catalog_router;
pub use service::{CatalogError, CatalogService};
pub use validation::ValidationError;
