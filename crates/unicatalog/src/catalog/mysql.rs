use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::{MySql, QueryBuilder};

use super::domain::{ApplicationId, NewApplication, University};
use super::filter::{FilterQuery, FilterValue};
use super::repository::{ApplicationRepository, RepositoryError, UniversityRepository};
use crate::config::DatabaseConfig;

const UNIVERSITY_SELECT: &str = "SELECT id, name, country, degree_level, tuition_fee, \
     required_gpa, required_ielts, ranking FROM universities";

const APPLICATION_INSERT: &str = "INSERT INTO applications \
     (university_id, university_name, full_name, email, phone, country, gpa, ielts, message) \
     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)";

/// Catalog store backed by a shared MySQL pool.
#[derive(Clone)]
pub struct MySqlCatalogStore {
    pool: MySqlPool,
}

impl MySqlCatalogStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Builds the pool without opening a connection; the first query does.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let options = connect_options(config)?;
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_lazy_with(options);
        Ok(Self::new(pool))
    }
}

fn connect_options(config: &DatabaseConfig) -> Result<MySqlConnectOptions, sqlx::Error> {
    if let Some(url) = &config.url {
        return url.parse::<MySqlConnectOptions>();
    }

    let options = MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.username)
        .database(&config.database);

    if config.password.is_empty() {
        Ok(options)
    } else {
        Ok(options.password(&config.password))
    }
}

/// Renders the filtered listing as a parameterized statement.
///
/// Criterion values only ever travel as bound parameters.
pub fn filtered_select(filter: &FilterQuery) -> QueryBuilder<'static, MySql> {
    let mut builder = QueryBuilder::new(UNIVERSITY_SELECT);

    for (index, clause) in filter.clauses().iter().enumerate() {
        builder.push(if index == 0 { " WHERE " } else { " AND " });
        builder.push(clause.column());
        builder.push(" ");
        builder.push(clause.comparison().sql_operator());
        builder.push(" ");
        match clause.value() {
            FilterValue::Text(text) => builder.push_bind(text),
            FilterValue::Number(number) => builder.push_bind(number),
        };
    }

    builder.push(" ORDER BY ranking ASC, id ASC");
    builder
}

#[async_trait]
impl UniversityRepository for MySqlCatalogStore {
    async fn list_all(&self) -> Result<Vec<University>, RepositoryError> {
        let rows = sqlx::query_as::<_, University>(UNIVERSITY_SELECT)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn list_filtered(&self, filter: &FilterQuery) -> Result<Vec<University>, RepositoryError> {
        let mut builder = filtered_select(filter);
        let rows = builder
            .build_query_as::<University>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

#[async_trait]
impl ApplicationRepository for MySqlCatalogStore {
    async fn insert(&self, application: NewApplication) -> Result<ApplicationId, RepositoryError> {
        let result = sqlx::query(APPLICATION_INSERT)
            .bind(application.university_id)
            .bind(application.university_name)
            .bind(application.full_name)
            .bind(application.email)
            .bind(application.phone)
            .bind(application.country)
            .bind(application.gpa)
            .bind(application.ielts)
            .bind(application.message)
            .execute(&self.pool)
            .await?;
        Ok(ApplicationId(result.last_insert_id()))
    }
}
