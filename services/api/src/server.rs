use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_catalog_routes;
use axum::{Extension, Router};
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use unicatalog::catalog::{
    ApplicationRepository, CatalogService, MySqlCatalogStore, UniversityRepository,
};
use unicatalog::config::{AppConfig, HttpConfig};
use unicatalog::error::AppError;
use unicatalog::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(MySqlCatalogStore::connect_lazy(&config.database)?);
    let catalog_service = Arc::new(CatalogService::new(store.clone(), store));

    let app = build_app(catalog_service, app_state, &config.http).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        database = %config.database.database,
        "university catalog ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

/// Catalog and operational routes wrapped in the request middleware stack.
pub(crate) fn build_app<U, A>(
    service: Arc<CatalogService<U, A>>,
    state: AppState,
    http: &HttpConfig,
) -> Router
where
    U: UniversityRepository + 'static,
    A: ApplicationRepository + 'static,
{
    with_catalog_routes(service)
        .layer(Extension(state))
        .layer(GlobalConcurrencyLimitLayer::new(http.max_in_flight))
        .layer(TimeoutLayer::new(http.request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
