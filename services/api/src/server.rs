use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryAdminStore, InMemoryExhibitorRepository};
use crate::routes::dashboard_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

use expo_desk::auth::{AdminAccountService, AuthState, CredentialResolver};
use expo_desk::config::AppConfig;
use expo_desk::error::AppError;
use expo_desk::exhibitors::ExhibitorDirectory;
use expo_desk::telemetry;

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
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let admin_store = Arc::new(InMemoryAdminStore::default());
    let auth = AuthState {
        resolver: Arc::new(CredentialResolver::new(
            admin_store.clone(),
            config.fallback_admin.clone(),
        )),
        accounts: Arc::new(AdminAccountService::new(admin_store)),
    };

    let directory = Arc::new(ExhibitorDirectory::new(Arc::new(
        InMemoryExhibitorRepository::default(),
    )));

    let app = dashboard_routes(directory, auth)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        fallback_admin = config.fallback_admin.is_some(),
        "exhibitor dashboard API ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
