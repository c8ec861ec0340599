use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState};
use crate::routes::with_triage_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use health_triage::config::AppConfig;
use health_triage::error::AppError;
use health_triage::telemetry;
use health_triage::triage::{InMemoryAppointmentRepository, TracingAuditLog, TriageService};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

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

    let catalog = Arc::new(load_catalog(&config.triage, args.catalog.as_deref())?);
    let policy = config.triage.ranking_policy();
    info!(
        facilities = catalog.len(),
        max_recommendations = policy.max_results,
        "facility catalog loaded"
    );
    let triage_service = Arc::new(TriageService::new(
        catalog,
        Arc::new(TracingAuditLog),
        Arc::new(InMemoryAppointmentRepository::default()),
        policy,
    ));

    let app = with_triage_routes(triage_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "health triage service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
