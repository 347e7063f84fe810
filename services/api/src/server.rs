use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_lead_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use leadflow::config::AppConfig;
use leadflow::error::AppError;
use leadflow::intake::{JsonlLeadStore, LeadIntakeService, WebhookNotifier};
use leadflow::telemetry;
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
    if let Some(path) = args.leads_log.take() {
        config.intake.leads_log_path = path;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let app_state = AppState::new(Some(prometheus_handle));

    let store = Arc::new(JsonlLeadStore::new(&config.intake.leads_log_path));
    let notifier = Arc::new(WebhookNotifier::new(config.intake.webhook_url.clone()));
    let intake_service = Arc::new(LeadIntakeService::new(store, notifier));

    let app = with_lead_routes(intake_service)
        .layer(Extension(app_state.clone()))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    app_state.readiness.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        leads_log = %config.intake.leads_log_path.display(),
        webhook_enabled = config.intake.webhook_url.is_some(),
        "lead intake service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
