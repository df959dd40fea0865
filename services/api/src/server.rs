use crate::cli::ServeArgs;
use crate::infra::{build_orchestrator, AppState};
use crate::routes::with_intake_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use cv_intake::config::AppConfig;
use cv_intake::error::AppError;
use cv_intake::telemetry;
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

    let orchestrator = Arc::new(build_orchestrator(&config.intake));
    orchestrator.initialize_sink(&config.intake.target_id)?;
    info!(
        sink = %orchestrator.sink().describe(),
        target_id = %config.intake.target_id,
        "record sink initialized"
    );

    let app = with_intake_routes(orchestrator)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "resume intake service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
