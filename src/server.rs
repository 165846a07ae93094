use crate::cli::ServeArgs;
use crate::infra::{load_weights, AppState};
use crate::routes::planner_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tracing::info;
use workforce_planning::config::AppConfig;
use workforce_planning::error::AppError;
use workforce_planning::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let weights = load_weights(config.planning.department_weights_path.as_deref())?;
    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let app_state = AppState::new(prometheus_handle, weights);

    let app = planner_router()
        .layer(Extension(app_state.clone()))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    app_state.mark_ready();

    info!(?config.environment, %addr, "workforce planner ready");

    axum::serve(listener, app).await?;
    Ok(())
}
