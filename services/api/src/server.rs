use crate::assets::INDEX_DOCUMENT;
use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::{metrics_endpoint, router};
use attendance_insights::config::AppConfig;
use attendance_insights::dataset::Dataset;
use attendance_insights::error::AppError;
use attendance_insights::telemetry;
use axum::routing::get;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(dataset) = args.dataset.take() {
        config.data.dataset_path = dataset;
    }

    telemetry::init(&config.telemetry)?;

    // a dataset that fails to load must never reach the listener
    let dataset = Dataset::load(&config.data.dataset_path)?;
    let employees = dataset.len();
    let state = AppState::new(dataset, config.data.static_dir.clone());

    if state.assets.resolve(INDEX_DOCUMENT).map_or(true, |path| !path.is_file()) {
        warn!(
            static_dir = %state.assets.root().display(),
            "index document missing; GET / will return 404"
        );
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let app = router(state)
        .route("/metrics", get(metrics_endpoint))
        .layer(Extension(Arc::new(prometheus_handle)))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(?config.environment, %addr, employees, "attendance insights ready");

    axum::serve(listener, app).await?;
    Ok(())
}
