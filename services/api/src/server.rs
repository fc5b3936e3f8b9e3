use crate::cli::ServeArgs;
use crate::demo::{seed_catalogue, seed_sample_fleet};
use crate::infra::{scoring_rules, AppState, InMemoryEquipmentRepository, ServiceHoursFormula};
use crate::routes::with_seniority_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use hire_rotation::config::AppConfig;
use hire_rotation::error::AppError;
use hire_rotation::telemetry;
use hire_rotation::workflows::seniority::SeniorityListService;
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

    // TODO: replace the seeded in-memory store with the application's
    // persistence adapter once it is wired up.
    let repository = Arc::new(InMemoryEquipmentRepository::default());
    seed_catalogue(&repository);
    seed_sample_fleet(&repository);

    let rules = scoring_rules(&config.scoring)?;
    let seniority_service = Arc::new(SeniorityListService::new(
        repository.clone(),
        repository,
        Arc::new(ServiceHoursFormula),
        rules,
    ));

    let app = with_seniority_routes(seniority_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "hired equipment rotation service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
