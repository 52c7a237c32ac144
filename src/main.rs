use axum::{
    Extension, Router,
    http::Method,
    middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};

use cluster_watchdog::config::Config;
use cluster_watchdog::health::prober::LeaderProber;
use cluster_watchdog::health::scheduler::HealthScheduler;
use cluster_watchdog::logbus::handlers::{handle_log_stream, log_requests};
use cluster_watchdog::logbus::service::LogBus;
use cluster_watchdog::membership::handlers::{handle_health, handle_update_server_list};
use cluster_watchdog::membership::service::MembershipService;
use cluster_watchdog::monitor::client::MonitorClient;
use cluster_watchdog::monitor::types::RegisterRequest;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = Config::from_env()?;

    let logs = LogBus::new();

    // 1. Core: membership ingress driving the leader health schedule
    let prober = Arc::new(LeaderProber::new(logs.clone()));
    let scheduler = HealthScheduler::new(prober);
    let membership = MembershipService::new(scheduler, logs.clone());

    // 2. One-shot startup announcement; failure is non-fatal and the outcome
    //    is logged by the client either way
    let monitor = Arc::new(MonitorClient::new(
        &config.monitor_ip,
        config.monitor_port,
        logs.clone(),
    ));
    let register_request = RegisterRequest {
        name: config.node_name.clone(),
        ip: config.host_ip.clone(),
        port: config.host_port,
        id: config.node_id.clone(),
        is_leader: config.is_leader,
    };
    {
        let monitor = monitor.clone();
        tokio::spawn(async move {
            let _ = monitor.register_self(&register_request).await;
        });
    }

    // 3. HTTP router
    let app = Router::new()
        .route("/health", get(handle_health))
        .route("/updateServerList", post(handle_update_server_list))
        .route("/logs", get(handle_log_stream))
        .layer(middleware::from_fn(log_requests))
        .layer(Extension(membership.clone()))
        .layer(Extension(logs.clone()))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(Any),
        )
        .layer(CatchPanicLayer::new());

    tracing::info!(
        "Node {} ({}) listening on http://{}",
        config.node_name,
        config.node_id,
        config.bind_addr
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
