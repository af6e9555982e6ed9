use anyhow::Context;
use std::sync::Arc;
use tonic::transport::Server;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use edgectl::api::{GrpcApplicationPolicyService, GrpcApplicationService, GrpcHealthService};
use edgectl::config::ServiceConfig;
use edgectl::http::http_router;
use edgectl::state::ControllerState;
use edgectl_core::{ApplicationPolicyServer, ApplicationServer, HealthServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .context("failed to register tracing subscriber")?;

    let config = ServiceConfig::parse()?;
    let state = ControllerState::in_memory(config.request_timeout);

    let application_grpc_service = ApplicationServer::new(GrpcApplicationService::new(
        Arc::clone(&state.applications),
        config.request_timeout,
    ));

    let policy_grpc_service = ApplicationPolicyServer::new(GrpcApplicationPolicyService::new(
        Arc::clone(&state.applications),
        config.request_timeout,
    ));

    let health_grpc_service = HealthServer::new(GrpcHealthService::new(
        Arc::clone(&state.applications),
        config.request_timeout,
    ));

    let grpc_server = Server::builder()
        .layer(TraceLayer::new_for_grpc())
        .add_service(application_grpc_service)
        .add_service(policy_grpc_service)
        .add_service(health_grpc_service)
        .serve(config.grpc_endpoint);

    let listener = tokio::net::TcpListener::bind(config.http_endpoint)
        .await
        .with_context(|| format!("failed to bind {}", config.http_endpoint))?;
    let http_server = axum::serve(listener, http_router(state));

    tracing::info!("grpc services listening on {}", config.grpc_endpoint);
    tracing::info!("rest collections listening on {}", config.http_endpoint);

    tokio::try_join!(
        async { grpc_server.await.context("grpc server failed") },
        async { http_server.await.context("http server failed") },
    )?;

    Ok(())
}
