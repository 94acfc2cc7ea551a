//! gRPC server setup with graceful shutdown

use std::net::SocketAddr;
use tokio::signal;
use tonic::transport::Server;
use tower::layer::util::{Identity, Stack};

use crate::config::ServiceConfig;
use crate::grpc::procedure::ProcedureLayer;

/// gRPC server builder
///
/// Every server built here records procedure names for [`LoggingLayer`](super::LoggingLayer).
#[derive(Debug)]
pub struct GrpcServer {
    config: ServiceConfig,
}

impl GrpcServer {
    /// Create a new gRPC server with the given configuration
    pub fn new(config: ServiceConfig) -> Self {
        Self { config }
    }

    /// Tonic server builder with [`ProcedureLayer`] installed
    pub fn builder(&self) -> Server<Stack<ProcedureLayer, Identity>> {
        Server::builder().layer(ProcedureLayer)
    }

    /// Address on all interfaces at the configured port
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.config.port))
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl+C), starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }

    tracing::info!("Shutdown signal received, draining requests...");
}
