use clap::Parser;
use std::path::PathBuf;
use tonic_reflection::server::Builder as ReflectionBuilder;

use bodylog::grpc::{request_id_interceptor, shutdown_signal, GrpcServer, LoggingLayer};
use bodylog::{observability::init_tracing, BodyFormat, Config, Error};

mod service;

use service::pb::my_service_server::MyServiceServer;
use service::pb::FILE_DESCRIPTOR_SET;
use service::MyServiceImpl;

/// bodylog-server - MyService demo with request/response logging
#[derive(Parser, Debug)]
#[command(name = "bodylog-server")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log request and response bodies as structured JSON instead of `{}`
    #[arg(long)]
    parsed: bool,

    /// Port to listen on
    #[arg(long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Configuration file (TOML)
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration
    fn apply(&self, mut config: Config) -> Config {
        if self.parsed {
            config.logging.body_format = BodyFormat::Structured;
        }
        if let Some(port) = self.port {
            config.service.port = port;
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.apply(Config::load_from(&cli.config)?);

    init_tracing(&config)?;

    let logging = LoggingLayer::from_config(&config.logging);
    tracing::info!(
        parsed = cli.parsed,
        body_format = %logging.body_format(),
        "API_OPAQUE message logging configuration"
    );
    match logging.body_format() {
        BodyFormat::Structured => {
            tracing::info!("Using parsed body interceptor for API_OPAQUE messages")
        }
        BodyFormat::Suppressed => {
            tracing::info!("Using empty body interceptor for API_OPAQUE messages")
        }
    }

    let reflection_v1 = ReflectionBuilder::configure()
        .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
        .build_v1()
        .map_err(|e| Error::Reflection(e.to_string()))?;
    let reflection_v1alpha = ReflectionBuilder::configure()
        .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
        .build_v1alpha()
        .map_err(|e| Error::Reflection(e.to_string()))?;

    let server = GrpcServer::new(config.service.clone());
    let addr = server.socket_addr();
    tracing::info!(service = %server.config().name, address = %addr, "Server started");

    let result = server
        .builder()
        .add_service(MyServiceServer::with_interceptor(
            MyServiceImpl::new(&logging),
            request_id_interceptor,
        ))
        .add_service(reflection_v1)
        .add_service(reflection_v1alpha)
        .serve_with_shutdown(addr, shutdown_signal())
        .await;

    if let Err(e) = result {
        let err = Error::from(e);
        tracing::error!(error = %err, "Server failed");
        return Err(err.into());
    }

    tracing::info!("Server stopped gracefully");
    Ok(())
}
