//! # bodylog
//!
//! Request/response logging for unary gRPC services whose messages may not expose
//! their fields to generic formatting.
//!
//! ## Features
//!
//! - **Two body formats**: `suppressed` logs every body as `{}`; `structured` logs
//!   protobuf messages that opt in as compact proto3 JSON, with unset fields omitted
//! - **Transparent**: the wrapped handler's response or status is returned untouched
//! - **Injected sink**: entries go to `tracing` by default, or to any [`LogSink`]
//! - **Correlation**: `x-request-id` is carried on both entries of a call
//!
//! ## Example
//!
//! ```rust,no_run
//! use bodylog::prelude::*;
//!
//! // generated message types opt in with `bodylog::structured_payload!(GetUserRequest, ...)`
//! # async fn run() -> Result<()> {
//! let config = Config::load()?;
//! init_tracing(&config)?;
//!
//! let ping = LoggingLayer::from_config(&config.logging).wrap(tower::service_fn(
//!     |req: Request<String>| async move { Ok::<_, Status>(Response::new(req.into_inner())) },
//! ));
//! # let _ = ping;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod grpc;
pub mod observability;
pub mod sink;
pub mod status;

#[cfg(test)]
mod testing;

pub use config::{BodyFormat, Config, LoggingConfig, ServiceConfig};
pub use error::{Error, Result};
pub use format::{format_payload, LoggableValue, Payload, StructuredMessage};
pub use grpc::{LoggingLayer, LoggingService, Procedure, ProcedureLayer};
pub use sink::{CallEnd, CallOutcome, CallStart, LogEntry, LogSink, MemorySink, TracingSink};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{BodyFormat, Config, LoggingConfig, ServiceConfig};
    pub use crate::error::{Error, Result};
    pub use crate::format::{format_payload, LoggableValue, Payload, StructuredMessage};
    pub use crate::grpc::{
        request_id, request_id_interceptor, shutdown_signal, GrpcServer, LoggingLayer,
        LoggingService, Procedure, ProcedureLayer,
    };
    pub use crate::observability::init_tracing;
    pub use crate::sink::{LogEntry, LogSink, MemorySink, TracingSink};
    pub use crate::status::code_name;

    pub use tonic::{Code, Request, Response, Status};
}
