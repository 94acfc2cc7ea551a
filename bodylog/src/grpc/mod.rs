//! gRPC plumbing for request/response logging
//!
//! ## Example
//!
//! ```ignore
//! use bodylog::grpc::{request_id_interceptor, GrpcServer, LoggingLayer};
//!
//! let logging = LoggingLayer::from_config(&config.logging);
//! let service = MyServiceServer::with_interceptor(
//!     MyServiceImpl::new(&logging),
//!     request_id_interceptor,
//! );
//!
//! let server = GrpcServer::new(config.service.clone());
//! server
//!     .builder()
//!     .add_service(service)
//!     .serve_with_shutdown(server.socket_addr(), shutdown_signal())
//!     .await?;
//! ```

pub mod interceptors;
pub mod middleware;
pub mod procedure;
pub mod server;

pub use interceptors::{request_id, request_id_interceptor, REQUEST_ID_KEY};
pub use middleware::{LoggingLayer, LoggingService};
pub use procedure::{Procedure, ProcedureLayer, ProcedureService};
pub use server::{shutdown_signal, GrpcServer};

// Re-export tonic types for convenience
pub use tonic::{Code, Request, Response, Status};
