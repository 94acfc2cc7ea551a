//! Procedure names for typed handlers
//!
//! Generated tonic servers dispatch on the URI path and then hand the typed
//! handler a `tonic::Request` that no longer knows which method it was. Installing
//! [`ProcedureLayer`] on the server copies the path into the request extensions,
//! which tonic carries over into the typed request.

use std::fmt;
use std::task::{Context, Poll};
use tonic::Request;
use tower::{Layer, Service};

const UNKNOWN: &str = "unknown";

/// Full gRPC method path, e.g. `/myservice.v1.MyService/GetUser`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Procedure(String);

impl Procedure {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Placeholder for requests that never went through [`ProcedureLayer`]
    pub fn unknown() -> Self {
        Self(UNKNOWN.to_string())
    }

    /// Procedure recorded on a typed request
    pub fn from_request<T>(req: &Request<T>) -> Self {
        req.extensions()
            .get::<Procedure>()
            .cloned()
            .unwrap_or_else(Self::unknown)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Service name without its package
    pub fn service(&self) -> &str {
        self.0
            .trim_start_matches('/')
            .split('/')
            .next()
            .and_then(|s| s.rsplit('.').next())
            .unwrap_or(UNKNOWN)
    }

    pub fn method(&self) -> &str {
        self.0
            .trim_start_matches('/')
            .split('/')
            .nth(1)
            .unwrap_or(UNKNOWN)
    }
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Records the request path as a [`Procedure`] extension
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcedureLayer;

impl<S> Layer<S> for ProcedureLayer {
    type Service = ProcedureService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ProcedureService { inner }
    }
}

#[derive(Debug, Clone)]
pub struct ProcedureService<S> {
    inner: S,
}

impl<S, B> Service<http::Request<B>> for ProcedureService<S>
where
    S: Service<http::Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: http::Request<B>) -> Self::Future {
        let procedure = Procedure::new(req.uri().path());
        req.extensions_mut().insert(procedure);
        self.inner.call(req)
    }
}
