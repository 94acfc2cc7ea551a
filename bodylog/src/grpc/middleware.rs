//! Request/response logging for unary gRPC handlers
//!
//! [`LoggingLayer`] wraps a tower service over typed `tonic::Request`s. Every call
//! produces exactly two entries in the configured [`LogSink`]: one when the call
//! enters, one when the wrapped handler returns. A call whose future is dropped
//! first (client gone, deadline hit) ends with a `cancelled` entry instead. The
//! handler's result is passed back untouched.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;
use tonic::{Code, Request, Response, Status};
use tower::{Layer, Service};

use crate::config::{BodyFormat, LoggingConfig};
use crate::format::{format_payload, LoggableValue, Payload};
use crate::grpc::interceptors::request_id;
use crate::grpc::procedure::Procedure;
use crate::sink::{CallEnd, CallOutcome, CallStart, LogEntry, LogSink, TracingSink};
use crate::status::error_detail;

/// Logging middleware for unary gRPC handlers
#[derive(Clone)]
pub struct LoggingLayer {
    format: BodyFormat,
    sink: Arc<dyn LogSink>,
}

impl LoggingLayer {
    /// Create a layer writing to `sink`
    pub fn new(format: BodyFormat, sink: impl LogSink + 'static) -> Self {
        Self {
            format,
            sink: Arc::new(sink),
        }
    }

    /// Create a layer writing `tracing` events, with the configured body format
    pub fn from_config(config: &LoggingConfig) -> Self {
        Self::new(config.body_format, TracingSink)
    }

    pub fn body_format(&self) -> BodyFormat {
        self.format
    }

    /// Wrap a handler; same as [`Layer::layer`]
    pub fn wrap<S>(&self, next: S) -> LoggingService<S> {
        self.layer(next)
    }
}

impl std::fmt::Debug for LoggingLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggingLayer")
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = LoggingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LoggingService {
            inner,
            format: self.format,
            sink: self.sink.clone(),
        }
    }
}

/// Logging service implementation
#[derive(Clone)]
pub struct LoggingService<S> {
    inner: S,
    format: BodyFormat,
    sink: Arc<dyn LogSink>,
}

fn render(format: BodyFormat, payload: &dyn Payload) -> LoggableValue {
    match format {
        BodyFormat::Suppressed => LoggableValue::Empty,
        BodyFormat::Structured => format_payload(payload),
    }
}

/// End entry owed by a call that has logged its start
///
/// Dropped without [`PendingEnd::finish`], it records the call as cancelled.
struct PendingEnd {
    sink: Arc<dyn LogSink>,
    call: Option<(Procedure, Option<String>)>,
    start: Instant,
}

impl PendingEnd {
    fn finish(mut self, code: Code, outcome: CallOutcome) {
        self.record(code, outcome);
    }

    fn record(&mut self, code: Code, outcome: CallOutcome) {
        if let Some((procedure, request_id)) = self.call.take() {
            self.sink.record(&LogEntry::End(CallEnd {
                procedure,
                request_id,
                duration: self.start.elapsed(),
                code,
                outcome,
            }));
        }
    }
}

impl Drop for PendingEnd {
    fn drop(&mut self) {
        if self.call.is_none() {
            return;
        }
        let status = Status::cancelled(CANCELLED_MESSAGE);
        self.record(
            status.code(),
            CallOutcome::Err {
                error: error_detail(&status),
            },
        );
    }
}

const CANCELLED_MESSAGE: &str = "call dropped before the handler returned";

impl<S, Req, Res> Service<Request<Req>> for LoggingService<S>
where
    S: Service<Request<Req>, Response = Response<Res>, Error = Status> + Clone + Send + 'static,
    S::Future: Send + 'static,
    Req: Payload + 'static,
    Res: Payload + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Req>) -> Self::Future {
        // the readied service handles this call; the fresh clone waits for the next poll_ready
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let format = self.format;
        let sink = self.sink.clone();

        Box::pin(async move {
            let start = Instant::now();
            let procedure = Procedure::from_request(&req);
            let request_id = request_id(&req);

            sink.record(&LogEntry::Start(CallStart {
                procedure: procedure.clone(),
                request_id: request_id.clone(),
                request_body: render(format, req.get_ref()),
            }));
            let pending = PendingEnd {
                sink,
                call: Some((procedure, request_id)),
                start,
            };

            let result = inner.call(req).await;

            let (code, outcome) = match &result {
                Ok(response) => (
                    Code::Ok,
                    CallOutcome::Ok {
                        response_body: render(format, response.get_ref()),
                    },
                ),
                Err(status) => (
                    status.code(),
                    CallOutcome::Err {
                        error: error_detail(status),
                    },
                ),
            };
            pending.finish(code, outcome);

            result
        })
    }
}
