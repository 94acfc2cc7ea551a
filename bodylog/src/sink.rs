//! Log entries produced per call and the sinks that receive them

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tonic::Code;
use tracing::Level;

use crate::format::LoggableValue;
use crate::grpc::procedure::Procedure;
use crate::status::code_name;

/// Entry logged when a call enters the interceptor
#[derive(Debug, Clone, PartialEq)]
pub struct CallStart {
    pub procedure: Procedure,
    pub request_id: Option<String>,
    pub request_body: LoggableValue,
}

/// How a call finished
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutcome {
    Ok { response_body: LoggableValue },
    Err { error: String },
}

/// Entry logged when the wrapped handler returns
#[derive(Debug, Clone, PartialEq)]
pub struct CallEnd {
    pub procedure: Procedure,
    pub request_id: Option<String>,
    pub duration: Duration,
    pub code: Code,
    pub outcome: CallOutcome,
}

impl CallEnd {
    /// Logged response body; `None` on the error path
    pub fn response_body(&self) -> Option<&LoggableValue> {
        match &self.outcome {
            CallOutcome::Ok { response_body } => Some(response_body),
            CallOutcome::Err { .. } => None,
        }
    }

    /// Logged error detail; `None` on the success path
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            CallOutcome::Ok { .. } => None,
            CallOutcome::Err { error } => Some(error),
        }
    }
}

/// One call-start or call-end record
#[derive(Debug, Clone, PartialEq)]
pub enum LogEntry {
    Start(CallStart),
    End(CallEnd),
}

impl LogEntry {
    pub fn level(&self) -> Level {
        match self {
            Self::End(CallEnd {
                outcome: CallOutcome::Err { .. },
                ..
            }) => Level::ERROR,
            _ => Level::INFO,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Start(_) => "request start",
            Self::End(end) if end.error().is_some() => "request end with error",
            Self::End(_) => "request end",
        }
    }

    pub fn procedure(&self) -> &Procedure {
        match self {
            Self::Start(start) => &start.procedure,
            Self::End(end) => &end.procedure,
        }
    }

    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Start(start) => start.request_id.as_deref(),
            Self::End(end) => end.request_id.as_deref(),
        }
    }
}

/// Destination for call log entries
pub trait LogSink: Send + Sync {
    fn record(&self, entry: &LogEntry);
}

/// Sink that turns entries into `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn record(&self, entry: &LogEntry) {
        match entry {
            LogEntry::Start(start) => {
                tracing::info!(
                    procedure = %start.procedure,
                    rpc.service = start.procedure.service(),
                    rpc.method = start.procedure.method(),
                    request_id = start.request_id.as_deref(),
                    request_body = %start.request_body,
                    "request start"
                );
            }
            LogEntry::End(end) => {
                let duration_ms = end.duration.as_secs_f64() * 1000.0;
                match &end.outcome {
                    CallOutcome::Ok { response_body } => {
                        tracing::info!(
                            procedure = %end.procedure,
                            rpc.service = end.procedure.service(),
                            rpc.method = end.procedure.method(),
                            request_id = end.request_id.as_deref(),
                            duration_ms,
                            code = code_name(end.code),
                            response_body = %response_body,
                            "request end"
                        );
                    }
                    CallOutcome::Err { error } => {
                        tracing::error!(
                            procedure = %end.procedure,
                            rpc.service = end.procedure.service(),
                            rpc.method = end.procedure.method(),
                            request_id = end.request_id.as_deref(),
                            duration_ms,
                            code = code_name(end.code),
                            error = %error,
                            "request end with error"
                        );
                    }
                }
            }
        }
    }
}

/// Sink that keeps every entry in memory
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LogSink for MemorySink {
    fn record(&self, entry: &LogEntry) {
        self.lock().push(entry.clone());
    }
}
