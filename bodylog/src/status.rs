//! Canonical names for gRPC status codes

use tonic::{Code, Status};

/// Snake-case name of a status code, as written to the `code` log field
pub fn code_name(code: Code) -> &'static str {
    match code {
        Code::Ok => "ok",
        Code::Cancelled => "canceled",
        Code::Unknown => "unknown",
        Code::InvalidArgument => "invalid_argument",
        Code::DeadlineExceeded => "deadline_exceeded",
        Code::NotFound => "not_found",
        Code::AlreadyExists => "already_exists",
        Code::PermissionDenied => "permission_denied",
        Code::ResourceExhausted => "resource_exhausted",
        Code::FailedPrecondition => "failed_precondition",
        Code::Aborted => "aborted",
        Code::OutOfRange => "out_of_range",
        Code::Unimplemented => "unimplemented",
        Code::Internal => "internal",
        Code::Unavailable => "unavailable",
        Code::DataLoss => "data_loss",
        Code::Unauthenticated => "unauthenticated",
    }
}

/// Error detail for a failed call: `"<code>: <message>"`
pub fn error_detail(status: &Status) -> String {
    let code = code_name(status.code());
    if status.message().is_empty() {
        code.to_string()
    } else {
        format!("{}: {}", code, status.message())
    }
}
