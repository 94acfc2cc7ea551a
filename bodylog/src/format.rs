//! Rendering of call payloads for the log stream
//!
//! Payloads either expose a structured encoding through [`Payload::as_structured`]
//! or they don't. Structured payloads are protobuf messages with a descriptor; they
//! are encoded with the proto3 JSON mapping as compact single-line JSON, omitting
//! unpopulated fields. Everything else is handed to the logger as its `Debug` text.
//!
//! ```ignore
//! use bodylog::format::{format_payload, LoggableValue};
//!
//! // generated by tonic-prost-build with `#[derive(prost_reflect::ReflectMessage)]`
//! use pb::GetUserRequest;
//! bodylog::structured_payload!(GetUserRequest);
//!
//! let req = GetUserRequest { user_id: "u1".into() };
//! assert_eq!(
//!     format_payload(&req),
//!     LoggableValue::Structured(r#"{"userId":"u1"}"#.to_string())
//! );
//! ```

use prost_reflect::{DynamicMessage, ReflectMessage, SerializeOptions};
use std::fmt;

use crate::error::Result;

/// Text logged for a body whose fields are not shown
pub const EMPTY_BODY: &str = "{}";

/// A value that travels through the call pipeline and may end up in a log line
pub trait Payload: fmt::Debug + Send + Sync {
    /// Structured view of this payload, if the type has one
    fn as_structured(&self) -> Option<&dyn StructuredMessage> {
        None
    }
}

/// Canonical structured encoding of a schema-based message
pub trait StructuredMessage {
    /// Compact proto3 JSON
    fn to_canonical_json(&self) -> Result<String>;
}

impl<T> StructuredMessage for T
where
    T: ReflectMessage,
{
    fn to_canonical_json(&self) -> Result<String> {
        let mut message = DynamicMessage::new(self.descriptor());
        message.transcode_from(self)?;

        // JSON names, unpopulated fields skipped, 64-bit integers as strings, enum names
        let options = SerializeOptions::new();
        let mut json = Vec::new();
        message.serialize_with_options(&mut serde_json::Serializer::new(&mut json), &options)?;
        Ok(String::from_utf8_lossy(&json).into_owned())
    }
}

impl Payload for () {}

impl Payload for String {}

/// Declare that the listed types log through their structured encoding
///
/// Each type must implement `prost_reflect::ReflectMessage`.
#[macro_export]
macro_rules! structured_payload {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::format::Payload for $ty {
                fn as_structured(&self) -> ::std::option::Option<&dyn $crate::format::StructuredMessage> {
                    ::std::option::Option::Some(self)
                }
            }
        )+
    };
}

/// Declare that the listed types have no structured encoding
#[macro_export]
macro_rules! opaque_payload {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::format::Payload for $ty {}
        )+
    };
}

/// A payload rendered for the log stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggableValue {
    /// Body fields intentionally not shown
    Empty,
    /// Compact single-line JSON
    Structured(String),
    /// Generic textual representation
    Text(String),
}

impl LoggableValue {
    /// The text written to the log
    pub fn as_str(&self) -> &str {
        match self {
            Self::Empty => EMPTY_BODY,
            Self::Structured(s) | Self::Text(s) => s,
        }
    }

    /// Whether this is the fixed empty body
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl fmt::Display for LoggableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render a payload for logging
///
/// Never fails: an encoding error falls back to the `Debug` text.
pub fn format_payload(value: &dyn Payload) -> LoggableValue {
    match value.as_structured().map(|message| message.to_canonical_json()) {
        Some(Ok(json)) => LoggableValue::Structured(json),
        Some(Err(_)) | None => LoggableValue::Text(format!("{value:?}")),
    }
}
