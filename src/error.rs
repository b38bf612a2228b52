//! Normalized error shape shared by message construction and sending.

use std::error::Error as StdError;
use std::fmt;

use serde::Serialize;

use crate::domain::{ApiResponse, ValidationError};

pub(crate) type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
/// Coarse classification attached to every [`SmsError`].
///
/// The string forms (`parameter`, `authorization`, ...) are stable and safe to match on.
pub enum ErrorCause {
    /// Invalid input, detected before anything was sent (or a rejected HTTP request).
    Parameter,
    /// The gateway rejected the credentials (HTTP 401).
    Authorization,
    /// The request could not be sent or the response could not be read.
    Connection,
    /// The gateway answered, but its `statusCode` signals a failure.
    Api,
    /// The gateway answered with something this client cannot interpret.
    Unknown,
}

impl ErrorCause {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Parameter => "parameter",
            Self::Authorization => "authorization",
            Self::Connection => "connection",
            Self::Api => "api",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{cause} error: {message}")]
/// Errors produced by this crate.
///
/// Every error carries a [`ErrorCause`] and a human readable message. Depending on where the
/// failure happened it also preserves:
/// - the parsed gateway response (`cause == Api`),
/// - the underlying transport error (`cause == Connection`),
/// - the individual field errors (construction and setter failures).
///
/// `throw_error` tells whether the error stems from a programming mistake (an invalid
/// message was constructed) rather than a runtime condition. Send-time errors never set it.
pub struct SmsError {
    cause: ErrorCause,
    message: String,
    api_response: Option<Box<ApiResponse>>,
    field_errors: Vec<ValidationError>,
    throw_error: bool,
    #[source]
    source: Option<BoxError>,
}

impl SmsError {
    fn new(cause: ErrorCause, message: impl Into<String>) -> Self {
        Self {
            cause,
            message: message.into(),
            api_response: None,
            field_errors: Vec::new(),
            throw_error: false,
            source: None,
        }
    }

    /// Send-time parameter failure (checked before any I/O).
    pub(crate) fn parameter(message: impl Into<String>) -> Self {
        Self::new(ErrorCause::Parameter, message)
    }

    pub(crate) fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorCause::Authorization, message)
    }

    pub(crate) fn connection(message: impl Into<String>, source: BoxError) -> Self {
        Self {
            source: Some(source),
            ..Self::new(ErrorCause::Connection, message)
        }
    }

    pub(crate) fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorCause::Unknown, message)
    }

    pub(crate) fn api(response: ApiResponse) -> Self {
        let message = format!(
            "API statusCode: {}, statusMessage: {}",
            response.status_code,
            response.status_message.as_deref().unwrap_or("<none>")
        );
        Self {
            api_response: Some(Box::new(response)),
            ..Self::new(ErrorCause::Api, message)
        }
    }

    /// Construction-time failure for one or more invalid fields.
    pub(crate) fn validation(errors: Vec<ValidationError>, throw_error: bool) -> Self {
        let message = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Self {
            field_errors: errors,
            throw_error,
            ..Self::new(ErrorCause::Parameter, message)
        }
    }

    pub fn cause(&self) -> ErrorCause {
        self.cause
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Parsed gateway response, present when `cause == Api`.
    pub fn api_response(&self) -> Option<&ApiResponse> {
        self.api_response.as_deref()
    }

    /// Field errors behind a construction or setter failure.
    pub fn field_errors(&self) -> &[ValidationError] {
        &self.field_errors
    }

    /// `true` when the error marks an invalid message construction.
    pub fn throw_error(&self) -> bool {
        self.throw_error
    }

    /// Consume the error and return the attached gateway response, if any.
    pub fn into_api_response(self) -> Option<ApiResponse> {
        self.api_response.map(|it| *it)
    }
}

impl From<ValidationError> for SmsError {
    fn from(value: ValidationError) -> Self {
        Self::validation(vec![value], true)
    }
}
