//! HTTP error handling with a builder pattern for dynamic error responses.
//!
//! Wire format is a single-field JSON object, `{"error": "..."}`, so clients
//! only ever branch on the status code and display the message.

use std::borrow::Cow;
use std::fmt;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// A specialized [`Result`] type for HTTP handlers.
///
/// [`Result`]: std::result::Result
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The error type for HTTP handlers in the server.
#[must_use = "errors do nothing unless serialized"]
#[derive(Debug, Clone)]
pub struct Error {
    kind: ErrorKind,
    message: Option<Cow<'static, str>>,
}

impl Error {
    /// Creates a new [`Error`] with the specified kind.
    #[inline]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    /// Sets a custom user-facing message for the error.
    #[inline]
    pub fn with_message(self, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: Some(message.into()),
            ..self
        }
    }

    /// Returns the error kind.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the custom message if present.
    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl Default for Error {
    #[inline]
    fn default() -> Self {
        Self::new(ErrorKind::default())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self.message.as_deref().unwrap_or(self.kind.default_message());
        write!(f, "{} ({}): {}", self.kind, self.kind.status_code(), message)
    }
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let message = match self.message {
            Some(message) => message,
            None => Cow::Borrowed(self.kind.default_message()),
        };

        (self.kind.status_code(), Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<ErrorKind> for Error {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<avtomat_core::Error> for Error {
    /// Maps a domain error onto the HTTP taxonomy, keeping its message.
    fn from(error: avtomat_core::Error) -> Self {
        let kind = match error.kind() {
            avtomat_core::ErrorKind::Validation => ErrorKind::BadRequest,
            avtomat_core::ErrorKind::NotFound => ErrorKind::NotFound,
            avtomat_core::ErrorKind::Unauthorized => ErrorKind::Unauthorized,
            avtomat_core::ErrorKind::Conflict => ErrorKind::Conflict,
            avtomat_core::ErrorKind::Storage | avtomat_core::ErrorKind::Internal => {
                ErrorKind::InternalServerError
            }
        };

        match (kind, error.message) {
            // 5xx details stay out of responses, and a not-found message is a
            // resource name rather than user-facing text.
            (ErrorKind::InternalServerError | ErrorKind::NotFound, _) | (_, None) => {
                kind.into_error()
            }
            (kind, Some(message)) => kind.with_message(message),
        }
    }
}

/// The error body serialized on every failed request.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// User-facing error message.
    pub error: Cow<'static, str>,
}

/// Enumeration of all HTTP error kinds the server produces.
#[must_use = "error kinds do nothing unless used to create errors"]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    // 4xx Client Errors
    /// 400 Bad Request - Invalid request data
    BadRequest,
    /// 401 Unauthorized - Missing authentication token
    MissingAuthToken,
    /// 401 Unauthorized - Invalid credentials or token
    Unauthorized,
    /// 404 Not Found - Resource not found
    NotFound,
    /// 409 Conflict - Conflicting resource state
    Conflict,

    // 5xx Server Errors
    /// 500 Internal Server Error - Unexpected server error
    #[default]
    InternalServerError,
}

impl ErrorKind {
    /// Converts this error kind into a full [`Error`].
    #[inline]
    pub fn into_error(self) -> Error {
        Error::new(self)
    }

    /// Creates an [`Error`] with the specified message.
    #[inline]
    pub fn with_message(self, message: impl Into<Cow<'static, str>>) -> Error {
        Error::new(self).with_message(message)
    }

    /// Returns the HTTP status code for this error kind.
    #[inline]
    pub fn status_code(self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::MissingAuthToken | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the message used when no custom one is attached.
    #[inline]
    pub fn default_message(self) -> &'static str {
        match self {
            Self::BadRequest => "Invalid request",
            Self::MissingAuthToken => "Missing token",
            Self::Unauthorized => "Unauthorized",
            Self::NotFound => "Not found",
            Self::Conflict => "Conflict",
            Self::InternalServerError => "Internal server error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BadRequest => "bad_request",
            Self::MissingAuthToken => "missing_auth_token",
            Self::Unauthorized => "unauthorized",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::InternalServerError => "internal_server_error",
        };
        f.write_str(name)
    }
}

impl IntoResponse for ErrorKind {
    #[inline]
    fn into_response(self) -> Response {
        self.into_error().into_response()
    }
}
