use std::fmt;

use crate::status::Code;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An error returned from the Google Cloud service.
    #[error(transparent)]
    Response(#[from] ErrorResponse),

    /// An error from the underlying HTTP client.
    #[error(transparent)]
    HttpClient(#[from] reqwest::Error),

    /// An error from one of the middleware used.
    #[error(transparent)]
    HttpMiddleware(anyhow::Error),

    /// An error from a token source.
    #[error("token source failed: {0}")]
    TokenSource(Box<dyn std::error::Error + Send + Sync>),

    /// A response body that could not be decoded.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The call was cancelled by the caller.
    #[error("operation was cancelled")]
    Cancelled,

    /// The request could not be built from the given arguments.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A successful response that lacks something the protocol requires.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// A resumable upload chunk was malformed or the server reported an unexpected range.
    #[error(transparent)]
    Chunk(#[from] crate::upload::ChunkError),
}

impl From<reqwest_middleware::Error> for Error {
    fn from(error: reqwest_middleware::Error) -> Self {
        match error {
            reqwest_middleware::Error::Middleware(err) => Error::HttpMiddleware(err),
            reqwest_middleware::Error::Reqwest(err) => Error::HttpClient(err),
        }
    }
}

impl Error {
    /// Canonical code of this error.
    pub fn code(&self) -> Code {
        match self {
            Error::Response(e) => e.kind(),
            Error::HttpClient(e) => match e.status() {
                Some(status) => Code::from_http_status(status.as_u16()),
                None if e.is_timeout() => Code::DeadlineExceeded,
                None if e.is_connect() => Code::Unavailable,
                None => Code::Unknown,
            },
            Error::HttpMiddleware(_) => Code::Unknown,
            Error::Json(_) => Code::Internal,
            Error::TokenSource(_) => Code::Unauthenticated,
            Error::Cancelled => Code::Cancelled,
            Error::InvalidArgument(_) => Code::InvalidArgument,
            Error::UnexpectedResponse(_) => Code::Internal,
            Error::Chunk(crate::upload::ChunkError::InvalidRangeHeader(_)) => Code::Internal,
            Error::Chunk(crate::upload::ChunkError::NoProgress(_)) => Code::Aborted,
            Error::Chunk(_) => Code::InvalidArgument,
        }
    }

    /// HTTP status code reported by the service, if any.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Error::Response(e) => Some(e.code),
            Error::HttpClient(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.code() == Code::NotFound
    }
}

/// An error response returned from a Google Cloud JSON API.
///
/// See [`Errors`](https://cloud.google.com/apis/design/errors#http_mapping) for the format.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// An HTTP status value, without the textual description.
    ///
    /// Example values include: `400` (Bad Request), `401` (Unauthorized), and `404` (Not Found).
    pub code: u16,

    /// Description of the error. Same as `errors.message`.
    pub message: String,

    /// Canonical status name such as `NOT_FOUND`. Storage and BigQuery usually omit it.
    #[serde(default)]
    pub status: Option<String>,

    /// A container for the error details.
    #[serde(default)]
    pub errors: Vec<ErrorResponseItem>,

    /// Structured `google.rpc` details, kept as raw JSON.
    #[serde(default)]
    pub details: Vec<serde_json::Value>,
}

impl ErrorResponse {
    /// Canonical code derived from `status` and `code`.
    pub fn kind(&self) -> Code {
        Code::from_response(self.code, self.status.as_deref())
    }

    /// Returns `true` if the error is retriable according to the
    /// [GCS documentation](https://cloud.google.com/storage/docs/retry-strategy#retryable).
    pub fn is_retriable(&self) -> bool {
        matches!(self.code, 408 | 429 | 500..=599)
    }

    /// Reasons of every contained error item.
    pub fn reasons(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.reason.as_str())
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.message.fmt(f)
    }
}

impl std::error::Error for ErrorResponse {}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponseItem {
    /// The scope of the error. Example values include: `global` and `push`.
    #[serde(default)]
    pub domain: String,

    /// The specific item that caused the error, e.g. the parameter name.
    pub location: Option<String>,

    /// Example values include `header` and `parameter`.
    pub location_type: Option<String>,

    /// Description of the error.
    #[serde(default)]
    pub message: String,

    /// Example values include `invalid`, `rateLimitExceeded`, and `backendError`.
    #[serde(default)]
    pub reason: String,
}

impl fmt::Display for ErrorResponseItem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.message.fmt(f)
    }
}

/// The JSON error format wraps the error in an extra object level.
#[derive(serde::Deserialize)]
pub(crate) struct ErrorWrapper {
    pub(crate) error: ErrorResponse,
}

#[cfg(test)]
mod test {
    use crate::error::{Error, ErrorWrapper};
    use crate::status::Code;

    #[test]
    fn test_parse_storage_error() {
        let body = r#"{"error":{"code":404,"message":"No such object: b/o","errors":[{"message":"No such object: b/o","domain":"global","reason":"notFound"}]}}"#;
        let wrapper: ErrorWrapper = serde_json::from_str(body).unwrap();
        let err = Error::Response(wrapper.error);
        assert_eq!(err.code(), Code::NotFound);
        assert!(err.is_not_found());
        assert_eq!(err.http_status(), Some(404));
        assert_eq!(err.to_string(), "No such object: b/o");
    }

    #[test]
    fn test_parse_status_error() {
        let body = r#"{"error":{"code":409,"message":"exists","status":"ALREADY_EXISTS","details":[{"@type":"type.googleapis.com/google.rpc.ErrorInfo"}]}}"#;
        let wrapper: ErrorWrapper = serde_json::from_str(body).unwrap();
        assert_eq!(wrapper.error.kind(), Code::AlreadyExists);
        assert!(wrapper.error.errors.is_empty());
        assert_eq!(wrapper.error.details.len(), 1);
        assert!(!wrapper.error.is_retriable());
    }
}
