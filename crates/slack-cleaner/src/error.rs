use reqwest::StatusCode;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: Option<StatusCode>,
    pub message: Option<String>,
    pub body: Option<Value>,
}

impl ApiError {
    pub fn new(status: Option<StatusCode>, body: Option<Value>, message: Option<String>) -> Self {
        Self {
            status,
            message,
            body,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(msg) = &self.message {
            return write!(f, "{msg}");
        }
        if let Some(body) = &self.body {
            return write!(f, "{body}");
        }
        write!(f, "unknown error")
    }
}

#[derive(Debug, Error)]
pub enum HttpApiError {
    #[error("400 Bad Request: {0}")]
    BadRequest(ApiError),
    #[error("401 Authentication Error: {0}")]
    Authentication(ApiError),
    #[error("403 Permission Denied: {0}")]
    PermissionDenied(ApiError),
    #[error("404 Not Found: {0}")]
    NotFound(ApiError),
    #[error("429 Rate Limit: {0}")]
    RateLimit(ApiError),
    #[error("5xx Internal Server Error: {0}")]
    InternalServer(ApiError),
    #[error("API Error: {0}")]
    Other(ApiError),
}

impl HttpApiError {
    pub fn from_status(status: Option<StatusCode>, err: ApiError) -> Self {
        match status.map(|s| s.as_u16()) {
            Some(400) => Self::BadRequest(err),
            Some(401) => Self::Authentication(err),
            Some(403) => Self::PermissionDenied(err),
            Some(404) => Self::NotFound(err),
            Some(429) => Self::RateLimit(err),
            Some(s) if s >= 500 => Self::InternalServer(err),
            _ => Self::Other(err),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Slack API token is required; pass it with --token")]
    MissingCredential,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to list files (page {page}): {source}")]
    Listing {
        page: u32,
        #[source]
        source: Box<Error>,
    },

    #[error("failed to delete file {file_id} after {deleted} successful deletion(s): {source}")]
    Deletion {
        file_id: String,
        deleted: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("malformed file record at index {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    #[error("malformed paging: {0}")]
    MalformedPaging(String),

    #[error(transparent)]
    Http(#[from] HttpApiError),

    #[error("Slack API error: {0}")]
    Api(ApiError),

    #[error("request timed out")]
    Timeout,

    #[error(transparent)]
    InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Url(#[from] url::ParseError),
}
