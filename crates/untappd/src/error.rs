use std::fmt;
use std::time::Duration;

use reqwest::header::InvalidHeaderValue;
use serde::Deserialize;

use crate::client::ResponseMeta;
use crate::decode::ResponseDuration;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by the Untappd client
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no client ID")]
    NoClientId,

    #[error("no client secret")]
    NoClientSecret,

    #[error("no access token")]
    NoAccessToken,

    #[error("invalid user agent: {0}")]
    UserAgent(#[from] InvalidHeaderValue),

    /// The transport failed; the cause is passed through untouched
    #[error(transparent)]
    Transport(#[from] anyhow::Error),

    #[error("expected application/json content type, but received {received:?}")]
    ContentType {
        received: String,
        response: Box<ResponseMeta>,
    },

    /// The API answered with a non-2xx status and an error envelope
    #[error("{error}")]
    Api {
        error: ApiError,
        response: Box<ResponseMeta>,
    },

    #[error("failed to decode response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        response: Box<ResponseMeta>,
    },
}

impl Error {
    /// Returns the response metadata, for errors raised after a response arrived
    pub fn response(&self) -> Option<&ResponseMeta> {
        match self {
            Self::ContentType { response, .. }
            | Self::Api { response, .. }
            | Self::Decode { response, .. } => Some(response),
            _ => None,
        }
    }

    /// Returns the API error envelope, if the server sent one
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Returns true if the API reported an invalid or expired credential
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { error, .. } if error.code == 401)
    }
}

/// Error metadata reported by the Untappd API
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiError {
    pub code: i64,
    pub detail: String,
    pub error_type: String,
    pub developer_friendly: String,
    pub duration: Duration,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let details = if self.developer_friendly.is_empty() {
            &self.detail
        } else {
            &self.developer_friendly
        };
        write!(f, "{} [{}]: {}", self.code, self.error_type, details)
    }
}

impl std::error::Error for ApiError {}

/// Error envelope sent with non-2xx responses
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ErrorEnvelope {
    meta: RawMeta,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawMeta {
    code: i64,
    error_detail: String,
    error_type: String,
    developer_friendly: String,
    response_time: ResponseDuration,
}

impl From<ErrorEnvelope> for ApiError {
    fn from(envelope: ErrorEnvelope) -> Self {
        let meta = envelope.meta;
        Self {
            code: meta.code,
            detail: meta.error_detail,
            error_type: meta.error_type,
            developer_friendly: meta.developer_friendly,
            duration: meta.response_time.into(),
        }
    }
}
