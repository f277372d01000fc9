//! Errors returned by every call into the Todoist API.
use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single client operation.
///
/// Nothing is retried internally: every request is attempted exactly once and errors surface
/// to the caller as-is.
#[derive(Debug, Error)]
pub enum Error {
    /// The arguments were rejected locally, before any request was sent.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The API answered with a non-2xx status.
    #[error("Bad response from API: {status} - {body}")]
    Http {
        /// Status code of the response.
        status: StatusCode,
        /// Raw response body.
        body: String,
    },

    /// The request never produced a response (timeout, refused connection, DNS, ...).
    #[error("unable to send request: {0}")]
    Transport(#[from] reqwest_middleware::Error),

    /// The response (or a payload) was not the JSON shape that was expected.
    #[error("unable to parse API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// An endpoint URL could not be built.
    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    /// The gateway was used after [`crate::api::rest::Gateway::close`].
    #[error("gateway is closed")]
    Closed,

    /// The blocking gateway could not start its runtime.
    #[error("unable to start runtime: {0}")]
    Runtime(#[source] std::io::Error),

    /// Configuration could not be read.
    #[error("unable to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    /// No API token was found in any configuration source.
    #[error("no API token configured, set TODOIST_TOKEN or add `token` to the config file")]
    MissingToken,
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.into())
    }
}

impl Error {
    /// Status code of the response if the API answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Http { status, .. } => Some(*status),
            Error::Transport(reqwest_middleware::Error::Reqwest(err)) => err.status(),
            _ => None,
        }
    }

    /// True if the request was sent (or attempted) and failed, either on the network or with a
    /// non-2xx status.
    pub fn is_request_failure(&self) -> bool {
        matches!(self, Error::Http { .. } | Error::Transport(_))
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// A well-formed response that doesn't have the shape the endpoint documents.
    pub(crate) fn unexpected_response(msg: &str) -> Self {
        Error::Decode(<serde_json::Error as serde::de::Error>::custom(msg))
    }
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
