//! Error types shared by the loaders and the configuration layer.

use thiserror::Error;

/// Failure while talking to the GitHub API.
///
/// Loaders never propagate this past their boundary; it is logged and turned
/// into a fallback projection.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The configured API base cannot carry path segments.
    #[error("cannot build request url from `{0}`")]
    InvalidUrl(String),

    /// Connection, TLS or body transfer failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status, including rate limiting.
    #[error("GitHub API error ({status}): {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The body was not the JSON shape we expected.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Invalid configuration value.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid API base url `{value}`: {source}")]
    InvalidApiBase {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported API base scheme `{0}`, expected http or https")]
    UnsupportedScheme(String),

    #[error("GitHub username must not be empty")]
    EmptyUsername,

    #[error("repository limit must be between 1 and 6, got `{0}`")]
    RepoLimit(String),

    #[error("invalid link `{0}`, expected `Label=url`")]
    InvalidLink(String),
}
