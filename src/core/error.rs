use reqwest::StatusCode;
use thiserror::Error;

/// Failures the widget distinguishes between. Everything except
/// `TargetNotFound` is contained at the mount boundary and rendered as an
/// in-place error panel.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("failed to load {url}: {status}")]
    Fetch { url: String, status: StatusCode },

    #[error("request to {url} could not complete")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected response body from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no data available in history")]
    NoData,

    #[error("render target not found: {0}")]
    TargetNotFound(String),
}
