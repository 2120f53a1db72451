use reqwest::StatusCode;

/// Why a single backend query produced no data.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("HTTP transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("backend returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("invalid JSON response: {0}")]
    Decode(#[source] reqwest::Error),
}
