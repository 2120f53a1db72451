use serde_json::Value;
use tracing::error;

use crate::error::QueryError;

/// Whether the backend could be reached at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCause {
    /// Connection, timeout or other transport failure.
    Unreachable,
    /// The backend answered, but with an error status or an unreadable body.
    Rejected,
}

impl From<&QueryError> for FailureCause {
    fn from(e: &QueryError) -> Self {
        match e {
            QueryError::Transport(_) => FailureCause::Unreachable,
            QueryError::Status { .. } | QueryError::Decode(_) => FailureCause::Rejected,
        }
    }
}

/// Result of one backend query. Failures are carried as data so that a
/// run keeps going with whatever else it can gather.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Data(Value),
    Unavailable { reason: String, cause: FailureCause },
}

impl QueryOutcome {
    pub fn data(&self) -> Option<&Value> {
        match self {
            QueryOutcome::Data(v) => Some(v),
            QueryOutcome::Unavailable { .. } => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, QueryOutcome::Unavailable { .. })
    }

    pub(crate) fn from_result(result: Result<Value, QueryError>) -> Self {
        match result {
            Ok(v) => QueryOutcome::Data(v),
            Err(e) => QueryOutcome::Unavailable {
                cause: FailureCause::from(&e),
                reason: e.to_string(),
            },
        }
    }

    /// Same as [`QueryOutcome::from_result`], logging the failure.
    pub(crate) fn from_result_logged(service: &str, result: Result<Value, QueryError>) -> Self {
        if let Err(e) = &result {
            error!("Error querying {}: {}", service, e);
        }
        Self::from_result(result)
    }
}

pub(crate) async fn get_json(
    client: &reqwest::Client,
    url: &str,
    params: &[(&str, String)],
) -> Result<Value, QueryError> {
    let res = client
        .get(url)
        .query(params)
        .send()
        .await
        .map_err(QueryError::Transport)?;
    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(QueryError::Status { status, body });
    }
    res.json::<Value>().await.map_err(QueryError::Decode)
}
