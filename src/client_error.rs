use super::*;

#[derive(Debug, thiserror::Error)]
pub(crate) enum ClientError {
  #[error("backend responded with {status}")]
  Status {
    detail: Option<String>,
    status: reqwest::StatusCode,
  },
  #[error("request failed: {0}")]
  Transport(#[from] reqwest::Error),
  #[error("unexpected response format: {0}")]
  UnexpectedFormat(#[from] serde_json::Error),
}

impl ClientError {
  /// Message supplied by the backend in a `{"detail": "..."}` error body.
  pub(crate) fn detail(&self) -> Option<&str> {
    match self {
      Self::Status { detail, .. } => detail.as_deref(),
      Self::Transport(_) | Self::UnexpectedFormat(_) => None,
    }
  }
}
