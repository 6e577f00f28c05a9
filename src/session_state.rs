use super::*;

#[derive(Debug, PartialEq)]
pub(crate) enum SessionState {
  Error(String),
  Idle,
  Loading,
  Ready(ResultList),
}
