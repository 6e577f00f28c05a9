use super::*;

/// What the results area should show. `Idle` precedes the first search;
/// `Empty` is a completed search that matched no books.
#[derive(Debug, PartialEq)]
pub(crate) enum SessionView<'a> {
  Empty,
  Error(&'a str),
  Idle,
  Loading,
  Results(&'a ResultList),
}

impl<'a> From<&'a SessionState> for SessionView<'a> {
  fn from(state: &'a SessionState) -> Self {
    match state {
      SessionState::Error(message) => Self::Error(message),
      SessionState::Idle => Self::Idle,
      SessionState::Loading => Self::Loading,
      SessionState::Ready(results) if results.is_empty() => Self::Empty,
      SessionState::Ready(results) => Self::Results(results),
    }
  }
}
