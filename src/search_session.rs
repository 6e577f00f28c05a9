use super::*;

pub(crate) struct SearchSession {
  has_searched: bool,
  next_request_id: u64,
  pending: Option<PendingSearch>,
  state: SessionState,
}

impl SearchSession {
  /// Returns false for a stale response, which leaves the session untouched.
  pub(crate) fn handle_recommendations(
    &mut self,
    request_id: u64,
    result: Result<RecommendResponse, ClientError>,
  ) -> bool {
    let Some(pending) = self.pending.as_ref() else {
      debug!(request_id, "ignoring recommendations with no request");
      return false;
    };

    if pending.request_id != request_id {
      debug!(
        request_id,
        latest = pending.request_id,
        "discarding stale recommendations"
      );
      return false;
    }

    let Some(pending) = self.pending.take() else {
      return false;
    };

    self.state = match result {
      Ok(RecommendResponse {
        results: Some(books),
      }) => {
        info!(
          request_id,
          query = %pending.query,
          count = books.len(),
          "recommendations ready"
        );
        SessionState::Ready(ResultList::new(books))
      }
      Ok(RecommendResponse { results: None }) => {
        warn!(request_id, "recommendation response has no results field");
        SessionState::Error(UNEXPECTED_FORMAT_MESSAGE.into())
      }
      Err(ClientError::UnexpectedFormat(error)) => {
        warn!(request_id, %error, "malformed recommendation response");
        SessionState::Error(UNEXPECTED_FORMAT_MESSAGE.into())
      }
      Err(error) => {
        warn!(request_id, %error, "recommendation request failed");
        SessionState::Error(
          error
            .detail()
            .map_or_else(|| FETCH_FAILED_MESSAGE.into(), str::to_string),
        )
      }
    };

    true
  }

  pub(crate) fn has_searched(&self) -> bool {
    self.has_searched
  }

  pub(crate) fn is_loading(&self) -> bool {
    matches!(self.state, SessionState::Loading)
  }

  pub(crate) fn new() -> Self {
    Self {
      has_searched: false,
      next_request_id: 0,
      pending: None,
      state: SessionState::Idle,
    }
  }

  pub(crate) fn results_mut(&mut self) -> Option<&mut ResultList> {
    match &mut self.state {
      SessionState::Ready(results) => Some(results),
      _ => None,
    }
  }

  pub(crate) fn state(&self) -> &SessionState {
    &self.state
  }

  pub(crate) fn submit(&mut self, query: &str) -> Option<Effect> {
    if query.trim().is_empty() {
      return None;
    }

    let request_id = self.next_request_id;

    self.next_request_id = self.next_request_id.wrapping_add(1);

    self.pending = Some(PendingSearch {
      query: query.to_string(),
      request_id,
    });

    self.has_searched = true;
    self.state = SessionState::Loading;

    info!(request_id, query, "submitting search");

    Some(Effect::FetchRecommendations {
      query: query.to_string(),
      request_id,
    })
  }

  pub(crate) fn view(&self) -> SessionView<'_> {
    SessionView::from(self.state())
  }
}
