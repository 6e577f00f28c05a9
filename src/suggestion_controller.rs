use super::*;

/// Responses apply only to the latest request, and only while the query is
/// still the one that was sent.
pub(crate) struct SuggestionController {
  debouncer: Debouncer,
  fetching: bool,
  highlighted: Option<usize>,
  next_request_id: u64,
  open: bool,
  pending: Option<PendingAutocomplete>,
  query: String,
  suggestions: SuggestionList,
}

impl Default for SuggestionController {
  fn default() -> Self {
    Self::new(AUTOCOMPLETE_DEBOUNCE)
  }
}

impl SuggestionController {
  fn clear_suggestions(&mut self) {
    self.suggestions = SuggestionList::default();
    self.highlighted = None;
    self.open = false;
  }

  pub(crate) fn dismiss(&mut self) {
    self.open = false;
    self.highlighted = None;
  }

  pub(crate) fn focus(&mut self) {
    if !self.suggestions.is_empty() {
      self.open = true;
    }
  }

  pub(crate) fn handle_autocomplete(
    &mut self,
    request_id: u64,
    result: Result<AutocompleteResponse, ClientError>,
  ) {
    let Some(pending) = self.pending.as_ref() else {
      debug!(request_id, "ignoring autocomplete response with no request");
      return;
    };

    if pending.request_id != request_id {
      debug!(
        request_id,
        latest = pending.request_id,
        "discarding stale autocomplete response"
      );
      return;
    }

    let Some(pending) = self.pending.take() else {
      return;
    };

    self.fetching = false;

    if pending.query != self.query {
      debug!(
        request_id,
        "discarding autocomplete response for outdated query"
      );
      return;
    }

    let response = match result {
      Ok(response) => response,
      Err(ClientError::UnexpectedFormat(error)) => {
        debug!(request_id, %error, "malformed autocomplete response");
        AutocompleteResponse::default()
      }
      Err(error) => {
        warn!(request_id, %error, "autocomplete request failed");
        return;
      }
    };

    self.suggestions = SuggestionList::build(&pending.query, response);
    self.highlighted = None;
    self.open = !self.suggestions.is_empty();
  }

  pub(crate) fn highlighted(&self) -> Option<usize> {
    self.highlighted
  }

  pub(crate) fn is_fetching(&self) -> bool {
    self.fetching
  }

  pub(crate) fn is_open(&self) -> bool {
    self.open
  }

  pub(crate) fn new(delay: Duration) -> Self {
    Self {
      debouncer: Debouncer::new(delay),
      fetching: false,
      highlighted: None,
      next_request_id: 0,
      open: false,
      pending: None,
      query: String::new(),
      suggestions: SuggestionList::default(),
    }
  }

  pub(crate) fn pick_highlighted(&mut self) -> Option<String> {
    if !self.open {
      return None;
    }

    self.highlighted.and_then(|index| self.pick_index(index))
  }

  pub(crate) fn pick_index(&mut self, index: usize) -> Option<String> {
    let suggestion = self.suggestions.get(index)?.clone();

    Some(self.pick_suggestion(&suggestion))
  }

  /// Drops the list, the debounce and any outstanding fetch.
  pub(crate) fn pick_suggestion(&mut self, suggestion: &Suggestion) -> String {
    let resolved = suggestion.resolved_text();

    self.query.clone_from(&resolved);
    self.debouncer.cancel();
    self.pending = None;
    self.fetching = false;
    self.clear_suggestions();

    resolved
  }

  pub(crate) fn query(&self) -> &str {
    &self.query
  }

  pub(crate) fn select_next(&mut self) {
    if !self.open || self.suggestions.is_empty() {
      return;
    }

    let last = self.suggestions.len().saturating_sub(1);

    self.highlighted = Some(match self.highlighted {
      None => 0,
      Some(index) => index.saturating_add(1).min(last),
    });
  }

  pub(crate) fn select_previous(&mut self) {
    if !self.open {
      return;
    }

    self.highlighted = match self.highlighted {
      None | Some(0) => None,
      Some(index) => Some(index - 1),
    };
  }

  pub(crate) fn set_query(&mut self, text: impl Into<String>, now: Instant) {
    self.query = text.into();
    self.highlighted = None;

    if self.debouncer.is_pending() {
      debug!("restarting autocomplete debounce");
    }

    self.debouncer.schedule(now);
  }

  pub(crate) fn submit_query(&mut self) -> Option<String> {
    if self.query.trim().is_empty() {
      return None;
    }

    self.dismiss();

    Some(self.query.clone())
  }

  pub(crate) fn suggestions(&self) -> &[Suggestion] {
    self.suggestions.items()
  }

  pub(crate) fn tick(&mut self, now: Instant) -> Option<Effect> {
    if !self.debouncer.fire(now) {
      return None;
    }

    if self.query.trim().chars().count() < MIN_AUTOCOMPLETE_CHARS {
      debug!("query too short for autocomplete");
      self.pending = None;
      self.fetching = false;
      self.clear_suggestions();
      return None;
    }

    let request_id = self.next_request_id;

    self.next_request_id = self.next_request_id.wrapping_add(1);

    self.pending = Some(PendingAutocomplete {
      query: self.query.clone(),
      request_id,
    });

    self.fetching = true;

    debug!(request_id, query = %self.query, "fetching suggestions");

    Some(Effect::FetchSuggestions {
      query: self.query.clone(),
      request_id,
    })
  }

  pub(crate) fn time_until_fire(&self, now: Instant) -> Option<Duration> {
    self.debouncer.time_until_fire(now)
  }
}

#[cfg(test)]
mod tests {
  use {super::*, proptest::prelude::*};

  const DELAY: Duration = AUTOCOMPLETE_DEBOUNCE;

  fn dune_response() -> AutocompleteResponse {
    AutocompleteResponse {
      matches: Some(vec!["Dune".to_string(), "Dune Messiah".to_string()]),
      prediction: Some(" Frank Herbert".to_string()),
    }
  }

  fn fetch(effect: Option<Effect>) -> (String, u64) {
    match effect {
      Some(Effect::FetchSuggestions { query, request_id }) => {
        (query, request_id)
      }
      other => panic!("expected suggestion fetch, got {other:?}"),
    }
  }

  fn gateway_error() -> ClientError {
    ClientError::Status {
      detail: None,
      status: reqwest::StatusCode::GATEWAY_TIMEOUT,
    }
  }

  #[test]
  fn fetch_waits_for_debounce() {
    let start = Instant::now();
    let mut controller = SuggestionController::default();

    controller.set_query("dune", start);

    assert_eq!(controller.tick(start + Duration::from_millis(299)), None);
    assert!(!controller.is_fetching());

    let (query, _) = fetch(controller.tick(start + DELAY));

    assert_eq!(query, "dune");
    assert!(controller.is_fetching());
    assert_eq!(controller.tick(start + DELAY * 2), None);
  }

  #[test]
  fn rapid_typing_coalesces_into_one_fetch() {
    let start = Instant::now();
    let mut controller = SuggestionController::default();

    let mut now = start;
    let mut effects = Vec::new();

    for text in ["d", "du", "dun", "dune"] {
      controller.set_query(text, now);
      now += Duration::from_millis(100);
      effects.extend(controller.tick(now));
    }

    effects.extend(controller.tick(now + DELAY));

    assert_eq!(
      effects,
      vec![Effect::FetchSuggestions {
        query: "dune".to_string(),
        request_id: 0,
      }]
    );
  }

  #[test]
  fn dune_scenario_builds_expected_list() {
    let start = Instant::now();
    let mut controller = SuggestionController::default();

    controller.set_query("dune", start);

    let (_, request_id) = fetch(controller.tick(start + DELAY));

    controller.handle_autocomplete(request_id, Ok(dune_response()));

    assert!(controller.is_open());
    assert!(!controller.is_fetching());
    assert_eq!(
      controller.suggestions(),
      &[
        Suggestion::direct_match("Dune".to_string()),
        Suggestion::direct_match("Dune Messiah".to_string()),
        Suggestion::predicted_completion("dune", " Frank Herbert".to_string()),
      ]
    );
  }

  #[test]
  fn short_query_clears_and_closes_without_fetch() {
    let start = Instant::now();
    let mut controller = SuggestionController::default();

    controller.set_query("dune", start);
    let (_, request_id) = fetch(controller.tick(start + DELAY));
    controller.handle_autocomplete(request_id, Ok(dune_response()));
    assert!(controller.is_open());

    let later = start + DELAY * 2;
    controller.set_query(" d ", later);

    assert_eq!(controller.tick(later + DELAY), None);
    assert!(!controller.is_open());
    assert!(controller.suggestions().is_empty());
  }

  #[test]
  fn response_for_changed_query_is_discarded() {
    let start = Instant::now();
    let mut controller = SuggestionController::default();

    controller.set_query("dun", start);
    let (_, request_id) = fetch(controller.tick(start + DELAY));

    controller.set_query("dune", start + DELAY + Duration::from_millis(10));
    controller.handle_autocomplete(request_id, Ok(dune_response()));

    assert!(!controller.is_open());
    assert!(controller.suggestions().is_empty());
    assert!(!controller.is_fetching());
  }

  #[test]
  fn superseded_request_is_ignored() {
    let start = Instant::now();
    let mut controller = SuggestionController::default();

    controller.set_query("dun", start);
    let (_, first) = fetch(controller.tick(start + DELAY));

    controller.set_query("dune", start + DELAY);
    let (_, second) = fetch(controller.tick(start + DELAY * 2));

    controller.handle_autocomplete(
      second,
      Ok(AutocompleteResponse {
        matches: Some(vec!["Dune".to_string()]),
        prediction: None,
      }),
    );

    controller.handle_autocomplete(first, Ok(dune_response()));

    assert_eq!(
      controller.suggestions(),
      &[Suggestion::direct_match("Dune".to_string())]
    );
  }

  #[test]
  fn stale_response_does_not_clear_fetching_flag() {
    let start = Instant::now();
    let mut controller = SuggestionController::default();

    controller.set_query("dun", start);
    let (_, first) = fetch(controller.tick(start + DELAY));

    controller.set_query("dune", start + DELAY);
    fetch(controller.tick(start + DELAY * 2));

    controller.handle_autocomplete(first, Ok(dune_response()));

    assert!(controller.is_fetching());
  }

  #[test]
  fn transport_failure_keeps_previous_state() {
    let start = Instant::now();
    let mut controller = SuggestionController::default();

    controller.set_query("dune", start);
    let (_, request_id) = fetch(controller.tick(start + DELAY));
    controller.handle_autocomplete(request_id, Ok(dune_response()));
    controller.dismiss();

    controller.set_query("dune", start + DELAY);
    let (_, request_id) = fetch(controller.tick(start + DELAY * 2));
    controller.handle_autocomplete(request_id, Err(gateway_error()));

    assert!(!controller.is_open());
    assert!(!controller.is_fetching());
    assert_eq!(controller.suggestions().len(), 3);
  }

  #[test]
  fn malformed_response_means_no_matches() {
    let start = Instant::now();
    let mut controller = SuggestionController::default();

    controller.set_query("dune", start);
    let (_, request_id) = fetch(controller.tick(start + DELAY));
    controller.handle_autocomplete(request_id, Ok(dune_response()));

    controller.set_query("dunes", start + DELAY);
    let (_, request_id) = fetch(controller.tick(start + DELAY * 2));

    let error = serde_json::from_str::<AutocompleteResponse>("42")
      .expect_err("number is not an autocomplete response");

    controller.handle_autocomplete(
      request_id,
      Err(ClientError::UnexpectedFormat(error)),
    );

    assert!(controller.suggestions().is_empty());
    assert!(!controller.is_open());
  }

  #[test]
  fn empty_result_keeps_dropdown_closed() {
    let start = Instant::now();
    let mut controller = SuggestionController::default();

    controller.set_query("zzzz", start);
    let (_, request_id) = fetch(controller.tick(start + DELAY));

    controller
      .handle_autocomplete(request_id, Ok(AutocompleteResponse::default()));

    assert!(!controller.is_open());
  }

  #[test]
  fn dismiss_keeps_query_and_focus_reopens() {
    let start = Instant::now();
    let mut controller = SuggestionController::default();

    controller.set_query("dune", start);
    let (_, request_id) = fetch(controller.tick(start + DELAY));
    controller.handle_autocomplete(request_id, Ok(dune_response()));

    controller.dismiss();

    assert!(!controller.is_open());
    assert_eq!(controller.query(), "dune");

    controller.focus();

    assert!(controller.is_open());
  }

  #[test]
  fn picking_prediction_resolves_full_text() {
    let start = Instant::now();
    let mut controller = SuggestionController::default();

    controller.set_query("dune", start);
    let (_, request_id) = fetch(controller.tick(start + DELAY));
    controller.handle_autocomplete(request_id, Ok(dune_response()));

    let resolved = controller.pick_index(2);

    assert_eq!(resolved.as_deref(), Some("dune Frank Herbert"));
    assert_eq!(controller.query(), "dune Frank Herbert");
    assert!(!controller.is_open());
    assert_eq!(controller.tick(start + DELAY * 3), None);
  }

  #[test]
  fn pick_drops_in_flight_fetch() {
    let start = Instant::now();
    let mut controller = SuggestionController::default();

    controller.set_query("dune", start);
    let (_, request_id) = fetch(controller.tick(start + DELAY));
    controller.handle_autocomplete(request_id, Ok(dune_response()));

    controller.set_query("dune m", start + DELAY);
    let (_, request_id) = fetch(controller.tick(start + DELAY * 2));

    controller.pick_suggestion(&Suggestion::direct_match(
      "Dune Messiah".to_string(),
    ));

    controller.handle_autocomplete(request_id, Ok(dune_response()));

    assert!(!controller.is_open());
    assert!(controller.suggestions().is_empty());
  }

  #[test]
  fn keyboard_highlight_is_clamped() {
    let start = Instant::now();
    let mut controller = SuggestionController::default();

    controller.set_query("dune", start);
    let (_, request_id) = fetch(controller.tick(start + DELAY));
    controller.handle_autocomplete(request_id, Ok(dune_response()));

    assert_eq!(controller.highlighted(), None);

    for _ in 0..5 {
      controller.select_next();
    }

    assert_eq!(controller.highlighted(), Some(2));

    controller.select_previous();
    controller.select_previous();
    controller.select_previous();

    assert_eq!(controller.highlighted(), None);

    controller.select_next();
    controller.select_next();

    assert_eq!(controller.pick_highlighted().as_deref(), Some("Dune Messiah"));
  }

  #[test]
  fn submit_query_skips_blank_input() {
    let start = Instant::now();
    let mut controller = SuggestionController::default();

    controller.set_query("   ", start);
    assert_eq!(controller.submit_query(), None);

    controller.set_query("space opera", start);
    assert_eq!(controller.submit_query().as_deref(), Some("space opera"));
  }

  proptest! {
    #[test]
    fn short_queries_never_fetch(query in " {0,3}[a-z]? {0,3}") {
      let start = Instant::now();
      let mut controller = SuggestionController::default();

      controller.set_query(query, start);

      prop_assert_eq!(controller.tick(start + DELAY), None);
      prop_assert!(!controller.is_fetching());
    }

    #[test]
    fn bursts_within_window_fetch_last_query_once(
      queries in proptest::collection::vec("[a-z]{2,8}", 1..10),
      gaps in proptest::collection::vec(0u64..300, 10),
    ) {
      let start = Instant::now();
      let mut controller = SuggestionController::default();

      let mut now = start;
      let mut effects = Vec::new();

      for (query, gap) in queries.iter().zip(&gaps) {
        controller.set_query(query.as_str(), now);
        effects.extend(controller.tick(now));
        now += Duration::from_millis(*gap);
      }

      effects.extend(controller.tick(now + DELAY));

      prop_assert_eq!(
        effects,
        vec![Effect::FetchSuggestions {
          query: queries.last().cloned().unwrap_or_default(),
          request_id: 0,
        }]
      );
    }
  }
}
