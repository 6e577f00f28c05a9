#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SuggestionOrigin {
  DirectMatch,
  PredictedCompletion,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Suggestion {
  pub(crate) completion: Option<String>,
  pub(crate) display_text: String,
  pub(crate) origin: SuggestionOrigin,
}

impl Suggestion {
  pub(crate) fn direct_match(title: String) -> Self {
    Self {
      completion: None,
      display_text: title,
      origin: SuggestionOrigin::DirectMatch,
    }
  }

  pub(crate) fn predicted_completion(query: &str, completion: String) -> Self {
    Self {
      completion: Some(completion),
      display_text: query.to_string(),
      origin: SuggestionOrigin::PredictedCompletion,
    }
  }

  /// The query text this suggestion stands for once picked.
  pub(crate) fn resolved_text(&self) -> String {
    match &self.completion {
      Some(completion) => format!("{}{completion}", self.display_text),
      None => self.display_text.clone(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn direct_match_resolves_to_title() {
    let suggestion = Suggestion::direct_match("Dune Messiah".to_string());

    assert_eq!(suggestion.resolved_text(), "Dune Messiah");
    assert_eq!(suggestion.origin, SuggestionOrigin::DirectMatch);
  }

  #[test]
  fn predicted_completion_appends_continuation_verbatim() {
    let suggestion =
      Suggestion::predicted_completion("dune", " Frank Herbert".to_string());

    assert_eq!(suggestion.display_text, "dune");
    assert_eq!(suggestion.resolved_text(), "dune Frank Herbert");
  }
}
