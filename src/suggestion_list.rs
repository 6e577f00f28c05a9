use super::*;

/// Display-ready suggestions: at most three direct matches in backend order,
/// followed by at most one predicted completion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct SuggestionList {
  items: Vec<Suggestion>,
}

impl SuggestionList {
  pub(crate) const CAPACITY: usize = MAX_DIRECT_MATCHES + 1;

  pub(crate) fn build(query: &str, response: AutocompleteResponse) -> Self {
    let mut items = response
      .matches
      .unwrap_or_default()
      .into_iter()
      .take(MAX_DIRECT_MATCHES)
      .map(Suggestion::direct_match)
      .collect::<Vec<_>>();

    if let Some(prediction) = response
      .prediction
      .filter(|prediction| !prediction.is_empty())
    {
      let predicted = Suggestion::predicted_completion(query, prediction);

      let full_text = predicted.resolved_text();

      if items.iter().all(|item| item.display_text != full_text) {
        items.push(predicted);
      }
    }

    debug_assert!(items.len() <= Self::CAPACITY);

    Self { items }
  }

  pub(crate) fn get(&self, index: usize) -> Option<&Suggestion> {
    self.items.get(index)
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub(crate) fn items(&self) -> &[Suggestion] {
    &self.items
  }

  pub(crate) fn len(&self) -> usize {
    self.items.len()
  }
}
