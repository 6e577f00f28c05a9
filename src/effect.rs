#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Effect {
  FetchRecommendations { query: String, request_id: u64 },
  FetchSuggestions { query: String, request_id: u64 },
}
