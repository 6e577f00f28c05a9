use super::*;

#[derive(Debug, Deserialize)]
pub(crate) struct RecommendResponse {
  #[serde(default)]
  pub(crate) results: Option<Vec<Book>>,
}
