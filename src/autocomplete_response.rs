use super::*;

#[derive(Debug, Default, Deserialize, PartialEq)]
pub(crate) struct AutocompleteResponse {
  #[serde(default)]
  pub(crate) matches: Option<Vec<String>>,
  #[serde(default)]
  pub(crate) prediction: Option<String>,
}
