use super::*;

/// A single recommendation. Books carry no stable identity; their position in
/// the returned list is their rank.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub(crate) struct Book {
  #[serde(default, deserialize_with = "deserialize_string_or_default")]
  pub(crate) authors: String,
  #[serde(default, deserialize_with = "deserialize_optional_string")]
  pub(crate) language: Option<String>,
  #[serde(default, deserialize_with = "deserialize_optional_year")]
  pub(crate) publication_year: Option<i32>,
  #[serde(default)]
  pub(crate) score: Option<f64>,
  pub(crate) title: String,
}

impl Book {
  const MIN_POSITIONAL_STRENGTH: f64 = 0.60;

  const POSITIONAL_STEP: f64 = 0.04;

  const TOP_POSITIONAL_STRENGTH: f64 = 0.98;

  pub(crate) fn authors_label(&self) -> &str {
    let authors = self.authors.trim();

    if authors.is_empty() {
      "Unknown"
    } else {
      authors
    }
  }

  pub(crate) fn details(&self) -> Option<String> {
    let year = self.publication_year.map(|year| format!("Year: {year}"));

    let language = self
      .language
      .as_deref()
      .map(str::trim)
      .filter(|language| !language.is_empty())
      .map(|language| format!("Lang: {}", language.to_uppercase()));

    match (year, language) {
      (Some(year), Some(language)) => Some(format!("{year} • {language}")),
      (Some(detail), None) | (None, Some(detail)) => Some(detail),
      (None, None) => None,
    }
  }

  /// Relative strength of the match in `0.0..=1.0`. A score supplied by the
  /// backend wins; otherwise strength decays with rank.
  pub(crate) fn match_strength(&self, rank: usize) -> f64 {
    if let Some(score) = self.score.filter(|score| score.is_finite()) {
      return score.clamp(0.0, 1.0);
    }

    let rank = u32::try_from(rank).unwrap_or(u32::MAX);

    (Self::TOP_POSITIONAL_STRENGTH - Self::POSITIONAL_STEP * f64::from(rank))
      .max(Self::MIN_POSITIONAL_STRENGTH)
  }

  pub(crate) fn rank_label(rank: usize) -> String {
    format!("#{}", rank.saturating_add(1))
  }
}
