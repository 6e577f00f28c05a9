use super::*;

fn unexpected(value: &Value) -> Unexpected<'_> {
  match value {
    Value::Null => Unexpected::Unit,
    Value::Bool(b) => Unexpected::Bool(*b),
    Value::Number(_) => Unexpected::Other("number"),
    Value::String(s) => Unexpected::Str(s),
    Value::Array(_) => Unexpected::Seq,
    Value::Object(_) => Unexpected::Map,
  }
}

pub(crate) fn deserialize_optional_string<'de, D>(
  deserializer: D,
) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<Value>::deserialize(deserializer)?;

  match value {
    None | Some(Value::Null) => Ok(None),
    Some(Value::String(s)) => Ok(Some(s)),
    Some(Value::Number(n)) => Ok(Some(n.to_string())),
    Some(other) => Err(de::Error::invalid_type(
      unexpected(&other),
      &"string or number",
    )),
  }
}

/// Years arrive as integers, integral floats (`1965.0`), numeric strings, or
/// null depending on how the backend's catalogue was loaded.
pub(crate) fn deserialize_optional_year<'de, D>(
  deserializer: D,
) -> Result<Option<i32>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<Value>::deserialize(deserializer)?;

  match value {
    None | Some(Value::Null) => Ok(None),
    Some(Value::Number(n)) => {
      if let Some(year) = n.as_i64() {
        return i32::try_from(year).map(Some).map_err(|_| {
          de::Error::invalid_value(Unexpected::Signed(year), &"a year")
        });
      }

      match n.as_f64() {
        Some(year)
          if year.fract().abs() < f64::EPSILON
            && (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&year) =>
        {
          #[allow(clippy::cast_possible_truncation)]
          let year = year as i32;
          Ok(Some(year))
        }
        Some(year) => {
          Err(de::Error::invalid_value(Unexpected::Float(year), &"a year"))
        }
        None => Err(de::Error::invalid_type(
          Unexpected::Other("number"),
          &"a year",
        )),
      }
    }
    Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
    Some(Value::String(s)) => s
      .trim()
      .parse::<i32>()
      .map(Some)
      .map_err(|_| de::Error::invalid_value(Unexpected::Str(&s), &"a year")),
    Some(other) => {
      Err(de::Error::invalid_type(unexpected(&other), &"integer year"))
    }
  }
}

pub(crate) fn deserialize_string_or_default<'de, D>(
  deserializer: D,
) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  deserialize_optional_string(deserializer).map(Option::unwrap_or_default)
}

pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
  if text.chars().count() <= max_chars {
    return text.to_string();
  }

  let mut result = String::new();

  for (idx, ch) in text.chars().enumerate() {
    if idx >= max_chars {
      result.push_str("...");
      break;
    }

    result.push(ch);
  }

  result.trim_end().to_string()
}

#[cfg(test)]
mod tests {
  use {super::*, serde::Deserialize};

  #[derive(Deserialize, Debug, PartialEq)]
  struct OptionalWrapper {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    value: Option<String>,
  }

  #[derive(Deserialize, Debug, PartialEq)]
  struct YearWrapper {
    #[serde(default, deserialize_with = "deserialize_optional_year")]
    year: Option<i32>,
  }

  fn parse_value(input: &str) -> Result<Option<String>, serde_json::Error> {
    serde_json::from_str::<OptionalWrapper>(input).map(|wrapper| wrapper.value)
  }

  fn parse_year(input: &str) -> Result<Option<i32>, serde_json::Error> {
    serde_json::from_str::<YearWrapper>(input).map(|wrapper| wrapper.year)
  }

  #[test]
  fn truncate_returns_original_when_within_limit() {
    assert_eq!(truncate("short", 10), "short");
  }

  #[test]
  fn truncate_appends_ellipsis_when_exceeding_limit() {
    assert_eq!(truncate("This is a longer line", 4), "This...");
  }

  #[test]
  fn truncate_preserves_exact_length_strings() {
    assert_eq!(truncate("exact", 5), "exact");
  }

  #[test]
  fn deserialize_optional_string_supports_string_numbers_and_null() {
    assert_eq!(
      parse_value(r#"{"value": "hello"}"#).unwrap(),
      Some("hello".to_string())
    );

    assert_eq!(
      parse_value(r#"{"value": 42}"#).unwrap(),
      Some("42".to_string())
    );

    assert_eq!(parse_value(r#"{"value": null}"#).unwrap(), None);
    assert_eq!(parse_value("{}").unwrap(), None);

    assert!(
      parse_value(r#"{"value": true}"#).is_err(),
      "bools should fail deserialization"
    );
  }

  #[test]
  fn deserialize_optional_year_accepts_integral_values() {
    assert_eq!(parse_year(r#"{"year": 1965}"#).unwrap(), Some(1965));
    assert_eq!(parse_year(r#"{"year": 1965.0}"#).unwrap(), Some(1965));
    assert_eq!(parse_year(r#"{"year": " 2001 "}"#).unwrap(), Some(2001));
  }

  #[test]
  fn deserialize_optional_year_maps_missing_values_to_none() {
    assert_eq!(parse_year(r#"{"year": null}"#).unwrap(), None);
    assert_eq!(parse_year(r#"{"year": ""}"#).unwrap(), None);
    assert_eq!(parse_year("{}").unwrap(), None);
  }

  #[test]
  fn deserialize_optional_year_rejects_fractional_and_non_numeric_values() {
    assert!(parse_year(r#"{"year": 1965.5}"#).is_err());
    assert!(parse_year(r#"{"year": "soon"}"#).is_err());
    assert!(parse_year(r#"{"year": [1965]}"#).is_err());
  }
}
