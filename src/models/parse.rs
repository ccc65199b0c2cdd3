use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// A numeric field as it arrives from storage: a bare number, or a string
/// that may carry a unit suffix ("1.5%", "2RR", "$120"), or nothing at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

impl Default for RawNumber {
    fn default() -> Self {
        RawNumber::Text(String::new())
    }
}

impl From<f64> for RawNumber {
    fn from(n: f64) -> Self {
        RawNumber::Number(n)
    }
}

impl From<&str> for RawNumber {
    fn from(s: &str) -> Self {
        RawNumber::Text(s.to_string())
    }
}

impl RawNumber {
    /// Extract the numeric value. Unparsable or empty input is 0.
    pub fn value(&self) -> f64 {
        match self {
            RawNumber::Number(n) => *n,
            RawNumber::Text(s) => parse_loose(s),
        }
    }
}

/// Keep the signed-decimal characters and parse what remains.
pub fn parse_loose(s: &str) -> f64 {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse().unwrap_or(0.0)
}

/// Deserialize a classification field, mapping null, empty or unrecognized
/// values to `None` instead of failing the whole record.
pub fn lenient_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Deserialize an id list that may arrive as a JSON array, a JSON-encoded
/// string, or garbage. Anything unusable is an empty list.
pub fn lenient_id_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(id_list_from_value(&value))
}

fn id_list_from_value(value: &serde_json::Value) -> Vec<String> {
    match value {
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        serde_json::Value::String(s) => serde_json::from_str::<serde_json::Value>(s)
            .map(|inner| id_list_from_value(&inner))
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}
