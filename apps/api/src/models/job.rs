//! Job description input. Decoding is lenient: a malformed field degrades to its
//! default instead of rejecting the request, so scoring falls back to the neutral
//! sub-score for that factor.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Structured requirements for an open position. Immutable for a screening run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDescription {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub company: String,
    #[serde(
        default,
        alias = "required_skills",
        deserialize_with = "lenient_string_list"
    )]
    pub requirements: Vec<String>,
    #[serde(
        default,
        alias = "preferred_skills",
        deserialize_with = "lenient_string_list"
    )]
    pub preferred_skills: Vec<String>,
    /// Required years of experience. 0 means no requirement.
    #[serde(
        default,
        alias = "required_experience",
        deserialize_with = "lenient_years"
    )]
    pub experience: u32,

    // Informational only; not used by scoring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl JobDescription {
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Accepts `["a", "b"]` or `"a, b"`. Blank and non-string items are dropped.
fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(string_list_from_value(&value))
}

fn string_list_from_value(value: &Value) -> Vec<String> {
    let items: Vec<&str> = match value {
        Value::Array(arr) => arr.iter().filter_map(|v| v.as_str()).collect(),
        Value::String(s) => s.split(',').collect(),
        _ => Vec::new(),
    };
    items
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Accepts an integer, a float (truncated) or a numeric string. Anything else,
/// including negatives, decodes as 0 ("no requirement").
fn lenient_years<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(years_from_value(&value))
}

fn years_from_value(value: &Value) -> u32 {
    let raw = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match raw {
        Some(v) if v.is_finite() && v > 0.0 => v.min(u32::MAX as f64) as u32,
        _ => 0,
    }
}
