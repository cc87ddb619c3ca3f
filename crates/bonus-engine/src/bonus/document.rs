//! Persisted bonus sheet documents.
//!
//! Stored sheets come from several generations of the editor, so the loader
//! reads a lenient raw shape first and hands it to the [`Sanitizer`] to get
//! a [`BonusState`] the engine can compute over.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use super::domain::{BonusState, EmployeeId};
use super::sanitize::Sanitizer;

/// Failure to read or write a bonus sheet document.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("bonus sheet document is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("unable to serialize bonus sheet: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBonusState {
    #[serde(default, deserialize_with = "lenient")]
    pub settings: Option<RawSettings>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub employees: Vec<RawEmployee>,
    #[serde(default, deserialize_with = "lenient_map")]
    pub pillars_by_dept: BTreeMap<String, RawPillarSet>,
    #[serde(default, deserialize_with = "lenient_map")]
    pub emp_goal_overrides: BTreeMap<String, RawPillarSet>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSettings {
    #[serde(default, deserialize_with = "lenient_number")]
    pub base_months: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub cap_pct: Option<f64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Employee ids were written both as strings and as numbers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Integer(i64),
    Text(String),
}

impl From<RawId> for EmployeeId {
    fn from(value: RawId) -> Self {
        match value {
            RawId::Integer(id) => EmployeeId(id.to_string()),
            RawId::Text(id) => EmployeeId(id.trim().to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEmployee {
    pub id: RawId,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub dept: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub salary: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub base_months: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub factors: Option<RawFactors>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFactors {
    #[serde(default, deserialize_with = "lenient_number")]
    pub tenure: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub size: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub office: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPillarSet {
    #[serde(default, deserialize_with = "lenient")]
    pub fin: Option<RawPillar>,
    #[serde(default, deserialize_with = "lenient")]
    pub ops: Option<RawPillar>,
    #[serde(default, deserialize_with = "lenient")]
    pub ind: Option<RawPillar>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPillar {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub weight: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub enabled: Option<bool>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub goals: Vec<RawGoal>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGoal {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub w: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub a: Option<f64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

// Older editors wrote `null` for empty lists, numbers as strings and the odd
// value of the wrong type. The helpers below read such fields as absent (or
// skip the offending entry) instead of failing the whole document.

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(from_value_or_warn))
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) if text.trim().is_empty() => None,
        Some(Value::String(text)) => match text.trim().replace(',', ".").parse::<f64>() {
            Ok(number) => Some(number),
            Err(_) => {
                warn!(value = %text, "ignoring non-numeric value");
                None
            }
        },
        Some(other) => {
            warn!(value = %other, "ignoring non-numeric value");
            None
        }
    };
    Ok(number)
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let entries = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.into_iter().filter_map(from_value_or_warn).collect(),
        Some(other) => {
            warn!(value = %other, "expected a list, treating as empty");
            Vec::new()
        }
    };
    Ok(entries)
}

fn lenient_map<'de, D, T>(deserializer: D) -> Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let entries = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => BTreeMap::new(),
        Some(Value::Object(fields)) => fields
            .into_iter()
            .filter_map(|(key, value)| from_value_or_warn(value).map(|entry| (key, entry)))
            .collect(),
        Some(other) => {
            warn!(value = %other, "expected an object, treating as empty");
            BTreeMap::new()
        }
    };
    Ok(entries)
}

fn from_value_or_warn<T: DeserializeOwned>(value: Value) -> Option<T> {
    if value.is_null() {
        return None;
    }
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            warn!(error = %err, "skipping unreadable entry");
            None
        }
    }
}

/// Parse a persisted document and sanitize it with `sanitizer`.
pub fn load_document(raw: &str, sanitizer: &Sanitizer) -> Result<BonusState, StateError> {
    let document: RawBonusState = serde_json::from_str(raw).map_err(StateError::Parse)?;
    Ok(sanitizer.sanitize_raw(document))
}

/// Render a state in the persisted document shape.
pub fn save_document(state: &BonusState) -> Result<String, StateError> {
    serde_json::to_string_pretty(state).map_err(StateError::Serialize)
}

impl BonusState {
    /// Load with the default sanitizer (unknown departments fall back to `RL`).
    pub fn from_json(raw: &str) -> Result<Self, StateError> {
        load_document(raw, &Sanitizer::default())
    }

    pub fn to_json_pretty(&self) -> Result<String, StateError> {
        save_document(self)
    }
}
