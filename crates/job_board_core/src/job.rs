use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One posting as delivered by the job feed.
///
/// Every field is optional on the wire. Values of an unexpected JSON type
/// are stringified when that is meaningful (numbers, booleans) and dropped
/// otherwise, so a single odd record never poisons the whole feed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct JobRecord {
    #[serde(deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(deserialize_with = "lenient_text")]
    pub location: String,
    #[serde(deserialize_with = "lenient_text")]
    pub job_type: String,
    #[serde(deserialize_with = "lenient_optional_text")]
    pub pay: Option<String>,
    #[serde(deserialize_with = "lenient_optional_text")]
    pub date_posted: Option<String>,
    #[serde(deserialize_with = "lenient_optional_text")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient_optional_text")]
    pub company: Option<String>,
    #[serde(deserialize_with = "lenient_summary")]
    pub summary: Option<Summary>,
}

impl JobRecord {
    pub fn identity(&self) -> JobIdentity {
        JobIdentity {
            title: self.title.clone(),
            company: self.company.clone().unwrap_or_default(),
        }
    }

    /// Builds a record from an arbitrary JSON value. Non-objects yield `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value).ok()
    }
}

/// Free-form job description in any of the shapes the feed uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Summary {
    Text(String),
    List(Vec<String>),
    /// Key/value pairs in source order.
    Map(Vec<(String, String)>),
}

impl Summary {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(Summary::Text(text)),
            Value::Array(items) => Some(Summary::List(
                items.into_iter().map(stringify_item).collect(),
            )),
            Value::Object(map) => Some(Summary::Map(
                map.into_iter()
                    .map(|(key, value)| (key, stringify_item(value)))
                    .collect(),
            )),
            Value::Null | Value::Bool(_) | Value::Number(_) => None,
        }
    }
}

/// Stable identity used to keep selection and expansion attached to a job
/// across re-filtering and re-sorting.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct JobIdentity {
    pub title: String,
    pub company: String,
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn stringify_item(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
        other => scalar_text(other).unwrap_or_default(),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_text(value).unwrap_or_default())
}

fn lenient_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_text(value))
}

fn lenient_summary<'de, D>(deserializer: D) -> Result<Option<Summary>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Summary::from_value(value))
}
