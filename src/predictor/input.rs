use crate::core::FeatureSchema;
use crate::predictor::PredictError;
use crate::preprocessing::FeatureStatistics;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use strum_macros::{Display, EnumIter, EnumMessage, EnumString, IntoStaticStr};

/// One value of a feature map as it arrives from a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Number(f64),
    Text(String),
    Null,
    Other(Value),
}

impl FeatureValue {
    /// Finite numeric reading of the value, if it has one.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            FeatureValue::Number(n) => *n,
            FeatureValue::Text(s) => s.trim().parse::<f64>().ok()?,
            FeatureValue::Null | FeatureValue::Other(_) => return None,
        };
        n.is_finite().then_some(n)
    }

    /// Null or whitespace-only text; such a value does not claim its key.
    pub fn is_blank(&self) -> bool {
        match self {
            FeatureValue::Null => true,
            FeatureValue::Text(s) => s.trim().is_empty(),
            FeatureValue::Number(_) | FeatureValue::Other(_) => false,
        }
    }
}

impl From<f64> for FeatureValue {
    fn from(v: f64) -> Self {
        FeatureValue::Number(v)
    }
}

impl From<&str> for FeatureValue {
    fn from(v: &str) -> Self {
        FeatureValue::Text(v.to_string())
    }
}

/// Prediction input: a loosely named, possibly sparse map, or a vector in
/// schema order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureInput {
    Map(HashMap<String, FeatureValue>),
    Vector(Vec<f64>),
}

impl FeatureInput {
    pub fn map<K, V, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FeatureValue>,
    {
        FeatureInput::Map(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Accepts a JSON object (feature map) or a JSON array of numbers.
    pub fn from_json(payload: &str) -> Result<Self, PredictError> {
        let value: Value = serde_json::from_str(payload)
            .map_err(|e| PredictError::MalformedPayload(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, PredictError> {
        match value {
            Value::Object(_) => serde_json::from_value(value)
                .map(FeatureInput::Map)
                .map_err(|e| PredictError::MalformedPayload(e.to_string())),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    item.as_f64().ok_or_else(|| {
                        PredictError::MalformedPayload(format!("vector entry {i} is not a number"))
                    })
                })
                .collect::<Result<Vec<f64>, _>>()
                .map(FeatureInput::Vector),
            other => Err(PredictError::MalformedPayload(format!(
                "expected an object or an array, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// How a vector whose length differs from the schema is completed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
    EnumIter,
    EnumString,
    Display,
    IntoStaticStr,
    EnumMessage,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum VectorFillPolicy {
    #[default]
    #[strum(message = "Pad short vectors with zeros, truncate long ones")]
    PadZero,
    #[strum(message = "Pad short vectors with training means, truncate long ones")]
    PadMean,
    #[strum(message = "Refuse vectors of the wrong length")]
    Reject,
}

/// Builds the complete raw feature row, in schema order, for `input`.
///
/// Map keys resolve through the schema aliases, skipping blank values;
/// absent and unparseable values take the feature's fill value. Vectors follow `fill`.
pub fn resolve_features(
    input: &FeatureInput,
    schema: &FeatureSchema,
    statistics: &FeatureStatistics,
    fill: VectorFillPolicy,
) -> Result<Vec<f64>, PredictError> {
    let fill_values = statistics.fill_values();
    match input {
        FeatureInput::Map(map) => Ok(schema
            .resolve(map, FeatureValue::is_blank)
            .into_iter()
            .zip(schema.names())
            .zip(fill_values)
            .map(|((value, name), &default)| match value.map(|v| (v, v.as_number())) {
                Some((_, Some(n))) => n,
                Some((raw, None)) => {
                    log::debug!("'{name}': unusable value {raw:?}, using {default}");
                    default
                }
                None => default,
            })
            .collect()),
        FeatureInput::Vector(values) => {
            let expected = schema.len();
            if values.len() == expected {
                return Ok(values.clone());
            }
            match fill {
                VectorFillPolicy::Reject => Err(PredictError::FeatureCount {
                    found: values.len(),
                    expected,
                }),
                VectorFillPolicy::PadZero | VectorFillPolicy::PadMean => {
                    let mut row: Vec<f64> = values.iter().copied().take(expected).collect();
                    for j in row.len()..expected {
                        row.push(if fill == VectorFillPolicy::PadMean {
                            fill_values[j]
                        } else {
                            0.0
                        });
                    }
                    Ok(row)
                }
            }
        }
    }
}
