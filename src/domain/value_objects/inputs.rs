//! Inputs value object - the resolved input mapping for a deployment
//!
//! Overrides are read as YAML (which also accepts JSON); the store keeps
//! them as JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{KeelError, KeelResult};

/// Mapping of input names to values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inputs(BTreeMap<String, Value>);

impl Inputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a user supplied override document.
    ///
    /// An empty document (or an explicit `null`) yields an empty mapping;
    /// any other non-mapping document is rejected. Mapping keys must be
    /// strings and numbers must be finite, since the store keeps JSON.
    /// YAML tags are dropped and the tagged value kept.
    pub fn parse_override(content: &str) -> KeelResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::new());
        }
        let document: serde_yaml_ng::Value = serde_yaml_ng::from_str(content)
            .map_err(|e| KeelError::InvalidInputs(e.to_string()))?;
        Self::from_value(yaml_to_json(document)?)
    }

    /// Parse the JSON mapping previously written to the store.
    pub fn from_stored(content: &str) -> KeelResult<Self> {
        let value: Value =
            serde_json::from_str(content).map_err(|e| KeelError::InvalidInputs(e.to_string()))?;
        Self::from_value(value)
    }

    fn from_value(value: Value) -> KeelResult<Self> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::Object(map) => Ok(Self(map.into_iter().collect())),
            other => Err(KeelError::InvalidInputs(format!(
                "expected a mapping of input names to values, found {}",
                kind_name(&other)
            ))),
        }
    }

    pub fn to_value(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.0.insert(name.into(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn yaml_to_json(value: serde_yaml_ng::Value) -> KeelResult<Value> {
    use serde_yaml_ng::Value as Yaml;

    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => yaml_number(&n)?,
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<KeelResult<_>>()?,
        ),
        Yaml::Mapping(map) => {
            let mut object = serde_json::Map::new();
            for (key, value) in map {
                let name = match key {
                    Yaml::String(name) => name,
                    other => {
                        return Err(KeelError::InvalidInputs(format!(
                            "mapping keys must be strings, found {}",
                            kind_name(&yaml_to_json(other)?)
                        )))
                    }
                };
                object.insert(name, yaml_to_json(value)?);
            }
            Value::Object(object)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn yaml_number(n: &serde_yaml_ng::Number) -> KeelResult<Value> {
    if let Some(u) = n.as_u64() {
        return Ok(Value::from(u));
    }
    if let Some(i) = n.as_i64() {
        return Ok(Value::from(i));
    }
    n.as_f64()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| KeelError::InvalidInputs(format!("{} is not a finite number", n)))
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
