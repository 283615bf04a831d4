//! Validated tool arguments with typed accessors.

use serde_json::{Map, Value};

use crate::schema::{json_type_name, ParamType};
use crate::types::SchemaError;

/// Arguments that have passed schema validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments(Map<String, Value>);

impl Arguments {
    pub(crate) fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name).filter(|v| !v.is_null())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn number(&self, name: &str) -> Result<f64, SchemaError> {
        let value = self.require(name)?;
        value
            .as_f64()
            .ok_or_else(|| mismatch(name, ParamType::Number, value))
    }

    pub fn string(&self, name: &str) -> Result<&str, SchemaError> {
        let value = self.require(name)?;
        value
            .as_str()
            .ok_or_else(|| mismatch(name, ParamType::String, value))
    }

    pub fn opt_string(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    fn require(&self, name: &str) -> Result<&Value, SchemaError> {
        self.get(name)
            .ok_or_else(|| SchemaError::MissingArgument(name.to_string()))
    }
}

fn mismatch(name: &str, expected: ParamType, value: &Value) -> SchemaError {
    SchemaError::TypeMismatch {
        name: name.to_string(),
        expected: expected.as_str(),
        found: json_type_name(value),
    }
}
