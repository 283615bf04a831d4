//! Input schema model and argument validation.
//!
//! Schemas are a closed subset of JSON Schema: an object with named
//! properties of a primitive type, optional string enums and defaults, and a
//! list of required property names. The wire form is
//! `{"type":"object","properties":{...},"required":[...]}`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::arguments::Arguments;
use crate::types::SchemaError;

/// Primitive type of a single tool argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Number,
    Integer,
    String,
    Boolean,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::Number => "number",
            ParamType::Integer => "integer",
            ParamType::String => "string",
            ParamType::Boolean => "boolean",
        }
    }

    /// Whether `value` conforms to this type. Strings are never coerced.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            ParamType::Number => value.is_number(),
            ParamType::Integer => {
                value.is_i64()
                    || value.is_u64()
                    || value
                        .as_f64()
                        .is_some_and(|f| f.is_finite() && f.fract() == 0.0)
            }
            ParamType::String => value.is_string(),
            ParamType::Boolean => value.is_boolean(),
        }
    }
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON type name of a value, for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Declaration of a single property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    #[serde(rename = "type")]
    pub kind: ParamType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl ParamSpec {
    pub fn of(kind: ParamType) -> Self {
        Self {
            kind,
            description: None,
            allowed: None,
            default: None,
        }
    }

    pub fn number() -> Self {
        Self::of(ParamType::Number)
    }

    pub fn string() -> Self {
        Self::of(ParamType::String)
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Restrict a string property to a fixed set of values.
    pub fn one_of(mut self, values: &[&str]) -> Self {
        self.allowed = Some(values.iter().map(|v| v.to_string()).collect());
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    fn check(&self, name: &str, value: &Value) -> Result<(), SchemaError> {
        // Literals such as 1e400 parse but have no finite f64 value.
        if value.is_number() && value.as_f64().is_none() {
            return Err(SchemaError::OutOfRange(name.to_string()));
        }

        if !self.kind.accepts(value) {
            return Err(SchemaError::TypeMismatch {
                name: name.to_string(),
                expected: self.kind.as_str(),
                found: json_type_name(value),
            });
        }

        if let (Some(allowed), Some(s)) = (&self.allowed, value.as_str()) {
            if !allowed.iter().any(|a| a == s) {
                return Err(SchemaError::NotAllowed {
                    name: name.to_string(),
                    value: s.to_string(),
                    allowed: allowed.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Object schema describing a tool's arguments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSchema", into = "RawSchema")]
pub struct InputSchema {
    properties: BTreeMap<String, ParamSpec>,
    required: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct RawSchema {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    properties: BTreeMap<String, ParamSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    required: Vec<String>,
}

impl TryFrom<RawSchema> for InputSchema {
    type Error = SchemaError;

    fn try_from(raw: RawSchema) -> Result<Self, Self::Error> {
        if raw.kind != "object" {
            return Err(SchemaError::Malformed(format!(
                "input schema type must be \"object\", got \"{}\"",
                raw.kind
            )));
        }

        if let Some(missing) = raw
            .required
            .iter()
            .find(|name| !raw.properties.contains_key(*name))
        {
            return Err(SchemaError::Malformed(format!(
                "required property `{missing}` is not declared"
            )));
        }

        Ok(Self {
            properties: raw.properties,
            required: raw.required,
        })
    }
}

impl From<InputSchema> for RawSchema {
    fn from(schema: InputSchema) -> Self {
        Self {
            kind: "object".to_string(),
            properties: schema.properties,
            required: schema.required,
        }
    }
}

impl InputSchema {
    /// An object schema with no properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a property that callers must supply.
    pub fn required(mut self, name: &str, spec: ParamSpec) -> Self {
        self.properties.insert(name.to_string(), spec);
        if !self.required.iter().any(|r| r == name) {
            self.required.push(name.to_string());
        }
        self
    }

    /// Declare a property that callers may omit.
    pub fn optional(mut self, name: &str, spec: ParamSpec) -> Self {
        self.properties.insert(name.to_string(), spec);
        self
    }

    /// Validate raw call arguments and produce typed [`Arguments`].
    ///
    /// Absent or `null` arguments are treated as an empty object. Required
    /// properties must be present and non-null, declared properties must
    /// match their type, and defaults fill omitted optional properties.
    /// Undeclared properties pass through untouched.
    pub fn validate(&self, arguments: Option<&Value>) -> Result<Arguments, SchemaError> {
        let mut map = match arguments {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map.clone(),
            Some(other) => return Err(SchemaError::NotAnObject(json_type_name(other))),
        };

        for name in &self.required {
            if map.get(name).map_or(true, Value::is_null) {
                return Err(SchemaError::MissingArgument(name.clone()));
            }
        }

        for (name, spec) in &self.properties {
            match map.get(name) {
                Some(Value::Null) | None => {
                    if let Some(default) = &spec.default {
                        map.insert(name.clone(), default.clone());
                    }
                }
                Some(value) => spec.check(name, value)?,
            }
        }

        Ok(Arguments::from_map(map))
    }
}
