//! YAML parsing utilities using yaml-rust2
//!
//! Manifests are parsed with yaml-rust2, converted to serde_json::Value and then
//! deserialized into typed resources, so serde_json stays the single source of
//! truth for field naming.

use serde_json::{Map, Number, Value};
use yaml_rust2::{Yaml, YamlLoader};

use crate::crd::{Installation, InstallationSpec};
use crate::Error;

/// Error type for YAML parsing
#[derive(Debug, Clone)]
pub struct YamlError(String);

impl YamlError {
    pub(crate) fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

impl std::fmt::Display for YamlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for YamlError {}

/// Parse a YAML string into a serde_json::Value.
///
/// For multi-document YAML, returns only the first document.
/// Returns `Value::Null` for empty input.
pub fn parse_yaml(input: &str) -> Result<Value, YamlError> {
    let docs = YamlLoader::load_from_str(input).map_err(|e| YamlError::new(e.to_string()))?;
    match docs.into_iter().next() {
        Some(doc) => yaml_to_json(doc),
        None => Ok(Value::Null),
    }
}

/// Parse an `Installation` manifest (apiVersion, kind, metadata, spec)
pub fn parse_installation(input: &str) -> crate::Result<Installation> {
    let mut value = parse_yaml(input)?;
    if value.is_null() {
        return Err(Error::serialization_for("Installation", "empty document"));
    }
    if let Some(spec) = value.get_mut("spec") {
        stringify_resource_quantities(spec);
    }
    serde_json::from_value(value)
        .map_err(|e| Error::serialization_for("Installation", e.to_string()))
}

/// Parse a bare `InstallationSpec` document (the contents of `.spec`)
///
/// An empty document yields an empty spec.
pub fn parse_installation_spec(input: &str) -> crate::Result<InstallationSpec> {
    match parse_yaml(input)? {
        Value::Null => Ok(InstallationSpec::default()),
        mut value => {
            stringify_resource_quantities(&mut value);
            serde_json::from_value(value)
                .map_err(|e| Error::serialization_for("InstallationSpec", e.to_string()))
        }
    }
}

/// Component keys under `spec.components` that carry `resources`
const RESOURCE_COMPONENTS: [&str; 4] = ["node", "kubeControllers", "cni", "kubeProxy"];

/// Rewrite bare numeric resource quantities (`cpu: 1`, `cpu: 0.5`) as strings.
///
/// The API server accepts both forms, but `Quantity` only deserializes from a
/// string.
fn stringify_resource_quantities(spec: &mut Value) {
    let Some(components) = spec.get_mut("components").and_then(Value::as_object_mut) else {
        return;
    };
    for component in RESOURCE_COMPONENTS {
        let Some(resources) = components
            .get_mut(component)
            .and_then(|c| c.get_mut("resources"))
        else {
            continue;
        };
        for list in ["requests", "limits"] {
            let Some(quantities) = resources.get_mut(list).and_then(Value::as_object_mut) else {
                continue;
            };
            for quantity in quantities.values_mut() {
                let text = match quantity {
                    Value::Number(n) => n.to_string(),
                    _ => continue,
                };
                *quantity = Value::String(text);
            }
        }
    }
}

/// Convert a yaml_rust2::Yaml value to serde_json::Value
fn yaml_to_json(yaml: Yaml) -> Result<Value, YamlError> {
    match yaml {
        Yaml::Null => Ok(Value::Null),
        Yaml::Boolean(b) => Ok(Value::Bool(b)),
        Yaml::Integer(i) => Ok(Value::Number(i.into())),
        Yaml::Real(s) => {
            let f: f64 = s
                .parse()
                .map_err(|e: std::num::ParseFloatError| YamlError::new(e.to_string()))?;
            Ok(Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or(Value::Null))
        }
        Yaml::String(s) => Ok(Value::String(s)),
        Yaml::Array(arr) => arr
            .into_iter()
            .map(yaml_to_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Yaml::Hash(map) => map
            .into_iter()
            .map(|(k, v)| {
                let key = match k {
                    Yaml::String(s) => s,
                    Yaml::Integer(i) => i.to_string(),
                    Yaml::Boolean(b) => b.to_string(),
                    _ => return Err(YamlError::new("unsupported YAML key type")),
                };
                yaml_to_json(v).map(|v| (key, v))
            })
            .collect::<Result<Map<String, Value>, _>>()
            .map(Value::Object),
        Yaml::Alias(_) => Err(YamlError::new("YAML aliases not supported")),
        Yaml::BadValue => Err(YamlError::new("bad YAML value")),
    }
}
