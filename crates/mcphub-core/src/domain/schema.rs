//! Best-effort parsing of tool input schemas into parameter descriptors.

use std::collections::HashSet;

use serde_json::Value;

use super::tool::ToolParameter;

/// Convert a JSON-schema-like object into an ordered list of parameters.
///
/// Reads `properties` and `required`. Type and description are copied
/// verbatim when present, `default` is preserved opaquely, and non-string
/// `enum` entries are dropped while keeping the order of the rest.
///
/// A schema that is not an object, or one without `properties`, yields an
/// empty list; malformed schemas are never an error.
pub fn parse_parameters(schema: Option<&Value>) -> Vec<ToolParameter> {
    let Some(schema) = schema.and_then(Value::as_object) else {
        return Vec::new();
    };
    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return Vec::new();
    };

    let required: HashSet<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    properties
        .iter()
        .filter_map(|(name, property)| {
            // Properties that are not objects carry nothing to describe.
            let property = property.as_object()?;

            let enum_values = property
                .get("enum")
                .and_then(Value::as_array)
                .map(|values| {
                    values
                        .iter()
                        .filter_map(Value::as_str)
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default();

            Some(ToolParameter {
                name: name.clone(),
                type_name: property
                    .get("type")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                description: property
                    .get("description")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                required: required.contains(name.as_str()),
                default: property.get("default").cloned(),
                enum_values,
            })
        })
        .collect()
}
