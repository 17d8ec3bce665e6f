//! Input schema extraction
//!
//! Turns one OpenAPI operation into the flat JSON-schema object a tool
//! advertises: path/query parameters and the JSON request body are merged
//! into a single `{type, properties, required}` triple.
//!
//! Extraction is lenient. Absent or malformed fields degrade to empty
//! defaults and a `$ref` pointing nowhere resolves to an empty schema. The
//! one hard failure is a `$ref` chain that loops back on itself.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Longest `$ref` chain followed before it is treated as a cycle
pub const MAX_REF_DEPTH: usize = 32;

/// The only media type whose body schema becomes tool input
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Errors raised while resolving schema references
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error("cyclic $ref chain: {}", chain.join(" -> "))]
    CyclicReference { chain: Vec<String> },
}

/// Flat JSON-schema object describing a tool's arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
    /// Required argument names in first-seen order, without repeats
    ///
    /// JSON Schema requires unique items here, so a name required both as a
    /// parameter and as a body field appears once.
    #[serde(default)]
    pub required: Vec<String>,
}

impl Default for InputSchema {
    fn default() -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: Map::new(),
            required: Vec::new(),
        }
    }
}

impl InputSchema {
    /// Build from a generated JSON schema (e.g. from `schemars`)
    ///
    /// Generator-only keys (`$schema`, `title`, `additionalProperties`) are
    /// stripped so the result matches what the extractor produces.
    pub fn from_json_schema(schema: &Value) -> Self {
        let cleaned = clean_schema(schema);

        let properties = cleaned
            .get("properties")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        let required = string_list(cleaned.get("required"));

        Self {
            properties,
            required,
            ..Self::default()
        }
    }

    /// Required names that have no matching property
    ///
    /// Non-empty when a request body declared `required` fields but its
    /// schema could not be resolved.
    pub fn dangling_required(&self) -> Vec<&str> {
        self.required
            .iter()
            .filter(|name| !self.properties.contains_key(name.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// Render as a plain JSON value
    pub fn to_value(&self) -> Value {
        json!({
            "type": self.schema_type,
            "properties": self.properties,
            "required": self.required,
        })
    }

    fn push_required(&mut self, name: &str) {
        if !self.required.iter().any(|r| r == name) {
            self.required.push(name.to_string());
        }
    }
}

/// Remove keys that confuse function-calling models
pub fn clean_schema(schema: &Value) -> Value {
    match schema {
        Value::Object(obj) => {
            let mut cleaned = Map::new();
            for (key, value) in obj {
                if key == "$schema" || key == "title" || key == "additionalProperties" {
                    continue;
                }
                cleaned.insert(key.clone(), clean_schema(value));
            }
            Value::Object(cleaned)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(clean_schema).collect()),
        other => other.clone(),
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

// ============================================================================
// Reference resolution
// ============================================================================

/// Resolves same-document `$ref` pointers such as
/// `#/components/schemas/OrderRequest`
#[derive(Debug, Clone, Copy)]
pub struct RefResolver<'a> {
    document: &'a Value,
}

impl<'a> RefResolver<'a> {
    pub fn new(document: &'a Value) -> Self {
        Self { document }
    }

    /// Follow one reference as a JSON pointer; `None` when any segment is
    /// missing
    pub fn lookup(&self, reference: &str) -> Option<&'a Value> {
        self.document.pointer(reference.trim_start_matches('#'))
    }

    /// Follow `$ref` links starting at `node` until a concrete schema
    ///
    /// Returns `Ok(None)` when a link points at a missing path; callers treat
    /// that as an empty schema. A chain that revisits a reference, or runs
    /// past [`MAX_REF_DEPTH`], is an error.
    pub fn resolve(&self, node: &'a Value) -> Result<Option<&'a Value>, SchemaError> {
        let mut current = node;
        let mut chain: Vec<String> = Vec::new();

        while let Some(reference) = current.get("$ref").and_then(Value::as_str) {
            let revisited = chain.iter().any(|seen| seen == reference);
            chain.push(reference.to_string());
            if revisited || chain.len() > MAX_REF_DEPTH {
                return Err(SchemaError::CyclicReference { chain });
            }

            match self.lookup(reference) {
                Some(target) => current = target,
                None => {
                    tracing::debug!("Unresolved $ref {}, using empty schema", reference);
                    return Ok(None);
                }
            }
        }

        Ok(Some(current))
    }
}

// ============================================================================
// Extraction
// ============================================================================

/// Build the tool input schema for one operation object
pub fn extract_input_schema<'a>(
    operation: &'a Value,
    resolver: &RefResolver<'a>,
) -> Result<InputSchema, SchemaError> {
    let mut schema = InputSchema::default();

    let parameters = operation
        .get("parameters")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for param in parameters {
        let Some(param) = resolver.resolve(param)? else {
            continue;
        };
        let Some(name) = param.get("name").and_then(Value::as_str) else {
            tracing::warn!("Skipping parameter without a name: {}", param);
            continue;
        };

        let param_type = match param.get("schema") {
            Some(node) => resolver
                .resolve(node)?
                .and_then(|s| s.get("type"))
                .and_then(Value::as_str)
                .unwrap_or("string"),
            None => "string",
        };
        let description = param
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or("");

        schema.properties.insert(
            name.to_string(),
            json!({
                "type": param_type,
                "description": description,
            }),
        );

        if param.get("required").and_then(Value::as_bool).unwrap_or(false) {
            schema.push_required(name);
        }
    }

    if let Some(body) = operation.get("requestBody") {
        let body_schema = match resolver.resolve(body)? {
            Some(body) => body
                .get("content")
                .and_then(|c| c.get(JSON_CONTENT_TYPE))
                .and_then(|c| c.get("schema")),
            None => None,
        };

        if let Some(node) = body_schema {
            if let Some(resolved) = resolver.resolve(node)? {
                if let Some(props) = resolved.get("properties").and_then(Value::as_object) {
                    for (name, prop) in props {
                        // body fields win over same-named parameters
                        schema.properties.insert(name.clone(), prop.clone());
                    }
                }
                for name in string_list(resolved.get("required")) {
                    schema.push_required(&name);
                }
            }
        }
    }

    Ok(schema)
}
