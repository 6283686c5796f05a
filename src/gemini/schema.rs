//! Declarative response schemas.
//!
//! A [`Schema`] plays two roles: it is serialised into the service's schema
//! dialect (`responseSchema` in the generation config) so the model knows the
//! expected JSON shape, and it is consulted locally to verify that every
//! declared key is present in the parsed reply.

use serde_json::{Map, Value};

/// Node type of a [`Schema`].
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    String,
    Array(Box<Schema>),
    /// Properties in declared order.
    Object(Vec<(String, Schema)>),
}

/// A JSON shape description.
///
/// # Example
/// ```rust
/// use fluent_flow::gemini::Schema;
///
/// let schema = Schema::object([
///     ("sentences", Schema::array(Schema::string())),
///     ("explanation", Schema::string().describe("How the word is used.")),
/// ]);
/// assert_eq!(schema.required_keys(), vec!["sentences", "explanation"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub kind: SchemaKind,
    pub description: Option<String>,
}

impl Schema {
    pub fn string() -> Self {
        Self {
            kind: SchemaKind::String,
            description: None,
        }
    }

    pub fn array(items: Schema) -> Self {
        Self {
            kind: SchemaKind::Array(Box::new(items)),
            description: None,
        }
    }

    /// Object schema whose properties are all required, in the given order.
    pub fn object<I, K>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, Schema)>,
        K: Into<String>,
    {
        Self {
            kind: SchemaKind::Object(
                properties
                    .into_iter()
                    .map(|(name, schema)| (name.into(), schema))
                    .collect(),
            ),
            description: None,
        }
    }

    /// Attach a human-readable description (sent to the model).
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Keys an object reply must contain. Empty for non-object schemas.
    pub fn required_keys(&self) -> Vec<&str> {
        match &self.kind {
            SchemaKind::Object(props) => props.iter().map(|(name, _)| name.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    /// Declared keys absent from `value`.
    ///
    /// A non-object `value` is missing every declared key.
    pub fn missing_keys(&self, value: &Value) -> Vec<String> {
        let object = value.as_object();
        self.required_keys()
            .into_iter()
            .filter(|key| !object.is_some_and(|obj| obj.contains_key(*key)))
            .map(str::to_string)
            .collect()
    }

    /// Serialise into the Gemini `responseSchema` dialect.
    pub fn to_json(&self) -> Value {
        let mut node = Map::new();
        match &self.kind {
            SchemaKind::String => {
                node.insert("type".into(), Value::from("STRING"));
            }
            SchemaKind::Array(items) => {
                node.insert("type".into(), Value::from("ARRAY"));
                node.insert("items".into(), items.to_json());
            }
            SchemaKind::Object(props) => {
                node.insert("type".into(), Value::from("OBJECT"));
                let properties: Map<String, Value> = props
                    .iter()
                    .map(|(name, schema)| (name.clone(), schema.to_json()))
                    .collect();
                node.insert("properties".into(), Value::Object(properties));
                node.insert(
                    "propertyOrdering".into(),
                    Value::Array(props.iter().map(|(name, _)| Value::from(name.as_str())).collect()),
                );
            }
        }
        if let Some(description) = &self.description {
            node.insert("description".into(), Value::from(description.as_str()));
        }
        Value::Object(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meaning_schema() -> Schema {
        Schema::object([
            ("definition", Schema::string().describe("Definition.")),
            ("examples", Schema::array(Schema::string())),
            ("context", Schema::string()),
        ])
    }

    #[test]
    fn object_serialises_type_properties_and_ordering() {
        let json = meaning_schema().to_json();

        assert_eq!(json["type"], "OBJECT");
        assert_eq!(
            json["propertyOrdering"],
            json!(["definition", "examples", "context"])
        );
        assert_eq!(json["properties"]["definition"]["type"], "STRING");
        assert_eq!(json["properties"]["definition"]["description"], "Definition.");
        assert_eq!(json["properties"]["examples"]["type"], "ARRAY");
        assert_eq!(json["properties"]["examples"]["items"]["type"], "STRING");
    }

    #[test]
    fn description_is_omitted_when_absent() {
        let json = Schema::string().to_json();
        assert!(json.get("description").is_none());
    }

    #[test]
    fn missing_keys_reports_absent_fields_only() {
        let value = json!({ "definition": "a greeting", "extra": 1 });
        assert_eq!(meaning_schema().missing_keys(&value), vec!["examples", "context"]);
    }

    #[test]
    fn complete_object_has_no_missing_keys() {
        let value = json!({ "context": "", "examples": [], "definition": "x" });
        assert!(meaning_schema().missing_keys(&value).is_empty());
    }

    #[test]
    fn non_object_value_misses_everything() {
        let value = json!(["definition"]);
        assert_eq!(meaning_schema().missing_keys(&value).len(), 3);
    }

    #[test]
    fn scalar_schema_requires_nothing() {
        assert!(Schema::string().required_keys().is_empty());
        assert!(Schema::string().missing_keys(&json!(null)).is_empty());
    }
}
