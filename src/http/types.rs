//! Request and response bodies.
//!
//! Request bodies decode leniently, field by field:
//! - missing or `null` fields decode to their zero value (`""`, `[]`)
//! - a field of the wrong type also decodes to its zero value, without
//!   touching its neighbours
//! - field names match exactly first, then ASCII case-insensitively
//!
//! A bulk entry that is not an object still yields one (empty) entry, so the
//! number of entries always matches the `queries` array. Only a body that is
//! not JSON, or whose top level is neither an object nor `null`, fails to
//! decode.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::engine::ParsedComponent;

/// Body of `/expand` and `/parser`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryRequest {
    pub query: String,
}

/// One entry of a bulk request. `query_id` is echoed back untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchQuery {
    pub query_id: String,
    pub query: String,
}

impl BatchQuery {
    pub fn new(query_id: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            query_id: query_id.into(),
            query: query.into(),
        }
    }

    fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(object) => Self {
                query_id: string_field(object, "query_id"),
                query: string_field(object, "query"),
            },
            _ => Self::default(),
        }
    }
}

/// Body of `/bulk/expand` and `/bulk/parser`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchQueryRequest {
    pub queries: Vec<BatchQuery>,
}

impl<'de> Deserialize<'de> for QueryRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let query = match top_level(deserializer)? {
            Some(object) => string_field(&object, "query"),
            None => String::new(),
        };
        Ok(Self { query })
    }
}

impl<'de> Deserialize<'de> for BatchQuery {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_value(&Value::deserialize(deserializer)?))
    }
}

impl<'de> Deserialize<'de> for BatchQueryRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let queries = match top_level(deserializer)?.as_ref().and_then(|o| field(o, "queries")) {
            Some(Value::Array(entries)) => entries.iter().map(BatchQuery::from_value).collect(),
            _ => Vec::new(),
        };
        Ok(Self { queries })
    }
}

/// The top-level object, or `None` for `null`.
fn top_level<'de, D>(deserializer: D) -> Result<Option<Map<String, Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(object) => Ok(Some(object)),
        Value::Null => Ok(None),
        other => Err(<D::Error as de::Error>::invalid_type(
            unexpected(&other),
            &"a JSON object",
        )),
    }
}

fn unexpected(value: &Value) -> de::Unexpected<'_> {
    match value {
        Value::Bool(b) => de::Unexpected::Bool(*b),
        Value::Number(_) => de::Unexpected::Other("number"),
        Value::String(s) => de::Unexpected::Str(s),
        Value::Array(_) => de::Unexpected::Seq,
        Value::Object(_) | Value::Null => de::Unexpected::Map,
    }
}

fn field<'a>(object: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    object.get(name).or_else(|| {
        object
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    })
}

fn string_field(object: &Map<String, Value>, name: &str) -> String {
    match field(object, name) {
        Some(Value::String(text)) => text.clone(),
        _ => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchParseItem {
    pub query_id: String,
    pub parsed: Vec<ParsedComponent>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchParseResponse {
    pub items: Vec<BatchParseItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchExpandItem {
    pub query_id: String,
    pub expansions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchExpandResponse {
    pub items: Vec<BatchExpandItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default_to_empty() {
        let request: QueryRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.query, "");

        let batch: BatchQueryRequest =
            serde_json::from_str(r#"{"queries":[{"query":"x"}]}"#).unwrap();
        assert_eq!(batch.queries, vec![BatchQuery::new("", "x")]);
    }

    #[test]
    fn null_and_mistyped_fields_keep_every_entry() {
        let batch: BatchQueryRequest = serde_json::from_str(
            r#"{"queries":[
                {"query_id":"a","query":"1 Main St"},
                {"query_id":"b","query":null},
                {"query_id":7,"query":"2 Oak Ave"},
                "not an object",
                null
            ]}"#,
        )
        .unwrap();

        assert_eq!(
            batch.queries,
            vec![
                BatchQuery::new("a", "1 Main St"),
                BatchQuery::new("b", ""),
                BatchQuery::new("", "2 Oak Ave"),
                BatchQuery::default(),
                BatchQuery::default(),
            ]
        );
    }

    #[test]
    fn null_values_are_empty() {
        let request: QueryRequest = serde_json::from_str(r#"{"query":null}"#).unwrap();
        assert_eq!(request.query, "");

        let request: QueryRequest = serde_json::from_str("null").unwrap();
        assert_eq!(request.query, "");

        let batch: BatchQueryRequest = serde_json::from_str(r#"{"queries":null}"#).unwrap();
        assert!(batch.queries.is_empty());
    }

    #[test]
    fn field_names_match_case_insensitively() {
        let request: QueryRequest = serde_json::from_str(r#"{"Query":"a"}"#).unwrap();
        assert_eq!(request.query, "a");

        let batch: BatchQueryRequest =
            serde_json::from_str(r#"{"QUERIES":[{"Query_Id":"1","QUERY":"b"}]}"#).unwrap();
        assert_eq!(batch.queries, vec![BatchQuery::new("1", "b")]);
    }

    #[test]
    fn exact_name_wins_over_other_casings() {
        let request: QueryRequest =
            serde_json::from_str(r#"{"QUERY":"upper","query":"exact"}"#).unwrap();
        assert_eq!(request.query, "exact");
    }

    #[test]
    fn non_object_top_level_is_an_error() {
        assert!(serde_json::from_str::<QueryRequest>("[1,2]").is_err());
        assert!(serde_json::from_str::<BatchQueryRequest>(r#""queries""#).is_err());
    }

    #[test]
    fn empty_items_serialize_as_array() {
        let json = serde_json::to_string(&BatchExpandResponse::default()).unwrap();
        assert_eq!(json, r#"{"items":[]}"#);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let request: QueryRequest =
            serde_json::from_str(r#"{"query":"a","language":"en"}"#).unwrap();
        assert_eq!(request.query, "a");
    }
}
