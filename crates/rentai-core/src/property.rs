//! Search service models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{RentaiError, Result};
use crate::wire::{deserialize_id, null_as_default};

/// A property as returned by the search service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PropertyListing {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub house_type: Option<String>,
    #[serde(default)]
    pub distance: Option<f64>,
}

/// Wraps a bare array as `{"results": [...]}`; anything else is returned as is.
pub fn normalize_search_response(value: Value) -> Value {
    match value {
        Value::Array(items) => {
            let mut wrapped = Map::new();
            wrapped.insert("results".to_string(), Value::Array(items));
            Value::Object(wrapped)
        }
        other => other,
    }
}

/// Typed view of a normalized search response. Extra keys (totals, paging)
/// are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SearchResults {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<PropertyListing>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SearchResults {
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(normalize_search_response(value))?)
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Query parameters for `GET /search`, passed through verbatim and in order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    params: Vec<(String, String)>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Parses `key=value` pairs such as CLI arguments.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut query = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                RentaiError::validation(format!("expected key=value, got '{}'", pair))
            })?;
            if key.trim().is_empty() {
                return Err(RentaiError::validation(format!("empty key in '{}'", pair)));
            }
            query = query.param(key.trim(), value);
        }
        Ok(query)
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Order-independent key used by the query cache.
    pub fn cache_key(&self) -> String {
        let mut sorted: Vec<String> = self
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        sorted.sort();
        format!("search?{}", sorted.join("&"))
    }

    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.params.iter().cloned().collect()
    }
}

/// Body of `POST /saved-searches`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSearchRequest {
    pub name: String,
    pub filters: BTreeMap<String, String>,
}

impl SavedSearchRequest {
    pub fn new(name: impl Into<String>, query: &SearchQuery) -> Self {
        Self {
            name: name.into(),
            filters: query.to_map(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_array_is_wrapped() {
        let raw = json!([{"id": 1}, {"id": 2}]);
        assert_eq!(
            normalize_search_response(raw),
            json!({"results": [{"id": 1}, {"id": 2}]})
        );
    }

    #[test]
    fn test_wrapped_response_is_unchanged() {
        let raw = json!({"results": [{"id": 1}], "total": 1});
        assert_eq!(normalize_search_response(raw.clone()), raw);
    }

    #[test]
    fn test_search_results_keep_extra_fields() {
        let results = SearchResults::from_value(json!({
            "results": [{"id": 3, "title": "CMC villa", "price": 45000}],
            "total": 1
        }))
        .unwrap();
        assert_eq!(results.results[0].id, "3");
        assert_eq!(results.results[0].price, Some(45000.0));
        assert_eq!(results.extra["total"], 1);
    }

    #[test]
    fn test_empty_shapes() {
        assert!(SearchResults::from_value(json!([])).unwrap().is_empty());
        assert!(SearchResults::from_value(json!({"results": null})).unwrap().is_empty());
    }

    #[test]
    fn test_cache_key_ignores_order() {
        let a = SearchQuery::new().param("location", "Bole").param("max_price", "20000");
        let b = SearchQuery::new().param("max_price", "20000").param("location", "Bole");
        assert_eq!(a.cache_key(), b.cache_key());
        assert_ne!(a.params(), b.params());
    }

    #[test]
    fn test_from_pairs() {
        let query = SearchQuery::from_pairs(["location=Bole", "q=a=b"]).unwrap();
        assert_eq!(query.params()[1], ("q".to_string(), "a=b".to_string()));
        assert!(SearchQuery::from_pairs(["nope"]).is_err());
        assert!(SearchQuery::from_pairs(["=x"]).is_err());
    }
}
