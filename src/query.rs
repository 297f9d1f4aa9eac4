//! Outbound query parameter set.
//!
//! Порядок пар сохраняется: backend видит параметры ровно в том порядке,
//! в каком их добавил builder (search filter, затем pagination token).

use std::fmt;

use serde::Serialize;
use url::form_urlencoded;

/// Parameter name carrying the continuation token.
pub const AFTER_PARAM: &str = "_pagination[after]";

/// Search operator sent with every request.
pub const SEARCH_OP_CONTAINS: &str = "contains";

/// `_search[<field>][op]`
pub fn search_op_param(field: &str) -> String {
    format!("_search[{}][op]", field)
}

/// `_search[<field>][val]`
pub fn search_val_param(field: &str) -> String {
    format!("_search[{}][val]", field)
}

/// Ordered list of (name, value) query pairs.
/// Serializes as a JSON array of `[name, value]` pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query with the "contains" search filter for `field`.
    pub fn search_filter(field: &str, term: &str) -> Self {
        let mut q = Self::new();
        q.push(search_op_param(field), SEARCH_OP_CONTAINS);
        q.push(search_val_param(field), term);
        q
    }

    pub fn push<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) {
        self.pairs.push((name.into(), value.into()));
    }

    /// First value for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Continuation token carried by this query (if attached).
    pub fn after_token(&self) -> Option<&str> {
        self.get(AFTER_PARAM)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// application/x-www-form-urlencoded rendering (brackets are percent-encoded).
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}
