//! Page-number -> continuation-token adapter.
//!
//! The widget asks for pages 1, 2, 3... while the backend only understands an
//! opaque `after` token pointing at the next slice. The adapter keeps, per
//! widget instance:
//! - `tokens`: page -> token (page 1 is always `None`, it starts from the beginning)
//! - `last_term`: search term of the last recorded response
//!
//! Token for page N+1 appears only after the response for page N is recorded.
//! A token is reused only while the search term stays the same; otherwise the
//! request goes without it and the backend restarts the sequence.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::config::WidgetConfig;
use crate::metrics;
use crate::query::{Query, AFTER_PARAM};

/// JSON pointer of the next-page token inside a response body.
pub const NEXT_TOKEN_POINTER: &str = "/pagination/after";

/// Page requested when the widget sends none (or 0).
pub const FIRST_PAGE: u32 = 1;

#[inline]
pub fn page_or_first(page: Option<u32>) -> u32 {
    match page {
        Some(p) if p > 0 => p,
        _ => FIRST_PAGE,
    }
}

#[inline]
fn term_or_empty(term: Option<&str>) -> &str {
    term.unwrap_or("")
}

/// Mutable pagination state of one widget instance (persistable as JSON).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageTokens {
    #[serde(default)]
    last_term: String,
    #[serde(default)]
    tokens: BTreeMap<u32, Option<String>>,
}

impl Default for PageTokens {
    fn default() -> Self {
        let mut tokens = BTreeMap::new();
        tokens.insert(FIRST_PAGE, None);
        Self {
            last_term: String::new(),
            tokens,
        }
    }
}

impl PageTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-establish the page-1 invariant (used after loading foreign state).
    pub(crate) fn normalized(mut self) -> Self {
        self.tokens.insert(FIRST_PAGE, None);
        self.tokens.remove(&0);
        self
    }

    pub fn last_term(&self) -> &str {
        &self.last_term
    }

    /// Recorded token for `page` (`None` if absent or recorded as null).
    pub fn token_for(&self, page: u32) -> Option<&str> {
        self.tokens.get(&page).and_then(|t| t.as_deref())
    }

    /// Whether anything (even null) was recorded for `page`.
    pub fn has_entry(&self, page: u32) -> bool {
        self.tokens.contains_key(&page)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, Option<&str>)> {
        self.tokens.iter().map(|(p, t)| (*p, t.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token to send with a request for `page` under `term`, if reusable.
    fn reusable_token(&self, page: u32, term: &str) -> Option<&str> {
        let token = self.token_for(page).filter(|t| !t.is_empty())?;
        if self.last_term == term {
            Some(token)
        } else {
            metrics::record_token_dropped_term_changed();
            debug!(
                "page {}: search term changed ('{}' -> '{}'), dropping token",
                page, self.last_term, term
            );
            None
        }
    }

    /// Record the response for `page`/`term`; returns the payload unchanged.
    ///
    /// `pagination.after` becomes the token of `page + 1`. Missing or null
    /// tokens are stored as null, numbers in their decimal form.
    /// Recording needs no widget configuration (URL, field).
    pub fn record_response(&mut self, page: Option<u32>, term: Option<&str>, payload: Value) -> Value {
        let page = page_or_first(page);
        let term = term_or_empty(term);

        let next = next_token(&payload);
        metrics::record_response(next.is_some());
        debug!(
            "page {}: recorded response (term='{}', next token {})",
            page,
            term,
            if next.is_some() { "present" } else { "absent" }
        );
        self.record(page, term, next);
        payload
    }

    fn record(&mut self, page: u32, term: &str, next: Option<String>) {
        self.last_term.clear();
        self.last_term.push_str(term);
        let next_page = page.saturating_add(1);
        if next_page > FIRST_PAGE {
            self.tokens.insert(next_page, next);
        }
    }
}

/// One adapter per widget element. Nothing is shared between instances.
#[derive(Clone, Debug)]
pub struct PageTokenAdapter {
    config: WidgetConfig,
    state: PageTokens,
}

impl PageTokenAdapter {
    pub fn new(config: WidgetConfig) -> Self {
        Self::with_state(config, PageTokens::default())
    }

    /// Resume from previously persisted state.
    pub fn with_state(config: WidgetConfig, state: PageTokens) -> Self {
        Self {
            config,
            state: state.normalized(),
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn state(&self) -> &PageTokens {
        &self.state
    }

    pub fn into_state(self) -> PageTokens {
        self.state
    }

    /// Forget all tokens and the last term.
    pub fn reset(&mut self) {
        self.state = PageTokens::default();
    }

    /// Query parameters for `page` (default 1) and `term` (default "").
    ///
    /// `_pagination[after]` is attached only when a token is known for the
    /// page and the term equals the term of the last recorded response.
    pub fn request_params(&self, page: Option<u32>, term: Option<&str>) -> Query {
        let page = page_or_first(page);
        let term = term_or_empty(term);

        let mut query = Query::search_filter(&self.config.field, term);
        if let Some(token) = self.state.reusable_token(page, term) {
            debug!("page {}: attaching after-token", page);
            metrics::record_token_attached();
            query.push(AFTER_PARAM, token);
        }
        metrics::record_request_built();
        query
    }

    /// Full request URL: base URL + `request_params` (base query pairs are kept).
    pub fn request_url(&self, page: Option<u32>, term: Option<&str>) -> Url {
        let query = self.request_params(page, term);
        self.url_for(&query)
    }

    /// Base URL with an already built `query` appended (no builder run, no counters).
    pub fn url_for(&self, query: &Query) -> Url {
        let mut url = self.config.base_url.clone();
        url.query_pairs_mut().extend_pairs(query.iter());
        url
    }

    /// See [`PageTokens::record_response`].
    pub fn record_response(&mut self, page: Option<u32>, term: Option<&str>, payload: Value) -> Value {
        self.state.record_response(page, term, payload)
    }
}

/// Extract the next-page token from a response body.
///
/// A numeric `0` is a valid token (sent as "0"); booleans are stored as null.
pub fn next_token(payload: &Value) -> Option<String> {
    match payload.pointer(NEXT_TOKEN_POINTER)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
