//! Widget configuration.
//!
//! Sources (in order of precedence):
//! - explicit overrides (CLI flags, builder setters)
//! - host element attributes: `data-url`, `data-field`
//! - environment: FORAGE_URL, FORAGE_FIELD, FORAGE_ORIGIN
//!
//! `data-url` may be relative (как в разметке страницы, "/admin/users/select");
//! relative URLs are resolved against an origin (FORAGE_ORIGIN or the caller's).

use std::collections::HashMap;
use std::fmt;

use anyhow::{anyhow, Context, Result};
use url::Url;

/// Element attribute marking a node as a paginated select widget.
pub const ATTR_WIDGET: &str = "data-forage-select2-widget";
/// Element attribute holding the endpoint URL.
pub const ATTR_URL: &str = "data-url";
/// Element attribute holding the searched field name.
pub const ATTR_FIELD: &str = "data-field";

pub const ENV_URL: &str = "FORAGE_URL";
pub const ENV_FIELD: &str = "FORAGE_FIELD";
pub const ENV_ORIGIN: &str = "FORAGE_ORIGIN";

/// Per-widget configuration read from the host element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetConfig {
    /// Endpoint queried for every page (absolute after resolution).
    pub base_url: Url,
    /// Field name used in `_search[<field>][...]`.
    pub field: String,
}

impl WidgetConfig {
    pub fn new<S: Into<String>>(base_url: Url, field: S) -> Self {
        Self {
            base_url,
            field: field.into(),
        }
    }

    /// Build from host element attributes (`data-url`, `data-field`).
    pub fn from_attrs(attrs: &HashMap<String, String>, origin: Option<&Url>) -> Result<Self> {
        let url = non_empty(attrs.get(ATTR_URL).map(String::as_str))
            .ok_or_else(|| anyhow!("missing or empty {} attribute", ATTR_URL))?;
        let field = non_empty(attrs.get(ATTR_FIELD).map(String::as_str))
            .ok_or_else(|| anyhow!("missing or empty {} attribute", ATTR_FIELD))?;
        let base_url = resolve_url(url, origin)?;
        Ok(Self::new(base_url, field))
    }

    /// Build from FORAGE_URL / FORAGE_FIELD (FORAGE_ORIGIN resolves a relative URL).
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_overrides(None, None)
    }

    /// Same as `from_env`, but explicit values win over the environment.
    pub fn from_env_with_overrides(url: Option<&str>, field: Option<&str>) -> Result<Self> {
        let env_url = env_non_empty(ENV_URL);
        let env_field = env_non_empty(ENV_FIELD);

        let url = non_empty(url)
            .or(env_url.as_deref())
            .ok_or_else(|| anyhow!("endpoint URL is not set (pass --url or set {})", ENV_URL))?;
        let field = non_empty(field)
            .or(env_field.as_deref())
            .ok_or_else(|| anyhow!("field is not set (pass --field or set {})", ENV_FIELD))?;

        let origin = match env_non_empty(ENV_ORIGIN) {
            Some(o) => Some(Url::parse(&o).with_context(|| format!("parse {}={}", ENV_ORIGIN, o))?),
            None => None,
        };
        let base_url = resolve_url(url, origin.as_ref())?;
        Ok(Self::new(base_url, field))
    }

    pub fn with_base_url(mut self, url: Url) -> Self {
        self.base_url = url;
        self
    }

    pub fn with_field<S: Into<String>>(mut self, field: S) -> Self {
        self.field = field.into();
        self
    }
}

impl fmt::Display for WidgetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WidgetConfig {{ base_url: {}, field: {} }}",
            self.base_url, self.field
        )
    }
}

fn non_empty(v: Option<&str>) -> Option<&str> {
    v.map(str::trim).filter(|s| !s.is_empty())
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn resolve_url(raw: &str, origin: Option<&Url>) -> Result<Url> {
    match Url::parse(raw) {
        Ok(u) => Ok(u),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = origin.ok_or_else(|| {
                anyhow!("relative URL '{}' requires an origin ({})", raw, ENV_ORIGIN)
            })?;
            base.join(raw)
                .with_context(|| format!("resolve '{}' against {}", raw, base))
        }
        Err(e) => Err(anyhow!("invalid URL '{}': {}", raw, e)),
    }
}
