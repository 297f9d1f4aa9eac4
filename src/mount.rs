//! Mounting adapters onto host elements.
//!
//! Every element carrying `data-forage-select2-widget="true"` gets its own
//! `PageTokenAdapter`, configured from its `data-url` / `data-field`
//! attributes. Elements with a broken configuration are skipped (warn!),
//! the rest of the page keeps working.

use std::collections::{BTreeMap, HashMap, HashSet};

use anyhow::{bail, Result};
use log::{debug, warn};
use url::Url;

use crate::adapter::PageTokenAdapter;
use crate::config::{WidgetConfig, ATTR_WIDGET};

/// A host page element as seen by the adapter: id + attributes.
#[derive(Clone, Debug, Default)]
pub struct HostElement {
    pub id: String,
    pub attrs: HashMap<String, String>,
}

impl HostElement {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self {
            id: id.into(),
            attrs: HashMap::new(),
        }
    }

    pub fn attr<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn is_widget(&self) -> bool {
        self.attrs.get(ATTR_WIDGET).map(String::as_str) == Some("true")
    }
}

/// Independent adapters keyed by element id.
#[derive(Debug, Default)]
pub struct WidgetSet {
    adapters: BTreeMap<String, PageTokenAdapter>,
}

impl WidgetSet {
    pub fn get(&self, id: &str) -> Option<&PageTokenAdapter> {
        self.adapters.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut PageTokenAdapter> {
        self.adapters.get_mut(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.adapters.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

/// Build one adapter per widget element.
///
/// Duplicate widget ids are an error, whether or not the earlier element mounted.
pub fn mount(elements: &[HostElement], origin: Option<&Url>) -> Result<WidgetSet> {
    let mut set = WidgetSet::default();
    let mut seen: HashSet<&str> = HashSet::new();
    for el in elements.iter().filter(|e| e.is_widget()) {
        if !seen.insert(el.id.as_str()) {
            bail!("duplicate widget element id '{}'", el.id);
        }
        let cfg = match WidgetConfig::from_attrs(&el.attrs, origin) {
            Ok(c) => c,
            Err(e) => {
                warn!("mount: skip element '{}': {:#}", el.id, e);
                continue;
            }
        };
        debug!("mount: element '{}' -> {}", el.id, cfg);
        set.adapters.insert(el.id.clone(), PageTokenAdapter::new(cfg));
    }
    Ok(set)
}
