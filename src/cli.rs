//! Command implementations behind the `forage-pager` binary.
//!
//! Each command loads the adapter state from a JSON file, performs one
//! operation and (for `record`) writes the state back. Output goes to the
//! supplied writer so the commands can be exercised from tests.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use serde_json::Value;

use crate::adapter::{page_or_first, PageTokenAdapter};
use crate::config::WidgetConfig;
use crate::query::Query;
use crate::state;

#[derive(Serialize)]
struct QueryReport<'a> {
    url: &'a str,
    page: u32,
    term: &'a str,
    params: &'a Query,
    token_attached: bool,
}

#[derive(Serialize)]
struct StateReport<'a> {
    last_term: &'a str,
    tokens: Vec<TokenEntry<'a>>,
}

#[derive(Serialize)]
struct TokenEntry<'a> {
    page: u32,
    after: Option<&'a str>,
}

/// Print the request URL for `page`/`term` (state is read, not modified).
pub fn cmd_query(
    state_path: &Path,
    cfg: WidgetConfig,
    page: Option<u32>,
    term: Option<&str>,
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let st = state::load(state_path)?;
    let adapter = PageTokenAdapter::with_state(cfg, st);

    // Builder runs once: counters and debug! lines reflect one request.
    let params = adapter.request_params(page, term);
    let url = adapter.url_for(&params);

    if json {
        let report = QueryReport {
            url: url.as_str(),
            page: page_or_first(page),
            term: term.unwrap_or(""),
            params: &params,
            token_attached: params.after_token().is_some(),
        };
        serde_json::to_writer(&mut *out, &report).context("serialize query report")?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", url)?;
    }
    Ok(())
}

/// Record a response body for `page`/`term`, persist state and echo the body.
///
/// Needs no endpoint URL or field: recording only touches the token map.
pub fn cmd_record(
    state_path: &Path,
    page: Option<u32>,
    term: Option<&str>,
    body: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let payload: Value = serde_json::from_str(body).context("parse response body as JSON")?;

    let mut st = state::load(state_path)?;
    let payload = st.record_response(page, term, payload);
    state::save(state_path, &st)?;

    info!(
        "recorded page {} (term='{}') into {}",
        page_or_first(page),
        term.unwrap_or(""),
        state_path.display()
    );

    serde_json::to_writer(&mut *out, &payload).context("write response body")?;
    writeln!(out)?;
    Ok(())
}

/// Print the token map and the last search term.
pub fn cmd_show(state_path: &Path, json: bool, out: &mut dyn Write) -> Result<()> {
    let st = state::load(state_path)?;

    if json {
        let report = StateReport {
            last_term: st.last_term(),
            tokens: st
                .iter()
                .map(|(page, after)| TokenEntry { page, after })
                .collect(),
        };
        serde_json::to_writer(&mut *out, &report).context("serialize state report")?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "last_term: '{}'", st.last_term())?;
    for (page, after) in st.iter() {
        match after {
            Some(t) => writeln!(out, "page {:>4} -> {}", page, t)?,
            None => writeln!(out, "page {:>4} -> (none)", page)?,
        }
    }
    Ok(())
}
