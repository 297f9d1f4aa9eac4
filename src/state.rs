//! Persisted adapter state (JSON file).
//!
//! Формат:
//! {
//!   "last_term": "ab",
//!   "tokens": { "1": null, "2": "X" }
//! }
//!
//! Замечания:
//! - Отсутствующий файл = свежее состояние (page 1 -> null, last_term = "").
//! - Запись выполняется атомарно через tmp+rename.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::adapter::PageTokens;

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "state.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}

/// Load state from `path`; a missing file yields the initial state.
pub fn load(path: &Path) -> Result<PageTokens> {
    if !path.exists() {
        return Ok(PageTokens::default());
    }
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let st: PageTokens = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse state {}", path.display()))?;
    Ok(st.normalized())
}

/// Save state to `path` (tmp + rename).
pub fn save(path: &Path, st: &PageTokens) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
    }
    let tmp = tmp_path(path);

    let mut f = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&tmp)
        .with_context(|| format!("open {}", tmp.display()))?;

    let data = serde_json::to_vec_pretty(st).context("serialize adapter state")?;
    f.write_all(&data)?;
    let _ = f.sync_all();
    drop(f);

    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}
