use anyhow::{Context, Result};
use std::io::Read;
use std::path::PathBuf;

/// Read a response body: "-" means stdin, anything else is a file path.
pub fn read_body_arg(arg: &str) -> Result<String> {
    if arg == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read response body from stdin")?;
        return Ok(buf);
    }
    let path = PathBuf::from(arg);
    std::fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))
}
