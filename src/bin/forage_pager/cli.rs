use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI для forage-pager: page number <-> after-token
#[derive(Parser, Debug)]
#[command(name = "forage-pager", version, about = "Cursor pagination adapter for page-numbered widgets")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Build the request URL for a page
    ///
    /// Пример:
    ///   forage-pager query --state ./users.json --url https://x/api/users --field name --page 2 --term ab
    Query {
        #[arg(long)]
        state: PathBuf,
        /// Endpoint URL (falls back to FORAGE_URL)
        #[arg(long)]
        url: Option<String>,
        /// Searched field (falls back to FORAGE_FIELD)
        #[arg(long)]
        field: Option<String>,
        /// Page number (default 1)
        #[arg(long)]
        page: Option<u32>,
        /// Search term (default "")
        #[arg(long)]
        term: Option<String>,
        /// JSON output (url + params)
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Record a response body for a page and echo it back
    ///
    /// Endpoint URL and field are not needed here: only the token map changes.
    Record {
        #[arg(long)]
        state: PathBuf,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        term: Option<String>,
        /// Response body: path to a JSON file or "-" for stdin
        #[arg(long)]
        response: String,
    },
    /// Print recorded tokens and the last search term
    Show {
        #[arg(long)]
        state: PathBuf,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}
