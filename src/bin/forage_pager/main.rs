use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Env};
use log::error;

use forage_pager::cli::{cmd_query, cmd_record, cmd_show};
use forage_pager::config::WidgetConfig;

mod cli;
mod util;

fn init_logger() {
    // Уровень берём из RUST_LOG, иначе дефолт — info.
    // Пример: RUST_LOG=debug ./forage-pager query ...
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    if let Err(e) = run() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = cli::Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.cmd {
        cli::Cmd::Query { state, url, field, page, term, json } => {
            let cfg = WidgetConfig::from_env_with_overrides(url.as_deref(), field.as_deref())?;
            cmd_query(&state, cfg, page, term.as_deref(), json, &mut out)
        }

        cli::Cmd::Record { state, page, term, response } => {
            let body = util::read_body_arg(&response)?;
            cmd_record(&state, page, term.as_deref(), &body, &mut out)
        }

        cli::Cmd::Show { state, json } =>
            cmd_show(&state, json, &mut out),
    }
}
