use anyhow::Result;
use chrono::{Local, Offset};
use clap::Parser;
use daybook::build::build_site;
use daybook::config::Config;
use flexi_logger::Logger;
use std::path::PathBuf;

/// Builds a journal site from a directory of dated, tagged entries.
#[derive(Parser)]
#[command(name = "daybook", version, about)]
struct Cli {
    /// The site directory, or any directory below it. `daybook.yaml` is
    /// looked up here and then in each parent directory.
    #[arg(short = 'C', long, default_value = ".")]
    directory: PathBuf,

    /// The log level (`error`, `warn`, `info`, `debug` or `trace`).
    /// `RUST_LOG` takes precedence.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = Logger::try_with_env_or_str(&cli.log_level)?.start()?;

    // Feed timestamps use the offset in effect now, not on each entry's date.
    let utc_offset = Local::now().offset().fix();
    let config = Config::from_directory(&cli.directory, utc_offset)?;
    build_site(&config)?;
    Ok(())
}
