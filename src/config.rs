//! Command line options and logging setup.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Command line options for the dashboard.
#[derive(Parser, Debug)]
#[command(name = "userdash")]
#[command(about = "TUI dashboard for managing user records over a REST API", long_about = None)]
pub struct Cli {
    /// Base URL of the user-records service
    #[arg(
        long,
        env = "USERDASH_BASE_URL",
        default_value = "https://jsonplaceholder.typicode.com"
    )]
    pub base_url: String,

    /// Where log output is written (the terminal belongs to the TUI)
    #[arg(long, default_value = "userdash.log")]
    pub log_file: PathBuf,

    /// Theme configuration file
    #[arg(long, default_value = "theme.conf")]
    pub theme: String,

    /// Keybindings configuration file
    #[arg(long, default_value = "keybinds.conf")]
    pub keys: String,
}

/// Route tracing output to the log file. The filter honors `RUST_LOG`
/// and defaults to `info`.
pub fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_public_mock_service() {
        let cli = Cli::parse_from(["userdash"]);
        assert_eq!(cli.base_url, "https://jsonplaceholder.typicode.com");
        assert_eq!(cli.log_file, PathBuf::from("userdash.log"));
        assert_eq!(cli.theme, "theme.conf");
        assert_eq!(cli.keys, "keybinds.conf");
    }

    #[test]
    fn base_url_flag_overrides_default() {
        let cli = Cli::parse_from(["userdash", "--base-url", "http://localhost:4000"]);
        assert_eq!(cli.base_url, "http://localhost:4000");
    }
}
