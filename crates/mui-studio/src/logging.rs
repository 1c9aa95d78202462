//! Logger setup for `mui-studio`. Log lines go to stderr so rendered pages on
//! stdout stay clean.

use std::sync::Once;

/// Crates whose records `--verbose` raises to debug.
const WORKSPACE_CRATES: [&str; 3] = ["mui_bbcode", "mui_nav", "mui_studio"];

#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// `env_logger` filter (e.g. "warn", "mui_bbcode=trace"). Wins over
    /// `verbose` and `RUST_LOG`.
    pub env_filter: Option<String>,
    /// Debug output for the markup and navigation crates (`--verbose`).
    pub verbose: bool,
    /// Strip ANSI styling from log lines (`--no-color`).
    pub no_color: bool,
}

impl LoggingConfig {
    /// Filter to install, given the current `RUST_LOG` value.
    fn filter(&self, rust_log: Option<String>) -> String {
        if let Some(filter) = &self.env_filter {
            return filter.clone();
        }
        if self.verbose {
            let crates: Vec<String> = WORKSPACE_CRATES.iter().map(|c| format!("{c}=debug")).collect();
            return format!("info,{}", crates.join(","));
        }
        rust_log.unwrap_or_else(|| "info".to_string())
    }

    fn write_style(&self) -> env_logger::WriteStyle {
        if self.no_color { env_logger::WriteStyle::Never } else { env_logger::WriteStyle::Auto }
    }
}

static INIT: Once = Once::new();

/// Installs the global logger on first call; later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config.filter(std::env::var("RUST_LOG").ok());
        env_logger::Builder::new()
            .parse_filters(&filter)
            .write_style(config.write_style())
            .target(env_logger::Target::Stderr)
            .init();
        log::debug!("logging initialized with filter {filter:?}");
    });
}
