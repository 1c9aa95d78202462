mod cli;
mod clipboard;
mod host;
mod logging;
mod render;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use mui_nav::Uri;

use crate::cli::Cli;
use crate::clipboard::SystemClipboard;
use crate::host::Studio;
use crate::logging::{LoggingConfig, init_logging};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig { env_filter: None, verbose: cli.verbose, no_color: cli.no_color });

    let content_root = cli
        .file
        .as_deref()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let mut studio = Studio::new(cli.navigator_config(), Arc::new(SystemClipboard), content_root, !cli.no_color);

    if let Some(file) = &cli.file {
        let name = file
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("unusable file name {}", file.display()))?;
        let uri = Uri::parse(&format!("/{name}")).with_context(|| format!("cannot address {name} by uri"))?;
        studio.open(&uri)?;
    } else if let Some(markup) = &cli.markup {
        studio.open_markup(markup);
    } else {
        let mut markup = String::new();
        std::io::stdin().read_to_string(&mut markup).context("failed to read markup from stdin")?;
        studio.open_markup(&markup);
    }
    print!("{}", studio.render());

    for &n in &cli.follow {
        let outcome = studio.follow(n)?;
        println!("\n→ {outcome}\n");
        print!("{}", studio.render());
    }

    Ok(())
}
