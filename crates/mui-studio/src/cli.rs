use std::path::PathBuf;

use clap::Parser;

use mui_nav::NavigatorConfig;

#[derive(Parser, Debug, Clone)]
#[command(name = "mui-studio")]
#[command(about = "Render mui markup in the terminal and follow its links")]
#[command(version)]
pub struct Cli {
    /// Markup file to open; relative links resolve against its directory
    pub file: Option<PathBuf>,

    /// Markup to render instead of a file (stdin is read when neither is given)
    #[arg(short, long, conflicts_with = "file")]
    pub markup: Option<String>,

    /// Follow the Nth link (1-based) of the current page; repeatable
    #[arg(short, long = "follow", value_name = "N")]
    pub follow: Vec<usize>,

    /// Scheme handed to the system handler; repeatable, replaces http/https/mailto
    #[arg(long = "external-scheme", value_name = "SCHEME")]
    pub external_schemes: Vec<String>,

    /// Disable ANSI styling
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn navigator_config(&self) -> NavigatorConfig {
        let mut config = NavigatorConfig::default();
        if !self.external_schemes.is_empty() {
            config.external_schemes = self.external_schemes.clone();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["mui-studio", "page.bbcode"]);
        assert_eq!(cli.file, Some(PathBuf::from("page.bbcode")));
        assert!(cli.follow.is_empty());
        assert_eq!(cli.navigator_config(), NavigatorConfig::default());
    }

    #[test]
    fn repeated_flags() {
        let cli = Cli::parse_from([
            "mui-studio", "-m", "[b]x[/b]", "-f", "2", "-f", "1",
            "--external-scheme", "ftp", "--external-scheme", "https",
        ]);
        assert_eq!(cli.markup.as_deref(), Some("[b]x[/b]"));
        assert_eq!(cli.follow, vec![2, 1]);
        assert_eq!(cli.navigator_config().external_schemes, vec!["ftp", "https"]);
    }

    #[test]
    fn file_and_markup_conflict() {
        assert!(Cli::try_parse_from(["mui-studio", "a.bbcode", "-m", "x"]).is_err());
    }
}
