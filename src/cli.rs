use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "packbox")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract packaged assets from a resource box to disk")]
#[command(
    long_about = "packbox treats a directory of assets as a resource box and extracts \
                  individual entries into a managed destination directory."
)]
#[command(after_help = "EXAMPLES:\n  \
    packbox --source ./assets list\n  \
    packbox --source ./assets --dest ./out extract index.html css/site.css\n  \
    packbox --source ./assets extract-all --log-level debug\n  \
    packbox --dest ./out clear")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory served as the resource box
    #[arg(short, long, global = true, env = "PACKBOX_SOURCE")]
    pub source: Option<PathBuf>,

    /// Destination root for extracted files
    #[arg(short, long, global = true, env = "PACKBOX_DEST")]
    pub dest: Option<PathBuf>,

    /// Name of the box used in log output
    #[arg(long, global = true)]
    pub box_name: Option<String>,

    /// Configuration file path
    #[arg(short, long, global = true, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Enable extractor tracing at this level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List the resources in the box
    List,
    /// Extract one or more resources
    Extract {
        /// Resource names, as printed by `list`
        #[arg(required = true)]
        names: Vec<String>,

        /// Extract under this directory instead of the destination root
        #[arg(long)]
        to: Option<PathBuf>,
    },
    /// Extract every resource in the box
    ExtractAll,
    /// Delete the destination directory and everything in it
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_destination(self.dest.clone())
            .with_source(self.source.clone())
            .with_box_name(self.box_name.clone())
            .with_log_level(self.log_level.clone())
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extract_command() {
        let cli = Cli::try_parse_from([
            "packbox", "--source", "assets", "extract", "a.txt", "css/site.css", "--to", "/tmp/x",
        ])
        .unwrap();

        assert_eq!(cli.source, Some(PathBuf::from("assets")));
        assert_eq!(
            cli.command,
            Some(Command::Extract {
                names: vec!["a.txt".to_string(), "css/site.css".to_string()],
                to: Some(PathBuf::from("/tmp/x")),
            })
        );
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["packbox", "clear", "--dest", "out", "-q"]).unwrap();
        assert_eq!(cli.command, Some(Command::Clear));
        assert_eq!(cli.dest, Some(PathBuf::from("out")));
        assert_eq!(cli.verbosity_level(), 0);
    }

    #[test]
    fn test_extract_requires_names() {
        assert!(Cli::try_parse_from(["packbox", "extract"]).is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["packbox", "-q", "-v", "list"]).is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::try_parse_from(["packbox", "--dest", "out", "--log-level", "info", "list"]).unwrap();
        let overrides = cli.create_cli_overrides();

        assert_eq!(overrides.destination, Some(PathBuf::from("out")));
        assert_eq!(overrides.log_level.as_deref(), Some("info"));
        assert!(overrides.source.is_none());
    }
}
