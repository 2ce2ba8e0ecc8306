pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod logging;
pub mod paths;
pub mod resource;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, Command, OutputFormat};
pub use config::{CliOverrides, Config};
pub use error::{PackBoxError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{ExtractedFile, ExtractionReport, Extractor};
pub use resource::{DirBox, EmbeddedBox, MemoryBox, ResourceBox};
pub use ui::{OutputFormatter, OutputMode};

use std::path::Path;
use std::sync::Arc;

/// Command-line front end: resolves configuration into an extractor and runs commands.
pub struct PackBox {
    config: Config,
    output_formatter: OutputFormatter,
}

impl PackBox {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        Self {
            config,
            output_formatter: OutputFormatter::new(output_mode, verbose, quiet),
        }
    }

    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(config, output_mode, cli_args.verbosity_level(), cli_args.quiet))
    }

    /// Open the configured source directory as a box.
    pub fn open_box(&self) -> Result<DirBox> {
        let resources = DirBox::new(&self.config.source.root)?;
        Ok(match self.config.source.name {
            Some(ref name) => resources.with_name(name.clone()),
            None => resources,
        })
    }

    /// Build an extractor over `resources` for the configured destination.
    pub fn extractor(&self, resources: Arc<dyn ResourceBox>) -> Result<Extractor> {
        let logger = self.config.log_level().map(logging::dispatch);
        Extractor::new(resources, &self.config.extract.destination, logger)
    }

    pub fn run(&self, command: &Command) -> Result<()> {
        tracing::debug!(
            ?command,
            source = %self.config.source.root.display(),
            destination = %self.config.extract.destination.display(),
            "Running command"
        );

        match command {
            Command::List => {
                let resources = self.open_box()?;
                self.output_formatter
                    .print_resource_list(resources.name(), &resources.list());
            }
            Command::Extract { names, to } => {
                let extractor = self.extractor(Arc::new(self.open_box()?))?;
                self.output_formatter.start_operation(&format!(
                    "Extracting {} resource(s) from '{}'",
                    names.len(),
                    extractor.resources().name()
                ));
                let root = match to {
                    Some(root) => paths::absolute(root)?,
                    None => extractor.dest().to_path_buf(),
                };
                self.output_formatter
                    .info(&format!("Destination: {}", root.display()));

                for name in names {
                    let path = match to {
                        Some(root) => extractor.extract_to_dir(root, name)?,
                        None => extractor.extract(name)?,
                    };
                    self.output_formatter.print_extracted(name, &path);
                }
            }
            Command::ExtractAll => {
                let extractor = self.extractor(Arc::new(self.open_box()?))?;
                self.output_formatter.start_operation(&format!(
                    "Extracting all resources from '{}'",
                    extractor.resources().name()
                ));
                self.output_formatter
                    .info(&format!("Destination: {}", extractor.dest().display()));

                let report = extractor.extract_all()?;
                self.output_formatter.print_extraction_report(&report);
            }
            Command::Clear => {
                // clearing needs no box, and must not create the destination first
                let dest = paths::absolute(&self.config.extract.destination)?;
                paths::remove_dir_all(&dest)?;
                self.output_formatter
                    .success(&format!("Cleared destination directory: {}", dest.display()));
            }
        }

        Ok(())
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let output_path = output_path.as_ref();
        std::fs::write(output_path, Config::create_sample_config())
            .map_err(|e| PackBoxError::io(output_path, e))
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &PackBoxError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}
