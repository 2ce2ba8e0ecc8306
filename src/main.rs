use anyhow::Context;
use clap::Parser;
use packbox::{logging, Cli, OutputFormatter, OutputMode, PackBox, PackBoxError};
use std::path::PathBuf;
use std::process;
use tracing::Level;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    logging::init(diagnostic_level(cli.verbosity_level()));

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let Some(ref command) = cli.command else {
        eprintln!("No command given. Run `packbox --help` for usage.");
        return 2;
    };

    let packbox = match PackBox::from_cli(&cli) {
        Ok(packbox) => packbox,
        Err(e) => {
            print_startup_error(&e);
            return exit_code_for(&e);
        }
    };

    match packbox.run(command) {
        Ok(()) => 0,
        Err(e) => {
            packbox.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn diagnostic_level(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn exit_code_for(error: &PackBoxError) -> i32 {
    match error {
        PackBoxError::InvalidName { .. } => 2,
        PackBoxError::NotFound { .. } => 3,
        PackBoxError::Io { .. } => 4,
        PackBoxError::Config { .. } => 5,
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    match write_sample_config(cli) {
        Ok(config_path) => {
            println!("Generated sample configuration file: {}", config_path.display());
            println!("\nTo use this configuration:");
            println!("  packbox --config {} list", config_path.display());
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {:#}", e);
            1
        }
    }
}

fn write_sample_config(cli: &Cli) -> anyhow::Result<PathBuf> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("packbox.toml"));

    PackBox::generate_sample_config(&config_path)
        .with_context(|| format!("writing {}", config_path.display()))?;

    Ok(config_path)
}

fn print_startup_error(error: &PackBoxError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_generate_config_command() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let cli = Cli::try_parse_from([
            "packbox",
            "--generate-config",
            "--config",
            config_path.to_str().unwrap(),
        ])
        .unwrap();

        assert_eq!(handle_generate_config(&cli), 0);

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[extract]"));
    }

    #[test]
    fn test_generate_config_failure() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("missing").join("test.toml");

        let cli = Cli::try_parse_from([
            "packbox",
            "--generate-config",
            "--config",
            config_path.to_str().unwrap(),
        ])
        .unwrap();

        assert_eq!(handle_generate_config(&cli), 1);
    }

    #[test]
    fn test_diagnostic_level_follows_verbosity() {
        assert_eq!(diagnostic_level(0), Level::WARN);
        assert_eq!(diagnostic_level(1), Level::INFO);
        assert_eq!(diagnostic_level(2), Level::DEBUG);
        assert_eq!(diagnostic_level(5), Level::TRACE);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code_for(&PackBoxError::not_found("x")), 3);
        assert_eq!(
            exit_code_for(&PackBoxError::Config {
                message: "bad".to_string()
            }),
            5
        );
    }
}
