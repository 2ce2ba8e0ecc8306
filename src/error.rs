use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PackBoxError {
    #[error("Resource not found in box: {name}")]
    NotFound { name: String },

    #[error("IO operation failed on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid resource name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl PackBoxError {
    pub fn io<P: AsRef<Path>>(path: P, source: std::io::Error) -> Self {
        PackBoxError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn not_found<S: Into<String>>(name: S) -> Self {
        PackBoxError::NotFound { name: name.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PackBoxError::NotFound { .. })
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for PackBoxError {
    fn user_message(&self) -> String {
        match self {
            PackBoxError::NotFound { name } => {
                format!("No resource named '{}' in the box", name)
            }
            PackBoxError::Io { path, source } => {
                format!("Filesystem operation failed on {}: {}", path.display(), source)
            }
            PackBoxError::InvalidName { name, reason } => {
                format!("Invalid resource name '{}': {}", name, reason)
            }
            PackBoxError::Config { message } => {
                format!("Configuration error: {}", message)
            }
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            PackBoxError::NotFound { .. } => Some(
                "Run `packbox list` to see the resources available in the box.".to_string()
            ),
            PackBoxError::Io { source, .. }
                if source.kind() == std::io::ErrorKind::PermissionDenied =>
            {
                Some("Ensure you have read/write permissions for the destination directory.".to_string())
            }
            PackBoxError::InvalidName { .. } => Some(
                "Resource names must be relative paths that stay inside the destination (no '..', no leading '/').".to_string()
            ),
            PackBoxError::Config { .. } => Some(
                "Check your configuration file syntax, or regenerate one with --generate-config.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for PackBoxError {
    fn from(error: toml::de::Error) -> Self {
        PackBoxError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PackBoxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_friendly_messages() {
        let error = PackBoxError::not_found("a.txt");
        assert!(error.user_message().contains("a.txt"));
        assert!(error.suggestion().is_some());
        assert!(error.is_not_found());
    }

    #[test]
    fn test_io_error_carries_path() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = PackBoxError::io("/tmp/out", source);

        assert!(error.to_string().contains("/tmp/out"));
        assert!(error.suggestion().is_some());
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_other_io_errors_have_no_suggestion() {
        let source = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let error = PackBoxError::io("/tmp/out", source);
        assert!(error.suggestion().is_none());
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_error = toml::from_str::<toml::Value>("not = = toml").unwrap_err();
        let error = PackBoxError::from(toml_error);
        assert!(matches!(error, PackBoxError::Config { .. }));
    }
}
