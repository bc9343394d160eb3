//! Error handling for the nwalign CLI

use nwalign_core::{AlignError, GeneratorError};
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for nwalign CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Input/Output error: {message}")]
    Io { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Alignment error: {0}")]
    Alignment(#[from] AlignError),

    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl CliError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io { message: message.into() }
    }

    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput { message: message.into() }
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation { message: message.into() }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl From<GeneratorError> for CliError {
    fn from(err: GeneratorError) -> Self {
        match err {
            GeneratorError::Io(io) => Self::from(io),
            other => Self::invalid_input(other.to_string()),
        }
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(format!("TOML parsing error: {}", err))
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Provide helpful error messages and suggestions
pub fn format_error_with_suggestions(error: &CliError) -> String {
    let mut message = error.to_string();

    match error {
        CliError::FileNotFound { path } => {
            message.push_str(&format!(
                "\n\nSuggestions:\n\
                 • Check that the file path is correct: {}\n\
                 • Ensure you have read permissions for the file",
                path.display()
            ));
        }

        CliError::InvalidInput { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Input files hold a base string, its indices one per line, then the second base string and its indices\n\
                 • Indices must be non-negative integers",
            );
        }

        CliError::Alignment(AlignError::UnknownSymbol { .. }) => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Every symbol must belong to the alphabet in the [scoring] section\n\
                 • FASTA input is upper-cased; other inputs are used as given",
            );
        }

        CliError::Config { .. } | CliError::Alignment(AlignError::InvalidConfiguration(_)) => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Check your nwalign.toml configuration file\n\
                 • Use 'nwalign config --example' to generate a sample configuration\n\
                 • Substitution costs must be symmetric and non-negative, with every pair present",
            );
        }

        _ => {}
    }

    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = CliError::config("test message");
        assert!(matches!(err, CliError::Config { .. }));
        assert_eq!(err.to_string(), "Configuration error: test message");
    }

    #[test]
    fn test_error_suggestions() {
        let err = CliError::file_not_found(PathBuf::from("input1.txt"));
        let formatted = format_error_with_suggestions(&err);
        assert!(formatted.contains("Suggestions:"));
        assert!(formatted.contains("Check that the file path is correct"));
    }

    #[test]
    fn test_unknown_symbol_suggestion() {
        let err: CliError = AlignError::UnknownSymbol { symbol: b'N', position: Some(0) }.into();
        let formatted = format_error_with_suggestions(&err);
        assert!(formatted.starts_with("Alignment error: Unknown symbol 'N' at position 0"));
        assert!(formatted.contains("[scoring]"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: CliError = io_err.into();
        assert!(matches!(cli_err, CliError::Io { .. }));
    }

    #[test]
    fn test_generator_error_conversion() {
        let err: CliError = GeneratorError::Parse { line: 3, message: "expected an index".to_string() }.into();
        assert!(matches!(err, CliError::InvalidInput { .. }));
    }
}
