//! Error types for tigrinya-cleaner.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for tigrinya-cleaner operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while reading input or persisting output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The configuration file does not exist.
    #[error("Config file {} not found", .0.display())]
    ConfigNotFound(PathBuf),

    /// The configuration could not be parsed.
    #[error("Invalid configuration: {0}")]
    ConfigParse(String),

    /// The caller supplied an input that is not text.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The designated CSV column is not in the header row.
    #[error("Column '{0}' not found in CSV file")]
    ColumnNotFound(String),

    /// CSV reading or writing error.
    #[error("CSV error: {0}")]
    Csv(String),
}

impl Error {
    /// Returns true for errors raised while obtaining the configuration.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Error::ConfigNotFound(_) | Error::ConfigParse(_))
    }

    /// Returns true for caller contract violations.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_) | Error::ColumnNotFound(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigParse(err.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Error::InvalidArgument(format!("input is not valid UTF-8 text: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert!(Error::ConfigNotFound(PathBuf::from("config.json")).is_configuration_error());
        assert!(Error::ConfigParse("bad".into()).is_configuration_error());
        assert!(!Error::InvalidArgument("x".into()).is_configuration_error());
        assert!(Error::ColumnNotFound("text".into()).is_invalid_argument());
    }

    #[test]
    fn test_error_messages() {
        let err = Error::ConfigNotFound(PathBuf::from("missing.json"));
        assert_eq!(err.to_string(), "Config file missing.json not found");

        let err = Error::ColumnNotFound("body".into());
        assert_eq!(err.to_string(), "Column 'body' not found in CSV file");
    }
}
