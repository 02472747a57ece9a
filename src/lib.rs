//! # tigrinya-cleaner
//!
//! Configurable cleaning and light normalization of Tigrinya text for corpus
//! preparation.
//!
//! The [`TextCleaner`] pipeline maps variant glyphs to canonical forms, strips
//! HTML tags, removes ASCII and Ethiopic punctuation, blanks Latin letters and
//! digits outside an allow-list of preserved words, and collapses whitespace.
//!
//! ## Quick Start
//!
//! ```
//! use tigrinya_cleaner::{CleanerConfig, TextCleaner};
//!
//! let config = CleanerConfig::from_json_str(r#"{"preserve_words": ["health"]}"#)?;
//! let cleaner = TextCleaner::new(&config);
//!
//! assert_eq!(cleaner.clean("ሠ testing 123 !!"), "ሰ");
//! assert_eq!(cleaner.clean("category health"), "health");
//! # Ok::<(), tigrinya_cleaner::Error>(())
//! ```
//!
//! ## Features
//!
//! - `async`: Async file I/O with Tokio

pub mod batch;
pub mod batch_options;
pub mod cleanup;
pub mod config;
pub mod error;
pub mod output;

#[cfg(feature = "async")]
pub mod async_api;

// Re-exports
pub use batch::{clean_all, clean_csv_column, clean_csv_file, CsvSummary};
pub use batch_options::{BatchOptions, ErrorMode};
pub use cleanup::{normalize_whitespace, remove_html_tags, TextCleaner};
pub use config::{CleanerConfig, DEFAULT_OUTPUT_DIR, DEFAULT_OUTPUT_FILENAME};
pub use error::{Error, Result};
pub use output::{clean_file, read_text, save_text, CleanOutcome, OutputTarget};

use std::path::Path;

/// Cleans `text` with a cleaner built from default settings.
///
/// Builds the lookup tables on every call; hold a [`TextCleaner`] when
/// cleaning more than one string.
///
/// # Example
///
/// ```
/// assert_eq!(tigrinya_cleaner::clean("<b>ሰላም</b> 2024"), "ሰላም");
/// ```
pub fn clean(text: &str) -> String {
    TextCleaner::default().clean(text)
}

/// Cleans `text` with a cleaner configured from a JSON file.
///
/// Configuration errors are returned before any cleaning happens.
///
/// # Example
///
/// ```no_run
/// let text = tigrinya_cleaner::clean_with_config("ርሑስ ሓድሽ ዓመት !!", "config.json")?;
/// println!("{}", text);
/// # Ok::<(), tigrinya_cleaner::Error>(())
/// ```
pub fn clean_with_config(text: &str, config_path: impl AsRef<Path>) -> Result<String> {
    let cleaner = TextCleaner::from_config_file(config_path)?;
    Ok(cleaner.clean(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_default() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("ሠ testing 123 !!"), "ሰ");
    }

    #[test]
    fn test_clean_with_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"keep_punctuation": ["!"]}"#).unwrap();

        let text = clean_with_config("ርሑስ ሓድሽ ዓመት !!", &path).unwrap();
        assert_eq!(text, "ርሑስ ሓድሽ ዓመት !!");
    }

    #[test]
    fn test_clean_with_missing_config() {
        let err = clean_with_config("ሰላም", "definitely/not/here.json").unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_sample_config_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config.json");
        let config = CleanerConfig::from_file(path).unwrap();
        assert_eq!(config.output_dir_or_default(), Path::new("cleaned_data"));

        let cleaner = TextCleaner::new(&config);
        assert_eq!(
            cleaner.clean("ርሑስ ሓድሽ ዓመት !! category health"),
            "ርሑስ ሓድሽ ዓመት !! health"
        );
    }
}
