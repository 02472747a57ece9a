//! Cleaner configuration and JSON loading.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::{Path, PathBuf};

/// Default directory for persisted output.
pub const DEFAULT_OUTPUT_DIR: &str = "cleaned_data";

/// Default file name for persisted output.
pub const DEFAULT_OUTPUT_FILENAME: &str = "cleaned_text.txt";

/// Options controlling a [`TextCleaner`](crate::TextCleaner).
///
/// The JSON form is an object; every key is optional:
///
/// ```json
/// {
///   "output_dir": "cleaned_data",
///   "keep_punctuation": ["!"],
///   "preserve_words": ["health"]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CleanerConfig {
    /// Characters excluded from the punctuation-removal set.
    #[serde(default, deserialize_with = "deserialize_keep_punctuation")]
    pub keep_punctuation: Vec<char>,

    /// Tokens exempted from alphanumeric stripping (exact, case-sensitive).
    #[serde(default)]
    pub preserve_words: Vec<String>,

    /// Directory where cleaned output is written.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// File name of the cleaned output.
    #[serde(default)]
    pub output_filename: Option<String>,

    /// Keys not used by the cleaner, kept for other collaborators.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CleanerConfig {
    /// Creates a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a JSON file.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use tigrinya_cleaner::CleanerConfig;
    ///
    /// let config = CleanerConfig::from_file("config.json")?;
    /// println!("{} preserved words", config.preserve_words.len());
    /// # Ok::<(), tigrinya_cleaner::Error>(())
    /// ```
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }

        let data = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::ConfigNotFound(path.to_path_buf()),
            std::io::ErrorKind::InvalidData => {
                Error::ConfigParse(format!("{}: not valid UTF-8", path.display()))
            }
            _ => Error::Io(e),
        })?;

        Self::from_json_str(&data)
    }

    /// Parses configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the characters kept during punctuation removal.
    pub fn with_keep_punctuation(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.keep_punctuation = chars.into_iter().collect();
        self
    }

    /// Sets the preserved words.
    pub fn with_preserve_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preserve_words = words.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Sets the output file name.
    pub fn with_output_filename(mut self, filename: impl Into<String>) -> Self {
        self.output_filename = Some(filename.into());
        self
    }

    /// Output directory, falling back to [`DEFAULT_OUTPUT_DIR`].
    pub fn output_dir_or_default(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }

    /// Output file name, falling back to [`DEFAULT_OUTPUT_FILENAME`].
    pub fn output_filename_or_default(&self) -> String {
        self.output_filename
            .clone()
            .unwrap_or_else(|| DEFAULT_OUTPUT_FILENAME.to_string())
    }
}

/// Accepted JSON shapes for `keep_punctuation`.
#[derive(Deserialize)]
#[serde(untagged)]
enum KeepPunctuation {
    /// `["!", "?"]`: each element must be exactly one character.
    List(Vec<char>),
    /// `"!?"`: every character of the string is kept.
    Chars(String),
}

fn deserialize_keep_punctuation<'de, D>(deserializer: D) -> std::result::Result<Vec<char>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<KeepPunctuation>::deserialize(deserializer)?;
    Ok(match value {
        None => Vec::new(),
        Some(KeepPunctuation::List(chars)) => chars,
        Some(KeepPunctuation::Chars(s)) => s.chars().collect(),
    })
}
