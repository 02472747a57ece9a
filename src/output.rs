//! Text source and sink helpers.
//!
//! These sit outside the pipeline: reading input, persisting cleaned text and
//! reporting where it went. The pipeline itself never touches the filesystem.

use crate::cleanup::TextCleaner;
use crate::config::CleanerConfig;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Destination for persisted output: a directory plus a file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    /// Directory, created on write if missing.
    pub dir: PathBuf,
    /// File name inside `dir`.
    pub filename: String,
}

impl OutputTarget {
    /// Creates a target from a directory and file name.
    pub fn new(dir: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            filename: filename.into(),
        }
    }

    /// Target taken from a configuration's `output_dir`/`output_filename`.
    pub fn from_config(config: &CleanerConfig) -> Self {
        Self::new(config.output_dir_or_default(), config.output_filename_or_default())
    }

    /// Full path of the output file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.filename)
    }
}

/// Result of [`TextCleaner::clean_and_save`].
///
/// The cleaned text is available even when persisting it failed, so the
/// write can be retried without cleaning again.
#[derive(Debug)]
pub struct CleanOutcome {
    /// Cleaned text.
    pub text: String,
    /// Path written, or the write error.
    pub saved: Result<PathBuf>,
}

/// Writes `text` to `target`, creating the directory tree first.
pub fn save_text(text: &str, target: &OutputTarget) -> Result<PathBuf> {
    fs::create_dir_all(&target.dir)?;

    let path = target.path();
    fs::write(&path, text)?;

    tracing::info!(path = %path.display(), bytes = text.len(), "cleaned data saved");
    Ok(path)
}

/// Reads a UTF-8 text file.
///
/// Content that is not valid UTF-8 is rejected with
/// [`Error::InvalidArgument`](crate::Error::InvalidArgument).
pub fn read_text(path: impl AsRef<Path>) -> Result<String> {
    let data = fs::read(path)?;
    Ok(String::from_utf8(data)?)
}

/// Reads a UTF-8 text file and cleans it.
///
/// # Example
///
/// ```no_run
/// use tigrinya_cleaner::{clean_file, TextCleaner};
///
/// let cleaner = TextCleaner::from_config_file("config.json")?;
/// let text = clean_file("corpus.txt", &cleaner)?;
/// println!("{}", text);
/// # Ok::<(), tigrinya_cleaner::Error>(())
/// ```
pub fn clean_file(path: impl AsRef<Path>, cleaner: &TextCleaner) -> Result<String> {
    let text = read_text(path)?;
    Ok(cleaner.clean(&text))
}

impl TextCleaner {
    /// Cleans `text` and persists the result to `target`.
    pub fn clean_and_save(&self, text: &str, target: &OutputTarget) -> CleanOutcome {
        let text = self.clean(text);
        let saved = save_text(&text, target);
        CleanOutcome { text, saved }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_output_target_path() {
        let target = OutputTarget::new("cleaned_data", "cleaned_text.txt");
        assert_eq!(target.path(), Path::new("cleaned_data").join("cleaned_text.txt"));

        let target = OutputTarget::from_config(&CleanerConfig::default());
        assert_eq!(target, OutputTarget::new("cleaned_data", "cleaned_text.txt"));
    }

    #[test]
    fn test_save_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let target = OutputTarget::new(dir.path().join("a").join("b"), "out.txt");

        let path = save_text("ሰላም", &target).unwrap();
        assert_eq!(path, target.path());
        assert_eq!(fs::read_to_string(&path).unwrap(), "ሰላም");
    }

    #[test]
    fn test_clean_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let target = OutputTarget::new(dir.path(), "cleaned_text.txt");
        let cleaner = TextCleaner::default();

        let outcome = cleaner.clean_and_save("<b>ሰላም</b> 2024", &target);
        assert_eq!(outcome.text, "ሰላም");
        let path = outcome.saved.unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "ሰላም");
    }

    #[test]
    fn test_clean_and_save_failure_keeps_text() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();

        let cleaner = TextCleaner::default();
        let outcome = cleaner.clean_and_save("ሠ testing", &OutputTarget::new(&blocker, "x.txt"));
        assert_eq!(outcome.text, "ሰ");
        assert!(matches!(outcome.saved, Err(Error::Io(_))));
    }

    #[test]
    fn test_clean_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.txt");
        fs::write(&input, "ሠላም! hello\n").unwrap();

        let text = clean_file(&input, &TextCleaner::default()).unwrap();
        assert_eq!(text, "ሰላም");
    }

    #[test]
    fn test_clean_file_rejects_binary() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.bin");
        fs::write(&input, [0xFF, 0xFE, 0x00, 0xC3]).unwrap();

        let err = clean_file(&input, &TextCleaner::default()).unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
