//! Async API for non-blocking file cleaning.
//!
//! Enable the `async` feature to use these APIs:
//!
//! ```toml
//! [dependencies]
//! tigrinya-cleaner = { version = "0.1", features = ["async"] }
//! ```
//!
//! Only the file I/O is asynchronous. Cleaning is CPU-bound and runs on the
//! blocking pool.

use crate::cleanup::TextCleaner;
use crate::error::{Error, Result};
use crate::output::{CleanOutcome, OutputTarget};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Asynchronously reads a UTF-8 text file and cleans it.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> tigrinya_cleaner::Result<()> {
/// use std::sync::Arc;
/// use tigrinya_cleaner::TextCleaner;
///
/// let cleaner = Arc::new(TextCleaner::default());
/// let text = tigrinya_cleaner::async_api::clean_file("corpus.txt", cleaner).await?;
/// println!("{}", text);
/// # Ok(())
/// # }
/// ```
pub async fn clean_file(path: impl AsRef<Path>, cleaner: Arc<TextCleaner>) -> Result<String> {
    let data = fs::read(path).await?;
    let text = String::from_utf8(data)?;
    clean_text(text, cleaner).await
}

/// Asynchronously reads all text from an async reader and cleans it.
pub async fn clean_reader<R: AsyncRead + Unpin>(
    mut reader: R,
    cleaner: Arc<TextCleaner>,
) -> Result<String> {
    let mut text = String::new();
    reader.read_to_string(&mut text).await?;
    clean_text(text, cleaner).await
}

/// Cleans `text` on the blocking pool.
pub async fn clean_text(text: String, cleaner: Arc<TextCleaner>) -> Result<String> {
    tokio::task::spawn_blocking(move || cleaner.clean(&text))
        .await
        .map_err(|e| Error::Io(std::io::Error::other(e.to_string())))
}

/// Asynchronously writes `text` to `target`, creating the directory tree.
pub async fn save_text(text: &str, target: &OutputTarget) -> Result<PathBuf> {
    fs::create_dir_all(&target.dir).await?;

    let path = target.path();
    fs::write(&path, text).await?;

    tracing::info!(path = %path.display(), bytes = text.len(), "cleaned data saved");
    Ok(path)
}

/// Asynchronously cleans `text` and persists it to `target`.
///
/// The cleaned text is returned even if the write fails.
pub async fn clean_and_save(
    text: String,
    target: &OutputTarget,
    cleaner: Arc<TextCleaner>,
) -> Result<CleanOutcome> {
    let text = clean_text(text, cleaner).await?;
    let saved = save_text(&text, target).await;
    Ok(CleanOutcome { text, saved })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clean_reader() {
        let cleaner = Arc::new(TextCleaner::default());
        let input: &[u8] = "<p>ሠላም</p> 2024!".as_bytes();
        let text = clean_reader(input, cleaner).await.unwrap();
        assert_eq!(text, "ሰላም");
    }

    #[tokio::test]
    async fn test_clean_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let target = OutputTarget::new(dir.path().join("nested"), "cleaned_text.txt");
        let cleaner = Arc::new(TextCleaner::default());

        let outcome = clean_and_save("ፀሓይ abc".to_string(), &target, cleaner)
            .await
            .unwrap();
        assert_eq!(outcome.text, "ጸሓይ");
        let path = outcome.saved.unwrap();
        assert_eq!(fs::read_to_string(path).await.unwrap(), "ጸሓይ");
    }

    #[tokio::test]
    async fn test_clean_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = clean_file(dir.path().join("none.txt"), Arc::new(TextCleaner::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
