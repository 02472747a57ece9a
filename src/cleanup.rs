//! # Cleaning Pipeline
//!
//! A 5-stage pipeline for sanitizing Tigrinya text before NLP training.
//!
//! ## Pipeline Stages
//!
//! 1. **Stage 1: Character Normalization** - Variant glyphs mapped to canonical forms
//! 2. **Stage 2: HTML Tag Removal** - Shortest `<...>` spans deleted
//! 3. **Stage 3: Punctuation Sanitization** - ASCII and Ethiopic punctuation replaced by spaces
//! 4. **Stage 4: Alphanumeric Stripping** - Latin letters and digits blanked outside preserved words
//! 5. **Stage 5: Whitespace Normalization** - Whitespace runs collapsed, ends trimmed
//!
//! The stages always run in this order; each one consumes the previous output.

use crate::config::CleanerConfig;
use crate::error::Result;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::LazyLock;

// ============================================================================
// Stage 1: Character Normalization
// ============================================================================

/// Variant glyph to canonical glyph table.
///
/// The ሠ series collapses onto ሰ and the ፀ series onto ጸ.
pub const CHAR_EQUIVALENCES: &[(char, char)] = &[
    ('ሠ', 'ሰ'),
    ('ሡ', 'ሱ'),
    ('ሢ', 'ሲ'),
    ('ሣ', 'ሳ'),
    ('ሤ', 'ሴ'),
    ('ሥ', 'ስ'),
    ('ሦ', 'ሶ'),
    ('ፀ', 'ጸ'),
    ('ፁ', 'ጹ'),
    ('ፂ', 'ጺ'),
    ('ፃ', 'ጻ'),
    ('ፄ', 'ጼ'),
    ('ፅ', 'ጽ'),
    ('ፆ', 'ጾ'),
];

// ============================================================================
// Stage 2: HTML Tag Removal
// ============================================================================

/// Shortest `<...>` span on a single line. Not an HTML parser: any bracketed
/// span is treated as a tag and entities are left alone.
static RE_HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.*?>").unwrap());

/// Stage 2: delete every shortest `<...>` span.
///
/// Literal comparisons such as `a < b > c` lose the enclosed span.
pub fn remove_html_tags(input: &str) -> String {
    RE_HTML_TAG.replace_all(input, "").into_owned()
}

// ============================================================================
// Stage 3: Punctuation Sanitization
// ============================================================================

/// Script-specific punctuation removed alongside ASCII punctuation.
pub const ETHIOPIC_PUNCTUATION: &[char] = &[
    '።', // Full stop
    '፡', // Wordspace
    '፣', // Comma
    '፤', // Semicolon
    '፧', // Question mark
    '፥', // Colon
    '፦', // Preface colon
    '“', // Typographic quotes
    '”',
    '‘',
    '’',
    '…', // Ellipsis
    '•', // Bullet
];

/// Builds the effective punctuation set: ASCII punctuation and
/// [`ETHIOPIC_PUNCTUATION`], minus the kept characters.
fn build_punctuation_set(keep: &[char]) -> HashSet<char> {
    (0u8..=0x7F)
        .map(char::from)
        .filter(char::is_ascii_punctuation)
        .chain(ETHIOPIC_PUNCTUATION.iter().copied())
        .filter(|c| !keep.contains(c))
        .collect()
}

// ============================================================================
// Stage 5: Whitespace Normalization
// ============================================================================

static RE_WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\x1C-\x1F]+").unwrap());

/// Returns true for characters that separate words: Unicode `White_Space`
/// plus the ASCII information separators U+001C..=U+001F.
pub fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1C}'..='\u{1F}').contains(&c)
}

/// Stage 5: collapse every whitespace run into one space and trim the ends.
pub fn normalize_whitespace(input: &str) -> String {
    RE_WHITESPACE_RUN
        .replace_all(input, " ")
        .trim_matches(is_separator)
        .to_string()
}

// ============================================================================
// Main Pipeline
// ============================================================================

/// The configured cleaning pipeline.
///
/// All lookup tables are built once in [`TextCleaner::new`] and never change
/// afterwards, so one cleaner can be shared across threads and `clean` can be
/// called concurrently without locking.
///
/// # Example
///
/// ```
/// use tigrinya_cleaner::{CleanerConfig, TextCleaner};
///
/// let cleaner = TextCleaner::new(&CleanerConfig::default());
/// assert_eq!(cleaner.clean("<b>ሰላም</b> 2024"), "ሰላም");
/// ```
#[derive(Debug, Clone)]
pub struct TextCleaner {
    char_map: HashMap<char, char>,
    punctuation: HashSet<char>,
    preserve_words: HashSet<String>,
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self::new(&CleanerConfig::default())
    }
}

impl TextCleaner {
    /// Builds a cleaner from a configuration.
    pub fn new(config: &CleanerConfig) -> Self {
        Self {
            char_map: CHAR_EQUIVALENCES.iter().copied().collect(),
            punctuation: build_punctuation_set(&config.keep_punctuation),
            preserve_words: config.preserve_words.iter().cloned().collect(),
        }
    }

    /// Loads a JSON configuration file and builds a cleaner from it.
    ///
    /// Fails with [`Error::ConfigNotFound`](crate::Error::ConfigNotFound) or
    /// [`Error::ConfigParse`](crate::Error::ConfigParse) before anything is cleaned.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        let config = CleanerConfig::from_file(path)?;
        Ok(Self::new(&config))
    }

    /// Runs all five stages over `text`.
    ///
    /// Total over all strings; the result may be empty.
    pub fn clean(&self, text: &str) -> String {
        let text = self.normalize_chars(text);
        let text = remove_html_tags(&text);
        let text = self.sanitize_punctuation(&text);
        let text = self.remove_alphanumeric(&text);
        normalize_whitespace(&text)
    }

    /// Stage 1: replace mapped glyphs with their canonical forms.
    pub fn normalize_chars(&self, input: &str) -> String {
        input.chars().map(|c| self.canonical_char(c)).collect()
    }

    /// Stage 2: see [`remove_html_tags`].
    pub fn remove_html_tags(&self, input: &str) -> String {
        remove_html_tags(input)
    }

    /// Stage 3: replace each punctuation character with a space, then trim.
    pub fn sanitize_punctuation(&self, input: &str) -> String {
        let sanitized: String = input
            .chars()
            .map(|c| if self.punctuation.contains(&c) { ' ' } else { c })
            .collect();
        sanitized.trim_matches(is_separator).to_string()
    }

    /// Stage 4: blank ASCII letters and digits in every token that is not a
    /// preserved word. Tokens are rejoined with single spaces.
    pub fn remove_alphanumeric(&self, input: &str) -> String {
        input
            .split(is_separator)
            .filter(|word| !word.is_empty())
            .map(|word| {
                if self.preserve_words.contains(word) {
                    word.to_string()
                } else {
                    word.chars()
                        .map(|c| if c.is_ascii_alphanumeric() { ' ' } else { c })
                        .collect()
                }
            })
            .collect::<Vec<String>>()
            .join(" ")
    }

    /// Stage 5: see [`normalize_whitespace`].
    pub fn normalize_whitespace(&self, input: &str) -> String {
        normalize_whitespace(input)
    }

    /// Canonical form of `c`; identity for unmapped characters.
    pub fn canonical_char(&self, c: char) -> char {
        self.char_map.get(&c).copied().unwrap_or(c)
    }

    /// Effective punctuation set, sorted by code point.
    pub fn punctuation(&self) -> Vec<char> {
        let mut chars: Vec<char> = self.punctuation.iter().copied().collect();
        chars.sort_unstable();
        chars
    }

    /// Returns true if `c` is removed by stage 3.
    pub fn is_punctuation(&self, c: char) -> bool {
        self.punctuation.contains(&c)
    }

    /// Preserved words, sorted.
    pub fn preserve_words(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.preserve_words.iter().map(String::as_str).collect();
        words.sort_unstable();
        words
    }

    /// Returns true if `word` is exempt from stage 4.
    pub fn is_preserved(&self, word: &str) -> bool {
        self.preserve_words.contains(word)
    }
}
