//! Per-run settings for cleaning a CSV column.
//!
//! A table either comes out whole or not at all in [`ErrorMode::Strict`];
//! [`ErrorMode::Lenient`] trades that for a best-effort table where
//! undecodable cells pass through as raw bytes.

/// Settings for [`clean_csv_column`](crate::batch::clean_csv_column) and
/// [`clean_csv_file`](crate::batch::clean_csv_file).
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// What a cell that is not UTF-8 does to the run.
    pub error_mode: ErrorMode,

    /// Spread rows across the rayon pool. Output order is the same either way.
    pub parallel: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            parallel: true,
        }
    }
}

impl BatchOptions {
    /// Strict, parallel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy undecodable cells through and count them in
    /// [`CsvSummary::skipped`](crate::batch::CsvSummary::skipped).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Abort the table on the first undecodable cell.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Clean rows on the calling thread.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub fn is_lenient(&self) -> bool {
        self.error_mode == ErrorMode::Lenient
    }
}

/// Policy for a CSV cell whose bytes are not valid UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Return [`Error::InvalidArgument`](crate::Error::InvalidArgument); no
    /// table is written.
    #[default]
    Strict,
    /// Write the cell's original bytes and move on.
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_strict_and_parallel() {
        let options = BatchOptions::new();
        assert!(!options.is_lenient());
        assert!(options.parallel);
    }

    #[test]
    fn test_settings_chain() {
        let options = BatchOptions::new().lenient().sequential();
        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert!(!options.parallel);
        assert!(!options.strict().is_lenient());
    }
}
