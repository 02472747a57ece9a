//! tigrinya-cleaner CLI - Clean Tigrinya text data
//!
//! A command-line tool for cleaning plain-text files and CSV columns.

use clap::{ArgAction, Parser};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tigrinya_cleaner::{
    batch, read_text, BatchOptions, CleanerConfig, OutputTarget, TextCleaner, DEFAULT_OUTPUT_DIR,
    DEFAULT_OUTPUT_FILENAME,
};
use tracing_subscriber::{filter::LevelFilter, fmt};

/// Clean Tigrinya text data
#[derive(Parser, Debug)]
#[command(
    name = "tigrinya-cleaner",
    version,
    about = "Clean Tigrinya text data",
    long_about = "tigrinya-cleaner - Cleaning and light normalization of Tigrinya text.\n\n\
                  Maps variant glyphs to canonical forms, strips HTML tags, punctuation,\n\
                  Latin letters and digits (except preserved words), and collapses whitespace.\n\n\
                  Usage:\n  \
                  tigrinya-cleaner <file.txt>                      Clean a text file\n  \
                  tigrinya-cleaner <file.csv> --csv-column text    Clean one CSV column"
)]
struct Cli {
    /// Path to the input text or CSV file
    input_file: PathBuf,

    /// Path to configuration file (JSON)
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Directory to save cleaned output (default: config `output_dir`, then cleaned_data)
    #[arg(short, long, visible_alias = "output_dir")]
    output_dir: Option<PathBuf>,

    /// Output filename (default: config `output_filename`, then cleaned_text.txt)
    #[arg(short, long)]
    filename: Option<String>,

    /// If input is CSV, specify which column to clean
    #[arg(long, visible_alias = "csv_column")]
    csv_column: Option<String>,

    /// Leave CSV cells that are not valid text unchanged instead of failing
    #[arg(long)]
    lenient: bool,

    /// Clean CSV rows on a single thread
    #[arg(long)]
    sequential: bool,

    /// Print cleaned text to stdout instead of writing a file
    #[arg(long, conflicts_with = "csv_column")]
    stdout: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(determine_log_level(&cli));

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn determine_log_level(cli: &Cli) -> LevelFilter {
    if cli.quiet {
        return LevelFilter::ERROR;
    }
    match cli.verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn init_tracing(level: LevelFilter) {
    let subscriber = fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::warn!("Tracing subscriber already set; skipping re-initialization.");
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // Configuration errors surface before any input is read
    let config = CleanerConfig::from_file(&cli.config)?;
    let cleaner = TextCleaner::new(&config);
    tracing::debug!(
        config = %cli.config.display(),
        preserve_words = config.preserve_words.len(),
        keep_punctuation = config.keep_punctuation.len(),
        "configuration loaded"
    );

    let target = resolve_target(&cli, &config);

    match (&cli.csv_column, is_csv(&cli.input_file)) {
        (Some(column), true) => run_csv(&cli, column, &target, &cleaner),
        (Some(column), false) => {
            tracing::warn!(
                column = %column,
                input = %cli.input_file.display(),
                "input is not a .csv file; treating it as plain text"
            );
            run_text(&cli, &target, &cleaner)
        }
        (None, _) => run_text(&cli, &target, &cleaner),
    }
}

fn run_text(
    cli: &Cli,
    target: &OutputTarget,
    cleaner: &TextCleaner,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = create_spinner("Cleaning text...");

    let text = read_text(&cli.input_file)?;

    if cli.stdout {
        let cleaned = cleaner.clean(&text);
        pb.finish_and_clear();

        let stdout = io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{}", cleaned)?;
        return Ok(());
    }

    let outcome = cleaner.clean_and_save(&text, target);
    pb.finish_and_clear();
    let path = outcome.saved?;

    tracing::info!(path = %path.display(), "cleaning finished");
    println!(
        "{} Cleaned text saved to {}",
        "✓".green().bold(),
        path.display()
    );
    println!(
        "{}: {} -> {} words",
        "Words".bold(),
        text.split_whitespace().count(),
        outcome.text.split_whitespace().count()
    );

    Ok(())
}

fn run_csv(
    cli: &Cli,
    column: &str,
    target: &OutputTarget,
    cleaner: &TextCleaner,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = create_spinner(&format!("Cleaning CSV column '{}'...", column));

    let mut options = BatchOptions::new();
    if cli.lenient {
        options = options.lenient();
    }
    if cli.sequential {
        options = options.sequential();
    }

    let summary = batch::clean_csv_file(&cli.input_file, column, target, cleaner, &options)?;
    pb.finish_and_clear();

    let path = summary.path.unwrap_or_else(|| target.path());
    println!(
        "{} Cleaned CSV saved to {}",
        "✓".green().bold(),
        path.display()
    );
    println!("{}: {}", "Rows".bold(), summary.rows);
    if summary.skipped > 0 {
        println!(
            "{} {} cells were not text and were left unchanged",
            "!".yellow().bold(),
            summary.skipped
        );
    }

    Ok(())
}

/// Output location: command-line flags win over the config file, which wins
/// over the built-in defaults.
fn resolve_target(cli: &Cli, config: &CleanerConfig) -> OutputTarget {
    let dir = cli
        .output_dir
        .clone()
        .or_else(|| config.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
    let filename = cli
        .filename
        .clone()
        .or_else(|| config.output_filename.clone())
        .unwrap_or_else(|| DEFAULT_OUTPUT_FILENAME.to_string());
    OutputTarget::new(dir, filename)
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tigrinya-cleaner").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_cli_parse() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["input.txt"]);
        assert_eq!(cli.config, PathBuf::from("config.json"));
        assert!(cli.output_dir.is_none());
        assert!(cli.csv_column.is_none());
        assert_eq!(determine_log_level(&cli), LevelFilter::INFO);
    }

    #[test]
    fn test_underscore_aliases() {
        let cli = parse(&["data.csv", "--csv_column", "text", "--output_dir", "out"]);
        assert_eq!(cli.csv_column.as_deref(), Some("text"));
        assert_eq!(cli.output_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_stdout_conflicts_with_csv() {
        let result =
            Cli::try_parse_from(["tigrinya-cleaner", "a.csv", "--csv-column", "x", "--stdout"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(determine_log_level(&parse(&["a", "-vv"])), LevelFilter::TRACE);
        assert_eq!(determine_log_level(&parse(&["a", "-q"])), LevelFilter::ERROR);
    }

    #[test]
    fn test_resolve_target_precedence() {
        let config = CleanerConfig::new()
            .with_output_dir("from_config")
            .with_output_filename("config.txt");

        let cli = parse(&["a.txt"]);
        assert_eq!(
            resolve_target(&cli, &config),
            OutputTarget::new("from_config", "config.txt")
        );

        let cli = parse(&["a.txt", "-o", "from_flag", "-f", "flag.txt"]);
        assert_eq!(
            resolve_target(&cli, &config),
            OutputTarget::new("from_flag", "flag.txt")
        );

        let cli = parse(&["a.txt"]);
        assert_eq!(
            resolve_target(&cli, &CleanerConfig::default()),
            OutputTarget::new(DEFAULT_OUTPUT_DIR, DEFAULT_OUTPUT_FILENAME)
        );
    }

    #[test]
    fn test_is_csv() {
        assert!(is_csv(Path::new("news.csv")));
        assert!(is_csv(Path::new("NEWS.CSV")));
        assert!(!is_csv(Path::new("news.txt")));
        assert!(!is_csv(Path::new("csv")));
    }

    #[test]
    fn test_run_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.json");
        fs::write(&config, r#"{"keep_punctuation": ["!"], "preserve_words": ["health"]}"#).unwrap();
        let input = dir.path().join("input.txt");
        fs::write(&input, "ርሑስ ሓድሽ ዓመት !! category health").unwrap();
        let out = dir.path().join("out");

        let cli = parse(&[
            input.to_str().unwrap(),
            "-c",
            config.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
        ]);
        run(cli).unwrap();

        let written = fs::read_to_string(out.join(DEFAULT_OUTPUT_FILENAME)).unwrap();
        assert_eq!(written, "ርሑስ ሓድሽ ዓመት !! health");
    }

    #[test]
    fn test_run_csv_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.json");
        fs::write(&config, "{}").unwrap();
        let input = dir.path().join("data.csv");
        fs::write(&input, "id,body\n1,ሰላም\n").unwrap();

        let cli = parse(&[
            input.to_str().unwrap(),
            "-c",
            config.to_str().unwrap(),
            "--csv-column",
            "text",
            "-o",
            dir.path().join("out").to_str().unwrap(),
        ]);
        let err = run(cli).unwrap_err();
        assert!(err.to_string().contains("Column 'text' not found"));
    }

    #[test]
    fn test_run_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let cli = parse(&[
            "input.txt",
            "-c",
            dir.path().join("missing.json").to_str().unwrap(),
        ]);
        let err = run(cli).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
