use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use gutenberg_anchor::anchor::{
    extract_between, extract_gutenberg_body, locate_anchor, AnchorKind, AnchorMatch,
    GUTENBERG_END_MARKER, GUTENBERG_START_MARKER,
};
use gutenberg_anchor::credentials::{ApiConfig, DEFAULT_ENV_FILE, DEFAULT_KEY_VAR};
use gutenberg_anchor::discovery::{discover_text_files, DiscoveryConfig};
use gutenberg_anchor::gutenberg::{plaintext_url, resolve_page_url};
use gutenberg_anchor::metadata::{FetchConfig, MetadataFetcher};
use gutenberg_anchor::persistence::{save_metadata, DEFAULT_OUTPUT_DIR};
use gutenberg_anchor::reader::{read_text, ReaderConfig};
use gutenberg_anchor::scan::{scan_files, ScanConfig};

#[derive(Parser, Debug)]
#[command(name = "gutenberg-anchor")]
#[command(about = "Project Gutenberg metadata fetcher and whitespace-tolerant anchor locator")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch bibliographic metadata and save one JSON file per ebook
    Metadata {
        /// Ebook ids or bibliographic page URLs
        #[arg(required = true)]
        ebooks: Vec<String>,

        /// Directory for <ebook_id>.metadata.json files
        #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        /// Maximum concurrent requests (defaults to CPU count)
        #[arg(long)]
        concurrency: Option<usize>,

        /// Per-request timeout in seconds
        #[arg(long, default_value_t = 15)]
        timeout_secs: u64,

        /// Suppress console progress bars
        #[arg(long)]
        no_progress: bool,
    },

    /// Print the plain-text download URL for an ebook id
    Url { ebook_id: String },

    /// Locate a marker in a text file and print its offset and length
    Locate {
        file: PathBuf,

        /// Marker text
        #[arg(long, conflicts_with = "marker_file", required_unless_present = "marker_file")]
        marker: Option<String>,

        /// Read the marker from a file
        #[arg(long)]
        marker_file: Option<PathBuf>,

        /// Treat the marker as an end anchor (last occurrence)
        #[arg(long)]
        end: bool,

        /// Use memory-mapped I/O instead of async buffered
        #[arg(long)]
        use_mmap: bool,
    },

    /// Print the text between a start and an end anchor
    Extract {
        file: PathBuf,

        /// Start marker (defaults to the Gutenberg START marker line)
        #[arg(long)]
        start: Option<String>,

        /// End marker (defaults to the Gutenberg END marker line)
        #[arg(long)]
        end: Option<String>,

        #[arg(long)]
        use_mmap: bool,
    },

    /// Report Gutenberg start/end anchor positions for every text file under a directory
    Scan {
        root_dir: PathBuf,

        /// Glob pattern relative to the root directory
        #[arg(long, default_value = "**/*.txt")]
        pattern: String,

        /// Abort on first unreadable path
        #[arg(long)]
        fail_fast: bool,

        #[arg(long)]
        no_progress: bool,
    },

    /// Check that the API credential file can be found and holds a key
    CheckCredentials {
        #[arg(long, default_value = DEFAULT_ENV_FILE)]
        env_file: String,

        #[arg(long, default_value = DEFAULT_KEY_VAR)]
        key: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // WHY: structured JSON logging keeps stdout free for command output
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = Args::parse();
    info!(?args, "Parsed CLI arguments");

    match args.command {
        Command::Metadata {
            ebooks,
            output_dir,
            concurrency,
            timeout_secs,
            no_progress,
        } => {
            let mut config = FetchConfig {
                timeout: Duration::from_secs(timeout_secs),
                ..Default::default()
            };
            if let Some(concurrency) = concurrency {
                config.concurrency = concurrency;
            }
            run_metadata(&ebooks, &output_dir, config, no_progress).await
        }
        Command::Url { ebook_id } => {
            println!("{}", plaintext_url(&ebook_id));
            Ok(())
        }
        Command::Locate {
            file,
            marker,
            marker_file,
            end,
            use_mmap,
        } => {
            let marker = match (marker, marker_file) {
                (Some(marker), _) => marker,
                (None, Some(path)) => tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("Failed to read marker file {}", path.display()))?,
                (None, None) => anyhow::bail!("Either --marker or --marker-file is required"),
            };
            let (text, _) = read_text(&file, &ReaderConfig { use_mmap }).await?;
            let kind = if end { AnchorKind::End } else { AnchorKind::Start };

            let (offset, length) = AnchorMatch::as_pair(locate_anchor(&text, &marker, kind));
            println!("{}", serde_json::json!({ "offset": offset, "length": length }));
            Ok(())
        }
        Command::Extract {
            file,
            start,
            end,
            use_mmap,
        } => {
            let (text, _) = read_text(&file, &ReaderConfig { use_mmap }).await?;
            let body = match (start, end) {
                (None, None) => extract_gutenberg_body(&text),
                (start, end) => extract_between(
                    &text,
                    start.as_deref().unwrap_or(GUTENBERG_START_MARKER),
                    end.as_deref().unwrap_or(GUTENBERG_END_MARKER),
                ),
            };
            let body = body.with_context(|| format!("Anchors not found in {}", file.display()))?;
            println!("{body}");
            Ok(())
        }
        Command::Scan {
            root_dir,
            pattern,
            fail_fast,
            no_progress,
        } => run_scan(root_dir, pattern, fail_fast, no_progress).await,
        Command::CheckCredentials { env_file, key } => {
            let api = ApiConfig::load(&env_file, &key)?;
            info!(env_file = %api.env_file.display(), "Credentials loaded");
            println!("{} found in {} ({})", key, api.env_file.display(), api.masked_key());
            Ok(())
        }
    }
}

async fn run_metadata(ebooks: &[String], output_dir: &Path, config: FetchConfig, no_progress: bool) -> Result<()> {
    let urls: Vec<String> = ebooks.iter().map(|e| resolve_page_url(e)).collect();
    let fetcher = MetadataFetcher::new(config)?;

    let progress = progress_bar(urls.len() as u64, no_progress);
    let records = fetcher.fetch_many(&urls, progress.as_ref()).await;
    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }

    let mut failures = 0;
    for record in &records {
        if record.is_error() {
            failures += 1;
        }
        // Error records are persisted too so a rerun can see what failed
        match save_metadata(record, output_dir).await {
            Ok(path) => println!("{}", path.display()),
            Err(e) => eprintln!("{}: {}", record.source_url, e),
        }
    }

    info!("Metadata complete: {} fetched, {} failed", records.len() - failures, failures);
    Ok(())
}

async fn run_scan(root_dir: PathBuf, pattern: String, fail_fast: bool, no_progress: bool) -> Result<()> {
    // WHY: validate root directory exists early to fail fast with clear error
    if !root_dir.is_dir() {
        anyhow::bail!("Root path is not a directory: {}", root_dir.display());
    }

    let files = discover_text_files(&root_dir, &DiscoveryConfig { pattern, fail_fast })?;
    let progress = progress_bar(files.len() as u64, no_progress);
    let reports = scan_files(&files, &ScanConfig::default(), progress.as_ref()).await;
    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }

    let complete = reports.iter().filter(|r| r.is_complete()).count();
    for report in &reports {
        println!("{}", serde_json::to_string(report)?);
    }

    info!("Scan complete: {} of {} files have both anchors", complete, reports.len());
    Ok(())
}

fn progress_bar(len: u64, hidden: bool) -> Option<ProgressBar> {
    if hidden {
        return None;
    }
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    Some(pb)
}
