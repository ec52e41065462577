// WHY: batch anchor reports let a whole mirror be checked for books whose
// boilerplate markers cannot be located

use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::anchor::{locate_anchor, AnchorKind, AnchorMatch};
use crate::reader::{read_text, ReaderConfig};

/// Anchor positions found in one file, in characters
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AnchorReport {
    pub path: String,
    /// `-1` when the start marker is missing
    pub start_offset: i64,
    pub start_len: usize,
    /// `-1` when the end marker is missing
    pub end_offset: i64,
    pub end_len: usize,
    /// Characters between the end of the start marker and the end marker
    pub body_chars: Option<usize>,
    pub error: Option<String>,
}

impl AnchorReport {
    /// Report for already loaded text
    pub fn from_text(path: &Path, text: &str, start_marker: &str, end_marker: &str) -> Self {
        let start = locate_anchor(text, start_marker, AnchorKind::Start);
        let end = locate_anchor(text, end_marker, AnchorKind::End);
        let body_chars = match (start, end) {
            (Some(s), Some(e)) => e.char_offset.checked_sub(s.char_offset + s.char_len),
            _ => None,
        };
        let (start_offset, start_len) = AnchorMatch::as_pair(start);
        let (end_offset, end_len) = AnchorMatch::as_pair(end);

        Self {
            path: path.display().to_string(),
            start_offset,
            start_len,
            end_offset,
            end_len,
            body_chars,
            error: None,
        }
    }

    fn failed(path: &Path, error: String) -> Self {
        Self {
            path: path.display().to_string(),
            start_offset: -1,
            start_len: 0,
            end_offset: -1,
            end_len: 0,
            body_chars: None,
            error: Some(error),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.body_chars.is_some()
    }
}

/// Markers and limits for a scan
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub start_marker: String,
    pub end_marker: String,
    pub concurrency: usize,
    pub reader: ReaderConfig,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            start_marker: crate::anchor::GUTENBERG_START_MARKER.to_string(),
            end_marker: crate::anchor::GUTENBERG_END_MARKER.to_string(),
            concurrency: num_cpus::get(),
            reader: ReaderConfig::default(),
        }
    }
}

/// Locate start and end markers in every file; read failures become error reports
pub async fn scan_files(files: &[PathBuf], config: &ScanConfig, progress: Option<&ProgressBar>) -> Vec<AnchorReport> {
    stream::iter(files)
        .map(|path| scan_file(path, config))
        .buffered(config.concurrency.max(1))
        .inspect(|_| {
            if let Some(pb) = progress {
                pb.inc(1);
            }
        })
        .collect()
        .await
}

async fn scan_file(path: &Path, config: &ScanConfig) -> AnchorReport {
    match read_text(path, &config.reader).await {
        Ok((text, _stats)) => {
            let start_marker = config.start_marker.clone();
            let end_marker = config.end_marker.clone();
            let owned_path = path.to_path_buf();
            // Locating is CPU-bound on large books
            tokio::task::spawn_blocking(move || {
                AnchorReport::from_text(&owned_path, &text, &start_marker, &end_marker)
            })
            .await
            .unwrap_or_else(|e| AnchorReport::failed(path, e.to_string()))
        }
        Err(e) => {
            warn!("Scan failed for {}: {}", path.display(), e);
            AnchorReport::failed(path, e.to_string())
        }
    }
}
