use glob::glob;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// Configuration for file discovery behavior
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Glob pattern relative to the root directory
    pub pattern: String,
    /// Whether to fail on the first unreadable path or skip it
    pub fail_fast: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            pattern: "**/*.txt".to_string(),
            fail_fast: false,
        }
    }
}

/// Discover plain-text ebooks under `root_dir`, sorted by path
///
/// Only regular files are returned. Unreadable entries are skipped with a
/// warning unless `fail_fast` is set.
pub fn discover_text_files(root_dir: impl AsRef<Path>, config: &DiscoveryConfig) -> Result<Vec<PathBuf>> {
    let root_dir = root_dir.as_ref();
    let pattern = format!("{}/{}", root_dir.display(), config.pattern);
    debug!("Starting file discovery with pattern: {}", pattern);

    let mut files = Vec::new();
    for entry in glob(&pattern)? {
        match entry {
            Ok(path) if path.is_file() => {
                debug!("Found file: {}", path.display());
                files.push(path);
            }
            Ok(_) => {}
            Err(e) => {
                warn!("Glob iteration error: {}", e);
                if config.fail_fast {
                    let path = e.path().to_path_buf();
                    return Err(Error::io(path, e.into_error()));
                }
            }
        }
    }

    files.sort();
    info!("Discovered {} files under {}", files.len(), root_dir.display());
    Ok(files)
}
