use memmap2::MmapOptions;
use std::path::Path;
use std::time::Instant;
use tokio::fs;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Configuration for text file reading
#[derive(Debug, Clone, Default)]
pub struct ReaderConfig {
    /// Use memory-mapped I/O instead of async buffered reads
    pub use_mmap: bool,
}

/// Statistics for one read
#[derive(Debug, Clone)]
pub struct ReadStats {
    pub file_path: String,
    pub bytes_read: u64,
    pub duration_ms: u64,
}

/// Read a whole text file, byte-for-byte, as UTF-8
///
/// Line endings are preserved: anchor offsets index into exactly this string.
pub async fn read_text<P: AsRef<Path>>(file_path: P, config: &ReaderConfig) -> Result<(String, ReadStats)> {
    let path = file_path.as_ref();
    let start_time = Instant::now();

    debug!("Reading {} (mmap: {})", path.display(), config.use_mmap);

    let content = if config.use_mmap {
        let owned = path.to_path_buf();
        tokio::task::spawn_blocking(move || read_mmap(&owned))
            .await
            .map_err(|e| Error::io(path, std::io::Error::other(e)))??
    } else {
        let bytes = fs::read(path).await.map_err(|e| Error::io(path, e))?;
        String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8 {
            path: path.to_path_buf(),
        })?
    };

    let stats = ReadStats {
        file_path: path.display().to_string(),
        bytes_read: content.len() as u64,
        duration_ms: start_time.elapsed().as_millis() as u64,
    };

    info!(
        "Read {}: {} bytes in {}ms",
        stats.file_path, stats.bytes_read, stats.duration_ms
    );

    Ok((content, stats))
}

/// Convenience function for reading with default configuration
pub async fn read_text_async<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let (content, _stats) = read_text(file_path, &ReaderConfig::default()).await?;
    Ok(content)
}

fn read_mmap(path: &Path) -> Result<String> {
    let file = std::fs::File::open(path).map_err(|e| Error::io(path, e))?;
    let len = file.metadata().map_err(|e| Error::io(path, e))?.len();
    // Zero-length mappings are rejected on some platforms
    if len == 0 {
        return Ok(String::new());
    }

    // SAFETY: the mapping is read once and copied out before the file handle drops
    let mmap = unsafe { MmapOptions::new().map(&file) }.map_err(|e| Error::io(path, e))?;
    let text = std::str::from_utf8(&mmap).map_err(|_| Error::InvalidUtf8 { path: path.to_path_buf() })?;
    Ok(text.to_string())
}
