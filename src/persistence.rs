// WHY: one JSON file per ebook, named by id, so reruns overwrite instead of duplicate

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use crate::error::{Error, Result};
use crate::gutenberg::extract_ebook_id;
use crate::metadata::BookMetadata;

/// Default directory for metadata records
pub const DEFAULT_OUTPUT_DIR: &str = "metadata";

/// Path of the metadata file for a record: `<output_dir>/<ebook_id>.metadata.json`
pub fn metadata_file_path(metadata: &BookMetadata, output_dir: &Path) -> Result<PathBuf> {
    let ebook_id = extract_ebook_id(&metadata.source_url).ok_or_else(|| Error::MissingEbookId {
        source_url: metadata.source_url.clone(),
    })?;
    Ok(output_dir.join(format!("{ebook_id}.metadata.json")))
}

/// Write `metadata` as pretty JSON, creating `output_dir` if needed
///
/// # Example
/// ```no_run
/// # async fn run() -> gutenberg_anchor::Result<()> {
/// use gutenberg_anchor::metadata::BookMetadata;
/// use gutenberg_anchor::persistence::save_metadata;
/// let record = BookMetadata::empty("https://www.gutenberg.org/ebooks/11", "offline");
/// let path = save_metadata(&record, "metadata").await?;
/// assert!(path.ends_with("11.metadata.json"));
/// # Ok(())
/// # }
/// ```
pub async fn save_metadata(metadata: &BookMetadata, output_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    let metadata_path = metadata_file_path(metadata, output_dir)?;

    fs::create_dir_all(output_dir)
        .await
        .map_err(|e| Error::io(output_dir, e))?;

    let content = serde_json::to_string_pretty(metadata)?;
    fs::write(&metadata_path, content)
        .await
        .map_err(|e| Error::io(&metadata_path, e))?;

    info!("Saved metadata to {}", metadata_path.display());
    Ok(metadata_path)
}

/// Read a previously saved metadata record
pub async fn load_metadata(path: impl AsRef<Path>) -> Result<BookMetadata> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).await.map_err(|e| Error::io(path, e))?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_file_path() {
        let record = BookMetadata::empty("https://www.gutenberg.org/ebooks/1342", "x");
        let path = metadata_file_path(&record, Path::new("out")).unwrap();
        assert_eq!(path, Path::new("out").join("1342.metadata.json"));
    }

    #[test]
    fn test_metadata_file_path_without_id() {
        let record = BookMetadata::empty("https://example.com/book", "x");
        let err = metadata_file_path(&record, Path::new("out")).unwrap_err();
        assert!(matches!(err, Error::MissingEbookId { .. }));
    }
}
