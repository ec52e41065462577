// Metadata parsing, graceful fetch failure and JSON persistence
// WHY: the fetch step must never raise; persistence must round-trip the record

use gutenberg_anchor::metadata::{parse_metadata_page, BookMetadata, FetchConfig, MetadataFetcher};
use gutenberg_anchor::persistence::{load_metadata, metadata_file_path, save_metadata};
use gutenberg_anchor::Error;
use std::time::Duration;

#[path = "integration/mod.rs"]
mod test_utils;
use test_utils::fixtures::EBOOK_PAGE_HTML;
use test_utils::TestFixture;

const PAGE_URL: &str = "https://www.gutenberg.org/ebooks/11";

#[test]
fn test_parse_ebook_page() {
    let record = parse_metadata_page(EBOOK_PAGE_HTML, PAGE_URL);

    assert_eq!(record.title.as_deref(), Some("Alice's Adventures in Wonderland"));
    assert_eq!(record.author.as_deref(), Some("Carroll, Lewis"));
    assert_eq!(record.language.as_deref(), Some("English"));
    assert_eq!(record.ebook_no.as_deref(), Some("11"));
    assert_eq!(record.publication_date.as_deref(), Some("1865"));
    assert_eq!(
        record.subjects,
        Some(vec![
            "Fantasy fiction".to_string(),
            "Children's stories".to_string(),
            "Imaginary places -- Juvenile fiction".to_string(),
        ])
    );
    assert_eq!(record.genre.as_deref(), Some("Fantasy fiction"));
    assert_eq!(record.source_url, PAGE_URL);
    assert!(record.error.is_none());
}

#[test]
fn test_parse_page_without_subjects() {
    let html = r#"<table id="about_book_table"><tr><th>Title</th><td>Untitled</td></tr></table>"#;
    let record = parse_metadata_page(html, PAGE_URL);

    assert_eq!(record.title.as_deref(), Some("Untitled"));
    assert_eq!(record.subjects, None);
    assert_eq!(record.genre, None);
    assert_eq!(record.author, None);
    assert_eq!(record.publication_date, None);
}

#[tokio::test]
async fn test_unreachable_url_degrades_to_error_record() {
    let config = FetchConfig {
        timeout: Duration::from_secs(5),
        ..Default::default()
    };
    let fetcher = MetadataFetcher::new(config).expect("client should build");
    let url = "http://127.0.0.1:9/ebooks/11";

    let record = fetcher.fetch(url).await;

    assert_eq!(record.source_url, url);
    assert!(record.error.as_deref().is_some_and(|e| !e.is_empty()));
    assert_eq!(record.title, None);
    assert_eq!(record.author, None);
    assert_eq!(record.language, None);
    assert_eq!(record.publication_date, None);
    assert_eq!(record.ebook_no, None);
    assert_eq!(record.subjects, None);
    assert_eq!(record.genre, None);
}

#[tokio::test]
async fn test_fetch_many_preserves_order() {
    let fetcher = MetadataFetcher::new(FetchConfig {
        timeout: Duration::from_secs(5),
        concurrency: 2,
        ..Default::default()
    })
    .unwrap();
    let urls = vec![
        "http://127.0.0.1:9/ebooks/1".to_string(),
        "http://127.0.0.1:9/ebooks/2".to_string(),
        "http://127.0.0.1:9/ebooks/3".to_string(),
    ];

    let records = fetcher.fetch_many(&urls, None).await;
    let sources: Vec<&str> = records.iter().map(|r| r.source_url.as_str()).collect();
    assert_eq!(sources, vec![urls[0].as_str(), urls[1].as_str(), urls[2].as_str()]);
    assert!(records.iter().all(BookMetadata::is_error));
}

#[tokio::test]
async fn test_save_and_load_metadata() {
    let fixture = TestFixture::new();
    let record = parse_metadata_page(EBOOK_PAGE_HTML, PAGE_URL);

    let path = save_metadata(&record, fixture.metadata_dir()).await.unwrap();
    assert_eq!(path, fixture.metadata_dir().join("11.metadata.json"));
    assert!(path.exists());

    let content = std::fs::read_to_string(&path).unwrap();
    // pretty printed, no error key on success
    assert!(content.contains("\n  \"title\": \"Alice's Adventures in Wonderland\""));
    assert!(!content.contains("\"error\""));

    let loaded = load_metadata(&path).await.unwrap();
    assert_eq!(loaded, record);
}

#[tokio::test]
async fn test_save_error_record_from_file_url() {
    let fixture = TestFixture::new();
    let record = BookMetadata::empty("https://www.gutenberg.org/cache/epub/84/pg84.txt", "timed out");

    let path = save_metadata(&record, fixture.metadata_dir()).await.unwrap();
    assert!(path.ends_with("84.metadata.json"));

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert!(json["title"].is_null());
    assert_eq!(json["error"], "timed out");
}

#[tokio::test]
async fn test_save_without_ebook_id_fails() {
    let fixture = TestFixture::new();
    let record = BookMetadata::empty("https://example.com/not-gutenberg", "x");

    let result = save_metadata(&record, fixture.metadata_dir()).await;
    assert!(matches!(result, Err(Error::MissingEbookId { .. })));
    assert!(!fixture.metadata_dir().exists(), "directory is only created for valid records");
    assert!(metadata_file_path(&record, &fixture.metadata_dir()).is_err());
}
