// WHY: metadata scraping never fails the pipeline; a broken page becomes an
// error record that still carries its source URL

use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use regex_automata::meta::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::Result;

/// Configuration for metadata fetching
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Per-request timeout
    pub timeout: Duration,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Maximum number of pages fetched at once
    pub concurrency: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            user_agent: format!("gutenberg-anchor/{}", env!("CARGO_PKG_VERSION")),
            concurrency: num_cpus::get(),
        }
    }
}

/// Bibliographic record for one ebook
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BookMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub language: Option<String>,
    pub publication_date: Option<String>,
    pub ebook_no: Option<String>,
    /// Deduplicated, in page order
    pub subjects: Option<Vec<String>>,
    pub genre: Option<String>,
    pub source_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BookMetadata {
    /// Record with every bibliographic field absent and an error message
    pub fn empty(source_url: &str, error: impl Into<String>) -> Self {
        Self {
            title: None,
            author: None,
            language: None,
            publication_date: None,
            ebook_no: None,
            subjects: None,
            genre: None,
            source_url: source_url.to_string(),
            error: Some(error.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Genre keywords in priority order
const GENRE_KEYWORDS: &[&str] = &[
    "fiction",
    "novel",
    "poetry",
    "drama",
    "science fiction",
    "fantasy",
    "mystery",
    "detective",
    "horror",
    "romance",
    "children",
    "biography",
    "historical",
    "adventure",
    "satire",
];

static TABLE_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table#about_book_table").expect("valid selector"));
static ROW_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("valid selector"));
static TH_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th").expect("valid selector"));
static TD_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").expect("valid selector"));
static SUBJECT_LINK_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.block").expect("valid selector"));
static SUMMARY_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.summary-text-container").expect("valid selector"));

static AUTHOR_LIFESPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*\d{4}-\d{4}$").expect("valid lifespan pattern"));
static PUBLISHED_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(?:first\s+)?published\s+in\s+(\d{4})",
        r"(?i)(?:originally\s+)?published\s+in\s+(\d{4})",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid publication pattern"))
    .collect()
});

/// HTTP fetcher for Gutenberg bibliographic pages
pub struct MetadataFetcher {
    client: reqwest::Client,
    config: FetchConfig,
}

impl MetadataFetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client, config })
    }

    /// Fetch and parse one ebook page; failures come back as error records
    pub async fn fetch(&self, ebook_url: &str) -> BookMetadata {
        debug!("Fetching metadata page: {}", ebook_url);
        match self.fetch_page(ebook_url).await {
            Ok(html) => parse_metadata_page(&html, ebook_url),
            Err(e) => {
                warn!("Metadata fetch failed for {}: {}", ebook_url, e);
                BookMetadata::empty(ebook_url, e.to_string())
            }
        }
    }

    /// Fetch several pages concurrently, preserving input order
    pub async fn fetch_many(&self, urls: &[String], progress: Option<&ProgressBar>) -> Vec<BookMetadata> {
        stream::iter(urls)
            .map(|url| self.fetch(url))
            .buffered(self.config.concurrency.max(1))
            .inspect(|_| {
                if let Some(pb) = progress {
                    pb.inc(1);
                }
            })
            .collect()
            .await
    }

    async fn fetch_page(&self, url: &str) -> std::result::Result<String, reqwest::Error> {
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

/// Parse a Gutenberg bibliographic page
pub fn parse_metadata_page(html: &str, source_url: &str) -> BookMetadata {
    let document = Html::parse_document(html);

    let Some(table) = document.select(&TABLE_SEL).next() else {
        warn!("Bibliographic table missing on {}", source_url);
        return BookMetadata::empty(
            source_url,
            "Bibliographic table not found; page structure may be non-standard",
        );
    };

    let mut title = None;
    let mut author = None;
    let mut language = None;
    let mut ebook_no = None;
    let mut subjects = Vec::new();
    let mut seen = HashSet::new();

    for row in table.select(&ROW_SEL) {
        let (Some(th), Some(td)) = (row.select(&TH_SEL).next(), row.select(&TD_SEL).next()) else {
            continue;
        };
        let label = clean_text(&element_text(th)).to_lowercase();
        let value = clean_text(&element_text(td));

        match label.as_str() {
            "author" => author = Some(strip_lifespan(&value)),
            "title" => title = Some(value),
            "language" => language = Some(value),
            "ebook-no." => ebook_no = Some(value),
            "subject" => {
                if let Some(link) = td.select(&SUBJECT_LINK_SEL).next() {
                    let subject = clean_text(&element_text(link));
                    if seen.insert(subject.clone()) {
                        subjects.push(subject);
                    }
                }
            }
            _ => {}
        }
    }

    let publication_date = document
        .select(&SUMMARY_SEL)
        .next()
        .and_then(|summary| extract_publication_date(&element_text(summary)));

    let genre = choose_genre(&subjects);

    BookMetadata {
        title: non_empty(title),
        author: non_empty(author),
        language: non_empty(language),
        publication_date,
        ebook_no: non_empty(ebook_no),
        subjects: if subjects.is_empty() { None } else { Some(subjects) },
        genre,
        source_url: source_url.to_string(),
        error: None,
    }
}

/// Single genre-like label: first keyword hit, else first short subject, else first subject
pub fn choose_genre(subjects: &[String]) -> Option<String> {
    let lowered: Vec<String> = subjects.iter().map(|s| s.to_lowercase()).collect();

    GENRE_KEYWORDS
        .iter()
        .find_map(|kw| lowered.iter().position(|s| s.contains(kw)))
        .or_else(|| subjects.iter().position(|s| s.split_whitespace().count() <= 4))
        .or(if subjects.is_empty() { None } else { Some(0) })
        .map(|idx| subjects[idx].clone())
        .filter(|genre| !genre.is_empty())
}

/// Four-digit year from phrases like "first published in 1868"
pub fn extract_publication_date(summary: &str) -> Option<String> {
    PUBLISHED_RES.iter().find_map(|re| {
        let mut caps = re.create_captures();
        re.captures(summary, &mut caps);
        caps.get_group(1).map(|span| summary[span.range()].to_string())
    })
}

/// Collapse whitespace runs to single spaces and trim
pub fn clean_text(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>()
}

fn strip_lifespan(author: &str) -> String {
    match AUTHOR_LIFESPAN_RE.find(author) {
        Some(m) => author[..m.start()].trim().to_string(),
        None => author.trim().to_string(),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
