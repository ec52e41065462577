pub mod anchor;
pub mod credentials;
pub mod discovery;
pub mod error;
pub mod gutenberg;
pub mod metadata;
pub mod persistence;
pub mod reader;
pub mod scan;

// Re-export the anchor-locating surface for convenient access
pub use anchor::{locate_anchor, normalise, AnchorKind, AnchorMatch};

pub use error::{Error, Result};

// Re-export collaborator types
pub use credentials::ApiConfig;
pub use metadata::{BookMetadata, FetchConfig, MetadataFetcher};
pub use persistence::{load_metadata, save_metadata};
