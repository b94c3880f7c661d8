use thiserror::Error;

/// Convenience result type used throughout the crate
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Errors raised while extracting fields from a profile page
#[derive(Debug, Error)]
pub enum ParseError {
    /// The page has no `<section>` element to scope the lookup
    #[error("profile page has no <section> element")]
    MissingSection,

    /// A positional content block is absent
    #[error("content block {0} not found")]
    MissingBlock(String),

    /// A content block exists but lacks the expected child element
    #[error("content block {block} has no <{element}> element")]
    MissingElement { block: String, element: &'static str },

    /// A `<dd>` appeared before any `<dt>` in the event list
    #[error("event detail '{0}' has no preceding label")]
    OrphanDetail(String),

    #[error("invalid selector: {0}")]
    Selector(String),
}

/// Errors raised while retrieving pages or images
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("WebDriver session failed: {0}")]
    Session(#[from] fantoccini::error::NewSessionError),

    #[error("WebDriver command failed: {0}")]
    Command(#[from] fantoccini::error::CmdError),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Errors raised by the snapshot store
#[derive(Debug, Error)]
pub enum StoreError {
    /// No snapshot has been written yet
    #[error("snapshot {0} not found")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Top-level error for crawl, store and presentation operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("server error: {0}")]
    Server(String),

    #[error("viewer error: {0}")]
    Viewer(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<regex::Error> for CrawlError {
    fn from(e: regex::Error) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<serde_json::Error> for CrawlError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}
