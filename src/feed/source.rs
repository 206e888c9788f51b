//! Feed retrieval.
//!
//! The viewer shows two consecutive days: the `today` page and the page its
//! `links.next` points at. A non-success status on either request means the
//! feed is unavailable, which is not an error.

use std::path::PathBuf;
use std::time::Duration;

use bevy::log::{debug, info, warn};

use super::RawFeed;

/// Default NeoWs REST base.
pub const DEFAULT_FEED_URL: &str = "https://api.nasa.gov/neo/rest/v1";

/// Request timeout for a single feed page.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(thiserror::Error, Debug)]
pub enum FeedError {
    #[error("transport error: {0}")]
    Transport(Box<ureq::Transport>),

    #[error("failed to decode feed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("feed page has no `links.next`")]
    MissingNextLink,
}

/// Outcome of requesting one page.
#[derive(Clone, Debug, PartialEq)]
pub enum PageResponse {
    Feed(RawFeed),
    /// The server answered with a non-success status.
    Unavailable { status: u16 },
}

/// Anything that can hand out feed pages.
pub trait FeedSource: Send + Sync + 'static {
    /// Fetch the first (`today`) page.
    fn first_page(&self) -> Result<PageResponse, FeedError>;

    /// Fetch the page at `url`, typically a `links.next` value.
    fn page(&self, url: &str) -> Result<PageResponse, FeedError>;

    /// Fetch today and the following day and merge them.
    ///
    /// Returns `Ok(None)` when either page is unavailable.
    fn fetch_merged(&self) -> Result<Option<RawFeed>, FeedError> {
        let first = match self.first_page()? {
            PageResponse::Feed(feed) => feed,
            PageResponse::Unavailable { status } => {
                warn!("Feed unavailable (first page returned status {})", status);
                return Ok(None);
            }
        };

        let next = first.links.next.clone().ok_or(FeedError::MissingNextLink)?;
        let second = match self.page(&next)? {
            PageResponse::Feed(feed) => feed,
            PageResponse::Unavailable { status } => {
                warn!("Feed unavailable (next page returned status {})", status);
                return Ok(None);
            }
        };

        let merged = first.merge(second);
        info!(
            "Fetched feed: {} objects across {} days",
            merged.element_count,
            merged.near_earth_objects.len()
        );
        Ok(Some(merged))
    }
}

/// Feed source backed by the NeoWs HTTP API.
pub struct HttpFeedSource {
    base_url: String,
    api_key: String,
    agent: ureq::Agent,
}

impl HttpFeedSource {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            agent,
        }
    }

    /// URL of the `today` page.
    pub fn today_url(&self) -> String {
        format!(
            "{}/feed/today?detailed=true&api_key={}",
            self.base_url.trim_end_matches('/'),
            self.api_key
        )
    }

    fn get(&self, url: &str) -> Result<PageResponse, FeedError> {
        match self.agent.get(url).call() {
            Ok(response) => {
                let body = response.into_string()?;
                let feed = serde_json::from_str(&body)?;
                Ok(PageResponse::Feed(feed))
            }
            Err(ureq::Error::Status(status, _)) => Ok(PageResponse::Unavailable { status }),
            Err(ureq::Error::Transport(transport)) => {
                Err(FeedError::Transport(Box::new(transport)))
            }
        }
    }
}

impl FeedSource for HttpFeedSource {
    fn first_page(&self) -> Result<PageResponse, FeedError> {
        debug!("Requesting today's feed page from {}", self.base_url);
        self.get(&self.today_url())
    }

    fn page(&self, url: &str) -> Result<PageResponse, FeedError> {
        debug!("Requesting next feed page");
        self.get(url)
    }
}

/// Feed source reading an already merged feed from disk.
pub struct FileFeedSource {
    path: PathBuf,
}

impl FileFeedSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Result<RawFeed, FeedError> {
        let text = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl FeedSource for FileFeedSource {
    fn first_page(&self) -> Result<PageResponse, FeedError> {
        self.read().map(PageResponse::Feed)
    }

    fn page(&self, _url: &str) -> Result<PageResponse, FeedError> {
        self.read().map(PageResponse::Feed)
    }

    /// The file already holds both days.
    fn fetch_merged(&self) -> Result<Option<RawFeed>, FeedError> {
        let feed = self.read()?;
        info!(
            "Loaded feed from {}: {} objects",
            self.path.display(),
            feed.element_count
        );
        Ok(Some(feed))
    }
}
