//! Plexamp HTTP API client implementation

use crate::plexamp::models::{PlayerRequest, TimelineSnapshot};
use crate::plexamp::timeline::parse_music_timeline;
use async_trait::async_trait;
use reqwest::{Client, Error as ReqwestError};
use std::error::Error;
use std::fmt;
use std::time::Duration;
use tracing::{debug, trace, warn};

const LOG_TARGET: &str = "r_plexpanel::plexamp::api";

/// Long-poll endpoint, asked to answer immediately.
pub const TIMELINE_POLL_PATH: &str = "/player/timeline/poll?wait=0&includeMetadata=0&commandID=1";

/// Error types for Plexamp API operations
#[derive(Debug)]
pub enum PlexampError {
    Network(ReqwestError),
    InvalidResponse(String),
    Xml(String),
}

impl fmt::Display for PlexampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlexampError::Network(e) => write!(f, "Network error: {}", e),
            PlexampError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            PlexampError::Xml(msg) => write!(f, "Malformed timeline: {}", msg),
        }
    }
}

impl Error for PlexampError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PlexampError::Network(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ReqwestError> for PlexampError {
    fn from(err: ReqwestError) -> Self {
        PlexampError::Network(err)
    }
}

/// The part of the player API the front panel talks to.
#[async_trait]
pub trait PlayerApi: Send + Sync {
    /// Polls the timeline and returns its music entry, if there is one.
    async fn poll_timeline(&self) -> Result<Option<TimelineSnapshot>, PlexampError>;

    /// Issues one playback request.
    async fn send(&self, request: &PlayerRequest) -> Result<(), PlexampError>;
}

/// Client for the Plexamp instance running on this device
#[derive(Clone)]
pub struct PlexampClient {
    client: Client,
    base_url: String,
}

impl PlexampClient {
    /// Create a new client; every request is bounded by `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        debug!(target: LOG_TARGET, "Creating PlexampClient for {} with {:?} timeout", base_url, timeout);

        let client = match Client::builder().timeout(timeout).connect_timeout(timeout).build() {
            Ok(client) => client,
            Err(e) => {
                warn!(target: LOG_TARGET, "Error creating HTTP client with timeout: {}. Falling back to default.", e);
                Client::new()
            }
        };

        PlexampClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Builds a full URL for an API path.
    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn get_base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a GET request and returns the body of a successful response.
    async fn get(&self, path: &str) -> Result<Vec<u8>, PlexampError> {
        let url = self.build_url(path);
        trace!(target: LOG_TARGET, "GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PlexampError::InvalidResponse(format!(
                "Request to {} failed with status {}",
                path, status
            )));
        }

        let body = response.bytes().await?;
        trace!(target: LOG_TARGET, "Response length: {} bytes", body.len());
        Ok(body.to_vec())
    }
}

#[async_trait]
impl PlayerApi for PlexampClient {
    async fn poll_timeline(&self) -> Result<Option<TimelineSnapshot>, PlexampError> {
        let body = self.get(TIMELINE_POLL_PATH).await?;
        parse_music_timeline(&body)
    }

    async fn send(&self, request: &PlayerRequest) -> Result<(), PlexampError> {
        debug!(target: LOG_TARGET, "Sending {:?}", request);
        self.get(&request.path_and_query()).await.map(|_| ())
    }
}
