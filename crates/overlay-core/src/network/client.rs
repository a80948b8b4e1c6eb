use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Error, FetchStage, Result};

/// Global timeout covering connect plus transfer.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound on downloaded bodies (level data and images).
const BODY_LIMIT: u64 = 64 * 1024 * 1024;

/// Thin wrapper over a blocking [`ureq::Agent`].
///
/// Every request is attributed to a [`FetchStage`] so failures surface as
/// `Error::Fetch` with the step already named. No automatic retry: the
/// pipeline treats any network failure as terminal for the run.
pub struct HttpClient {
    agent: ureq::Agent,
}

impl HttpClient {
    pub fn new() -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build();
        Self {
            agent: config.into(),
        }
    }

    /// GET a JSON document.
    pub fn get_json<T: DeserializeOwned>(&self, url: &str, stage: FetchStage) -> Result<T> {
        debug!("GET {url} ({stage})");
        let mut response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| Error::fetch(stage, e))?;
        response
            .body_mut()
            .read_json()
            .map_err(|e| Error::fetch(stage, e))
    }

    /// GET a raw body (images, gzipped level data).
    pub fn get_bytes(&self, url: &str, stage: FetchStage) -> Result<Vec<u8>> {
        debug!("GET {url} ({stage})");
        let mut response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| Error::fetch(stage, e))?;
        response
            .body_mut()
            .with_config()
            .limit(BODY_LIMIT)
            .read_to_vec()
            .map_err(|e| Error::fetch(stage, e))
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}
