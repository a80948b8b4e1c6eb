//! Chart retrieval.
//!
//! One adapter per chart source normalizes that host's payload shape into the
//! canonical [`Chart`] / [`NoteTimeline`] model. Requests are strictly
//! sequential and never retried; each failure names its [`FetchStage`].

mod chart_cyanvas;
pub mod level_data;
mod sekai_best;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::chart::Chart;
use crate::chart::timeline::NoteTimeline;
use crate::error::{Error, FetchStage, Result};
use crate::network::HttpClient;
use crate::source::{ChartSource, SourceKind};

pub const COVER_FILE_NAME: &str = "cover.png";
pub const BACKGROUND_FILE_NAME: &str = "background.png";

/// Fetches charts, level data, and image assets from a chart source.
pub struct ChartRetriever {
    client: HttpClient,
}

impl ChartRetriever {
    pub fn new() -> Self {
        Self {
            client: HttpClient::new(),
        }
    }

    /// Fetch chart metadata and validate its engine version.
    ///
    /// The engine check happens here, before any level data request or file
    /// write, so an unsupported chart never touches the output directory.
    pub fn fetch_chart(&self, source: &ChartSource, identifier: &str) -> Result<Chart> {
        let chart = match source.kind {
            SourceKind::ChartCyanvas => {
                chart_cyanvas::fetch_chart(&self.client, source, identifier)?
            }
            SourceKind::SekaiBest => sekai_best::fetch_chart(&self.client, source, identifier)?,
        };

        if !chart.engine.is_supported() {
            return Err(Error::UnsupportedEngine(chart.engine.version));
        }

        info!(
            "Fetched chart {} ({} / {} - {})",
            chart.id, chart.title, chart.artists, chart.author
        );
        Ok(chart)
    }

    /// Fetch and decode the note timeline for an already-validated chart.
    pub fn fetch_level_data(&self, chart: &Chart) -> Result<NoteTimeline> {
        let bytes = self.client.get_bytes(&chart.data_url, FetchStage::LevelData)?;
        let level = level_data::decode(&bytes)?;
        let timeline = level.into_timeline()?;
        info!("Decoded {} notes", timeline.len());
        Ok(timeline)
    }

    /// Download the cover image into `out_dir`.
    pub fn download_cover(&self, chart: &Chart, out_dir: &Path) -> Result<PathBuf> {
        self.download_image(&chart.cover_url, out_dir, COVER_FILE_NAME, FetchStage::Cover)
    }

    /// Download the background image into `out_dir`.
    ///
    /// Not every source carries a background; `Ok(None)` means the chart has
    /// none and the step was skipped, not that it failed.
    pub fn download_background(&self, chart: &Chart, out_dir: &Path) -> Result<Option<PathBuf>> {
        match &chart.background_url {
            Some(url) => self
                .download_image(url, out_dir, BACKGROUND_FILE_NAME, FetchStage::Background)
                .map(Some),
            None => {
                debug!("Chart {} has no background image", chart.id);
                Ok(None)
            }
        }
    }

    /// Download one image, staging through a `.tmp` path so a failed transfer
    /// never leaves a truncated file under the final name.
    fn download_image(
        &self,
        url: &str,
        out_dir: &Path,
        file_name: &str,
        stage: FetchStage,
    ) -> Result<PathBuf> {
        let bytes = self.client.get_bytes(url, stage)?;

        fs::create_dir_all(out_dir)?;
        let final_path = out_dir.join(file_name);
        let tmp_path = out_dir.join(format!("{file_name}.tmp"));
        fs::write(&tmp_path, &bytes)?;
        fs::rename(&tmp_path, &final_path)?;

        debug!("Wrote {} ({} bytes)", final_path.display(), bytes.len());
        Ok(final_path)
    }
}

impl Default for ChartRetriever {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve a possibly host-relative asset URL against the source host.
fn resolve_url(host: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else if url.starts_with('/') {
        format!("{host}{url}")
    } else {
        format!("{host}/{url}")
    }
}
