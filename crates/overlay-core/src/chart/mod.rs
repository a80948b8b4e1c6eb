//! Chart metadata model.
//!
//! All source-specific payload shapes are normalized into [`Chart`] by the
//! fetch layer; everything downstream (scoring, encoders) only sees this.

pub mod timeline;

use serde::{Deserialize, Serialize};

/// The only engine version the score projection understands.
pub const SUPPORTED_ENGINE_VERSION: u32 = 12;

/// Engine version a chart payload declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineInfo {
    pub version: u32,
}

impl EngineInfo {
    pub fn is_supported(&self) -> bool {
        self.version == SUPPORTED_ENGINE_VERSION
    }
}

/// Composer / vocalist credit, normalized from per-source formats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credits {
    pub composer: String,
    pub vocalist: String,
}

/// Placeholder shown when a source does not carry a vocalist credit.
pub const UNKNOWN_VOCALIST: &str = "？";

impl Credits {
    /// Split a combined `composer / vocalist` credit string.
    ///
    /// Only the first delimiter is honored; anything past two parts keeps
    /// the combined string as the composer.
    pub fn from_combined(artists: &str) -> Self {
        let parts: Vec<&str> = artists.split(" / ").collect();
        match parts.as_slice() {
            [composer, vocalist] => Credits {
                composer: composer.trim().to_string(),
                vocalist: vocalist.trim().to_string(),
            },
            _ => Credits::composer_only(artists),
        }
    }

    /// Credit with the whole artist string as composer and no known vocalist.
    pub fn composer_only(artists: &str) -> Self {
        Credits {
            composer: artists.trim().to_string(),
            vocalist: UNKNOWN_VOCALIST.to_string(),
        }
    }
}

/// Chart metadata, read-only after retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chart {
    /// Full chart id including the source prefix.
    pub id: String,
    pub title: String,
    /// Raw artist credit string as the source sent it.
    pub artists: String,
    pub credits: Credits,
    /// Chart author (the person who mapped the notes).
    pub author: String,
    pub rating: i32,
    pub engine: EngineInfo,
    pub cover_url: String,
    pub background_url: Option<String>,
    /// Where the gzipped level data lives.
    pub data_url: String,
}
