use std::path::PathBuf;

use strum::Display;
use thiserror::Error;

/// Pipeline stage a network fetch belongs to.
///
/// Carried by [`Error::Fetch`] so the caller can name the step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FetchStage {
    #[strum(serialize = "chart metadata")]
    Metadata,
    #[strum(serialize = "level data")]
    LevelData,
    #[strum(serialize = "cover image")]
    Cover,
    #[strum(serialize = "background image")]
    Background,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("No chart source matches id: {0}")]
    UnknownSource(String),

    #[error("Failed to fetch {stage}: {message}")]
    Fetch { stage: FetchStage, message: String },

    #[error("Unsupported engine version: {0}")]
    UnsupportedEngine(u32),

    #[error("Missing bundled asset: {}", .0.display())]
    MissingAsset(PathBuf),

    #[error("Failed to write {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn fetch(stage: FetchStage, message: impl ToString) -> Self {
        Error::Fetch {
            stage,
            message: message.to_string(),
        }
    }

    /// Check if this error is correctable by fixing the input id
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::UnknownSource(_))
    }
}
