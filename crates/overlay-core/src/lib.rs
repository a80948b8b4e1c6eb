//! # overlay-core
//!
//! Core library for the sekai-overlay project generator.
//!
//! This crate provides:
//! - Chart source detection (prefix registry over known hosts)
//! - Chart metadata, image, and note-timeline retrieval
//! - Deterministic score projection from team power and AP-combo settings
//! - `data.ped` / `.exo` project-file encoders for the compositing tool
//!
//! The pipeline is strictly sequential: detect, fetch, download assets,
//! compute, encode. Every step returns a typed [`Error`] so the shell can
//! name the failing stage.

pub mod chart;
pub mod config;
pub mod encode;
pub mod error;
pub mod fetch;
pub mod network;
pub mod score;
pub mod source;

pub use chart::timeline::{NoteEvent, NoteKind, NoteTimeline};
pub use chart::{Chart, Credits, EngineInfo, SUPPORTED_ENGINE_VERSION, UNKNOWN_VOCALIST};
pub use config::{CHART_ID_PLACEHOLDER, OverlayConfig};
pub use encode::{PED_FORMAT_VERSION, format_credits, write_exo_files, write_ped_file};
pub use error::{Error, FetchStage, Result};
pub use fetch::{BACKGROUND_FILE_NAME, COVER_FILE_NAME, ChartRetriever};
pub use network::HttpClient;
pub use score::{ScoreBreakdown, ScoreEntry, compute};
pub use source::{ChartSource, Rgb, SOURCES, SourceKind, detect};
