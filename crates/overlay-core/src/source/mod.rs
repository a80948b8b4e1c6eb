//! Chart source registry.
//!
//! Every supported chart host is described by a static [`ChartSource`] entry.
//! Detection is a pure prefix match over the registry, done once per run;
//! all later source-specific behavior dispatches on [`SourceKind`].

use crate::error::{Error, Result};

/// RGB display color for console output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Which fetch adapter a source uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    ChartCyanvas,
    SekaiBest,
}

/// A chart-hosting service known to the pipeline.
#[derive(Debug, Clone, Copy)]
pub struct ChartSource {
    pub kind: SourceKind,
    /// Stable identifier, also used in log output.
    pub id: &'static str,
    /// Human-readable service name.
    pub name: &'static str,
    pub color: Rgb,
    /// Base URL all requests for this source are built from.
    pub host: &'static str,
    /// Chart ids belonging to this source start with this prefix.
    pub prefix: &'static str,
}

/// Registry of known sources, checked in order.
///
/// Prefixes must be mutually exclusive; `detect` takes the first match.
pub const SOURCES: [ChartSource; 2] = [
    ChartSource {
        kind: SourceKind::ChartCyanvas,
        id: "chart_cyanvas",
        name: "Chart Cyanvas",
        color: Rgb {
            r: 0x83,
            g: 0xcc,
            b: 0xd2,
        },
        host: "https://cc.sevenc7c.com",
        prefix: "chcy-",
    },
    ChartSource {
        kind: SourceKind::SekaiBest,
        id: "sekai_best",
        name: "Sekai Viewer",
        color: Rgb {
            r: 0x00,
            g: 0xbb,
            b: 0xdd,
        },
        host: "https://sonolus.sekai.best",
        prefix: "sekai-best-",
    },
];

/// Resolve a chart id to the source that owns it.
///
/// Pure lookup, no I/O. Unmatched ids are a user input error, not a crash.
pub fn detect(identifier: &str) -> Result<&'static ChartSource> {
    SOURCES
        .iter()
        .find(|source| identifier.starts_with(source.prefix))
        .ok_or_else(|| Error::UnknownSource(identifier.to_string()))
}
