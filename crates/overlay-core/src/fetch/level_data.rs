//! Sonolus level data decoding.
//!
//! Level data arrives as a gzipped JSON document of entities. Entities whose
//! archetype names a playable note become [`NoteEvent`]s; `#BPM_CHANGE`
//! entities drive the beat-to-seconds conversion. Everything else (stage
//! setup, connectors, sim lines, hidden ticks) is dropped here.

use std::io::Read;

use flate2::read::GzDecoder;
use serde::Deserialize;
use tracing::debug;

use crate::chart::timeline::{NoteEvent, NoteKind, NoteTimeline};
use crate::error::{Error, FetchStage, Result};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

const BPM_CHANGE_ARCHETYPE: &str = "#BPM_CHANGE";
const BEAT_FIELD: &str = "#BEAT";
const BPM_FIELD: &str = "#BPM";
const LANE_FIELD: &str = "lane";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelData {
    #[serde(default)]
    bgm_offset: f64,
    entities: Vec<Entity>,
}

#[derive(Debug, Deserialize)]
struct Entity {
    #[serde(default)]
    archetype: String,
    #[serde(default)]
    data: Vec<EntityField>,
}

/// One `data` slot. Reference slots (`ref`) carry no literal value and are
/// skipped by the field lookup.
#[derive(Debug, Deserialize)]
struct EntityField {
    name: String,
    #[serde(default)]
    value: Option<f64>,
}

#[derive(Debug, Clone, Copy)]
struct BpmChange {
    beat: f64,
    bpm: f64,
}

/// Decode a level data body, transparently handling gzip.
pub fn decode(bytes: &[u8]) -> Result<LevelData> {
    let json = if bytes.starts_with(&GZIP_MAGIC) {
        let mut decoder = GzDecoder::new(bytes);
        let mut out = Vec::new();
        decoder
            .read_to_end(&mut out)
            .map_err(|e| Error::fetch(FetchStage::LevelData, format!("gzip: {e}")))?;
        out
    } else {
        bytes.to_vec()
    };

    serde_json::from_slice(&json).map_err(|e| Error::fetch(FetchStage::LevelData, e))
}

impl LevelData {
    /// Convert the entity list into the canonical timeline.
    ///
    /// Fails when the chart declares no tempo or contains no scoring notes;
    /// a successfully fetched chart always yields a non-empty timeline.
    pub fn into_timeline(self) -> Result<NoteTimeline> {
        let bpm_changes = self.bpm_changes()?;

        let mut notes = Vec::new();
        let mut skipped = 0usize;
        for entity in &self.entities {
            let Some((kind, counts_combo)) = classify(&entity.archetype) else {
                skipped += 1;
                continue;
            };
            let Some(beat) = field(entity, BEAT_FIELD) else {
                continue;
            };
            let lane = field(entity, LANE_FIELD).unwrap_or(0.0);
            notes.push(NoteEvent {
                kind,
                time: self.bgm_offset + beat_to_seconds(&bpm_changes, beat),
                lane,
                counts_combo,
            });
        }
        debug!(
            "Classified {} notes ({} non-note entities)",
            notes.len(),
            skipped
        );

        if notes.is_empty() {
            return Err(Error::fetch(
                FetchStage::LevelData,
                "chart contains no scoring notes",
            ));
        }
        Ok(NoteTimeline::from_notes(notes))
    }

    fn bpm_changes(&self) -> Result<Vec<BpmChange>> {
        let mut changes: Vec<BpmChange> = self
            .entities
            .iter()
            .filter(|entity| entity.archetype == BPM_CHANGE_ARCHETYPE)
            .filter_map(|entity| {
                let beat = field(entity, BEAT_FIELD)?;
                let bpm = field(entity, BPM_FIELD)?;
                Some(BpmChange { beat, bpm })
            })
            .filter(|change| change.bpm > 0.0)
            .collect();
        changes.sort_by(|a, b| a.beat.total_cmp(&b.beat));

        if changes.is_empty() {
            return Err(Error::fetch(
                FetchStage::LevelData,
                "level data declares no tempo",
            ));
        }
        Ok(changes)
    }
}

fn field(entity: &Entity, name: &str) -> Option<f64> {
    entity
        .data
        .iter()
        .find(|field| field.name == name)
        .and_then(|field| field.value)
}

/// Map an archetype name onto a note kind.
///
/// Returns the kind plus whether the note advances the visible combo counter;
/// ticks attached to a slide are auto-judged and stay off the counter.
fn classify(archetype: &str) -> Option<(NoteKind, bool)> {
    if archetype.is_empty() || archetype.starts_with('#') {
        return None;
    }
    if matches!(archetype, "Initialization" | "InputManager" | "Stage" | "SimLine") {
        return None;
    }
    if archetype.contains("Connector")
        || archetype.contains("Hidden")
        || archetype.contains("Ignored")
        || archetype.contains("Damage")
    {
        return None;
    }
    if !archetype.ends_with("Note") {
        return None;
    }

    let kind = if archetype.contains("Critical") {
        NoteKind::Critical
    } else if archetype.contains("Flick") {
        NoteKind::Flick
    } else if archetype.contains("Slide") || archetype.contains("Trace") {
        NoteKind::Hold
    } else if archetype.contains("Tap") {
        NoteKind::Tap
    } else {
        return None;
    };

    let counts_combo = !archetype.contains("AttachedSlideTick");
    Some((kind, counts_combo))
}

/// Integrate tempo segments to convert a beat position into seconds.
fn beat_to_seconds(changes: &[BpmChange], beat: f64) -> f64 {
    let mut seconds = 0.0;
    let mut current = &changes[0];
    for next in &changes[1..] {
        if next.beat >= beat {
            break;
        }
        seconds += (next.beat - current.beat) * 60.0 / current.bpm;
        current = next;
    }
    seconds + (beat - current.beat) * 60.0 / current.bpm
}
