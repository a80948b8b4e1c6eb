//! Canonical note timeline.
//!
//! Produced once per fetch, consumed once by the score projection. The
//! timeline is source-agnostic: archetype classification and beat-to-seconds
//! conversion happen in the fetch layer.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Note category, each with its own score weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum NoteKind {
    Tap,
    Flick,
    Hold,
    Critical,
}

impl NoteKind {
    /// Score weight of this note category.
    pub fn weight(self) -> f64 {
        match self {
            NoteKind::Tap => 1.0,
            NoteKind::Flick => 1.5,
            NoteKind::Hold => 0.5,
            NoteKind::Critical => 2.0,
        }
    }
}

/// A single timed note event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    pub kind: NoteKind,
    /// Seconds from the start of the audio track.
    pub time: f64,
    /// Horizontal position, center = 0. Informational only.
    pub lane: f64,
    /// Whether this note advances the visible combo counter.
    pub counts_combo: bool,
}

/// Ordered sequence of note events, never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteTimeline {
    notes: Vec<NoteEvent>,
}

impl NoteTimeline {
    /// Build a timeline, ordering the events by time.
    pub fn from_notes(mut notes: Vec<NoteEvent>) -> Self {
        notes.sort_by(|a, b| a.time.total_cmp(&b.time));
        NoteTimeline { notes }
    }

    pub fn notes(&self) -> &[NoteEvent] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Sum of all note weights; the score base is normalized by this.
    pub fn total_weight(&self) -> f64 {
        self.notes.iter().map(|note| note.kind.weight()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tap(time: f64) -> NoteEvent {
        NoteEvent {
            kind: NoteKind::Tap,
            time,
            lane: 0.0,
            counts_combo: true,
        }
    }

    #[test]
    fn test_from_notes_sorts_by_time() {
        let timeline = NoteTimeline::from_notes(vec![tap(2.0), tap(0.5), tap(1.0)]);
        let times: Vec<f64> = timeline.notes().iter().map(|n| n.time).collect();
        assert_eq!(times, vec![0.5, 1.0, 2.0]);
    }

    #[test]
    fn test_total_weight() {
        let timeline = NoteTimeline::from_notes(vec![
            NoteEvent {
                kind: NoteKind::Tap,
                time: 0.0,
                lane: 0.0,
                counts_combo: true,
            },
            NoteEvent {
                kind: NoteKind::Flick,
                time: 1.0,
                lane: 0.0,
                counts_combo: true,
            },
            NoteEvent {
                kind: NoteKind::Hold,
                time: 2.0,
                lane: 0.0,
                counts_combo: true,
            },
            NoteEvent {
                kind: NoteKind::Critical,
                time: 3.0,
                lane: 0.0,
                counts_combo: true,
            },
        ]);
        assert_eq!(timeline.total_weight(), 1.0 + 1.5 + 0.5 + 2.0);
    }

    #[test]
    fn test_empty_timeline() {
        let timeline = NoteTimeline::default();
        assert!(timeline.is_empty());
        assert_eq!(timeline.len(), 0);
        assert_eq!(timeline.total_weight(), 0.0);
    }

    #[test]
    fn test_kind_weights_distinct() {
        let weights = [
            NoteKind::Tap.weight(),
            NoteKind::Flick.weight(),
            NoteKind::Hold.weight(),
            NoteKind::Critical.weight(),
        ];
        for (i, a) in weights.iter().enumerate() {
            for b in &weights[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
