//! Score projection.
//!
//! Pure function over the chart, timeline, and player parameters; identical
//! inputs always produce an identical breakdown. The overlay animates the
//! running score and combo, so the breakdown keeps one entry per note in
//! timeline order alongside the rounded total.

use tracing::debug;

use crate::chart::Chart;
use crate::chart::timeline::NoteTimeline;

/// Combo window size: the multiplier steps up once per full window.
const COMBO_TIER_SIZE: u32 = 100;
/// The multiplier stops climbing after this many windows (x1.10 cap).
const MAX_COMBO_TIERS: u32 = 10;
const COMBO_TIER_STEP: f64 = 0.01;

/// Team power contributes four times its face value across the chart.
const POWER_SCALE: f64 = 4.0;
/// Judgement factor for an all-perfect run.
const PERFECT_FACTOR: f64 = 1.1;

/// Per-note running state, in timeline order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreEntry {
    /// Seconds from the start of the audio track.
    pub time: f64,
    /// Visible combo counter after this note.
    pub combo: u32,
    /// Unrounded running score after this note.
    pub running_score: f64,
}

/// Result of a score projection. Immutable once computed.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    /// Projected total, rounded half-up once at the end.
    pub total: u64,
    pub ap_combo: bool,
    pub entries: Vec<ScoreEntry>,
}

impl ScoreBreakdown {
    fn zero(ap_combo: bool) -> Self {
        ScoreBreakdown {
            total: 0,
            ap_combo,
            entries: Vec::new(),
        }
    }
}

/// Project the score for one run.
///
/// An AP run assumes every note is judged PERFECT; the non-AP projection
/// keeps the combo (charts record no misses) but scores each hit at the
/// plain judgement factor, so the AP total is never the lower of the two.
/// An empty timeline or zero team power yields a zero breakdown, not an
/// error.
pub fn compute(
    chart: &Chart,
    timeline: &NoteTimeline,
    team_power: u32,
    ap_combo: bool,
) -> ScoreBreakdown {
    if timeline.is_empty() {
        return ScoreBreakdown::zero(ap_combo);
    }

    let base = f64::from(team_power) * POWER_SCALE / timeline.total_weight();
    let accuracy = if ap_combo { PERFECT_FACTOR } else { 1.0 };

    let mut combo = 0u32;
    let mut running = 0.0f64;
    let mut entries = Vec::with_capacity(timeline.len());
    for note in timeline.notes() {
        if note.counts_combo {
            combo += 1;
        }
        running += base * note.kind.weight() * accuracy * combo_multiplier(combo);
        entries.push(ScoreEntry {
            time: note.time,
            combo,
            running_score: running,
        });
    }

    let total = round_half_up(running);
    debug!(
        "Projected {} for {} ({} notes, power {}, ap {})",
        total,
        chart.title,
        timeline.len(),
        team_power,
        ap_combo
    );
    ScoreBreakdown {
        total,
        ap_combo,
        entries,
    }
}

/// Combo multiplier for the note that brought the counter to `combo`.
///
/// x1.00 for the first window of 100, +0.01 per further window, capped at
/// x1.10 from combo 1001 onward.
fn combo_multiplier(combo: u32) -> f64 {
    let tier = (combo.saturating_sub(1) / COMBO_TIER_SIZE).min(MAX_COMBO_TIERS);
    1.0 + COMBO_TIER_STEP * f64::from(tier)
}

/// Round-half-up, applied exactly once to the final sum.
pub(crate) fn round_half_up(value: f64) -> u64 {
    (value + 0.5).floor() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::timeline::{NoteEvent, NoteKind};
    use crate::chart::{Chart, Credits, EngineInfo};

    fn test_chart() -> Chart {
        Chart {
            id: "chcy-test".to_string(),
            title: "Test".to_string(),
            artists: "A / B".to_string(),
            credits: Credits::from_combined("A / B"),
            author: "author".to_string(),
            rating: 30,
            engine: EngineInfo { version: 12 },
            cover_url: "https://example.com/cover.png".to_string(),
            background_url: None,
            data_url: "https://example.com/data.gz".to_string(),
        }
    }

    fn taps(count: usize) -> NoteTimeline {
        NoteTimeline::from_notes(
            (0..count)
                .map(|i| NoteEvent {
                    kind: NoteKind::Tap,
                    time: i as f64 * 0.25,
                    lane: 0.0,
                    counts_combo: true,
                })
                .collect(),
        )
    }

    #[test]
    fn test_empty_timeline_is_zero() {
        let breakdown = compute(&test_chart(), &NoteTimeline::default(), 250_000, true);
        assert_eq!(breakdown.total, 0);
        assert!(breakdown.entries.is_empty());
        assert!(breakdown.ap_combo);
    }

    #[test]
    fn test_zero_power_is_zero_not_error() {
        let breakdown = compute(&test_chart(), &taps(100), 0, true);
        assert_eq!(breakdown.total, 0);
        assert_eq!(breakdown.entries.len(), 100);
    }

    #[test]
    fn test_deterministic() {
        let timeline = taps(500);
        let a = compute(&test_chart(), &timeline, 250_000, true);
        let b = compute(&test_chart(), &timeline, 250_000, true);
        assert_eq!(a, b);
    }

    #[test]
    fn test_ap_never_lower_than_non_ap() {
        let timeline = taps(500);
        for power in [1, 1000, 250_000] {
            let ap = compute(&test_chart(), &timeline, power, true);
            let normal = compute(&test_chart(), &timeline, power, false);
            assert!(ap.total >= normal.total, "power {power}");
        }
    }

    #[test]
    fn test_scenario_500_taps() {
        // 500 taps, power 250000, AP: base = 2000/note before bonuses.
        let breakdown = compute(&test_chart(), &taps(500), 250_000, true);
        assert!(breakdown.total > 0);
        assert_eq!(breakdown.entries.len(), 500);
        assert_eq!(breakdown.entries.last().unwrap().combo, 500);
        // Every note at least base * 1.1, so the total clears 1.1M.
        assert!(breakdown.total >= 1_100_000);
    }

    #[test]
    fn test_combo_multiplier_tiers() {
        assert_eq!(combo_multiplier(1), 1.0);
        assert_eq!(combo_multiplier(100), 1.0);
        assert_eq!(combo_multiplier(101), 1.01);
        assert_eq!(combo_multiplier(200), 1.01);
        assert_eq!(combo_multiplier(201), 1.02);
        assert_eq!(combo_multiplier(1000), 1.09);
        assert_eq!(combo_multiplier(1001), 1.1);
        assert_eq!(combo_multiplier(5000), 1.1);
        assert_eq!(combo_multiplier(0), 1.0);
    }

    #[test]
    fn test_non_combo_notes_score_without_advancing_combo() {
        let timeline = NoteTimeline::from_notes(vec![
            NoteEvent {
                kind: NoteKind::Tap,
                time: 0.0,
                lane: 0.0,
                counts_combo: true,
            },
            NoteEvent {
                kind: NoteKind::Hold,
                time: 0.5,
                lane: 0.0,
                counts_combo: false,
            },
            NoteEvent {
                kind: NoteKind::Tap,
                time: 1.0,
                lane: 0.0,
                counts_combo: true,
            },
        ]);
        let breakdown = compute(&test_chart(), &timeline, 100_000, true);
        let combos: Vec<u32> = breakdown.entries.iter().map(|e| e.combo).collect();
        assert_eq!(combos, vec![1, 1, 2]);
        assert!(breakdown.entries[1].running_score > breakdown.entries[0].running_score);
    }

    #[test]
    fn test_running_score_monotonic() {
        let breakdown = compute(&test_chart(), &taps(300), 123_456, false);
        for pair in breakdown.entries.windows(2) {
            assert!(pair[1].running_score > pair[0].running_score);
        }
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(0.0), 0);
        assert_eq!(round_half_up(1.4), 1);
        assert_eq!(round_half_up(1.5), 2);
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(1.6), 2);
    }
}
