//! Beat length → notated duration quantization.
//!
//! The grouper only needs *some* mapping from a continuous beat length to
//! a discrete symbol; hosts with their own notation service plug it in
//! through `DurationQuantizer`. `NearestDuration` is the built-in policy.

use crate::model::{DurationKind, NotatedDuration};

/// Maps a positive beat length to a notated duration. Must not fail:
/// out-of-range lengths get the nearest representable value.
pub trait DurationQuantizer {
    fn quantize(&self, beats: f64) -> NotatedDuration;
}

impl<F> DurationQuantizer for F
where
    F: Fn(f64) -> NotatedDuration,
{
    fn quantize(&self, beats: f64) -> NotatedDuration {
        self(beats)
    }
}

/// Picks the plain or dotted value closest to the input, whole to 32nd.
/// Ties go to the longer value.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestDuration;

impl DurationQuantizer for NearestDuration {
    fn quantize(&self, beats: f64) -> NotatedDuration {
        beats_to_notated_duration(beats)
    }
}

/// Candidate durations, longest first. Dotted whole is excluded so that
/// anything past four beats clamps to a whole note.
fn candidates() -> impl Iterator<Item = NotatedDuration> {
    DurationKind::ALL.into_iter().flat_map(|kind| {
        let dotted = (kind != DurationKind::Whole).then(|| NotatedDuration::dotted(kind));
        dotted.into_iter().chain(std::iter::once(NotatedDuration::plain(kind)))
    })
}

pub fn beats_to_notated_duration(beats: f64) -> NotatedDuration {
    if !(beats > 0.0) {
        return NotatedDuration::plain(DurationKind::ThirtySecond);
    }
    if beats >= DurationKind::Whole.beats() {
        return NotatedDuration::WHOLE;
    }

    let mut best = NotatedDuration::WHOLE;
    let mut best_dist = f64::MAX;
    for candidate in candidates() {
        let dist = (candidate.beats() - beats).abs();
        if dist < best_dist {
            best = candidate;
            best_dist = dist;
        }
    }
    best
}
