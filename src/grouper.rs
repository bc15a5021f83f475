//! Group a flat list of note events into measures, staves, and chords.
//!
//! Every note lands in the measure containing its onset. Within a
//! (measure, staff) pair, notes with the exact same onset merge into one
//! chord. Staves left empty get a single full-measure rest so that both
//! staves of every measure always have something to draw.

use log::debug;

use crate::config::DEFAULT_BEATS_PER_MEASURE;
use crate::error::{StaffError, StaffResult};
use crate::model::{Chord, MeasureGroup, NoteEvent, Staff};
use crate::quantize::{DurationQuantizer, NearestDuration};

/// Reject notes that cannot be placed on the grid.
pub fn validate_note(note: &NoteEvent) -> StaffResult<()> {
    let invalid = |reason: String| StaffError::InvalidInput {
        id: note.id.clone(),
        reason,
    };

    if note.id.is_empty() {
        return Err(invalid("empty identifier".into()));
    }
    if !note.start_beat.is_finite() || note.start_beat < 0.0 {
        return Err(invalid(format!("start beat {} is negative or not finite", note.start_beat)));
    }
    if !note.duration_beats.is_finite() || note.duration_beats <= 0.0 {
        return Err(invalid(format!("duration {} is not positive", note.duration_beats)));
    }
    if note.midi > 127 {
        return Err(invalid(format!("MIDI pitch {} out of range", note.midi)));
    }
    Ok(())
}

/// Validate every note before any grouping happens.
pub fn validate_notes(notes: &[NoteEvent]) -> StaffResult<()> {
    notes.iter().try_for_each(validate_note)
}

/// Upper bound on the number of measures a single grouping may produce.
/// Notes reaching past it are rejected instead of sizing the measure list.
pub const MAX_MEASURES: usize = 100_000;

/// Number of measures needed to hold every note, or zero for no notes.
///
/// Each note needs the measure holding its onset and every measure it
/// sounds in. A note ending exactly on a barline does not open an empty
/// trailing measure.
pub fn measure_count(notes: &[NoteEvent], beats_per_measure: u32) -> usize {
    notes
        .iter()
        .map(|note| {
            let by_end = (note.end_beat() / beats_per_measure as f64).ceil() as usize;
            by_end.max(note.measure_index(beats_per_measure).saturating_add(1))
        })
        .max()
        .unwrap_or(0)
}

fn check_extent(note: &NoteEvent, beats_per_measure: u32) -> StaffResult<()> {
    let beats = beats_per_measure as f64;
    let limit = MAX_MEASURES as f64;
    if note.start_beat / beats >= limit || note.end_beat() / beats > limit {
        return Err(StaffError::InvalidInput {
            id: note.id.clone(),
            reason: format!(
                "ends at beat {}, past the {MAX_MEASURES}-measure limit",
                note.end_beat()
            ),
        });
    }
    Ok(())
}

/// Group notes with the built-in quantizer in 4/4.
pub fn group_into_measures_default(notes: &[NoteEvent]) -> StaffResult<Vec<MeasureGroup>> {
    group_into_measures(notes, DEFAULT_BEATS_PER_MEASURE, &NearestDuration)
}

pub fn group_into_measures<Q: DurationQuantizer + ?Sized>(
    notes: &[NoteEvent],
    beats_per_measure: u32,
    quantizer: &Q,
) -> StaffResult<Vec<MeasureGroup>> {
    if beats_per_measure == 0 {
        return Err(StaffError::InvalidParameter(
            "beats per measure must be at least 1".into(),
        ));
    }
    validate_notes(notes)?;
    notes
        .iter()
        .try_for_each(|note| check_extent(note, beats_per_measure))?;

    let count = measure_count(notes, beats_per_measure);
    let mut buckets: Vec<Vec<&NoteEvent>> = vec![Vec::new(); count];
    for note in notes {
        buckets[note.measure_index(beats_per_measure)].push(note);
    }

    let measures = buckets
        .into_iter()
        .enumerate()
        .map(|(index, members)| {
            let start_beat = index as f64 * beats_per_measure as f64;
            MeasureGroup {
                index,
                start_beat,
                beats: beats_per_measure,
                treble: staff_chords(&members, Staff::Treble, start_beat, quantizer),
                bass: staff_chords(&members, Staff::Bass, start_beat, quantizer),
            }
        })
        .collect();

    Ok(measures)
}

/// Chords for one staff of one measure, ascending by onset.
fn staff_chords<Q: DurationQuantizer + ?Sized>(
    members: &[&NoteEvent],
    staff: Staff,
    measure_start: f64,
    quantizer: &Q,
) -> Vec<Chord> {
    let mut on_staff: Vec<&NoteEvent> = members
        .iter()
        .copied()
        .filter(|n| n.staff == staff)
        .collect();

    if on_staff.is_empty() {
        return vec![Chord::measure_rest(measure_start)];
    }

    // stable, so chord members keep input order
    on_staff.sort_by(|a, b| a.start_beat.total_cmp(&b.start_beat));

    on_staff
        .chunk_by(|a, b| a.start_beat == b.start_beat)
        .map(|group| {
            let first = group[0];
            let start_beat = first.start_beat;
            let lead = first.duration_beats;
            if group.iter().any(|n| n.duration_beats != lead) {
                debug!(
                    "chord at beat {start_beat} on {staff:?} staff mixes durations; using {lead} from '{}'",
                    first.id
                );
            }
            Chord {
                start_beat,
                duration: quantizer.quantize(lead),
                notes: group.iter().map(|n| (*n).clone()).collect(),
            }
        })
        .collect()
}
