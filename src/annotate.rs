//! Selection and annotation pass over grouped measures.
//!
//! Accidentals come from the pitch *label*, not the MIDI number: "C#4" and
//! "Db4" share a pitch but are drawn differently.

use serde::Serialize;

use crate::model::{AnnotationSide, Chord, MeasureGroup, NotatedDuration, NoteEvent, Staff};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accidental {
    Sharp,
    Flat,
}

impl Accidental {
    /// `#` anywhere in the label means sharp; otherwise `b` means flat.
    pub fn from_label(label: &str) -> Option<Self> {
        if label.contains('#') {
            Some(Accidental::Sharp)
        } else if label.contains('b') {
            Some(Accidental::Flat)
        } else {
            None
        }
    }
}

/// Label text and where to write it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub text: String,
    pub side: AnnotationSide,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedNote {
    pub id: String,
    pub midi: u8,
    pub label: String,
    pub accidental: Option<Accidental>,
    /// Diatonic position, C0 = 0, counting one per staff step
    pub staff_step: i32,
    pub annotation: Option<Annotation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedChord {
    pub start_beat: f64,
    pub duration: NotatedDuration,
    pub highlighted: bool,
    /// Empty for a full-measure rest
    pub notes: Vec<AnnotatedNote>,
}

impl AnnotatedChord {
    pub fn is_rest(&self) -> bool {
        self.notes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedMeasure {
    pub index: usize,
    pub start_beat: f64,
    pub beats: u32,
    pub treble: Vec<AnnotatedChord>,
    pub bass: Vec<AnnotatedChord>,
}

impl AnnotatedMeasure {
    pub fn staff(&self, staff: Staff) -> &[AnnotatedChord] {
        match staff {
            Staff::Treble => &self.treble,
            Staff::Bass => &self.bass,
        }
    }
}

/// Attach highlight flags, accidentals, staff positions, and labels.
pub fn annotate(
    measures: &[MeasureGroup],
    selected_id: Option<&str>,
    show_labels: bool,
) -> Vec<AnnotatedMeasure> {
    measures
        .iter()
        .map(|m| AnnotatedMeasure {
            index: m.index,
            start_beat: m.start_beat,
            beats: m.beats,
            treble: annotate_staff(&m.treble, Staff::Treble, selected_id, show_labels),
            bass: annotate_staff(&m.bass, Staff::Bass, selected_id, show_labels),
        })
        .collect()
}

fn annotate_staff(
    chords: &[Chord],
    staff: Staff,
    selected_id: Option<&str>,
    show_labels: bool,
) -> Vec<AnnotatedChord> {
    chords
        .iter()
        .map(|chord| AnnotatedChord {
            start_beat: chord.start_beat,
            duration: chord.duration,
            highlighted: selected_id
                .is_some_and(|sel| chord.notes.iter().any(|n| n.id == sel)),
            notes: chord
                .notes
                .iter()
                .map(|n| annotate_note(n, staff, show_labels))
                .collect(),
        })
        .collect()
}

fn annotate_note(note: &NoteEvent, staff: Staff, show_labels: bool) -> AnnotatedNote {
    let accidental = Accidental::from_label(&note.label);
    AnnotatedNote {
        id: note.id.clone(),
        midi: note.midi,
        label: note.label.clone(),
        accidental,
        staff_step: staff_step(note.midi, accidental),
        annotation: show_labels.then(|| Annotation {
            text: note.label.clone(),
            side: staff.annotation_side(),
        }),
    }
}

/// Diatonic step of a MIDI pitch, spelled with the label's accidental.
///
/// Black keys are spelled as the flat of the step above when the label is
/// flat, and as the sharp of the step below otherwise.
pub fn staff_step(midi: u8, accidental: Option<Accidental>) -> i32 {
    // pitch class -> (step index C=0..B=6, is natural)
    const STEPS: [(i32, bool); 12] = [
        (0, true), (0, false), (1, true), (1, false), (2, true), (3, true),
        (3, false), (4, true), (4, false), (5, true), (5, false), (6, true),
    ];

    let octave = midi as i32 / 12 - 1;
    let (step, natural) = STEPS[(midi % 12) as usize];
    let step = if !natural && accidental == Some(Accidental::Flat) {
        step + 1
    } else {
        step
    };
    octave * 7 + step
}
