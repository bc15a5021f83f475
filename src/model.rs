//! Data model for timed note events and the measures derived from them.
//!
//! `NoteEvent` is produced upstream (transcription, MIDI import) and only
//! read here. Everything else is a derived view, rebuilt on every change
//! of notes, tempo, or grouping parameters.

use serde::{Deserialize, Serialize};

/// One of the two staves of a grand staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Staff {
    Treble,
    Bass,
}

impl Staff {
    /// Both staves, top to bottom.
    pub const ALL: [Staff; 2] = [Staff::Treble, Staff::Bass];

    /// Side of the staff where pitch labels are written.
    pub fn annotation_side(self) -> AnnotationSide {
        match self {
            Staff::Treble => AnnotationSide::Above,
            Staff::Bass => AnnotationSide::Below,
        }
    }
}

/// Vertical placement of annotation text relative to its staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationSide {
    Above,
    Below,
}

/// A single performed note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteEvent {
    /// Unique identifier (used for selection)
    pub id: String,
    /// MIDI note number, middle C = 60
    pub midi: u8,
    /// Human-readable pitch name, e.g. "C#4" or "Bb3"
    #[serde(alias = "name")]
    pub label: String,
    /// Onset in beats from the start of the piece
    pub start_beat: f64,
    /// Length in beats
    pub duration_beats: f64,
    pub staff: Staff,
}

impl NoteEvent {
    pub fn new(
        id: impl Into<String>,
        midi: u8,
        label: impl Into<String>,
        start_beat: f64,
        duration_beats: f64,
        staff: Staff,
    ) -> Self {
        Self {
            id: id.into(),
            midi,
            label: label.into(),
            start_beat,
            duration_beats,
            staff,
        }
    }

    pub fn end_beat(&self) -> f64 {
        self.start_beat + self.duration_beats
    }

    /// Index of the measure containing this note's onset.
    pub fn measure_index(&self, beats_per_measure: u32) -> usize {
        (self.start_beat / beats_per_measure as f64).floor() as usize
    }
}

/// Base note value, with the quarter note as one beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationKind {
    Whole,
    Half,
    Quarter,
    Eighth,
    Sixteenth,
    ThirtySecond,
}

impl DurationKind {
    /// Longest first.
    pub const ALL: [DurationKind; 6] = [
        DurationKind::Whole,
        DurationKind::Half,
        DurationKind::Quarter,
        DurationKind::Eighth,
        DurationKind::Sixteenth,
        DurationKind::ThirtySecond,
    ];

    pub fn beats(self) -> f64 {
        match self {
            DurationKind::Whole => 4.0,
            DurationKind::Half => 2.0,
            DurationKind::Quarter => 1.0,
            DurationKind::Eighth => 0.5,
            DurationKind::Sixteenth => 0.25,
            DurationKind::ThirtySecond => 0.125,
        }
    }

    /// Conventional note-value name: "whole", "half", "quarter", "eighth", "16th", "32nd".
    pub fn name(self) -> &'static str {
        match self {
            DurationKind::Whole => "whole",
            DurationKind::Half => "half",
            DurationKind::Quarter => "quarter",
            DurationKind::Eighth => "eighth",
            DurationKind::Sixteenth => "16th",
            DurationKind::ThirtySecond => "32nd",
        }
    }

    fn code(self) -> &'static str {
        match self {
            DurationKind::Whole => "w",
            DurationKind::Half => "h",
            DurationKind::Quarter => "q",
            DurationKind::Eighth => "8",
            DurationKind::Sixteenth => "16",
            DurationKind::ThirtySecond => "32",
        }
    }

    /// Number of flags on an unbeamed stem.
    pub fn flag_count(self) -> usize {
        match self {
            DurationKind::Eighth => 1,
            DurationKind::Sixteenth => 2,
            DurationKind::ThirtySecond => 3,
            _ => 0,
        }
    }
}

/// A discrete notated duration: a base value, optionally dotted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotatedDuration {
    pub kind: DurationKind,
    pub dotted: bool,
}

impl NotatedDuration {
    pub const WHOLE: Self = Self::plain(DurationKind::Whole);

    pub const fn plain(kind: DurationKind) -> Self {
        Self { kind, dotted: false }
    }

    pub const fn dotted(kind: DurationKind) -> Self {
        Self { kind, dotted: true }
    }

    pub fn beats(&self) -> f64 {
        let base = self.kind.beats();
        if self.dotted { base * 1.5 } else { base }
    }

    /// Display name, e.g. "whole" or "dotted half".
    pub fn name(&self) -> String {
        if self.dotted {
            format!("dotted {}", self.kind.name())
        } else {
            self.kind.name().to_string()
        }
    }

    /// Compact code, e.g. "w", "hd", "8".
    pub fn code(&self) -> String {
        if self.dotted {
            format!("{}d", self.kind.code())
        } else {
            self.kind.code().to_string()
        }
    }

    /// Whole and half notes use hollow noteheads.
    pub fn is_filled(&self) -> bool {
        !matches!(self.kind, DurationKind::Whole | DurationKind::Half)
    }
}

/// Notes sharing a staff and onset, notated as one event.
///
/// An empty `notes` list marks a full-measure rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chord {
    pub start_beat: f64,
    /// Quantized from the first member's length
    pub duration: NotatedDuration,
    pub notes: Vec<NoteEvent>,
}

impl Chord {
    /// Full-measure rest sentinel for a staff with no notes.
    pub fn measure_rest(start_beat: f64) -> Self {
        Self {
            start_beat,
            duration: NotatedDuration::WHOLE,
            notes: Vec::new(),
        }
    }

    pub fn is_rest(&self) -> bool {
        self.notes.is_empty()
    }
}

/// A fixed-length span of beats with one chord list per staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureGroup {
    /// 0-based measure index
    pub index: usize,
    /// First beat of the measure
    pub start_beat: f64,
    /// Beats per measure
    pub beats: u32,
    pub treble: Vec<Chord>,
    pub bass: Vec<Chord>,
}

impl MeasureGroup {
    pub fn staff(&self, staff: Staff) -> &[Chord] {
        match staff {
            Staff::Treble => &self.treble,
            Staff::Bass => &self.bass,
        }
    }

    pub fn end_beat(&self) -> f64 {
        self.start_beat + self.beats as f64
    }

    /// Number of real notes (rest sentinels excluded).
    pub fn note_count(&self) -> usize {
        self.treble
            .iter()
            .chain(self.bass.iter())
            .map(|c| c.notes.len())
            .sum()
    }
}
