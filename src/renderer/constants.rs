//! Shared constants for the SVG staff renderer (all in SVG user units).

// ── Staff dimensions ────────────────────────────────────────────────
pub(super) const STAFF_LINE_SPACING: f64 = 10.0; // distance between staff lines
pub(super) const STAFF_HEIGHT: f64 = 40.0; // 5 lines, 4 spaces
pub(super) const HALF_STEP_Y: f64 = STAFF_LINE_SPACING / 2.0; // one diatonic step
pub(super) const BRACE_WIDTH: f64 = 10.0;

// Diatonic step of the top staff line (C0 = 0)
pub(super) const TREBLE_TOP_STEP: i32 = 5 * 7 + 3; // F5
pub(super) const BASS_TOP_STEP: i32 = 3 * 7 + 5; // A3

// ── Measure spacing ─────────────────────────────────────────────────
pub(super) const CLEF_SPACE: f64 = 32.0; // extra lead-in on the first measure
pub(super) const MEASURE_PAD_LEFT: f64 = 18.0;
pub(super) const MEASURE_PAD_RIGHT: f64 = 12.0;

// ── Note dimensions ─────────────────────────────────────────────────
pub(super) const NOTEHEAD_RX: f64 = 5.5; // notehead ellipse x-radius
pub(super) const NOTEHEAD_RY: f64 = 4.0; // notehead ellipse y-radius
pub(super) const STEM_LENGTH: f64 = 30.0;
pub(super) const STEM_WIDTH: f64 = 1.2;
pub(super) const FLAG_SPACING: f64 = 6.0;
pub(super) const BARLINE_WIDTH: f64 = 1.0;
pub(super) const STAFF_LINE_WIDTH: f64 = 0.8;
pub(super) const LEDGER_LINE_WIDTH: f64 = 0.8;
pub(super) const LEDGER_LINE_EXTEND: f64 = 5.0;
pub(super) const ACCIDENTAL_OFFSET_X: f64 = 8.0;
pub(super) const PLAYHEAD_WIDTH: f64 = 2.0;

// ── Annotations ─────────────────────────────────────────────────────
pub(super) const LABEL_FONT_SIZE: f64 = 10.0;
pub(super) const LABEL_LINE_HEIGHT: f64 = 12.0;
pub(super) const LABEL_GAP: f64 = 10.0; // distance from the staff edge

// ── Colors ──────────────────────────────────────────────────────────
pub(super) const NOTE_COLOR: &str = "#1a1a1a";
pub(super) const HIGHLIGHT_COLOR: &str = "#2a6fdb";
pub(super) const STAFF_COLOR: &str = "#555555";
pub(super) const BARLINE_COLOR: &str = "#333333";
pub(super) const LABEL_COLOR: &str = "#4a4a9a";
pub(super) const REST_COLOR: &str = "#1a1a1a";
pub(super) const PLAYHEAD_COLOR: &str = "#d93025";
