//! Staff lines, brace, clef, and barline rendering.

use crate::model::Staff;
use crate::playback::MeasureGrid;
use super::constants::*;
use super::svg_builder::SvgBuilder;

pub(super) fn staff_top(grid: &MeasureGrid, staff: Staff) -> f64 {
    match staff {
        Staff::Treble => grid.treble_y,
        Staff::Bass => grid.bass_y,
    }
}

/// Y of a diatonic step on the given staff.
pub(super) fn step_to_y(staff_y: f64, staff: Staff, step: i32) -> f64 {
    let top = match staff {
        Staff::Treble => TREBLE_TOP_STEP,
        Staff::Bass => BASS_TOP_STEP,
    };
    staff_y + (top - step) as f64 * HALF_STEP_Y
}

pub(super) fn render_staff_lines(svg: &mut SvgBuilder, x1: f64, x2: f64, staff_y: f64) {
    for i in 0..5 {
        let y = staff_y + i as f64 * STAFF_LINE_SPACING;
        svg.line(x1, y, x2, y, STAFF_COLOR, STAFF_LINE_WIDTH);
    }
}

pub(super) fn render_brace(svg: &mut SvgBuilder, x: f64, top_y: f64, bottom_y: f64) {
    let mid_y = (top_y + bottom_y) / 2.0;
    let h = bottom_y - top_y;
    let w = BRACE_WIDTH;

    let path = format!(
        "M{:.1},{:.1} C{:.1},{:.1} {:.1},{:.1} {:.1},{:.1} \
         C{:.1},{:.1} {:.1},{:.1} {:.1},{:.1}",
        x, top_y,
        x, top_y + h * 0.28,
        x - w, mid_y - h * 0.08,
        x - w, mid_y,
        x - w, mid_y + h * 0.08,
        x, bottom_y - h * 0.28,
        x, bottom_y,
    );
    svg.path(&path, "none", NOTE_COLOR, 2.5);
}

/// SMuFL code points; hosts are expected to ship a music font.
pub(super) fn render_clef(svg: &mut SvgBuilder, x: f64, staff_y: f64, staff: Staff) {
    match staff {
        Staff::Treble => svg.text(x + 12.0, staff_y + 32.0, "\u{1D11E}", 40.0, NOTE_COLOR, "middle"),
        Staff::Bass => svg.text(x + 12.0, staff_y + 24.0, "\u{1D122}", 30.0, NOTE_COLOR, "middle"),
    }
}

/// Barline spanning both staves of the grand staff.
pub(super) fn render_barline(svg: &mut SvgBuilder, x: f64, grid: &MeasureGrid) {
    svg.line(
        x,
        grid.treble_y,
        x,
        grid.bass_y + STAFF_HEIGHT,
        BARLINE_COLOR,
        BARLINE_WIDTH,
    );
}

/// Ledger lines between the staff and a notehead outside it.
pub(super) fn render_ledger_lines(svg: &mut SvgBuilder, nx: f64, note_y: f64, staff_y: f64) {
    let x1 = nx - NOTEHEAD_RX - LEDGER_LINE_EXTEND;
    let x2 = nx + NOTEHEAD_RX + LEDGER_LINE_EXTEND;

    let mut y = staff_y - STAFF_LINE_SPACING;
    while y >= note_y - 0.1 {
        svg.line(x1, y, x2, y, STAFF_COLOR, LEDGER_LINE_WIDTH);
        y -= STAFF_LINE_SPACING;
    }

    let mut y = staff_y + STAFF_HEIGHT + STAFF_LINE_SPACING;
    while y <= note_y + 0.1 {
        svg.line(x1, y, x2, y, STAFF_COLOR, LEDGER_LINE_WIDTH);
        y += STAFF_LINE_SPACING;
    }
}
