//! Chord, rest, accidental, and label rendering.

use crate::annotate::{Accidental, AnnotatedChord, AnnotatedNote};
use crate::model::{AnnotationSide, DurationKind, Staff};
use super::constants::*;
use super::staff::{render_ledger_lines, step_to_y};
use super::svg_builder::SvgBuilder;

pub(super) fn render_chord(
    svg: &mut SvgBuilder,
    chord: &AnnotatedChord,
    staff: Staff,
    staff_y: f64,
    nx: f64,
) {
    let color = if chord.highlighted { HIGHLIGHT_COLOR } else { NOTE_COLOR };
    let class = if chord.highlighted { "chord highlighted" } else { "chord" };
    svg.begin_group(class, chord.notes.first().map(|n| n.id.as_str()));

    let ys: Vec<f64> = chord
        .notes
        .iter()
        .map(|n| step_to_y(staff_y, staff, n.staff_step))
        .collect();

    for (note, &note_y) in chord.notes.iter().zip(&ys) {
        render_ledger_lines(svg, nx, note_y, staff_y);
        svg.notehead(nx, note_y, chord.duration.is_filled(), color);

        if chord.duration.dotted {
            svg.circle(nx + NOTEHEAD_RX + 4.0, note_y - 1.5, 1.8, color);
        }
        if let Some(acc) = note.accidental {
            render_accidental(svg, nx - NOTEHEAD_RX - ACCIDENTAL_OFFSET_X, note_y, acc, color);
        }
    }

    if chord.duration.kind != DurationKind::Whole {
        render_stem(svg, chord, &ys, staff_y, nx, color);
    }

    render_labels(svg, &chord.notes, staff_y, nx);
    svg.end_group();
}

fn render_stem(
    svg: &mut SvgBuilder,
    chord: &AnnotatedChord,
    ys: &[f64],
    staff_y: f64,
    nx: f64,
    color: &str,
) {
    let top = ys.iter().copied().fold(f64::MAX, f64::min);
    let bottom = ys.iter().copied().fold(f64::MIN, f64::max);
    let stem_up = (top + bottom) / 2.0 >= staff_y + STAFF_HEIGHT / 2.0;

    let flags = chord.duration.kind.flag_count();
    let stem_len = STEM_LENGTH + flags.saturating_sub(1) as f64 * FLAG_SPACING;

    let (sx, from, to) = if stem_up {
        (nx + NOTEHEAD_RX - 1.0, bottom, top - stem_len)
    } else {
        (nx - NOTEHEAD_RX + 1.0, top, bottom + stem_len)
    };
    svg.line(sx, from, sx, to, color, STEM_WIDTH);

    for i in 0..flags {
        let offset = i as f64 * FLAG_SPACING;
        let (fy, dir) = if stem_up { (to + offset, 1.0) } else { (to - offset, -1.0) };
        let d = format!(
            "M{:.1},{:.1} q{:.1},{:.1} {:.1},{:.1}",
            sx, fy,
            2.0, dir * 8.0,
            8.0, dir * 14.0,
        );
        svg.path(&d, "none", color, STEM_WIDTH);
    }
}

fn render_accidental(svg: &mut SvgBuilder, x: f64, y: f64, acc: Accidental, color: &str) {
    let glyph = match acc {
        Accidental::Sharp => "\u{266F}",
        Accidental::Flat => "\u{266D}",
    };
    svg.text(x, y + 4.5, glyph, 14.0, color, "middle");
}

/// Pitch labels, stacked away from the staff.
fn render_labels(svg: &mut SvgBuilder, notes: &[AnnotatedNote], staff_y: f64, nx: f64) {
    let mut above = 0;
    let mut below = 0;
    for note in notes {
        let Some(ref annotation) = note.annotation else { continue };
        let y = match annotation.side {
            AnnotationSide::Above => {
                let y = staff_y - LABEL_GAP - above as f64 * LABEL_LINE_HEIGHT;
                above += 1;
                y
            }
            AnnotationSide::Below => {
                let y = staff_y + STAFF_HEIGHT + LABEL_GAP + LABEL_FONT_SIZE
                    + below as f64 * LABEL_LINE_HEIGHT;
                below += 1;
                y
            }
        };
        svg.text(nx, y, &annotation.text, LABEL_FONT_SIZE, LABEL_COLOR, "middle");
    }
}

/// Whole-measure rest: a block hanging from the second staff line,
/// centered in the measure.
pub(super) fn render_measure_rest(svg: &mut SvgBuilder, center_x: f64, staff_y: f64) {
    svg.begin_group("rest", None);
    svg.rect(center_x - 6.0, staff_y + STAFF_LINE_SPACING, 12.0, 5.0, REST_COLOR);
    svg.end_group();
}
