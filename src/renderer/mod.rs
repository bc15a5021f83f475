//! Staff renderer — draws a `ViewFrame` onto a rendering surface.
//!
//! Grouping and time mapping never depend on this module. A render pass
//! takes a freshly created surface, draws every measure and the playhead,
//! and hands back the finished output; nothing survives between passes.

mod constants;
mod notes;
mod staff;
mod svg_builder;

use log::warn;

use crate::annotate::AnnotatedMeasure;
use crate::error::{StaffError, StaffResult};
use crate::model::Staff;
use crate::playback::{MeasureGrid, ViewFrame};
use constants::*;
use notes::{render_chord, render_measure_rest};
use staff::*;
use svg_builder::{empty_svg, SvgBuilder};

/// Rendering collaborator. One value per render pass.
pub trait StaffRenderer {
    type Output;

    /// Draw both staves of one measure and its chords.
    fn draw_measure(&mut self, grid: &MeasureGrid, measure: &AnnotatedMeasure);

    /// Draw the playhead overlay. Surfaces without an overlay can ignore it.
    fn draw_playhead(&mut self, _x: f64, _height: f64) {}

    fn finish(self) -> Self::Output
    where
        Self: Sized;
}

/// Run one render pass over `frame`.
///
/// `make_surface` receives the frame's content size. If it fails the pass
/// is skipped with a warning and the error is returned to the host; the
/// frame itself stays valid.
pub fn render_frame<R, F>(frame: &ViewFrame, make_surface: F) -> StaffResult<R::Output>
where
    R: StaffRenderer,
    F: FnOnce(f64, f64) -> StaffResult<R>,
{
    let mut renderer = match make_surface(frame.width, frame.height) {
        Ok(r) => r,
        Err(e) => {
            warn!("skipping render pass: {e}");
            return Err(e);
        }
    };

    for (grid, measure) in frame.grid.iter().zip(&frame.measures) {
        renderer.draw_measure(grid, measure);
    }
    if !frame.measures.is_empty() {
        renderer.draw_playhead(frame.playhead_x, frame.height);
    }
    Ok(renderer.finish())
}

/// Render a frame to a self-contained SVG string.
pub fn render_frame_to_svg(frame: &ViewFrame) -> StaffResult<String> {
    render_frame(frame, SvgStaffRenderer::new)
}

/// SVG surface for the grand staff view.
pub struct SvgStaffRenderer {
    svg: SvgBuilder,
}

impl SvgStaffRenderer {
    pub fn new(width: f64, height: f64) -> StaffResult<Self> {
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(StaffError::RenderingUnavailable(format!(
                "invalid surface size {width}x{height}"
            )));
        }
        Ok(Self {
            svg: SvgBuilder::new(width, height),
        })
    }
}

impl StaffRenderer for SvgStaffRenderer {
    type Output = String;

    fn draw_measure(&mut self, grid: &MeasureGrid, measure: &AnnotatedMeasure) {
        let svg = &mut self.svg;
        let x1 = grid.x;
        let x2 = grid.x + grid.width;
        let first = grid.index == 0;

        for staff in Staff::ALL {
            render_staff_lines(svg, x1, x2, staff_top(grid, staff));
        }
        if first {
            render_brace(svg, x1 - 2.0, grid.treble_y, grid.bass_y + STAFF_HEIGHT);
            render_barline(svg, x1, grid);
            for staff in Staff::ALL {
                render_clef(svg, x1, staff_top(grid, staff), staff);
            }
        }
        render_barline(svg, x2, grid);

        let lead = if first { CLEF_SPACE } else { 0.0 };
        let rest_x = x1 + lead + (grid.width - lead) / 2.0;
        for staff in Staff::ALL {
            let staff_y = staff_top(grid, staff);
            for chord in measure.staff(staff) {
                if chord.is_rest() {
                    render_measure_rest(svg, rest_x, staff_y);
                    continue;
                }
                let nx = grid.beat_x(
                    chord.start_beat - measure.start_beat,
                    measure.beats,
                    lead + MEASURE_PAD_LEFT,
                    MEASURE_PAD_RIGHT,
                );
                render_chord(svg, chord, staff, staff_y, nx);
            }
        }
    }

    fn draw_playhead(&mut self, x: f64, height: f64) {
        self.svg
            .classed_line("playhead", x, 0.0, x, height, PLAYHEAD_COLOR, PLAYHEAD_WIDTH);
    }

    fn finish(self) -> String {
        if self.svg.is_empty() {
            return empty_svg("No notes to display");
        }
        self.svg.build()
    }
}
