//! Playback frame: everything a host needs to draw one state of the view.
//!
//! A frame combines the grouped, annotated measures with the measure grid
//! and the two time-derived positions (scroll target and playhead). Frames
//! are immutable and rebuilt from scratch whenever an input changes:
//!   `x = margin + (t * bpm / 60) * (measure_width / beats_per_measure)`

use log::debug;
use serde::{Deserialize, Serialize};

use crate::annotate::{annotate, AnnotatedMeasure};
use crate::config::{ViewConfig, DEFAULT_BPM};
use crate::error::StaffResult;
use crate::grouper::group_into_measures;
use crate::model::NoteEvent;
use crate::quantize::{DurationQuantizer, NearestDuration};
use crate::timemap::TimeMapper;

fn default_bpm() -> u32 {
    DEFAULT_BPM
}

/// Host-side state that drives the view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewInput {
    pub notes: Vec<NoteEvent>,
    /// Playback position in seconds
    #[serde(default)]
    pub current_time: f64,
    /// Total length in seconds (informational)
    #[serde(default)]
    pub duration: f64,
    #[serde(default = "default_bpm")]
    pub bpm: u32,
    #[serde(default)]
    pub show_labels: bool,
    #[serde(default)]
    pub selected_id: Option<String>,
}

impl ViewInput {
    pub fn new(notes: Vec<NoteEvent>) -> Self {
        Self {
            notes,
            current_time: 0.0,
            duration: 0.0,
            bpm: DEFAULT_BPM,
            show_labels: false,
            selected_id: None,
        }
    }
}

/// Position of one measure on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeasureGrid {
    pub index: usize,
    /// Left edge
    pub x: f64,
    pub width: f64,
    /// Top line of the treble staff
    pub treble_y: f64,
    /// Top line of the bass staff
    pub bass_y: f64,
}

impl MeasureGrid {
    /// X of a beat inside this measure, leaving `left_pad` / `right_pad`
    /// free next to the barlines.
    pub fn beat_x(&self, beat_in_measure: f64, beats: u32, left_pad: f64, right_pad: f64) -> f64 {
        let usable = (self.width - left_pad - right_pad).max(0.0);
        self.x + left_pad + (beat_in_measure / beats.max(1) as f64) * usable
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewFrame {
    pub measures: Vec<AnnotatedMeasure>,
    pub grid: Vec<MeasureGrid>,
    /// X of the playhead overlay
    pub playhead_x: f64,
    /// Horizontal scroll position to animate the viewport to
    pub scroll_target: f64,
    /// Measure under the playhead
    pub current_measure: usize,
    pub width: f64,
    pub height: f64,
    pub bpm: u32,
}

/// Build a frame with the built-in duration quantizer.
pub fn build_frame(config: &ViewConfig, input: &ViewInput) -> StaffResult<ViewFrame> {
    build_frame_with(config, input, &NearestDuration)
}

pub fn build_frame_with<Q: DurationQuantizer + ?Sized>(
    config: &ViewConfig,
    input: &ViewInput,
    quantizer: &Q,
) -> StaffResult<ViewFrame> {
    config.validate()?;
    let mapper = TimeMapper::new(
        input.bpm as f64,
        config.measure_width,
        config.beats_per_measure,
    )?;

    let playhead_x = mapper.offset(input.current_time, config.playhead_margin)?;
    let scroll_target = mapper
        .offset(input.current_time, config.scroll_margin)?
        .max(0.0);
    let current_measure = mapper.measure_at(input.current_time)?;

    let groups = group_into_measures(&input.notes, config.beats_per_measure, quantizer)?;
    let measures = annotate(&groups, input.selected_id.as_deref(), input.show_labels);

    let grid = (0..measures.len())
        .map(|index| MeasureGrid {
            index,
            x: config.staff_left + index as f64 * config.measure_width,
            width: config.measure_width,
            treble_y: config.treble_y,
            bass_y: config.bass_y,
        })
        .collect();

    debug!(
        "frame: {} notes in {} measures, t={:.3}s, playhead at {:.1}",
        input.notes.len(),
        measures.len(),
        input.current_time,
        playhead_x
    );

    Ok(ViewFrame {
        width: config.content_width(measures.len()),
        height: config.view_height,
        measures,
        grid,
        playhead_x,
        scroll_target,
        current_measure,
        bpm: input.bpm,
    })
}

/// Tracks the viewport position and only asks the host to scroll when the
/// target has moved more than a fixed threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollFollower {
    position: f64,
    threshold: f64,
}

impl ScrollFollower {
    pub fn new(threshold: f64) -> Self {
        Self {
            position: 0.0,
            threshold,
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    /// Host reports a scroll it performed itself (user drag, resize).
    pub fn set_position(&mut self, position: f64) {
        self.position = position;
    }

    /// New position to scroll to, or `None` when within the threshold.
    pub fn follow(&mut self, target: f64) -> Option<f64> {
        if (target - self.position).abs() > self.threshold {
            self.position = target;
            Some(target)
        } else {
            None
        }
    }
}

/// A configured view with its scroll state.
#[derive(Debug, Clone)]
pub struct StaffView {
    config: ViewConfig,
    scroll: ScrollFollower,
}

impl StaffView {
    pub fn new(config: ViewConfig) -> StaffResult<Self> {
        config.validate()?;
        let scroll = ScrollFollower::new(config.scroll_threshold);
        Ok(Self { config, scroll })
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn scroll(&self) -> &ScrollFollower {
        &self.scroll
    }

    pub fn scroll_mut(&mut self) -> &mut ScrollFollower {
        &mut self.scroll
    }

    pub fn frame(&self, input: &ViewInput) -> StaffResult<ViewFrame> {
        build_frame(&self.config, input)
    }

    /// Build a frame and the scroll instruction for it, if any.
    pub fn update(&mut self, input: &ViewInput) -> StaffResult<(ViewFrame, Option<f64>)> {
        let frame = self.frame(input)?;
        let scroll_to = self.scroll.follow(frame.scroll_target);
        Ok((frame, scroll_to))
    }
}

/// Serialize a frame to JSON.
pub fn frame_to_json(frame: &ViewFrame) -> StaffResult<String> {
    Ok(serde_json::to_string(frame)?)
}

/// Parse a `ViewInput` JSON document and build its frame with default config.
pub fn frame_from_input_json(json: &str) -> StaffResult<ViewFrame> {
    let input: ViewInput = serde_json::from_str(json)?;
    build_frame(&ViewConfig::default(), &input)
}
