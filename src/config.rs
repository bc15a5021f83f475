//! View configuration: grid geometry, margins, and scroll behavior.
//!
//! All distances are in SVG user units (pixels on a 1:1 host view).
//! Hosts can override any subset of fields from JSON; missing fields
//! keep their defaults.

use serde::{Deserialize, Serialize};

use crate::error::{StaffError, StaffResult};

/// Default tempo when the host does not supply one.
pub const DEFAULT_BPM: u32 = 120;
/// 4/4 time.
pub const DEFAULT_BEATS_PER_MEASURE: u32 = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub beats_per_measure: u32,
    /// Width of one measure on the grid
    pub measure_width: f64,
    /// X of the first measure's left edge
    pub staff_left: f64,
    /// Margin passed to the time mapping for the playhead overlay
    pub playhead_margin: f64,
    /// Margin passed to the time mapping for the auto-scroll target.
    /// Negative values keep the playhead inside the viewport.
    pub scroll_margin: f64,
    /// Minimum distance before the view scrolls again
    pub scroll_threshold: f64,
    /// Y of the treble staff's top line
    pub treble_y: f64,
    /// Y of the bass staff's top line
    pub bass_y: f64,
    /// Total height of the rendering surface
    pub view_height: f64,
    pub default_bpm: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            beats_per_measure: DEFAULT_BEATS_PER_MEASURE,
            measure_width: 250.0,
            staff_left: 10.0,
            playhead_margin: 20.0,
            scroll_margin: -100.0,
            scroll_threshold: 10.0,
            treble_y: 40.0,
            bass_y: 140.0,
            view_height: 240.0,
            default_bpm: DEFAULT_BPM,
        }
    }
}

impl ViewConfig {
    /// Parse a JSON object of overrides.
    pub fn from_json(json: &str) -> StaffResult<Self> {
        let config: ViewConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> StaffResult<()> {
        if self.beats_per_measure == 0 {
            return Err(StaffError::InvalidParameter(
                "beats_per_measure must be at least 1".into(),
            ));
        }
        if !(self.measure_width.is_finite() && self.measure_width > 0.0) {
            return Err(StaffError::InvalidParameter(format!(
                "measure_width must be positive, got {}",
                self.measure_width
            )));
        }
        if !(self.view_height.is_finite() && self.view_height > 0.0) {
            return Err(StaffError::InvalidParameter(format!(
                "view_height must be positive, got {}",
                self.view_height
            )));
        }
        if self.bass_y <= self.treble_y {
            return Err(StaffError::InvalidParameter(
                "bass staff must sit below the treble staff".into(),
            ));
        }
        if self.default_bpm == 0 {
            return Err(StaffError::InvalidParameter("default_bpm must be positive".into()));
        }
        if !self.scroll_threshold.is_finite() || self.scroll_threshold < 0.0 {
            return Err(StaffError::InvalidParameter(
                "scroll_threshold must be non-negative".into(),
            ));
        }
        Ok(())
    }

    /// Total content width for `measure_count` measures.
    pub fn content_width(&self, measure_count: usize) -> f64 {
        self.staff_left * 2.0 + measure_count as f64 * self.measure_width
    }
}
