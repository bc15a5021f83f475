//! Map playback time to horizontal positions on the measure grid.
//!
//! The scroll target and the playhead overlay both go through
//! `pixel_offset`; they differ only in the margin they pass.

use crate::error::{StaffError, StaffResult};

/// Pixel offset of the playback position on a fixed-width measure grid.
///
/// `left_margin + (t * bpm / 60) * (pixels_per_measure / beats_per_measure)`
pub fn pixel_offset(
    current_time_s: f64,
    bpm: f64,
    pixels_per_measure: f64,
    beats_per_measure: u32,
    left_margin: f64,
) -> StaffResult<f64> {
    let mapper = TimeMapper::new(bpm, pixels_per_measure, beats_per_measure)?;
    mapper.offset(current_time_s, left_margin)
}

/// Validated tempo and grid geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeMapper {
    bpm: f64,
    pixels_per_measure: f64,
    beats_per_measure: u32,
}

impl TimeMapper {
    pub fn new(bpm: f64, pixels_per_measure: f64, beats_per_measure: u32) -> StaffResult<Self> {
        if !bpm.is_finite() || bpm <= 0.0 {
            return Err(StaffError::InvalidParameter(format!(
                "tempo must be positive, got {bpm} bpm"
            )));
        }
        if !pixels_per_measure.is_finite() || pixels_per_measure < 0.0 {
            return Err(StaffError::InvalidParameter(format!(
                "measure width must be non-negative, got {pixels_per_measure}"
            )));
        }
        if beats_per_measure == 0 {
            return Err(StaffError::InvalidParameter(
                "beats per measure must be at least 1".into(),
            ));
        }
        Ok(Self {
            bpm,
            pixels_per_measure,
            beats_per_measure,
        })
    }

    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    pub fn beats_per_second(&self) -> f64 {
        self.bpm / 60.0
    }

    pub fn pixels_per_beat(&self) -> f64 {
        self.pixels_per_measure / self.beats_per_measure as f64
    }

    /// Wall-clock length of one measure.
    pub fn seconds_per_measure(&self) -> f64 {
        self.beats_per_measure as f64 / self.beats_per_second()
    }

    /// Beat position at `current_time_s`.
    pub fn beat_at(&self, current_time_s: f64) -> StaffResult<f64> {
        if !current_time_s.is_finite() || current_time_s < 0.0 {
            return Err(StaffError::InvalidParameter(format!(
                "playback time must be non-negative, got {current_time_s}"
            )));
        }
        Ok(current_time_s * self.beats_per_second())
    }

    pub fn offset(&self, current_time_s: f64, left_margin: f64) -> StaffResult<f64> {
        let beat = self.beat_at(current_time_s)?;
        Ok(left_margin + beat * self.pixels_per_beat())
    }

    /// 0-based index of the measure being played at `current_time_s`.
    pub fn measure_at(&self, current_time_s: f64) -> StaffResult<usize> {
        let beat = self.beat_at(current_time_s)?;
        Ok((beat / self.beats_per_measure as f64).floor() as usize)
    }
}
