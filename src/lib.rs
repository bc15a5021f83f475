//! staffscroll — grand-staff measure layout and playhead mapping for a
//! score view that scrolls along with audio playback.
//!
//! The pure core groups timed note events into measures and chords and maps
//! playback time to pixels; rendering goes through the `StaffRenderer`
//! trait, with an SVG implementation included.
//!
//! # Example
//! ```
//! use staffscroll::{build_frame, render_frame_to_svg, NoteEvent, Staff, ViewConfig, ViewInput};
//!
//! let notes = vec![NoteEvent::new("a", 60, "C4", 0.0, 4.0, Staff::Treble)];
//! let mut input = ViewInput::new(notes);
//! input.current_time = 1.0;
//!
//! let frame = build_frame(&ViewConfig::default(), &input).unwrap();
//! assert_eq!(frame.measures.len(), 1);
//! let svg = render_frame_to_svg(&frame).unwrap();
//! assert!(svg.starts_with("<svg"));
//! ```

pub mod annotate;
pub mod config;
pub mod error;
pub mod grouper;
pub mod model;
pub mod playback;
pub mod quantize;
pub mod renderer;
pub mod timemap;

#[cfg(target_os = "android")]
pub mod android;

pub use annotate::{annotate, Accidental, AnnotatedChord, AnnotatedMeasure, AnnotatedNote, Annotation};
pub use config::ViewConfig;
pub use error::{StaffError, StaffResult};
pub use grouper::{
    group_into_measures, group_into_measures_default, measure_count, validate_notes, MAX_MEASURES,
};
pub use model::*;
pub use playback::{
    build_frame, build_frame_with, frame_from_input_json, frame_to_json, MeasureGrid,
    ScrollFollower, StaffView, ViewFrame, ViewInput,
};
pub use quantize::{beats_to_notated_duration, DurationQuantizer, NearestDuration};
pub use renderer::{render_frame, render_frame_to_svg, StaffRenderer, SvgStaffRenderer};
pub use timemap::{pixel_offset, TimeMapper};

/// Parse a `ViewInput` JSON document and return the frame as JSON.
pub fn frame_json_from_input_json(json: &str) -> StaffResult<String> {
    frame_to_json(&frame_from_input_json(json)?)
}

/// Parse a `ViewInput` JSON document and render it to SVG.
pub fn render_input_json_to_svg(json: &str) -> StaffResult<String> {
    render_frame_to_svg(&frame_from_input_json(json)?)
}

// ═══════════════════════════════════════════════════════════════════════
// C FFI — for iOS (static library) and Android (JNI)
// ═══════════════════════════════════════════════════════════════════════

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use log::warn;

/// Read a C string argument as UTF-8.
///
/// # Safety
/// `ptr` must be null or a valid null-terminated C string.
unsafe fn c_arg<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

fn into_c_string(result: StaffResult<String>) -> *mut c_char {
    match result {
        Ok(s) => match CString::new(s) {
            Ok(c) => c.into_raw(),
            Err(e) => {
                warn!("staffscroll bridge output has an interior NUL at byte {}", e.nul_position());
                std::ptr::null_mut()
            }
        },
        Err(e) => {
            warn!("staffscroll bridge call failed: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Build a view frame from a `ViewInput` JSON document and return it as JSON.
/// The caller must free the returned string with `staffscroll_free_string`.
///
/// # Safety
/// `input_json` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn staffscroll_frame_json(input_json: *const c_char) -> *mut c_char {
    match unsafe { c_arg(input_json) } {
        Some(json) => into_c_string(frame_json_from_input_json(json)),
        None => std::ptr::null_mut(),
    }
}

/// Render a `ViewInput` JSON document to SVG.
/// The caller must free the returned string with `staffscroll_free_string`.
///
/// # Safety
/// `input_json` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn staffscroll_render_svg(input_json: *const c_char) -> *mut c_char {
    match unsafe { c_arg(input_json) } {
        Some(json) => into_c_string(render_input_json_to_svg(json)),
        None => std::ptr::null_mut(),
    }
}

/// Pixel offset of the playback position. Returns NaN for invalid parameters
/// (non-positive tempo, negative time, zero beats per measure).
#[no_mangle]
pub extern "C" fn staffscroll_pixel_offset(
    current_time_s: f64,
    bpm: f64,
    pixels_per_measure: f64,
    beats_per_measure: u32,
    left_margin: f64,
) -> f64 {
    pixel_offset(current_time_s, bpm, pixels_per_measure, beats_per_measure, left_margin)
        .unwrap_or(f64::NAN)
}

/// Free a string previously returned by staffscroll functions.
///
/// # Safety
/// `ptr` must be a string previously returned by a staffscroll function, or null.
#[no_mangle]
pub unsafe extern "C" fn staffscroll_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}
