//! JNI bindings for Android.
//!
//! These functions are called from Kotlin via the JNI bridge.

use jni::objects::{JClass, JString};
use jni::sys::{jdouble, jint, jstring};
use jni::JNIEnv;

use crate::{frame_json_from_input_json, pixel_offset, render_input_json_to_svg, StaffResult};

fn to_jstring(env: &mut JNIEnv, result: StaffResult<String>) -> jstring {
    match result {
        Ok(s) => match env.new_string(&s) {
            Ok(js) => js.into_raw(),
            Err(_) => std::ptr::null_mut(),
        },
        Err(e) => {
            log::warn!("staffscroll JNI call failed: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Render a view input document to SVG.
///
/// Called from Kotlin as:
///   external fun renderSvg(inputJson: String): String?
#[no_mangle]
pub extern "system" fn Java_com_staffscroll_StaffLib_renderSvg(
    mut env: JNIEnv,
    _class: JClass,
    input_json: JString,
) -> jstring {
    let json: String = match env.get_string(&input_json) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };
    let result = render_input_json_to_svg(&json);
    to_jstring(&mut env, result)
}

/// Build the view frame for a view input document, as JSON.
///
/// Called from Kotlin as:
///   external fun frameJson(inputJson: String): String?
#[no_mangle]
pub extern "system" fn Java_com_staffscroll_StaffLib_frameJson(
    mut env: JNIEnv,
    _class: JClass,
    input_json: JString,
) -> jstring {
    let json: String = match env.get_string(&input_json) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };
    let result = frame_json_from_input_json(&json);
    to_jstring(&mut env, result)
}

/// Playhead / scroll offset in pixels, NaN on invalid parameters.
///
/// Called from Kotlin as:
///   external fun pixelOffset(time: Double, bpm: Double, measureWidth: Double,
///                            beatsPerMeasure: Int, margin: Double): Double
#[no_mangle]
pub extern "system" fn Java_com_staffscroll_StaffLib_pixelOffset(
    _env: JNIEnv,
    _class: JClass,
    current_time_s: jdouble,
    bpm: jdouble,
    pixels_per_measure: jdouble,
    beats_per_measure: jint,
    left_margin: jdouble,
) -> jdouble {
    if beats_per_measure <= 0 {
        return f64::NAN;
    }
    pixel_offset(
        current_time_s,
        bpm,
        pixels_per_measure,
        beats_per_measure as u32,
        left_margin,
    )
    .unwrap_or(f64::NAN)
}
