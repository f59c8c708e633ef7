//! Seconds/frame conversion at the project frame rate.
//!
//! These are pure arithmetic primitives. Inputs are clamped to `>= 0` by
//! callers, not here.

/// Nearest frame index for a time in seconds. Rounds, never truncates:
/// truncation shifts every downstream cut earlier and the error compounds
/// over a full song.
pub fn seconds_to_frame(t: f64, fps: u32) -> u64 {
    (t * fps as f64).round() as u64
}

/// Time in seconds of a frame index. Exact when `fps` divides evenly,
/// otherwise the nearest double.
pub fn frame_to_seconds(frame: u64, fps: u32) -> f64 {
    frame as f64 / fps as f64
}
