pub mod derive;
pub mod edit;
pub mod normalize;
pub mod stats;
pub mod timebase;

/// Shortest segment any edit may produce, in seconds.
pub const MIN_SEGMENT_SECONDS: f64 = 0.1;

/// Tolerance for boundary containment tests in the seconds domain.
pub const TIME_EPSILON: f64 = 1e-6;

/// Tolerance for rapid-range overlap tests at segment boundaries.
pub const RAPID_EPSILON: f64 = 1e-3;

/// Minimum segment length in frames at the given frame rate.
pub fn min_segment_frames(fps: u32) -> u64 {
    (MIN_SEGMENT_SECONDS * fps as f64).ceil() as u64
}
