use serde::{Deserialize, Serialize};

/// A time region where cuts recur every `interval` seconds instead of
/// following the layer's main beat grid.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RapidRange {
    pub start: f64,
    pub end: f64,
    pub interval: f64,
}

impl RapidRange {
    pub fn new(start: f64, end: f64, interval: f64) -> Self {
        Self {
            start,
            end,
            interval,
        }
    }

    /// A range is usable only when it is finite, forward, and its interval
    /// is at least one frame long.
    pub fn is_valid(&self, fps: u32) -> bool {
        self.start.is_finite()
            && self.end.is_finite()
            && self.interval.is_finite()
            && self.start >= 0.0
            && self.end > self.start
            && self.interval >= 1.0 / fps as f64
    }

    /// Overlap test against a `[seg_start, seg_end)` interval in seconds.
    /// `epsilon` tolerates float rounding at segment boundaries.
    pub fn overlaps(&self, seg_start: f64, seg_end: f64, epsilon: f64) -> bool {
        self.start <= seg_end + epsilon && self.end >= seg_start - epsilon
    }

    /// Seconds of overlap with `[seg_start, seg_end)`, zero when disjoint.
    pub fn overlap_amount(&self, seg_start: f64, seg_end: f64) -> f64 {
        (self.end.min(seg_end) - self.start.max(seg_start)).max(0.0)
    }
}
