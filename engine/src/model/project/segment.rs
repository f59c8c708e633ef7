use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use super::payload::SegmentPayload;
use crate::schedule::timebase::frame_to_seconds;

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")] // Serialize as "regular" / "rapid".
pub enum SegmentKind {
    Regular,
    Rapid,
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SegmentKind::Regular => "regular",
            SegmentKind::Rapid => "rapid",
        };
        write!(f, "{}", s)
    }
}

/// One schedulable, frame-bounded unit on a layer.
///
/// Frames are the source of truth; all seconds values are recomputed from
/// them on demand and never stored.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// 1-based position within the layer's ordered segment list.
    pub index: usize,
    pub start_frame: u64,
    pub end_frame: u64,
    #[serde(rename = "type")]
    pub kind: SegmentKind,
    /// Cut interval in seconds, present only on rapid segments.
    #[serde(default)]
    pub rapid_interval: Option<OrderedFloat<f64>>,
    #[serde(default)]
    pub payload: SegmentPayload,
}

impl Segment {
    pub fn regular(index: usize, start_frame: u64, end_frame: u64, payload: SegmentPayload) -> Self {
        Self {
            index,
            start_frame,
            end_frame,
            kind: SegmentKind::Regular,
            rapid_interval: None,
            payload,
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.end_frame - self.start_frame
    }

    pub fn start_seconds(&self, fps: u32) -> f64 {
        frame_to_seconds(self.start_frame, fps)
    }

    pub fn end_seconds(&self, fps: u32) -> f64 {
        frame_to_seconds(self.end_frame, fps)
    }

    pub fn duration_seconds(&self, fps: u32) -> f64 {
        frame_to_seconds(self.frame_count(), fps)
    }
}
