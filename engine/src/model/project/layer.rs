use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::payload::SegmentPayload;
use super::rapid::RapidRange;
use super::segment::Segment;

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")] // Serialize as "video", "cutout", etc.
pub enum LayerKind {
    Video,
    Cutout,
    Captions,
    Stills,
    Waveform,
}

impl LayerKind {
    /// Rapid-clip ranges apply to the base video and cutout layers only.
    pub fn supports_rapid(&self) -> bool {
        matches!(self, LayerKind::Video | LayerKind::Cutout)
    }

    /// Waveform is display-only and never carries a derived schedule.
    pub fn is_schedulable(&self) -> bool {
        !matches!(self, LayerKind::Waveform)
    }
}

impl std::fmt::Display for LayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LayerKind::Video => "video",
            LayerKind::Cutout => "cutout",
            LayerKind::Captions => "captions",
            LayerKind::Stills => "stills",
            LayerKind::Waveform => "waveform",
        };
        write!(f, "{}", s)
    }
}

/// An independently-scheduled track. Owns its raw second-based marks (the
/// authoritative source) and the last-derived segment list.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: LayerKind,
    pub name: String,
    /// Cut marks in seconds, as authored.
    #[serde(default)]
    pub beat_grid: Vec<f64>,
    /// Frame-exact cut marks. When present they take precedence over
    /// `beat_grid` so already-exact frames are not re-rounded.
    #[serde(default)]
    pub beat_grid_frames: Option<Vec<u64>>,
    /// Per-mark metadata, positionally aligned with the normalized grid.
    #[serde(default)]
    pub beat_metadata: Vec<SegmentPayload>,
    #[serde(default, rename = "rapidClipRanges")]
    pub rapid_ranges: Vec<RapidRange>,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

impl Layer {
    pub fn new(kind: LayerKind, name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            name: name.to_string(),
            beat_grid: Vec::new(),
            beat_grid_frames: None,
            beat_metadata: Vec::new(),
            rapid_ranges: Vec::new(),
            segments: Vec::new(),
        }
    }

    /// Whether the user has authored any cut marks. A layer without marks
    /// is unused and carries no derived schedule.
    pub fn has_marks(&self) -> bool {
        !self.beat_grid.is_empty()
            || self
                .beat_grid_frames
                .as_ref()
                .map_or(false, |f| !f.is_empty())
    }

    /// Rapid ranges that actually apply to this layer.
    pub fn active_rapid_ranges(&self) -> &[RapidRange] {
        if self.kind.supports_rapid() {
            &self.rapid_ranges
        } else {
            &[]
        }
    }
}
