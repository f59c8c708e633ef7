use serde::{Deserialize, Serialize};

use crate::model::project::Segment;

/// Summary statistics over one layer's derived schedule, used for
/// validation feedback and persisted into project metadata.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlanStats {
    pub total_clips: usize,
    pub min_clip_frames: u64,
    pub max_clip_frames: u64,
    /// Mean duration, rounded to the nearest frame for display.
    pub avg_clip_frames: u64,
    pub total_frames: u64,
}

/// Fold a segment list into its summary. An empty list yields all zeros.
pub fn plan_stats(segments: &[Segment]) -> PlanStats {
    if segments.is_empty() {
        return PlanStats::default();
    }
    let mut min = u64::MAX;
    let mut max = 0u64;
    let mut sum = 0u64;
    for seg in segments {
        let frames = seg.frame_count();
        min = min.min(frames);
        max = max.max(frames);
        sum += frames;
    }
    PlanStats {
        total_clips: segments.len(),
        min_clip_frames: min,
        max_clip_frames: max,
        avg_clip_frames: (sum as f64 / segments.len() as f64).round() as u64,
        total_frames: sum,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::project::{Segment, SegmentPayload};

    #[test]
    fn test_empty_list_yields_zero_stats() {
        assert_eq!(plan_stats(&[]), PlanStats::default());
    }

    #[test]
    fn test_stats_fold() {
        let segments = vec![
            Segment::regular(1, 0, 60, SegmentPayload::Empty),
            Segment::regular(2, 60, 150, SegmentPayload::Empty),
            Segment::regular(3, 150, 300, SegmentPayload::Empty),
        ];
        let stats = plan_stats(&segments);
        assert_eq!(stats.total_clips, 3);
        assert_eq!(stats.min_clip_frames, 60);
        assert_eq!(stats.max_clip_frames, 150);
        assert_eq!(stats.avg_clip_frames, 100);
        assert_eq!(stats.total_frames, 300);
    }
}
