//! End-to-end tests for the pure scheduling pipeline: normalize, derive,
//! edit, validate, summarize.

use ordered_float::OrderedFloat;

use engine::schedule::derive::{derive_layer_segments, derive_segments};
use engine::schedule::edit::{self, ResizeEdge};
use engine::schedule::normalize::{grid_points, normalize_grid};
use engine::schedule::stats::plan_stats;
use engine::schedule::timebase::{frame_to_seconds, seconds_to_frame};
use engine::schedule::min_segment_frames;
use engine::{EngineError, Layer, LayerKind, RapidRange, Segment, SegmentKind, SegmentPayload};

fn derive_from_seconds(
    seconds: &[f64],
    metadata: &[SegmentPayload],
    ranges: &[RapidRange],
    fps: u32,
    duration: f64,
) -> Vec<Segment> {
    let grid = normalize_grid(None, Some(seconds), fps);
    let points = grid_points(&grid, metadata);
    derive_segments(&points, ranges, fps, duration)
}

fn assert_tiles(segments: &[Segment], total_frames: u64) {
    assert!(!segments.is_empty());
    assert_eq!(segments[0].start_frame, 0);
    for pair in segments.windows(2) {
        assert_eq!(
            pair[0].end_frame, pair[1].start_frame,
            "schedule must be contiguous"
        );
    }
    assert_eq!(segments.last().unwrap().end_frame, total_frames);
}

#[test]
fn test_time_frame_round_trip_is_stable() {
    // Every frame of an hour-long song survives frame -> time -> frame
    // at all supported rates.
    for fps in [24u32, 25, 30, 60] {
        for frame in 0..=(fps as u64 * 3600) {
            let t = frame_to_seconds(frame, fps);
            assert_eq!(
                seconds_to_frame(t, fps),
                frame,
                "round trip drifted at fps={} frame={}",
                fps,
                frame
            );
        }
    }
}

#[test]
fn test_basic_derivation_scenario() {
    let metadata = [
        SegmentPayload::caption("verse"),
        SegmentPayload::caption("chorus"),
    ];
    let segments = derive_from_seconds(&[2.0, 5.0, 8.0], &metadata, &[], 30, 10.0);

    let spans: Vec<(u64, u64)> = segments
        .iter()
        .map(|s| (s.start_frame, s.end_frame))
        .collect();
    assert_eq!(spans, vec![(0, 60), (60, 150), (150, 240), (240, 300)]);
    assert_tiles(&segments, 300);

    // The implicit leading segment carries no authored payload; each mark's
    // payload lands on the segment it opens.
    assert_eq!(segments[0].payload, SegmentPayload::Empty);
    assert_eq!(segments[1].payload, SegmentPayload::caption("verse"));
    assert_eq!(segments[2].payload, SegmentPayload::caption("chorus"));
    assert_eq!(segments[3].payload, SegmentPayload::Empty);
}

#[test]
fn test_derivation_is_idempotent() {
    let mut layer = Layer::new(LayerKind::Video, "Video");
    layer.beat_grid = vec![1.0, 2.5, 7.25];
    layer.beat_metadata = vec![
        SegmentPayload::clip_slot(Some("a.mp4")),
        SegmentPayload::clip_slot(Some("b.mp4")),
    ];
    layer.rapid_ranges = vec![RapidRange::new(3.0, 5.0, 0.5)];

    let first = derive_layer_segments(&layer, 30, 10.0);
    let second = derive_layer_segments(&layer, 30, 10.0);
    assert_eq!(first, second);
    assert_tiles(&first, 300);
}

#[test]
fn test_marks_on_same_frame_collapse() {
    // 1.0s and 1.001s both round to frame 30: one boundary, two segments.
    let segments = derive_from_seconds(&[1.0, 1.001], &[], &[], 30, 4.0);
    assert_eq!(segments.len(), 2);
    assert_tiles(&segments, 120);
}

#[test]
fn test_marks_past_the_song_are_ignored() {
    let segments = derive_from_seconds(&[2.0, 12.0], &[], &[], 30, 10.0);
    let spans: Vec<(u64, u64)> = segments
        .iter()
        .map(|s| (s.start_frame, s.end_frame))
        .collect();
    assert_eq!(spans, vec![(0, 60), (60, 300)]);
}

#[test]
fn test_rapid_classification_with_interval() {
    let ranges = [RapidRange::new(4.0, 6.0, 0.25)];
    let segments = derive_from_seconds(&[2.0, 5.0, 8.0], &[], &ranges, 30, 10.0);

    assert_eq!(segments[0].kind, SegmentKind::Regular);
    assert_eq!(segments[1].kind, SegmentKind::Rapid);
    assert_eq!(segments[1].rapid_interval, Some(OrderedFloat(0.25)));
    assert_eq!(segments[2].kind, SegmentKind::Rapid);
    assert_eq!(segments[3].kind, SegmentKind::Regular);
    assert!(segments[3].rapid_interval.is_none());
}

#[test]
fn test_split_inside_a_segment() {
    let segments = derive_from_seconds(
        &[2.0, 5.0],
        &[SegmentPayload::caption("hook")],
        &[],
        30,
        10.0,
    );
    let split = edit::split_at(&segments, 3.0, 30).expect("split failed");

    assert_eq!(split.len(), segments.len() + 1);
    assert_tiles(&split, 300);
    assert_eq!(split[1].end_frame, 90);
    assert_eq!(split[2].start_frame, 90);
    // Both halves keep the payload of the segment that was split.
    assert_eq!(split[1].payload, SegmentPayload::caption("hook"));
    assert_eq!(split[2].payload, SegmentPayload::caption("hook"));
    assert_eq!(
        split.iter().map(|s| s.index).collect::<Vec<_>>(),
        vec![1, 2, 3, 4]
    );
}

#[test]
fn test_split_on_boundary_is_noop() {
    let segments = derive_from_seconds(&[2.0, 5.0], &[], &[], 30, 10.0);
    let split = edit::split_at(&segments, 2.0, 30).expect("split failed");
    assert_eq!(split, segments);
}

#[test]
fn test_split_too_close_to_boundary_rejected() {
    // 2.05s is one or two frames from the 2.0s boundary, below the
    // three-frame minimum at 30 fps.
    let segments = derive_from_seconds(&[2.0, 5.0], &[], &[], 30, 10.0);
    let err = edit::split_at(&segments, 2.05, 30).expect_err("split should fail");
    assert!(matches!(err, EngineError::TooShort { .. }), "got {:?}", err);
}

#[test]
fn test_resize_below_minimum_duration_rejected() {
    assert_eq!(min_segment_frames(30), 3);
    let segments = derive_from_seconds(&[2.0, 5.0], &[], &[], 30, 10.0);

    // Shrinking [60, 150) to 0.05s must be rejected, not clamped.
    let err = edit::resize(&segments, 2, ResizeEdge::End, 2.05, true, 30, 300)
        .expect_err("resize should fail");
    assert!(matches!(err, EngineError::TooShort { .. }), "got {:?}", err);
}

#[test]
fn test_resize_without_adjust_rejects_new_gap() {
    let segments = derive_from_seconds(&[2.0, 5.0], &[], &[], 30, 10.0);
    // Pulling the start of [60, 150) to 2.5s without moving the neighbor
    // would open a gap at frame 60.
    let err = edit::resize(&segments, 2, ResizeEdge::Start, 2.5, false, 30, 300)
        .expect_err("resize should fail");
    assert!(matches!(err, EngineError::Gap(60)), "got {:?}", err);
}

#[test]
fn test_resize_with_adjust_keeps_tiling() {
    let segments = derive_from_seconds(&[2.0, 5.0], &[], &[], 30, 10.0);
    let resized = edit::resize(&segments, 2, ResizeEdge::Start, 1.5, true, 30, 300)
        .expect("resize failed");
    assert_eq!(resized[0].end_frame, 45);
    assert_eq!(resized[1].start_frame, 45);
    assert_tiles(&resized, 300);
}

#[test]
fn test_delete_then_resize_closes_gap() {
    let segments = derive_from_seconds(&[2.0, 5.0], &[], &[], 30, 10.0);
    let after_delete = edit::delete(&segments, 2).expect("delete failed");
    assert_eq!(after_delete.len(), 2);
    assert_eq!(
        after_delete.iter().map(|s| s.index).collect::<Vec<_>>(),
        vec![1, 2]
    );

    // The transient gap fails the persistence check...
    let err = edit::validate_stable(&after_delete, 3, 300).expect_err("gap expected");
    assert!(matches!(err, EngineError::Gap(60)), "got {:?}", err);

    // ...until a resize extends the first segment across it.
    let fixed = edit::resize(&after_delete, 1, ResizeEdge::End, 5.0, false, 30, 300)
        .expect("resize failed");
    assert_tiles(&fixed, 300);
    assert!(edit::validate_stable(&fixed, 3, 300).is_ok());
}

#[test]
fn test_move_clamps_to_surrounding_gaps() {
    // A segment floating between two gaps (after deletes) can slide, but
    // never into its neighbors.
    let segments = vec![
        Segment::regular(1, 0, 60, SegmentPayload::Empty),
        Segment::regular(2, 90, 150, SegmentPayload::Empty),
        Segment::regular(3, 240, 300, SegmentPayload::Empty),
    ];
    let moved = edit::resize(&segments, 2, ResizeEdge::Move, 4.0, false, 30, 300)
        .expect("move failed");
    assert_eq!((moved[1].start_frame, moved[1].end_frame), (120, 180));

    // Pushing far right stops at the next segment.
    let moved = edit::resize(&segments, 2, ResizeEdge::Move, 9.0, false, 30, 300)
        .expect("move failed");
    assert_eq!((moved[1].start_frame, moved[1].end_frame), (180, 240));
}

#[test]
fn test_update_times_out_of_bounds_rejected() {
    let segments = derive_from_seconds(&[2.0, 5.0], &[], &[], 30, 10.0);
    let err = edit::update_times(&segments, 3, 5.0, 11.0, true, 30, 10.0)
        .expect_err("update should fail");
    assert!(matches!(err, EngineError::OutOfBounds { .. }), "got {:?}", err);
}

#[test]
fn test_update_times_moves_both_boundaries() {
    let segments = derive_from_seconds(&[2.0, 5.0], &[], &[], 30, 10.0);
    let updated = edit::update_times(&segments, 2, 1.9, 5.1, true, 30, 10.0)
        .expect("update failed");
    assert_eq!(updated[1].start_frame, 57);
    assert_eq!(updated[1].end_frame, 153);
    assert_tiles(&updated, 300);
}

#[test]
fn test_update_times_cannot_push_neighbor_past_its_end() {
    // Trailing gap after a delete: the last segment ends at frame 150 with
    // the song running to 300. Stretching the first segment to 6.0s with
    // neighbor adjustment would drive the neighbor's start past its own
    // end; the edit must be rejected, not committed with an inverted span.
    let segments = vec![
        Segment::regular(1, 0, 60, SegmentPayload::Empty),
        Segment::regular(2, 60, 150, SegmentPayload::Empty),
    ];
    let err = edit::update_times(&segments, 1, 0.0, 6.0, true, 30, 10.0)
        .expect_err("update should fail");
    assert!(matches!(err, EngineError::Overlap(_)), "got {:?}", err);
}

#[test]
fn test_plan_stats_over_derived_schedule() {
    let segments = derive_from_seconds(&[2.0, 5.0, 8.0], &[], &[], 30, 10.0);
    let stats = plan_stats(&segments);
    assert_eq!(stats.total_clips, 4);
    assert_eq!(stats.min_clip_frames, 60);
    assert_eq!(stats.max_clip_frames, 90);
    assert_eq!(stats.total_frames, 300);
    // Mean of 60, 90, 90, 60.
    assert_eq!(stats.avg_clip_frames, 75);
}

#[test]
fn test_plan_stats_empty() {
    let stats = plan_stats(&[]);
    assert_eq!(stats.total_clips, 0);
    assert_eq!(stats.total_frames, 0);
}
