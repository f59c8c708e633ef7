//! Segment derivation: canonical grid + rapid ranges + song duration in,
//! ordered contiguous segment list out.
//!
//! Derivation is pure and idempotent; undo/redo snapshots raw marks only
//! and re-derives on restore.

use ordered_float::OrderedFloat;

use super::normalize::{grid_points, normalize_grid, GridPoint};
use super::timebase::{frame_to_seconds, seconds_to_frame};
use super::RAPID_EPSILON;
use crate::model::project::{Layer, RapidRange, Segment, SegmentKind};
use crate::util::timing::ScopedTimer;

/// Derive the ordered segment list for one layer.
///
/// Boundaries are `0`, every grid frame within the song, and the final
/// frame. Cut points that round to the same frame collapse into one
/// boundary, so the output can hold fewer than `points.len() + 1` segments;
/// it always tiles `[0, total_frames)` with no gaps or overlaps.
pub fn derive_segments(
    points: &[GridPoint],
    ranges: &[RapidRange],
    fps: u32,
    duration_seconds: f64,
) -> Vec<Segment> {
    let _timer = ScopedTimer::debug("derive_segments");
    let total_frames = seconds_to_frame(duration_seconds, fps);

    let mut boundaries: Vec<u64> = Vec::with_capacity(points.len() + 2);
    boundaries.push(0);
    boundaries.extend(points.iter().map(|p| p.frame).filter(|&f| f < total_frames));
    boundaries.push(total_frames);
    boundaries.sort_unstable();
    boundaries.dedup();

    let mut segments = Vec::with_capacity(boundaries.len().saturating_sub(1));
    for pair in boundaries.windows(2) {
        let (start_frame, end_frame) = (pair[0], pair[1]);
        // The mark that opens this segment supplies its payload; the
        // implicit leading segment has no authored mark behind it.
        let payload = points
            .iter()
            .find(|p| p.frame == start_frame)
            .map(|p| p.payload.clone())
            .unwrap_or_default();
        let (kind, rapid_interval) = classify(start_frame, end_frame, ranges, fps);
        segments.push(Segment {
            index: segments.len() + 1,
            start_frame,
            end_frame,
            kind,
            rapid_interval,
            payload,
        });
    }
    segments
}

/// Normalize a layer's raw marks and derive its schedule in one step.
pub fn derive_layer_segments(layer: &Layer, fps: u32, duration_seconds: f64) -> Vec<Segment> {
    let frames: Option<Vec<f64>> = layer
        .beat_grid_frames
        .as_ref()
        .map(|v| v.iter().map(|&f| f as f64).collect());
    let grid = normalize_grid(frames.as_deref(), Some(&layer.beat_grid), fps);
    let points = grid_points(&grid, &layer.beat_metadata);
    derive_segments(&points, layer.active_rapid_ranges(), fps, duration_seconds)
}

/// A segment is rapid when its seconds-interval overlaps an active rapid
/// range. When several ranges overlap, the one covering the most of the
/// segment wins; first match would misattribute intent once ranges get
/// adjusted interactively.
fn classify(
    start_frame: u64,
    end_frame: u64,
    ranges: &[RapidRange],
    fps: u32,
) -> (SegmentKind, Option<OrderedFloat<f64>>) {
    let seg_start = frame_to_seconds(start_frame, fps);
    let seg_end = frame_to_seconds(end_frame, fps);

    let mut best: Option<(f64, f64)> = None; // (overlap, interval)
    for range in ranges {
        if !range.is_valid(fps) || !range.overlaps(seg_start, seg_end, RAPID_EPSILON) {
            continue;
        }
        let overlap = range.overlap_amount(seg_start, seg_end);
        // A range that merely touches a boundary does not claim the segment.
        if overlap < RAPID_EPSILON {
            continue;
        }
        if best.map_or(true, |(b, _)| overlap > b) {
            best = Some((overlap, range.interval));
        }
    }

    match best {
        Some((_, interval)) => (SegmentKind::Rapid, Some(OrderedFloat(interval))),
        None => (SegmentKind::Regular, None),
    }
}
