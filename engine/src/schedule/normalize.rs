//! Canonicalization of raw authored marks into frame grids.
//!
//! Malformed entries (non-finite, negative) are dropped, not rejected:
//! authoring tools produce transient invalid states while the user types.
//! Strict validation happens only at persistence time.

use serde::{Deserialize, Serialize};

use super::timebase::{frame_to_seconds, seconds_to_frame};
use crate::model::project::{RapidRange, SegmentPayload};

/// One normalized cut mark with its metadata. Pairing frame and payload in
/// a single array removes the index drift a parallel metadata array invites.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct GridPoint {
    pub frame: u64,
    pub payload: SegmentPayload,
}

/// Frame plus its display time, for UI readouts. The time is always
/// recomputed from the frame, never retained independently.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FrameTimePair {
    pub frame: u64,
    pub time: f64,
}

/// Produce the canonical frame grid from whichever raw representation is
/// present. An explicit frame array takes precedence over a seconds array,
/// so already-exact frame data is not re-rounded.
pub fn normalize_grid(frames: Option<&[f64]>, seconds: Option<&[f64]>, fps: u32) -> Vec<u64> {
    let mut grid: Vec<u64> = match (frames, seconds) {
        (Some(frames), _) if !frames.is_empty() => frames
            .iter()
            .filter(|v| keep_mark(**v))
            .map(|v| v.round() as u64)
            .collect(),
        (_, Some(seconds)) => seconds
            .iter()
            .filter(|v| keep_mark(**v))
            .map(|&t| seconds_to_frame(t, fps))
            .collect(),
        _ => Vec::new(),
    };
    grid.sort_unstable();
    grid.dedup();
    grid
}

fn keep_mark(value: f64) -> bool {
    if value.is_finite() && value >= 0.0 {
        true
    } else {
        log::debug!("dropping malformed mark {}", value);
        false
    }
}

/// Pair a canonical grid with positionally-aligned metadata. Marks beyond
/// the metadata length receive an empty payload.
pub fn grid_points(grid: &[u64], metadata: &[SegmentPayload]) -> Vec<GridPoint> {
    grid.iter()
        .enumerate()
        .map(|(i, &frame)| GridPoint {
            frame,
            payload: metadata.get(i).cloned().unwrap_or_default(),
        })
        .collect()
}

pub fn frame_time_pairs(grid: &[u64], fps: u32) -> Vec<FrameTimePair> {
    grid.iter()
        .map(|&frame| FrameTimePair {
            frame,
            time: frame_to_seconds(frame, fps),
        })
        .collect()
}

/// Expand rapid ranges into the merged, frame-aligned set of cut points:
/// `start, start + interval, start + 2*interval, …` while `< end`, each
/// rounded to the nearest frame. Kept separate from the main cut grid;
/// rapid frames add density inside already-derived segments.
pub fn expand_rapid_ranges(ranges: &[RapidRange], fps: u32) -> Vec<u64> {
    let mut frames = Vec::new();
    for range in ranges {
        if !range.is_valid(fps) {
            log::debug!(
                "skipping invalid rapid range {}..{} @ {}",
                range.start,
                range.end,
                range.interval
            );
            continue;
        }
        let mut k = 0u64;
        loop {
            let t = range.start + k as f64 * range.interval;
            if t >= range.end {
                break;
            }
            frames.push(seconds_to_frame(t, fps));
            k += 1;
        }
    }
    frames.sort_unstable();
    frames.dedup();
    frames
}
