//! Pure segment editing operations.
//!
//! Each operation takes the current segment list and returns either a fully
//! validated replacement or an error; the input is never mutated, so a
//! failed edit leaves the caller's stable state untouched.

use crate::error::EngineError;
use crate::model::project::Segment;
use crate::schedule::timebase::seconds_to_frame;
use crate::schedule::{min_segment_frames, MIN_SEGMENT_SECONDS, TIME_EPSILON};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Start,
    End,
    /// Shift both boundaries together, keeping the duration.
    Move,
}

/// Split the segment strictly containing `time` into two at the nearest
/// frame. Both halves keep a copy of the original payload; dividing caption
/// text between halves is left to the user. A time on an existing boundary
/// or outside every segment is a no-op.
pub fn split_at(segments: &[Segment], time: f64, fps: u32) -> Result<Vec<Segment>, EngineError> {
    let pos = segments.iter().position(|s| {
        time > s.start_seconds(fps) + TIME_EPSILON && time < s.end_seconds(fps) - TIME_EPSILON
    });
    let Some(pos) = pos else {
        return Ok(segments.to_vec());
    };

    let cut = seconds_to_frame(time, fps);
    let seg = &segments[pos];
    // Rounding can still land the cut on a boundary of the hit segment.
    if cut <= seg.start_frame || cut >= seg.end_frame {
        return Ok(segments.to_vec());
    }

    let min = min_segment_frames(fps);
    let left = cut - seg.start_frame;
    let right = seg.end_frame - cut;
    if left < min || right < min {
        return Err(EngineError::TooShort {
            frames: left.min(right),
            min_frames: min,
        });
    }

    let mut out = segments.to_vec();
    let mut second = out[pos].clone();
    second.start_frame = cut;
    out[pos].end_frame = cut;
    out.insert(pos + 1, second);
    reindex(&mut out);
    Ok(out)
}

/// Move one boundary (or the whole segment) to `new_time`.
///
/// Edge moves are clamped so they never cross into the adjacent segment;
/// a move that would leave any segment under the minimum duration is
/// rejected, not clamped. With `adjust_neighbors` the touching neighbor
/// boundary follows to preserve contiguity, without it any move that
/// would open a gap or overlap is rejected.
pub fn resize(
    segments: &[Segment],
    index: usize,
    edge: ResizeEdge,
    new_time: f64,
    adjust_neighbors: bool,
    fps: u32,
    total_frames: u64,
) -> Result<Vec<Segment>, EngineError> {
    let pos = index
        .checked_sub(1)
        .filter(|&p| p < segments.len())
        .ok_or(EngineError::SegmentNotFound(index))?;
    let min = min_segment_frames(fps);
    let mut out = segments.to_vec();
    let target = seconds_to_frame(new_time.max(0.0), fps);

    match edge {
        ResizeEdge::Start => {
            let mut frame = target;
            if pos > 0 {
                // Never cross into the neighbor; when it follows the drag
                // its far boundary is the limit, otherwise its near one.
                let floor = if adjust_neighbors {
                    out[pos - 1].start_frame
                } else {
                    out[pos - 1].end_frame
                };
                frame = frame.max(floor);
            }
            if frame >= out[pos].end_frame {
                return Err(EngineError::TooShort {
                    frames: 0,
                    min_frames: min,
                });
            }
            out[pos].start_frame = frame;
            if adjust_neighbors && pos > 0 {
                out[pos - 1].end_frame = frame;
            }
        }
        ResizeEdge::End => {
            let ceil = if pos + 1 < out.len() {
                if adjust_neighbors {
                    out[pos + 1].end_frame
                } else {
                    out[pos + 1].start_frame
                }
            } else {
                total_frames
            };
            let frame = target.min(ceil);
            if frame <= out[pos].start_frame {
                return Err(EngineError::TooShort {
                    frames: 0,
                    min_frames: min,
                });
            }
            out[pos].end_frame = frame;
            if adjust_neighbors && pos + 1 < out.len() {
                out[pos + 1].start_frame = frame;
            }
        }
        ResizeEdge::Move => {
            let width = out[pos].frame_count();
            let lo = if pos > 0 { out[pos - 1].end_frame } else { 0 };
            let hi = if pos + 1 < out.len() {
                out[pos + 1].start_frame
            } else {
                total_frames
            }
            .saturating_sub(width);
            let frame = target.clamp(lo, hi.max(lo));
            out[pos].start_frame = frame;
            out[pos].end_frame = frame + width;
        }
    }

    validate_commit(segments, &out, min, total_frames)?;
    Ok(out)
}

/// Remove a segment. The resulting gap is a permitted transient state; the
/// caller resolves it with a resize before the schedule can be persisted.
pub fn delete(segments: &[Segment], index: usize) -> Result<Vec<Segment>, EngineError> {
    let pos = index
        .checked_sub(1)
        .filter(|&p| p < segments.len())
        .ok_or(EngineError::SegmentNotFound(index))?;
    let mut out = segments.to_vec();
    out.remove(pos);
    reindex(&mut out);
    Ok(out)
}

/// Retarget both boundaries of a segment directly.
pub fn update_times(
    segments: &[Segment],
    index: usize,
    new_start: f64,
    new_end: f64,
    adjust_neighbors: bool,
    fps: u32,
    duration_seconds: f64,
) -> Result<Vec<Segment>, EngineError> {
    let pos = index
        .checked_sub(1)
        .filter(|&p| p < segments.len())
        .ok_or(EngineError::SegmentNotFound(index))?;
    if new_start < 0.0 {
        return Err(EngineError::OutOfBounds {
            value: new_start,
            max: duration_seconds,
        });
    }
    if new_end > duration_seconds + TIME_EPSILON {
        return Err(EngineError::OutOfBounds {
            value: new_end,
            max: duration_seconds,
        });
    }
    let min = min_segment_frames(fps);
    if new_end - new_start < MIN_SEGMENT_SECONDS - TIME_EPSILON {
        return Err(EngineError::TooShort {
            frames: seconds_to_frame((new_end - new_start).max(0.0), fps),
            min_frames: min,
        });
    }

    let mut out = segments.to_vec();
    let start_frame = seconds_to_frame(new_start, fps);
    let end_frame = seconds_to_frame(new_end, fps);
    out[pos].start_frame = start_frame;
    out[pos].end_frame = end_frame;
    if adjust_neighbors {
        if pos > 0 {
            out[pos - 1].end_frame = start_frame;
        }
        if pos + 1 < out.len() {
            out[pos + 1].start_frame = end_frame;
        }
    }

    let total_frames = seconds_to_frame(duration_seconds, fps);
    validate_commit(segments, &out, min, total_frames)?;
    Ok(out)
}

/// Stability check used before persistence/export: the list must tile
/// `[0, total_frames)` with no gaps or overlaps and respect the minimum
/// duration. An empty list is vacuously stable (nothing scheduled).
pub fn validate_stable(
    segments: &[Segment],
    min_frames: u64,
    total_frames: u64,
) -> Result<(), EngineError> {
    let Some(first) = segments.first() else {
        return Ok(());
    };
    if first.start_frame != 0 {
        return Err(EngineError::Gap(0));
    }
    for pair in segments.windows(2) {
        if pair[0].end_frame < pair[1].start_frame {
            return Err(EngineError::Gap(pair[0].end_frame));
        }
        if pair[0].end_frame > pair[1].start_frame {
            return Err(EngineError::Overlap(pair[1].start_frame));
        }
    }
    for seg in segments {
        if seg.frame_count() < min_frames {
            return Err(EngineError::TooShort {
                frames: seg.frame_count(),
                min_frames,
            });
        }
    }
    let last = segments.last().expect("non-empty");
    if last.end_frame > total_frames {
        return Err(EngineError::PastEnd {
            end: last.end_frame,
            total: total_frames,
        });
    }
    if last.end_frame < total_frames {
        return Err(EngineError::Gap(last.end_frame));
    }
    Ok(())
}

/// Re-assign 1-based indices after a structural change.
pub fn reindex(segments: &mut [Segment]) {
    for (i, seg) in segments.iter_mut().enumerate() {
        seg.index = i + 1;
    }
}

/// Commit validation for same-length edits: ordering must be preserved,
/// every segment keeps the minimum duration and stays within the song, no
/// overlap anywhere, and no adjacency that was contiguous before may open
/// into a gap. Pre-existing gaps (from a delete) may persist or shrink;
/// that is how a gap gets closed by a later resize.
fn validate_commit(
    before: &[Segment],
    after: &[Segment],
    min_frames: u64,
    total_frames: u64,
) -> Result<(), EngineError> {
    for pair in after.windows(2) {
        if pair[1].start_frame < pair[0].start_frame {
            return Err(EngineError::OrderingViolated);
        }
        if pair[0].end_frame > pair[1].start_frame {
            return Err(EngineError::Overlap(pair[1].start_frame));
        }
    }
    for seg in after {
        // An adjusted neighbor can be pushed past its own end; catch the
        // inverted span before frame_count() underflows.
        if seg.end_frame < seg.start_frame {
            return Err(EngineError::Overlap(seg.end_frame));
        }
        if seg.frame_count() < min_frames {
            return Err(EngineError::TooShort {
                frames: seg.frame_count(),
                min_frames,
            });
        }
        if seg.end_frame > total_frames {
            return Err(EngineError::PastEnd {
                end: seg.end_frame,
                total: total_frames,
            });
        }
    }
    for (i, pair) in before.windows(2).enumerate() {
        let was_contiguous = pair[0].end_frame == pair[1].start_frame;
        if was_contiguous && after[i].end_frame != after[i + 1].start_frame {
            return Err(EngineError::Gap(after[i].end_frame));
        }
    }
    if let (Some(b), Some(a)) = (before.first(), after.first()) {
        if b.start_frame == 0 && a.start_frame != 0 {
            return Err(EngineError::Gap(0));
        }
    }
    if let (Some(b), Some(a)) = (before.last(), after.last()) {
        if b.end_frame == total_frames && a.end_frame != total_frames {
            return Err(EngineError::Gap(a.end_frame));
        }
    }
    Ok(())
}
