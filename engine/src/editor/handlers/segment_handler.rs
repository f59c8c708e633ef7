//! Segment-level editing. The pure operations in `schedule::edit` produce
//! the new list; this handler commits it atomically and feeds the result
//! back into the layer's raw marks so the next derivation reproduces the
//! edited schedule.

use std::sync::{Arc, RwLock};

use uuid::Uuid;

use crate::error::EngineError;
use crate::model::project::{Layer, Project, Segment};
use crate::schedule::edit::{self, ResizeEdge};
use crate::schedule::timebase::frame_to_seconds;

pub struct SegmentHandler;

impl SegmentHandler {
    pub fn split(
        project: &Arc<RwLock<Project>>,
        layer_id: Uuid,
        time: f64,
    ) -> Result<(), EngineError> {
        Self::apply(project, layer_id, |segments, fps, _| {
            edit::split_at(segments, time, fps)
        })
    }

    pub fn resize(
        project: &Arc<RwLock<Project>>,
        layer_id: Uuid,
        index: usize,
        edge: ResizeEdge,
        new_time: f64,
        adjust_neighbors: bool,
    ) -> Result<(), EngineError> {
        Self::apply(project, layer_id, |segments, fps, duration| {
            let total_frames = crate::schedule::timebase::seconds_to_frame(duration, fps);
            edit::resize(
                segments,
                index,
                edge,
                new_time,
                adjust_neighbors,
                fps,
                total_frames,
            )
        })
    }

    pub fn delete(
        project: &Arc<RwLock<Project>>,
        layer_id: Uuid,
        index: usize,
    ) -> Result<(), EngineError> {
        Self::apply(project, layer_id, |segments, _, _| {
            edit::delete(segments, index)
        })
    }

    pub fn update_times(
        project: &Arc<RwLock<Project>>,
        layer_id: Uuid,
        index: usize,
        new_start: f64,
        new_end: f64,
        adjust_neighbors: bool,
    ) -> Result<(), EngineError> {
        Self::apply(project, layer_id, |segments, fps, duration| {
            edit::update_times(
                segments,
                index,
                new_start,
                new_end,
                adjust_neighbors,
                fps,
                duration,
            )
        })
    }

    /// Run a pure edit against the layer's current list and commit the
    /// result. A failed edit leaves the layer untouched.
    fn apply(
        project: &Arc<RwLock<Project>>,
        layer_id: Uuid,
        f: impl FnOnce(&[Segment], u32, f64) -> Result<Vec<Segment>, EngineError>,
    ) -> Result<(), EngineError> {
        let mut proj = project
            .write()
            .map_err(|_| EngineError::Runtime("Lock poisoned".to_string()))?;
        let fps = proj.meta.target_fps;
        let duration = proj.meta.duration_seconds;
        let layer = proj
            .layer_mut(layer_id)
            .ok_or(EngineError::LayerNotFound(layer_id))?;
        let new_segments = f(&layer.segments, fps, duration)?;
        layer.segments = new_segments;
        Self::sync_marks(layer, fps);
        Ok(())
    }

    /// Rebuild the raw marks from the edited schedule: segment start frames
    /// become the frame grid (authoritative, so no re-rounding), payloads
    /// become the aligned metadata, and the display grid is recomputed from
    /// the frames.
    fn sync_marks(layer: &mut Layer, fps: u32) {
        let frames: Vec<u64> = layer.segments.iter().map(|s| s.start_frame).collect();
        layer.beat_metadata = layer.segments.iter().map(|s| s.payload.clone()).collect();
        layer.beat_grid = frames.iter().map(|&f| frame_to_seconds(f, fps)).collect();
        layer.beat_grid_frames = Some(frames);
    }
}
