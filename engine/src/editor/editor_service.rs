use std::sync::{Arc, RwLock};

use uuid::Uuid;

use super::handlers::grid_handler::GridHandler;
use super::handlers::segment_handler::SegmentHandler;
use crate::error::EngineError;
use crate::model::project::{Project, RapidRange, SegmentPayload};
use crate::schedule::derive::derive_layer_segments;
use crate::schedule::edit::ResizeEdge;
use crate::schedule::normalize::{frame_time_pairs, normalize_grid, FrameTimePair};
use crate::schedule::stats::{plan_stats, PlanStats};
use crate::util::timing::ScopedTimer;

/// Facade the editor UI talks to. Owns the shared project state; all
/// scheduling logic underneath is pure functions over snapshots.
pub struct EditorService {
    project: Arc<RwLock<Project>>,
}

impl Clone for EditorService {
    fn clone(&self) -> Self {
        Self {
            project: self.project.clone(),
        }
    }
}

impl EditorService {
    pub fn new(project: Arc<RwLock<Project>>) -> Self {
        Self { project }
    }

    /// Access the project immutably via a closure.
    /// Prefer this over exposing the lock.
    pub fn with_project<R>(&self, f: impl FnOnce(&Project) -> R) -> R {
        let guard = self
            .project
            .read()
            .expect("Failed to acquire project read lock");
        f(&guard)
    }

    /// Access the project mutably via a closure.
    pub fn with_project_mut<R>(&self, f: impl FnOnce(&mut Project) -> R) -> R {
        let mut guard = self
            .project
            .write()
            .expect("Failed to acquire project write lock");
        f(&mut guard)
    }

    // --- Project Operations ---

    /// Parse a persisted project and re-derive every schedule from its raw
    /// marks; persisted segment lists are only a snapshot.
    pub fn load_project(&self, json_str: &str) -> Result<(), EngineError> {
        let _timer = ScopedTimer::info("load_project");
        let mut new_project = Project::load(json_str)?;
        let fps = new_project.meta.target_fps;
        let duration = new_project.meta.duration_seconds;
        for layer in &mut new_project.layers {
            if layer.kind.is_schedulable() {
                layer.segments = if layer.has_marks() {
                    derive_layer_segments(layer, fps, duration)
                } else {
                    Vec::new()
                };
            }
        }
        let mut guard = self
            .project
            .write()
            .map_err(|_| EngineError::Runtime("Lock poisoned".to_string()))?;
        *guard = new_project;
        Ok(())
    }

    /// Serialize for persistence; fails on an unstable schedule.
    pub fn save_project(&self) -> Result<String, EngineError> {
        let _timer = ScopedTimer::info("save_project");
        let guard = self
            .project
            .read()
            .map_err(|_| EngineError::Runtime("Lock poisoned".to_string()))?;
        guard.save()
    }

    // --- Raw Marks ---

    pub fn set_beat_grid(&self, layer_id: Uuid, seconds: Vec<f64>) -> Result<(), EngineError> {
        GridHandler::set_beat_grid(&self.project, layer_id, seconds)
    }

    pub fn set_beat_grid_frames(&self, layer_id: Uuid, frames: Vec<u64>) -> Result<(), EngineError> {
        GridHandler::set_beat_grid_frames(&self.project, layer_id, frames)
    }

    pub fn set_beat_metadata(
        &self,
        layer_id: Uuid,
        metadata: Vec<SegmentPayload>,
    ) -> Result<(), EngineError> {
        GridHandler::set_beat_metadata(&self.project, layer_id, metadata)
    }

    pub fn set_rapid_ranges(
        &self,
        layer_id: Uuid,
        ranges: Vec<RapidRange>,
    ) -> Result<(), EngineError> {
        GridHandler::set_rapid_ranges(&self.project, layer_id, ranges)
    }

    pub fn rederive_layer(&self, layer_id: Uuid) -> Result<(), EngineError> {
        GridHandler::rederive(&self.project, layer_id)
    }

    // --- Segment Editing ---

    pub fn split_segment(&self, layer_id: Uuid, time: f64) -> Result<(), EngineError> {
        SegmentHandler::split(&self.project, layer_id, time)
    }

    pub fn resize_segment(
        &self,
        layer_id: Uuid,
        index: usize,
        edge: ResizeEdge,
        new_time: f64,
        adjust_neighbors: bool,
    ) -> Result<(), EngineError> {
        SegmentHandler::resize(
            &self.project,
            layer_id,
            index,
            edge,
            new_time,
            adjust_neighbors,
        )
    }

    pub fn delete_segment(&self, layer_id: Uuid, index: usize) -> Result<(), EngineError> {
        SegmentHandler::delete(&self.project, layer_id, index)
    }

    pub fn update_segment_times(
        &self,
        layer_id: Uuid,
        index: usize,
        new_start: f64,
        new_end: f64,
        adjust_neighbors: bool,
    ) -> Result<(), EngineError> {
        SegmentHandler::update_times(
            &self.project,
            layer_id,
            index,
            new_start,
            new_end,
            adjust_neighbors,
        )
    }

    // --- UI Readouts ---

    pub fn layer_stats(&self, layer_id: Uuid) -> Result<PlanStats, EngineError> {
        let guard = self
            .project
            .read()
            .map_err(|_| EngineError::Runtime("Lock poisoned".to_string()))?;
        let layer = guard
            .layer(layer_id)
            .ok_or(EngineError::LayerNotFound(layer_id))?;
        Ok(plan_stats(&layer.segments))
    }

    /// Frame/time pairs for the layer's canonical grid, for display.
    pub fn layer_frame_time_pairs(&self, layer_id: Uuid) -> Result<Vec<FrameTimePair>, EngineError> {
        let guard = self
            .project
            .read()
            .map_err(|_| EngineError::Runtime("Lock poisoned".to_string()))?;
        let fps = guard.meta.target_fps;
        let layer = guard
            .layer(layer_id)
            .ok_or(EngineError::LayerNotFound(layer_id))?;
        let frames: Option<Vec<f64>> = layer
            .beat_grid_frames
            .as_ref()
            .map(|v| v.iter().map(|&f| f as f64).collect());
        let grid = normalize_grid(frames.as_deref(), Some(&layer.beat_grid), fps);
        Ok(frame_time_pairs(&grid, fps))
    }
}
