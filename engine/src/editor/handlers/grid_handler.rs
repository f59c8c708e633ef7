//! Raw-mark updates. Every change to a layer's marks re-derives its
//! schedule, so the segment list never drifts from the authoritative data.

use std::sync::{Arc, RwLock};

use uuid::Uuid;

use crate::error::EngineError;
use crate::model::project::{Layer, Project, RapidRange, SegmentPayload};
use crate::schedule::derive::derive_layer_segments;

pub struct GridHandler;

impl GridHandler {
    pub fn set_beat_grid(
        project: &Arc<RwLock<Project>>,
        layer_id: Uuid,
        seconds: Vec<f64>,
    ) -> Result<(), EngineError> {
        Self::update_layer(project, layer_id, |layer| {
            layer.beat_grid = seconds;
            // Seconds are now authoritative again.
            layer.beat_grid_frames = None;
            Ok(())
        })
    }

    pub fn set_beat_grid_frames(
        project: &Arc<RwLock<Project>>,
        layer_id: Uuid,
        frames: Vec<u64>,
    ) -> Result<(), EngineError> {
        Self::update_layer(project, layer_id, |layer| {
            layer.beat_grid_frames = Some(frames);
            Ok(())
        })
    }

    pub fn set_beat_metadata(
        project: &Arc<RwLock<Project>>,
        layer_id: Uuid,
        metadata: Vec<SegmentPayload>,
    ) -> Result<(), EngineError> {
        Self::update_layer(project, layer_id, |layer| {
            layer.beat_metadata = metadata;
            Ok(())
        })
    }

    pub fn set_rapid_ranges(
        project: &Arc<RwLock<Project>>,
        layer_id: Uuid,
        ranges: Vec<RapidRange>,
    ) -> Result<(), EngineError> {
        Self::update_layer(project, layer_id, |layer| {
            if !layer.kind.supports_rapid() {
                return Err(EngineError::Project(format!(
                    "Layer '{}' ({}) does not support rapid ranges",
                    layer.name, layer.kind
                )));
            }
            layer.rapid_ranges = ranges;
            Ok(())
        })
    }

    /// Re-derive a layer's schedule from its current raw marks.
    pub fn rederive(project: &Arc<RwLock<Project>>, layer_id: Uuid) -> Result<(), EngineError> {
        Self::update_layer(project, layer_id, |_| Ok(()))
    }

    /// Apply `f` to the layer's raw marks, then re-derive its schedule.
    fn update_layer(
        project: &Arc<RwLock<Project>>,
        layer_id: Uuid,
        f: impl FnOnce(&mut Layer) -> Result<(), EngineError>,
    ) -> Result<(), EngineError> {
        let mut proj = project
            .write()
            .map_err(|_| EngineError::Runtime("Lock poisoned".to_string()))?;
        let fps = proj.meta.target_fps;
        let duration = proj.meta.duration_seconds;
        let layer = proj
            .layer_mut(layer_id)
            .ok_or(EngineError::LayerNotFound(layer_id))?;
        f(layer)?;
        if layer.kind.is_schedulable() {
            layer.segments = if layer.has_marks() {
                derive_layer_segments(layer, fps, duration)
            } else {
                Vec::new()
            };
        }
        Ok(())
    }
}
