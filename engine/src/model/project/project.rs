use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::layer::{Layer, LayerKind};
use crate::error::EngineError;
use crate::schedule::edit::validate_stable;
use crate::schedule::timebase::seconds_to_frame;
use crate::schedule::min_segment_frames;

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMeta {
    #[serde(default)]
    pub title: String,
    /// Project-wide frame rate. Every frame conversion uses this single
    /// value; layers cannot mix frame rates.
    #[serde(default = "default_fps")]
    pub target_fps: u32,
    /// Length of the fixed music track.
    #[serde(default)]
    pub duration_seconds: f64,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Project {
    pub meta: ProjectMeta,
    #[serde(default)]
    pub layers: Vec<Layer>,
}

impl Project {
    pub fn new(title: &str, target_fps: u32, duration_seconds: f64) -> Self {
        Self {
            meta: ProjectMeta {
                title: title.to_string(),
                target_fps,
                duration_seconds,
            },
            layers: Vec::new(),
        }
    }

    /// New project with the standard five layers the editor presents.
    pub fn with_standard_layers(title: &str, target_fps: u32, duration_seconds: f64) -> Self {
        let mut project = Self::new(title, target_fps, duration_seconds);
        project.add_layer(Layer::new(LayerKind::Video, "Base Video"));
        project.add_layer(Layer::new(LayerKind::Cutout, "Cutout"));
        project.add_layer(Layer::new(LayerKind::Captions, "Captions"));
        project.add_layer(Layer::new(LayerKind::Stills, "Stills"));
        project.add_layer(Layer::new(LayerKind::Waveform, "Waveform"));
        project
    }

    pub fn load(json_str: &str) -> Result<Self, EngineError> {
        let project: Project = serde_json::from_str(json_str)?;
        Ok(project)
    }

    /// Serialize for persistence. Refuses to emit a schedule that downstream
    /// rendering could not tile.
    pub fn save(&self) -> Result<String, EngineError> {
        self.validate_for_export()?;
        Ok(serde_json::to_string(self)?)
    }

    pub fn add_layer(&mut self, layer: Layer) -> Uuid {
        let id = layer.id;
        self.layers.push(layer);
        id
    }

    pub fn layer(&self, id: Uuid) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn layer_mut(&mut self, id: Uuid) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id == id)
    }

    pub fn layer_of_kind(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.iter().find(|l| l.kind == kind)
    }

    /// Song length in frames at the project frame rate.
    pub fn total_frames(&self) -> u64 {
        seconds_to_frame(self.meta.duration_seconds, self.meta.target_fps)
    }

    /// Persist-time validation: every schedulable layer that carries a
    /// derived schedule must fully tile the song with no gaps, overlaps, or
    /// sub-minimum segments. A layer with no segments at all is simply
    /// unused and passes.
    pub fn validate_for_export(&self) -> Result<(), EngineError> {
        let min = min_segment_frames(self.meta.target_fps);
        let total = self.total_frames();
        for layer in &self.layers {
            if !layer.kind.is_schedulable() || layer.segments.is_empty() {
                continue;
            }
            validate_stable(&layer.segments, min, total).map_err(|e| {
                log::warn!("layer '{}' failed export validation: {}", layer.name, e);
                e
            })?;
        }
        Ok(())
    }
}

const fn default_fps() -> u32 {
    30
}
