pub mod editor;
pub mod error;
pub mod model;
pub mod schedule;
pub mod util;

pub use editor::EditorService;
pub use error::EngineError;
pub use model::project::{
    Layer, LayerKind, Project, ProjectMeta, RapidRange, Segment, SegmentKind, SegmentPayload,
};
pub use schedule::stats::PlanStats;
