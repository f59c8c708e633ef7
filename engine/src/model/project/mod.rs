pub mod layer;
pub mod payload;
pub mod project;
pub mod rapid;
pub mod segment;

pub use layer::{Layer, LayerKind};
pub use payload::SegmentPayload;
pub use project::{Project, ProjectMeta};
pub use rapid::RapidRange;
pub use segment::{Segment, SegmentKind};
