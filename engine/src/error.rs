use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Project error: {0}")]
    Project(String),
    #[error("Layer with ID {0} not found")]
    LayerNotFound(uuid::Uuid),
    #[error("Segment {0} not found in layer")]
    SegmentNotFound(usize),
    #[error("Time {value}s is out of bounds (0..{max}s)")]
    OutOfBounds { value: f64, max: f64 },
    #[error("Segment would shrink to {frames} frames, minimum is {min_frames}")]
    TooShort { frames: u64, min_frames: u64 },
    #[error("Edit would reorder segments")]
    OrderingViolated,
    #[error("Schedule has a gap at frame {0}")]
    Gap(u64),
    #[error("Schedule has overlapping segments at frame {0}")]
    Overlap(u64),
    #[error("Segment ends at frame {end}, past the schedule end {total}")]
    PastEnd { end: u64, total: u64 },
    #[error("Runtime error: {0}")]
    Runtime(String),
}
