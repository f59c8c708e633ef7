use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Per-segment metadata, discriminated by what the owning layer schedules.
/// Opaque to the scheduler: derivation and editing carry it along untouched.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug, Default)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum SegmentPayload {
    #[default]
    Empty,
    Caption {
        text: String,
        #[serde(default)]
        guideline: Option<String>,
    },
    #[serde(rename = "clipslot")]
    ClipSlot {
        #[serde(default)]
        source: Option<String>,
        #[serde(default = "default_volume")]
        volume: OrderedFloat<f64>,
        #[serde(default)]
        hold_audio: bool,
    },
    Cutout {
        #[serde(default)]
        target: Option<String>,
    },
    Still {
        reference: String,
    },
}

impl SegmentPayload {
    pub fn caption(text: &str) -> Self {
        SegmentPayload::Caption {
            text: text.to_string(),
            guideline: None,
        }
    }

    pub fn clip_slot(source: Option<&str>) -> Self {
        SegmentPayload::ClipSlot {
            source: source.map(str::to_string),
            volume: default_volume(),
            hold_audio: false,
        }
    }
}

fn default_volume() -> OrderedFloat<f64> {
    OrderedFloat(1.0)
}
