use serde_derive::{Deserialize, Serialize};

use crate::bbox::BBox;

/// Raw tracker output for one object: the class is still the model's index
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TrackedBox {
    pub bbox: BBox,
    #[serde(default)]
    pub track_id: Option<u32>,
    pub class: u32,
    #[serde(default = "full_confidence")]
    pub confidence: f32,
}

fn full_confidence() -> f32 {
    1.0
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Frame {
    #[serde(rename = "frame")]
    pub index: u64,
    #[serde(default)]
    pub detections: Vec<TrackedBox>,
}

impl Frame {
    #[inline]
    pub fn len(&self) -> usize {
        self.detections.len()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &TrackedBox> {
        self.detections.iter()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }
}
