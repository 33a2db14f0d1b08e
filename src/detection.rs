use crate::bbox::BBox;
use nalgebra as na;

/// A tracked object in a single frame with its class already resolved to a label
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub bbox: BBox,
    /// Absent until the tracker has associated the object across frames
    pub track_id: Option<u32>,
    pub class_name: String,
    pub confidence: f32,
}

impl Detection {
    pub fn new(bbox: BBox, track_id: Option<u32>, class_name: impl Into<String>) -> Self {
        Self {
            bbox,
            track_id,
            class_name: class_name.into(),
            confidence: 1.0,
        }
    }

    #[inline]
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }

    #[inline(always)]
    pub fn centroid(&self) -> na::Point2<i32> {
        self.bbox.centroid()
    }

    /// Overlay caption, e.g. `ID: 3 apple` or `ID: None apple`
    pub fn label(&self) -> String {
        match self.track_id {
            Some(id) => format!("ID: {} {}", id, self.class_name),
            None => format!("ID: None {}", self.class_name),
        }
    }
}
