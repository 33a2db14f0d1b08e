use nalgebra as na;

use crate::detection::Detection;
use crate::line::LineGeometry;
use crate::track_state::ClassCounts;

const CAPTION_X: i32 = 50;
const CAPTION_Y: i32 = 30;
const CAPTION_STEP: i32 = 30;
const LABEL_OFFSET: i32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct BoxOverlay {
    /// Pixel corners, left-top-right-bottom
    pub rect: [i32; 4],
    pub centroid: na::Point2<i32>,
    pub label: String,
    pub label_origin: na::Point2<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    pub origin: na::Point2<i32>,
    pub text: String,
}

/// Everything drawn on top of a frame, without any rendering backend
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub frame: u64,
    pub line: (na::Point2<i32>, na::Point2<i32>),
    pub boxes: Vec<BoxOverlay>,
    pub captions: Vec<Caption>,
    /// Tracks counted in this frame
    pub counted: usize,
}

impl Overlay {
    pub fn build(
        frame: u64,
        line: &LineGeometry,
        detections: &[Detection],
        counts: &ClassCounts,
        counted: usize,
    ) -> Self {
        let boxes = detections
            .iter()
            .map(|det| {
                let rect = det.bbox.pixels();

                BoxOverlay {
                    rect,
                    centroid: det.centroid(),
                    label: det.label(),
                    label_origin: na::Point2::new(rect[0], rect[1] - LABEL_OFFSET),
                }
            })
            .collect();

        let captions = counts
            .iter()
            .zip((0..).map(|i| CAPTION_Y + i * CAPTION_STEP))
            .map(|((class_name, count), y)| Caption {
                origin: na::Point2::new(CAPTION_X, y),
                text: format!("{}: {}", class_name, count),
            })
            .collect();

        Self {
            frame,
            line: line.endpoints(),
            boxes,
            captions,
            counted,
        }
    }
}
