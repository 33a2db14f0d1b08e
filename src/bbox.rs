use serde_derive::{Deserialize, Serialize};

use nalgebra as na;

/// Left-top-right-bottom box in frame pixels, as reported by the tracker
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct BBox([f32; 4]);

impl BBox {
    #[inline]
    pub fn ltrb(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        BBox([x1, y1, x2, y2])
    }

    #[inline(always)]
    pub fn left(&self) -> f32 {
        self.0[0]
    }

    #[inline(always)]
    pub fn top(&self) -> f32 {
        self.0[1]
    }

    #[inline(always)]
    pub fn right(&self) -> f32 {
        self.0[2]
    }

    #[inline(always)]
    pub fn bottom(&self) -> f32 {
        self.0[3]
    }

    /// Corners truncated to whole pixels
    #[inline]
    pub fn pixels(&self) -> [i32; 4] {
        [
            self.left() as i32,
            self.top() as i32,
            self.right() as i32,
            self.bottom() as i32,
        ]
    }

    /// Integer midpoint of the pixel box, rounded down
    #[inline]
    pub fn centroid(&self) -> na::Point2<i32> {
        let [x1, y1, x2, y2] = self.pixels();

        na::Point2::new(midpoint(x1, x2), midpoint(y1, y2))
    }
}

/// The halved sum of two `i32` always fits back into `i32`
#[inline(always)]
fn midpoint(a: i32, b: i32) -> i32 {
    (i64::from(a) + i64::from(b)).div_euclid(2) as i32
}
