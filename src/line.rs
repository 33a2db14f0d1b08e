use nalgebra as na;

use crate::error::Error;

/// Counting line through two endpoints, stored as `y = m * x + c`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineGeometry {
    p1: na::Point2<i32>,
    p2: na::Point2<i32>,
    slope: f64,
    intercept: f64,
}

impl LineGeometry {
    pub fn new(p1: na::Point2<i32>, p2: na::Point2<i32>) -> Result<Self, Error> {
        if p1.x == p2.x {
            return Err(Error::InvalidConfiguration(format!(
                "counting line endpoints share x = {}, slope is undefined",
                p1.x
            )));
        }

        let slope = f64::from(p2.y - p1.y) / f64::from(p2.x - p1.x);
        let intercept = f64::from(p1.y) - slope * f64::from(p1.x);

        Ok(Self {
            p1,
            p2,
            slope,
            intercept,
        })
    }

    #[inline]
    pub fn from_coords(x1: i32, y1: i32, x2: i32, y2: i32) -> Result<Self, Error> {
        Self::new(na::Point2::new(x1, y1), na::Point2::new(x2, y2))
    }

    #[inline]
    pub fn endpoints(&self) -> (na::Point2<i32>, na::Point2<i32>) {
        (self.p1, self.p2)
    }

    #[inline]
    pub fn slope(&self) -> f64 {
        self.slope
    }

    #[inline]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    #[inline]
    pub fn y_on_line(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Image y grows downwards, so "below" means a strictly larger y
    #[inline]
    pub fn is_below(&self, x: f64, y: f64) -> bool {
        y > self.y_on_line(x)
    }

    #[inline]
    pub fn contains_below(&self, pt: na::Point2<i32>) -> bool {
        self.is_below(f64::from(pt.x), f64::from(pt.y))
    }
}
