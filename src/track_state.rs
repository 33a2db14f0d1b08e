use std::collections::HashSet;

use nalgebra as na;
use tracing::debug;

use crate::line::LineGeometry;

/// Per-class totals kept in the order classes were first counted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassCounts(Vec<(String, u32)>);

impl ClassCounts {
    #[inline]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn get(&self, class_name: &str) -> u32 {
        self.0
            .iter()
            .find(|(name, _)| name == class_name)
            .map_or(0, |&(_, count)| count)
    }

    fn increment(&mut self, class_name: &str) -> u32 {
        if let Some((_, count)) = self.0.iter_mut().find(|(name, _)| name == class_name) {
            *count += 1;
            return *count;
        }

        self.0.push((class_name.to_string(), 1));
        1
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(name, count)| (name.as_str(), *count))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn total(&self) -> u32 {
        self.0.iter().map(|(_, count)| count).sum()
    }
}

impl<'a> IntoIterator for &'a ClassCounts {
    type Item = (&'a str, u32);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, u32)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Tracks already counted in the current session and the per-class totals
#[derive(Debug, Clone, Default)]
pub struct TrackState {
    counted: HashSet<u32>,
    counts: ClassCounts,
}

impl TrackState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.counted.clear();
        self.counts = ClassCounts::new();
    }

    /// Counts the track the first time its centroid is seen below the line.
    /// Untracked detections and tracks counted before are ignored.
    pub fn record_if_crossing(
        &mut self,
        track_id: Option<u32>,
        class_name: &str,
        centroid: na::Point2<i32>,
        line: &LineGeometry,
    ) -> bool {
        let track_id = match track_id {
            Some(id) => id,
            None => return false,
        };

        if self.counted.contains(&track_id) || !line.contains_below(centroid) {
            return false;
        }

        self.counted.insert(track_id);
        let total = self.counts.increment(class_name);

        debug!(track_id, class_name, total, "track crossed counting line");

        true
    }

    #[inline]
    pub fn counts(&self) -> &ClassCounts {
        &self.counts
    }

    #[inline]
    pub fn is_counted(&self, track_id: u32) -> bool {
        self.counted.contains(&track_id)
    }

    #[inline]
    pub fn num_counted(&self) -> usize {
        self.counted.len()
    }
}
