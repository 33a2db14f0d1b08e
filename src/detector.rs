use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::Error;
use crate::frame::Frame;

/// Source of tracked detections, one frame per call
pub trait Detector {
    /// Next frame's detections, `None` once the stream is exhausted
    fn detect(&mut self) -> Result<Option<Frame>, Error>;

    /// Seeks back to the first frame
    fn rewind(&mut self) -> Result<(), Error>;
}

/// Plays back a recorded tracker dump, one JSON frame per line
#[derive(Debug, Clone)]
pub struct ReplayDetector {
    frames: Vec<Frame>,
    cursor: usize,
}

impl ReplayDetector {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self { frames, cursor: 0 }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let file = File::open(path.as_ref())?;
        let detector = Self::from_reader(BufReader::new(file))?;

        debug!(
            path = %path.as_ref().display(),
            frames = detector.len(),
            "detections dump loaded"
        );

        Ok(detector)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut frames = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let frame = serde_json::from_str(line).map_err(|err| Error::MalformedRecord {
                line: idx + 1,
                reason: err.to_string(),
            })?;

            frames.push(frame);
        }

        Ok(Self::new(frames))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl Detector for ReplayDetector {
    fn detect(&mut self) -> Result<Option<Frame>, Error> {
        let frame = self.frames.get(self.cursor).cloned();
        if frame.is_some() {
            self.cursor += 1;
        }

        Ok(frame)
    }

    #[inline]
    fn rewind(&mut self) -> Result<(), Error> {
        self.cursor = 0;
        Ok(())
    }
}
