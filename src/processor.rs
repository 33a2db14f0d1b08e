use tracing::{info, warn};

use crate::class_map::ClassMap;
use crate::detection::Detection;
use crate::detector::Detector;
use crate::error::Error;
use crate::frame::Frame;
use crate::overlay::Overlay;
use crate::session::SharedSession;
use crate::Counting;

/// Pulls frames from a detector and feeds the shared counting session
pub struct FrameProcessor<D: Detector> {
    detector: D,
    session: SharedSession,
    classes: ClassMap,
}

impl<D: Detector> FrameProcessor<D> {
    pub fn new(detector: D, session: SharedSession, classes: ClassMap) -> Self {
        Self {
            detector,
            session,
            classes,
        }
    }

    #[inline]
    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    /// Processes one frame. The stream loops back to its start when it runs
    /// out; `None` means it has no frames at all.
    pub fn step(&mut self) -> Result<Option<Overlay>, Error> {
        let frame = match self.next_frame()? {
            Some(frame) => frame,
            None => return Ok(None),
        };

        let detections = self.resolve(&frame)?;

        let mut session = self.session.lock();
        let counted = session.process_detections(&detections);
        let counts = session.current_counts();

        if counted > 0 {
            info!(frame = frame.index, counted, total = counts.total(), "objects counted");
        }

        Ok(Some(Overlay::build(
            frame.index,
            session.line(),
            &detections,
            &counts,
            counted,
        )))
    }

    fn next_frame(&mut self) -> Result<Option<Frame>, Error> {
        if let Some(frame) = self.detector.detect()? {
            return Ok(Some(frame));
        }

        info!("end of stream, rewinding");
        self.detector.rewind()?;

        let frame = self.detector.detect()?;
        if frame.is_none() {
            warn!("stream is empty after rewind");
        }

        Ok(frame)
    }

    fn resolve(&self, frame: &Frame) -> Result<Vec<Detection>, Error> {
        frame
            .iter()
            .filter(|tb| self.classes.allows(tb.class))
            .map(|tb| -> Result<Detection, Error> {
                let name = self.classes.name(tb.class)?;

                Ok(Detection::new(tb.bbox, tb.track_id, name).with_confidence(tb.confidence))
            })
            .collect()
    }
}
