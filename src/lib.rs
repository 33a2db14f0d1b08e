pub mod bbox;
pub mod class_map;
pub mod config;
pub mod detection;
pub mod detector;
pub mod error;
pub mod frame;
pub mod line;
pub mod overlay;
pub mod persistence;
pub mod processor;
pub mod session;
pub mod track_state;

pub use bbox::BBox;
pub use class_map::ClassMap;
pub use config::CounterConfig;
pub use detection::Detection;
pub use detector::{Detector, ReplayDetector};
pub use error::Error;
pub use frame::{Frame, TrackedBox};
pub use line::LineGeometry;
pub use overlay::Overlay;
pub use persistence::{LogRecord, PersistenceLog};
pub use processor::FrameProcessor;
pub use session::{CountingSession, SessionState, SharedSession};
pub use track_state::{ClassCounts, TrackState};

/// Control surface of a counting session, as consumed by a UI or web layer
pub trait Counting {
    fn start(&mut self);
    fn stop(&mut self) -> Result<usize, error::Error>;
    fn process_detections(&mut self, detections: &[Detection]) -> usize;
    fn current_counts(&self) -> ClassCounts;
    fn recent_log(&self, n: usize) -> Result<Vec<LogRecord>, error::Error>;
}
