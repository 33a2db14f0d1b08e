use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::detection::Detection;
use crate::error::Error;
use crate::line::LineGeometry;
use crate::persistence::{LogRecord, PersistenceLog, TIME_FORMAT};
use crate::track_state::{ClassCounts, TrackState};
use crate::Counting;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running,
}

/// One start-to-stop counting interval over a stream of tracked detections
#[derive(Debug)]
pub struct CountingSession {
    line: LineGeometry,
    log: PersistenceLog,
    tracks: TrackState,
    state: SessionState,
    start_time: Option<NaiveDateTime>,
}

impl CountingSession {
    pub fn new(line: LineGeometry, log: PersistenceLog) -> Self {
        Self {
            line,
            log,
            tracks: TrackState::new(),
            state: SessionState::Idle,
            start_time: None,
        }
    }

    #[inline]
    pub fn line(&self) -> &LineGeometry {
        &self.line
    }

    #[inline]
    pub fn log(&self) -> &PersistenceLog {
        &self.log
    }

    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    #[inline]
    pub fn start_time(&self) -> Option<NaiveDateTime> {
        self.start_time
    }

    #[inline]
    pub fn tracks(&self) -> &TrackState {
        &self.tracks
    }

    /// Starts a fresh session at `now`, dropping whatever the previous one held
    pub fn start_at(&mut self, now: NaiveDateTime) {
        if self.is_running() {
            warn!(
                discarded = self.tracks.counts().total(),
                "session restarted while running"
            );
        }

        self.tracks.reset();
        self.start_time = Some(now);
        self.state = SessionState::Running;

        info!(start_time = %now.format(TIME_FORMAT), "counting session started");
    }

    /// Feeds one frame worth of detections, returns how many tracks got counted
    pub fn process_detections(&mut self, detections: &[Detection]) -> usize {
        if !self.is_running() {
            debug!(detections = detections.len(), "session idle, frame ignored");
            return 0;
        }

        let mut counted = 0;
        for det in detections {
            if self.tracks.record_if_crossing(
                det.track_id,
                &det.class_name,
                det.centroid(),
                &self.line,
            ) {
                counted += 1;
            }
        }

        counted
    }

    /// Stops a running session and persists its counts. The session is idle
    /// on return even when persisting fails.
    pub fn stop(&mut self) -> Result<usize, Error> {
        if !self.is_running() {
            debug!("stop requested while idle");
            return Ok(0);
        }

        self.state = SessionState::Idle;

        let start_time = match self.start_time {
            Some(ts) => ts,
            None => return Ok(0),
        };

        info!(
            classes = self.tracks.counts().len(),
            total = self.tracks.counts().total(),
            "counting session stopped"
        );

        self.log
            .append(self.tracks.counts(), start_time)
            .map_err(|err| {
                warn!(error = %err, path = %self.log.path().display(), "failed to persist session counts");
                err
            })
    }
}

impl Counting for CountingSession {
    #[inline]
    fn start(&mut self) {
        self.start_at(Local::now().naive_local());
    }

    #[inline]
    fn stop(&mut self) -> Result<usize, Error> {
        CountingSession::stop(self)
    }

    #[inline]
    fn process_detections(&mut self, detections: &[Detection]) -> usize {
        CountingSession::process_detections(self, detections)
    }

    #[inline]
    fn current_counts(&self) -> ClassCounts {
        self.tracks.counts().clone()
    }

    #[inline]
    fn recent_log(&self, n: usize) -> Result<Vec<LogRecord>, Error> {
        self.log.read_recent(n)
    }
}

/// Cloneable handle that serializes every session call behind one lock
#[derive(Debug, Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<CountingSession>>,
}

impl SharedSession {
    pub fn new(session: CountingSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    #[inline]
    pub fn lock(&self) -> MutexGuard<'_, CountingSession> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.lock().is_running()
    }

    #[inline]
    pub fn line(&self) -> LineGeometry {
        *self.lock().line()
    }
}

impl Counting for SharedSession {
    fn start(&mut self) {
        self.lock().start();
    }

    fn stop(&mut self) -> Result<usize, Error> {
        self.lock().stop()
    }

    fn process_detections(&mut self, detections: &[Detection]) -> usize {
        self.lock().process_detections(detections)
    }

    fn current_counts(&self) -> ClassCounts {
        self.lock().current_counts()
    }

    fn recent_log(&self, n: usize) -> Result<Vec<LogRecord>, Error> {
        self.lock().recent_log(n)
    }
}
