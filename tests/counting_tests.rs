//! End-to-end checks of the counting session and its CSV log.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use qcount::{
    BBox, ClassMap, Counting, CountingSession, Detection, FrameProcessor, LineGeometry,
    PersistenceLog, ReplayDetector, SharedSession,
};

fn at(minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 10, 3)
        .unwrap()
        .and_hms_opt(8, minute, 0)
        .unwrap()
}

fn centered(track_id: Option<u32>, class_name: &str, cx: f32, cy: f32) -> Detection {
    Detection::new(
        BBox::ltrb(cx - 4.0, cy - 4.0, cx + 4.0, cy + 4.0),
        track_id,
        class_name,
    )
}

fn diagonal_session(log: &PersistenceLog) -> CountingSession {
    CountingSession::new(LineGeometry::from_coords(0, 0, 10, 10).unwrap(), log.clone())
}

#[test]
fn counts_match_distinct_tracks_first_seen_below() {
    let dir = tempfile::tempdir().unwrap();
    let log = PersistenceLog::new(dir.path().join("counts.csv"));
    let mut session = diagonal_session(&log);
    session.start_at(at(0));

    // (track, class, first position, later position)
    let tracks = [
        (1, "apple", (10.0, 30.0), (50.0, 0.0)),
        (2, "apple", (30.0, 10.0), (30.0, 60.0)),
        (3, "orange", (5.0, 40.0), (5.0, 41.0)),
        (4, "orange", (40.0, 5.0), (41.0, 6.0)),
        (5, "apple", (20.0, 21.0), (20.0, 0.0)),
    ];

    let first: Vec<_> = tracks
        .iter()
        .map(|&(id, class, (x, y), _)| centered(Some(id), class, x, y))
        .collect();
    assert_eq!(session.process_detections(&first), 3);

    let later: Vec<_> = tracks
        .iter()
        .map(|&(id, class, _, (x, y))| centered(Some(id), class, x, y))
        .collect();
    assert_eq!(session.process_detections(&later), 1);

    let counts = session.current_counts();
    assert_eq!(counts.get("apple"), 3);
    assert_eq!(counts.get("orange"), 1);
}

#[test]
fn untracked_detections_never_count() {
    let dir = tempfile::tempdir().unwrap();
    let log = PersistenceLog::new(dir.path().join("counts.csv"));
    let mut session = diagonal_session(&log);
    session.start_at(at(0));

    for y in (0..200).step_by(10) {
        session.process_detections(&[centered(None, "apple", 5.0, y as f32)]);
    }

    assert!(session.current_counts().is_empty());
    assert_eq!(session.stop().unwrap(), 0);
    assert_eq!(
        std::fs::read_to_string(log.path()).unwrap(),
        "Buah,Hasil Panen,Start Time\n"
    );
    assert!(log.read_recent(6).unwrap().is_empty());
}

#[test]
fn stop_writes_one_row_per_class_then_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let log = PersistenceLog::new(dir.path().join("counts.csv"));
    let mut session = diagonal_session(&log);

    assert_eq!(session.stop().unwrap(), 0);

    session.start_at(at(15));
    session.process_detections(&[
        centered(Some(1), "apple", 0.0, 20.0),
        centered(Some(2), "orange", 0.0, 20.0),
        centered(Some(3), "apple", 0.0, 20.0),
    ]);

    assert_eq!(session.stop().unwrap(), 2);
    assert_eq!(session.stop().unwrap(), 0);

    let contents = std::fs::read_to_string(log.path()).unwrap();
    assert_eq!(
        contents,
        "Buah,Hasil Panen,Start Time\n\
         apple,2,2024-10-03 08:15:00\n\
         orange,1,2024-10-03 08:15:00\n"
    );
}

#[test]
fn header_is_written_once_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let log = PersistenceLog::new(dir.path().join("counts.csv"));
    let mut session = diagonal_session(&log);

    for minute in 0..3 {
        session.start_at(at(minute));
        session.process_detections(&[centered(Some(1), "apple", 0.0, 20.0)]);
        session.stop().unwrap();
    }

    let contents = std::fs::read_to_string(log.path()).unwrap();
    assert_eq!(contents.matches("Buah,Hasil Panen,Start Time").count(), 1);
    assert_eq!(contents.lines().count(), 4);
}

#[test]
fn read_recent_returns_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    let log = PersistenceLog::new(dir.path().join("counts.csv"));
    let mut session = diagonal_session(&log);

    for minute in 0..10 {
        session.start_at(at(minute));
        let dets: Vec<_> = (0..=minute)
            .map(|id| centered(Some(id), "apple", 0.0, 20.0))
            .collect();
        session.process_detections(&dets);
        session.stop().unwrap();
    }

    let recent = log.read_recent(6).unwrap();
    let minutes: Vec<_> = recent.iter().map(|r| r.start_time).collect();
    let counts: Vec<_> = recent.iter().map(|r| r.count).collect();

    assert_eq!(minutes, (4..10).rev().map(at).collect::<Vec<_>>());
    assert_eq!(counts, vec![10, 9, 8, 7, 6, 5]);
    assert_eq!(log.read_recent(50).unwrap().len(), 10);
}

#[test]
fn control_and_frame_loop_share_one_session() {
    let dir = tempfile::tempdir().unwrap();
    let log = PersistenceLog::new(dir.path().join("counts.csv"));
    let mut control = SharedSession::new(diagonal_session(&log));

    let dump = (0..40)
        .map(|i| {
            format!(
                r#"{{"frame": {}, "detections": [{{"bbox": [0, {}, 4, {}], "track_id": {}, "class": 47}}]}}"#,
                i,
                10 + i,
                14 + i,
                i % 8
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let detector = ReplayDetector::from_reader(dump.as_bytes()).unwrap();
    let mut processor = FrameProcessor::new(detector, control.clone(), ClassMap::default());

    control.start();
    let worker = std::thread::spawn(move || {
        for _ in 0..40 {
            processor.step().unwrap();
        }
    });
    worker.join().unwrap();

    assert_eq!(control.current_counts().get("apple"), 8);
    assert_eq!(control.stop().unwrap(), 1);

    let rows = control.recent_log(6).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].class_name, "apple");
    assert_eq!(rows[0].count, 8);
}

#[test]
fn start_stop_interleaved_with_running_frame_loop() {
    let dir = tempfile::tempdir().unwrap();
    let log = PersistenceLog::new(dir.path().join("counts.csv"));
    let control = SharedSession::new(diagonal_session(&log));

    let dump = (0..50)
        .map(|i| {
            format!(
                r#"{{"frame": {}, "detections": [{{"bbox": [0, 20, 4, 24], "track_id": {}, "class": 47}}]}}"#,
                i, i
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let detector = ReplayDetector::from_reader(dump.as_bytes()).unwrap();
    let mut processor = FrameProcessor::new(detector, control.clone(), ClassMap::default());

    let done = Arc::new(AtomicBool::new(false));
    let worker = {
        let done = done.clone();
        thread::spawn(move || {
            while !done.load(Ordering::Relaxed) {
                processor.step().unwrap();
            }
        })
    };

    // totals observed under the same lock that performs the stop
    let mut seen_at_stop = HashMap::new();
    for minute in 0..20 {
        control.lock().start_at(at(minute));
        thread::sleep(Duration::from_millis(2));

        let mut session = control.lock();
        let total = session.current_counts().total();
        let rows = session.stop().unwrap();
        drop(session);

        assert_eq!(rows, usize::from(total > 0));
        seen_at_stop.insert(at(minute), total);
        thread::sleep(Duration::from_millis(1));
    }

    done.store(true, Ordering::Relaxed);
    worker.join().unwrap();

    let mut persisted: HashMap<NaiveDateTime, u32> = HashMap::new();
    for record in log.read_recent(usize::MAX).unwrap() {
        assert_eq!(record.class_name, "apple");
        *persisted.entry(record.start_time).or_default() += record.count;
    }

    for (start_time, total) in seen_at_stop {
        assert_eq!(persisted.get(&start_time).copied().unwrap_or(0), total);
        assert!(total <= 50);
    }
}
