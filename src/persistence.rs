use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde_derive::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Error;
use crate::track_state::ClassCounts;

pub const HEADER: [&str; 3] = ["Buah", "Hasil Panen", "Start Time"];
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DEFAULT_RECENT: usize = 6;

/// One row of the log: a class total for one stopped session
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    #[serde(rename = "Buah")]
    pub class_name: String,
    #[serde(rename = "Hasil Panen")]
    pub count: u32,
    #[serde(rename = "Start Time", with = "log_time")]
    pub start_time: NaiveDateTime,
}

mod log_time {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::TIME_FORMAT;

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, ser: S) -> Result<S::Ok, S::Error> {
        ser.collect_str(&ts.format(TIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(de)?;
        NaiveDateTime::parse_from_str(&raw, TIME_FORMAT).map_err(de::Error::custom)
    }
}

/// Append-only CSV store of session totals
#[derive(Debug, Clone)]
pub struct PersistenceLog {
    path: PathBuf,
}

impl PersistenceLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one row per class. The header goes in only when the file is
    /// created by this call, so empty counts still leave a header-only log.
    pub fn append(&self, counts: &ClassCounts, start_time: NaiveDateTime) -> Result<usize, Error> {
        let existed = self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if !existed {
            debug!(path = %self.path.display(), "log created");
            writer.write_record(HEADER)?;
        }

        for (class_name, count) in counts {
            writer.serialize(LogRecord {
                class_name: class_name.to_string(),
                count,
                start_time,
            })?;
        }

        writer.flush()?;

        info!(
            path = %self.path.display(),
            rows = counts.len(),
            start_time = %start_time.format(TIME_FORMAT),
            "session counts persisted"
        );

        Ok(counts.len())
    }

    /// Up to `n` most recently appended rows, newest first
    pub fn read_recent(&self, n: usize) -> Result<Vec<LogRecord>, Error> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(file);

        let records = reader
            .deserialize()
            .collect::<Result<Vec<LogRecord>, _>>()?;

        Ok(records.into_iter().rev().take(n).collect())
    }
}
