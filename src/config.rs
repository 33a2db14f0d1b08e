use std::fs;
use std::path::{Path, PathBuf};

use serde_derive::{Deserialize, Serialize};

use crate::class_map::{ClassMap, APPLE};
use crate::error::Error;
use crate::line::LineGeometry;
use crate::persistence::{PersistenceLog, DEFAULT_RECENT};
use crate::session::CountingSession;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CounterConfig {
    /// Counting line as `[x1, y1, x2, y2]` in frame pixels
    pub line: [i32; 4],
    pub log_path: PathBuf,
    pub recent_rows: usize,
    /// Detector class indices to keep, empty keeps all
    pub classes: Vec<u32>,
    /// Label per class index, COCO when absent
    pub class_names: Option<Vec<String>>,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            line: [21, 238, 763, 352],
            log_path: PathBuf::from("object_counts.csv"),
            recent_rows: DEFAULT_RECENT,
            classes: vec![APPLE],
            class_names: None,
        }
    }
}

impl CounterConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)?;
        let config: CounterConfig = serde_json::from_str(&contents)?;
        config.line_geometry()?;

        Ok(config)
    }

    #[inline]
    pub fn line_geometry(&self) -> Result<LineGeometry, Error> {
        let [x1, y1, x2, y2] = self.line;
        LineGeometry::from_coords(x1, y1, x2, y2)
    }

    pub fn class_map(&self) -> ClassMap {
        match &self.class_names {
            Some(names) => ClassMap::new(names.clone(), self.classes.clone()),
            None => ClassMap::coco(self.classes.clone()),
        }
    }

    pub fn session(&self) -> Result<CountingSession, Error> {
        Ok(CountingSession::new(
            self.line_geometry()?,
            PersistenceLog::new(&self.log_path),
        ))
    }
}
