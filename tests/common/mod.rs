use std::sync::{Arc, Mutex};

use assert_rail::{Level, Logger};

/// Keeps every record in memory.
#[derive(Default)]
pub struct RecordingLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl RecordingLogger {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn records(&self) -> Vec<(Level, String)> {
        self.records.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records().into_iter().map(|(_, message)| message).collect()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, level: Level, message: &str) {
        self.records.lock().unwrap().push((level, message.to_owned()));
    }
}
