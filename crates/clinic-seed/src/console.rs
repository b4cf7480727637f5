//! Line-oriented status output for seeding runs.

use std::sync::Mutex;

/// Sink for human-readable status lines.
pub trait Console: Send + Sync {
    fn info(&self, line: &str);
}

/// Forwards each line to `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingConsole;

impl Console for TracingConsole {
    fn info(&self, line: &str) {
        tracing::info!("{line}");
    }
}

/// Keeps every line in memory.
#[derive(Debug, Default)]
pub struct RecordingConsole {
    lines: Mutex<Vec<String>>,
}

impl RecordingConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl Console for RecordingConsole {
    fn info(&self, line: &str) {
        let mut lines = self
            .lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        lines.push(line.to_string());
    }
}
