use std::{
    fs::{self, File, OpenOptions},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::replay::ReplayEvent;

pub const LOG_PATH_ENV: &str = "TOUCH_REPLAY_LOG_JSON_PATH";

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Record<'a> {
    Event(&'a ReplayEvent),
    Check {
        matched: bool,
        expected: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<&'a str>,
    },
}

/// JSON-lines record of one replay: every dispatched event, then the outcome
/// of the expected-sequence check if one ran.
pub struct ReplayLog {
    path: PathBuf,
    out: BufWriter<File>,
}

impl ReplayLog {
    /// `path` wins over `TOUCH_REPLAY_LOG_JSON_PATH`. `None` when neither is set.
    pub fn from_args(path: Option<PathBuf>) -> Result<Option<Self>> {
        path.or_else(|| std::env::var_os(LOG_PATH_ENV).map(PathBuf::from))
            .map(|path| Self::open(&path))
            .transpose()
    }

    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open replay log {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            out: BufWriter::new(file),
        })
    }

    pub fn record(&mut self, event: &ReplayEvent) -> Result<()> {
        self.write(&Record::Event(event))
    }

    pub fn check(&mut self, expected: usize, mismatch: Option<&str>) -> Result<()> {
        self.write(&Record::Check {
            matched: mismatch.is_none(),
            expected,
            detail: mismatch,
        })
    }

    pub fn finish(mut self) -> Result<()> {
        self.out
            .flush()
            .with_context(|| format!("failed to flush replay log {}", self.path.display()))
    }

    fn write(&mut self, record: &Record<'_>) -> Result<()> {
        let line = serde_json::to_string(record)?;
        writeln!(self.out, "{line}")
            .with_context(|| format!("failed to write replay log {}", self.path.display()))
    }
}
