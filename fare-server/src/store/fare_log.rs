//! Append-only fare log on disk.
//!
//! One fare per line, `BOARDING,DESTINATION,COST`. The log is replayed at
//! startup, so reading is forgiving: a malformed line is logged and skipped
//! and the lines around it still load.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use std::str::Utf8Error;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::domain::{Fare, FareRequest, validate};

/// Why a log line could not be read as a fare.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("line is not valid UTF-8: {0}")]
    Encoding(#[from] Utf8Error),

    #[error("expected 3 comma-separated fields, found {0}")]
    FieldCount(usize),

    #[error("malformed location code {0:?}")]
    LocationCode(String),

    #[error("malformed cost: {0}")]
    Cost(#[from] ParseIntError),
}

/// Render a fare as a log line, newline included.
pub fn format_record(fare: &Fare) -> String {
    format!("{},{},{}\n", fare.boarding, fare.destination, fare.cost)
}

/// Parse one raw log line (without its newline).
pub fn parse_line(line: &[u8]) -> Result<FareRequest, RecordError> {
    parse_record(std::str::from_utf8(line)?)
}

/// Parse one log line (without its newline).
///
/// Codes are upper-cased. The cost must be an integer but its range is not
/// checked here; loading rejects out-of-range fares.
pub fn parse_record(line: &str) -> Result<FareRequest, RecordError> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let fields: Vec<&str> = line.split(',').collect();
    let [boarding, destination, cost] = fields.as_slice() else {
        return Err(RecordError::FieldCount(fields.len()));
    };

    let boarding = boarding.to_ascii_uppercase();
    if !validate::is_valid_location_code(&boarding) {
        return Err(RecordError::LocationCode(boarding));
    }
    let destination = destination.to_ascii_uppercase();
    if !validate::is_valid_location_code(&destination) {
        return Err(RecordError::LocationCode(destination));
    }
    let cost = cost.parse::<i64>()?;

    Ok(FareRequest {
        boarding,
        destination,
        cost,
    })
}

/// The durable fare log.
///
/// Appends and reads are serialised by one lock so concurrent writers never
/// interleave partial lines.
#[derive(Debug)]
pub struct FareLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FareLog {
    /// Use the log at `path` without touching the filesystem.
    ///
    /// Appends fail until the file exists.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Use the log at `path`, creating an empty file if there is none.
    pub fn open_or_create(path: impl Into<PathBuf>) -> io::Result<Self> {
        let log = Self::new(path);
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log.path)?;
        Ok(log)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append one fare. The file must already exist.
    pub fn append(&self, fare: &Fare) -> io::Result<()> {
        let _guard = self.guard();
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(format_record(fare).as_bytes())?;
        file.flush()
    }

    /// Every well-formed record, in file order. Blank lines are ignored.
    ///
    /// Lines are split on raw bytes, so a line that is not UTF-8 is skipped
    /// like any other malformed line.
    pub fn read_all(&self) -> io::Result<Vec<FareRequest>> {
        let _guard = self.guard();
        let reader = BufReader::new(File::open(&self.path)?);

        let mut records = Vec::new();
        for (index, line) in reader.split(b'\n').enumerate() {
            let line = line?;
            if line.trim_ascii().is_empty() {
                continue;
            }
            match parse_line(&line) {
                Ok(record) => records.push(record),
                Err(e) => warn!(
                    path = %self.path.display(),
                    line = index + 1,
                    error = %e,
                    "skipping malformed fare record"
                ),
            }
        }

        debug!(path = %self.path.display(), records = records.len(), "read fare log");
        Ok(records)
    }

    /// Empty the log file.
    pub fn reset(&self) -> io::Result<()> {
        let _guard = self.guard();
        File::create(&self.path).map(drop)
    }
}
