//! File-based data source.
//!
//! Replays a JSON array of samples from disk. The window cutoff is applied
//! locally, measured back from the newest sample in the file so that old
//! captures still show something.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::{DataSource, FetchQuery};
use crate::data::{Sample, TimeWindow};

/// A data source that reads samples from a JSON file.
///
/// The source tracks the file's modification time and only returns
/// new data when the file has been updated or the query changed.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    query: FetchQuery,
    last_error: Option<String>,
    last_modified: Option<SystemTime>,
    /// Everything in the file, unfiltered
    cached: Option<Vec<Sample>>,
    dirty: bool,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            query: FetchQuery::new(TimeWindow::default()),
            last_error: None,
            last_modified: None,
            cached: None,
            dirty: false,
        }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file's modification time.
    fn get_modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }

    /// Read and parse the file.
    fn read_file(&mut self) -> Option<Vec<Sample>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(samples) => {
                    self.last_error = None;
                    Some(samples)
                }
                Err(e) => {
                    self.last_error = Some(format!("Parse error: {}", e));
                    None
                }
            },
            Err(e) => {
                self.last_error = Some(format!("Read error: {}", e));
                None
            }
        }
    }
}

/// Apply the query the way the API would: keep samples inside the lookback
/// (relative to the newest one) and at most a page of the most recent.
fn apply_query(samples: &[Sample], query: &FetchQuery) -> Vec<Sample> {
    let newest = samples
        .iter()
        .map(|s| s.ping_time)
        .filter(|t| t.is_finite())
        .reduce(f64::max);

    let mut kept: Vec<Sample> = match (query.legacy, newest) {
        (false, Some(newest)) => {
            let cutoff = query.cutoff_ms(newest as i64) as f64;
            samples.iter().filter(|s| s.ping_time >= cutoff).cloned().collect()
        }
        _ => samples.to_vec(),
    };

    let page = query.page_size() as usize;
    if kept.len() > page {
        kept.sort_by(|a, b| b.ping_time.total_cmp(&a.ping_time));
        kept.truncate(page);
    }
    kept
}

impl DataSource for FileSource {
    fn poll(&mut self) -> Option<Vec<Sample>> {
        let current_modified = self.get_modified_time();

        // Check if file has been modified since last read
        let file_changed = match (&self.last_modified, &current_modified) {
            (None, _) => true,        // First poll, always read
            (Some(_), None) => false, // File disappeared, don't update
            (Some(last), Some(current)) => current > last,
        };

        if file_changed {
            if let Some(samples) = self.read_file() {
                self.last_modified = current_modified;
                self.cached = Some(samples);
                self.dirty = true;
            }
        }

        if !self.dirty {
            return None;
        }
        self.dirty = false;
        self.cached.as_deref().map(|all| apply_query(all, &self.query))
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn set_query(&mut self, query: FetchQuery) {
        self.query = query;
        self.dirty = self.cached.is_some();
    }

    fn refresh(&mut self) {
        self.last_modified = None;
    }
}
