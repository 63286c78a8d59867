use crate::cue::models::TrackRecord;
use crate::split::error::SplitError;
use std::path::PathBuf;

/// A track whose tags could not be written.
#[derive(Debug)]
pub struct TrackFailure {
    pub track: TrackRecord,
    pub file: PathBuf,
    pub error: SplitError,
}

/// Outcome of a full split run. Tagging is best effort, so a run can finish
/// with some tracks in `failures`.
#[derive(Debug, Default)]
pub struct SplitReport {
    pub tracks: Vec<TrackRecord>,
    pub tagged: Vec<PathBuf>,
    pub failures: Vec<TrackFailure>,
}

impl SplitReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} tracks parsed, {} tagged, {} failed",
            self.tracks.len(),
            self.tagged.len(),
            self.failures.len()
        )
    }
}
