use crate::cue::models::TrackRecord;
use crate::split::error::{SplitError, SplitResult};
use log::debug;
use std::ffi::OsString;
use std::path::Path;
use tokio::process::Command;

pub const DEFAULT_TAGGER: &str = "metaflac";

/// Replaces the tags of one split track file.
pub trait TagWriter {
    async fn write_tags(&self, file: &Path, track: &TrackRecord, album: &str) -> SplitResult<()>;
}

/// Runs `metaflac`: clears all existing tags, then sets TITLE, ARTIST and ALBUM.
#[derive(Debug, Clone)]
pub struct Metaflac {
    program: OsString,
}

impl Default for Metaflac {
    fn default() -> Self {
        Self::new(DEFAULT_TAGGER)
    }
}

impl Metaflac {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, file: &Path, track: &TrackRecord, album: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--remove-all-tags")
            .arg(format!("--set-tag=TITLE={}", track.title))
            .arg(format!("--set-tag=ARTIST={}", track.performer))
            .arg(format!("--set-tag=ALBUM={album}"))
            .arg(file);
        cmd
    }
}

impl TagWriter for Metaflac {
    async fn write_tags(&self, file: &Path, track: &TrackRecord, album: &str) -> SplitResult<()> {
        let mut cmd = self.command(file, track, album);
        let program = self.program.to_string_lossy().into_owned();

        debug!("Running {cmd:?}");

        let output = cmd.output().await.map_err(|source| SplitError::Spawn {
            program: program.clone(),
            source,
        })?;

        if !output.status.success() {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));

            return Err(SplitError::ToolFailed {
                program,
                status: output.status,
                output: combined.trim().to_string(),
            });
        }

        Ok(())
    }
}
