use crate::split::error::{SplitError, SplitResult};
use crate::split::naming::{LOSSLESS_FORMAT, NAME_TEMPLATE};
use log::debug;
use std::ffi::OsString;
use std::path::Path;
use tokio::process::Command;

pub const DEFAULT_SPLITTER: &str = "shnsplit";

/// Splits one audio image into per-track files according to a CUE sheet.
pub trait Splitter {
    async fn split(
        &self,
        cue_path: &Path,
        audio_path: &Path,
        output_dir: &Path,
    ) -> SplitResult<()>;
}

/// Runs `shnsplit`, always overwriting existing files of the same name.
#[derive(Debug, Clone)]
pub struct Shnsplit {
    program: OsString,
}

impl Default for Shnsplit {
    fn default() -> Self {
        Self::new(DEFAULT_SPLITTER)
    }
}

impl Shnsplit {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, cue_path: &Path, audio_path: &Path, output_dir: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(["-O", "always", "-f"])
            .arg(cue_path)
            .args(["-o", LOSSLESS_FORMAT, "-t", NAME_TEMPLATE, "-d"])
            .arg(output_dir)
            .arg(audio_path);
        cmd
    }
}

impl Splitter for Shnsplit {
    async fn split(
        &self,
        cue_path: &Path,
        audio_path: &Path,
        output_dir: &Path,
    ) -> SplitResult<()> {
        let mut cmd = self.command(cue_path, audio_path, output_dir);
        let program = self.program.to_string_lossy().into_owned();

        debug!("Running {cmd:?}");

        // progress goes straight to the terminal
        let status = cmd.status().await.map_err(|source| SplitError::Spawn {
            program: program.clone(),
            source,
        })?;

        if !status.success() {
            return Err(SplitError::ToolFailed {
                program,
                status,
                output: String::new(),
            });
        }

        Ok(())
    }
}
