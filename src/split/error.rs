use crate::cue::error::CueError;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SplitError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    CueError(#[from] CueError),

    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}, output: {output}")]
    ToolFailed {
        program: String,
        status: ExitStatus,
        output: String,
    },

    #[error("Expected split output does not exist: {0:?}")]
    MissingTrackFile(PathBuf),
}

pub type SplitResult<T> = Result<T, SplitError>;
