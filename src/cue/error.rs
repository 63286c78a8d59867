use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The file operation that was running when a CUE sheet I/O error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CuePhase {
    Open,
    Create,
    Read,
    Write,
    Flush,
}

impl fmt::Display for CuePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CuePhase::Open => "open",
            CuePhase::Create => "create",
            CuePhase::Read => "read",
            CuePhase::Write => "write",
            CuePhase::Flush => "flush",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum CueError {
    #[error("Failed to {phase} CUE sheet {path:?}: {source}")]
    Io {
        phase: CuePhase,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CueError {
    pub fn io(phase: CuePhase, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CueError::Io {
            phase,
            path: path.into(),
            source,
        }
    }

    pub fn phase(&self) -> CuePhase {
        match self {
            CueError::Io { phase, .. } => *phase,
        }
    }
}

pub type CueResult<T> = Result<T, CueError>;
