use clap::Parser;
use std::path::PathBuf;

/// Rewrites INDEX 01 HH:MM:SS timestamps into MM:SS.000
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
pub struct FixCommand {
    /// CUE sheet to fix
    #[arg(value_name = "CUE")]
    pub cue: PathBuf,

    /// Output path, defaults to <CUE>-fixed.cue
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,
}

/// Lists the tracks of a fixed CUE sheet
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
pub struct TracksCommand {
    /// Fixed CUE sheet
    #[arg(value_name = "CUE")]
    pub cue: PathBuf,
}
