use crate::split::splitter::DEFAULT_SPLITTER;
use crate::split::tagger::DEFAULT_TAGGER;
use clap::Parser;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Fixes the CUE sheet, splits the FLAC image with shnsplit and tags every track with metaflac.
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
#[command(
    long_about = "Fixes the CUE sheet, splits the FLAC image with shnsplit and tags every track with metaflac\n\nNote: the fixed sheet is kept next to the original as <CUE>-fixed.cue, tracks are written as <NN>-<title>.flac"
)]
pub struct SplitCommand {
    /// Original CUE sheet
    #[arg(value_name = "CUE")]
    pub cue: PathBuf,

    /// FLAC image the sheet describes
    #[arg(value_name = "AUDIO")]
    pub audio: PathBuf,

    /// Album name written to every track
    #[arg(value_name = "ALBUM")]
    pub album: String,

    /// Splitter program
    #[arg(long, value_name = "PROGRAM", default_value = DEFAULT_SPLITTER)]
    pub splitter: String,

    /// Tag writer program
    #[arg(long, value_name = "PROGRAM", default_value = DEFAULT_TAGGER)]
    pub tagger: String,

    /// Directory the split tracks are written to
    #[arg(long, short = 'd', value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Number of tracks tagged at the same time
    #[arg(long, short = 'j', value_name = "JOBS", default_value_t = NonZeroUsize::MIN)]
    pub jobs: NonZeroUsize,

    #[arg(
        long,
        help = "exits with an error if any track could not be tagged",
        default_value = "false"
    )]
    pub strict: bool,
}
