use crate::commands::cue::{FixCommand, TracksCommand};
use crate::commands::split::SplitCommand;
use clap::{Parser, Subcommand};

pub mod cue;
pub mod split;

/// CLI for fixing CUE sheets, splitting FLAC images into tracks and tagging them.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Split(SplitCommand),
    Fix(FixCommand),
    Tracks(TracksCommand),
}
