use crate::commands::{Cli, Commands};
use crate::cue::models::TrackRecord;
use crate::cue::{CueParser, fixed_cue_path, normalize_file};
use crate::error::{CuesplitError, CuesplitResult};
use crate::split::naming::track_file_name;
use crate::split::report::SplitReport;
use crate::split::splitter::Shnsplit;
use crate::split::tagger::Metaflac;
use crate::split::{SplitOptions, split_album};
use anyhow::Result;
use clap::Parser;
use indicatif::MultiProgress;
use indicatif_log_bridge::LogWrapper;
use log::{info, warn};

mod commands;
mod cue;
mod error;
mod split;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let logger = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .build();

    let level = logger.filter();
    let pb = MultiProgress::new();

    LogWrapper::new(pb.clone(), logger).try_init()?;
    log::set_max_level(level);

    let cli = Cli::parse();

    match cli.command {
        Commands::Split(cmd) => {
            let splitter = Shnsplit::new(cmd.splitter);
            let tagger = Metaflac::new(cmd.tagger);
            let options = SplitOptions {
                output_dir: cmd.output_dir,
                jobs: cmd.jobs,
            };

            let report = split_album(
                pb.clone(),
                &splitter,
                &tagger,
                &cmd.cue,
                &cmd.audio,
                &cmd.album,
                &options,
            )
            .await?;

            check_report(&report, cmd.strict)?;
        }
        Commands::Fix(cmd) => {
            let output = cmd.output.unwrap_or_else(|| fixed_cue_path(&cmd.cue));
            normalize_file(&cmd.cue, &output).await?;
        }
        Commands::Tracks(cmd) => {
            let tracks = CueParser::new(&cmd.cue).parse().await?;
            for track in &tracks {
                println!("{}", track_line(track));
            }
        }
    }

    Ok(())
}

fn track_line(track: &TrackRecord) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        track.number,
        track.title,
        track.performer,
        track_file_name(track)
    )
}

/// Tagging is best effort: failures are only an error with `--strict`.
fn check_report(report: &SplitReport, strict: bool) -> CuesplitResult<()> {
    if report.is_success() {
        info!("Complete: {}", report.summary());
        return Ok(());
    }

    warn!("Completed with errors: {}", report.summary());
    for failure in &report.failures {
        warn!(
            "  track {} {:?}: {}",
            failure.track.number, failure.file, failure.error
        );
    }

    if strict {
        return Err(CuesplitError::TaggingFailed(
            report.failures.len(),
            report.tracks.len(),
        ));
    }

    Ok(())
}
