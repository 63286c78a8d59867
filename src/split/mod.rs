use crate::cue::models::TrackRecord;
use crate::cue::{CueParser, fixed_cue_path, normalize_file};
use crate::split::error::{SplitError, SplitResult};
use crate::split::naming::track_file_name;
use crate::split::report::{SplitReport, TrackFailure};
use crate::split::splitter::Splitter;
use crate::split::tagger::TagWriter;
use futures::StreamExt;
use futures::stream;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{debug, error, info};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

pub mod error;
pub mod naming;
pub mod report;
pub mod splitter;
pub mod tagger;

#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// Where the splitter writes tracks and where they are looked up for tagging.
    pub output_dir: PathBuf,
    /// Number of tag writer invocations in flight at once.
    pub jobs: NonZeroUsize,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            jobs: NonZeroUsize::MIN,
        }
    }
}

/// Fixes the sheet, splits the audio image, then tags every split track.
///
/// Errors from the sheet phases and the splitter stop the run. Tagging
/// failures are collected per track in the returned report.
pub async fn split_album<S: Splitter, T: TagWriter>(
    pb: MultiProgress,
    splitter: &S,
    tagger: &T,
    cue_path: &Path,
    audio_path: &Path,
    album: &str,
    options: &SplitOptions,
) -> SplitResult<SplitReport> {
    let fixed_cue = fixed_cue_path(cue_path);

    debug!("Fixing CUE sheet: {cue_path:?} -> {fixed_cue:?}");
    normalize_file(cue_path, &fixed_cue).await?;

    debug!("Splitting {audio_path:?} into {:?}", options.output_dir);
    splitter
        .split(&fixed_cue, audio_path, &options.output_dir)
        .await?;
    info!("Split done");

    let tracks = CueParser::new(&fixed_cue).parse().await?;

    Ok(tag_tracks(pb, tagger, tracks, album, options).await)
}

/// Tags the split file of every track. Never fails as a whole; the report
/// keeps record order whatever `options.jobs` is.
pub async fn tag_tracks<T: TagWriter>(
    pb: MultiProgress,
    tagger: &T,
    tracks: Vec<TrackRecord>,
    album: &str,
    options: &SplitOptions,
) -> SplitReport {
    let bar = pb.add(ProgressBar::new(tracks.len() as u64));
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let bar = &bar;

    let results: Vec<(PathBuf, SplitResult<()>)> = stream::iter(&tracks)
        .map(|track| {
            let file = options.output_dir.join(track_file_name(track));
            async move {
                bar.set_message(track.title.clone());
                let result = tag_track(tagger, &file, track, album).await;
                bar.inc(1);
                (file, result)
            }
        })
        .buffered(options.jobs.get())
        .collect()
        .await;

    bar.finish_and_clear();

    let mut report = SplitReport::default();

    for (track, (file, result)) in tracks.iter().zip(results) {
        match result {
            Ok(()) => {
                debug!("Tagged {file:?}");
                report.tagged.push(file);
            }
            Err(e) => {
                error!("Failed to apply metadata for {file:?}: {e}");
                report.failures.push(TrackFailure {
                    track: track.clone(),
                    file,
                    error: e,
                });
            }
        }
    }

    report.tracks = tracks;
    report
}

async fn tag_track<T: TagWriter>(
    tagger: &T,
    file: &Path,
    track: &TrackRecord,
    album: &str,
) -> SplitResult<()> {
    if !tokio::fs::try_exists(file).await? {
        return Err(SplitError::MissingTrackFile(file.to_path_buf()));
    }

    tagger.write_tags(file, track, album).await
}
