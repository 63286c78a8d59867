use crate::cue::models::TrackRecord;

/// Container produced by the splitter.
pub const LOSSLESS_FORMAT: &str = "flac";

/// shnsplit output name template: `%n` is the two digit track number,
/// `%t` the track title.
pub const NAME_TEMPLATE: &str = "%n-%t";

/// Rebuilds the file name the splitter gave a track from its record alone.
///
/// This has to stay byte for byte in sync with [`NAME_TEMPLATE`] as shnsplit
/// expands it. The split output is never listed, so if shnsplit alters a title
/// (e.g. replacing characters the filesystem rejects) the name built here will
/// not exist and tagging that track fails with a missing file.
pub fn track_file_name(track: &TrackRecord) -> String {
    format!("{:0>2}-{}.{}", track.number, track.title, LOSSLESS_FORMAT)
}
