use crate::cue::error::{CueError, CuePhase, CueResult};
use crate::cue::models::TrackRecord;
use crate::cue::sheet_lines;
use lazy_static::lazy_static;
use log::{debug, info};
use regex::bytes::Regex;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

lazy_static! {
    // one indent unit: a tab or two spaces
    static ref TRACK_RE: Regex = Regex::new(r"(?-u)^(?:\t|  )TRACK[ \t]+(\S+)").unwrap();
    // (?-u) lets `.` match bytes that are not UTF-8
    static ref TITLE_RE: Regex = Regex::new(r#"(?-u)TITLE "(.+)""#).unwrap();
    static ref PERFORMER_RE: Regex = Regex::new(r#"(?-u)PERFORMER "(.+)""#).unwrap();
}

/// Quoted metadata fields read from the two lines after a `TRACK` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackField {
    Title,
    Performer,
}

impl TrackField {
    fn regex(self) -> &'static Regex {
        match self {
            TrackField::Title => &*TITLE_RE,
            TrackField::Performer => &*PERFORMER_RE,
        }
    }

    /// Returns the quoted value following the field keyword, or an empty
    /// string when the line does not carry it. Bytes that are not UTF-8 are
    /// replaced with U+FFFD.
    pub fn extract(self, line: &[u8]) -> String {
        self.regex()
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
            .unwrap_or_default()
    }
}

/// Returns the track number token if `line` is a track header.
pub fn track_header(line: &[u8]) -> Option<&[u8]> {
    TRACK_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_bytes())
}

/// Reads track records out of a normalized sheet.
///
/// The grammar is positional: the line right after a `TRACK` header is always
/// taken as the title line and the one after that as the performer line, with
/// no check that they are. A field that is not found there stays empty.
pub fn extract_tracks(text: &[u8]) -> Vec<TrackRecord> {
    let mut tracks = Vec::new();
    let mut lines = sheet_lines(text);

    while let Some(line) = lines.next() {
        let Some(number) = track_header(line) else {
            continue;
        };

        let title = lines
            .next()
            .map(|l| TrackField::Title.extract(l))
            .unwrap_or_default();
        let performer = lines
            .next()
            .map(|l| TrackField::Performer.extract(l))
            .unwrap_or_default();

        tracks.push(TrackRecord {
            number: String::from_utf8_lossy(number).into_owned(),
            title,
            performer,
        });
    }

    tracks
}

pub struct CueParser {
    cue_path: PathBuf,
}

impl CueParser {
    pub fn new(cue_path: impl AsRef<Path>) -> Self {
        Self {
            cue_path: cue_path.as_ref().to_path_buf(),
        }
    }

    pub async fn parse(&self) -> CueResult<Vec<TrackRecord>> {
        let mut file = tokio::fs::File::open(&self.cue_path)
            .await
            .map_err(|e| CueError::io(CuePhase::Open, &self.cue_path, e))?;

        let mut text = Vec::new();
        file.read_to_end(&mut text)
            .await
            .map_err(|e| CueError::io(CuePhase::Read, &self.cue_path, e))?;

        let tracks = extract_tracks(&text);

        info!("Parsed {} tracks from {:?}", tracks.len(), self.cue_path);
        for track in &tracks {
            debug!("Track {track}");
        }

        Ok(tracks)
    }
}
