use crate::cue::error::{CueError, CuePhase, CueResult};
use crate::cue::models::IndexTimestamp;
use crate::cue::sheet_lines;
use const_format::concatcp;
use lazy_static::lazy_static;
use log::{debug, info, warn};
use regex::bytes::{Captures, Regex};
use std::borrow::Cow;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufWriter};

pub const CUE_EXTENSION: &str = "cue";

/// Appended to the original sheet path to name the normalized copy.
pub const FIXED_CUE_SUFFIX: &str = concatcp!("-fixed.", CUE_EXTENSION);

lazy_static! {
    // byte oriented so Windows-1252 sheets pass through untouched
    static ref INDEX_RE: Regex = Regex::new(r"(?-u)INDEX 01\s+([0-9]+):([0-9]+):([0-9]+)").unwrap();
}

/// `album.cue` -> `album.cue-fixed.cue`
pub fn fixed_cue_path(original: &Path) -> PathBuf {
    let mut path = OsString::from(original.as_os_str());
    path.push(FIXED_CUE_SUFFIX);
    PathBuf::from(path)
}

/// Rewrites every `INDEX 01 H:M:S` on the line into `INDEX 01 MM:S.000`.
/// Lines without a match are returned borrowed and untouched.
pub fn normalize_line(line: &[u8]) -> Cow<'_, [u8]> {
    INDEX_RE.replace_all(line, |caps: &Captures| {
        // the groups only ever hold ASCII digits
        let hours = String::from_utf8_lossy(&caps[1]);
        let minutes = String::from_utf8_lossy(&caps[2]);
        let seconds = String::from_utf8_lossy(&caps[3]);
        let timestamp = IndexTimestamp::from_parts(&hours, &minutes, &seconds);
        format!("INDEX 01 {}", timestamp.to_split_position()).into_bytes()
    })
}

/// Normalizes a whole sheet held in memory. Each output line ends with `\n`.
pub fn normalize(text: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() + 16);
    for line in sheet_lines(text) {
        let fixed = normalize_line(line);
        if let Cow::Owned(fixed) = &fixed {
            debug!(
                "{} -> {}",
                String::from_utf8_lossy(line).trim(),
                String::from_utf8_lossy(fixed).trim()
            );
        }
        out.extend_from_slice(&fixed);
        out.push(b'\n');
    }
    out
}

/// Normalizes the sheet at `input` into a new file at `output` and returns
/// the number of lines written.
///
/// The source is read completely before `output` is created. A failed write
/// removes the partially written `output`.
pub async fn normalize_file(input: &Path, output: &Path) -> CueResult<usize> {
    let mut source = File::open(input)
        .await
        .map_err(|e| CueError::io(CuePhase::Open, input, e))?;

    let mut text = Vec::new();
    source
        .read_to_end(&mut text)
        .await
        .map_err(|e| CueError::io(CuePhase::Read, input, e))?;

    let fixed = normalize(&text);
    let lines = fixed.iter().filter(|&&b| b == b'\n').count();

    let destination = File::create(output)
        .await
        .map_err(|e| CueError::io(CuePhase::Create, output, e))?;

    write_fixed(destination, output, &fixed).await?;

    info!("Fixed CUE sheet written to {output:?} ({lines} lines)");

    Ok(lines)
}

/// Writes `fixed` through `destination`, which was opened for `output`.
/// On failure `output` is removed.
async fn write_fixed(destination: File, output: &Path, fixed: &[u8]) -> CueResult<()> {
    let result = write_all(destination, output, fixed).await;

    if let Err(e) = &result {
        debug!("Writing fixed CUE sheet stopped in the {} phase", e.phase());
        if let Err(remove) = tokio::fs::remove_file(output).await {
            warn!("Could not remove incomplete CUE sheet {output:?}: {remove}");
        }
    }

    result
}

async fn write_all(destination: File, output: &Path, fixed: &[u8]) -> CueResult<()> {
    let mut writer = BufWriter::new(destination);

    writer
        .write_all(fixed)
        .await
        .map_err(|e| CueError::io(CuePhase::Write, output, e))?;
    writer
        .flush()
        .await
        .map_err(|e| CueError::io(CuePhase::Flush, output, e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn fix(line: &str) -> String {
        String::from_utf8(normalize_line(line.as_bytes()).into_owned()).unwrap()
    }

    #[test]
    fn rewrites_index_line_keeping_indent() {
        assert_eq!(fix("\tINDEX 01 01:30:12"), "\tINDEX 01 90:12.000");
    }

    #[test]
    fn zero_hours_still_pads_minutes() {
        assert_eq!(fix("    INDEX 01 00:04:33"), "    INDEX 01 04:33.000");
    }

    #[test]
    fn keeps_trailing_content_of_matched_line() {
        assert_eq!(
            fix("\tINDEX 01 00:10:00 trailing"),
            "\tINDEX 01 10:00.000 trailing"
        );
    }

    #[test]
    fn leaves_other_directives_alone() {
        for line in [
            &b"\tINDEX 00 00:01:00"[..],
            b"\tTRACK 01 AUDIO",
            b"\t\tTITLE \"INDEX 01\"",
            b"\t\tTITLE \"Caf\xe9\"",
            b"FILE \"a.flac\" WAVE",
            b"",
            b"   ",
        ] {
            assert!(matches!(normalize_line(line), Cow::Borrowed(l) if l == line));
        }
    }

    #[test]
    fn already_normalized_line_passes_through() {
        let once = fix("\tINDEX 01 01:02:03");
        assert_eq!(once, "\tINDEX 01 62:03.000");
        assert_eq!(fix(&once), once);
    }

    #[test]
    fn seconds_run_is_copied_not_reinterpreted() {
        assert_eq!(fix("INDEX 01 0:0:7"), "INDEX 01 00:7.000");
        assert_eq!(fix("INDEX 01 0:0:123"), "INDEX 01 00:123.000");
    }

    #[test]
    fn folding_matches_arithmetic_for_a_grid_of_values() {
        for h in [0u64, 1, 2, 10, 99] {
            for m in [0u64, 1, 9, 59, 75] {
                let line = format!("INDEX 01 {h}:{m}:42");
                let expected = format!("INDEX 01 {:02}:42.000", h * 60 + m);
                assert_eq!(fix(&line), expected);
            }
        }
    }

    #[test]
    fn normalize_preserves_line_count_and_unmatched_lines() {
        let input: &[u8] = b"REM GENRE Rock\r\nFILE \"x.flac\" WAVE\n  TRACK 01 AUDIO\n    INDEX 01 00:00:00\n\n  TITLE \"\xc0 bient\xf4t\"\n    INDEX 01 01:00:10";
        let output = normalize(input);
        let in_lines: Vec<_> = sheet_lines(input).collect();
        let out_lines: Vec<_> = sheet_lines(&output).collect();

        assert_eq!(in_lines.len(), out_lines.len());
        assert!(output.ends_with(b"\n"));
        assert_eq!(out_lines[3], b"    INDEX 01 00:00.000");
        assert_eq!(out_lines[6], b"    INDEX 01 60:10.000");
        for i in [0, 1, 2, 4, 5] {
            assert_eq!(in_lines[i], out_lines[i]);
        }
    }

    #[test]
    fn fixed_path_appends_suffix() {
        assert_eq!(
            fixed_cue_path(Path::new("/music/album.cue")),
            PathBuf::from("/music/album.cue-fixed.cue")
        );
    }

    #[tokio::test]
    async fn normalize_file_writes_sibling_sheet() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("album.cue");
        let output = fixed_cue_path(&input);
        tokio::fs::write(
            &input,
            "FILE \"album.flac\" WAVE\n\tTRACK 01 AUDIO\n\t\tINDEX 01 01:30:12",
        )
        .await
        .unwrap();

        let lines = normalize_file(&input, &output).await.unwrap();

        assert_eq!(lines, 3);
        let written = tokio::fs::read_to_string(&output).await.unwrap();
        assert_eq!(
            written,
            "FILE \"album.flac\" WAVE\n\tTRACK 01 AUDIO\n\t\tINDEX 01 90:12.000\n"
        );
    }

    #[tokio::test]
    async fn latin1_sheet_keeps_its_bytes() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("album.cue");
        let output = fixed_cue_path(&input);
        tokio::fs::write(
            &input,
            b"\tTRACK 01 AUDIO\r\n\t\tTITLE \"Caf\xe9\"\r\n\t\tPERFORMER \"Bj\xf6rk\"\r\n\t\tINDEX 01 01:30:12\r\n",
        )
        .await
        .unwrap();

        let lines = normalize_file(&input, &output).await.unwrap();

        assert_eq!(lines, 4);
        assert_eq!(
            tokio::fs::read(&output).await.unwrap(),
            b"\tTRACK 01 AUDIO\n\t\tTITLE \"Caf\xe9\"\n\t\tPERFORMER \"Bj\xf6rk\"\n\t\tINDEX 01 90:12.000\n"
        );
    }

    #[tokio::test]
    async fn missing_input_reports_open_phase() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("missing.cue");
        let output = fixed_cue_path(&input);

        let err = normalize_file(&input, &output).await.unwrap_err();

        assert_eq!(err.phase(), CuePhase::Open);
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn unwritable_output_reports_create_phase() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("album.cue");
        tokio::fs::write(&input, "TITLE \"x\"\n").await.unwrap();
        let output = dir.path().join("no-such-dir").join("out.cue");

        let err = normalize_file(&input, &output).await.unwrap_err();

        assert_eq!(err.phase(), CuePhase::Create);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn unreadable_input_reports_read_phase_without_output() {
        // opening a directory works on unix, reading it does not
        let dir = tempdir().unwrap();
        let input = dir.path().join("album.cue");
        tokio::fs::create_dir(&input).await.unwrap();
        let output = fixed_cue_path(&input);

        let err = normalize_file(&input, &output).await.unwrap_err();

        assert_eq!(err.phase(), CuePhase::Read);
        assert!(!output.exists());
    }

    /// An existing file opened read-only, so every write to it fails.
    async fn read_only_handle(path: &Path) -> File {
        tokio::fs::write(path, b"partial").await.unwrap();
        File::open(path).await.unwrap()
    }

    #[tokio::test]
    async fn failed_write_reports_write_phase_and_removes_output() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("album.cue-fixed.cue");
        let handle = read_only_handle(&output).await;
        // larger than any buffer between us and the fd
        let fixed = vec![b'x'; 8 * 1024 * 1024];

        let err = write_fixed(handle, &output, &fixed).await.unwrap_err();

        assert_eq!(err.phase(), CuePhase::Write);
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn failed_flush_reports_flush_phase_and_removes_output() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("album.cue-fixed.cue");
        let handle = read_only_handle(&output).await;

        let err = write_fixed(handle, &output, b"TITLE \"x\"\n")
            .await
            .unwrap_err();

        assert_eq!(err.phase(), CuePhase::Flush);
        assert!(!output.exists());
    }
}
