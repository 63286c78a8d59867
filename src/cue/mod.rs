pub mod error;
pub mod models;
pub mod normalize;
pub mod parser;

pub use normalize::{fixed_cue_path, normalize_file};
pub use parser::CueParser;

/// Splits raw sheet bytes into lines without their `\n` or `\r\n` terminator.
///
/// Sheets are not required to be UTF-8 (EAC writes Windows-1252), so lines
/// stay bytes. A final line without terminator is still a line.
pub fn sheet_lines(text: &[u8]) -> impl Iterator<Item = &[u8]> {
    let body = text.strip_suffix(b"\n").unwrap_or(text);

    (!text.is_empty())
        .then(|| body.split(|&b| b == b'\n'))
        .into_iter()
        .flatten()
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
}
