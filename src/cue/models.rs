use std::fmt;

/// One track block of a CUE sheet, as read by [`crate::cue::parser::CueParser`].
///
/// `number` keeps the text of the `TRACK` line verbatim (`"03"` stays `"03"`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackRecord {
    pub number: String,
    pub title: String,
    pub performer: String,
}

impl fmt::Display for TrackRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} {:?}", self.number, self.title, self.performer)
    }
}

/// An `INDEX 01` position in the `hours:minutes:seconds` form found in the
/// source sheet.
///
/// `seconds` is kept as the original text; only hours and minutes are folded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexTimestamp<'a> {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: &'a str,
}

impl<'a> IndexTimestamp<'a> {
    /// Builds a timestamp from captured digit runs. Anything that does not
    /// parse (e.g. a run too long for `u64`) counts as zero.
    pub fn from_parts(hours: &str, minutes: &str, seconds: &'a str) -> Self {
        Self {
            hours: hours.parse().unwrap_or(0),
            minutes: minutes.parse().unwrap_or(0),
            seconds,
        }
    }

    pub fn total_minutes(&self) -> u64 {
        self.hours.saturating_mul(60).saturating_add(self.minutes)
    }

    /// `MM:SS.000`, minutes zero-padded to at least two digits.
    pub fn to_split_position(&self) -> String {
        format!("{:02}:{}.000", self.total_minutes(), self.seconds)
    }
}
