/// Line shapes recognised in the source transcription.
///
/// Each matcher looks at a single raw line and knows nothing about the
/// surrounding figure. Priority between them, and the guards that depend
/// on parser state, live in the parser.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::schema::label::LineLabel;

/// `<ordinal>[.]<whitespace>[ideographic spaces]<rest>`
static HEADER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)\.?\s+\x{3000}*(.+)$").unwrap());

/// `<marker>，<text>` where marker is one of the fourteen line labels.
static LINE_RECORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(初[九六]|[九六][二三四五]|上[九六]|用[九六])，(.+)$").unwrap());

static LINE_LABEL_PREFIX_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(初[九六]|[九六][二三四五]|上[九六]|用[九六])").unwrap());

/// Opening bracket of a quoted commentary title. A header never contains it.
const QUOTE_OPEN: char = '《';

/// The two commentary traditions that appear as `《…》曰：` lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// 《彖》曰： the judgement commentary on the whole figure.
    Judgement,
    /// 《象》曰： the image commentary, on the figure or on one line.
    Image,
}

impl Marker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Judgement => "《彖》曰：",
            Self::Image => "《象》曰：",
        }
    }
}

/// A recognised header, before the ordinal has been range-checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch<'a> {
    /// `None` when the digits overflow a `u8`.
    pub ordinal: Option<u8>,
    /// Everything after the ordinal and separators, trimmed.
    pub rest: &'a str,
}

/// Match a figure header line.
pub fn match_header(line: &str) -> Option<HeaderMatch<'_>> {
    if line.contains(QUOTE_OPEN) {
        return None;
    }
    let caps = HEADER_REGEX.captures(line)?;
    let rest = caps.get(2)?.as_str().trim();
    if rest.is_empty() || LINE_LABEL_PREFIX_REGEX.is_match(rest) {
        return None;
    }
    let ordinal = caps.get(1)?.as_str().parse::<u8>().ok();
    Some(HeaderMatch { ordinal, rest })
}

/// Match a `<label>，<text>` line record.
pub fn match_line_record(line: &str) -> Option<(LineLabel, &str)> {
    let caps = LINE_RECORD_REGEX.captures(line)?;
    let label = LineLabel::parse(caps.get(1)?.as_str())?;
    Some((label, caps.get(2)?.as_str()))
}

/// Text following the first occurrence of `marker`, if present.
pub fn marker_text(line: &str, marker: Marker) -> Option<&str> {
    line.split_once(marker.as_str()).map(|(_, text)| text)
}

/// Split a header remainder into the maxim, given the canonical name.
///
/// The name prefix and any `，`, `、` or space separators after it are
/// dropped. If the remainder does not start with the name, the maxim is
/// whatever follows the first `，`, or the whole remainder.
pub fn split_maxim<'a>(rest: &'a str, name: &str) -> &'a str {
    if let Some(after) = rest.strip_prefix(name) {
        return after.trim_start_matches(&['，', '、', ' '][..]);
    }
    match rest.split_once('，') {
        Some((_, after)) => after,
        None => rest,
    }
}
