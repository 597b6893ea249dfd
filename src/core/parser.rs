/// Line-oriented record parser: folds raw lines into figures.
///
/// Every line is tried against the recognised shapes in priority order:
///
/// 1. figure header (`1　乾，元亨利貞。`)
/// 2. judgement commentary `《彖》曰：`, if the open figure has none yet
/// 3. line record (`初九，潜龙勿用。`)
/// 4. image commentary `《象》曰：`, attached to the current line if one
///    is open, otherwise to the figure
///
/// Anything else is skipped. The first occurrence of each commentary wins;
/// later ones for the same target are dropped. Ordinals are unique: a
/// header repeating an earlier ordinal closes the open figure and is
/// skipped, so the records under it have no figure to attach to.

use log::{debug, trace};

use crate::core::classify::{match_header, match_line_record, marker_text, split_maxim, Marker};
use crate::schema::figure::{Figure, Line};

/// Counters collected while parsing, for reporting and diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Raw lines read, blank ones included.
    pub lines_read: usize,
    pub figures: usize,
    /// Line records attached to a figure.
    pub line_records: usize,
    /// Header-shaped lines whose ordinal is outside `1..=64`.
    pub rejected_headers: usize,
    /// Headers repeating an ordinal already seen.
    pub duplicate_headers: usize,
    /// Commentary lines with no target or whose target was already filled.
    pub dropped_commentary: usize,
    /// Line records seen before any figure header.
    pub orphan_line_records: usize,
    /// Non-blank lines matching no recognised shape.
    pub skipped_lines: usize,
}

/// Figures in source order, plus the counters gathered on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedText {
    pub figures: Vec<Figure>,
    pub stats: ParseStats,
}

/// Parse a whole transcription.
pub fn parse_text(input: &str) -> ParsedText {
    input
        .lines()
        .fold(FoldState::default(), FoldState::step)
        .finish()
}

/// Parse a whole transcription, discarding the counters.
pub fn parse_figures(input: &str) -> Vec<Figure> {
    parse_text(input).figures
}

/// Accumulator threaded through the fold.
#[derive(Debug, Default)]
struct FoldState {
    completed: Vec<Figure>,
    open: Option<Figure>,
    /// Index into `open.lines` of the line that image commentary attaches to.
    current_line: Option<usize>,
    stats: ParseStats,
}

impl FoldState {
    fn step(mut self, raw: &str) -> Self {
        self.stats.lines_read += 1;
        let line = raw.strip_suffix('\r').unwrap_or(raw);

        if let Some(header) = match_header(line) {
            self.open_figure(header.ordinal, header.rest, line);
            return self;
        }

        if let Some(text) = marker_text(line, Marker::Judgement) {
            if let Some(figure) = self.open.as_mut().filter(|f| f.commentary.is_empty()) {
                figure.commentary = text.to_string();
                return self;
            }
        }

        if let Some((label, text)) = match_line_record(line) {
            match self.open.as_mut() {
                Some(figure) => {
                    figure.lines.push(Line::new(label, text));
                    self.current_line = Some(figure.lines.len() - 1);
                    self.stats.line_records += 1;
                }
                None => {
                    trace!("line record before any header: {}", line);
                    self.stats.orphan_line_records += 1;
                }
            }
            return self;
        }

        if let Some(text) = marker_text(line, Marker::Image) {
            if self.attach_image_commentary(text) {
                return self;
            }
        }

        if line.contains(Marker::Judgement.as_str()) || line.contains(Marker::Image.as_str()) {
            debug!("dropping commentary with no free target: {}", line);
            self.stats.dropped_commentary += 1;
        } else if !line.trim().is_empty() {
            trace!("skipping line: {}", line);
            self.stats.skipped_lines += 1;
        }
        self
    }

    fn open_figure(&mut self, ordinal: Option<u8>, rest: &str, line: &str) {
        let Some(mut figure) = ordinal.and_then(|o| Figure::open(o, "")) else {
            debug!("header ordinal out of range: {}", line);
            self.stats.rejected_headers += 1;
            return;
        };

        self.close_figure();
        if self.completed.iter().any(|f| f.ordinal == figure.ordinal) {
            debug!("duplicate header for figure {}: {}", figure.ordinal, line);
            self.stats.duplicate_headers += 1;
            return;
        }
        figure.maxim = split_maxim(rest, &figure.name).to_string();
        self.open = Some(figure);
    }

    fn close_figure(&mut self) {
        self.current_line = None;
        if let Some(figure) = self.open.take() {
            debug!(
                "figure {} {} closed with {} lines",
                figure.ordinal,
                figure.name,
                figure.lines.len()
            );
            self.completed.push(figure);
        }
    }

    /// Returns `false` when there is nowhere free to put the text.
    fn attach_image_commentary(&mut self, text: &str) -> bool {
        let Some(figure) = self.open.as_mut() else {
            return false;
        };
        let slot = match self.current_line {
            Some(index) => match figure.lines.get_mut(index) {
                Some(line) => &mut line.line_commentary,
                None => return false,
            },
            None => &mut figure.image_commentary,
        };
        if !slot.is_empty() {
            return false;
        }
        *slot = text.to_string();
        true
    }

    fn finish(mut self) -> ParsedText {
        self.close_figure();
        self.stats.figures = self.completed.len();
        ParsedText {
            figures: self.completed,
            stats: self.stats,
        }
    }
}
