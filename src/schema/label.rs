use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// The base glyph of a line: 九 for a yang line, 六 for a yin line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Nine,
    Six,
}

impl Polarity {
    pub fn glyph(&self) -> char {
        match self {
            Self::Nine => '九',
            Self::Six => '六',
        }
    }

    pub fn from_glyph(c: char) -> Option<Self> {
        match c {
            '九' => Some(Self::Nine),
            '六' => Some(Self::Six),
            _ => None,
        }
    }
}

/// Where a line sits within its figure, counted from the bottom.
///
/// `Universal` is the extra "use all nines / use all sixes" entry that
/// only the first two figures carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Top,
    Universal,
}

impl Position {
    pub fn glyph(&self) -> char {
        match self {
            Self::First => '初',
            Self::Second => '二',
            Self::Third => '三',
            Self::Fourth => '四',
            Self::Fifth => '五',
            Self::Top => '上',
            Self::Universal => '用',
        }
    }

    /// Positions written before the base glyph (初九, 上六, 用九).
    fn is_prefix(&self) -> bool {
        matches!(self, Self::First | Self::Top | Self::Universal)
    }

    fn from_prefix_glyph(c: char) -> Option<Self> {
        match c {
            '初' => Some(Self::First),
            '上' => Some(Self::Top),
            '用' => Some(Self::Universal),
            _ => None,
        }
    }

    fn from_suffix_glyph(c: char) -> Option<Self> {
        match c {
            '二' => Some(Self::Second),
            '三' => Some(Self::Third),
            '四' => Some(Self::Fourth),
            '五' => Some(Self::Fifth),
            _ => None,
        }
    }
}

/// Positional marker of a line record, e.g. 初九, 六二, 上六, 用九.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineLabel {
    pub polarity: Polarity,
    pub position: Position,
}

impl LineLabel {
    pub fn new(polarity: Polarity, position: Position) -> Self {
        Self { polarity, position }
    }

    /// Parse a two-glyph marker. Returns `None` for anything that is not
    /// one of the fourteen valid markers.
    pub fn parse(marker: &str) -> Option<Self> {
        let mut chars = marker.chars();
        let (a, b) = (chars.next()?, chars.next()?);
        if chars.next().is_some() {
            return None;
        }

        if let Some(position) = Position::from_prefix_glyph(a) {
            return Some(Self::new(Polarity::from_glyph(b)?, position));
        }
        let polarity = Polarity::from_glyph(a)?;
        let position = Position::from_suffix_glyph(b)?;
        Some(Self::new(polarity, position))
    }
}

impl fmt::Display for LineLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (p, b) = (self.position.glyph(), self.polarity.glyph());
        if self.position.is_prefix() {
            write!(f, "{}{}", p, b)
        } else {
            write!(f, "{}{}", b, p)
        }
    }
}

impl Serialize for LineLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LineLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        LineLabel::parse(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid line label '{}'", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_prefix_and_suffix_positions() {
        assert_eq!(LineLabel::new(Polarity::Nine, Position::First).to_string(), "初九");
        assert_eq!(LineLabel::new(Polarity::Six, Position::Second).to_string(), "六二");
        assert_eq!(LineLabel::new(Polarity::Nine, Position::Fifth).to_string(), "九五");
        assert_eq!(LineLabel::new(Polarity::Six, Position::Top).to_string(), "上六");
        assert_eq!(LineLabel::new(Polarity::Nine, Position::Universal).to_string(), "用九");
    }

    #[test]
    fn parses_every_valid_marker() {
        let markers = [
            "初九", "初六", "九二", "六二", "九三", "六三", "九四", "六四", "九五", "六五",
            "上九", "上六", "用九", "用六",
        ];
        for marker in &markers {
            let label = LineLabel::parse(marker).unwrap();
            assert_eq!(label.to_string(), *marker);
        }
    }

    #[test]
    fn rejects_invalid_markers() {
        assert!(LineLabel::parse("").is_none());
        assert!(LineLabel::parse("初").is_none());
        assert!(LineLabel::parse("初二").is_none());
        assert!(LineLabel::parse("九初").is_none());
        assert!(LineLabel::parse("上九，").is_none());
        assert!(LineLabel::parse("七二").is_none());
    }

    #[test]
    fn serializes_as_marker_string() {
        let label = LineLabel::new(Polarity::Six, Position::Fourth);
        assert_eq!(serde_json::to_string(&label).unwrap(), "\"六四\"");
        let back: LineLabel = serde_json::from_str("\"六四\"").unwrap();
        assert_eq!(back, label);
        assert!(serde_json::from_str::<LineLabel>("\"X\"").is_err());
    }
}
