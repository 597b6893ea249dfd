use serde::{Deserialize, Serialize};

use super::label::LineLabel;
use super::names::canonical_name;

/// One positional entry within a figure: its marker, its text, and the
/// image commentary attached to that single line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub label: LineLabel,
    pub text: String,
    #[serde(default)]
    pub line_commentary: String,
}

impl Line {
    pub fn new(label: LineLabel, text: impl Into<String>) -> Self {
        Self {
            label,
            text: text.into(),
            line_commentary: String::new(),
        }
    }
}

/// One of the 64 figures, with its maxim, figure-level commentaries and
/// line entries in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Figure {
    pub ordinal: u8,
    pub name: String,
    pub maxim: String,
    #[serde(default)]
    pub commentary: String,
    #[serde(default)]
    pub image_commentary: String,
    #[serde(default)]
    pub lines: Vec<Line>,
}

impl Figure {
    /// Open a figure with its canonical name and empty commentaries.
    /// Returns `None` when `ordinal` is outside `1..=64`.
    pub fn open(ordinal: u8, maxim: impl Into<String>) -> Option<Self> {
        let name = canonical_name(ordinal)?;
        Some(Self {
            ordinal,
            name: name.to_string(),
            maxim: maxim.into(),
            commentary: String::new(),
            image_commentary: String::new(),
            lines: Vec::new(),
        })
    }
}
