/// Table emitter: renders figures as a keyed data table.
///
/// All formats share one serde shape: a map from ordinal to entry, in the
/// order the figures were parsed. String escaping is left to the format's
/// serializer, so quotes and backslashes in the source text survive.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::Path;
use thiserror::Error;

use crate::schema::figure::{Figure, Line};

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("RON serialization error: {0}")]
    Ron(#[from] ron::Error),
    #[error("RON deserialization error: {0}")]
    RonRead(#[from] ron::error::SpannedError),
    #[error("invalid JavaScript binding name '{0}'")]
    InvalidBinding(String),
    #[error("figure {0} appears more than once")]
    DuplicateOrdinal(u8),
}

/// Binding used for the JavaScript module when none is configured.
pub const DEFAULT_JS_BINDING: &str = "yijingTexts";

static JS_IDENT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

/// ECMAScript reserved words, including the strict-mode ones, none of
/// which may name a `const`.
const JS_RESERVED_WORDS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null",
    "package", "private", "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

fn is_js_binding(name: &str) -> bool {
    JS_IDENT_REGEX.is_match(name) && !JS_RESERVED_WORDS.contains(&name)
}

/// Output format of the emitted table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TableFormat {
    /// Pretty-printed JSON object keyed by ordinal.
    #[default]
    Json,
    /// `const <binding> = <json>;` for direct inclusion in a web page.
    JsModule,
    /// Pretty-printed RON map keyed by ordinal.
    Ron,
}

impl TableFormat {
    /// Parse a user-facing format name (`json`, `js`, `javascript`, `ron`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "js" | "javascript" => Some(Self::JsModule),
            "ron" => Some(Self::Ron),
            _ => None,
        }
    }

    /// Infer a format from an output file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase());
        match ext.as_deref() {
            Some("js") | Some("mjs") => Self::JsModule,
            Some("ron") => Self::Ron,
            _ => Self::Json,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::JsModule => "js",
            Self::Ron => "ron",
        }
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Renders figures in a chosen [`TableFormat`].
#[derive(Debug, Clone)]
pub struct TableEmitter {
    format: TableFormat,
    js_binding: String,
}

impl TableEmitter {
    pub fn new(format: TableFormat) -> Self {
        Self {
            format,
            js_binding: DEFAULT_JS_BINDING.to_string(),
        }
    }

    /// Set the variable name used by [`TableFormat::JsModule`].
    pub fn with_js_binding(mut self, binding: impl Into<String>) -> Self {
        self.js_binding = binding.into();
        self
    }

    /// Render the whole table. Output always ends with a newline.
    ///
    /// Ordinals become object keys, so each may appear only once.
    pub fn render(&self, figures: &[Figure]) -> Result<String, EmitError> {
        let mut seen = [false; 256];
        for figure in figures {
            let slot = &mut seen[usize::from(figure.ordinal)];
            if *slot {
                return Err(EmitError::DuplicateOrdinal(figure.ordinal));
            }
            *slot = true;
        }

        let table = TableRef(figures);
        let mut out = match self.format {
            TableFormat::Json => serde_json::to_string_pretty(&table)?,
            TableFormat::JsModule => {
                if !is_js_binding(&self.js_binding) {
                    return Err(EmitError::InvalidBinding(self.js_binding.clone()));
                }
                format!(
                    "// Generated by yijing_convert: {} figures with maxims, lines and commentaries.\nconst {} = {};",
                    figures.len(),
                    self.js_binding,
                    serde_json::to_string_pretty(&table)?
                )
            }
            TableFormat::Ron => {
                ron::ser::to_string_pretty(&table, ron::ser::PrettyConfig::default())?
            }
        };
        out.push('\n');
        Ok(out)
    }
}

/// Load a table previously emitted as JSON, preserving entry order.
pub fn read_json_table(input: &str) -> Result<Vec<Figure>, EmitError> {
    let table: OwnedTable = serde_json::from_str(input)?;
    Ok(table.0)
}

/// Load a table previously emitted as RON, preserving entry order.
pub fn read_ron_table(input: &str) -> Result<Vec<Figure>, EmitError> {
    let table: OwnedTable = ron::from_str(input)?;
    Ok(table.0)
}

// The ordinal is the map key, so entries carry every field but that one.

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EntryRef<'a> {
    name: &'a str,
    maxim: &'a str,
    commentary: &'a str,
    image_commentary: &'a str,
    lines: &'a [Line],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OwnedEntry {
    name: String,
    maxim: String,
    #[serde(default)]
    commentary: String,
    #[serde(default)]
    image_commentary: String,
    #[serde(default)]
    lines: Vec<Line>,
}

struct TableRef<'a>(&'a [Figure]);

impl Serialize for TableRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for figure in self.0 {
            let entry = EntryRef {
                name: &figure.name,
                maxim: &figure.maxim,
                commentary: &figure.commentary,
                image_commentary: &figure.image_commentary,
                lines: &figure.lines,
            };
            map.serialize_entry(&figure.ordinal, &entry)?;
        }
        map.end()
    }
}

struct OwnedTable(Vec<Figure>);

impl<'de> Deserialize<'de> for OwnedTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TableVisitor)
    }
}

struct TableVisitor;

impl<'de> Visitor<'de> for TableVisitor {
    type Value = OwnedTable;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map from figure ordinal to figure entry")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<OwnedTable, A::Error> {
        let mut figures = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((ordinal, entry)) = access.next_entry::<u8, OwnedEntry>()? {
            figures.push(Figure {
                ordinal,
                name: entry.name,
                maxim: entry.maxim,
                commentary: entry.commentary,
                image_commentary: entry.image_commentary,
                lines: entry.lines,
            });
        }
        Ok(OwnedTable(figures))
    }
}
