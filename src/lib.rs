//! yijing-table turns a plain-text Zhouyi transcription into a data table.
//!
//! A single pass classifies each line of the source (figure headers,
//! judgement and image commentaries, line records) and folds it into
//! [`schema::figure::Figure`] records, which are then emitted as JSON, a
//! JavaScript module, or RON, keyed by figure ordinal.

pub mod core;
pub mod schema;

pub use crate::core::converter::{ConvertError, ConvertSummary, Converter};
pub use crate::core::emitter::{read_json_table, read_ron_table, TableEmitter, TableFormat};
pub use crate::core::parser::{parse_figures, parse_text, ParseStats, ParsedText};
pub use crate::schema::figure::{Figure, Line};
pub use crate::schema::label::LineLabel;
