//! RTF (Rich Text Format) to styled text conversion.
//!
//! The reader makes a single pass over the input and reports paragraphs and
//! runs of uniformly formatted text as it finds them. Formatting that RTF
//! keeps in tables (fonts, colors, lists) is resolved before a record is
//! reported, so consumers see fonts by name, colors as RGB and lengths in
//! pixels.
//!
//! # Architecture
//!
//! - **Lexer**: Splits the byte stream into groups, control words and literal bytes
//! - **Reader**: Tracks nested formatting state and routes tokens by destination
//! - **Text**: Decodes legacy code page bytes and buffers the current run
//! - **Document**: Collects the reported records into an owned structure
//!
//! # Example
//!
//! ```rust
//! use rtf_styled::rtf::{FontStyle, StyledDocument};
//!
//! let rtf_text = r"{\rtf1\ansi{\fonttbl\f0\fswiss Helvetica;}\f0\pard Hello {\b World}!\par}";
//! let doc = StyledDocument::parse(rtf_text)?;
//! assert_eq!(doc.text(), "Hello World!");
//!
//! let bold: Vec<_> = doc
//!     .runs()
//!     .filter(|run| run.attributes.font_style.contains(FontStyle::BOLD))
//!     .map(|run| run.text.as_str())
//!     .collect();
//! assert_eq!(bold, ["World"]);
//! # Ok::<(), rtf_styled::rtf::RtfError>(())
//! ```

mod config;
mod document;
mod error;
mod field;
mod keyword;
mod lexer;
mod list;
mod reader;
mod state;
mod text;
mod types;

// Re-exports
pub use config::{DEFAULT_MAX_GROUP_DEPTH, ReaderOptions};
pub use document::{StyledDocument, StyledParagraph, StyledRun};
pub use error::{RtfError, RtfResult};
pub use field::{FieldInstruction, FieldType};
pub use keyword::Keyword;
pub use lexer::{Lexer, Token};
pub use list::{LegacyList, ListOverrideTable, ListStyle, ListTable};
pub use reader::{RtfReader, StyledEvent, StyledTextSink, read_rtf};
pub use types::{
    Color, ColorTable, FontEntry, FontStyle, FontTable, Paragraph, SUBSCRIPT_SHIFT,
    SUPERSCRIPT_SHIFT, TextAlign, TextAttributes, TextRun,
};
