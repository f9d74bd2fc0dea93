//! rtf-styled - Convert RTF documents to styled text
//!
//! This library reads Rich Text Format documents in a single pass and
//! reports their content as paragraphs and runs of uniformly formatted
//! text, ready to be loaded into a rich text editor or measured for layout.
//!
//! # Features
//!
//! - **Streaming output**: Paragraphs and runs go to a sink as they are found
//! - **Character formatting**: Fonts, sizes, colors, bold, italic, underline,
//!   strikethrough, superscript and subscript
//! - **Paragraph formatting**: Alignment, indents, spacing, borders and shading
//! - **Lists**: Legacy `\pn` lists as well as list and override tables
//! - **Fields**: Hyperlinks, anchors and metadata
//! - **Encodings**: Windows, Mac and OEM code pages, CJK double-byte text and
//!   Unicode escapes
//!
//! # Example - Streaming records
//!
//! ```
//! use rtf_styled::rtf::{RtfReader, StyledEvent};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut reader = RtfReader::new(|event: StyledEvent<'_>| match event {
//!     StyledEvent::Paragraph(paragraph) => println!("paragraph: {:?}", paragraph.align),
//!     StyledEvent::Run(run) => println!("run: {:?}", run.text()),
//! });
//! reader.process(br"{\rtf1\ansi\qc Hello\par}")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Owned document
//!
//! ```
//! use rtf_styled::rtf::StyledDocument;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let doc = StyledDocument::parse(r"{\rtf1\ansi One\par Two\par}")?;
//! for paragraph in doc.paragraphs() {
//!     println!("Paragraph: {}", paragraph.text());
//! }
//! # Ok(())
//! # }
//! ```

/// Code page decoding and unit conversion
pub mod common;

/// RTF reader
///
/// This module provides the streaming [`rtf::RtfReader`] and the owned
/// [`rtf::StyledDocument`] built on top of it.
pub mod rtf;

// Re-export commonly used types for convenience
pub use rtf::{ReaderOptions, RtfError, RtfReader, RtfResult, StyledDocument};
