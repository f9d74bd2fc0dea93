//! Styled text type definitions.
//!
//! Symbol tables built while reading (fonts, colors) and the records handed
//! to a [`StyledTextSink`](super::StyledTextSink): [`Paragraph`] and
//! [`TextRun`].

use super::list::ListStyle;
use crate::common::encoding::charset_to_codepage;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Charset value meaning "use the document default".
pub const DEFAULT_CHARSET: i32 = 1;

/// RTF color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    /// Red component (0-255)
    pub red: u8,
    /// Green component (0-255)
    pub green: u8,
    /// Blue component (0-255)
    pub blue: u8,
}

impl Color {
    /// Create a new color.
    #[inline]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Black color.
    #[inline]
    pub const fn black() -> Self {
        Self::new(0, 0, 0)
    }
}

/// Color table containing document colors.
///
/// An entry of `None` is the "auto" color: the consumer's default.
#[derive(Debug, Clone, Default)]
pub struct ColorTable {
    colors: Vec<Option<Color>>,
}

impl ColorTable {
    /// Create a new color table.
    #[inline]
    pub fn new() -> Self {
        Self { colors: Vec::new() }
    }

    /// Append a color; its index is its position.
    #[inline]
    pub fn define(&mut self, color: Option<Color>) -> usize {
        self.colors.push(color);
        self.colors.len() - 1
    }

    /// Resolve a `\cfN`-style reference. Out of range indices resolve to
    /// the default color.
    #[inline]
    pub fn get(&self, index: i32) -> Option<Color> {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.colors.get(index))
            .copied()
            .flatten()
    }

    /// Get all entries in the table.
    #[inline]
    pub fn colors(&self) -> &[Option<Color>] {
        &self.colors
    }
}

/// Font definition from `\fonttbl`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontEntry {
    /// Font number used by `\fN`
    pub index: i32,
    /// Font name, decoded and trimmed
    pub name: String,
    /// `\fcharset` value
    pub charset: i32,
    /// Explicit `\cpg` code page
    pub codepage: Option<u16>,
}

impl FontEntry {
    /// Code page for text in this font, `None` for the document default.
    #[inline]
    pub fn codepage(&self) -> Option<u16> {
        self.codepage.or_else(|| charset_to_codepage(self.charset))
    }
}

/// Font table containing document fonts.
///
/// Definitions are never replaced: lookups return the first entry with a
/// matching index.
#[derive(Debug, Clone, Default)]
pub struct FontTable {
    fonts: Vec<FontEntry>,
}

impl FontTable {
    /// Create a new font table.
    #[inline]
    pub fn new() -> Self {
        Self { fonts: Vec::new() }
    }

    /// Append a font definition.
    pub fn define(&mut self, index: i32, name: String, charset: i32, codepage: Option<u16>) {
        self.fonts.push(FontEntry {
            index,
            name,
            charset,
            codepage,
        });
    }

    /// Get a font by number.
    #[inline]
    pub fn get(&self, index: i32) -> Option<&FontEntry> {
        self.fonts.iter().find(|font| font.index == index)
    }

    #[inline]
    pub fn name(&self, index: i32) -> Option<&str> {
        self.get(index).map(|font| font.name.as_str())
    }

    #[inline]
    pub fn charset(&self, index: i32) -> Option<i32> {
        self.get(index).map(|font| font.charset)
    }

    /// Get all fonts in the table.
    #[inline]
    pub fn fonts(&self) -> &[FontEntry] {
        &self.fonts
    }
}

/// Paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

bitflags! {
    /// Character style bits carried by a text run.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct FontStyle: u8 {
        const ITALIC = 0x01;
        const BOLD = 0x02;
        const UNDERLINE = 0x04;
        const SUPERSCRIPT = 0x08;
        const SUBSCRIPT = 0x10;
        const STRIKETHROUGH = 0x20;
        /// Text is the visible part of a hyperlink
        const LINK = 0x40;
    }
}

/// Vertical offset of superscript text, in pixels.
pub const SUPERSCRIPT_SHIFT: i32 = -4;

/// Vertical offset of subscript text, in pixels.
pub const SUBSCRIPT_SHIFT: i32 = 4;

/// Character attributes shared by every code unit of a run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextAttributes {
    /// Text color; `None` for the default
    pub foreground: Option<Color>,
    /// Highlight color; `None` for none
    pub background: Option<Color>,
    pub font_name: Option<String>,
    /// Font size in pixels; 0 for the default size
    pub font_size: i32,
    pub font_style: FontStyle,
    /// Baseline shift in pixels, negative is up
    pub text_shift: i32,
    /// Hyperlink or anchor target
    pub link: Option<String>,
    /// Run-level metadata from an `LCMETADATA` field
    pub metadata: Option<String>,
}

/// A span of text sharing one set of attributes.
///
/// Both the attributes and the text borrow from the reader and are only
/// valid for the duration of the sink call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRun<'a> {
    pub attributes: &'a TextAttributes,
    /// UTF-16 code units
    pub text: &'a [u16],
}

impl TextRun<'_> {
    /// Decode the run's text, replacing unpaired surrogates.
    pub fn text(&self) -> String {
        String::from_utf16_lossy(self.text)
    }
}

/// Paragraph style, emitted before a paragraph's first run.
///
/// Lengths are in pixels.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Paragraph {
    pub align: TextAlign,
    pub border_width: i32,
    pub padding: i32,
    pub first_indent: i32,
    pub left_indent: i32,
    pub right_indent: i32,
    pub space_above: i32,
    pub space_below: i32,
    pub background_color: Option<Color>,
    pub border_color: Option<Color>,
    /// Paragraph metadata from an `LCLINEMETADATA` field
    pub metadata: Option<String>,
    pub list_style: ListStyle,
    /// Nesting depth, 1-based; 0 when not in a list
    pub list_depth: u32,
}
