//! Formatting state stack.
//!
//! Every `{` pushes a [`Frame`] cloned from the enclosing one and every `}`
//! pops it, so formatting set inside a group ends with the group.

use super::error::{RtfError, RtfResult};
use super::list::ListStyle;
use super::types::{FontStyle, TextAlign};

/// What the tokens of the current group mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Destination {
    /// Document body
    #[default]
    Normal,
    /// Discarded content
    Skip,
    FontTable,
    ColorTable,
    /// `\pn` group
    LegacyList,
    /// `\pntxtb` text before a legacy list number
    LegacyListPrefix,
    /// `\pntxta` text after a legacy list number
    LegacyListSuffix,
    ListTable,
    /// `\leveltext` of a list table level
    ListTableLevelText,
    ListOverrideTable,
    /// Generated list marker text
    ListText,
    /// `\field` outside its instruction and result
    Field,
    /// `\fldinst`
    FieldInstruction,
}

/// Paragraph-level fields of a frame.
///
/// Lengths are in twips and colors are color table indices; both are
/// resolved when a paragraph is emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphState {
    pub align: TextAlign,
    pub border_width: i32,
    pub padding: i32,
    pub first_indent: i32,
    pub left_indent: i32,
    pub right_indent: i32,
    pub space_above: i32,
    pub space_below: i32,
    pub background: Option<i32>,
    pub border_color: Option<i32>,
    pub metadata: Option<String>,
    pub list_style: ListStyle,
    /// 0-based list level
    pub list_level: u32,
    /// `\lsN` override id; 0 for none
    pub list_index: i32,
}

impl ParagraphState {
    pub const fn new() -> Self {
        Self {
            align: TextAlign::Left,
            border_width: 0,
            padding: 0,
            first_indent: 0,
            left_indent: 0,
            right_indent: 0,
            space_above: 0,
            space_below: 0,
            background: None,
            border_color: None,
            metadata: None,
            list_style: ListStyle::None,
            list_level: 0,
            list_index: 0,
        }
    }
}

impl Default for ParagraphState {
    fn default() -> Self {
        Self::new()
    }
}

/// Encoding of 8-bit text in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontEncoding {
    /// No font selected; the `\deff` font decides
    #[default]
    Inherit,
    /// Font selected with the default charset
    Document,
    CodePage(u16),
}

/// One level of the formatting stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub destination: Destination,
    pub encoding: FontEncoding,
    /// Fallback units to skip after `\uN`
    pub unicode_skip: u32,
    pub font_name: Option<String>,
    pub font_style: FontStyle,
    /// Font size in half-points; 0 for the default
    pub font_size: i32,
    /// Color table index of the text color
    pub foreground: Option<i32>,
    /// Color table index of the highlight color
    pub background: Option<i32>,
    pub link: Option<String>,
    pub metadata: Option<String>,
    pub paragraph: ParagraphState,
}

impl Frame {
    pub const fn new() -> Self {
        Self {
            destination: Destination::Normal,
            encoding: FontEncoding::Inherit,
            unicode_skip: 1,
            font_name: None,
            font_style: FontStyle::empty(),
            font_size: 0,
            foreground: None,
            background: None,
            link: None,
            metadata: None,
            paragraph: ParagraphState::new(),
        }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

static DEFAULT_FRAME: Frame = Frame::new();

/// Stack of frames, one per open group.
///
/// Outside any group the engine defaults apply; writes there are dropped.
#[derive(Debug, Clone)]
pub struct FormattingStack {
    frames: Vec<Frame>,
    max_depth: usize,
}

impl FormattingStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Open a group, inheriting every field from the current frame.
    pub fn push(&mut self) -> RtfResult<()> {
        if self.frames.len() >= self.max_depth {
            return Err(RtfError::Overflow {
                depth: self.max_depth,
            });
        }
        let frame = self.current().clone();
        self.frames.try_reserve(1)?;
        self.frames.push(frame);
        Ok(())
    }

    /// Close a group. `offset` locates the `}` for error reporting.
    pub fn pop(&mut self, offset: usize) -> RtfResult<Frame> {
        self.frames.pop().ok_or(RtfError::Underflow { offset })
    }

    #[inline]
    pub fn current(&self) -> &Frame {
        self.frames.last().unwrap_or(&DEFAULT_FRAME)
    }

    /// Modify the current frame.
    #[inline]
    pub fn update(&mut self, f: impl FnOnce(&mut Frame)) {
        if let Some(frame) = self.frames.last_mut() {
            f(frame);
        }
    }

    #[inline]
    pub fn set_destination(&mut self, destination: Destination) {
        self.update(|frame| frame.destination = destination);
    }

    #[inline]
    pub fn destination(&self) -> Destination {
        self.current().destination
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_clones_parent() {
        let mut stack = FormattingStack::new(8);
        stack.push().unwrap();
        stack.update(|frame| {
            frame.font_style |= FontStyle::BOLD;
            frame.paragraph.left_indent = 720;
        });
        stack.push().unwrap();
        stack.update(|frame| frame.font_size = 24);

        assert_eq!(stack.depth(), 2);
        assert!(stack.current().font_style.contains(FontStyle::BOLD));
        assert_eq!(stack.current().paragraph.left_indent, 720);

        let popped = stack.pop(0).unwrap();
        assert_eq!(popped.font_size, 24);
        assert_eq!(stack.current().font_size, 0);
        assert!(stack.current().font_style.contains(FontStyle::BOLD));
    }

    #[test]
    fn test_pop_empty_is_underflow() {
        let mut stack = FormattingStack::new(8);
        assert_eq!(stack.pop(17), Err(RtfError::Underflow { offset: 17 }));
    }

    #[test]
    fn test_push_past_limit_is_overflow() {
        let mut stack = FormattingStack::new(2);
        stack.push().unwrap();
        stack.push().unwrap();
        assert_eq!(stack.push(), Err(RtfError::Overflow { depth: 2 }));
    }

    #[test]
    fn test_empty_stack_reads_defaults() {
        let mut stack = FormattingStack::new(8);
        stack.update(|frame| frame.font_size = 48);
        stack.set_destination(Destination::Skip);

        assert_eq!(stack.current(), &Frame::default());
        assert_eq!(stack.destination(), Destination::Normal);
        assert_eq!(stack.current().unicode_skip, 1);
    }
}
