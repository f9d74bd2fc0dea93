//! Single-pass RTF reader.
//!
//! [`RtfReader::process`] walks the token stream once, routing each token by
//! the destination of the current group, and reports styled text to a
//! [`StyledTextSink`] as it goes: a [`Paragraph`] before the first run of
//! every paragraph, then one [`TextRun`] per span of identically formatted
//! text.

use super::config::ReaderOptions;
use super::error::RtfResult;
use super::field::{FieldInstruction, FieldType};
use super::keyword::Keyword;
use super::lexer::{Lexer, Token};
use super::list::{LegacyList, ListOverrideTable, ListStyle, ListTable, MAX_LIST_LEVELS};
use super::state::{Destination, FontEncoding, FormattingStack, Frame, ParagraphState};
use super::text::{TextAccumulator, TextEncoding};
use super::types::{
    Color, ColorTable, DEFAULT_CHARSET, FontStyle, FontTable, Paragraph, SUBSCRIPT_SHIFT,
    SUPERSCRIPT_SHIFT, TextAlign, TextAttributes, TextRun,
};
use crate::common::encoding::{CodePageDecoder, codepage_decoder, charset_to_codepage};
use crate::common::unit::{half_points_to_pixels, twips_to_pixels};
use smallvec::SmallVec;
use tracing::{debug, trace};

const TAB: u16 = 0x09;
const SPACE: u16 = 0x20;

/// Receiver of styled text.
///
/// Records are delivered in document order. A run's text and attributes
/// borrow from the reader; copy them to keep them past the call.
pub trait StyledTextSink {
    /// Called once per paragraph, before its first run.
    fn paragraph(&mut self, paragraph: &Paragraph);

    /// Called for each run of text.
    fn text_run(&mut self, run: &TextRun<'_>);
}

/// A single record, as seen by closure sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyledEvent<'a> {
    Paragraph(&'a Paragraph),
    Run(TextRun<'a>),
}

impl<F> StyledTextSink for F
where
    F: FnMut(StyledEvent<'_>),
{
    fn paragraph(&mut self, paragraph: &Paragraph) {
        self(StyledEvent::Paragraph(paragraph));
    }

    fn text_run(&mut self, run: &TextRun<'_>) {
        self(StyledEvent::Run(*run));
    }
}

/// RTF reader delivering styled text to a sink.
///
/// # Example
///
/// ```rust
/// use rtf_styled::rtf::{RtfReader, StyledEvent};
///
/// let mut runs = Vec::new();
/// let mut reader = RtfReader::new(|event: StyledEvent<'_>| {
///     if let StyledEvent::Run(run) = event {
///         runs.push(run.text());
///     }
/// });
/// reader.process(br"{\rtf1\b Bold\b0  plain}")?;
/// drop(reader);
/// assert_eq!(runs, ["Bold", " plain"]);
/// # Ok::<(), rtf_styled::rtf::RtfError>(())
/// ```
pub struct RtfReader<S> {
    options: ReaderOptions,
    sink: S,
}

impl<S: StyledTextSink> RtfReader<S> {
    /// Create a reader with default options.
    pub fn new(sink: S) -> Self {
        Self::with_options(ReaderOptions::default(), sink)
    }

    pub fn with_options(options: ReaderOptions, sink: S) -> Self {
        Self { options, sink }
    }

    #[inline]
    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[inline]
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Read a complete RTF buffer.
    ///
    /// Each call starts from scratch: no tables or formatting carry over
    /// from earlier calls. On error, records already delivered stay
    /// delivered and no more follow.
    pub fn process(&mut self, input: &[u8]) -> RtfResult<()> {
        read_rtf(input, &self.options, &mut self.sink)
    }
}

/// Read a complete RTF buffer into `sink`.
pub fn read_rtf<S>(input: &[u8], options: &ReaderOptions, sink: &mut S) -> RtfResult<()>
where
    S: StyledTextSink + ?Sized,
{
    Session::new(input, options, sink).run()
}

/// Font definition being collected inside `\fonttbl`.
#[derive(Debug, Default)]
struct FontBuilder {
    started: bool,
    skip: bool,
    index: i32,
    charset: i32,
    codepage: Option<u16>,
    name: SmallVec<[u8; 32]>,
}

/// Color being collected inside `\colortbl`.
#[derive(Debug, Default)]
struct ColorBuilder {
    started: bool,
    red: u8,
    green: u8,
    blue: u8,
}

impl ColorBuilder {
    fn take(&mut self) -> Option<Color> {
        let color = self
            .started
            .then(|| Color::new(self.red, self.green, self.blue));
        *self = Self::default();
        color
    }
}

#[inline]
fn channel(value: i32) -> u8 {
    value.clamp(0, u8::MAX as i32) as u8
}

/// State of one `process` call.
struct Session<'a, S: ?Sized> {
    options: &'a ReaderOptions,
    sink: &'a mut S,
    lexer: Lexer<'a>,
    stack: FormattingStack,

    fonts: FontTable,
    colors: ColorTable,
    lists: ListTable,
    overrides: ListOverrideTable,

    text: TextAccumulator,
    /// Attributes of the text in `text`
    attributes: TextAttributes,
    attributes_changed: bool,
    needs_paragraph: bool,
    /// Paragraph fields of the last emitted paragraph
    last_paragraph: ParagraphState,

    default_codepage: u16,
    default_font: Option<i32>,
    /// Tokens still to drop after a `\uN`
    skip_count: u32,
    /// A cell ended; a tab separates it from the next text
    table_cell: bool,
    /// The current `\listtext` held nothing but spaces
    list_skip: bool,
    legacy_list: LegacyList,
    /// 1-based level of the list table level being defined
    level_count: usize,
    font: FontBuilder,
    color: ColorBuilder,
    field_instruction: Vec<u8>,

    paragraphs: usize,
    runs: usize,
}

impl<'a, S: StyledTextSink + ?Sized> Session<'a, S> {
    fn new(input: &'a [u8], options: &'a ReaderOptions, sink: &'a mut S) -> Self {
        Self {
            options,
            sink,
            lexer: Lexer::new(input),
            stack: FormattingStack::new(options.max_group_depth),
            fonts: FontTable::new(),
            colors: ColorTable::new(),
            lists: ListTable::new(),
            overrides: ListOverrideTable::new(),
            text: TextAccumulator::new(),
            attributes: TextAttributes::default(),
            attributes_changed: false,
            needs_paragraph: true,
            last_paragraph: ParagraphState::default(),
            default_codepage: options.default_codepage,
            default_font: None,
            skip_count: 0,
            table_cell: false,
            list_skip: false,
            legacy_list: LegacyList::default(),
            level_count: 0,
            font: FontBuilder::default(),
            color: ColorBuilder::default(),
            field_instruction: Vec::new(),
            paragraphs: 0,
            runs: 0,
        }
    }

    fn run(mut self) -> RtfResult<()> {
        loop {
            let token = self.lexer.next_token()?;
            if token == Token::End {
                break;
            }
            if self.skip_count > 0 && self.skip_fallback(token) {
                continue;
            }
            self.dispatch(token)?;
        }

        self.flush(true)?;

        if self.stack.depth() > 0 {
            debug!(open_groups = self.stack.depth(), "input ended inside open groups");
        }
        debug!(
            fonts = self.fonts.fonts().len(),
            colors = self.colors.colors().len(),
            lists = self.lists.count(),
            overrides = self.overrides.count(),
            paragraphs = self.paragraphs,
            runs = self.runs,
            "finished reading rtf"
        );
        Ok(())
    }

    /// Drop one fallback token after `\uN`. Returns false if the token
    /// ends the fallback and must be processed.
    fn skip_fallback(&mut self, token: Token) -> bool {
        match token {
            Token::BeginGroup | Token::EndGroup | Token::End => {
                self.skip_count = 0;
                false
            },
            Token::Control {
                keyword: Keyword::Binary,
                ..
            } => {
                self.lexer.skip_binary();
                self.skip_count -= 1;
                true
            },
            _ => {
                self.skip_count -= 1;
                true
            },
        }
    }

    fn dispatch(&mut self, token: Token) -> RtfResult<()> {
        match token {
            Token::BeginGroup => self.stack.push(),
            Token::EndGroup => self.end_group(),
            Token::End => Ok(()),
            Token::Control {
                keyword,
                parameter: None,
            } if keyword.expects_parameter() => {
                trace!(?keyword, "control word without parameter ignored");
                Ok(())
            },
            _ => match self.stack.destination() {
                Destination::Normal => self.parse_document(token),
                Destination::Skip => {
                    self.parse_skip(token);
                    Ok(())
                },
                Destination::FontTable => self.parse_font_table(token),
                Destination::ColorTable => {
                    self.parse_color_table(token);
                    Ok(())
                },
                Destination::LegacyList => {
                    self.parse_legacy_list(token);
                    Ok(())
                },
                Destination::LegacyListPrefix => self.parse_legacy_list_prefix(token),
                Destination::LegacyListSuffix => Ok(()),
                Destination::ListTable => {
                    self.parse_list_table(token);
                    Ok(())
                },
                Destination::ListTableLevelText => self.parse_list_level_text(token),
                Destination::ListOverrideTable => {
                    self.parse_list_override_table(token);
                    Ok(())
                },
                Destination::ListText => self.parse_list_text(token),
                Destination::Field => {
                    self.parse_field(token);
                    Ok(())
                },
                Destination::FieldInstruction => self.parse_field_instruction(token),
            },
        }
    }

    fn enter(&mut self, destination: Destination) {
        trace!(?destination, depth = self.stack.depth(), "entering destination");
        self.stack.set_destination(destination);
    }

    /// Close a group, carrying list and field results into the parent.
    fn end_group(&mut self) -> RtfResult<()> {
        let offset = self.lexer.offset();

        // Paragraph fields set inside the group would be lost with it
        if self.stack.depth() > 0 && self.stack.current().paragraph != self.last_paragraph {
            self.flush(true)?;
        }

        let popped = self.stack.pop(offset)?;
        match popped.destination {
            Destination::LegacyList => {
                let list = self.legacy_list;
                self.stack.update(|frame| {
                    frame.paragraph.list_style = list.style;
                    frame.paragraph.list_level = list.level;
                });
            },
            Destination::ListText if self.list_skip => {
                self.stack
                    .update(|frame| frame.paragraph.list_style = ListStyle::Skip);
            },
            Destination::FieldInstruction
                if self.stack.destination() != Destination::FieldInstruction =>
            {
                self.process_field()?;
            },
            _ => {},
        }

        self.attributes_changed = true;
        Ok(())
    }

    fn parse_skip(&mut self, token: Token) {
        let Token::Control { keyword, .. } = token else {
            return;
        };
        match keyword {
            Keyword::LegacyList if self.lists.is_empty() => self.begin_legacy_list(),
            Keyword::ListTable => self.enter(Destination::ListTable),
            Keyword::ListOverrideTable => self.enter(Destination::ListOverrideTable),
            Keyword::FieldInstruction => self.enter(Destination::FieldInstruction),
            _ => {},
        }
    }

    fn begin_legacy_list(&mut self) {
        self.legacy_list = LegacyList::default();
        self.enter(Destination::LegacyList);
    }

    fn parse_document(&mut self, token: Token) -> RtfResult<()> {
        let (keyword, parameter) = match token {
            Token::Character(byte) => return self.character(byte),
            Token::Control { keyword, parameter } => (keyword, parameter),
            _ => return Ok(()),
        };
        let value = parameter.unwrap_or(0);

        match keyword {
            // Destinations
            Keyword::SkipDestination | Keyword::IgnorableDestination => {
                self.enter(Destination::Skip)
            },
            Keyword::FontTable => {
                self.font = FontBuilder::default();
                self.enter(Destination::FontTable);
            },
            Keyword::ColorTable => {
                self.color = ColorBuilder::default();
                self.enter(Destination::ColorTable);
            },
            Keyword::ListTable => self.enter(Destination::ListTable),
            Keyword::ListOverrideTable => self.enter(Destination::ListOverrideTable),
            Keyword::ListText => {
                self.list_skip = true;
                self.enter(Destination::ListText);
            },
            Keyword::LegacyList if self.lists.is_empty() => self.begin_legacy_list(),
            Keyword::Field => self.enter(Destination::Field),
            Keyword::FieldInstruction => self.enter(Destination::FieldInstruction),

            // Document encoding
            Keyword::DefaultFont => self.default_font = Some(value),
            Keyword::Ansi => self.default_codepage = 1252,
            Keyword::Mac => self.default_codepage = 10000,
            Keyword::Pc => self.default_codepage = 437,
            Keyword::Pca => self.default_codepage = 850,
            Keyword::AnsiCodePage => {
                let codepage = if value < 0 { value + 65536 } else { value };
                if let Ok(codepage) = u16::try_from(codepage) {
                    self.default_codepage = codepage;
                }
            },
            Keyword::UnicodeSkip => {
                let skip = value.max(0) as u32;
                self.stack.update(|frame| frame.unicode_skip = skip);
            },

            // Text flow
            Keyword::Paragraph => self.paragraph_break()?,
            Keyword::Row => {
                self.table_cell = false;
                self.paragraph_break()?;
            },
            Keyword::Cell => {
                self.pending_cell()?;
                self.flush(false)?;
                self.table_cell = true;
            },
            Keyword::Tab => self.emit(TAB, TextEncoding::Utf16)?,
            Keyword::Unicode => self.unicode(value)?,
            Keyword::Bullet => self.emit(0x2022, TextEncoding::Utf16)?,
            Keyword::LeftQuote => self.emit(0x2018, TextEncoding::Utf16)?,
            Keyword::RightQuote => self.emit(0x2019, TextEncoding::Utf16)?,
            Keyword::LeftDoubleQuote => self.emit(0x201C, TextEncoding::Utf16)?,
            Keyword::RightDoubleQuote => self.emit(0x201D, TextEncoding::Utf16)?,
            Keyword::EmDash => self.emit(0x2014, TextEncoding::Utf16)?,
            Keyword::EnDash => self.emit(0x2013, TextEncoding::Utf16)?,
            Keyword::NonBreakingSpace => self.emit(0x00A0, TextEncoding::Utf16)?,
            Keyword::NonBreakingHyphen => self.emit(0x2011, TextEncoding::Utf16)?,

            // Character formatting
            Keyword::Font => self.select_font(value),
            Keyword::FontSize => self.set_character(|frame| frame.font_size = value),
            Keyword::Foreground => self.set_character(|frame| frame.foreground = Some(value)),
            Keyword::Background => self.set_character(|frame| frame.background = Some(value)),
            Keyword::Plain => self.set_character(|frame| {
                frame.font_name = None;
                frame.font_style = FontStyle::empty();
                frame.font_size = 0;
            }),
            Keyword::Bold => self.toggle_style(FontStyle::BOLD, parameter),
            Keyword::Italic => self.toggle_style(FontStyle::ITALIC, parameter),
            Keyword::Underline => self.toggle_style(FontStyle::UNDERLINE, parameter),
            Keyword::NoUnderline => self.toggle_style(FontStyle::UNDERLINE, Some(0)),
            Keyword::Strikethrough => self.toggle_style(FontStyle::STRIKETHROUGH, parameter),
            Keyword::Superscript => self.toggle_style(FontStyle::SUPERSCRIPT, parameter),
            Keyword::Subscript => self.toggle_style(FontStyle::SUBSCRIPT, parameter),
            Keyword::NoSuperSub => self.toggle_style(
                FontStyle::SUPERSCRIPT | FontStyle::SUBSCRIPT,
                Some(0),
            ),

            // Paragraph formatting
            Keyword::ResetParagraph => {
                self.stack
                    .update(|frame| frame.paragraph = ParagraphState::new());
            },
            Keyword::ListSelect => self.set_paragraph(|p| p.list_index = value),
            Keyword::ListSelectLevel => {
                if (0..MAX_LIST_LEVELS as i32).contains(&value) {
                    self.set_paragraph(|p| p.list_level = value as u32);
                }
            },
            Keyword::ParagraphBackground => self.set_paragraph(|p| p.background = Some(value)),
            Keyword::BorderWidth => self.set_paragraph(|p| p.border_width = value),
            Keyword::BorderColor => self.set_paragraph(|p| p.border_color = Some(value)),
            Keyword::BorderPadding => self.set_paragraph(|p| p.padding = value),
            Keyword::FirstIndent => self.set_paragraph(|p| p.first_indent = value),
            Keyword::LeftIndent => self.set_paragraph(|p| p.left_indent = value),
            Keyword::RightIndent => self.set_paragraph(|p| p.right_indent = value),
            Keyword::SpaceAbove => self.set_paragraph(|p| p.space_above = value),
            Keyword::SpaceBelow => self.set_paragraph(|p| p.space_below = value),
            Keyword::AlignLeft => self.set_paragraph(|p| p.align = TextAlign::Left),
            Keyword::AlignCenter => self.set_paragraph(|p| p.align = TextAlign::Center),
            Keyword::AlignRight => self.set_paragraph(|p| p.align = TextAlign::Right),
            Keyword::AlignJustify => self.set_paragraph(|p| p.align = TextAlign::Justify),

            Keyword::Unknown => trace!(?parameter, "unknown control word ignored"),
            _ => {},
        }
        Ok(())
    }

    #[inline]
    fn set_character(&mut self, f: impl FnOnce(&mut Frame)) {
        self.stack.update(f);
        self.attributes_changed = true;
    }

    #[inline]
    fn set_paragraph(&mut self, f: impl FnOnce(&mut ParagraphState)) {
        self.stack.update(|frame| f(&mut frame.paragraph));
    }

    /// `\b`, `\b1` turn a style on; `\b0` turns it off.
    fn toggle_style(&mut self, style: FontStyle, parameter: Option<i32>) {
        let on = parameter != Some(0);
        self.set_character(|frame| frame.font_style.set(style, on));
    }

    fn select_font(&mut self, index: i32) {
        let (name, encoding) = match self.fonts.get(index) {
            Some(font) => (
                Some(font.name.clone()),
                font.codepage()
                    .map_or(FontEncoding::Document, FontEncoding::CodePage),
            ),
            None => (None, FontEncoding::Inherit),
        };
        self.set_character(|frame| {
            frame.font_name = name;
            frame.encoding = encoding;
        });
    }

    /// Code page for 8-bit text in the current frame.
    fn active_codepage(&self) -> u16 {
        match self.stack.current().encoding {
            FontEncoding::CodePage(codepage) => codepage,
            FontEncoding::Document => self.default_codepage,
            FontEncoding::Inherit => self
                .default_font
                .and_then(|index| self.fonts.get(index))
                .and_then(|font| font.codepage())
                .unwrap_or(self.default_codepage),
        }
    }

    fn decoder(&self, codepage: u16) -> CodePageDecoder {
        codepage_decoder(codepage).unwrap_or(CodePageDecoder::Encoding(encoding_rs::WINDOWS_1252))
    }

    /// Decode a single byte, if it makes a character on its own.
    fn decode_byte(&self, byte: u8) -> RtfResult<Option<u16>> {
        let mut units = Vec::new();
        self.decoder(self.active_codepage())
            .decode_into(&[byte], &mut units)?;
        Ok(match units.as_slice() {
            [unit] => Some(*unit),
            _ => None,
        })
    }

    /// Emit the separator owed by a preceding `\cell`.
    fn pending_cell(&mut self) -> RtfResult<()> {
        if self.table_cell {
            self.table_cell = false;
            self.text.push(TAB, TextEncoding::Utf16)?;
        }
        Ok(())
    }

    /// Append text, closing the current run first if formatting changed.
    fn emit(&mut self, unit: u16, encoding: TextEncoding) -> RtfResult<()> {
        self.pending_cell()?;
        self.flush(false)?;
        self.text.push(unit, encoding)
    }

    fn character(&mut self, byte: u8) -> RtfResult<()> {
        let codepage = self.active_codepage();
        self.emit(byte as u16, TextEncoding::CodePage(codepage))
    }

    fn unicode(&mut self, value: i32) -> RtfResult<()> {
        let unit = (value & 0xFFFF) as u16;
        // LINE SEPARATOR and PARAGRAPH SEPARATOR
        if unit == 0x2028 || unit == 0x2029 {
            self.pending_cell()?;
            return self.paragraph_break();
        }
        self.emit(unit, TextEncoding::Utf16)?;
        self.skip_count = self.stack.current().unicode_skip;
        Ok(())
    }

    fn paragraph_break(&mut self) -> RtfResult<()> {
        self.flush(true)?;
        if self.needs_paragraph {
            self.paragraph();
        }
        self.needs_paragraph = true;
        Ok(())
    }

    /// Attributes described by the current frame.
    fn live_attributes(&self) -> TextAttributes {
        let frame = self.stack.current();
        let text_shift = if frame.font_style.contains(FontStyle::SUPERSCRIPT) {
            SUPERSCRIPT_SHIFT
        } else if frame.font_style.contains(FontStyle::SUBSCRIPT) {
            SUBSCRIPT_SHIFT
        } else {
            0
        };
        let font_size = if frame.font_size != 0 {
            half_points_to_pixels(frame.font_size, self.options.platform_dpi)
        } else {
            0
        };

        TextAttributes {
            foreground: frame.foreground.and_then(|index| self.colors.get(index)),
            background: frame.background.and_then(|index| self.colors.get(index)),
            font_name: frame.font_name.clone(),
            font_size,
            font_style: frame.font_style,
            text_shift,
            link: frame.link.clone(),
            metadata: frame.metadata.clone(),
        }
    }

    /// Deliver the buffered run if formatting changed or `force` is set.
    fn flush(&mut self, force: bool) -> RtfResult<()> {
        if !self.attributes_changed && !force {
            return Ok(());
        }

        let mut next = None;
        if self.attributes_changed {
            let live = self.live_attributes();
            if live != self.attributes {
                next = Some(live);
            }
            self.attributes_changed = false;
        }

        let has_text = !self.text.borrow()?.is_empty();
        if has_text && (next.is_some() || force) {
            if self.needs_paragraph {
                self.needs_paragraph = false;
                self.paragraph();
            }

            let text = self.text.borrow()?;
            self.sink.text_run(&TextRun {
                attributes: &self.attributes,
                text,
            });
            self.runs += 1;
            self.text.clear();
        }

        if let Some(next) = next {
            self.attributes = next;
        }
        Ok(())
    }

    /// Emit the paragraph record for the current frame.
    fn paragraph(&mut self) {
        let state = &self.stack.current().paragraph;
        let mut paragraph = Paragraph {
            align: state.align,
            border_width: twips_to_pixels(state.border_width),
            padding: twips_to_pixels(state.padding),
            first_indent: twips_to_pixels(state.first_indent),
            left_indent: twips_to_pixels(state.left_indent),
            right_indent: twips_to_pixels(state.right_indent),
            space_above: twips_to_pixels(state.space_above),
            space_below: twips_to_pixels(state.space_below),
            background_color: state.background.and_then(|index| self.colors.get(index)),
            border_color: state.border_color.and_then(|index| self.colors.get(index)),
            metadata: state.metadata.clone(),
            list_style: ListStyle::None,
            list_depth: 0,
        };

        if self.lists.is_empty() || state.list_style == ListStyle::Skip {
            paragraph.list_style = state.list_style;
            if state.list_style != ListStyle::None {
                paragraph.list_depth = state.list_level + 1;
            }
        } else if state.list_index != 0 {
            let level = state.list_level;
            let style = self
                .overrides
                .get(state.list_index)
                .and_then(|list_id| self.lists.get(list_id, level as usize + 1));
            if let Some(style) = style {
                paragraph.list_style = style;
                paragraph.list_depth = level + 1;
            }
        }

        self.last_paragraph = state.clone();
        self.sink.paragraph(&paragraph);
        self.paragraphs += 1;
    }

    fn parse_font_table(&mut self, token: Token) -> RtfResult<()> {
        match token {
            Token::Control {
                keyword: Keyword::IgnorableDestination,
                ..
            } => self.font.skip = true,
            Token::Control {
                keyword: Keyword::Font,
                parameter: Some(index),
            } => {
                self.font = FontBuilder {
                    started: true,
                    index,
                    charset: DEFAULT_CHARSET,
                    ..FontBuilder::default()
                };
            },
            Token::Control {
                keyword: Keyword::FontCharset,
                parameter: Some(charset),
            } => {
                self.font.skip = false;
                self.font.charset = charset;
            },
            Token::Control {
                keyword: Keyword::FontCodePage,
                parameter: Some(codepage),
            } => {
                self.font.skip = false;
                self.font.codepage = u16::try_from(codepage).ok();
            },
            Token::Control {
                keyword: Keyword::FontName,
                ..
            } => self.font.skip = false,
            Token::Character(byte) => {
                self.font.skip = false;
                if self.font.started {
                    if byte == b';' {
                        self.define_font()?;
                    } else {
                        self.font.name.push(byte);
                    }
                }
            },
            _ => {
                if self.font.skip {
                    self.font.skip = false;
                    self.enter(Destination::Skip);
                }
            },
        }
        Ok(())
    }

    fn define_font(&mut self) -> RtfResult<()> {
        let font = std::mem::take(&mut self.font);
        let codepage = font
            .codepage
            .or_else(|| charset_to_codepage(font.charset))
            .unwrap_or(self.default_codepage);
        let name = self.decoder(codepage).decode_to_string(&font.name)?;
        let name = name.trim().to_string();

        debug!(index = font.index, %name, charset = font.charset, "font defined");
        self.fonts
            .define(font.index, name, font.charset, font.codepage);
        Ok(())
    }

    fn parse_color_table(&mut self, token: Token) {
        match token {
            Token::Control { keyword, .. } if keyword.is_skip_destination() => {
                self.enter(Destination::Skip)
            },
            Token::Control {
                keyword: Keyword::Red,
                parameter: Some(value),
            } => {
                self.color.started = true;
                self.color.red = channel(value);
            },
            Token::Control {
                keyword: Keyword::Green,
                parameter: Some(value),
            } => {
                self.color.started = true;
                self.color.green = channel(value);
            },
            Token::Control {
                keyword: Keyword::Blue,
                parameter: Some(value),
            } => {
                self.color.started = true;
                self.color.blue = channel(value);
            },
            Token::Character(b';') => {
                let color = self.color.take();
                self.colors.define(color);
            },
            _ => {},
        }
    }

    fn parse_legacy_list(&mut self, token: Token) {
        let Token::Control { keyword, parameter } = token else {
            return;
        };
        let list = &mut self.legacy_list;
        match keyword {
            Keyword::LegacyListLevel => list.set_level(parameter.unwrap_or(1)),
            Keyword::LegacyListBulletLevel => *list = LegacyList {
                style: ListStyle::Disc,
                level: 0,
            },
            Keyword::LegacyListBodyLevel => *list = LegacyList {
                style: ListStyle::Decimal,
                level: 0,
            },
            Keyword::LegacyListDecimal => list.style = ListStyle::Decimal,
            Keyword::LegacyListLowerLetter => list.style = ListStyle::LowerCaseLetter,
            Keyword::LegacyListLowerRoman => list.style = ListStyle::LowerCaseRoman,
            Keyword::LegacyListUpperLetter => list.style = ListStyle::UpperCaseLetter,
            Keyword::LegacyListUpperRoman => list.style = ListStyle::UpperCaseRoman,
            Keyword::LegacyListPrefix => self.enter(Destination::LegacyListPrefix),
            Keyword::LegacyListSuffix => self.enter(Destination::LegacyListSuffix),
            _ => {},
        }
    }

    /// Bullet character carried by a token of a list marker destination.
    fn marker_char(&mut self, token: Token) -> RtfResult<Option<u16>> {
        match token {
            Token::Control {
                keyword: Keyword::Unicode,
                parameter: Some(value),
            } => {
                self.skip_count = self.stack.current().unicode_skip;
                Ok(Some((value & 0xFFFF) as u16))
            },
            Token::Character(byte) => self.decode_byte(byte),
            _ => Ok(None),
        }
    }

    fn parse_legacy_list_prefix(&mut self, token: Token) -> RtfResult<()> {
        if let Token::Control { keyword, .. } = token
            && keyword.is_skip_destination()
        {
            self.enter(Destination::Skip);
            return Ok(());
        }
        if let Some(bullet) = self.marker_char(token)? {
            self.legacy_list.style = ListStyle::from_bullet(bullet);
        }
        Ok(())
    }

    fn parse_list_table(&mut self, token: Token) {
        let Token::Control { keyword, parameter } = token else {
            return;
        };
        match keyword {
            Keyword::List => {
                self.level_count = 0;
                self.lists.define();
            },
            Keyword::ListId => self.lists.set_id(parameter.unwrap_or(0)),
            Keyword::ListLevel => self.level_count += 1,
            Keyword::LevelFormat => {
                let style = ListStyle::from_level_format(parameter.unwrap_or(0));
                self.lists.set_style(self.level_count, style);
            },
            Keyword::LevelText => self.enter(Destination::ListTableLevelText),
            _ if keyword.is_skip_destination() => self.enter(Destination::Skip),
            _ => {},
        }
    }

    fn parse_list_level_text(&mut self, token: Token) -> RtfResult<()> {
        let bullet = match token {
            Token::Control { keyword, .. } if keyword.is_skip_destination() => {
                self.enter(Destination::Skip);
                return Ok(());
            },
            // Level text starts with its length and holds number
            // placeholders below 0x20
            Token::Character(byte) if byte == b';' || byte < 0x20 => None,
            _ => self.marker_char(token)?,
        };
        if let Some(bullet) = bullet {
            self.lists
                .set_style(self.level_count, ListStyle::from_bullet(bullet));
        }
        Ok(())
    }

    fn parse_list_override_table(&mut self, token: Token) {
        let Token::Control { keyword, parameter } = token else {
            return;
        };
        let value = parameter.unwrap_or(0);
        match keyword {
            Keyword::ListOverride => self.overrides.define(),
            Keyword::ListId => self.overrides.set_list_id(value),
            Keyword::ListSelect => self.overrides.set_override_id(value),
            _ => {},
        }
    }

    fn parse_list_text(&mut self, token: Token) -> RtfResult<()> {
        if let Token::Control { keyword, .. } = token
            && keyword.is_skip_destination()
        {
            self.enter(Destination::Skip);
            return Ok(());
        }
        if let Some(ch) = self.marker_char(token)?
            && ch != SPACE
        {
            self.list_skip = false;
        }
        Ok(())
    }

    fn parse_field(&mut self, token: Token) {
        match token {
            Token::Control {
                keyword: Keyword::FieldInstruction,
                ..
            } => self.enter(Destination::FieldInstruction),
            Token::Control {
                keyword: Keyword::FieldResult,
                ..
            } => self.enter(Destination::Normal),
            _ => {},
        }
    }

    fn parse_field_instruction(&mut self, token: Token) -> RtfResult<()> {
        let byte = match token {
            Token::Control { keyword, .. } if keyword.is_skip_destination() => {
                self.enter(Destination::Skip);
                return Ok(());
            },
            Token::Control {
                keyword: Keyword::Quote,
                ..
            } => b'"',
            Token::Control {
                keyword: Keyword::Unicode,
                ..
            } => {
                self.skip_count = self.stack.current().unicode_skip;
                return Ok(());
            },
            Token::Character(byte) => byte,
            _ => return Ok(()),
        };
        self.field_instruction.try_reserve(1)?;
        self.field_instruction.push(byte);
        Ok(())
    }

    /// Apply a completed `\fldinst` to the current frame.
    fn process_field(&mut self) -> RtfResult<()> {
        let instruction = std::mem::take(&mut self.field_instruction);
        let Some(field) = FieldInstruction::parse(&instruction) else {
            trace!("malformed field instruction ignored");
            return Ok(());
        };

        let data = self
            .decoder(self.active_codepage())
            .decode_to_string(field.data)?;
        debug!(field_type = ?field.field_type, %data, "field applied");

        match field.field_type {
            FieldType::Hyperlink => self.stack.update(|frame| {
                frame.link = Some(data);
                frame.font_style |= FontStyle::LINK;
            }),
            FieldType::Anchor => self.stack.update(|frame| frame.link = Some(data)),
            FieldType::Metadata => self.stack.update(|frame| frame.metadata = Some(data)),
            FieldType::LineMetadata => {
                self.stack
                    .update(|frame| frame.paragraph.metadata = Some(data))
            },
            FieldType::Unknown => {},
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rtf::error::RtfError;
    use crate::rtf::types::Color;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Record {
        Paragraph(Paragraph),
        Run(String, TextAttributes),
    }

    #[derive(Debug, Default)]
    struct Recorder {
        records: Vec<Record>,
    }

    impl StyledTextSink for Recorder {
        fn paragraph(&mut self, paragraph: &Paragraph) {
            self.records.push(Record::Paragraph(paragraph.clone()));
        }

        fn text_run(&mut self, run: &TextRun<'_>) {
            self.records
                .push(Record::Run(run.text(), run.attributes.clone()));
        }
    }

    fn read_with(input: &[u8], options: ReaderOptions) -> Vec<Record> {
        let mut reader = RtfReader::with_options(options, Recorder::default());
        reader.process(input).unwrap();
        reader.into_sink().records
    }

    fn read(input: &[u8]) -> Vec<Record> {
        read_with(input, ReaderOptions::default())
    }

    fn runs(records: &[Record]) -> Vec<(String, TextAttributes)> {
        records
            .iter()
            .filter_map(|record| match record {
                Record::Run(text, attributes) => Some((text.clone(), attributes.clone())),
                Record::Paragraph(_) => None,
            })
            .collect()
    }

    fn texts(records: &[Record]) -> Vec<String> {
        runs(records).into_iter().map(|(text, _)| text).collect()
    }

    fn paragraphs(records: &[Record]) -> Vec<Paragraph> {
        records
            .iter()
            .filter_map(|record| match record {
                Record::Paragraph(paragraph) => Some(paragraph.clone()),
                Record::Run(..) => None,
            })
            .collect()
    }

    fn run(text: &str) -> Record {
        Record::Run(text.to_string(), TextAttributes::default())
    }

    #[test]
    fn test_plain_text() {
        let records = read(br"{\rtf1 Hello}");
        assert_eq!(records, [Record::Paragraph(Paragraph::default()), run("Hello")]);
    }

    #[test]
    fn test_bold_toggle() {
        let records = read(br"{\rtf1\b Bold\b0 Normal}");
        assert_eq!(paragraphs(&records).len(), 1);

        let runs = runs(&records);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].0, "Bold");
        assert!(runs[0].1.font_style.contains(FontStyle::BOLD));
        assert_eq!(runs[1].0, "Normal");
        assert!(!runs[1].1.font_style.contains(FontStyle::BOLD));
    }

    #[test]
    fn test_color_selected_before_table() {
        let records =
            read(br"{\rtf1\cf2{\colortbl;\red0\green0\blue0;\red255\green0\blue0;}Red}");
        let runs = runs(&records);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].0, "Red");
        assert_eq!(runs[0].1.foreground, Some(Color::new(255, 0, 0)));
        assert_eq!(runs[0].1.background, None);
    }

    #[test]
    fn test_hex_escape_in_ansi_codepage() {
        let records = read(br"{\rtf1\ansi\ansicpg1252 caf\'e9}");
        assert_eq!(texts(&records), ["caf\u{e9}"]);
    }

    #[test]
    fn test_centered_paragraph() {
        let records = read(br"{\rtf1\pard\qc Centered\par}");
        let expected = Paragraph {
            align: TextAlign::Center,
            ..Paragraph::default()
        };
        assert_eq!(records, [Record::Paragraph(expected), run("Centered")]);
    }

    #[test]
    fn test_hyperlink_field() {
        let records =
            read(br#"{\rtf1{\field{\*\fldinst HYPERLINK \"http://example.com\"}{\fldrslt Link}}}"#);
        let runs = runs(&records);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].0, "Link");
        assert_eq!(runs[0].1.link.as_deref(), Some("http://example.com"));
        assert!(runs[0].1.font_style.contains(FontStyle::LINK));
    }

    #[test]
    fn test_hyperlink_ends_with_field() {
        let records = read(
            br#"{\rtf1 See {\field{\*\fldinst {HYPERLINK "http://example.com"}}{\fldrslt here}} now}"#,
        );
        let runs = runs(&records);
        assert_eq!(texts(&records), ["See ", "here", " now"]);
        assert_eq!(runs[0].1.link, None);
        assert_eq!(runs[1].1.link.as_deref(), Some("http://example.com"));
        assert_eq!(runs[2].1.link, None);
    }

    #[test]
    fn test_anchor_and_metadata_fields() {
        let records = read(
            br#"{\rtf1{\field{\*\fldinst LCANCHOR "top"}{\fldrslt a}}{\field{\*\fldinst LCMETADATA "tag"}{\fldrslt b}}}"#,
        );
        let runs = runs(&records);
        assert_eq!(runs[0].1.link.as_deref(), Some("top"));
        assert!(!runs[0].1.font_style.contains(FontStyle::LINK));
        assert_eq!(runs[1].1.metadata.as_deref(), Some("tag"));
        assert_eq!(runs[1].1.link, None);
    }

    #[test]
    fn test_line_metadata_field() {
        let records =
            read(br#"{\rtf1{\field{\*\fldinst LCLINEMETADATA "line"}{\fldrslt text}}\par}"#);
        let paragraphs = paragraphs(&records);
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].metadata.as_deref(), Some("line"));
        assert_eq!(texts(&records), ["text"]);
    }

    #[test]
    fn test_malformed_field_is_ignored() {
        let records = read(br"{\rtf1{\field{\*\fldinst HYPERLINK http://x}{\fldrslt plain}}}");
        assert_eq!(runs(&records), [("plain".to_string(), TextAttributes::default())]);
    }

    #[test]
    fn test_unmatched_group_end_is_underflow() {
        let mut reader = RtfReader::new(Recorder::default());
        assert_eq!(
            reader.process(br"{\rtf1 a}}"),
            Err(RtfError::Underflow { offset: 9 })
        );
    }

    #[test]
    fn test_open_groups_at_end_are_accepted() {
        let records = read(br"{\rtf1{\b open");
        let runs = runs(&records);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].0, "open");
        assert!(runs[0].1.font_style.contains(FontStyle::BOLD));
    }

    #[test]
    fn test_group_depth_limit() {
        let options = ReaderOptions::new().with_max_group_depth(2);
        let mut reader = RtfReader::with_options(options, Recorder::default());
        assert_eq!(reader.process(b"{{{"), Err(RtfError::Overflow { depth: 2 }));
    }

    #[test]
    fn test_invalid_hex_stops_reading() {
        let mut reader = RtfReader::new(Recorder::default());
        let result = reader.process(br"{\rtf1 ok\'zz}");
        assert!(matches!(result, Err(RtfError::InvalidHex { .. })));
        assert!(reader.sink().records.is_empty());
    }

    #[test]
    fn test_one_run_per_unformatted_paragraph() {
        let records = read(br"{\rtf1 one\tab two\emdash three \{braces\}}");
        assert_eq!(texts(&records), ["one\ttwo\u{2014}three {braces}"]);
    }

    #[test]
    fn test_special_characters() {
        let records = read(br"{\rtf1\bullet\lquote a\rquote\ldblquote b\rdblquote\endash\~\_\-}");
        assert_eq!(
            texts(&records),
            ["\u{2022}\u{2018}a\u{2019}\u{201C}b\u{201D}\u{2013}\u{A0}\u{2011}"]
        );
    }

    #[test]
    fn test_paragraph_sequence() {
        let records = read(br"{\rtf1 One\par Two\par}");
        assert_eq!(
            records,
            [
                Record::Paragraph(Paragraph::default()),
                run("One"),
                Record::Paragraph(Paragraph::default()),
                run("Two"),
            ]
        );
    }

    #[test]
    fn test_empty_paragraphs_are_reported() {
        let records = read(br"{\rtf1\par\par}");
        assert_eq!(paragraphs(&records).len(), 2);
        assert!(runs(&records).is_empty());
    }

    #[test]
    fn test_unicode_with_fallback() {
        let records = read(br"{\rtf1\uc1\u8364?x\uc2\u8364\'80\'80y}");
        assert_eq!(texts(&records), ["\u{20AC}x\u{20AC}y"]);
    }

    #[test]
    fn test_unicode_fallback_ends_at_group() {
        let records = read(br"{\rtf1{\u8364}x}");
        assert_eq!(texts(&records), ["\u{20AC}x"]);
    }

    #[test]
    fn test_unicode_skip_restored_after_group() {
        let records = read(br"{\rtf1{\uc2 a}\u8364?b}");
        assert_eq!(texts(&records).concat(), "a\u{20AC}b");
    }

    #[test]
    fn test_negative_unicode_value() {
        let mut units = Vec::new();
        let mut reader = RtfReader::new(|event: StyledEvent<'_>| {
            if let StyledEvent::Run(run) = event {
                units.extend_from_slice(run.text);
            }
        });
        reader.process(br"{\rtf1\u-3913?}").unwrap();
        drop(reader);
        assert_eq!(units, [0xF0B7]);
    }

    #[test]
    fn test_unicode_paragraph_separator() {
        let records = read(br"{\rtf1 a\u8233 b}");
        assert_eq!(paragraphs(&records).len(), 2);
        assert_eq!(texts(&records), ["a", "b"]);
    }

    #[test]
    fn test_font_charset_selects_codepage() {
        let records = read(br"{\rtf1\ansi{\fonttbl{\f0\fcharset128 MS Mincho;}}\f0 \'93\'fa}");
        let runs = runs(&records);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].0, "\u{65E5}");
        assert_eq!(runs[0].1.font_name.as_deref(), Some("MS Mincho"));
    }

    #[test]
    fn test_default_font_codepage() {
        let records = read(br"{\rtf1\ansi\deff0{\fonttbl{\f0\fcharset204 Arial;}}\'e9}");
        assert_eq!(texts(&records), ["\u{439}"]);
    }

    #[test]
    fn test_default_charset_font_uses_document_codepage() {
        let records = read(
            br"{\rtf1\ansi\deff0{\fonttbl{\f0\fcharset204 Arial;}{\f1\fcharset1 Times;}}\f1 \'e9}",
        );
        assert_eq!(texts(&records), ["\u{e9}"]);
    }

    #[test]
    fn test_oem_codepages() {
        assert_eq!(texts(&read(br"{\rtf1\pc \'9b}")), ["\u{a2}"]);
        assert_eq!(texts(&read(br"{\rtf1\pca \'9b}")), ["\u{f8}"]);
    }

    #[test]
    fn test_ansicpg_sets_document_codepage() {
        let records = read(br"{\rtf1\ansi\ansicpg1251 \'e9}");
        assert_eq!(texts(&records), ["\u{439}"]);
    }

    #[test]
    fn test_mac_codepage() {
        let records = read(br"{\rtf1\mac \'8e}");
        assert_eq!(texts(&records), ["\u{e9}"]);
    }

    #[test]
    fn test_font_table_skips_panose() {
        let records = read(
            br"{\rtf1{\fonttbl{\f1\fswiss{\*\panose 020b0604020202020204}Arial ;}}\f1 x}",
        );
        let runs = runs(&records);
        assert_eq!(runs[0].1.font_name.as_deref(), Some("Arial"));
    }

    #[test]
    fn test_font_size_scales_with_dpi() {
        let records = read(br"{\rtf1\fs24 x}");
        assert_eq!(runs(&records)[0].1.font_size, 16);

        let options = ReaderOptions::new().with_platform_dpi(72);
        let records = read_with(br"{\rtf1\fs24 x}", options);
        assert_eq!(runs(&records)[0].1.font_size, 12);
    }

    #[test]
    fn test_plain_resets_character_formatting() {
        let records = read(br"{\rtf1\b\i\ul\fs24 x\plain y}");
        let runs = runs(&records);
        assert_eq!(runs.len(), 2);
        assert_eq!(
            runs[0].1.font_style,
            FontStyle::BOLD | FontStyle::ITALIC | FontStyle::UNDERLINE
        );
        assert_eq!(runs[1].1, TextAttributes::default());
    }

    #[test]
    fn test_superscript_and_subscript_shift() {
        let records = read(br"{\rtf1 x\super 2\nosupersub y\sub 3}");
        let shifts: Vec<_> = runs(&records)
            .into_iter()
            .map(|(text, attributes)| (text, attributes.text_shift))
            .collect();
        assert_eq!(
            shifts,
            [
                ("x".to_string(), 0),
                ("2".to_string(), SUPERSCRIPT_SHIFT),
                ("y".to_string(), 0),
                ("3".to_string(), SUBSCRIPT_SHIFT),
            ]
        );
    }

    #[test]
    fn test_highlight_color() {
        let records = read(br"{\rtf1{\colortbl;\red255\green255\blue0;}\highlight1 hi}");
        assert_eq!(runs(&records)[0].1.background, Some(Color::new(255, 255, 0)));
    }

    #[test]
    fn test_paragraph_formatting_in_pixels() {
        let records = read(
            br"{\rtf1{\colortbl;\red0\green0\blue255;}\pard\qj\li720\ri360\fi-360\sb240\sa120\brdrw20\brdsp40\cbpat1\brdrcf1 Text\par}",
        );
        let blue = Some(Color::new(0, 0, 255));
        let expected = Paragraph {
            align: TextAlign::Justify,
            border_width: 1,
            padding: 2,
            first_indent: -18,
            left_indent: 36,
            right_indent: 18,
            space_above: 12,
            space_below: 6,
            background_color: blue,
            border_color: blue,
            ..Paragraph::default()
        };
        assert_eq!(paragraphs(&records), [expected]);
    }

    #[test]
    fn test_paragraph_fields_in_group_flush_their_text() {
        let records = read(br"{\rtf1{\pard\qr right}\par}");
        let paragraphs = paragraphs(&records);
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].align, TextAlign::Right);
        assert_eq!(texts(&records), ["right"]);
    }

    #[test]
    fn test_table_cells_are_tab_separated() {
        let records = read(br"{\rtf1\trowd A\cell B\cell\row C\par}");
        assert_eq!(texts(&records), ["A\tB", "C"]);
        assert_eq!(paragraphs(&records).len(), 2);
    }

    #[test]
    fn test_empty_cells_keep_their_tabs() {
        let records = read(br"{\rtf1 A\cell\cell B}");
        assert_eq!(texts(&records).concat(), "A\t\tB");
    }

    #[test]
    fn test_legacy_bullet_list() {
        let records = read(br"{\rtf1{\*\pn\pnlvlblt{\pntxtb\'B7}}Item\par}");
        let paragraphs = paragraphs(&records);
        assert_eq!(paragraphs[0].list_style, ListStyle::Disc);
        assert_eq!(paragraphs[0].list_depth, 1);
    }

    #[test]
    fn test_legacy_numbered_level() {
        let records = read(br"{\rtf1{\*\pn\pnlvl3\pnlcltr{\pntxta )}}Item\par\pard Plain\par}");
        let paragraphs = paragraphs(&records);
        assert_eq!(paragraphs[0].list_style, ListStyle::LowerCaseLetter);
        assert_eq!(paragraphs[0].list_depth, 3);
        assert_eq!(paragraphs[1].list_style, ListStyle::None);
        assert_eq!(paragraphs[1].list_depth, 0);
        assert_eq!(texts(&records), ["Item", "Plain"]);
    }

    const LIST_TABLES: &[u8] = br"{\*\listtable{\list\listtemplateid1{\listlevel\levelnfc23{\leveltext\'01\u8226 ?;}}{\listlevel\levelnfc0{\leveltext\'02\'00.;}}\listid7}}{\*\listoverridetable{\listoverride\listid7\ls1}}";

    fn with_lists(body: &[u8]) -> Vec<u8> {
        [br"{\rtf1".as_slice(), LIST_TABLES, body, b"}"].concat()
    }

    #[test]
    fn test_list_table_levels() {
        let records = read(&with_lists(br"\pard\ls1 One\par\pard\ls1\ilvl1 Two\par\pard Three\par"));
        let paragraphs = paragraphs(&records);
        assert_eq!(paragraphs.len(), 3);
        assert_eq!(
            (paragraphs[0].list_style, paragraphs[0].list_depth),
            (ListStyle::Disc, 1)
        );
        assert_eq!(
            (paragraphs[1].list_style, paragraphs[1].list_depth),
            (ListStyle::Decimal, 2)
        );
        assert_eq!(
            (paragraphs[2].list_style, paragraphs[2].list_depth),
            (ListStyle::None, 0)
        );
        assert_eq!(texts(&records), ["One", "Two", "Three"]);
    }

    #[test]
    fn test_list_text_marker_is_not_text() {
        let records = read(&with_lists(br"\pard\ls1{\listtext \'b7\tab}Item\par"));
        assert_eq!(texts(&records), ["Item"]);
        assert_eq!(paragraphs(&records)[0].list_style, ListStyle::Disc);
    }

    #[test]
    fn test_blank_list_text_continues_item() {
        let records = read(&with_lists(br"\pard\ls1{\listtext \tab}More\par"));
        let paragraphs = paragraphs(&records);
        assert_eq!(paragraphs[0].list_style, ListStyle::Skip);
        assert_eq!(paragraphs[0].list_depth, 1);
    }

    #[test]
    fn test_skipped_destinations() {
        let records =
            read(br"{\rtf1{\*\generator Foo;}{\info{\title T}}{\stylesheet{\s0 Normal;}}Body}");
        assert_eq!(texts(&records), ["Body"]);
    }

    #[test]
    fn test_binary_data_is_skipped_with_picture() {
        let records = read(br"{\rtf1{\pict\bin4 {}\\}after}");
        assert_eq!(texts(&records), ["after"]);
    }

    #[test]
    fn test_binary_data_in_body_is_text() {
        let records = read(br"{\rtf1 x\bin3 {\}y}");
        assert_eq!(texts(&records).concat(), "x{\\}y");
    }

    #[test]
    fn test_unknown_words_are_ignored() {
        let records = read(br"{\rtf1\foo12\barbaz bar}");
        assert_eq!(texts(&records), ["bar"]);
    }

    #[test]
    fn test_parameter_words_without_parameter_are_ignored() {
        let records = read(br"{\rtf1{\colortbl;\red255\green0\blue0;}\cf1 a\cf b}");
        let runs = runs(&records);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].0, "ab");
    }

    #[test]
    fn test_each_process_call_starts_fresh() {
        let mut reader = RtfReader::new(Recorder::default());
        reader
            .process(br"{\rtf1{\colortbl;\red255\green0\blue0;}\cf1 red}")
            .unwrap();
        reader.sink_mut().records.clear();

        reader.process(br"{\rtf1\cf1 plain}").unwrap();
        assert_eq!(runs(&reader.sink().records)[0].1.foreground, None);
    }

    proptest! {
        #[test]
        fn prop_extra_group_end_is_underflow(depth in 1usize..32) {
            let input = ["{".repeat(depth), "}".repeat(depth + 1)].concat();
            let mut reader = RtfReader::new(Recorder::default());
            prop_assert_eq!(
                reader.process(input.as_bytes()),
                Err(RtfError::Underflow { offset: depth * 2 })
            );
        }

        #[test]
        fn prop_unformatted_text_is_one_run(text in "[a-zA-Z0-9 ,.]{1,64}") {
            let input = format!("{{\\rtf1 {text}}}");
            let records = read(input.as_bytes());
            prop_assert_eq!(texts(&records), [text]);
        }
    }
}
