//! Control word table.
//!
//! Maps the text of a control word or control symbol to a [`Keyword`].
//! The table is a compile-time perfect hash; words it does not know map to
//! [`Keyword::Unknown`] and are ignored by the reader.

use phf::phf_map;

/// Recognized control words and symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // Document encoding
    Ansi,
    Mac,
    Pc,
    Pca,
    AnsiCodePage,
    DefaultFont,

    // Breaks and text flow
    Paragraph,
    ResetParagraph,
    Tab,
    Cell,
    Row,
    Unicode,
    UnicodeSkip,
    Binary,

    // Special characters
    Bullet,
    LeftQuote,
    RightQuote,
    LeftDoubleQuote,
    RightDoubleQuote,
    EmDash,
    EnDash,
    NonBreakingSpace,
    NonBreakingHyphen,
    OptionalHyphen,
    Quote,

    // Destinations
    SkipDestination,
    IgnorableDestination,
    FontTable,
    ColorTable,
    Field,
    FieldInstruction,
    FieldResult,

    // Fonts
    Font,
    FontCharset,
    FontSize,
    FontCodePage,
    FontName,

    // Colors
    Red,
    Green,
    Blue,
    Foreground,
    Background,

    // Character formatting
    Bold,
    Italic,
    Underline,
    NoUnderline,
    Strikethrough,
    Superscript,
    Subscript,
    NoSuperSub,
    Plain,

    // Legacy numbered lists
    LegacyList,
    LegacyListLevel,
    LegacyListBulletLevel,
    LegacyListBodyLevel,
    LegacyListDecimal,
    LegacyListLowerLetter,
    LegacyListLowerRoman,
    LegacyListUpperLetter,
    LegacyListUpperRoman,
    LegacyListPrefix,
    LegacyListSuffix,

    // List table
    ListTable,
    List,
    ListId,
    ListLevel,
    LevelFormat,
    LevelText,
    ListText,

    // List overrides
    ListOverrideTable,
    ListOverride,
    ListSelect,
    ListSelectLevel,

    // Paragraph formatting
    ParagraphBackground,
    BorderWidth,
    BorderColor,
    BorderPadding,
    FirstIndent,
    LeftIndent,
    RightIndent,
    SpaceAbove,
    SpaceBelow,
    AlignLeft,
    AlignCenter,
    AlignRight,
    AlignJustify,
    TabStop,

    Unknown,
}

static KEYWORDS: phf::Map<&'static str, Keyword> = phf_map! {
    "ansi" => Keyword::Ansi,
    "mac" => Keyword::Mac,
    "pc" => Keyword::Pc,
    "pca" => Keyword::Pca,
    "ansicpg" => Keyword::AnsiCodePage,
    "deff" => Keyword::DefaultFont,

    "par" => Keyword::Paragraph,
    "line" => Keyword::Paragraph,
    "\n" => Keyword::Paragraph,
    "\r" => Keyword::Paragraph,
    "pard" => Keyword::ResetParagraph,
    "tab" => Keyword::Tab,
    "cell" => Keyword::Cell,
    "row" => Keyword::Row,
    "u" => Keyword::Unicode,
    "uc" => Keyword::UnicodeSkip,
    "bin" => Keyword::Binary,

    "bullet" => Keyword::Bullet,
    "lquote" => Keyword::LeftQuote,
    "rquote" => Keyword::RightQuote,
    "ldblquote" => Keyword::LeftDoubleQuote,
    "rdblquote" => Keyword::RightDoubleQuote,
    "emdash" => Keyword::EmDash,
    "endash" => Keyword::EnDash,
    "~" => Keyword::NonBreakingSpace,
    "_" => Keyword::NonBreakingHyphen,
    "-" => Keyword::OptionalHyphen,
    "\"" => Keyword::Quote,

    "*" => Keyword::IgnorableDestination,
    "header" => Keyword::SkipDestination,
    "stylesheet" => Keyword::SkipDestination,
    "info" => Keyword::SkipDestination,
    "object" => Keyword::SkipDestination,
    "pict" => Keyword::SkipDestination,
    "pntext" => Keyword::SkipDestination,
    "headerl" => Keyword::SkipDestination,
    "headerr" => Keyword::SkipDestination,
    "headerf" => Keyword::SkipDestination,
    "footer" => Keyword::SkipDestination,
    "footerl" => Keyword::SkipDestination,
    "footerr" => Keyword::SkipDestination,
    "footerf" => Keyword::SkipDestination,
    "footnote" => Keyword::SkipDestination,
    "annotation" => Keyword::SkipDestination,
    "nonshppict" => Keyword::SkipDestination,
    "xe" => Keyword::SkipDestination,
    "tc" => Keyword::SkipDestination,
    "fonttbl" => Keyword::FontTable,
    "colortbl" => Keyword::ColorTable,
    "field" => Keyword::Field,
    "fldinst" => Keyword::FieldInstruction,
    "fldrslt" => Keyword::FieldResult,

    "f" => Keyword::Font,
    "fcharset" => Keyword::FontCharset,
    "fs" => Keyword::FontSize,
    "cpg" => Keyword::FontCodePage,
    "fname" => Keyword::FontName,

    "red" => Keyword::Red,
    "green" => Keyword::Green,
    "blue" => Keyword::Blue,
    "cf" => Keyword::Foreground,
    "cb" => Keyword::Background,
    "chcbpat" => Keyword::Background,
    "highlight" => Keyword::Background,

    "b" => Keyword::Bold,
    "i" => Keyword::Italic,
    "ul" => Keyword::Underline,
    "ulnone" => Keyword::NoUnderline,
    "strike" => Keyword::Strikethrough,
    "super" => Keyword::Superscript,
    "up" => Keyword::Superscript,
    "sub" => Keyword::Subscript,
    "dn" => Keyword::Subscript,
    "nosupersub" => Keyword::NoSuperSub,
    "plain" => Keyword::Plain,

    "pn" => Keyword::LegacyList,
    "pnlvl" => Keyword::LegacyListLevel,
    "pnlvlblt" => Keyword::LegacyListBulletLevel,
    "pnlvlbody" => Keyword::LegacyListBodyLevel,
    "pndec" => Keyword::LegacyListDecimal,
    "pnlcltr" => Keyword::LegacyListLowerLetter,
    "pnlcrm" => Keyword::LegacyListLowerRoman,
    "pnucltr" => Keyword::LegacyListUpperLetter,
    "pnucrm" => Keyword::LegacyListUpperRoman,
    "pntxtb" => Keyword::LegacyListPrefix,
    "pntxta" => Keyword::LegacyListSuffix,

    "listtable" => Keyword::ListTable,
    "list" => Keyword::List,
    "listid" => Keyword::ListId,
    "listlevel" => Keyword::ListLevel,
    "levelnfc" => Keyword::LevelFormat,
    "leveltext" => Keyword::LevelText,
    "listtext" => Keyword::ListText,

    "listoverridetable" => Keyword::ListOverrideTable,
    "listoverride" => Keyword::ListOverride,
    "ls" => Keyword::ListSelect,
    "ilvl" => Keyword::ListSelectLevel,

    "cbpat" => Keyword::ParagraphBackground,
    "brdrw" => Keyword::BorderWidth,
    "brdrcf" => Keyword::BorderColor,
    "brdsp" => Keyword::BorderPadding,
    "fi" => Keyword::FirstIndent,
    "li" => Keyword::LeftIndent,
    "ri" => Keyword::RightIndent,
    "sb" => Keyword::SpaceAbove,
    "sa" => Keyword::SpaceBelow,
    "ql" => Keyword::AlignLeft,
    "qc" => Keyword::AlignCenter,
    "qr" => Keyword::AlignRight,
    "qj" => Keyword::AlignJustify,
    "tx" => Keyword::TabStop,
};

/// Look up a control word or control symbol.
#[inline]
pub fn lookup(word: &[u8]) -> Keyword {
    std::str::from_utf8(word)
        .ok()
        .and_then(|word| KEYWORDS.get(word))
        .copied()
        .unwrap_or(Keyword::Unknown)
}

impl Keyword {
    /// Whether the keyword is meaningless without a numeric parameter.
    ///
    /// Such keywords are dropped when they arrive bare.
    pub const fn expects_parameter(self) -> bool {
        matches!(
            self,
            Keyword::AnsiCodePage
                | Keyword::DefaultFont
                | Keyword::Unicode
                | Keyword::UnicodeSkip
                | Keyword::Binary
                | Keyword::Font
                | Keyword::FontCharset
                | Keyword::FontSize
                | Keyword::FontCodePage
                | Keyword::Red
                | Keyword::Green
                | Keyword::Blue
                | Keyword::Foreground
                | Keyword::Background
                | Keyword::LegacyListLevel
                | Keyword::ListId
                | Keyword::LevelFormat
                | Keyword::ListSelect
                | Keyword::ListSelectLevel
                | Keyword::ParagraphBackground
                | Keyword::BorderWidth
                | Keyword::BorderColor
                | Keyword::BorderPadding
                | Keyword::FirstIndent
                | Keyword::LeftIndent
                | Keyword::RightIndent
                | Keyword::SpaceAbove
                | Keyword::SpaceBelow
        )
    }

    /// Whether the keyword opens a destination that is skipped wholesale.
    #[inline]
    pub const fn is_skip_destination(self) -> bool {
        matches!(self, Keyword::SkipDestination | Keyword::IgnorableDestination)
    }
}
