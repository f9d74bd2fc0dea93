//! Code page decoding for legacy 8-bit and double-byte text.
//!
//! RTF text is a mix of 7-bit ASCII, UTF-16 escapes and bytes interpreted
//! under a Windows code page. This module maps code page identifiers to a
//! [`CodePageDecoder`] that turns those bytes into UTF-16 code units.
//!
//! Most code pages are served by `encoding_rs`. The OEM code pages 437 and
//! 850, which `encoding_rs` does not carry, use built-in tables, and the
//! Symbol code page maps bytes into the private use area.

use encoding_rs::Encoding;
use std::collections::TryReserveError;

/// Pseudo code page used for the Symbol character set.
pub const CP_SYMBOL: u16 = 42;

/// Western European code page, the RTF default.
pub const CP_WINDOWS_1252: u16 = 1252;

/// Map a Windows code page identifier to an `encoding_rs` encoding.
///
/// Returns `None` for code pages that `encoding_rs` does not implement,
/// including the OEM code pages handled by [`codepage_decoder`].
///
/// # Examples
/// ```
/// use rtf_styled::common::encoding::codepage_to_encoding;
///
/// let encoding = codepage_to_encoding(936).unwrap();
/// assert_eq!(encoding.name(), "GBK");
/// ```
#[inline]
pub fn codepage_to_encoding(codepage: u32) -> Option<&'static Encoding> {
    match codepage {
        // Windows codepages (Western scripts)
        874 => Some(encoding_rs::WINDOWS_874),   // Thai
        1250 => Some(encoding_rs::WINDOWS_1250), // Central European
        1251 => Some(encoding_rs::WINDOWS_1251), // Cyrillic
        1252 => Some(encoding_rs::WINDOWS_1252), // Western European (default ANSI)
        1253 => Some(encoding_rs::WINDOWS_1253), // Greek
        1254 => Some(encoding_rs::WINDOWS_1254), // Turkish
        1255 => Some(encoding_rs::WINDOWS_1255), // Hebrew
        1256 => Some(encoding_rs::WINDOWS_1256), // Arabic
        1257 => Some(encoding_rs::WINDOWS_1257), // Baltic
        1258 => Some(encoding_rs::WINDOWS_1258), // Vietnamese

        // East Asian codepages
        932 => Some(encoding_rs::SHIFT_JIS), // Japanese Shift-JIS
        936 => Some(encoding_rs::GBK),       // Simplified Chinese (GB2312/GBK)
        949 => Some(encoding_rs::EUC_KR),    // Korean
        950 => Some(encoding_rs::BIG5),      // Traditional Chinese (Big5)

        // DOS and Mac codepages
        866 => Some(encoding_rs::IBM866),
        10000 => Some(encoding_rs::MACINTOSH),
        10007 => Some(encoding_rs::X_MAC_CYRILLIC),

        // ISO and Unicode codepages
        20866 => Some(encoding_rs::KOI8_R),
        21866 => Some(encoding_rs::KOI8_U),
        28591 => Some(encoding_rs::WINDOWS_1252),
        28592 => Some(encoding_rs::ISO_8859_2),
        28595 => Some(encoding_rs::ISO_8859_5),
        28597 => Some(encoding_rs::ISO_8859_7),
        65001 => Some(encoding_rs::UTF_8),

        _ => None,
    }
}

/// Map an RTF `\fcharset` value to a Windows code page.
///
/// `None` means the font uses the document's default code page, which is
/// what charset 1 (`DEFAULT_CHARSET`) asks for and what unknown charsets
/// fall back to.
#[inline]
pub fn charset_to_codepage(charset: i32) -> Option<u16> {
    match charset {
        0 => Some(1252),      // ANSI
        2 => Some(CP_SYMBOL), // Symbol
        77 => Some(10000),    // Mac Roman
        128 => Some(932),     // Shift-JIS
        129 => Some(949),     // Hangul
        130 => Some(1361),    // Johab
        134 => Some(936),     // GB2312
        136 => Some(950),     // Big5
        161 => Some(1253),    // Greek
        162 => Some(1254),    // Turkish
        163 => Some(1258),    // Vietnamese
        177 => Some(1255),    // Hebrew
        178 => Some(1256),    // Arabic
        186 => Some(1257),    // Baltic
        204 => Some(1251),    // Russian
        222 => Some(874),     // Thai
        238 => Some(1250),    // Eastern European
        254 => Some(437),     // PC 437
        _ => None,
    }
}

/// Decoder for one code page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodePageDecoder {
    /// Decoding delegated to `encoding_rs`
    Encoding(&'static Encoding),
    /// Single-byte table for the upper half, ASCII below 0x80
    Oem(&'static [u16; 128]),
    /// Symbol font bytes, mapped to U+F000 + byte
    Symbol,
}

/// Look up the decoder for a code page, or `None` if it is not supported.
pub fn codepage_decoder(codepage: u16) -> Option<CodePageDecoder> {
    match codepage {
        CP_SYMBOL => Some(CodePageDecoder::Symbol),
        437 => Some(CodePageDecoder::Oem(&CP437_HIGH)),
        850 => Some(CodePageDecoder::Oem(&CP850_HIGH)),
        other => codepage_to_encoding(other as u32).map(CodePageDecoder::Encoding),
    }
}

impl CodePageDecoder {
    /// Decode `bytes` and append the UTF-16 code units to `out`.
    ///
    /// The bytes are treated as a complete sequence, so a trailing lead
    /// byte of a double-byte code page decodes to U+FFFD.
    pub fn decode_into(&self, bytes: &[u8], out: &mut Vec<u16>) -> Result<(), TryReserveError> {
        match *self {
            CodePageDecoder::Encoding(encoding) => {
                let mut decoder = encoding.new_decoder_without_bom_handling();
                let needed = decoder
                    .max_utf16_buffer_length(bytes.len())
                    .unwrap_or(bytes.len().saturating_mul(2));
                out.try_reserve(needed)?;
                let start = out.len();
                out.resize(start + needed, 0);
                let (_, _, written, _) = decoder.decode_to_utf16(bytes, &mut out[start..], true);
                out.truncate(start + written);
            },
            CodePageDecoder::Oem(table) => {
                out.try_reserve(bytes.len())?;
                out.extend(bytes.iter().map(|&b| {
                    if b < 0x80 {
                        b as u16
                    } else {
                        table[(b - 0x80) as usize]
                    }
                }));
            },
            CodePageDecoder::Symbol => {
                out.try_reserve(bytes.len())?;
                out.extend(bytes.iter().map(|&b| {
                    if b < 0x20 {
                        b as u16
                    } else {
                        0xF000 | b as u16
                    }
                }));
            },
        }
        Ok(())
    }

    /// Decode `bytes` into a `String`, replacing invalid sequences.
    pub fn decode_to_string(&self, bytes: &[u8]) -> Result<String, TryReserveError> {
        let mut units = Vec::new();
        self.decode_into(bytes, &mut units)?;
        Ok(String::from_utf16_lossy(&units))
    }
}

/// Upper half of IBM PC code page 437.
static CP437_HIGH: [u16; 128] = [
    0x00C7, 0x00FC, 0x00E9, 0x00E2, 0x00E4, 0x00E0, 0x00E5, 0x00E7, 0x00EA, 0x00EB, 0x00E8, 0x00EF,
    0x00EE, 0x00EC, 0x00C4, 0x00C5, 0x00C9, 0x00E6, 0x00C6, 0x00F4, 0x00F6, 0x00F2, 0x00FB, 0x00F9,
    0x00FF, 0x00D6, 0x00DC, 0x00A2, 0x00A3, 0x00A5, 0x20A7, 0x0192, 0x00E1, 0x00ED, 0x00F3, 0x00FA,
    0x00F1, 0x00D1, 0x00AA, 0x00BA, 0x00BF, 0x2310, 0x00AC, 0x00BD, 0x00BC, 0x00A1, 0x00AB, 0x00BB,
    0x2591, 0x2592, 0x2593, 0x2502, 0x2524, 0x2561, 0x2562, 0x2556, 0x2555, 0x2563, 0x2551, 0x2557,
    0x255D, 0x255C, 0x255B, 0x2510, 0x2514, 0x2534, 0x252C, 0x251C, 0x2500, 0x253C, 0x255E, 0x255F,
    0x255A, 0x2554, 0x2569, 0x2566, 0x2560, 0x2550, 0x256C, 0x2567, 0x2568, 0x2564, 0x2565, 0x2559,
    0x2558, 0x2552, 0x2553, 0x256B, 0x256A, 0x2518, 0x250C, 0x2588, 0x2584, 0x258C, 0x2590, 0x2580,
    0x03B1, 0x00DF, 0x0393, 0x03C0, 0x03A3, 0x03C3, 0x00B5, 0x03C4, 0x03A6, 0x0398, 0x03A9, 0x03B4,
    0x221E, 0x03C6, 0x03B5, 0x2229, 0x2261, 0x00B1, 0x2265, 0x2264, 0x2320, 0x2321, 0x00F7, 0x2248,
    0x00B0, 0x2219, 0x00B7, 0x221A, 0x207F, 0x00B2, 0x25A0, 0x00A0,
];

/// Upper half of IBM PC code page 850 (DOS Latin 1).
static CP850_HIGH: [u16; 128] = [
    0x00C7, 0x00FC, 0x00E9, 0x00E2, 0x00E4, 0x00E0, 0x00E5, 0x00E7, 0x00EA, 0x00EB, 0x00E8, 0x00EF,
    0x00EE, 0x00EC, 0x00C4, 0x00C5, 0x00C9, 0x00E6, 0x00C6, 0x00F4, 0x00F6, 0x00F2, 0x00FB, 0x00F9,
    0x00FF, 0x00D6, 0x00DC, 0x00F8, 0x00A3, 0x00D8, 0x00D7, 0x0192, 0x00E1, 0x00ED, 0x00F3, 0x00FA,
    0x00F1, 0x00D1, 0x00AA, 0x00BA, 0x00BF, 0x00AE, 0x00AC, 0x00BD, 0x00BC, 0x00A1, 0x00AB, 0x00BB,
    0x2591, 0x2592, 0x2593, 0x2502, 0x2524, 0x00C1, 0x00C2, 0x00C0, 0x00A9, 0x2563, 0x2551, 0x2557,
    0x255D, 0x00A2, 0x00A5, 0x2510, 0x2514, 0x2534, 0x252C, 0x251C, 0x2500, 0x253C, 0x00E3, 0x00C3,
    0x255A, 0x2554, 0x2569, 0x2566, 0x2560, 0x2550, 0x256C, 0x00A4, 0x00F0, 0x00D0, 0x00CA, 0x00CB,
    0x00C8, 0x0131, 0x00CD, 0x00CE, 0x00CF, 0x2518, 0x250C, 0x2588, 0x2584, 0x00A6, 0x00CC, 0x2580,
    0x00D3, 0x00DF, 0x00D4, 0x00D2, 0x00F5, 0x00D5, 0x00B5, 0x00FE, 0x00DE, 0x00DA, 0x00DB, 0x00D9,
    0x00FD, 0x00DD, 0x00AF, 0x00B4, 0x00AD, 0x00B1, 0x2017, 0x00BE, 0x00B6, 0x00A7, 0x00F7, 0x00B8,
    0x00B0, 0x00A8, 0x00B7, 0x00B9, 0x00B3, 0x00B2, 0x25A0, 0x00A0,
];

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(codepage: u16, bytes: &[u8]) -> Vec<u16> {
        let mut out = Vec::new();
        codepage_decoder(codepage)
            .unwrap()
            .decode_into(bytes, &mut out)
            .unwrap();
        out
    }

    #[test]
    fn test_codepage_to_encoding_common() {
        assert_eq!(codepage_to_encoding(1252).unwrap().name(), "windows-1252");
        assert_eq!(codepage_to_encoding(10000).unwrap().name(), "macintosh");
        assert_eq!(codepage_to_encoding(932).unwrap().name(), "Shift_JIS");
    }

    #[test]
    fn test_codepage_to_encoding_unsupported() {
        assert!(codepage_to_encoding(437).is_none());
        assert!(codepage_to_encoding(1361).is_none());
        assert!(codepage_decoder(1361).is_none());
    }

    #[test]
    fn test_charset_mapping() {
        assert_eq!(charset_to_codepage(0), Some(1252));
        assert_eq!(charset_to_codepage(1), None);
        assert_eq!(charset_to_codepage(2), Some(CP_SYMBOL));
        assert_eq!(charset_to_codepage(128), Some(932));
        assert_eq!(charset_to_codepage(204), Some(1251));
        assert_eq!(charset_to_codepage(999), None);
    }

    #[test]
    fn test_decode_windows_1252() {
        assert_eq!(decode(1252, b"caf\xe9"), vec![0x63, 0x61, 0x66, 0xE9]);
        assert_eq!(decode(1252, b"\x80"), vec![0x20AC]);
    }

    #[test]
    fn test_decode_double_byte() {
        // "日本" in Shift-JIS
        assert_eq!(decode(932, b"\x93\xfa\x96\x7b"), vec![0x65E5, 0x672C]);
    }

    #[test]
    fn test_decode_oem_tables() {
        assert_eq!(decode(437, b"A\x82\xe1"), vec![0x41, 0xE9, 0xDF]);
        assert_eq!(decode(850, b"\x9b\xb5"), vec![0xF8, 0xC1]);
    }

    #[test]
    fn test_decode_symbol() {
        assert_eq!(decode(CP_SYMBOL, b"\x09a\xb7"), vec![0x09, 0xF061, 0xF0B7]);
    }

    #[test]
    fn test_decode_to_string() {
        let decoder = codepage_decoder(1251).unwrap();
        assert_eq!(decoder.decode_to_string(b"\xcf\xf0\xe8").unwrap(), "При");
    }
}
