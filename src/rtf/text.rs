//! Text accumulator.
//!
//! Collects the text of the run being built as UTF-16. Bytes in a legacy
//! code page are held back until the code page changes or the text is
//! borrowed, so the lead and trail bytes of a double-byte character that
//! arrive as separate `\'hh` escapes decode together.

use super::error::RtfResult;
use crate::common::encoding::{CodePageDecoder, codepage_decoder};
use smallvec::SmallVec;
use tracing::warn;

/// Encoding of a unit pushed into the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    /// A UTF-16 code unit
    Utf16,
    /// A byte in the given code page
    CodePage(u16),
}

#[derive(Debug, Default)]
pub struct TextAccumulator {
    output: Vec<u16>,
    pending: SmallVec<[u8; 64]>,
    pending_codepage: Option<u16>,
    reported: SmallVec<[u16; 4]>,
}

impl TextAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one unit of text.
    ///
    /// For [`TextEncoding::Utf16`] the low 16 bits of `unit` are a code
    /// unit; for [`TextEncoding::CodePage`] the low 8 bits are a byte.
    pub fn push(&mut self, unit: u16, encoding: TextEncoding) -> RtfResult<()> {
        match encoding {
            TextEncoding::Utf16 => {
                self.decode_pending()?;
                self.output.try_reserve(1)?;
                self.output.push(unit);
            },
            TextEncoding::CodePage(codepage) => {
                if self.pending_codepage != Some(codepage) {
                    self.decode_pending()?;
                    self.pending_codepage = Some(codepage);
                }
                self.pending.push(unit as u8);
            },
        }
        Ok(())
    }

    /// Decode everything pending and return the text so far.
    pub fn borrow(&mut self) -> RtfResult<&[u16]> {
        self.decode_pending()?;
        Ok(&self.output)
    }

    /// Drop all text, decoded or not.
    pub fn clear(&mut self) {
        self.output.clear();
        self.pending.clear();
        self.pending_codepage = None;
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.output.is_empty() && self.pending.is_empty()
    }

    fn decode_pending(&mut self) -> RtfResult<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let codepage = self.pending_codepage.unwrap_or(0);
        let decoder = match codepage_decoder(codepage) {
            Some(decoder) => decoder,
            None => {
                if !self.reported.contains(&codepage) {
                    warn!(codepage, "unsupported code page, decoding as windows-1252");
                    self.reported.push(codepage);
                }
                CodePageDecoder::Encoding(encoding_rs::WINDOWS_1252)
            },
        };
        decoder.decode_into(&self.pending, &mut self.output)?;
        self.pending.clear();
        Ok(())
    }
}
