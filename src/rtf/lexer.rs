//! RTF lexer/tokenizer.
//!
//! The lexer walks the raw input bytes and yields one [`Token`] per call to
//! [`Lexer::next_token`]. Text is not decoded here: every literal byte,
//! including the result of a `\'hh` escape, is handed on as
//! [`Token::Character`] and interpreted later under the active code page.

use super::error::{RtfError, RtfResult};
use super::keyword::{self, Keyword};

/// Longest accepted control word, in letters.
pub const MAX_KEYWORD_LEN: usize = 32;

/// Longest accepted numeric parameter, including the sign.
pub const MAX_PARAMETER_LEN: usize = 20;

/// Token types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Opening brace
    BeginGroup,
    /// Closing brace
    EndGroup,
    /// Literal byte, escaped byte or hex escape
    Character(u8),
    /// Control word or control symbol with optional parameter
    Control {
        keyword: Keyword,
        parameter: Option<i32>,
    },
    /// End of input
    End,
}

/// Byte-oriented RTF lexer.
pub struct Lexer<'a> {
    /// Source input
    input: &'a [u8],
    /// Current position in bytes
    pos: usize,
    /// Start offset of the last token
    token_start: usize,
    /// Bytes left in the current `\bin` run
    binary_remaining: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer.
    #[inline]
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            token_start: 0,
            binary_remaining: 0,
        }
    }

    /// Byte offset at which the most recent token started.
    #[inline]
    pub fn offset(&self) -> usize {
        self.token_start
    }

    /// Whether the lexer is inside a `\bin` run.
    #[inline]
    pub fn in_binary(&self) -> bool {
        self.binary_remaining > 0
    }

    /// Discard the rest of the current `\bin` run.
    pub fn skip_binary(&mut self) {
        self.pos = self.pos.saturating_add(self.binary_remaining).min(self.input.len());
        self.binary_remaining = 0;
    }

    /// Tokenize the entire input.
    pub fn tokenize(&mut self) -> RtfResult<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            if token == Token::End {
                break;
            }
            tokens.push(token);
        }

        Ok(tokens)
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> RtfResult<Token> {
        if self.binary_remaining > 0 {
            return Ok(self.next_binary());
        }

        self.skip_newlines();
        self.token_start = self.pos;

        let Some(&byte) = self.input.get(self.pos) else {
            return Ok(Token::End);
        };

        match byte {
            b'{' => {
                self.pos += 1;
                Ok(Token::BeginGroup)
            },
            b'}' => {
                self.pos += 1;
                Ok(Token::EndGroup)
            },
            b'\\' => self.parse_control(),
            _ => {
                self.pos += 1;
                Ok(Token::Character(byte))
            },
        }
    }

    /// Emit one byte of a `\bin` run verbatim.
    fn next_binary(&mut self) -> Token {
        self.token_start = self.pos;
        match self.input.get(self.pos) {
            Some(&byte) => {
                self.pos += 1;
                self.binary_remaining -= 1;
                Token::Character(byte)
            },
            None => {
                self.binary_remaining = 0;
                Token::End
            },
        }
    }

    /// Parse a control word, control symbol or escape.
    fn parse_control(&mut self) -> RtfResult<Token> {
        self.pos += 1; // Skip '\'

        let Some(&ch) = self.input.get(self.pos) else {
            return Err(RtfError::IncompleteKeyword { offset: self.pos });
        };

        match ch {
            b'\\' | b'{' | b'}' => {
                self.pos += 1;
                Ok(Token::Character(ch))
            },
            b'\'' => {
                self.pos += 1;
                self.parse_hex_char()
            },
            _ if ch.is_ascii_alphabetic() => self.parse_control_word(),
            _ => {
                // Control symbol: a single non-letter, no parameter
                self.pos += 1;
                Ok(Token::Control {
                    keyword: keyword::lookup(&[ch]),
                    parameter: None,
                })
            },
        }
    }

    /// Parse a control word with its optional parameter and delimiter.
    fn parse_control_word(&mut self) -> RtfResult<Token> {
        let start = self.pos;
        while self.input.get(self.pos).is_some_and(u8::is_ascii_alphabetic) {
            if self.pos - start == MAX_KEYWORD_LEN {
                return Err(RtfError::KeywordTooLong { offset: start });
            }
            self.pos += 1;
        }
        let word = &self.input[start..self.pos];

        let parameter = self.parse_numeric_parameter()?;

        // Skip optional space delimiter after control word
        if self.input.get(self.pos) == Some(&b' ') {
            self.pos += 1;
        }

        let keyword = keyword::lookup(word);
        if keyword == Keyword::Binary
            && let Some(count) = parameter
            && count > 0
        {
            self.binary_remaining = count as usize;
        }

        Ok(Token::Control { keyword, parameter })
    }

    /// Parse numeric parameter after control word.
    ///
    /// Values that do not fit an `i32` wrap.
    fn parse_numeric_parameter(&mut self) -> RtfResult<Option<i32>> {
        let start = self.pos;
        let negative = match self.input.get(self.pos) {
            Some(b'-') => {
                self.pos += 1;
                true
            },
            Some(ch) if ch.is_ascii_digit() => false,
            _ => return Ok(None),
        };

        let mut value: i32 = 0;
        while let Some(&ch) = self.input.get(self.pos) {
            if !ch.is_ascii_digit() {
                break;
            }
            if self.pos - start == MAX_PARAMETER_LEN {
                return Err(RtfError::ParameterTooLong { offset: start });
            }
            value = value.wrapping_mul(10).wrapping_add((ch - b'0') as i32);
            self.pos += 1;
        }

        Ok(Some(if negative { value.wrapping_neg() } else { value }))
    }

    /// Parse hexadecimal character escape (\').
    fn parse_hex_char(&mut self) -> RtfResult<Token> {
        let high = self.parse_nibble()?;
        let low = self.parse_nibble()?;
        Ok(Token::Character((high << 4) | low))
    }

    fn parse_nibble(&mut self) -> RtfResult<u8> {
        let Some(&ch) = self.input.get(self.pos) else {
            return Err(RtfError::IncompleteKeyword { offset: self.pos });
        };
        let nibble = match ch {
            b'0'..=b'9' => ch - b'0',
            b'a'..=b'f' => ch - b'a' + 10,
            b'A'..=b'F' => ch - b'A' + 10,
            _ => return Err(RtfError::InvalidHex { offset: self.pos }),
        };
        self.pos += 1;
        Ok(nibble)
    }

    /// Skip line breaks between tokens; they carry no meaning in RTF.
    #[inline]
    fn skip_newlines(&mut self) {
        while matches!(self.input.get(self.pos), Some(b'\r' | b'\n')) {
            self.pos += 1;
        }
    }
}
