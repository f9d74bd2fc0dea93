//! Owned styled document.

use super::config::ReaderOptions;
use super::error::RtfResult;
use super::reader::{StyledTextSink, read_rtf};
use super::types::{Paragraph, TextAttributes, TextRun};
use serde::{Deserialize, Serialize};

/// A run of text with owned attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledRun {
    pub text: String,
    pub attributes: TextAttributes,
}

/// A paragraph and the runs it holds.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StyledParagraph {
    pub style: Paragraph,
    pub runs: Vec<StyledRun>,
}

impl StyledParagraph {
    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

/// RTF document read into owned paragraphs and runs.
///
/// # Examples
///
/// ```rust
/// use rtf_styled::rtf::StyledDocument;
///
/// let doc = StyledDocument::parse(r"{\rtf1\ansi Hello {\b World}!\par}")?;
/// assert_eq!(doc.text(), "Hello World!");
/// assert_eq!(doc.paragraphs()[0].runs.len(), 3);
/// # Ok::<(), rtf_styled::rtf::RtfError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StyledDocument {
    paragraphs: Vec<StyledParagraph>,
}

impl StyledDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an RTF document from a string.
    pub fn parse(input: &str) -> RtfResult<Self> {
        Self::from_bytes(input.as_bytes())
    }

    /// Parse an RTF document from bytes with default options.
    pub fn from_bytes(bytes: &[u8]) -> RtfResult<Self> {
        Self::from_bytes_with_options(bytes, &ReaderOptions::default())
    }

    pub fn from_bytes_with_options(bytes: &[u8], options: &ReaderOptions) -> RtfResult<Self> {
        let mut document = Self::new();
        read_rtf(bytes, options, &mut document)?;
        Ok(document)
    }

    /// Plain text, one line per paragraph.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(StyledParagraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[inline]
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    #[inline]
    pub fn paragraphs(&self) -> &[StyledParagraph] {
        &self.paragraphs
    }

    /// All runs in document order.
    pub fn runs(&self) -> impl Iterator<Item = &StyledRun> {
        self.paragraphs.iter().flat_map(|paragraph| paragraph.runs.iter())
    }
}

impl StyledTextSink for StyledDocument {
    fn paragraph(&mut self, paragraph: &Paragraph) {
        self.paragraphs.push(StyledParagraph {
            style: paragraph.clone(),
            runs: Vec::new(),
        });
    }

    fn text_run(&mut self, run: &TextRun<'_>) {
        if self.paragraphs.is_empty() {
            self.paragraphs.push(StyledParagraph::default());
        }
        if let Some(paragraph) = self.paragraphs.last_mut() {
            paragraph.runs.push(StyledRun {
                text: run.text(),
                attributes: run.attributes.clone(),
            });
        }
    }
}
