//! RTF field support (hyperlinks, anchors, metadata).
//!
//! RTF fields are structured as:
//! {\field{\*\fldinst FIELD_INSTRUCTION}{\fldrslt FIELD_RESULT}}
//!
//! The instruction is a type word followed by quoted data:
//! - HYPERLINK "target": the result text links to `target`
//! - LCANCHOR "name": the result text is an anchor named `name`
//! - LCMETADATA "text": run-level metadata for the result text
//! - LCLINEMETADATA "text": metadata for the enclosing paragraph

use memchr::memchr;

/// Field type in RTF documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Hyperlink field
    Hyperlink,
    /// Link target without link styling
    Anchor,
    /// Run metadata
    Metadata,
    /// Paragraph metadata
    LineMetadata,
    /// Unknown or custom field
    Unknown,
}

impl FieldType {
    /// Classify a field type word, ignoring case.
    pub fn from_name(name: &[u8]) -> Self {
        if name.eq_ignore_ascii_case(b"HYPERLINK") {
            FieldType::Hyperlink
        } else if name.eq_ignore_ascii_case(b"LCANCHOR") {
            FieldType::Anchor
        } else if name.eq_ignore_ascii_case(b"LCMETADATA") {
            FieldType::Metadata
        } else if name.eq_ignore_ascii_case(b"LCLINEMETADATA") {
            FieldType::LineMetadata
        } else {
            FieldType::Unknown
        }
    }
}

/// Parsed `\fldinst` text.
///
/// `data` is still in the document's code page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInstruction<'a> {
    pub field_type: FieldType,
    pub data: &'a [u8],
}

impl<'a> FieldInstruction<'a> {
    /// Parse a raw field instruction.
    ///
    /// Returns `None` for malformed instructions: no data after the type
    /// word, data that is not quoted, or a missing closing quote. Switches
    /// after the quoted data are ignored.
    pub fn parse(instruction: &'a [u8]) -> Option<Self> {
        let start = instruction.iter().position(|b| !b.is_ascii_whitespace())?;
        let rest = &instruction[start..];

        let type_end = memchr(b' ', rest)?;
        let name = &rest[..type_end];

        let after = &rest[type_end..];
        let data_start = after.iter().position(|b| !b.is_ascii_whitespace())?;
        let quoted = after[data_start..].strip_prefix(b"\"")?;
        let data_end = memchr(b'"', quoted)?;

        Some(Self {
            field_type: FieldType::from_name(name),
            data: &quoted[..data_end],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hyperlink() {
        let field = FieldInstruction::parse(br#"HYPERLINK "https://example.com""#).unwrap();
        assert_eq!(field.field_type, FieldType::Hyperlink);
        assert_eq!(field.data, b"https://example.com");
    }

    #[test]
    fn test_parse_hyperlink_with_switches() {
        let field =
            FieldInstruction::parse(br#"  HYPERLINK   "https://example.com" \o "Click here""#)
                .unwrap();
        assert_eq!(field.field_type, FieldType::Hyperlink);
        assert_eq!(field.data, b"https://example.com");
    }

    #[test]
    fn test_type_is_case_insensitive() {
        let field = FieldInstruction::parse(br#"lcAnchor "top""#).unwrap();
        assert_eq!(field.field_type, FieldType::Anchor);

        let field = FieldInstruction::parse(br#"LCMETADATA "tag""#).unwrap();
        assert_eq!(field.field_type, FieldType::Metadata);

        let field = FieldInstruction::parse(br#"LcLineMetadata "line""#).unwrap();
        assert_eq!(field.field_type, FieldType::LineMetadata);
    }

    #[test]
    fn test_unknown_type() {
        let field = FieldInstruction::parse(br#"PAGE "x""#).unwrap();
        assert_eq!(field.field_type, FieldType::Unknown);
    }

    #[test]
    fn test_malformed_instructions() {
        assert_eq!(FieldInstruction::parse(b""), None);
        assert_eq!(FieldInstruction::parse(b"   "), None);
        assert_eq!(FieldInstruction::parse(b"HYPERLINK"), None);
        assert_eq!(FieldInstruction::parse(b"HYPERLINK "), None);
        assert_eq!(FieldInstruction::parse(b"HYPERLINK http://x"), None);
        assert_eq!(FieldInstruction::parse(br#"HYPERLINK "http://x"#), None);
    }

    #[test]
    fn test_empty_data() {
        let field = FieldInstruction::parse(br#"HYPERLINK """#).unwrap();
        assert!(field.data.is_empty());
    }
}
