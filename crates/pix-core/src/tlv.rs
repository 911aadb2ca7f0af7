//! Tag-length-value framing with two-digit decimal tags and lengths.
//!
//! Lengths count characters, not bytes. A field is `tag ++ len ++ value`
//! where `len` is the zero-padded character count of `value`.

use crate::error::{PixError, Result};
use crate::ids::MAX_VALUE_LEN;

const HEADER_LEN: usize = 4;

/// One field located by [`parse_fields`], borrowing from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    pub tag: &'a str,
    pub value: &'a str,
    /// Byte offset of the tag within the outermost parsed string.
    pub offset: usize,
}

impl<'a> Field<'a> {
    /// Tokenizes this field's value as a nested TLV sequence.
    pub fn children(&self) -> Result<Vec<Field<'a>>> {
        parse_fields_at(self.value, self.offset + HEADER_LEN)
    }
}

/// Frames `value` under `tag`.
pub fn frame(tag: &str, value: &str) -> Result<String> {
    let length = value.chars().count();
    if length > MAX_VALUE_LEN {
        return Err(PixError::ValueTooLong {
            tag: tag.to_string(),
            length,
        });
    }

    Ok(format!("{tag}{length:02}{value}"))
}

/// Walks `input` as a flat sequence of fields, consuming exactly the
/// declared length of each one.
pub fn parse_fields(input: &str) -> Result<Vec<Field<'_>>> {
    parse_fields_at(input, 0)
}

/// Last field carrying `tag`, if any.
pub fn find_last<'a>(fields: &[Field<'a>], tag: &str) -> Option<Field<'a>> {
    fields.iter().rev().find(|field| field.tag == tag).copied()
}

fn parse_fields_at(input: &str, base: usize) -> Result<Vec<Field<'_>>> {
    let mut fields = Vec::new();
    let mut cursor = 0;

    while cursor < input.len() {
        let offset = base + cursor;
        let rest = &input[cursor..];
        let header = rest
            .as_bytes()
            .get(..HEADER_LEN)
            .ok_or_else(|| PixError::malformed(offset, "truncated field header"))?;

        if !header[..2].iter().all(u8::is_ascii_digit) {
            return Err(PixError::malformed(offset, "tag is not two decimal digits"));
        }
        if !header[2..].iter().all(u8::is_ascii_digit) {
            return Err(PixError::malformed(
                offset + 2,
                "length is not two decimal digits",
            ));
        }

        let length = usize::from(header[2] - b'0') * 10 + usize::from(header[3] - b'0');
        let body = &rest[HEADER_LEN..];
        let value_len = byte_len_of_chars(body, length).ok_or_else(|| {
            PixError::malformed(
                offset + 2,
                format!(
                    "declared length {length} exceeds the {} characters remaining",
                    body.chars().count()
                ),
            )
        })?;

        fields.push(Field {
            tag: &rest[..2],
            value: &body[..value_len],
            offset,
        });
        cursor += HEADER_LEN + value_len;
    }

    Ok(fields)
}

fn byte_len_of_chars(s: &str, count: usize) -> Option<usize> {
    if count == 0 {
        return Some(0);
    }
    s.char_indices()
        .nth(count - 1)
        .map(|(index, ch)| index + ch.len_utf8())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{find_last, frame, parse_fields, Field};
    use crate::error::PixError;

    #[test]
    fn frame_pads_length_to_two_digits() {
        assert_eq!(frame("00", "01").unwrap(), "000201");
        assert_eq!(frame("62", "").unwrap(), "6200");
        assert_eq!(frame("58", "BR").unwrap(), "5802BR");
    }

    #[test]
    fn frame_accepts_exactly_99_characters() {
        let value = "a".repeat(99);
        let framed = frame("26", &value).unwrap();
        assert_eq!(&framed[..4], "2699");
        assert_eq!(framed.len(), 103);
    }

    #[test]
    fn frame_rejects_100_characters() {
        let err = frame("26", &"a".repeat(100)).unwrap_err();
        assert!(matches!(
            err,
            PixError::ValueTooLong { ref tag, length: 100 } if tag == "26"
        ));
    }

    #[test]
    fn frame_counts_characters_not_bytes() {
        assert_eq!(frame("59", "São").unwrap(), "5903São");
    }

    #[test]
    fn parses_flat_sequence() {
        let fields = parse_fields("0002015802BR6000").unwrap();
        assert_eq!(
            fields,
            vec![
                Field { tag: "00", value: "01", offset: 0 },
                Field { tag: "58", value: "BR", offset: 6 },
                Field { tag: "60", value: "", offset: 12 },
            ]
        );
    }

    #[test]
    fn children_report_absolute_offsets() {
        let fields = parse_fields("00020126080a020ab1").unwrap();
        assert!(matches!(
            fields[1].children().unwrap_err(),
            PixError::Malformed { offset: 10, .. }
        ));

        let fields = parse_fields("00020126080004abcd").unwrap();
        let nested = fields[1].children().unwrap();
        assert_eq!(nested, vec![Field { tag: "00", value: "abcd", offset: 10 }]);
    }

    #[test]
    fn rejects_length_past_end_of_input() {
        let err = parse_fields("5910John").unwrap_err();
        assert!(matches!(err, PixError::Malformed { offset: 2, .. }));
    }

    #[test]
    fn rejects_non_numeric_header() {
        assert!(matches!(
            parse_fields("5A02BR").unwrap_err(),
            PixError::Malformed { offset: 0, .. }
        ));
        assert!(matches!(
            parse_fields("58x2BR").unwrap_err(),
            PixError::Malformed { offset: 2, .. }
        ));
        assert!(matches!(
            parse_fields("000201580").unwrap_err(),
            PixError::Malformed { offset: 6, .. }
        ));
    }

    #[test]
    fn parses_multibyte_values_by_character_count() {
        let fields = parse_fields("5903São6002SP").unwrap();
        assert_eq!(fields[0].value, "São");
        assert_eq!(fields[1].value, "SP");
        assert_eq!(fields[1].offset, 8);
    }

    #[test]
    fn find_last_prefers_last_occurrence() {
        let fields = parse_fields("5402105402205802BR").unwrap();
        assert_eq!(find_last(&fields, "54").unwrap().value, "20");
        assert!(find_last(&fields, "59").is_none());
    }

    proptest! {
        #[test]
        fn declared_length_matches_value(tag in 0u8..100, value in "[ -~]{0,99}") {
            let tag = format!("{tag:02}");
            let framed = frame(&tag, &value).unwrap();
            let declared: usize = framed[2..4].parse().unwrap();
            prop_assert_eq!(declared, value.chars().count());

            let fields = parse_fields(&framed).unwrap();
            prop_assert_eq!(fields.len(), 1);
            prop_assert_eq!(fields[0].tag, tag.as_str());
            prop_assert_eq!(fields[0].value, value.as_str());
        }
    }
}
