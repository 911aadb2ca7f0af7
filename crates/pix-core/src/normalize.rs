//! Display-name normalization for the merchant name field.

use crate::ids::MERCHANT_NAME_MAX_CHARS;

/// Cuts `name` to 25 characters, then title-cases what is left.
pub fn normalize_merchant_name(name: &str) -> String {
    let truncated: String = name.chars().take(MERCHANT_NAME_MAX_CHARS).collect();
    title_case(&truncated)
}

/// Title-cases the first cased character of every word and lower-cases
/// the rest. Any character without case (space, digit, apostrophe) ends a
/// word. Titlecase letters (Unicode `Lt`) count as cased.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_word = false;

    for ch in input.chars() {
        let cased = ch.is_uppercase() || ch.is_lowercase() || is_titlecase(ch);
        if !cased {
            out.push(ch);
            in_word = false;
        } else if in_word {
            out.extend(ch.to_lowercase());
        } else {
            push_titlecase(&mut out, ch);
            in_word = true;
        }
    }

    out
}

/// Titlecase mapping of a word-initial character. `Lt` letters stay as
/// they are and the Latin digraphs map to their `Lt` form. Otherwise the
/// first character of the uppercase expansion is kept and the rest
/// lower-cased, so `ß` becomes `Ss`. Lowercase Greek letters with
/// iota subscript come out as capital plus small iota rather than their
/// single `Lt` code point.
fn push_titlecase(out: &mut String, ch: char) {
    if is_titlecase(ch) {
        out.push(ch);
        return;
    }

    let digraph = match ch {
        '\u{01C4}'..='\u{01C6}' => Some('\u{01C5}'),
        '\u{01C7}'..='\u{01C9}' => Some('\u{01C8}'),
        '\u{01CA}'..='\u{01CC}' => Some('\u{01CB}'),
        '\u{01F1}'..='\u{01F3}' => Some('\u{01F2}'),
        _ => None,
    };
    if let Some(title) = digraph {
        out.push(title);
        return;
    }

    let mut upper = ch.to_uppercase();
    if let Some(first) = upper.next() {
        out.push(first);
    }
    for rest in upper {
        out.extend(rest.to_lowercase());
    }
}

fn is_titlecase(ch: char) -> bool {
    matches!(
        ch,
        '\u{01C5}'
            | '\u{01C8}'
            | '\u{01CB}'
            | '\u{01F2}'
            | '\u{1F88}'..='\u{1F8F}'
            | '\u{1F98}'..='\u{1F9F}'
            | '\u{1FA8}'..='\u{1FAF}'
            | '\u{1FBC}'
            | '\u{1FCC}'
            | '\u{1FFC}'
    )
}
