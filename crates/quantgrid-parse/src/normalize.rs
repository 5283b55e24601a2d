//! Canonicalization of platform punctuation ahead of lexing.
//!
//! Editing surfaces feed us text containing smart quotes, typographic
//! dashes, the Unicode minus, and exotic spaces; everything the grammar
//! cares about is folded to its ASCII equivalent here.

use std::borrow::Cow;

fn fold(c: char) -> Option<char> {
    match c {
        // Minus sign, hyphen variants, en/em dashes.
        '\u{2212}' | '\u{2010}' | '\u{2011}' | '\u{2013}' | '\u{2014}' => Some('-'),
        // Smart quotes.
        '\u{2018}' | '\u{2019}' => Some('\''),
        '\u{201C}' | '\u{201D}' => Some('"'),
        // Multiplication/division signs.
        '\u{00D7}' | '\u{22C5}' => Some('*'),
        '\u{00F7}' => Some('/'),
        // Non-breaking and typographic spaces.
        '\u{00A0}' | '\u{2009}' | '\u{202F}' | '\u{2002}' | '\u{2003}' => Some(' '),
        _ => None,
    }
}

/// Fold typographic punctuation to canonical ASCII. Borrows when no folding
/// is needed, which is the common case.
pub fn normalize_text(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|c| fold(c).is_some()) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.chars().map(|c| fold(c).unwrap_or(c)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_borrows() {
        let out = normalize_text("A = 5 in");
        assert!(matches!(out, Cow::Borrowed(_)));
    }

    #[test]
    fn folds_minus_and_times() {
        assert_eq!(normalize_text("5 \u{2212} 3"), "5 - 3");
        assert_eq!(normalize_text("2 \u{00D7} 4"), "2 * 4");
        assert_eq!(normalize_text("8 \u{00F7} 2"), "8 / 2");
    }

    #[test]
    fn folds_quotes_and_spaces() {
        assert_eq!(normalize_text("\u{201C}x\u{201D}"), "\"x\"");
        assert_eq!(normalize_text("5\u{00A0}in"), "5 in");
    }
}
