//! A1-style cell addressing: column-label/index conversion and address
//! parsing for spreadsheet references.

use once_cell::sync::Lazy;
use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Precomputed labels for the common range A..ZZ (702 columns).
static COLUMN_LOOKUP: Lazy<Vec<String>> = Lazy::new(|| {
    let mut cols = Vec::with_capacity(702);
    for c in b'A'..=b'Z' {
        cols.push(String::from(c as char));
    }
    for c1 in b'A'..=b'Z' {
        for c2 in b'A'..=b'Z' {
            cols.push(format!("{}{}", c1 as char, c2 as char));
        }
    }
    cols
});

/// Zero-based cell coordinate derived from an A1-style label.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellAddress {
    pub row: u32,
    pub col: u32,
}

impl CellAddress {
    pub const fn new(row: u32, col: u32) -> Self {
        CellAddress { row, col }
    }

    /// The A1 label for this address, e.g. `{row: 9, col: 25}` → `Z10`.
    pub fn label(&self) -> String {
        format!("{}{}", index_to_col(self.col), self.row + 1)
    }
}

impl Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Base-26 letters-as-digits column conversion, `A` = 0, `Z` = 25, `AA` = 26.
/// Returns `None` for empty or non-alphabetic input.
pub fn col_label_to_index(label: &str) -> Option<u32> {
    let bytes = label.as_bytes();
    if bytes.is_empty() {
        return None;
    }
    let mut result = 0u32;
    for &b in bytes {
        if !b.is_ascii_alphabetic() {
            return None;
        }
        result = result
            .checked_mul(26)?
            .checked_add((b.to_ascii_uppercase() - b'A' + 1) as u32)?;
    }
    Some(result - 1)
}

/// Exact inverse of [`col_label_to_index`].
pub fn index_to_col(index: u32) -> String {
    if (index as usize) < COLUMN_LOOKUP.len() {
        return COLUMN_LOOKUP[index as usize].clone();
    }

    let mut num = index + 1;
    let mut result = String::with_capacity(3);
    while num > 0 {
        num -= 1;
        result.insert(0, ((num % 26) as u8 + b'A') as char);
        num /= 26;
    }
    result
}

/// Parse an A1-style address: `[A-Za-z]+[1-9][0-9]*`, case-insensitive.
/// Anything else yields `None`; this never panics.
pub fn parse_address(text: &str) -> Option<CellAddress> {
    let bytes = text.as_bytes();
    let mut i = 0;

    while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
        i += 1;
    }
    if i == 0 || i == bytes.len() {
        return None;
    }

    let col = col_label_to_index(&text[..i])?;

    let digits = &bytes[i..];
    if digits[0] == b'0' || !digits.iter().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let row_1based: u32 = text[i..].parse().ok()?;

    Some(CellAddress::new(row_1based - 1, col))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn label_round_trips() {
        for label in ["A", "Z", "AA", "AZ", "BA", "ZZ", "AAA"] {
            let idx = col_label_to_index(label).unwrap();
            assert_eq!(index_to_col(idx), label, "round trip for {label}");
        }
        assert_eq!(col_label_to_index("A"), Some(0));
        assert_eq!(col_label_to_index("Z"), Some(25));
        assert_eq!(col_label_to_index("AA"), Some(26));
    }

    #[test]
    fn parse_accepts_valid_addresses() {
        assert_eq!(parse_address("Z10"), Some(CellAddress::new(9, 25)));
        assert_eq!(parse_address("a1"), Some(CellAddress::new(0, 0)));
        assert_eq!(parse_address("AA99"), Some(CellAddress::new(98, 26)));
    }

    #[test]
    fn parse_rejects_malformed_input() {
        for bad in ["invalid", "", "A", "10", "A0", "A01", "A1B", "$A$1", "A 1"] {
            assert_eq!(parse_address(bad), None, "should reject {bad:?}");
        }
    }

    #[test]
    fn address_label_renders_a1() {
        assert_eq!(CellAddress::new(9, 25).to_string(), "Z10");
        assert_eq!(CellAddress::new(0, 26).to_string(), "AA1");
    }

    proptest! {
        #[test]
        fn index_label_round_trip(index in 0u32..200_000) {
            let label = index_to_col(index);
            prop_assert_eq!(col_label_to_index(&label), Some(index));
        }

        #[test]
        fn parsed_addresses_round_trip(row in 0u32..100_000, col in 0u32..20_000) {
            let addr = CellAddress::new(row, col);
            prop_assert_eq!(parse_address(&addr.label()), Some(addr));
        }
    }
}
