//! The ordered symbol set the Caesar shift operates on.
//!
//! Symbols outside the alphabet are never shifted; they pass through a
//! transform unchanged.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Ordered alphabet: lowercase Cyrillic, punctuation and space, uppercase
/// Cyrillic, then ASCII digits.
pub const ALPHABET: &str = concat!(
    "абвгдеёжзийклмнопрстуфхцчшщъыьэюя",
    ":,\"?-—.! ",
    "АБВГДЕЁЖЗИЙКЛМНОПРСТУФХЦЧШЩЪЫЬЭЮЯ",
    "0123456789",
);

/// Number of symbols in [`ALPHABET`].
pub const ALPHABET_LEN: usize = 85;

static SYMBOLS: LazyLock<Vec<char>> = LazyLock::new(|| ALPHABET.chars().collect());

static POSITIONS: LazyLock<HashMap<char, usize>> = LazyLock::new(|| {
    ALPHABET
        .chars()
        .enumerate()
        .map(|(index, symbol)| (symbol, index))
        .collect()
});

/// Position of `symbol` in the alphabet, if it belongs to it.
pub fn index_of(symbol: char) -> Option<usize> {
    POSITIONS.get(&symbol).copied()
}

/// Symbol at `index`, wrapping around the alphabet length.
pub fn symbol_at(index: usize) -> char {
    SYMBOLS
        .get(index % ALPHABET_LEN)
        .copied()
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Reduce a signed key to a forward offset in `0..ALPHABET_LEN`.
pub fn offset(key: i64) -> usize {
    // rem_euclid keeps the result non-negative, so the cast is lossless
    key.rem_euclid(ALPHABET_LEN as i64) as usize
}

/// Shift a single character forward by `offset` positions.
pub fn shift(symbol: char, offset: usize) -> char {
    match index_of(symbol) {
        Some(index) => symbol_at(index + offset),
        None => symbol,
    }
}
