//! Key recovery for ciphertext of unknown key.
//!
//! Both strategies work on a symbol histogram of the ciphertext, so the text
//! is scanned once no matter how many candidate keys are tried.
//!
//! - [`brute_force_key`] scores the decryption under every possible key by
//!   log-likelihood against Russian character frequencies and keeps the best.
//! - [`frequency_analysis_key`] assumes the most frequent ciphertext symbol
//!   is the most frequent symbol of Russian prose, the space.

use super::alphabet::{ALPHABET_LEN, index_of, symbol_at};

/// Most frequent symbol of the plaintext language.
pub const MOST_FREQUENT_SYMBOL: char = ' ';

/// Probability assigned to symbols with no entry in the frequency table.
const FLOOR_PROBABILITY: f64 = 0.0005;

/// Uppercase letters score as this share of their lowercase probability.
const UPPERCASE_WEIGHT: f64 = 0.05;

/// Occurrence counts per alphabet position.
pub type Histogram = [u64; ALPHABET_LEN];

/// Count alphabet symbols in `text`, ignoring everything else.
pub fn histogram(text: &str) -> Histogram {
    let mut counts = [0u64; ALPHABET_LEN];
    for index in text.chars().filter_map(index_of) {
        if let Some(count) = counts.get_mut(index) {
            *count += 1;
        }
    }
    counts
}

/// Recover the key by trying every shift and keeping the most plausible
/// decryption. Ties go to the smallest key.
pub fn brute_force_key(counts: &Histogram) -> i64 {
    let mut best_key = 0usize;
    let mut best_score = f64::NEG_INFINITY;

    for key in 0..ALPHABET_LEN {
        let score = candidate_score(counts, key);
        if score > best_score {
            best_score = score;
            best_key = key;
        }
    }

    best_key as i64
}

/// Log-likelihood of the plaintext obtained by decrypting with `key`.
fn candidate_score(counts: &Histogram, key: usize) -> f64 {
    counts
        .iter()
        .enumerate()
        .filter(|(_, count)| **count > 0)
        .map(|(index, count)| {
            let plain = symbol_at(index + ALPHABET_LEN - key);
            *count as f64 * expected_frequency(plain).ln()
        })
        .sum()
}

/// Recover the key by aligning the most frequent ciphertext symbol with
/// [`MOST_FREQUENT_SYMBOL`]. Ties go to the lowest alphabet position;
/// a text with no alphabet symbols yields key 0.
pub fn frequency_analysis_key(counts: &Histogram) -> i64 {
    let mut top: Option<(usize, u64)> = None;
    for (index, &count) in counts.iter().enumerate() {
        if count > 0 && top.is_none_or(|(_, best)| count > best) {
            top = Some((index, count));
        }
    }

    let (Some((top_index, _)), Some(anchor)) = (top, index_of(MOST_FREQUENT_SYMBOL)) else {
        return 0;
    };

    ((top_index + ALPHABET_LEN - anchor) % ALPHABET_LEN) as i64
}

/// Relative frequency of `symbol` in Russian prose.
fn expected_frequency(symbol: char) -> f64 {
    if let Some(p) = lowercase_frequency(symbol) {
        return p;
    }
    let mut lower = symbol.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) if l != symbol => {
            lowercase_frequency(l).map_or(FLOOR_PROBABILITY, |p| p * UPPERCASE_WEIGHT)
        }
        _ => FLOOR_PROBABILITY,
    }
}

fn lowercase_frequency(symbol: char) -> Option<f64> {
    let p = match symbol {
        ' ' => 0.175,
        'о' => 0.090,
        'е' => 0.072,
        'а' | 'и' => 0.062,
        'т' | 'н' => 0.053,
        'с' => 0.045,
        'р' => 0.040,
        'в' => 0.038,
        'л' => 0.035,
        'к' => 0.028,
        'м' => 0.026,
        'д' => 0.025,
        'п' => 0.023,
        'у' => 0.021,
        'я' => 0.018,
        'ы' | 'з' => 0.016,
        'ь' | 'б' => 0.014,
        'г' => 0.013,
        'ч' => 0.012,
        ',' | '.' => 0.010,
        'й' => 0.010,
        'х' => 0.009,
        'ж' => 0.007,
        'ю' | 'ш' => 0.006,
        'ц' => 0.004,
        'щ' | 'э' => 0.003,
        'ф' => 0.002,
        'ъ' | 'ё' => 0.001,
        _ => return None,
    };
    Some(p)
}
