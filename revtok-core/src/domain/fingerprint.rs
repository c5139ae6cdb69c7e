//! Digital-root fingerprints
//!
//! Every value here is derived with integer arithmetic only. Per-token values
//! use wrapping `u64` arithmetic; whole-text sums are reduced modulo
//! [`WEIGHT_MODULUS`].

use crate::domain::addressing::content_code;
use crate::domain::types::TokenStream;
use std::collections::HashMap;

/// Modulus for whole-text weighted sums
pub const WEIGHT_MODULUS: u64 = 1_000_000_007;

/// Modulus that scales backend numbers down to five digits
pub const BACKEND_SCALE: u64 = 100_000;

/// Repeated decimal digit sum, with 0 mapped to 9
#[inline]
pub fn digital_root(n: u64) -> u8 {
    if n == 0 {
        9
    } else {
        (1 + (n - 1) % 9) as u8
    }
}

/// The one-step embedding perturbation: `digital_root(n)` becomes
/// `digital_root(n + 1)`
#[inline]
pub fn perturb(digit: u8) -> u8 {
    digit % 9 + 1
}

/// Front-end digit of a token id
#[inline]
pub fn frontend_digit(content_id: u64, embedding: bool) -> u8 {
    let digit = digital_root(content_id);
    if embedding {
        perturb(digit)
    } else {
        digit
    }
}

/// Numeric value of an ASCII letter: A..Z map onto 1..9 cyclically
#[inline]
pub fn alphabetic_value(b: u8) -> u64 {
    if b.is_ascii_alphabetic() {
        u64::from(b.to_ascii_uppercase() - b'A') % 9 + 1
    } else {
        0
    }
}

/// Sum of [`alphabetic_value`] over a text
pub fn alphabetic_sum(text: &[u8]) -> u64 {
    text.iter().map(|&b| alphabetic_value(b)).sum()
}

fn weighted_units<I: Iterator<Item = u32>>(units: I) -> (u64, u64) {
    units.fold((0u64, 0u64), |(sum, count), unit| {
        let weight = count + 1;
        (sum.wrapping_add(u64::from(unit).wrapping_mul(weight)), weight)
    })
}

/// Positional weighted sum of code points (or bytes, when the text is not
/// valid UTF-8) together with the number of units
fn weighted_token_sum(text: &[u8]) -> (u64, u64) {
    match std::str::from_utf8(text) {
        Ok(s) => weighted_units(s.chars().map(u32::from)),
        Err(_) => weighted_units(text.iter().map(|&b| u32::from(b))),
    }
}

/// Token-level backend number
///
/// Combines the token's weighted code sum, its length, its ordinal, its
/// alphabetic sum, its own id, the ids of its neighbours and the embedding
/// bit.
pub fn backend_number(
    text: &[u8],
    ordinal: u64,
    content_id: u64,
    prev_id: Option<u64>,
    next_id: Option<u64>,
    embedding: bool,
) -> u64 {
    let (weighted, length) = weighted_token_sum(text);
    let base = weighted
        .wrapping_mul(length)
        .wrapping_add(ordinal)
        .wrapping_add(alphabetic_sum(text));

    (base ^ content_id)
        .wrapping_add(prev_id.unwrap_or(0))
        .wrapping_add(next_id.unwrap_or(0))
        .wrapping_add(u64::from(embedding))
}

/// Σ code·(i+1) over code points, modulo [`WEIGHT_MODULUS`]
pub fn weighted_char_sum(text: &str) -> u64 {
    let modulus = u128::from(WEIGHT_MODULUS);
    let mut total: u128 = 0;
    for (i, ch) in text.chars().enumerate() {
        total = (total + u128::from(u32::from(ch)) * (i as u128 + 1)) % modulus;
    }
    total as u64
}

/// Weighted sum where a run of one repeated ASCII letter occupies a single
/// position and is multiplied by its length
pub fn weighted_char_sum_run_aware(text: &str) -> u64 {
    let modulus = u128::from(WEIGHT_MODULUS);
    let mut total: u128 = 0;
    let mut position: u128 = 0;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        position += 1;
        let mut run = 1u128;
        if ch.is_ascii_alphabetic() {
            while chars.next_if_eq(&ch).is_some() {
                run += 1;
            }
        }
        total = (total + u128::from(u32::from(ch)) * position * run) % modulus;
    }

    total as u64
}

/// Whole-text fingerprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextSummary {
    /// Digital root of the weighted sum, perturbed once under embedding
    pub signature_digit: u8,
    /// Last decimal digit of the text's content code
    pub compat_digit: u8,
    /// Weighted code-point sum modulo [`WEIGHT_MODULUS`]
    pub weighted_sum: u64,
    /// Digital root of `10 * signature_digit + compat_digit`
    pub final_digit: u8,
    /// Sum of ASCII letter values
    pub alphabetic_sum: u64,
    /// Whether the embedding perturbation was applied
    pub embedding_enabled: bool,
}

impl TextSummary {
    fn from_weighted(text: &str, weighted_sum: u64, embedding: bool) -> Self {
        let mut signature_digit = digital_root(weighted_sum);
        if embedding {
            signature_digit = perturb(signature_digit);
        }
        let compat_digit = (content_code(text.as_bytes()) % 10) as u8;
        let final_digit = digital_root(10 * u64::from(signature_digit) + u64::from(compat_digit));

        Self {
            signature_digit,
            compat_digit,
            weighted_sum,
            final_digit,
            alphabetic_sum: alphabetic_sum(text.as_bytes()),
            embedding_enabled: embedding,
        }
    }
}

/// Computes the whole-text fingerprint
pub fn fingerprint(text: &str, embedding: bool) -> TextSummary {
    TextSummary::from_weighted(text, weighted_char_sum(text), embedding)
}

/// Computes the whole-text fingerprint with run-aware weighting
pub fn fingerprint_run_aware(text: &str, embedding: bool) -> TextSummary {
    TextSummary::from_weighted(text, weighted_char_sum_run_aware(text), embedding)
}

/// Compatibility digits of a stream
///
/// Distinct token texts are numbered by first appearance starting at 1; each
/// token's digit is that number times the strategy's prime base, modulo 10.
pub fn compat_digits(stream: &TokenStream) -> Vec<u8> {
    let base = stream.strategy().prime_base();
    let mut seen: HashMap<&[u8], u64> = HashMap::new();

    stream
        .tokens()
        .iter()
        .map(|token| {
            let next = seen.len() as u64 + 1;
            let number = *seen.entry(token.text.as_slice()).or_insert(next);
            (number * base % 10) as u8
        })
        .collect()
}
