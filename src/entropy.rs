//! SSID text-complexity heuristic.
//!
//! Randomized or generated network names (common in evil-twin and
//! karma-style setups) tend to have a flatter character distribution than
//! human-chosen ones, so the character entropy of the SSID is carried as a
//! feature on every document.

use std::collections::BTreeMap;

/// Base-2 Shannon entropy of a string's character distribution, in bits.
///
/// Characters are Unicode scalars, not bytes — SSIDs routinely contain
/// multi-byte text and each character must count as one unit.
///
/// Returns exactly `0.0` for the empty string and for any string made of a
/// single repeated character. Never fails.
pub fn shannon_entropy(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }

    // Ordered map so the floating-point sum is deterministic across runs
    // and under permutation of the input.
    let mut freq: BTreeMap<char, u32> = BTreeMap::new();
    for ch in text.chars() {
        *freq.entry(ch).or_insert(0) += 1;
    }

    let length = text.chars().count() as f64;
    let mut entropy = 0.0;
    for count in freq.values() {
        let p = f64::from(*count) / length;
        entropy -= p * p.log2();
    }
    entropy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string_is_zero() {
        assert_eq!(shannon_entropy(""), 0.0);
    }

    #[test]
    fn test_repeated_character_is_zero() {
        assert_eq!(shannon_entropy("aaaaaaaa"), 0.0);
    }

    #[test]
    fn test_two_symbols_equal_weight() {
        // "abab" — two symbols at p=0.5 each → exactly 1 bit
        assert!((shannon_entropy("abab") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_never_negative() {
        for s in ["x", "CoffeeShop_5G", "Ab", "  ", "\u{1F4E1}"] {
            assert!(shannon_entropy(s) >= 0.0, "entropy({:?}) was negative", s);
        }
    }

    #[test]
    fn test_permutation_invariant() {
        assert_eq!(shannon_entropy("CoffeeShop_5G"), shannon_entropy("G5_pohSeeffoC"));
    }

    #[test]
    fn test_known_value() {
        // "CoffeeShop_5G": 13 chars, 'o'/'f'/'e' appear twice, 7 singletons
        //   -3 * (2/13)·log2(2/13) - 7 * (1/13)·log2(1/13) ≈ 3.2389
        let e = shannon_entropy("CoffeeShop_5G");
        assert!((e - 3.2389).abs() < 1e-3, "got {}", e);
    }

    #[test]
    fn test_multibyte_counts_characters_not_bytes() {
        // Two distinct characters at p=0.5 each, regardless of byte width
        let e = shannon_entropy("日本");
        assert!((e - 1.0).abs() < 1e-12, "got {}", e);
        // Repeated multi-byte char still degenerate
        assert_eq!(shannon_entropy("日日日"), 0.0);
    }
}
