//! Shannon entropy for secret-like tokens

use std::collections::HashMap;

/// Shannon entropy of `s` in bits per character
pub fn shannon_entropy(s: &str) -> f64 {
    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut total = 0usize;
    for c in s.chars() {
        *counts.entry(c).or_default() += 1;
        total += 1;
    }
    if total == 0 {
        return 0.0;
    }

    let total = total as f64;
    counts
        .values()
        .map(|&n| {
            let p = n as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Keys mix letters and digits; long words and digit runs do not
pub fn has_letter_and_digit(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_alphabetic()) && s.chars().any(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entropy_of_uniform_strings() {
        assert_eq!(shannon_entropy(""), 0.0);
        assert_eq!(shannon_entropy("aaaaaaaa"), 0.0);
        assert!((shannon_entropy("abcd") - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_entropy_separates_keys_from_words() {
        assert!(shannon_entropy("aB3dE5fG7hJ9kL1mN2pQ4rS6tU8") > 4.0);
        assert!(shannon_entropy("thisisaverylongnormalwordtoken") < 4.0);
    }

    #[test]
    fn test_letter_and_digit() {
        assert!(has_letter_and_digit("abc123"));
        assert!(!has_letter_and_digit("abcdefghijklmnopqrstuvwxyz"));
        assert!(!has_letter_and_digit("12345678901234567890"));
    }
}
