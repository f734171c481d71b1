//! Text normalization for fuzzy box matching

/// Lower-cases, deletes punctuation and collapses whitespace
///
/// ```
/// use redline::spatial::normalize::normalize;
///
/// assert_eq!(normalize("  Alice@Example.COM,\n  +1 (555) "), "aliceexamplecom 1 555");
/// ```
pub fn normalize(s: &str) -> String {
    let kept: String = s
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized text without any spaces
pub fn compact(normalized: &str) -> String {
    normalized.chars().filter(|c| !c.is_whitespace()).collect()
}

pub fn token_count(normalized: &str) -> usize {
    normalized.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_deletes_punctuation() {
        assert_eq!(normalize("555-123-4567"), "5551234567");
        assert_eq!(normalize("Acct.: 12 34"), "acct 12 34");
        assert_eq!(normalize("---"), "");
    }

    #[test]
    fn test_compact_and_tokens() {
        let n = normalize("Account   No. 1234");
        assert_eq!(n, "account no 1234");
        assert_eq!(compact(&n), "accountno1234");
        assert_eq!(token_count(&n), 3);
    }
}
