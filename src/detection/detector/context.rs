//! Context gating around candidate matches

use regex::Regex;

/// Keyword rule evaluated on the text surrounding a candidate
#[derive(Debug, Clone)]
pub struct ContextRule {
    keywords: Vec<String>,
    window: usize,
    pattern: Regex,
}

impl ContextRule {
    /// Compiles a whole-word, case-insensitive rule over `keywords`
    pub fn new(keywords: &[String], window: usize) -> Result<Self, regex::Error> {
        let keywords: Vec<String> = keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        let alternation = keywords
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"(?i)\b(?:{alternation})\b"))?;

        Ok(Self {
            keywords,
            window,
            pattern,
        })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Same keywords with a different window
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Whether a keyword starts within the window on either side of `start..end`
    ///
    /// The search runs on the full text, so a keyword may run past the end of
    /// the window and word boundaries are judged against the real neighbours.
    pub fn is_satisfied(&self, text: &str, start: usize, end: usize) -> bool {
        if self.keywords.is_empty() {
            return true;
        }
        let (before, after) = window_around(text, start, end, self.window);
        let lo = start - before.len();
        let hi = end + after.len();

        let found_before = self.pattern.find_at(&text[..start], lo).is_some();
        let found_after = self
            .pattern
            .find_at(text, end)
            .is_some_and(|m| m.start() < hi);
        found_before || found_after
    }
}

/// Up to `window` chars before `start` and after `end`, on char boundaries
pub fn window_around(text: &str, start: usize, end: usize, window: usize) -> (&str, &str) {
    if window == 0 {
        return ("", "");
    }
    let before = &text[..start];
    let after = &text[end..];

    let lo = before
        .char_indices()
        .rev()
        .nth(window - 1)
        .map_or(0, |(i, _)| i);
    let hi = after
        .char_indices()
        .nth(window)
        .map_or(after.len(), |(i, _)| i);

    (&before[lo..], &after[..hi])
}

/// Rejects spans glued to a letter, a digit, or a separator-then-digit
///
/// A 12-digit group inside `4111 1111 1111 1111` is not isolated.
pub fn is_isolated(text: &str, start: usize, end: usize) -> bool {
    fn glued(first: Option<char>, second: Option<char>) -> bool {
        match first {
            Some(c) if c.is_alphanumeric() => true,
            Some(' ' | '-') => second.is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    let mut before = text[..start].chars().rev();
    let b1 = before.next();
    let b2 = before.next();
    let mut after = text[end..].chars();
    let a1 = after.next();
    let a2 = after.next();

    !glued(b1, b2) && !glued(a1, a2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(keywords: &[&str], window: usize) -> ContextRule {
        let keywords: Vec<String> = keywords.iter().map(|k| k.to_string()).collect();
        ContextRule::new(&keywords, window).unwrap()
    }

    #[test]
    fn test_window_around_snaps_to_chars() {
        let text = "né 12345 über";
        let start = text.find("12345").unwrap();
        let (before, after) = window_around(text, start, start + 5, 2);
        assert_eq!(before, "é ");
        assert_eq!(after, " ü");
    }

    #[test]
    fn test_window_around_short_text() {
        let (before, after) = window_around("1234", 0, 4, 20);
        assert_eq!(before, "");
        assert_eq!(after, "");
    }

    #[test]
    fn test_keyword_must_be_whole_word() {
        let account = rule(&["account"], 30);
        let text = "Accounting ref 12345678";
        let start = text.find("12345678").unwrap();
        assert!(!account.is_satisfied(text, start, start + 8));

        let text = "Account: 12345678";
        let start = text.find("12345678").unwrap();
        assert!(account.is_satisfied(text, start, start + 8));
    }

    #[test]
    fn test_keyword_outside_window_is_ignored() {
        let pin = rule(&["pin"], 10);
        let text = "PIN was changed last week, new value 4821";
        let start = text.find("4821").unwrap();
        assert!(!pin.is_satisfied(text, start, start + 4));
        assert!(pin.clone().with_window(60).is_satisfied(text, start, start + 4));
    }

    #[test]
    fn test_keyword_after_match() {
        let cvv = rule(&["security code"], 20);
        let text = "123 is the Security Code";
        assert!(cvv.is_satisfied(text, 0, 3));
    }

    #[test]
    fn test_keyword_cut_by_window_edge() {
        let code = rule(&["code"], 3);
        let text = "123 code";
        assert!(code.is_satisfied(text, 0, 3));

        // Starts past the window
        let text = "123 is code";
        assert!(!code.is_satisfied(text, 0, 3));

        // Word boundaries use the text outside the window
        let pin = rule(&["pin"], 4);
        let text = "spin 4821";
        let start = text.find("4821").unwrap();
        assert!(!pin.is_satisfied(text, start, start + 4));
    }

    #[test]
    fn test_is_isolated() {
        let card = "4111 1111 1111 1111";
        assert!(!is_isolated(card, 0, 14));
        assert!(!is_isolated(card, 5, 19));
        assert!(is_isolated("id 2345 6789 0124.", 3, 17));
        assert!(!is_isolated("x2345", 1, 5));
    }
}
