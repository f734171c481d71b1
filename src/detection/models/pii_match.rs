//! PII match data models

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Closed set of PII categories the catalog can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PiiCategory {
    /// Email addresses
    Email,
    /// Telephone numbers
    Phone,
    /// International Bank Account Numbers (mod-97 checked)
    Iban,
    /// Payment card numbers (Luhn checked)
    CreditCard,
    /// Payment card numbers with masked groups (XXXX XXXX XXXX 1234)
    CreditCardMasked,
    /// US Social Security Numbers
    Ssn,
    /// Indian Permanent Account Number
    Pan,
    /// Indian Aadhaar number (Verhoeff checked)
    Aadhaar,
    /// Card verification value
    Cvv,
    /// Personal identification number
    Pin,
    /// JSON Web Tokens
    Jwt,
    /// API keys and high-entropy tokens
    ApiKey,
    /// Passwords and secrets in key/value form
    Credential,
    /// Lines mentioning health conditions or treatment
    HealthInfo,
    /// Bank account numbers
    Account,
    /// ABA routing numbers
    Routing,
    /// UK sort codes
    SortCode,
    /// Bare digit runs near identifying vocabulary
    DigitSequence,
    /// One-time passwords
    Otp,
    /// SWIFT/BIC codes
    Swift,
    /// Indian Financial System Codes
    Ifsc,
    /// Lines mentioning biometric identifiers
    Biometric,
    /// Passport numbers
    Passport,
    /// Driver license numbers
    DriverLicense,
}

impl PiiCategory {
    /// Every category, in declaration order
    pub const ALL: [PiiCategory; 24] = [
        Self::Email,
        Self::Phone,
        Self::Iban,
        Self::CreditCard,
        Self::CreditCardMasked,
        Self::Ssn,
        Self::Pan,
        Self::Aadhaar,
        Self::Cvv,
        Self::Pin,
        Self::Jwt,
        Self::ApiKey,
        Self::Credential,
        Self::HealthInfo,
        Self::Account,
        Self::Routing,
        Self::SortCode,
        Self::DigitSequence,
        Self::Otp,
        Self::Swift,
        Self::Ifsc,
        Self::Biometric,
        Self::Passport,
        Self::DriverLicense,
    ];

    /// Stable snake_case name, as used in pattern libraries and JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Iban => "iban",
            Self::CreditCard => "credit_card",
            Self::CreditCardMasked => "credit_card_masked",
            Self::Ssn => "ssn",
            Self::Pan => "pan",
            Self::Aadhaar => "aadhaar",
            Self::Cvv => "cvv",
            Self::Pin => "pin",
            Self::Jwt => "jwt",
            Self::ApiKey => "api_key",
            Self::Credential => "credential",
            Self::HealthInfo => "health_info",
            Self::Account => "account",
            Self::Routing => "routing",
            Self::SortCode => "sort_code",
            Self::DigitSequence => "digit_sequence",
            Self::Otp => "otp",
            Self::Swift => "swift",
            Self::Ifsc => "ifsc",
            Self::Biometric => "biometric",
            Self::Passport => "passport",
            Self::DriverLicense => "driver_license",
        }
    }

    /// Human-readable label for reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Email => "EMAIL",
            Self::Phone => "PHONE",
            Self::Iban => "IBAN",
            Self::CreditCard => "CARD",
            Self::CreditCardMasked => "CARD_MASKED",
            Self::Ssn => "SSN",
            Self::Pan => "PAN",
            Self::Aadhaar => "AADHAAR",
            Self::Cvv => "CVV",
            Self::Pin => "PIN",
            Self::Jwt => "JWT",
            Self::ApiKey => "API_KEY",
            Self::Credential => "CREDENTIAL",
            Self::HealthInfo => "HEALTH",
            Self::Account => "ACCOUNT",
            Self::Routing => "ROUTING",
            Self::SortCode => "SORT_CODE",
            Self::DigitSequence => "DIGITS",
            Self::Otp => "OTP",
            Self::Swift => "SWIFT",
            Self::Ifsc => "IFSC",
            Self::Biometric => "BIOMETRIC",
            Self::Passport => "PASSPORT",
            Self::DriverLicense => "DRIVER_LICENSE",
        }
    }

    /// Categories gated by a structural checksum instead of context
    pub fn is_checksum_gated(&self) -> bool {
        matches!(self, Self::CreditCard | Self::Iban | Self::Aadhaar)
    }
}

impl fmt::Display for PiiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PiiCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == normalized)
            .or(match normalized.as_str() {
                "card" => Some(Self::CreditCard),
                "masked_card" => Some(Self::CreditCardMasked),
                "health" => Some(Self::HealthInfo),
                "account_number" => Some(Self::Account),
                "bic" => Some(Self::Swift),
                "license" | "driving_license" => Some(Self::DriverLicense),
                _ => None,
            })
            .ok_or_else(|| format!("Unknown PII category: {s}"))
    }
}

/// A categorized span of the scanned text
///
/// `start` and `end` are byte offsets; `text` is `&blob[start..end]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PiiMatch {
    pub category: PiiCategory,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl PiiMatch {
    pub fn new(category: PiiCategory, text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            category,
            text: text.into(),
            start,
            end,
        }
    }

    /// Builds a match from a span of `blob`
    pub fn from_span(category: PiiCategory, blob: &str, start: usize, end: usize) -> Self {
        Self::new(category, &blob[start..end], start, end)
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A phrase to mask, with the category it was detected as (if any)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Phrase {
    pub text: String,
    pub category: Option<PiiCategory>,
}

impl Phrase {
    pub fn new(text: impl Into<String>, category: Option<PiiCategory>) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }

    /// A user-supplied literal with no category
    pub fn literal(text: impl Into<String>) -> Self {
        Self::new(text, None)
    }
}

/// Phrase list deduplicated by `(text, category)` in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhraseSet {
    phrases: Vec<Phrase>,
}

impl PhraseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the phrase list for a set of matches
    pub fn from_matches<'a>(matches: impl IntoIterator<Item = &'a PiiMatch>) -> Self {
        let mut set = Self::new();
        for m in matches {
            set.insert(Phrase::new(m.text.clone(), Some(m.category)));
        }
        set
    }

    /// Adds a phrase; returns false if the pair was already present or empty
    pub fn insert(&mut self, phrase: Phrase) -> bool {
        if phrase.text.trim().is_empty() || self.phrases.contains(&phrase) {
            return false;
        }
        self.phrases.push(phrase);
        true
    }

    pub fn extend_literals<I, S>(&mut self, literals: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for literal in literals {
            self.insert(Phrase::literal(literal));
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Phrase> {
        self.phrases.iter()
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Distinct phrase texts, regardless of category
    pub fn texts(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.phrases
            .iter()
            .filter(|p| seen.insert(p.text.as_str()))
            .map(|p| p.text.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip() {
        for category in PiiCategory::ALL {
            assert_eq!(category.as_str().parse::<PiiCategory>().unwrap(), category);
        }
    }

    #[test]
    fn test_category_aliases() {
        assert_eq!("Card".parse::<PiiCategory>().unwrap(), PiiCategory::CreditCard);
        assert_eq!("sort-code".parse::<PiiCategory>().unwrap(), PiiCategory::SortCode);
        assert_eq!("BIC".parse::<PiiCategory>().unwrap(), PiiCategory::Swift);
        assert!("name".parse::<PiiCategory>().is_err());
    }

    #[test]
    fn test_category_serializes_snake_case() {
        let json = serde_json::to_string(&PiiCategory::CreditCardMasked).unwrap();
        assert_eq!(json, "\"credit_card_masked\"");
    }

    #[test]
    fn test_phrase_set_dedupes_by_text_and_category() {
        let matches = vec![
            PiiMatch::new(PiiCategory::Account, "123456789012", 0, 12),
            PiiMatch::new(PiiCategory::DigitSequence, "123456789012", 0, 12),
            PiiMatch::new(PiiCategory::Account, "123456789012", 40, 52),
        ];
        let set = PhraseSet::from_matches(&matches);
        assert_eq!(set.len(), 2);
        assert_eq!(set.texts(), vec!["123456789012"]);
    }

    #[test]
    fn test_phrase_set_skips_blank() {
        let mut set = PhraseSet::new();
        assert!(!set.insert(Phrase::literal("  ")));
        assert!(set.is_empty());
    }
}
