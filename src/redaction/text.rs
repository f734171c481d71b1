//! Character masking for text-bearing documents

use super::outcome::{RedactionOutcome, SkippedRegion};
use crate::adapters::traits::TextContainer;
use crate::detection::models::{Phrase, PhraseSet, PiiCategory};
use crate::domain::Result;

/// Default mask character (U+2588 FULL BLOCK)
pub const DEFAULT_MASK_CHAR: char = '█';

/// How a phrase is masked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskStyle {
    /// Every character is masked
    Full,
    /// The local part is masked and `@domain` is kept
    KeepDomain,
}

/// Mask style for a category; literals without a category are masked fully
pub fn mask_style(category: Option<PiiCategory>) -> MaskStyle {
    let Some(category) = category else {
        return MaskStyle::Full;
    };
    match category {
        PiiCategory::Email => MaskStyle::KeepDomain,
        PiiCategory::Phone
        | PiiCategory::Iban
        | PiiCategory::CreditCard
        | PiiCategory::CreditCardMasked
        | PiiCategory::Ssn
        | PiiCategory::Pan
        | PiiCategory::Aadhaar
        | PiiCategory::Cvv
        | PiiCategory::Pin
        | PiiCategory::Jwt
        | PiiCategory::ApiKey
        | PiiCategory::Credential
        | PiiCategory::HealthInfo
        | PiiCategory::Account
        | PiiCategory::Routing
        | PiiCategory::SortCode
        | PiiCategory::DigitSequence
        | PiiCategory::Otp
        | PiiCategory::Swift
        | PiiCategory::Ifsc
        | PiiCategory::Biometric
        | PiiCategory::Passport
        | PiiCategory::DriverLicense => MaskStyle::Full,
    }
}

/// Masks one phrase; the result has the same number of chars
pub fn mask_phrase(phrase: &str, style: MaskStyle, mask_char: char) -> String {
    let fill = |s: &str| std::iter::repeat(mask_char).take(s.chars().count()).collect::<String>();
    match style {
        MaskStyle::KeepDomain => match phrase.rfind('@') {
            Some(at) if at > 0 => format!("{}{}", fill(&phrase[..at]), &phrase[at..]),
            _ => fill(phrase),
        },
        MaskStyle::Full => fill(phrase),
    }
}

/// Masks every occurrence of every phrase, longest phrases first
///
/// Returns the masked text and the number of occurrences replaced.
pub fn mask_text(text: &str, phrases: &PhraseSet, mask_char: char) -> (String, usize) {
    let mut ordered: Vec<&Phrase> = phrases.iter().collect();
    ordered.sort_by_key(|p| std::cmp::Reverse(p.text.chars().count()));

    let mut output = text.to_string();
    let mut replaced = 0;
    for phrase in ordered {
        let needle = phrase.text.as_str();
        if needle.trim().is_empty() {
            continue;
        }
        let count = output.matches(needle).count();
        if count == 0 {
            continue;
        }
        let masked = mask_phrase(needle, mask_style(phrase.category), mask_char);
        output = output.replace(needle, &masked);
        replaced += count;
    }

    (output, replaced)
}

/// Masks phrases unit by unit (paragraphs, table cells)
///
/// Returns the original bytes when no phrase occurs; the container is only
/// saved when a unit changed.
pub fn redact_text_container<C>(
    original: &[u8],
    container: &mut C,
    phrases: &PhraseSet,
    mask_char: char,
) -> Result<RedactionOutcome>
where
    C: TextContainer + ?Sized,
{
    if phrases.is_empty() {
        return Ok(RedactionOutcome::unchanged(original, Vec::new()));
    }

    let mut applied = 0;
    let mut skipped = Vec::new();
    for index in 0..container.unit_count() {
        let Some(text) = container.unit_text(index) else {
            continue;
        };
        let (masked, replaced) = mask_text(&text, phrases, mask_char);
        if replaced == 0 {
            continue;
        }
        match container.replace_unit_text(index, &masked) {
            Ok(()) => applied += replaced,
            Err(e) => skipped.push(SkippedRegion::new(format!("unit {index}"), e.to_string())),
        }
    }

    if applied == 0 {
        return Ok(RedactionOutcome::unchanged(original, skipped));
    }

    tracing::debug!(applied, units = container.unit_count(), "Text units masked");
    Ok(RedactionOutcome::changed(container.save()?, applied, skipped))
}
