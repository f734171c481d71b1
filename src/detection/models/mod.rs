//! Detection data models

pub mod pii_match;

pub use pii_match::{Phrase, PhraseSet, PiiCategory, PiiMatch};
