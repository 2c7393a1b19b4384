//! Entity recognizers for the analyzer engine.
//!
//! Each recognizer pairs one or more scored patterns with optional context
//! words and an optional checksum validator. Weak patterns start below the
//! reporting threshold and only surface when nearby context words or a
//! passing checksum raise them.

use regex::Regex;

use crate::config::EntityKind;
use crate::detection::DetectError;

/// Bytes searched before a match for context words.
const CONTEXT_WINDOW: usize = 40;
/// Score added when a context word appears inside the window.
const CONTEXT_BOOST: f32 = 0.35;

/// A scored span reported by a recognizer. Offsets are byte positions into
/// the analyzed text, valid for slicing.
#[derive(Debug, Clone)]
pub struct RecognizedSpan {
    pub entity: EntityKind,
    pub start: usize,
    pub end: usize,
    pub score: f32,
}

#[derive(Debug)]
struct ScoredPattern {
    regex: Regex,
    score: f32,
}

#[derive(Debug)]
pub struct Recognizer {
    entity: EntityKind,
    patterns: Vec<ScoredPattern>,
    context: &'static [&'static str],
    validator: Option<fn(&str) -> bool>,
}

impl Recognizer {
    /// Build the recognizer for one entity kind.
    pub fn build(entity: EntityKind) -> Result<Self, DetectError> {
        let (defs, context, validator): (
            &[(&str, f32)],
            &'static [&'static str],
            Option<fn(&str) -> bool>,
        ) = match entity {
            EntityKind::EmailAddress => (
                &[(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b", 0.85)],
                &["email", "e-mail", "mail"],
                None,
            ),
            EntityKind::PhoneNumber => (
                &[(
                    r"\b(?:\+\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b",
                    0.4,
                )],
                &["phone", "tel", "mobile", "call", "fax", "number"],
                None,
            ),
            EntityKind::CreditCard => (
                &[(r"\b\d(?:[ -]?\d){12,18}\b", 0.3)],
                &["card", "credit", "visa", "mastercard", "amex", "cc"],
                Some(luhn_valid as fn(&str) -> bool),
            ),
            EntityKind::UsSsn => (
                &[(r"\b\d{3}-\d{2}-\d{4}\b", 0.85)],
                &["ssn", "social security"],
                Some(valid_ssn as fn(&str) -> bool),
            ),
            // Nine bare digits are almost never a passport on their own; the
            // pattern scores low and relies on context to cross the threshold.
            EntityKind::UsPassport => (
                &[(r"\b\d{9}\b", 0.05)],
                &["passport", "travel", "document"],
                None,
            ),
            EntityKind::CaSin => (
                &[(r"\b\d{3}[- ]\d{3}[- ]\d{3}\b", 0.3)],
                &["sin", "social insurance"],
                Some(luhn_valid as fn(&str) -> bool),
            ),
            EntityKind::Person => (
                &[
                    (
                        r"\b(?:Mr|Mrs|Ms|Dr|Prof)\.?\s+[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*",
                        0.7,
                    ),
                    (r"\b[A-Z][a-z]+\s+[A-Z][a-z]+\b", 0.4),
                ],
                &["name", "contact", "attn", "regards", "sincerely"],
                None,
            ),
        };

        let mut patterns = Vec::with_capacity(defs.len());
        for (pattern, score) in defs {
            let regex = Regex::new(pattern).map_err(|source| DetectError::Pattern {
                name: entity.label().to_string(),
                source,
            })?;
            patterns.push(ScoredPattern {
                regex,
                score: *score,
            });
        }

        Ok(Self {
            entity,
            patterns,
            context,
            validator,
        })
    }

    pub fn entity(&self) -> EntityKind {
        self.entity
    }

    /// Scan the text, returning scored spans. Matches failing the checksum
    /// validator are dropped; context words near a match boost its score.
    pub fn recognize(&self, text: &str) -> Vec<RecognizedSpan> {
        let mut spans = Vec::new();

        for pattern in &self.patterns {
            for m in pattern.regex.find_iter(text) {
                if let Some(validate) = self.validator {
                    if !validate(m.as_str()) {
                        continue;
                    }
                }

                let mut score = pattern.score;
                if has_context(text, m.start(), self.context) {
                    score = (score + CONTEXT_BOOST).min(1.0);
                }

                spans.push(RecognizedSpan {
                    entity: self.entity,
                    start: m.start(),
                    end: m.end(),
                    score,
                });
            }
        }

        spans
    }
}

/// Case-insensitive search for any context word in the window preceding a
/// match.
fn has_context(text: &str, match_start: usize, words: &[&str]) -> bool {
    if words.is_empty() {
        return false;
    }
    let mut window_start = match_start.saturating_sub(CONTEXT_WINDOW);
    while window_start > 0 && !text.is_char_boundary(window_start) {
        window_start -= 1;
    }
    let window = text[window_start..match_start].to_lowercase();
    words.iter().any(|w| window.contains(w))
}

/// Luhn mod-10 checksum over the digits of a candidate. Used for credit
/// cards and Canadian SINs (both are Luhn-checked number spaces).
pub fn luhn_valid(candidate: &str) -> bool {
    let digits: Vec<u32> = candidate.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() < 2 {
        return false;
    }

    let mut sum = 0;
    for (i, digit) in digits.iter().rev().enumerate() {
        let mut d = *digit;
        if i % 2 == 1 {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
    }
    sum % 10 == 0
}

/// Reject SSN-shaped strings the SSA never issues: area 000, 666, or
/// 900-999, group 00, serial 0000.
fn valid_ssn(candidate: &str) -> bool {
    let parts: Vec<&str> = candidate.split('-').collect();
    if parts.len() != 3 {
        return false;
    }
    let (Ok(area), Ok(group), Ok(serial)) = (
        parts[0].parse::<u32>(),
        parts[1].parse::<u32>(),
        parts[2].parse::<u32>(),
    ) else {
        return false;
    };

    area != 0 && area != 666 && area < 900 && group != 0 && serial != 0
}
