//! Rules for long numbers: letter rejection and dialing-code lookup.

use crate::classify::{TypeRule, TypeVerdict};
use crate::config::IntlCode;

/// Rejects numbers made of digits around a single uppercase letter.
///
/// Only meaningful after the length rules, which take every number shorter
/// than 11 characters and the known 11-digit landlines.
pub struct EmbeddedLetterRule;

impl TypeRule for EmbeddedLetterRule {
    fn name(&self) -> &'static str {
        "embedded-letter"
    }

    fn check(&self, number: &str) -> Option<TypeVerdict> {
        let mut non_digits = number.chars().filter(|c| !c.is_ascii_digit());
        let letter = non_digits.next()?;
        let single = non_digits.next().is_none();
        (single && letter.is_ascii_uppercase()).then(|| TypeVerdict::rejected(self.name()))
    }
}

/// Numbers starting with a known international dialing code.
///
/// Codes are tried in list order and the first hit wins.
pub struct InternationalRule {
    codes: Vec<IntlCode>,
}

impl InternationalRule {
    pub fn new(codes: Vec<IntlCode>) -> Self {
        Self { codes }
    }

    /// The first dialing code `number` starts with.
    pub fn matching_code(&self, number: &str) -> Option<&IntlCode> {
        self.codes
            .iter()
            .find(|code| number.starts_with(code.prefix.as_str()))
    }
}

impl TypeRule for InternationalRule {
    fn name(&self) -> &'static str {
        "dialing-code"
    }

    fn check(&self, number: &str) -> Option<TypeVerdict> {
        self.matching_code(number)
            .map(|_| TypeVerdict::intl(self.name()))
    }
}
