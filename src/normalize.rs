//! Phone number cleansing.
//!
//! Raw numbers coming off the switch carry tags, stray letters and gateway
//! prefixes. [`NumberNormalizer`] runs an ordered table of [`CleanupRule`]s
//! over each number. Every rule fires at most once and sees the output of
//! the rules before it, so the table order is part of the behavior.

use log::trace;

use crate::counters::{Counter, CounterRegistry};

/// One cleansing step.
///
/// `apply` returns the shortened number when the rule matches, `None`
/// otherwise. All rules only ever cut a prefix or a suffix.
pub struct CleanupRule {
    pub name: &'static str,
    /// Counter bumped when the rule fires, if any.
    pub counter: Option<Counter>,
    pub apply: fn(&str) -> Option<&str>,
}

/// Cleansing rules in application order.
pub const CLEANUP_RULES: &[CleanupRule] = &[
    // Switch artifacts
    CleanupRule {
        name: "leading-1a-tag",
        counter: None,
        apply: strip_leading_tag,
    },
    CleanupRule {
        name: "trailing-letter",
        counter: None,
        apply: strip_trailing_letter,
    },
    CleanupRule {
        name: "trailing-letter-pair",
        counter: None,
        apply: strip_trailing_letter_pair,
    },
    CleanupRule {
        name: "letter-digit-suffix",
        counter: None,
        apply: strip_letter_digit_suffix,
    },
    // Carrier and gateway prefixes
    CleanupRule {
        name: "ptsu-prefix",
        counter: Some(Counter::StartsWithPtsu),
        apply: strip_ptsu,
    },
    CleanupRule {
        name: "2330-prefix",
        counter: Some(Counter::StartsWith2330),
        apply: strip_2330,
    },
    CleanupRule {
        name: "791000-prefix",
        counter: Some(Counter::StartsWith791000),
        apply: strip_791000,
    },
    CleanupRule {
        name: "b0-prefix",
        counter: Some(Counter::StartsWithB0),
        apply: strip_b0,
    },
    // Digit normalization
    CleanupRule {
        name: "leading-zeros",
        counter: None,
        apply: strip_leading_zeros,
    },
    CleanupRule {
        name: "afghan-country-code",
        counter: None,
        apply: strip_country_code,
    },
];

/// Applies [`CLEANUP_RULES`] to raw phone numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberNormalizer {
    _private: (),
}

impl NumberNormalizer {
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Normalize one raw number field.
    ///
    /// Blank input bumps `blank-phone-numbers` and comes back empty; anything
    /// else bumps `total-number-occurrences` and goes through the rule table.
    pub fn normalize(&self, raw: &str, counters: &CounterRegistry) -> String {
        if raw.is_empty() {
            counters.increment(Counter::BlankPhoneNumbers);
            return String::new();
        }
        counters.increment(Counter::TotalNumberOccurrences);

        let mut number = raw;
        for rule in CLEANUP_RULES {
            if let Some(rest) = (rule.apply)(number) {
                trace!("{}: {:?} -> {:?}", rule.name, number, rest);
                if let Some(counter) = rule.counter {
                    counters.increment(counter);
                }
                number = rest;
            }
        }

        number.to_string()
    }
}

// =============================================================================
// RULES
// =============================================================================

fn char_len(s: &str) -> usize {
    s.chars().count()
}

// Empty counts as all digits.
fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

// `1A12345678` / `1a12345678` => `12345678`
fn strip_leading_tag(s: &str) -> Option<&str> {
    if char_len(s) <= 1 {
        return None;
    }
    let rest = s.strip_prefix("1A").or_else(|| s.strip_prefix("1a"))?;
    all_digits(rest).then_some(rest)
}

// Digits followed by exactly `n` ASCII letters => the digits.
fn strip_trailing_letters(s: &str, n: usize) -> Option<&str> {
    if char_len(s) <= 1 {
        return None;
    }
    let body = s.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    (s.len() - body.len() == n && all_digits(body)).then_some(body)
}

// `12345678F` => `12345678`
fn strip_trailing_letter(s: &str) -> Option<&str> {
    strip_trailing_letters(s, 1)
}

// `12345678FF` => `12345678`
fn strip_trailing_letter_pair(s: &str) -> Option<&str> {
    strip_trailing_letters(s, 2)
}

// `12345678F8` => `12345678`
fn strip_letter_digit_suffix(s: &str) -> Option<&str> {
    if char_len(s) <= 1 {
        return None;
    }
    let mut tail = s.chars().rev();
    let digit = tail.next()?;
    let letter = tail.next()?;
    if !digit.is_ascii_digit() || !letter.is_ascii_uppercase() {
        return None;
    }
    let head = &s[..s.len() - 2];
    all_digits(head).then_some(head)
}

fn strip_ptsu(s: &str) -> Option<&str> {
    s.strip_prefix("PTSU")
}

fn strip_2330(s: &str) -> Option<&str> {
    s.strip_prefix("2330")
}

fn strip_791000(s: &str) -> Option<&str> {
    s.strip_prefix("791000")
}

fn strip_b0(s: &str) -> Option<&str> {
    if char_len(s) <= 1 {
        return None;
    }
    s.strip_prefix("B0")
}

fn strip_leading_zeros(s: &str) -> Option<&str> {
    let rest = s.trim_start_matches('0');
    (rest.len() != s.len()).then_some(rest)
}

// 11-digit numbers carrying Afghanistan's `93` come down to 9 digits.
fn strip_country_code(s: &str) -> Option<&str> {
    if char_len(s) != 11 {
        return None;
    }
    s.strip_prefix("93")
}
