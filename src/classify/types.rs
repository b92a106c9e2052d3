//! Core types for phone and call classification.

use std::fmt;

use serde::Serialize;

use crate::counters::Counter;

/// Structural type of a normalized phone number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PhoneType {
    Mobile,
    Landline,
    Shortcode,
    Intl,
    /// No rule gave a confident answer, or the number was rejected.
    Unknown,
}

impl PhoneType {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PhoneType::Mobile => "mobile",
            PhoneType::Landline => "landline",
            PhoneType::Shortcode => "shortcode",
            PhoneType::Intl => "intl",
            PhoneType::Unknown => "unknown",
        }
    }

    /// Whether this type counts as a domestic endpoint.
    pub fn is_national(&self) -> bool {
        matches!(
            self,
            PhoneType::Mobile | PhoneType::Landline | PhoneType::Shortcode
        )
    }
}

impl fmt::Display for PhoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a call stayed inside the country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CallScope {
    National,
    International,
}

impl CallScope {
    /// National only when both endpoints are domestic types.
    ///
    /// `Unknown` is not domestic, so it forces `International`.
    pub fn classify(first: PhoneType, second: PhoneType) -> Self {
        if first.is_national() && second.is_national() {
            CallScope::National
        } else {
            CallScope::International
        }
    }

    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            CallScope::National => "National",
            CallScope::International => "International",
        }
    }
}

impl fmt::Display for CallScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of a classification rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeVerdict {
    /// The classified phone type.
    pub phone_type: PhoneType,
    /// Counter to bump for this outcome, if any.
    pub counter: Option<Counter>,
    /// Name of the rule that produced this verdict.
    pub source: &'static str,
}

impl TypeVerdict {
    /// Create a new verdict.
    pub fn new(phone_type: PhoneType, counter: Option<Counter>, source: &'static str) -> Self {
        Self {
            phone_type,
            counter,
            source,
        }
    }

    /// A domestic mobile or landline number.
    pub fn national(phone_type: PhoneType, source: &'static str) -> Self {
        Self::new(phone_type, Some(Counter::NationalCount), source)
    }

    pub fn shortcode(source: &'static str) -> Self {
        Self::new(PhoneType::Shortcode, Some(Counter::ShortcodeCount), source)
    }

    pub fn intl(source: &'static str) -> Self {
        Self::new(PhoneType::Intl, Some(Counter::InternationalCount), source)
    }

    /// An invalid number, counted with the blanks.
    pub fn rejected(source: &'static str) -> Self {
        Self::new(PhoneType::Unknown, Some(Counter::BlankPhoneNumbers), source)
    }

    /// No rule matched. Nothing is counted.
    pub fn unknown() -> Self {
        Self::new(PhoneType::Unknown, None, "no-match")
    }
}
