//! Length-based rules.

use std::collections::HashSet;

use super::char_len;
use crate::classify::{PhoneType, TypeRule, TypeVerdict};

/// 11-digit numbers whose first two digits are a configured area code.
pub struct NewLandlineRule {
    codes: HashSet<String>,
}

impl NewLandlineRule {
    pub fn new(codes: HashSet<String>) -> Self {
        Self { codes }
    }
}

impl TypeRule for NewLandlineRule {
    fn name(&self) -> &'static str {
        "new-landline-code"
    }

    fn check(&self, number: &str) -> Option<TypeVerdict> {
        if char_len(number) != 11 {
            return None;
        }
        let code = number.get(..2)?;
        self.codes
            .contains(code)
            .then(|| TypeVerdict::national(PhoneType::Landline, self.name()))
    }
}

/// Any 9 or 10 character number is a landline.
pub struct LandlineLengthRule;

impl TypeRule for LandlineLengthRule {
    fn name(&self) -> &'static str {
        "landline-length"
    }

    fn check(&self, number: &str) -> Option<TypeVerdict> {
        matches!(char_len(number), 9 | 10)
            .then(|| TypeVerdict::national(PhoneType::Landline, self.name()))
    }
}

/// 9-character numbers starting with `7` are mobiles.
///
/// In the default order this sits after [`LandlineLengthRule`], which already
/// claims every 9-character number, so it never fires. It is kept in place
/// because it is not settled whether mobiles were meant to win here; moving
/// it up would reclassify those numbers from landline to mobile.
pub struct MobileRule;

impl TypeRule for MobileRule {
    fn name(&self) -> &'static str {
        "mobile-prefix"
    }

    fn check(&self, number: &str) -> Option<TypeVerdict> {
        (char_len(number) == 9 && number.starts_with('7'))
            .then(|| TypeVerdict::national(PhoneType::Mobile, self.name()))
    }
}

/// Anything shorter than 9 characters, including the empty string.
pub struct ShortcodeRule;

impl TypeRule for ShortcodeRule {
    fn name(&self) -> &'static str {
        "shortcode-length"
    }

    fn check(&self, number: &str) -> Option<TypeVerdict> {
        (char_len(number) < 9).then(|| TypeVerdict::shortcode(self.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counters::Counter;

    fn codes(list: &[&str]) -> HashSet<String> {
        list.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_new_landline_matches_configured_code() {
        let rule = NewLandlineRule::new(codes(&["20", "30"]));
        let verdict = rule.check("20123456789").unwrap();
        assert_eq!(verdict.phone_type, PhoneType::Landline);
        assert_eq!(verdict.counter, Some(Counter::NationalCount));
        assert_eq!(verdict.source, "new-landline-code");
    }

    #[test]
    fn test_new_landline_needs_eleven_digits() {
        let rule = NewLandlineRule::new(codes(&["20"]));
        assert!(rule.check("2012345678").is_none());
        assert!(rule.check("201234567890").is_none());
    }

    #[test]
    fn test_new_landline_unknown_code() {
        let rule = NewLandlineRule::new(codes(&["20"]));
        assert!(rule.check("44123456789").is_none());
    }

    #[test]
    fn test_new_landline_non_ascii_head() {
        let rule = NewLandlineRule::new(codes(&["20"]));
        // Byte 2 falls inside the "é"
        assert!(rule.check("1é23456789a").is_none());
    }

    #[test]
    fn test_landline_length() {
        assert!(LandlineLengthRule.check("123456789").is_some());
        assert!(LandlineLengthRule.check("1234567890").is_some());
        assert!(LandlineLengthRule.check("12345678").is_none());
        assert!(LandlineLengthRule.check("12345678901").is_none());
    }

    #[test]
    fn test_mobile_rule_on_its_own() {
        let verdict = MobileRule.check("712345678").unwrap();
        assert_eq!(verdict.phone_type, PhoneType::Mobile);
        assert_eq!(verdict.counter, Some(Counter::NationalCount));
        assert!(MobileRule.check("812345678").is_none());
        assert!(MobileRule.check("7123456789").is_none());
    }

    #[test]
    fn test_shortcode() {
        assert!(ShortcodeRule.check("").is_some());
        assert!(ShortcodeRule.check("1234567").is_some());
        assert!(ShortcodeRule.check("12345678").is_some());
        assert!(ShortcodeRule.check("123456789").is_none());
    }
}
