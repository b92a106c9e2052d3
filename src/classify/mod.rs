//! Phone-type and call-scope classification.
//!
//! [`PhoneTypeClassifier`] runs a list of [`TypeRule`]s in order and returns
//! the first verdict, falling back to [`PhoneType::Unknown`]. Order is
//! precedence: with the default rules every 9-character number is a landline
//! before the mobile rule gets a look.
//!
//! # Example
//!
//! ```
//! use msc_cdr::classify::{CallScope, PhoneType, PhoneTypeClassifier};
//! use msc_cdr::{ClassifierConfig, CounterRegistry};
//!
//! let classifier = PhoneTypeClassifier::from_config(&ClassifierConfig::default());
//! let counters = CounterRegistry::new();
//!
//! let first = classifier.classify("712345678", &counters).phone_type;
//! let second = classifier.classify("447911123456", &counters).phone_type;
//!
//! assert_eq!(first, PhoneType::Landline);
//! assert_eq!(second, PhoneType::Intl);
//! assert_eq!(CallScope::classify(first, second), CallScope::International);
//! ```

mod rule;
pub mod rules;
mod types;

pub use rule::TypeRule;
pub use rules::{
    EmbeddedLetterRule, InternationalRule, LandlineLengthRule, MobileRule, NewLandlineRule,
    ShortcodeRule,
};
pub use types::{CallScope, PhoneType, TypeVerdict};

use log::trace;

use crate::config::ClassifierConfig;
use crate::counters::CounterRegistry;

/// A classifier that runs rules in order until one matches.
pub struct PhoneTypeClassifier {
    rules: Vec<Box<dyn TypeRule>>,
}

impl PhoneTypeClassifier {
    /// Create an empty classifier (no rules).
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a classifier with the given rules.
    pub fn with_rules(rules: Vec<Box<dyn TypeRule>>) -> Self {
        Self { rules }
    }

    /// Add a rule to the end of the list.
    pub fn add_rule<R: TypeRule + 'static>(&mut self, rule: R) {
        self.rules.push(Box::new(rule));
    }

    /// Create a classifier with the default rules for `config`.
    ///
    /// Rules: NewLandline → LandlineLength → Mobile → Shortcode →
    /// EmbeddedLetter → International → unknown
    pub fn from_config(config: &ClassifierConfig) -> Self {
        let mut classifier = Self::new();
        classifier.add_rule(NewLandlineRule::new(config.new_landline_codes.clone()));
        classifier.add_rule(LandlineLengthRule);
        classifier.add_rule(MobileRule);
        classifier.add_rule(ShortcodeRule);
        classifier.add_rule(EmbeddedLetterRule);
        classifier.add_rule(InternationalRule::new(config.intl_codes.clone()));
        classifier
    }

    /// Classify a normalized number and bump the verdict's counter.
    ///
    /// Numbers no rule claims come back as `Unknown` without touching any
    /// counter.
    pub fn classify(&self, number: &str, counters: &CounterRegistry) -> TypeVerdict {
        let verdict = self
            .rules
            .iter()
            .find_map(|rule| rule.check(number))
            .unwrap_or_else(TypeVerdict::unknown);

        trace!("{:?} -> {} ({})", number, verdict.phone_type, verdict.source);
        if let Some(counter) = verdict.counter {
            counters.increment(counter);
        }
        verdict
    }

    /// Get the number of rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }
}

impl Default for PhoneTypeClassifier {
    fn default() -> Self {
        Self::from_config(&ClassifierConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counters::{Counter, CounterSnapshot};

    struct AlwaysIntl;

    impl TypeRule for AlwaysIntl {
        fn name(&self) -> &'static str {
            "always_intl"
        }

        fn check(&self, _number: &str) -> Option<TypeVerdict> {
            Some(TypeVerdict::intl("always_intl"))
        }
    }

    struct NeverMatches;

    impl TypeRule for NeverMatches {
        fn name(&self) -> &'static str {
            "never_matches"
        }

        fn check(&self, _number: &str) -> Option<TypeVerdict> {
            None
        }
    }

    fn classify(number: &str) -> (TypeVerdict, CounterSnapshot) {
        let classifier = PhoneTypeClassifier::default();
        let counters = CounterRegistry::new();
        let verdict = classifier.classify(number, &counters);
        (verdict, counters.snapshot())
    }

    #[test]
    fn test_empty_classifier_returns_unknown() {
        let classifier = PhoneTypeClassifier::new();
        let counters = CounterRegistry::new();

        let verdict = classifier.classify("123", &counters);
        assert_eq!(verdict.phone_type, PhoneType::Unknown);
        assert_eq!(counters.snapshot(), CounterSnapshot::default());
    }

    #[test]
    fn test_first_match_wins() {
        let mut classifier = PhoneTypeClassifier::new();
        classifier.add_rule(AlwaysIntl);
        classifier.add_rule(ShortcodeRule);

        let counters = CounterRegistry::new();
        let verdict = classifier.classify("123", &counters);
        assert_eq!(verdict.phone_type, PhoneType::Intl);
        assert_eq!(counters.snapshot().get(Counter::ShortcodeCount), 0);
    }

    #[test]
    fn test_skips_non_matching_rules() {
        let classifier =
            PhoneTypeClassifier::with_rules(vec![Box::new(NeverMatches), Box::new(AlwaysIntl)]);
        let counters = CounterRegistry::new();
        assert_eq!(classifier.classify("1", &counters).source, "always_intl");
    }

    #[test]
    fn test_default_rule_order() {
        let classifier = PhoneTypeClassifier::default();
        assert_eq!(classifier.rule_count(), 6);
        assert_eq!(
            classifier.rule_names(),
            vec![
                "new-landline-code",
                "landline-length",
                "mobile-prefix",
                "shortcode-length",
                "embedded-letter",
                "dialing-code",
            ]
        );
    }

    #[test]
    fn test_nine_digits_starting_with_seven_is_landline() {
        let (verdict, snapshot) = classify("712345678");
        assert_eq!(verdict.phone_type, PhoneType::Landline);
        assert_eq!(verdict.source, "landline-length");
        assert_eq!(snapshot.get(Counter::NationalCount), 1);
    }

    #[test]
    fn test_ten_digits_is_landline() {
        let (verdict, snapshot) = classify("7123456789");
        assert_eq!(verdict.phone_type, PhoneType::Landline);
        assert_eq!(snapshot.get(Counter::NationalCount), 1);
    }

    #[test]
    fn test_eleven_digits_with_area_code() {
        let (verdict, snapshot) = classify("20123456789");
        assert_eq!(verdict.phone_type, PhoneType::Landline);
        assert_eq!(verdict.source, "new-landline-code");
        assert_eq!(snapshot.get(Counter::NationalCount), 1);
    }

    #[test]
    fn test_seven_digits_is_shortcode() {
        let (verdict, snapshot) = classify("1234567");
        assert_eq!(verdict.phone_type, PhoneType::Shortcode);
        assert_eq!(snapshot.get(Counter::ShortcodeCount), 1);
        assert_eq!(snapshot.get(Counter::NationalCount), 0);
    }

    #[test]
    fn test_empty_is_shortcode() {
        let (verdict, snapshot) = classify("");
        assert_eq!(verdict.phone_type, PhoneType::Shortcode);
        assert_eq!(snapshot.get(Counter::ShortcodeCount), 1);
    }

    #[test]
    fn test_international_number() {
        let (verdict, snapshot) = classify("447911123456");
        assert_eq!(verdict.phone_type, PhoneType::Intl);
        assert_eq!(snapshot.get(Counter::InternationalCount), 1);
    }

    #[test]
    fn test_eleven_digits_without_area_code_falls_to_dialing_codes() {
        let (verdict, snapshot) = classify("15551234567");
        assert_eq!(verdict.phone_type, PhoneType::Intl);
        assert_eq!(snapshot.get(Counter::InternationalCount), 1);
    }

    #[test]
    fn test_embedded_letter_counts_as_blank() {
        let (verdict, snapshot) = classify("1234A567890");
        assert_eq!(verdict.phone_type, PhoneType::Unknown);
        assert_eq!(verdict.source, "embedded-letter");
        assert_eq!(snapshot.get(Counter::BlankPhoneNumbers), 1);
        assert_eq!(snapshot.get(Counter::InternationalCount), 0);
    }

    #[test]
    fn test_unmatched_long_number_is_unknown() {
        let (verdict, snapshot) = classify("999123456789");
        assert_eq!(verdict.phone_type, PhoneType::Unknown);
        assert_eq!(verdict.source, "no-match");
        assert_eq!(snapshot, CounterSnapshot::default());
    }

    #[test]
    fn test_custom_config() {
        let config = ClassifierConfig {
            new_landline_codes: ["99".to_string()].into_iter().collect(),
            intl_codes: Vec::new(),
        };
        let classifier = PhoneTypeClassifier::from_config(&config);
        let counters = CounterRegistry::new();

        assert_eq!(
            classifier.classify("99123456789", &counters).phone_type,
            PhoneType::Landline
        );
        assert_eq!(
            classifier.classify("447911123456", &counters).phone_type,
            PhoneType::Unknown
        );
    }
}
