//! Rule trait for the phone-type cascade.

use super::TypeVerdict;

/// A single rule in the phone-type cascade.
///
/// Each rule looks at a normalized number and either:
/// - Returns `Some(verdict)` when its predicate holds
/// - Returns `None` to pass to the next rule
///
/// Rules are pure. The cascade bumps the verdict's counter, so a rule can be
/// tested without a [`crate::CounterRegistry`].
pub trait TypeRule: Send + Sync {
    /// The name of this rule (for logging and `TypeVerdict::source`).
    fn name(&self) -> &'static str;

    /// Try to classify the number.
    fn check(&self, number: &str) -> Option<TypeVerdict>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::PhoneType;

    struct FixedRule {
        verdict: Option<TypeVerdict>,
    }

    impl TypeRule for FixedRule {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn check(&self, _number: &str) -> Option<TypeVerdict> {
            self.verdict.clone()
        }
    }

    #[test]
    fn test_rule_trait() {
        let rule = FixedRule {
            verdict: Some(TypeVerdict::shortcode("fixed")),
        };
        assert_eq!(rule.name(), "fixed");
        assert_eq!(rule.check("123").unwrap().phone_type, PhoneType::Shortcode);
    }
}
