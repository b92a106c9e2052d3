//! Built-in phone-type rules.
//!
//! Default order used by [`crate::PhoneTypeClassifier::from_config`]:
//!
//! - `NewLandlineRule`: 11 digits with a configured area code
//! - `LandlineLengthRule`: 9 or 10 characters
//! - `MobileRule`: 9 characters starting with `7` (never reached, see its docs)
//! - `ShortcodeRule`: under 9 characters
//! - `EmbeddedLetterRule`: one uppercase letter among digits
//! - `InternationalRule`: configured dialing-code prefix

mod international;
mod length;

pub use international::{EmbeddedLetterRule, InternationalRule};
pub use length::{LandlineLengthRule, MobileRule, NewLandlineRule, ShortcodeRule};

pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}
