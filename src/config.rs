//! Classifier configuration.
//!
//! Two tables drive phone-type classification: the two-digit area codes that
//! make an 11-digit number a landline, and the international dialing-code
//! prefixes. Both can be loaded from JSON; [`ClassifierConfig::default`]
//! ships tables for Afghan switches.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Afghan two-digit landline area codes.
const AREA_CODES: &[&str] = &[
    "20", "21", "22", "23", "24", "25", "26", "27", "28", // Kabul region
    "30", "31", "32", "33", "34", // South
    "40", "41", "42", "43", "44", // West
    "50", "51", "52", "53", "54", "55", // North
    "60", "61", "62", "63", "64", "65", // East
];

/// International dialing codes with their country.
///
/// `93` (Afghanistan) is not listed: the normalizer already cuts it from
/// 11-digit numbers.
const DIALING_CODES: &[(&str, &str)] = &[
    ("1", "United States/Canada"),
    ("7", "Russia/Kazakhstan"),
    ("20", "Egypt"),
    ("27", "South Africa"),
    ("30", "Greece"),
    ("31", "Netherlands"),
    ("32", "Belgium"),
    ("33", "France"),
    ("34", "Spain"),
    ("36", "Hungary"),
    ("39", "Italy"),
    ("40", "Romania"),
    ("41", "Switzerland"),
    ("43", "Austria"),
    ("44", "United Kingdom"),
    ("45", "Denmark"),
    ("46", "Sweden"),
    ("47", "Norway"),
    ("48", "Poland"),
    ("49", "Germany"),
    ("60", "Malaysia"),
    ("61", "Australia"),
    ("62", "Indonesia"),
    ("63", "Philippines"),
    ("64", "New Zealand"),
    ("65", "Singapore"),
    ("66", "Thailand"),
    ("81", "Japan"),
    ("82", "South Korea"),
    ("84", "Vietnam"),
    ("86", "China"),
    ("90", "Turkey"),
    ("91", "India"),
    ("92", "Pakistan"),
    ("94", "Sri Lanka"),
    ("95", "Myanmar"),
    ("98", "Iran"),
    ("212", "Morocco"),
    ("213", "Algeria"),
    ("234", "Nigeria"),
    ("254", "Kenya"),
    ("351", "Portugal"),
    ("353", "Ireland"),
    ("358", "Finland"),
    ("380", "Ukraine"),
    ("852", "Hong Kong"),
    ("880", "Bangladesh"),
    ("960", "Maldives"),
    ("961", "Lebanon"),
    ("962", "Jordan"),
    ("963", "Syria"),
    ("964", "Iraq"),
    ("965", "Kuwait"),
    ("966", "Saudi Arabia"),
    ("967", "Yemen"),
    ("968", "Oman"),
    ("971", "United Arab Emirates"),
    ("972", "Israel"),
    ("973", "Bahrain"),
    ("974", "Qatar"),
    ("977", "Nepal"),
    ("992", "Tajikistan"),
    ("993", "Turkmenistan"),
    ("994", "Azerbaijan"),
    ("995", "Georgia"),
    ("996", "Kyrgyzstan"),
    ("998", "Uzbekistan"),
];

static DEFAULT_LANDLINE_CODES: Lazy<HashSet<String>> =
    Lazy::new(|| AREA_CODES.iter().map(|c| c.to_string()).collect());

// Longest prefix first, so "971" is tried before "7" could ever shadow it.
static DEFAULT_INTL_CODES: Lazy<Vec<IntlCode>> = Lazy::new(|| {
    let mut codes: Vec<IntlCode> = DIALING_CODES
        .iter()
        .map(|(prefix, country)| IntlCode::new(*prefix, *country))
        .collect();
    codes.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
    codes
});

/// One international dialing-code entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntlCode {
    /// Dialing-code digits, without `+` or `00`.
    pub prefix: String,
    /// Informational only; classification looks at the prefix.
    #[serde(default)]
    pub country: String,
}

impl IntlCode {
    pub fn new(prefix: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            country: country.into(),
        }
    }
}

/// Tables consumed by the phone-type classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Two-digit prefixes that make an 11-digit number a landline.
    pub new_landline_codes: HashSet<String>,
    /// Dialing-code prefixes, tried in list order.
    pub intl_codes: Vec<IntlCode>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            new_landline_codes: DEFAULT_LANDLINE_CODES.clone(),
            intl_codes: DEFAULT_INTL_CODES.clone(),
        }
    }
}

impl ClassifierConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check that every code is made of ASCII digits of the right length.
    pub fn validate(&self) -> Result<(), Error> {
        for code in &self.new_landline_codes {
            if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::InvalidConfig(format!(
                    "landline code {:?} must be exactly two digits",
                    code
                )));
            }
        }

        for entry in &self.intl_codes {
            if entry.prefix.is_empty() || !entry.prefix.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::InvalidConfig(format!(
                    "dialing code {:?} ({}) must be one or more digits",
                    entry.prefix, entry.country
                )));
            }
        }

        Ok(())
    }
}
