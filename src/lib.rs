//! msc-cdr - MSC call-detail record normalizer
//!
//! Turns semicolon-delimited CDR lines emitted by a Mobile Switching Center
//! into enriched records: cleaned phone numbers, a phone type per number and
//! a National/International scope per call.
//!
//! # Architecture
//!
//! Each line goes through the same steps:
//! 1. Field extraction by fixed position (`record`)
//! 2. Number cleansing through an ordered rule table (`normalize`)
//! 3. Phone-type cascade, first matching rule wins (`classify`)
//! 4. Call scope from the two phone types (`classify::CallScope`)
//!
//! Every step that counts something writes into a shared [`CounterRegistry`],
//! so a run can be split across any number of threads and still produce the
//! same totals.
//!
//! # Example
//!
//! ```
//! use msc_cdr::{ClassifierConfig, CounterRegistry, RecordPipeline};
//! use msc_cdr::counters::Counter;
//!
//! let pipeline = RecordPipeline::new(ClassifierConfig::default());
//! let counters = CounterRegistry::new();
//!
//! let line = "0;X;PTSU0712345678;791000887654321;a;a;a;a;a;a;a;a;a;20230101;10;60";
//! let record = pipeline.process_line(line, &counters).unwrap();
//!
//! assert_eq!(record.first_num, "712345678");
//! assert_eq!(record.second_num, "887654321");
//! assert_eq!(
//!     record.to_pipe_line(),
//!     "0|712345678|887654321|20230101|10|60|a|a|CALL|National"
//! );
//! assert_eq!(counters.snapshot().get(Counter::StartsWithPtsu), 1);
//! ```

pub use error::Error;

// Positional field extraction
pub mod record;

// Phone number cleansing rules
pub mod normalize;

// Phone type and call scope classification
pub mod classify;

// Shared run counters
pub mod counters;

// Classifier configuration (landline codes, dialing codes)
pub mod config;

// Per-record composition and batch processing
pub mod pipeline;

pub use classify::{CallScope, PhoneType, PhoneTypeClassifier};
pub use config::{ClassifierConfig, IntlCode};
pub use counters::{CounterRegistry, CounterSnapshot};
pub use normalize::NumberNormalizer;
pub use pipeline::{BatchOutput, EnrichedRecord, RecordPipeline};
pub use record::{CallType, CdrRecord};

mod error {
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum Error {
        /// A raw line had fewer fields than positional extraction needs.
        #[error("Malformed record: expected at least {expected} fields, found {found}")]
        MalformedRecord { expected: usize, found: usize },

        /// Configuration values that parse but make no sense.
        #[error("Invalid config: {0}")]
        InvalidConfig(String),

        /// Driver policy: too many malformed lines in one run.
        #[error("Too many malformed records: {malformed} (limit {limit})")]
        MalformedThreshold { malformed: u64, limit: u64 },

        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),

        #[error("Config error: {0}")]
        Config(#[from] serde_json::Error),
    }
}
