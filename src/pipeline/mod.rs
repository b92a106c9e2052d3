//! Per-record composition and batch processing.
//!
//! [`RecordPipeline`] turns one raw line into an [`EnrichedRecord`]:
//! extraction, then normalization and classification of each number on its
//! own, then the call scope. Nothing is shared between records except the
//! [`CounterRegistry`], so a batch can be split across threads freely.


use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;

use crate::classify::{CallScope, PhoneType, PhoneTypeClassifier};
use crate::config::ClassifierConfig;
use crate::counters::{Counter, CounterRegistry};
use crate::normalize::NumberNormalizer;
use crate::record::{CallType, CdrRecord};
use crate::Error;

/// Separator for output lines.
pub const OUTPUT_SEPARATOR: &str = "|";

/// A fully processed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedRecord {
    pub record_type: String,
    /// Normalized first number.
    pub first_num: String,
    /// Normalized second number.
    pub second_num: String,
    pub call_date: String,
    pub call_hour: String,
    pub duration: String,
    pub start_tower: String,
    pub start_lac: String,
    pub call_type: CallType,
    pub first_phone_type: PhoneType,
    pub second_phone_type: PhoneType,
    pub call_scope: CallScope,
}

impl EnrichedRecord {
    /// Render as a pipe-delimited output line.
    ///
    /// Field order: RecordType, FirstNum, SecondNum, CallDate, CallHour,
    /// Duration, StartTower, StartLAC, CallType, CallScope.
    pub fn to_pipe_line(&self) -> String {
        [
            self.record_type.as_str(),
            self.first_num.as_str(),
            self.second_num.as_str(),
            self.call_date.as_str(),
            self.call_hour.as_str(),
            self.duration.as_str(),
            self.start_tower.as_str(),
            self.start_lac.as_str(),
            self.call_type.as_str(),
            self.call_scope.as_str(),
        ]
        .join(OUTPUT_SEPARATOR)
    }
}

/// Records produced from a batch of lines.
#[derive(Debug, Clone, Default)]
pub struct BatchOutput {
    /// Enriched records, in input order.
    pub records: Vec<EnrichedRecord>,
    /// Lines skipped as malformed in this batch.
    pub malformed: u64,
}

/// Extraction, normalization and classification for one line at a time.
pub struct RecordPipeline {
    normalizer: NumberNormalizer,
    classifier: PhoneTypeClassifier,
}

impl RecordPipeline {
    /// Create a pipeline with the default rules for `config`.
    pub fn new(config: ClassifierConfig) -> Self {
        Self::with_classifier(PhoneTypeClassifier::from_config(&config))
    }

    /// Create a pipeline around a custom classifier.
    pub fn with_classifier(classifier: PhoneTypeClassifier) -> Self {
        Self {
            normalizer: NumberNormalizer::new(),
            classifier,
        }
    }

    /// Process one raw line.
    ///
    /// Counts the line in `no-input-records` whatever happens; a malformed
    /// line is also counted in `malformed-records` and returned as an error.
    pub fn process_line(
        &self,
        line: &str,
        counters: &CounterRegistry,
    ) -> Result<EnrichedRecord, Error> {
        counters.increment(Counter::InputRecords);

        let record = match CdrRecord::parse(line) {
            Ok(record) => record,
            Err(e) => {
                counters.increment(Counter::MalformedRecords);
                return Err(e);
            }
        };

        Ok(self.enrich(record, counters))
    }

    /// Normalize and classify an already extracted record.
    pub fn enrich(&self, record: CdrRecord, counters: &CounterRegistry) -> EnrichedRecord {
        let first_num = self.normalizer.normalize(&record.first_num, counters);
        let second_num = self.normalizer.normalize(&record.second_num, counters);

        let first_phone_type = self.classifier.classify(&first_num, counters).phone_type;
        let second_phone_type = self.classifier.classify(&second_num, counters).phone_type;

        EnrichedRecord {
            record_type: record.record_type,
            first_num,
            second_num,
            call_date: record.call_date,
            call_hour: record.call_hour,
            duration: record.duration,
            start_tower: record.start_tower,
            start_lac: record.start_lac,
            call_type: record.call_type,
            first_phone_type,
            second_phone_type,
            call_scope: CallScope::classify(first_phone_type, second_phone_type),
        }
    }

    /// Process lines one after another, skipping malformed ones.
    pub fn process_lines<I, S>(&self, lines: I, counters: &CounterRegistry) -> BatchOutput
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut output = BatchOutput::default();
        for line in lines {
            match self.process_line(line.as_ref(), counters) {
                Ok(record) => output.records.push(record),
                Err(e) => {
                    debug!("Skipping line: {}", e);
                    output.malformed += 1;
                }
            }
        }
        output
    }

    /// Process a batch on the rayon thread pool, skipping malformed lines.
    ///
    /// Records come back in input order. Counter totals are the same as
    /// with [`RecordPipeline::process_lines`].
    pub fn process_batch<S>(&self, lines: &[S], counters: &CounterRegistry) -> BatchOutput
    where
        S: AsRef<str> + Sync,
    {
        let results: Vec<Result<EnrichedRecord, Error>> = lines
            .par_iter()
            .map(|line| self.process_line(line.as_ref(), counters))
            .collect();

        let mut output = BatchOutput {
            records: Vec::with_capacity(results.len()),
            malformed: 0,
        };
        for result in results {
            match result {
                Ok(record) => output.records.push(record),
                Err(e) => {
                    debug!("Skipping line: {}", e);
                    output.malformed += 1;
                }
            }
        }

        info!(
            "Processed {} lines: {} records, {} malformed",
            lines.len(),
            output.records.len(),
            output.malformed
        );
        output
    }
}

impl Default for RecordPipeline {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}
