//! Property-based tests for counter aggregation
//!
//! These tests verify invariants that should hold for all inputs:
//! - Counter totals do not depend on how lines are split across workers
//! - Parallel and sequential batches give the same records and totals
//! - Normalizing a normalized digit string changes nothing

use msc_cdr::counters::Counter;
use msc_cdr::{CounterRegistry, NumberNormalizer, RecordPipeline};
use proptest::prelude::*;
use std::thread;

/// Raw number fields in the shapes the switch produces
fn raw_number() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[0-9]{3,14}",
        "0{1,3}[1-9][0-9]{8,12}",
        "PTSU0?[0-9]{8,10}",
        "2330[0-9]{8,11}",
        "791000[0-9]{6,9}",
        "B0[0-9]{8,10}",
        "1[Aa][0-9]{8,10}",
        "[0-9]{8,10}[A-Za-z]{1,2}",
        "[0-9]{4,6}[A-Z][0-9]{4,6}",
    ]
}

/// Whole CDR lines, some of them truncated
fn cdr_line() -> impl Strategy<Value = String> {
    prop_oneof![
        9 => ("[0-9]", raw_number(), raw_number()).prop_map(|(rt, a, b)| {
            format!("{};x;{};{};0;0;0;0;41201;0;1130;0;0;20230101;10;60", rt, a, b)
        }),
        1 => "[0-9;]{0,20}",
    ]
}

/// Process `lines` in `parts` chunks on separate threads sharing one registry
fn run_partitioned(lines: &[String], parts: usize) -> CounterRegistry {
    let pipeline = RecordPipeline::default();
    let counters = CounterRegistry::new();
    let chunk = lines.len().div_ceil(parts).max(1);

    thread::scope(|scope| {
        for part in lines.chunks(chunk) {
            let pipeline = &pipeline;
            let counters = &counters;
            scope.spawn(move || pipeline.process_lines(part, counters));
        }
    });
    counters
}

proptest! {
    /// Property: totals are identical for any partitioning of the stream
    #[test]
    fn prop_totals_independent_of_partitioning(
        lines in prop::collection::vec(cdr_line(), 0..60),
        parts in 1usize..8,
    ) {
        let single = run_partitioned(&lines, 1).snapshot();
        let split = run_partitioned(&lines, parts).snapshot();
        prop_assert_eq!(single, split);
        prop_assert_eq!(single.get(Counter::InputRecords), lines.len() as u64);
    }

    /// Property: the rayon batch agrees with a sequential pass
    #[test]
    fn prop_batch_matches_sequential(lines in prop::collection::vec(cdr_line(), 0..60)) {
        let pipeline = RecordPipeline::default();

        let sequential = CounterRegistry::new();
        let seq_out = pipeline.process_lines(&lines, &sequential);

        let parallel = CounterRegistry::new();
        let par_out = pipeline.process_batch(lines.as_slice(), &parallel);

        prop_assert_eq!(sequential.snapshot(), parallel.snapshot());
        prop_assert_eq!(seq_out.records, par_out.records);
        prop_assert_eq!(seq_out.malformed, par_out.malformed);
    }

    /// Property: every non-blank number is counted exactly once
    #[test]
    fn prop_every_number_counted_once(numbers in prop::collection::vec(raw_number(), 0..40)) {
        let normalizer = NumberNormalizer::new();
        let counters = CounterRegistry::new();
        for number in &numbers {
            normalizer.normalize(number, &counters);
        }

        let snapshot = counters.snapshot();
        let blanks = numbers.iter().filter(|n| n.is_empty()).count() as u64;
        prop_assert_eq!(snapshot.get(Counter::BlankPhoneNumbers), blanks);
        prop_assert_eq!(
            snapshot.get(Counter::TotalNumberOccurrences),
            numbers.len() as u64 - blanks
        );
    }

    /// Property: digit strings without a known prefix are a fixed point
    #[test]
    fn prop_clean_number_is_fixed_point(
        number in "[1-8][0-9]{2,9}"
            .prop_filter("gateway prefix", |n| !n.starts_with("2330") && !n.starts_with("791000"))
    ) {
        let normalizer = NumberNormalizer::new();
        let counters = CounterRegistry::new();

        let once = normalizer.normalize(&number, &counters);
        let twice = normalizer.normalize(&once, &counters);
        prop_assert_eq!(&once, &number);
        prop_assert_eq!(once, twice);
    }
}
