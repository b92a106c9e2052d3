//! Run-wide counters shared by every pipeline worker.
//!
//! Counters only ever go up. Increments are relaxed atomic adds, so totals
//! do not depend on how records were spread across threads; read them with
//! [`CounterRegistry::snapshot`] once all workers are done.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A named counter in the run report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Counter {
    InputRecords,
    MalformedRecords,
    BlankPhoneNumbers,
    TotalNumberOccurrences,
    StartsWithPtsu,
    StartsWith2330,
    StartsWith791000,
    StartsWithB0,
    NationalCount,
    InternationalCount,
    ShortcodeCount,
}

impl Counter {
    /// Number of counters.
    pub const COUNT: usize = 11;

    /// Every counter, in report order.
    pub const ALL: [Counter; Counter::COUNT] = [
        Counter::InputRecords,
        Counter::MalformedRecords,
        Counter::BlankPhoneNumbers,
        Counter::TotalNumberOccurrences,
        Counter::StartsWithPtsu,
        Counter::StartsWith2330,
        Counter::StartsWith791000,
        Counter::StartsWithB0,
        Counter::NationalCount,
        Counter::InternationalCount,
        Counter::ShortcodeCount,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Machine name, used as the JSON key.
    pub fn name(&self) -> &'static str {
        match self {
            Counter::InputRecords => "no-input-records",
            Counter::MalformedRecords => "malformed-records",
            Counter::BlankPhoneNumbers => "blank-phone-numbers",
            Counter::TotalNumberOccurrences => "total-number-occurrences",
            Counter::StartsWithPtsu => "starts-with-PTSU",
            Counter::StartsWith2330 => "starts-with-2330",
            Counter::StartsWith791000 => "starts-with-791000",
            Counter::StartsWithB0 => "starts-with-B0",
            Counter::NationalCount => "national-count",
            Counter::InternationalCount => "international-count",
            Counter::ShortcodeCount => "shortcode-count",
        }
    }

    /// Human label used in the printed report.
    pub fn label(&self) -> &'static str {
        match self {
            Counter::InputRecords => "NUMBER OF MSC RECORDS",
            Counter::MalformedRecords => "MALFORMED MSC RECORDS",
            Counter::BlankPhoneNumbers => "INVALID/BLANK PHONE NUMBERS",
            Counter::TotalNumberOccurrences => "TOTAL NUMBER OF PHONE NUMBER OCCURRENCES",
            Counter::StartsWithPtsu => "NUMBERS STARTING WITH PTSU",
            Counter::StartsWith2330 => "NUMBERS STARTING WITH 2330",
            Counter::StartsWith791000 => "NUMBERS STARTING WITH 791000",
            Counter::StartsWithB0 => "NUMBERS STARTING WITH B0",
            Counter::NationalCount => "NUMBER OF NATIONAL NUMBERS",
            Counter::InternationalCount => "NUMBER OF INTERNATIONAL NUMBERS",
            Counter::ShortcodeCount => "NUMBER OF SHORTCODE NUMBERS",
        }
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Shared, thread-safe counter set. All counters start at zero.
pub struct CounterRegistry {
    slots: [AtomicU64; Counter::COUNT],
}

impl CounterRegistry {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| AtomicU64::new(0)),
        }
    }

    /// Add one to `counter`.
    pub fn increment(&self, counter: Counter) {
        self.slots[counter.index()].fetch_add(1, Ordering::Relaxed);
    }

    /// Read every counter at once.
    ///
    /// Only meaningful after all writers have finished.
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            values: std::array::from_fn(|i| self.slots[i].load(Ordering::Relaxed)),
        }
    }
}

impl Default for CounterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CounterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CounterRegistry").field(&self.snapshot()).finish()
    }
}

/// Point-in-time copy of every counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterSnapshot {
    values: [u64; Counter::COUNT],
}

impl CounterSnapshot {
    pub fn get(&self, counter: Counter) -> u64 {
        self.values[counter.index()]
    }

    /// Iterate `(counter, value)` pairs in report order.
    pub fn iter(&self) -> impl Iterator<Item = (Counter, u64)> + '_ {
        Counter::ALL.iter().map(move |&c| (c, self.get(c)))
    }
}

impl Serialize for CounterSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Counter::COUNT))?;
        for (counter, value) in self.iter() {
            map.serialize_entry(counter.name(), &value)?;
        }
        map.end()
    }
}

impl fmt::Display for CounterSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (counter, value) in self.iter() {
            writeln!(f, "{}: {}", counter.label(), value)?;
        }
        Ok(())
    }
}
