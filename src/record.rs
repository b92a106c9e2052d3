//! Positional field extraction from raw MSC lines.

use std::fmt;

use serde::Serialize;

use crate::Error;

/// Field separator used by the switch.
pub const FIELD_SEPARATOR: char = ';';

/// Highest field index read, plus one.
pub const MIN_FIELDS: usize = 16;

const RECORD_TYPE: usize = 0;
const FIRST_NUM: usize = 2;
const SECOND_NUM: usize = 3;
const START_TOWER: usize = 8;
const START_LAC: usize = 10;
const CALL_DATE: usize = 13;
const CALL_HOUR: usize = 14;
const DURATION: usize = 15;

/// Kind of event, derived from the record type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CallType {
    Call,
    Sms,
    EmergencyCall,
    Other,
}

impl CallType {
    /// Map a record type code to a call type.
    ///
    /// `0`/`1` are voice calls, `6`/`7` are SMS, `9` is an emergency call.
    pub fn from_record_type(record_type: &str) -> Self {
        match record_type {
            "0" | "1" => CallType::Call,
            "6" | "7" => CallType::Sms,
            "9" => CallType::EmergencyCall,
            _ => CallType::Other,
        }
    }

    /// Get the string representation used in output lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            CallType::Call => "CALL",
            CallType::Sms => "SMS",
            CallType::EmergencyCall => "Emergency Call",
            CallType::Other => "Other",
        }
    }
}

impl fmt::Display for CallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The fields of one CDR line that the pipeline cares about.
///
/// Numbers are still raw here; see [`crate::NumberNormalizer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CdrRecord {
    pub record_type: String,
    pub first_num: String,
    pub second_num: String,
    pub call_date: String,
    pub call_hour: String,
    pub duration: String,
    pub start_tower: String,
    pub start_lac: String,
    pub call_type: CallType,
}

impl CdrRecord {
    /// Split a raw line on `;` and pick fields by position.
    ///
    /// Lines with fewer than [`MIN_FIELDS`] fields are rejected with
    /// [`Error::MalformedRecord`]. Extra trailing fields are ignored.
    pub fn parse(line: &str) -> Result<Self, Error> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();

        if fields.len() < MIN_FIELDS {
            return Err(Error::MalformedRecord {
                expected: MIN_FIELDS,
                found: fields.len(),
            });
        }

        let record_type = fields[RECORD_TYPE].to_string();
        let call_type = CallType::from_record_type(&record_type);

        Ok(Self {
            record_type,
            first_num: fields[FIRST_NUM].to_string(),
            second_num: fields[SECOND_NUM].to_string(),
            call_date: fields[CALL_DATE].to_string(),
            call_hour: fields[CALL_HOUR].to_string(),
            duration: fields[DURATION].to_string(),
            start_tower: fields[START_TOWER].to_string(),
            start_lac: fields[START_LAC].to_string(),
            call_type,
        })
    }
}
