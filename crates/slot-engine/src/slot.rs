//! Hour-granular booking slots on a single calendar day.
//!
//! A [`Slot`] is a half-open interval `[start, end)` measured in minutes since
//! midnight. Its canonical text form is `"HH:MM-HH:MM"`, which is also how the
//! booking store records `event_time` and disabled slots. `24:00` is accepted
//! as an end time so a slot may run until midnight.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

const MINUTES_PER_DAY: u32 = 24 * 60;

/// A half-open time interval within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slot {
    start_minutes: u32,
    end_minutes: u32,
}

impl Slot {
    /// Build a slot from minutes since midnight.
    ///
    /// # Errors
    /// Returns `EngineError::MalformedSlot` if `end <= start` or `end` is past midnight.
    pub fn new(start_minutes: u32, end_minutes: u32) -> Result<Self> {
        if end_minutes <= start_minutes || end_minutes > MINUTES_PER_DAY {
            return Err(EngineError::MalformedSlot(format!(
                "{}-{}",
                format_hhmm(start_minutes),
                format_hhmm(end_minutes)
            )));
        }
        Ok(Self {
            start_minutes,
            end_minutes,
        })
    }

    /// Build a slot spanning whole hours, e.g. `from_hours(10, 12)` is `10:00-12:00`.
    pub fn from_hours(start_hour: u32, end_hour: u32) -> Result<Self> {
        Self::new(start_hour * 60, end_hour * 60)
    }

    pub fn start_minutes(&self) -> u32 {
        self.start_minutes
    }

    pub fn end_minutes(&self) -> u32 {
        self.end_minutes
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end_minutes - self.start_minutes
    }

    /// Customer-facing 12-hour rendering, e.g. `"10:00 AM - 1:00 PM"`.
    pub fn to_12_hour_string(&self) -> String {
        format!(
            "{} - {}",
            format_12_hour(self.start_minutes),
            format_12_hour(self.end_minutes)
        )
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            format_hhmm(self.start_minutes),
            format_hhmm(self.end_minutes)
        )
    }
}

impl FromStr for Slot {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || EngineError::MalformedSlot(s.to_string());

        let (start, end) = s.trim().split_once('-').ok_or_else(malformed)?;
        let start = parse_hhmm(start.trim()).ok_or_else(malformed)?;
        let end = parse_hhmm(end.trim()).ok_or_else(malformed)?;

        Slot::new(start, end).map_err(|_| malformed())
    }
}

impl TryFrom<String> for Slot {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Slot> for String {
    fn from(slot: Slot) -> Self {
        slot.to_string()
    }
}

/// Parse `"HH:MM"` (one or two hour digits, exactly two minute digits) into
/// minutes since midnight. `24:00` is the only accepted value past `23:59`.
pub(crate) fn parse_hhmm(s: &str) -> Option<u32> {
    let (h, m) = s.split_once(':')?;
    if h.is_empty() || h.len() > 2 || m.len() != 2 {
        return None;
    }
    if !h.bytes().all(|b| b.is_ascii_digit()) || !m.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: u32 = h.parse().ok()?;
    let minutes: u32 = m.parse().ok()?;
    if minutes >= 60 || hours > 24 || (hours == 24 && minutes != 0) {
        return None;
    }
    Some(hours * 60 + minutes)
}

fn format_hhmm(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

fn format_12_hour(minutes: u32) -> String {
    let hour = (minutes / 60) % 24;
    let minute = minutes % 60;
    let meridiem = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    format!("{}:{:02} {}", display_hour, minute, meridiem)
}
