//! Generate the candidate slots for one day from a service duration.
//!
//! Slots start on every whole hour of the business window and last exactly the
//! service duration. The sequence is fully materialized and regenerated on
//! every call.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::slot::Slot;

pub const DEFAULT_BUSINESS_START_HOUR: u32 = 10;
pub const DEFAULT_BUSINESS_END_HOUR: u32 = 20;

/// Opening hours for a single day, at hour granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBusinessHours")]
pub struct BusinessHours {
    start_hour: u32,
    end_hour: u32,
}

#[derive(Deserialize)]
struct RawBusinessHours {
    start_hour: u32,
    end_hour: u32,
}

impl TryFrom<RawBusinessHours> for BusinessHours {
    type Error = EngineError;

    fn try_from(raw: RawBusinessHours) -> Result<Self> {
        BusinessHours::new(raw.start_hour, raw.end_hour)
    }
}

impl BusinessHours {
    /// # Errors
    /// Returns `EngineError::InvalidBusinessHours` unless `start < end <= 24`.
    pub fn new(start_hour: u32, end_hour: u32) -> Result<Self> {
        if start_hour >= end_hour || end_hour > 24 {
            return Err(EngineError::InvalidBusinessHours {
                start: start_hour,
                end: end_hour,
            });
        }
        Ok(Self {
            start_hour,
            end_hour,
        })
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    pub fn span_hours(&self) -> u32 {
        self.end_hour - self.start_hour
    }
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            start_hour: DEFAULT_BUSINESS_START_HOUR,
            end_hour: DEFAULT_BUSINESS_END_HOUR,
        }
    }
}

/// Produce one slot per start hour `h` in `[start, end - duration]`, each
/// lasting `duration_hours`, in ascending order.
///
/// Returns an empty list when the duration is zero or longer than the window.
pub fn generate_slots_for_duration(duration_hours: u32, hours: BusinessHours) -> Vec<Slot> {
    if duration_hours == 0 || duration_hours > hours.span_hours() {
        return Vec::new();
    }

    (hours.start_hour..=hours.end_hour - duration_hours)
        .filter_map(|h| Slot::from_hours(h, h + duration_hours).ok())
        .collect()
}
