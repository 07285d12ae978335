//! Weekly working days and holidays.
//!
//! An empty schedule means "open every day" with `default_hours`, which is how
//! the booking flow behaves before an administrator configures working days.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::generator::BusinessHours;
use crate::slot::parse_hhmm;

/// Opening hours for one weekday. `day_of_week` is 0 for Sunday through 6 for Saturday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingDay {
    pub day_of_week: u32,
    pub is_working: bool,
    pub start_time: String,
    pub end_time: String,
}

impl WorkingDay {
    /// Whole-hour window inside `start_time..end_time`: a partial first hour
    /// is skipped and a partial last hour is dropped. `None` when no whole
    /// hour fits.
    ///
    /// # Errors
    /// Returns `EngineError::Store` when either time is not `HH:MM`.
    pub fn business_hours(&self) -> Result<Option<BusinessHours>> {
        let malformed = || {
            EngineError::Store(format!(
                "working day {} has malformed hours {}-{}",
                self.day_of_week, self.start_time, self.end_time
            ))
        };
        let start = parse_hhmm(self.start_time.trim()).ok_or_else(malformed)?;
        let end = parse_hhmm(self.end_time.trim()).ok_or_else(malformed)?;
        let (open, close) = (start.div_ceil(60), end / 60);
        if open >= close {
            return Ok(None);
        }
        BusinessHours::new(open, close).map(Some)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingSchedule {
    #[serde(default)]
    pub working_days: Vec<WorkingDay>,
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    /// Window used on every day when no working days are configured.
    #[serde(default)]
    pub default_hours: BusinessHours,
}

impl WorkingSchedule {
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.iter().any(|h| h.date == date)
    }

    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        if self.is_holiday(date) {
            return false;
        }
        if self.working_days.is_empty() {
            return true;
        }
        let weekday = date.weekday().num_days_from_sunday();
        self.working_days
            .iter()
            .any(|wd| wd.day_of_week == weekday && wd.is_working)
    }

    /// Business hours for `date`, or `None` when closed: a holiday, a
    /// non-working or unconfigured weekday, or a day too short to hold a
    /// whole hour.
    ///
    /// # Errors
    /// Returns an error if the weekday's stored times are malformed.
    pub fn hours_for(&self, date: NaiveDate) -> Result<Option<BusinessHours>> {
        if self.is_holiday(date) {
            return Ok(None);
        }
        if self.working_days.is_empty() {
            return Ok(Some(self.default_hours));
        }
        let weekday = date.weekday().num_days_from_sunday();
        match self
            .working_days
            .iter()
            .find(|wd| wd.day_of_week == weekday && wd.is_working)
        {
            Some(wd) => wd.business_hours(),
            None => Ok(None),
        }
    }
}
