//! Per-day slot availability for the booking wizard.
//!
//! Combines the generated slot set for a service duration with two kinds of
//! exclusions: confirmed bookings (interval overlap) and administrator-disabled
//! slots (exact match only). Whole dates drop out when they are in the past,
//! disabled, or closed per the working schedule.
//!
//! Nothing here guarantees that a slot shown as available is still free when
//! the booking is submitted; arbitration of concurrent bookers belongs to the
//! store.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{Addon, Package};
use crate::conflict::is_overlapping;
use crate::duration::{compute_total_duration_hours, ExtraHours};
use crate::error::Result;
use crate::generator::{generate_slots_for_duration, BusinessHours};
use crate::schedule::WorkingSchedule;
use crate::slot::Slot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisabledKind {
    Date,
    Slot,
}

/// One row of the administrator's exclusion table. `kind` decides whether the
/// row blocks the whole date or only `time_slot` on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisabledRecord {
    #[serde(rename = "type")]
    pub kind: DisabledKind,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_slot: Option<Slot>,
}

/// Disabled dates and disabled (date, slot) pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisabledAvailability {
    #[serde(default)]
    pub dates: BTreeSet<NaiveDate>,
    #[serde(default)]
    pub slots: BTreeMap<NaiveDate, BTreeSet<Slot>>,
}

impl DisabledAvailability {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a DisabledRecord>) -> Self {
        let mut disabled = Self::default();
        for record in records {
            match (record.kind, record.time_slot) {
                (DisabledKind::Date, _) => {
                    disabled.dates.insert(record.date);
                }
                (DisabledKind::Slot, Some(slot)) => {
                    disabled.slots.entry(record.date).or_default().insert(slot);
                }
                (DisabledKind::Slot, None) => {
                    tracing::warn!(date = %record.date, "disabled slot row has no time slot, ignoring");
                }
            }
        }
        disabled
    }

    pub fn is_date_disabled(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// Disabled slots on `date`, ascending.
    pub fn slots_for(&self, date: NaiveDate) -> Vec<Slot> {
        self.slots
            .get(&date)
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    /// Overlaps a confirmed booking.
    Booked,
    /// Exactly matches an administrator-disabled slot.
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAvailability {
    pub slot: Slot,
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<UnavailableReason>,
}

/// Mark each slot available or not, preserving input order.
///
/// A slot is unavailable if it overlaps any `booked` slot, or is exactly
/// equal to any `disabled` slot. Disabling does not check overlap: a longer
/// slot that merely covers a disabled one stays available. When both apply,
/// `Booked` is reported.
pub fn filter_available_slots(
    all_slots: &[Slot],
    booked: &[Slot],
    disabled: &[Slot],
) -> Vec<SlotAvailability> {
    all_slots
        .iter()
        .map(|slot| {
            let reason = if booked.iter().any(|b| is_overlapping(slot, b)) {
                Some(UnavailableReason::Booked)
            } else if disabled.contains(slot) {
                Some(UnavailableReason::Disabled)
            } else {
                None
            };
            SlotAvailability {
                slot: *slot,
                available: reason.is_none(),
                reason,
            }
        })
        .collect()
}

/// `false` when `date` is before `today` or is a disabled date.
pub fn is_date_selectable(
    date: NaiveDate,
    today: NaiveDate,
    disabled_dates: &BTreeSet<NaiveDate>,
) -> bool {
    date >= today && !disabled_dates.contains(&date)
}

/// [`is_date_selectable`] plus the working schedule (holidays, closed weekdays).
pub fn is_date_bookable(
    date: NaiveDate,
    today: NaiveDate,
    disabled: &DisabledAvailability,
    schedule: &WorkingSchedule,
) -> bool {
    is_date_selectable(date, today, &disabled.dates) && schedule.is_working_day(date)
}

/// Everything the wizard needs to compute one day's slots.
#[derive(Debug, Clone)]
pub struct DayRequest<'a> {
    pub package: &'a Package,
    pub selected_addons: &'a [&'a Addon],
    pub extra_hours: &'a ExtraHours,
    pub date: NaiveDate,
    pub today: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub duration_hours: u32,
    /// `None` when the date is not bookable.
    pub business_hours: Option<BusinessHours>,
    pub slots: Vec<SlotAvailability>,
}

impl DayAvailability {
    pub fn available_slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.slots.iter().filter(|s| s.available).map(|s| s.slot)
    }
}

/// Compute the slot list for one date.
///
/// `booked` are the confirmed bookings' slots on `request.date`. Dates that
/// are past, disabled or closed yield an empty slot list.
///
/// # Errors
/// Propagates invalid extension hours and malformed working-day hours.
pub fn day_availability(
    request: &DayRequest<'_>,
    booked: &[Slot],
    disabled: &DisabledAvailability,
    schedule: &WorkingSchedule,
) -> Result<DayAvailability> {
    let duration_hours = compute_total_duration_hours(
        request.package,
        request.selected_addons,
        request.extra_hours,
    )?;

    let hours = if is_date_bookable(request.date, request.today, disabled, schedule) {
        schedule.hours_for(request.date)?
    } else {
        None
    };

    let slots = match hours {
        Some(hours) => {
            let all = generate_slots_for_duration(duration_hours, hours);
            filter_available_slots(&all, booked, &disabled.slots_for(request.date))
        }
        None => Vec::new(),
    };

    tracing::debug!(
        date = %request.date,
        package = %request.package.id,
        duration_hours,
        total = slots.len(),
        available = slots.iter().filter(|s| s.available).count(),
        "computed day availability"
    );

    Ok(DayAvailability {
        date: request.date,
        duration_hours,
        business_hours: hours,
        slots,
    })
}
