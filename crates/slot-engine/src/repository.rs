//! Read-side repository seams and an in-memory store.
//!
//! The engine never talks to a backend directly. Callers inject anything that
//! implements these traits: a database adapter, a remote store client, or the
//! [`InMemoryStore`] used by the CLI and tests.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::availability::{day_availability, DayAvailability, DayRequest, DisabledAvailability, DisabledRecord};
use crate::booking::{Booking, BookingStatus};
use crate::catalog::{Addon, Catalog, Package};
use crate::conflict::is_overlapping;
use crate::draft::BookingDraft;
use crate::error::{EngineError, Result};
use crate::generator::BusinessHours;
use crate::schedule::{Holiday, WorkingDay, WorkingSchedule};
use crate::slot::Slot;

/// Confirmed booking slots grouped by event date.
pub type BookedSlots = BTreeMap<NaiveDate, Vec<Slot>>;

pub trait PackageRepository {
    fn packages(&self) -> Result<Vec<Package>>;
    fn addons(&self) -> Result<Vec<Addon>>;

    fn catalog(&self) -> Result<Catalog> {
        Ok(Catalog::new(self.packages()?, self.addons()?))
    }
}

pub trait BookingRepository {
    fn bookings(&self) -> Result<Vec<Booking>>;

    /// Slots of confirmed bookings grouped by date. Pending, completed and
    /// cancelled bookings do not block slots.
    fn confirmed_booking_slots(&self) -> Result<BookedSlots> {
        let mut by_date = BookedSlots::new();
        for booking in self.bookings()? {
            if booking.is_confirmed() {
                by_date
                    .entry(booking.event_date)
                    .or_default()
                    .push(booking.event_time);
            }
        }
        Ok(by_date)
    }

    fn confirmed_slots_on(&self, date: NaiveDate) -> Result<Vec<Slot>> {
        Ok(self
            .confirmed_booking_slots()?
            .remove(&date)
            .unwrap_or_default())
    }
}

pub trait AvailabilityRepository {
    fn disabled_availability(&self) -> Result<DisabledAvailability>;
    fn working_schedule(&self) -> Result<WorkingSchedule>;
}

/// Compute one day's slots for a draft, reading everything from `store`.
///
/// # Errors
/// Fails if the draft has no package, references unknown catalog entries, or
/// the store cannot be read.
pub fn availability_for_draft<S>(
    store: &S,
    draft: &BookingDraft,
    date: NaiveDate,
    today: NaiveDate,
) -> Result<DayAvailability>
where
    S: PackageRepository + BookingRepository + AvailabilityRepository,
{
    let catalog = store.catalog()?;
    let package_id = draft
        .package_id
        .as_deref()
        .ok_or(EngineError::IncompleteDraft("no package selected"))?;
    let package = catalog.package(package_id)?;
    let addons = catalog.addons_by_id(&draft.addon_ids)?;

    let request = DayRequest {
        package,
        selected_addons: &addons,
        extra_hours: &draft.extra_hours,
        date,
        today,
    };

    day_availability(
        &request,
        &store.confirmed_slots_on(date)?,
        &store.disabled_availability()?,
        &store.working_schedule()?,
    )
}

/// A snapshot of every table the booking flow reads, held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InMemoryStore {
    #[serde(default)]
    pub packages: Vec<Package>,
    #[serde(default)]
    pub addons: Vec<Addon>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
    #[serde(default)]
    pub disabled_availability: Vec<DisabledRecord>,
    #[serde(default)]
    pub working_days: Vec<WorkingDay>,
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    /// Opening window applied when `working_days` is empty.
    #[serde(default)]
    pub business_hours: BusinessHours,
}

impl InMemoryStore {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| EngineError::Store(format!("invalid store snapshot: {e}")))
    }

    /// Insert a booking. A confirmed booking whose slot overlaps another
    /// confirmed booking on the same date is rejected.
    pub fn insert_booking(&mut self, booking: Booking) -> Result<()> {
        if booking.booking_status == BookingStatus::Confirmed {
            self.check_slot_free(&booking)?;
        }
        self.bookings.push(booking);
        Ok(())
    }

    /// Change a stored booking's status, re-checking for overlap when it is
    /// being confirmed.
    pub fn update_status(&mut self, booking_id: &str, next: BookingStatus) -> Result<()> {
        let index = self
            .bookings
            .iter()
            .position(|b| b.id == booking_id)
            .ok_or_else(|| EngineError::Store(format!("booking not found: {booking_id}")))?;

        let current = self.bookings[index].booking_status;
        if next == BookingStatus::Confirmed && current.can_transition_to(next) {
            self.check_slot_free(&self.bookings[index])?;
        }
        self.bookings[index].transition_status(next)
    }

    fn check_slot_free(&self, candidate: &Booking) -> Result<()> {
        let clash = self.bookings.iter().find(|b| {
            b.id != candidate.id
                && b.is_confirmed()
                && b.event_date == candidate.event_date
                && is_overlapping(&candidate.event_time, &b.event_time)
        });
        match clash {
            Some(existing) => Err(EngineError::Store(format!(
                "slot {} on {} overlaps confirmed booking {}",
                candidate.event_time, candidate.event_date, existing.booking_reference
            ))),
            None => Ok(()),
        }
    }
}

impl PackageRepository for InMemoryStore {
    fn packages(&self) -> Result<Vec<Package>> {
        Ok(self.packages.clone())
    }

    fn addons(&self) -> Result<Vec<Addon>> {
        Ok(self.addons.clone())
    }
}

impl BookingRepository for InMemoryStore {
    fn bookings(&self) -> Result<Vec<Booking>> {
        Ok(self.bookings.clone())
    }
}

impl AvailabilityRepository for InMemoryStore {
    fn disabled_availability(&self) -> Result<DisabledAvailability> {
        Ok(DisabledAvailability::from_records(&self.disabled_availability))
    }

    fn working_schedule(&self) -> Result<WorkingSchedule> {
        Ok(WorkingSchedule {
            working_days: self.working_days.clone(),
            holidays: self.holidays.clone(),
            default_hours: self.business_hours,
        })
    }
}
