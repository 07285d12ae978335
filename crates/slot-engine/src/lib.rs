//! # slot-engine
//!
//! Time-slot availability, conflict detection and pricing for an event-booking
//! wizard.
//!
//! Every function here is pure given its inputs: the caller fetches packages,
//! add-ons, confirmed bookings and administrator exclusions from its store
//! (see [`repository`]) and re-runs the computation whenever the selection
//! changes.
//!
//! ## Modules
//!
//! - [`slot`] — `"HH:MM-HH:MM"` half-open slot value type
//! - [`generator`] — business hours → candidate slots for a duration
//! - [`conflict`] — slot overlap and conflict detection
//! - [`duration`] — package duration text + hour-extension add-ons → hours
//! - [`availability`] — booked/disabled filtering, date eligibility, per-day view
//! - [`schedule`] — weekly working days and holidays
//! - [`catalog`] — packages, add-ons, price-ranked tiers
//! - [`pricing`] — totals, 20% advance, remaining balance
//! - [`booking`] — booking records and status transitions
//! - [`draft`] — immutable booking draft with reducer-style actions
//! - [`repository`] — store traits and an in-memory implementation
//! - [`error`] — Error types

pub mod availability;
pub mod booking;
pub mod catalog;
pub mod conflict;
pub mod draft;
pub mod duration;
pub mod error;
pub mod generator;
pub mod pricing;
pub mod repository;
pub mod schedule;
pub mod slot;

pub use availability::{
    day_availability, filter_available_slots, is_date_bookable, is_date_selectable,
    DayAvailability, DayRequest, DisabledAvailability, DisabledKind, DisabledRecord,
    SlotAvailability, UnavailableReason,
};
pub use booking::{booking_reference, Booking, BookingStatus, CustomerDetails, PaymentStatus};
pub use catalog::{derive_tier, present_packages, Addon, AddonType, Catalog, Package, ServiceCategory, Tier};
pub use conflict::{find_conflicts, is_overlapping, is_overlapping_str, Conflict};
pub use draft::{BookingDraft, DraftAction};
pub use duration::{compute_total_duration_hours, derive_base_duration_hours, ExtraHours};
pub use error::EngineError;
pub use generator::{generate_slots_for_duration, BusinessHours};
pub use pricing::{advance_amount, quote, Quote};
pub use repository::{
    availability_for_draft, AvailabilityRepository, BookedSlots, BookingRepository, InMemoryStore,
    PackageRepository,
};
pub use schedule::{Holiday, WorkingDay, WorkingSchedule};
pub use slot::Slot;
