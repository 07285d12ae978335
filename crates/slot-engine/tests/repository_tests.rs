//! Tests for the repository traits against the in-memory store.

use chrono::NaiveDate;
use slot_engine::{
    availability_for_draft, AvailabilityRepository, BookingDraft, BookingRepository, BookingStatus,
    DraftAction, EngineError, InMemoryStore, PackageRepository, Slot,
};

fn store() -> InMemoryStore {
    let json = std::fs::read_to_string(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/store.json"
    ))
    .expect("store.json fixture must exist");
    InMemoryStore::from_json(&json).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn slot(s: &str) -> Slot {
    s.parse().unwrap()
}

fn draft(package_id: &str) -> BookingDraft {
    BookingDraft::new()
        .apply(DraftAction::SelectPackage {
            package_id: package_id.to_string(),
        })
        .unwrap()
}

#[test]
fn snapshot_loads_every_table() {
    let store = store();
    assert_eq!(store.packages().unwrap().len(), 3);
    assert_eq!(store.addons().unwrap().len(), 2);
    assert_eq!(store.bookings().unwrap().len(), 2);

    let catalog = store.catalog().unwrap();
    assert_eq!(catalog.package("pkg_theatre").unwrap().base_duration_hours(), 3);
}

#[test]
fn only_confirmed_bookings_block_slots() {
    let store = store();
    let booked = store.confirmed_booking_slots().unwrap();
    assert_eq!(booked.len(), 1);
    assert_eq!(booked[&date(2026, 3, 20)], [slot("14:00-15:00")]);
    assert!(store.confirmed_slots_on(date(2026, 3, 22)).unwrap().is_empty());
}

#[test]
fn disabled_records_and_schedule_are_exposed() {
    let store = store();
    let disabled = store.disabled_availability().unwrap();
    assert!(disabled.is_date_disabled(date(2026, 3, 21)));
    assert_eq!(disabled.slots_for(date(2026, 3, 20)), [slot("10:00-12:00")]);

    let schedule = store.working_schedule().unwrap();
    assert!(schedule.is_holiday(date(2026, 3, 25)));
    assert!(schedule.is_working_day(date(2026, 3, 22)));
}

#[test]
fn draft_availability_reads_from_store() {
    let store = store();
    let view = availability_for_draft(
        &store,
        &draft("pkg_bday_gold"),
        date(2026, 3, 20),
        date(2026, 3, 16),
    )
    .unwrap();

    assert_eq!(view.duration_hours, 2);
    let unavailable: Vec<String> = view
        .slots
        .iter()
        .filter(|s| !s.available)
        .map(|s| s.slot.to_string())
        .collect();
    // 10-12 disabled, 13-15 and 14-16 overlap the confirmed 14:00-15:00.
    // The pending 17:00-19:00 booking blocks nothing.
    assert_eq!(unavailable, ["10:00-12:00", "13:00-15:00", "14:00-16:00"]);
}

#[test]
fn disabled_and_holiday_dates_have_no_slots() {
    let store = store();
    for day in [date(2026, 3, 21), date(2026, 3, 25), date(2026, 3, 1)] {
        let view =
            availability_for_draft(&store, &draft("pkg_bday_silver"), day, date(2026, 3, 16))
                .unwrap();
        assert!(view.slots.is_empty(), "{day} should have no slots");
    }
}

#[test]
fn draft_without_package_is_rejected() {
    let store = store();
    assert!(matches!(
        availability_for_draft(&store, &BookingDraft::new(), date(2026, 3, 20), date(2026, 3, 16)),
        Err(EngineError::IncompleteDraft(_))
    ));
}

#[test]
fn confirming_an_overlapping_booking_is_rejected() {
    let mut store = store();
    let mut clash = store.bookings[1].clone();
    clash.id = "b3".to_string();
    clash.event_time = slot("14:30-16:30");
    clash.booking_status = BookingStatus::Confirmed;

    assert!(matches!(
        store.insert_booking(clash),
        Err(EngineError::Store(_))
    ));

    // The pending 17:00-19:00 booking does not clash and can be confirmed.
    store.update_status("b2", BookingStatus::Confirmed).unwrap();
    assert_eq!(store.confirmed_slots_on(date(2026, 3, 20)).unwrap().len(), 2);
}

#[test]
fn confirming_into_a_taken_slot_is_rejected() {
    let mut store = store();
    let mut pending = store.bookings[1].clone();
    pending.id = "b4".to_string();
    pending.event_time = slot("13:00-15:00");
    store.insert_booking(pending).unwrap();

    assert!(store.update_status("b4", BookingStatus::Confirmed).is_err());
    assert!(matches!(
        store.update_status("missing", BookingStatus::Confirmed),
        Err(EngineError::Store(_))
    ));
}

#[test]
fn confirming_a_cancelled_booking_reports_the_transition() {
    let mut store = store();
    let mut cancelled = store.bookings[1].clone();
    cancelled.id = "b5".to_string();
    cancelled.event_time = slot("14:00-15:00");
    cancelled.booking_status = BookingStatus::Cancelled;
    store.insert_booking(cancelled).unwrap();

    assert!(matches!(
        store.update_status("b5", BookingStatus::Confirmed),
        Err(EngineError::InvalidTransition { .. })
    ));
}

#[test]
fn invalid_snapshot_is_a_store_error() {
    assert!(matches!(
        InMemoryStore::from_json("{ not json"),
        Err(EngineError::Store(_))
    ));
}
