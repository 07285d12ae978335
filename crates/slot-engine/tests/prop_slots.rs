//! Property-based tests for slot generation, overlap and filtering.
//!
//! These verify invariants that should hold for any business window, duration
//! and set of exclusions, not just the fixed examples in the other test files.

use proptest::prelude::*;
use slot_engine::{
    filter_available_slots, generate_slots_for_duration, is_overlapping, BusinessHours, Slot,
};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_business_hours() -> impl Strategy<Value = BusinessHours> {
    (0u32..24)
        .prop_flat_map(|start| (Just(start), (start + 1)..=24))
        .prop_map(|(start, end)| BusinessHours::new(start, end).unwrap())
}

/// Any valid slot at minute granularity.
fn arb_slot() -> impl Strategy<Value = Slot> {
    (0u32..1440)
        .prop_flat_map(|start| (Just(start), (start + 1)..=1440))
        .prop_map(|(start, end)| Slot::new(start, end).unwrap())
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn generated_slots_stay_inside_window(hours in arb_business_hours(), duration in 0u32..=26) {
        let slots = generate_slots_for_duration(duration, hours);

        for s in &slots {
            prop_assert!(s.start_minutes() >= hours.start_hour() * 60);
            prop_assert!(s.end_minutes() <= hours.end_hour() * 60);
            prop_assert_eq!(s.duration_minutes(), duration * 60);
            prop_assert_eq!(s.start_minutes() % 60, 0);
        }
    }

    #[test]
    fn slot_count_matches_window(hours in arb_business_hours(), duration in 1u32..=24) {
        let slots = generate_slots_for_duration(duration, hours);
        let expected = (hours.span_hours() + 1).saturating_sub(duration);
        prop_assert_eq!(slots.len() as u32, expected);
    }

    #[test]
    fn generated_slots_are_strictly_ascending(hours in arb_business_hours(), duration in 1u32..=24) {
        let slots = generate_slots_for_duration(duration, hours);
        for pair in slots.windows(2) {
            prop_assert!(pair[0].start_minutes() < pair[1].start_minutes());
        }
    }
}

// ---------------------------------------------------------------------------
// Overlap
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn overlap_is_symmetric(a in arb_slot(), b in arb_slot()) {
        prop_assert_eq!(is_overlapping(&a, &b), is_overlapping(&b, &a));
    }

    #[test]
    fn slot_overlaps_itself(a in arb_slot()) {
        prop_assert!(is_overlapping(&a, &a));
    }

    #[test]
    fn adjacent_slots_never_overlap(start in 0u32..1438, len_a in 1u32..60, len_b in 1u32..60) {
        let split = (start + len_a).min(1439);
        let a = Slot::new(start.min(split - 1), split).unwrap();
        let b = Slot::new(split, (split + len_b).min(1440)).unwrap();
        prop_assert!(!is_overlapping(&a, &b));
    }

    #[test]
    fn string_round_trip_preserves_slot(a in arb_slot()) {
        let parsed: Slot = a.to_string().parse().unwrap();
        prop_assert_eq!(parsed, a);
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn filtering_is_idempotent_and_order_stable(
        duration in 1u32..=4,
        booked in prop::collection::vec(arb_slot(), 0..5),
        disabled in prop::collection::vec(arb_slot(), 0..5),
    ) {
        let all = generate_slots_for_duration(duration, BusinessHours::default());

        let first = filter_available_slots(&all, &booked, &disabled);
        let second = filter_available_slots(&all, &booked, &disabled);

        prop_assert_eq!(&first, &second);
        let order: Vec<Slot> = first.iter().map(|s| s.slot).collect();
        prop_assert_eq!(order, all);
    }

    #[test]
    fn available_slots_overlap_no_booking(
        duration in 1u32..=4,
        booked in prop::collection::vec(arb_slot(), 0..5),
    ) {
        let all = generate_slots_for_duration(duration, BusinessHours::default());
        for s in filter_available_slots(&all, &booked, &[]) {
            let clashes = booked.iter().any(|b| is_overlapping(&s.slot, b));
            prop_assert_eq!(s.available, !clashes);
        }
    }
}
