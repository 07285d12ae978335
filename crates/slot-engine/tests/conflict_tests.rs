//! Tests for slot overlap and conflict detection.

use slot_engine::{find_conflicts, is_overlapping, is_overlapping_str, EngineError, Slot};

fn slot(s: &str) -> Slot {
    s.parse().unwrap()
}

#[test]
fn adjacent_slots_do_not_overlap() {
    assert!(!is_overlapping(&slot("10:00-11:00"), &slot("11:00-12:00")));
    assert!(!is_overlapping(&slot("11:00-12:00"), &slot("10:00-11:00")));
}

#[test]
fn partially_overlapping_slots_overlap() {
    assert!(is_overlapping(&slot("10:00-12:00"), &slot("11:00-13:00")));
    assert!(is_overlapping(&slot("11:00-13:00"), &slot("10:00-12:00")));
}

#[test]
fn contained_slot_overlaps() {
    assert!(is_overlapping(&slot("10:00-13:00"), &slot("11:00-12:00")));
    assert!(is_overlapping(&slot("11:00-12:00"), &slot("10:00-13:00")));
}

#[test]
fn identical_slots_overlap() {
    assert!(is_overlapping(&slot("14:00-15:00"), &slot("14:00-15:00")));
}

#[test]
fn string_form_parses_before_comparing() {
    assert_eq!(is_overlapping_str("10:00-11:00", "11:00-12:00"), Ok(false));
    assert_eq!(is_overlapping_str("10:00-12:00", "11:00-13:00"), Ok(true));
}

#[test]
fn string_form_rejects_malformed_slots() {
    assert_eq!(
        is_overlapping_str("10:00-12:00", "eleven-twelve"),
        Err(EngineError::MalformedSlot("eleven-twelve".to_string()))
    );
    assert!(matches!(
        is_overlapping_str("", "10:00-11:00"),
        Err(EngineError::MalformedSlot(_))
    ));
}

#[test]
fn conflicts_report_overlap_minutes() {
    let candidates = vec![slot("10:00-12:00"), slot("13:00-15:00"), slot("16:00-17:00")];
    let booked = vec![slot("11:30-12:30"), slot("14:00-15:00")];

    let conflicts = find_conflicts(&candidates, &booked);

    assert_eq!(conflicts.len(), 2);
    assert_eq!(conflicts[0].candidate, slot("10:00-12:00"));
    assert_eq!(conflicts[0].overlap_minutes, 30);
    assert_eq!(conflicts[1].booked, slot("14:00-15:00"));
    assert_eq!(conflicts[1].overlap_minutes, 60);
}

#[test]
fn empty_lists_have_no_conflicts() {
    assert!(find_conflicts(&[], &[]).is_empty());
    assert!(find_conflicts(&[slot("10:00-11:00")], &[]).is_empty());
}
