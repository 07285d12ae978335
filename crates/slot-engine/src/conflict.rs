//! Detect overlapping slots.
//!
//! Slots are half-open, so a slot ending exactly when another starts is NOT a
//! conflict.

use serde::Serialize;

use crate::error::Result;
use crate::slot::Slot;

/// A detected overlap between a candidate slot and a booked slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub candidate: Slot,
    pub booked: Slot,
    pub overlap_minutes: u32,
}

/// `true` iff `candidate.start < booked.end && candidate.end > booked.start`.
pub fn is_overlapping(candidate: &Slot, booked: &Slot) -> bool {
    candidate.start_minutes() < booked.end_minutes()
        && candidate.end_minutes() > booked.start_minutes()
}

/// Parse two `"HH:MM-HH:MM"` strings and test them for overlap.
///
/// # Errors
/// Returns `EngineError::MalformedSlot` if either string is not a valid slot.
pub fn is_overlapping_str(candidate: &str, booked: &str) -> Result<bool> {
    let candidate: Slot = candidate.parse()?;
    let booked: Slot = booked.parse()?;
    Ok(is_overlapping(&candidate, &booked))
}

/// Find every (candidate, booked) pair that overlaps, with the overlap length.
///
/// The overlap duration is `min(a.end, b.end) - max(a.start, b.start)`.
pub fn find_conflicts(candidates: &[Slot], booked: &[Slot]) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    for a in candidates {
        for b in booked {
            if is_overlapping(a, b) {
                let overlap_start = a.start_minutes().max(b.start_minutes());
                let overlap_end = a.end_minutes().min(b.end_minutes());

                conflicts.push(Conflict {
                    candidate: *a,
                    booked: *b,
                    overlap_minutes: overlap_end - overlap_start,
                });
            }
        }
    }

    conflicts
}
