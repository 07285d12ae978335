//! Service duration: package base hours plus hour-extension add-ons.

use std::collections::BTreeMap;

use crate::catalog::{check_extension_hours, Addon, Package};
use crate::error::Result;

/// Hours chosen per time-extension add-on, keyed by add-on id.
pub type ExtraHours = BTreeMap<String, u32>;

/// Classify free-text package duration into whole hours.
///
/// Keyword match only: "3 hour"/"3-hour" is 3, "2 hour"/"90 minutes" is 2,
/// anything else is 1. Matching is case-insensitive.
pub fn derive_base_duration_hours(duration_text: &str) -> u32 {
    let text = duration_text.to_lowercase();

    if text.contains("3 hour") || text.contains("3-hour") {
        3
    } else if text.contains("2 hour") || text.contains("90 minutes") {
        2
    } else {
        if !text.contains("1 hour") && !text.contains("1-hour") {
            tracing::warn!(
                duration = duration_text,
                "unrecognized package duration, falling back to 1 hour"
            );
        }
        1
    }
}

impl Package {
    /// Base service hours. An explicit `duration_minutes` wins (rounded up to
    /// whole hours, at least 1); otherwise the text is classified.
    pub fn base_duration_hours(&self) -> u32 {
        match self.duration_minutes {
            Some(minutes) => minutes.div_ceil(60).max(1),
            None => derive_base_duration_hours(&self.duration),
        }
    }
}

/// Hours contributed by one selected add-on.
///
/// Time extensions use the chosen count from `extra_hours`, or the add-on's
/// default when none was chosen. Standard add-ons contribute 0.
///
/// # Errors
/// Returns `EngineError::InvalidExtensionHours` when a chosen count is outside 1..=4.
pub fn extension_hours(addon: &Addon, extra_hours: &ExtraHours) -> Result<u32> {
    if !addon.is_time_extension() {
        return Ok(0);
    }
    match extra_hours.get(&addon.id) {
        Some(&hours) => check_extension_hours(&addon.id, hours),
        None => Ok(addon.default_hours()),
    }
}

/// Base package hours plus the hours of every selected time-extension add-on.
pub fn compute_total_duration_hours(
    package: &Package,
    selected_addons: &[&Addon],
    extra_hours: &ExtraHours,
) -> Result<u32> {
    let mut total = package.base_duration_hours();
    for addon in selected_addons {
        total += extension_hours(addon, extra_hours)?;
    }
    Ok(total)
}
