//! Booking totals: package + add-ons, 20% advance, remaining balance.

use serde::Serialize;

use crate::catalog::{Addon, Package};
use crate::duration::{extension_hours, ExtraHours};
use crate::error::{EngineError, Result};

/// Share of the total collected at booking time, in percent.
pub const ADVANCE_PERCENT: u64 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddonLine {
    pub addon_id: String,
    pub name: String,
    /// Chosen hours for a time extension; `None` for flat-price add-ons.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<u32>,
    pub price: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub package_id: String,
    pub package_price: u64,
    pub addons: Vec<AddonLine>,
    pub addons_price: u64,
    pub total_amount: u64,
    pub advance_amount: u64,
    pub remaining_amount: u64,
}

/// `round(total * 0.2)` with halves rounded up, in integer arithmetic.
pub fn advance_amount(total: u64) -> u64 {
    let advance = (u128::from(total) * u128::from(ADVANCE_PERCENT) + 50) / 100;
    // At most a fifth of `total` plus one, so it always fits.
    u64::try_from(advance).unwrap_or(u64::MAX)
}

/// Price a package with its selected add-ons.
///
/// Time-extension add-ons are priced `hourly_rate * chosen_hours`, using the
/// same hour resolution as the duration calculation.
///
/// # Errors
/// Returns `EngineError::InvalidExtensionHours` for chosen hours outside 1..=4
/// and `EngineError::PriceOverflow` when the total does not fit in `u64`.
pub fn quote(
    package: &Package,
    selected_addons: &[&Addon],
    extra_hours: &ExtraHours,
) -> Result<Quote> {
    let addons = selected_addons
        .iter()
        .map(|addon| -> Result<AddonLine> {
            let hours = if addon.is_time_extension() {
                Some(extension_hours(addon, extra_hours)?)
            } else {
                None
            };
            Ok(AddonLine {
                addon_id: addon.id.clone(),
                name: addon.name.clone(),
                hours,
                price: addon.price_for_hours(hours.unwrap_or(0))?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let overflow = || EngineError::PriceOverflow(format!("total for package '{}'", package.id));
    let addons_price = addons
        .iter()
        .try_fold(0u64, |sum, line| sum.checked_add(line.price))
        .ok_or_else(overflow)?;
    let total_amount = package.price.checked_add(addons_price).ok_or_else(overflow)?;
    let advance = advance_amount(total_amount);

    Ok(Quote {
        package_id: package.id.clone(),
        package_price: package.price,
        addons,
        addons_price,
        total_amount,
        advance_amount: advance,
        remaining_amount: total_amount - advance,
    })
}
