//! The booking wizard's working state as an immutable value.
//!
//! Each [`DraftAction`] produces a new draft. Any action that can change the
//! service duration (package, add-on selection, extension hours) or the date
//! clears the selected slot, since the valid slot set may have changed.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::booking::{booking_reference, Booking, BookingStatus, CustomerDetails, PaymentStatus};
use crate::catalog::{check_extension_hours, Catalog};
use crate::duration::{compute_total_duration_hours, ExtraHours};
use crate::error::{EngineError, Result};
use crate::pricing::{quote, Quote};
use crate::slot::Slot;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum DraftAction {
    SelectPackage { package_id: String },
    ToggleAddon { addon_id: String },
    SetExtensionHours { addon_id: String, hours: u32 },
    SelectDate { date: NaiveDate },
    SelectSlot { slot: Slot },
    ClearSlot,
    SetCustomer { customer: CustomerDetails },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDraft {
    #[serde(default)]
    pub package_id: Option<String>,
    /// Selected add-on ids in selection order.
    #[serde(default)]
    pub addon_ids: Vec<String>,
    #[serde(default)]
    pub extra_hours: ExtraHours,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub slot: Option<Slot>,
    #[serde(default)]
    pub customer: Option<CustomerDetails>,
}

impl BookingDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the draft that results from `action`.
    ///
    /// # Errors
    /// `SetExtensionHours` with hours outside 1..=4 is rejected and the draft
    /// is left unchanged.
    pub fn apply(&self, action: DraftAction) -> Result<Self> {
        let mut next = self.clone();
        let invalidates_slot = match action {
            DraftAction::SelectPackage { package_id } => {
                next.package_id = Some(package_id);
                true
            }
            DraftAction::ToggleAddon { addon_id } => {
                if let Some(pos) = next.addon_ids.iter().position(|id| *id == addon_id) {
                    next.addon_ids.remove(pos);
                    next.extra_hours.remove(&addon_id);
                } else {
                    next.addon_ids.push(addon_id);
                }
                true
            }
            DraftAction::SetExtensionHours { addon_id, hours } => {
                let hours = check_extension_hours(&addon_id, hours)?;
                next.extra_hours.insert(addon_id, hours) != Some(hours)
            }
            DraftAction::SelectDate { date } => {
                let changed = next.date != Some(date);
                next.date = Some(date);
                changed
            }
            DraftAction::SelectSlot { slot } => {
                next.slot = Some(slot);
                false
            }
            DraftAction::ClearSlot => true,
            DraftAction::SetCustomer { customer } => {
                next.customer = Some(customer);
                false
            }
        };

        if invalidates_slot {
            if let Some(slot) = next.slot.take() {
                tracing::debug!(%slot, "cleared selected slot after draft change");
            }
        }
        Ok(next)
    }

    pub fn is_addon_selected(&self, addon_id: &str) -> bool {
        self.addon_ids.iter().any(|id| id == addon_id)
    }

    /// Total service hours, or `None` before a package is selected.
    pub fn duration_hours(&self, catalog: &Catalog) -> Result<Option<u32>> {
        let Some(package_id) = self.package_id.as_deref() else {
            return Ok(None);
        };
        let package = catalog.package(package_id)?;
        let addons = catalog.addons_by_id(&self.addon_ids)?;
        compute_total_duration_hours(package, &addons, &self.extra_hours).map(Some)
    }

    pub fn quote(&self, catalog: &Catalog) -> Result<Quote> {
        let package_id = self
            .package_id
            .as_deref()
            .ok_or(EngineError::IncompleteDraft("no package selected"))?;
        let package = catalog.package(package_id)?;
        let addons = catalog.addons_by_id(&self.addon_ids)?;
        quote(package, &addons, &self.extra_hours)
    }

    /// Turn a complete draft into a pending booking.
    ///
    /// # Errors
    /// Fails when the package, date, slot or customer is missing, when the
    /// customer details are invalid, or when the selected slot's length no
    /// longer matches the service duration.
    pub fn to_booking(&self, catalog: &Catalog, now: DateTime<Utc>) -> Result<Booking> {
        let package_id = self
            .package_id
            .as_deref()
            .ok_or(EngineError::IncompleteDraft("no package selected"))?;
        let date = self
            .date
            .ok_or(EngineError::IncompleteDraft("no date selected"))?;
        let slot = self
            .slot
            .ok_or(EngineError::IncompleteDraft("no time slot selected"))?;
        let customer = self
            .customer
            .clone()
            .ok_or(EngineError::IncompleteDraft("no customer details"))?
            .validated()?;

        let package = catalog.package(package_id)?;
        let addons = catalog.addons_by_id(&self.addon_ids)?;
        let duration_hours = compute_total_duration_hours(package, &addons, &self.extra_hours)?;
        if slot.duration_minutes() != duration_hours * 60 {
            return Err(EngineError::IncompleteDraft(
                "selected slot does not match the service duration",
            ));
        }

        let quote = quote(package, &addons, &self.extra_hours)?;
        let reference = booking_reference(now);

        Ok(Booking {
            id: reference.clone(),
            booking_reference: reference,
            customer_name: customer.name,
            customer_phone: customer.phone,
            customer_email: customer.email,
            event_date: date,
            event_time: slot,
            guest_count: customer.guest_count,
            special_requests: customer.special_requests,
            service_type: package.service_type,
            selected_package_id: package.id.clone(),
            selected_package_name: package.name.clone(),
            package_price: quote.package_price,
            selected_addons: self.addon_ids.clone(),
            addons_price: quote.addons_price,
            total_amount: quote.total_amount,
            advance_amount: quote.advance_amount,
            booking_status: BookingStatus::Pending,
            payment_status: PaymentStatus::Pending,
            created_at: now,
        })
    }
}
