//! Booking records, customer details and administrator status transitions.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::ServiceCategory;
use crate::error::{EngineError, Result};
use crate::slot::Slot;

pub const DEFAULT_GUEST_COUNT: u32 = 2;

fn default_guest_count() -> u32 {
    DEFAULT_GUEST_COUNT
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Pending may be confirmed or cancelled; confirmed may be completed or
    /// cancelled. Completed and cancelled are terminal.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (*self, next),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Completed) | (Confirmed, Cancelled)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Partial,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Partial => "partial",
            PaymentStatus::Paid => "paid",
        }
    }

    pub fn can_transition_to(&self, next: PaymentStatus) -> bool {
        use PaymentStatus::*;
        matches!((*self, next), (Pending, Partial) | (Pending, Paid) | (Partial, Paid))
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Contact details collected in the wizard's details step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default = "default_guest_count")]
    pub guest_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
}

impl CustomerDetails {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: None,
            guest_count: DEFAULT_GUEST_COUNT,
            special_requests: None,
        }
    }

    /// Trim every field, turn blank optionals into `None`, and require a
    /// name, a phone number and at least one guest.
    pub fn validated(self) -> Result<Self> {
        let name = self.name.trim().to_string();
        let phone = self.phone.trim().to_string();
        if name.is_empty() {
            return Err(EngineError::InvalidCustomer("name is required".into()));
        }
        if phone.is_empty() {
            return Err(EngineError::InvalidCustomer("phone is required".into()));
        }
        if self.guest_count == 0 {
            return Err(EngineError::InvalidCustomer(
                "guest count must be at least 1".into(),
            ));
        }
        let non_blank = |v: Option<String>| {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        };
        Ok(Self {
            name,
            phone,
            email: non_blank(self.email),
            guest_count: self.guest_count,
            special_requests: non_blank(self.special_requests),
        })
    }
}

/// A submitted booking as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub booking_reference: String,
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    pub event_date: NaiveDate,
    pub event_time: Slot,
    #[serde(default = "default_guest_count")]
    pub guest_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    pub service_type: ServiceCategory,
    pub selected_package_id: String,
    pub selected_package_name: String,
    pub package_price: u64,
    #[serde(default)]
    pub selected_addons: Vec<String>,
    #[serde(default)]
    pub addons_price: u64,
    pub total_amount: u64,
    pub advance_amount: u64,
    #[serde(default)]
    pub booking_status: BookingStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn remaining_amount(&self) -> u64 {
        self.total_amount.saturating_sub(self.advance_amount)
    }

    pub fn is_confirmed(&self) -> bool {
        self.booking_status == BookingStatus::Confirmed
    }

    /// Apply an administrator status change. Re-applying the current status
    /// is a no-op.
    pub fn transition_status(&mut self, next: BookingStatus) -> Result<()> {
        if self.booking_status == next {
            return Ok(());
        }
        if !self.booking_status.can_transition_to(next) {
            return Err(EngineError::InvalidTransition {
                from: self.booking_status.to_string(),
                to: next.to_string(),
            });
        }
        tracing::info!(
            booking = %self.booking_reference,
            from = %self.booking_status,
            to = %next,
            "booking status changed"
        );
        self.booking_status = next;
        Ok(())
    }

    pub fn record_payment(&mut self, next: PaymentStatus) -> Result<()> {
        if self.payment_status == next {
            return Ok(());
        }
        if !self.payment_status.can_transition_to(next) {
            return Err(EngineError::InvalidTransition {
                from: self.payment_status.to_string(),
                to: next.to_string(),
            });
        }
        self.payment_status = next;
        Ok(())
    }
}

/// Human-facing reference: `CP` + `YYYYMMDD` + last four digits of the
/// creation time in milliseconds.
pub fn booking_reference(now: DateTime<Utc>) -> String {
    format!(
        "CP{}{:04}",
        now.format("%Y%m%d"),
        now.timestamp_millis().rem_euclid(10_000)
    )
}
