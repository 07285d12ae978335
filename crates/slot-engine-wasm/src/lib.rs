//! WASM bindings for slot-engine.
//!
//! Exposes slot generation, overlap checks, availability filtering, duration
//! and pricing to the browser booking wizard via `wasm-bindgen`. All complex
//! types are passed as JSON strings; slots cross the boundary in their
//! `"HH:MM-HH:MM"` form and dates as `YYYY-MM-DD`.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;
use slot_engine::{Addon, BusinessHours, ExtraHours, Package, Slot};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn from_json<T: serde::de::DeserializeOwned>(json: &str, what: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("Invalid {} JSON: {}", what, e)))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", s, e)))
}

/// Optional extra-hours JSON object (`{"addon_id": hours}`); empty string means none.
fn parse_extra_hours(json: &str) -> Result<ExtraHours, JsValue> {
    if json.trim().is_empty() {
        return Ok(ExtraHours::new());
    }
    from_json(json, "extra hours")
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Generate every slot of `duration_hours` within `[start_hour, end_hour)`.
///
/// Returns a JSON array of slot strings, e.g. `["10:00-12:00","11:00-13:00"]`.
#[wasm_bindgen(js_name = "generateSlots")]
pub fn generate_slots(duration_hours: u32, start_hour: u32, end_hour: u32) -> Result<String, JsValue> {
    let hours = BusinessHours::new(start_hour, end_hour).map_err(js_err)?;
    let slots = slot_engine::generate_slots_for_duration(duration_hours, hours);
    to_json(&slots)
}

/// `true` iff the two `"HH:MM-HH:MM"` slots overlap (adjacent slots do not).
#[wasm_bindgen(js_name = "isOverlapping")]
pub fn is_overlapping(candidate: &str, booked: &str) -> Result<bool, JsValue> {
    slot_engine::is_overlapping_str(candidate, booked).map_err(js_err)
}

/// Mark each slot available or unavailable.
///
/// All three arguments are JSON arrays of slot strings. Returns a JSON array of
/// `{slot, available, reason?}` objects in input order.
#[wasm_bindgen(js_name = "filterAvailableSlots")]
pub fn filter_available_slots(
    slots_json: &str,
    booked_json: &str,
    disabled_json: &str,
) -> Result<String, JsValue> {
    let all: Vec<Slot> = from_json(slots_json, "slots")?;
    let booked: Vec<Slot> = from_json(booked_json, "booked slots")?;
    let disabled: Vec<Slot> = from_json(disabled_json, "disabled slots")?;

    to_json(&slot_engine::filter_available_slots(&all, &booked, &disabled))
}

/// Total service hours for a package plus selected add-ons.
///
/// `package_json` is a package object, `addons_json` an array of the selected
/// add-on objects, and `extra_hours_json` an object mapping time-extension
/// add-on ids to chosen hours (or an empty string).
#[wasm_bindgen(js_name = "computeTotalDuration")]
pub fn compute_total_duration(
    package_json: &str,
    addons_json: &str,
    extra_hours_json: &str,
) -> Result<u32, JsValue> {
    let package: Package = from_json(package_json, "package")?;
    let addons: Vec<Addon> = from_json(addons_json, "add-ons")?;
    let extra = parse_extra_hours(extra_hours_json)?;
    let selected: Vec<&Addon> = addons.iter().collect();

    slot_engine::compute_total_duration_hours(&package, &selected, &extra).map_err(js_err)
}

/// Price breakdown (package, add-on lines, total, 20% advance, remaining).
///
/// Arguments as for [`compute_total_duration`]. Returns a JSON quote object.
#[wasm_bindgen(js_name = "quoteBooking")]
pub fn quote_booking(
    package_json: &str,
    addons_json: &str,
    extra_hours_json: &str,
) -> Result<String, JsValue> {
    let package: Package = from_json(package_json, "package")?;
    let addons: Vec<Addon> = from_json(addons_json, "add-ons")?;
    let extra = parse_extra_hours(extra_hours_json)?;
    let selected: Vec<&Addon> = addons.iter().collect();

    let quote = slot_engine::quote(&package, &selected, &extra).map_err(js_err)?;
    to_json(&quote)
}

/// `false` for dates before `today` or listed in `disabled_dates_json`
/// (a JSON array of `YYYY-MM-DD` strings).
#[wasm_bindgen(js_name = "isDateSelectable")]
pub fn is_date_selectable(date: &str, today: &str, disabled_dates_json: &str) -> Result<bool, JsValue> {
    let date = parse_date(date)?;
    let today = parse_date(today)?;
    let disabled: BTreeSet<NaiveDate> = from_json(disabled_dates_json, "disabled dates")?;

    Ok(slot_engine::is_date_selectable(date, today, &disabled))
}

/// Decorate a JSON array of packages with derived tier, badge and display name.
#[wasm_bindgen(js_name = "assignTiers")]
pub fn assign_tiers(packages_json: &str) -> Result<String, JsValue> {
    let packages: Vec<Package> = from_json(packages_json, "packages")?;
    to_json(&slot_engine::present_packages(&packages))
}
