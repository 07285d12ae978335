//! Tests for package duration classification and extension hours.

use slot_engine::catalog::AddonType;
use slot_engine::{
    compute_total_duration_hours, derive_base_duration_hours, generate_slots_for_duration, Addon,
    BusinessHours, EngineError, ExtraHours, Package, ServiceCategory,
};

fn package(duration: &str) -> Package {
    Package {
        id: "pkg".to_string(),
        name: "Test Package".to_string(),
        price: 999,
        service_type: ServiceCategory::Birthday,
        duration: duration.to_string(),
        duration_minutes: None,
        features: vec![],
        tier: None,
        is_active: true,
    }
}

fn extension(id: &str, default_hours: Option<u32>) -> Addon {
    Addon {
        id: id.to_string(),
        name: "Extra Hour".to_string(),
        description: String::new(),
        price: 300,
        addon_type: AddonType::TimeExtension,
        hourly_rate: Some(300),
        default_hours,
        is_active: true,
    }
}

fn flat(id: &str) -> Addon {
    Addon {
        id: id.to_string(),
        name: "Flower Bouquet".to_string(),
        description: String::new(),
        price: 100,
        addon_type: AddonType::Standard,
        hourly_rate: None,
        default_hours: None,
        is_active: true,
    }
}

#[test]
fn two_hour_text_is_two_hours() {
    assert_eq!(derive_base_duration_hours("2 hours"), 2);
    assert_eq!(derive_base_duration_hours("Approx. 2 Hours of celebration"), 2);
    assert_eq!(derive_base_duration_hours("90 minutes"), 2);
}

#[test]
fn three_hour_text_is_three_hours() {
    assert_eq!(derive_base_duration_hours("3 hours"), 3);
    assert_eq!(derive_base_duration_hours("3-hour premium show"), 3);
}

#[test]
fn unrecognized_text_defaults_to_one_hour() {
    assert_eq!(derive_base_duration_hours("1 hour"), 1);
    assert_eq!(derive_base_duration_hours(""), 1);
    assert_eq!(derive_base_duration_hours("all evening"), 1);
    assert_eq!(derive_base_duration_hours("45 minutes"), 1);
}

#[test]
fn explicit_minutes_win_over_text() {
    let mut pkg = package("1 hour");
    pkg.duration_minutes = Some(150);
    assert_eq!(pkg.base_duration_hours(), 3);

    pkg.duration_minutes = Some(90);
    assert_eq!(pkg.base_duration_hours(), 2);

    pkg.duration_minutes = Some(0);
    assert_eq!(pkg.base_duration_hours(), 1);
}

#[test]
fn no_addons_is_base_duration() {
    let pkg = package("2 hours");
    assert_eq!(
        compute_total_duration_hours(&pkg, &[], &ExtraHours::new()),
        Ok(2)
    );
}

#[test]
fn flat_addons_add_no_time() {
    let pkg = package("1 hour");
    let bouquet = flat("addon_bouquet");
    assert_eq!(
        compute_total_duration_hours(&pkg, &[&bouquet], &ExtraHours::new()),
        Ok(1)
    );
}

#[test]
fn chosen_extension_hours_are_added() {
    let pkg = package("1 hour");
    let ext = extension("addon_extra_time", Some(1));
    let extra = ExtraHours::from([("addon_extra_time".to_string(), 2)]);

    let total = compute_total_duration_hours(&pkg, &[&ext], &extra).unwrap();
    assert_eq!(total, 3);

    let slots = generate_slots_for_duration(total, BusinessHours::default());
    assert_eq!(slots.last().unwrap().to_string(), "17:00-20:00");
}

#[test]
fn unchosen_extension_uses_default_hours() {
    let pkg = package("2 hours");
    let ext = extension("addon_extra_time", Some(2));
    assert_eq!(
        compute_total_duration_hours(&pkg, &[&ext], &ExtraHours::new()),
        Ok(4)
    );

    let no_default = extension("addon_extra_time", None);
    assert_eq!(
        compute_total_duration_hours(&pkg, &[&no_default], &ExtraHours::new()),
        Ok(3)
    );
}

#[test]
fn unselected_extension_contributes_nothing() {
    let pkg = package("1 hour");
    let extra = ExtraHours::from([("addon_extra_time".to_string(), 4)]);
    assert_eq!(compute_total_duration_hours(&pkg, &[], &extra), Ok(1));
}

#[test]
fn out_of_range_hours_are_rejected() {
    let pkg = package("1 hour");
    let ext = extension("addon_extra_time", Some(1));

    for hours in [0, 5, 12] {
        let extra = ExtraHours::from([("addon_extra_time".to_string(), hours)]);
        assert_eq!(
            compute_total_duration_hours(&pkg, &[&ext], &extra),
            Err(EngineError::InvalidExtensionHours {
                addon_id: "addon_extra_time".to_string(),
                hours,
            })
        );
    }
}
