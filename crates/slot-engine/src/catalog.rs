//! Packages, add-ons and the price-ranked tier ladder.
//!
//! The catalog is administrator-managed and read-only to the booking flow.
//! Tiers are cosmetic: they are derived from a package's price rank within its
//! service category unless the store carries an explicit tier.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Minimum and maximum hours a time-extension add-on may add.
pub const MIN_EXTENSION_HOURS: u32 = 1;
pub const MAX_EXTENSION_HOURS: u32 = 4;

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Birthday,
    Romantic,
    Anniversary,
    Theatre,
}

impl ServiceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::Birthday => "birthday",
            ServiceCategory::Romantic => "romantic",
            ServiceCategory::Anniversary => "anniversary",
            ServiceCategory::Theatre => "theatre",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Silver,
    Gold,
    Diamond,
    Platinum,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Silver => "silver",
            Tier::Gold => "gold",
            Tier::Diamond => "diamond",
            Tier::Platinum => "platinum",
        }
    }

    /// Marketing badge shown on the package card.
    pub fn badge(&self) -> &'static str {
        match self {
            Tier::Silver => "Most Loved",
            Tier::Gold => "Luxury",
            Tier::Diamond | Tier::Platinum => "Elite",
        }
    }

    /// Display name for a package of this tier in the given category.
    pub fn display_name(&self, category: ServiceCategory) -> &'static str {
        use ServiceCategory::*;
        use Tier::*;
        match (category, self) {
            (Birthday, Silver) => "Silver Spark",
            (Birthday, Gold) => "Golden Glow",
            (Birthday, Diamond) => "Diamond",
            (Birthday, Platinum) => "Platinum",
            (Romantic, Silver) => "Silver Romance",
            (Romantic, Gold) => "Golden Romance",
            (Romantic, Diamond) => "Diamond Romance",
            (Romantic, Platinum) => "Platinum Romance",
            (Anniversary, Silver) => "Silver Anniversary",
            (Anniversary, Gold) => "Golden Anniversary",
            (Anniversary, Diamond) => "Diamond Anniversary",
            (Anniversary, Platinum) => "Platinum Anniversary",
            (Theatre, Silver) => "Silver Theatre",
            (Theatre, Gold) => "Golden Theatre",
            (Theatre, Diamond) => "Diamond Theatre",
            (Theatre, Platinum) => "Platinum Theatre",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A bookable package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub id: String,
    pub name: String,
    /// Price in whole currency units.
    pub price: u64,
    pub service_type: ServiceCategory,
    /// Free-text duration as entered by the administrator (e.g. "2 hours").
    #[serde(default)]
    pub duration: String,
    /// Explicit duration; takes precedence over `duration` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub features: Vec<String>,
    /// Stored tier override; `None` means derive from price rank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddonType {
    #[default]
    Standard,
    TimeExtension,
}

/// An optional extra on top of a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addon {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Flat price; for time extensions, the hourly rate when `hourly_rate` is absent.
    pub price: u64,
    #[serde(rename = "type", default)]
    pub addon_type: AddonType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_hours: Option<u32>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Addon {
    pub fn is_time_extension(&self) -> bool {
        self.addon_type == AddonType::TimeExtension
    }

    pub fn hourly_rate(&self) -> u64 {
        self.hourly_rate.unwrap_or(self.price)
    }

    /// Hours used when the customer has not chosen a count.
    pub fn default_hours(&self) -> u32 {
        self.default_hours
            .unwrap_or(MIN_EXTENSION_HOURS)
            .clamp(MIN_EXTENSION_HOURS, MAX_EXTENSION_HOURS)
    }

    /// Price of this add-on given the chosen extension hours (ignored for
    /// standard add-ons).
    ///
    /// # Errors
    /// Returns `EngineError::PriceOverflow` if the hourly total exceeds `u64`.
    pub fn price_for_hours(&self, hours: u32) -> Result<u64> {
        if !self.is_time_extension() {
            return Ok(self.price);
        }
        self.hourly_rate()
            .checked_mul(u64::from(hours))
            .ok_or_else(|| {
                EngineError::PriceOverflow(format!("add-on '{}' for {hours} hours", self.id))
            })
    }
}

/// Validate a chosen extension-hour count for `addon_id`.
pub fn check_extension_hours(addon_id: &str, hours: u32) -> Result<u32> {
    if (MIN_EXTENSION_HOURS..=MAX_EXTENSION_HOURS).contains(&hours) {
        Ok(hours)
    } else {
        Err(EngineError::InvalidExtensionHours {
            addon_id: addon_id.to_string(),
            hours,
        })
    }
}

/// Derive the tier of `package` from its price rank among `all` packages of
/// the same service category.
///
/// One package is gold; two are silver/platinum; three are
/// silver/gold/platinum; four or more are silver/gold/diamond/platinum with
/// every further rank platinum.
pub fn derive_tier(all: &[Package], package: &Package) -> Tier {
    let mut same_category: Vec<&Package> = all
        .iter()
        .filter(|p| p.service_type == package.service_type)
        .collect();
    same_category.sort_by_key(|p| p.price);

    let Some(index) = same_category.iter().position(|p| p.id == package.id) else {
        return Tier::Gold;
    };

    match same_category.len() {
        1 => Tier::Gold,
        2 => [Tier::Silver, Tier::Platinum][index],
        3 => [Tier::Silver, Tier::Gold, Tier::Platinum][index],
        _ => [Tier::Silver, Tier::Gold, Tier::Diamond, Tier::Platinum]
            .get(index)
            .copied()
            .unwrap_or(Tier::Platinum),
    }
}

/// A package decorated with its tier, badge and tier display name.
///
/// The effective tier lives in `tier`; `package.tier` is always `None` so the
/// flattened form carries a single `tier` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageView {
    #[serde(flatten)]
    pub package: Package,
    pub tier: Tier,
    pub badge: &'static str,
    pub display_name: &'static str,
}

/// Decorate every package with its effective tier (stored tier wins).
pub fn present_packages(all: &[Package]) -> Vec<PackageView> {
    all.iter()
        .map(|p| {
            let tier = p.tier.unwrap_or_else(|| derive_tier(all, p));
            PackageView {
                package: Package {
                    tier: None,
                    ..p.clone()
                },
                tier,
                badge: tier.badge(),
                display_name: tier.display_name(p.service_type),
            }
        })
        .collect()
}

/// Read-only view over the packages and add-ons loaded from the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub packages: Vec<Package>,
    #[serde(default)]
    pub addons: Vec<Addon>,
}

impl Catalog {
    pub fn new(packages: Vec<Package>, addons: Vec<Addon>) -> Self {
        Self { packages, addons }
    }

    pub fn package(&self, id: &str) -> Result<&Package> {
        self.packages
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| EngineError::UnknownPackage(id.to_string()))
    }

    pub fn addon(&self, id: &str) -> Result<&Addon> {
        self.addons
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| EngineError::UnknownAddon(id.to_string()))
    }

    /// Resolve add-on ids in the order given.
    pub fn addons_by_id<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<&Addon>> {
        ids.iter().map(|id| self.addon(id.as_ref())).collect()
    }

    /// Active packages of one category, cheapest first.
    pub fn packages_for(&self, category: ServiceCategory) -> Vec<&Package> {
        let mut packages: Vec<&Package> = self
            .packages
            .iter()
            .filter(|p| p.is_active && p.service_type == category)
            .collect();
        packages.sort_by_key(|p| p.price);
        packages
    }

    /// Active add-ons, cheapest first.
    pub fn active_addons(&self) -> Vec<&Addon> {
        let mut addons: Vec<&Addon> = self.addons.iter().filter(|a| a.is_active).collect();
        addons.sort_by_key(|a| a.price);
        addons
    }
}
