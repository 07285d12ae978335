//! `slots` CLI — query booking slots, quotes and date availability from a
//! store snapshot.
//!
//! ## Usage
//!
//! ```sh
//! # Slots for a 2-hour package on a date
//! slots --store store.json slots --date 2026-03-20 --package pkg_bday_gold
//!
//! # Add a time extension of 2 hours
//! slots --store store.json slots --date 2026-03-20 --package pkg_bday_silver \
//!   --addon addon_time --hours addon_time=2
//!
//! # Price breakdown with the 20% advance
//! slots --store store.json quote --package pkg_bday_gold --addon addon_photos
//!
//! # Can this date be booked?
//! slots --store store.json check-date --date 2026-03-25
//!
//! # Do two slots overlap? (no store needed)
//! slots overlap 10:00-12:00 11:00-13:00
//!
//! # Packages with their price-ranked tiers, as JSON
//! slots --store store.json --json tiers
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

mod config;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use slot_engine::{
    availability_for_draft, is_date_selectable, is_overlapping_str, present_packages,
    AvailabilityRepository, BookingDraft, DraftAction, PackageRepository, ServiceCategory,
    UnavailableReason,
};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Booking slot availability and pricing"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Store snapshot (JSON with packages, addons, bookings, disabled_availability, ...)
    #[arg(long, env = "SLOTS_STORE", global = true)]
    store: Option<std::path::PathBuf>,

    /// Treat this date as today (YYYY-MM-DD); defaults to the local date
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    /// Opening hour used when the store has no working days
    #[arg(long, env = "SLOTS_BUSINESS_START", global = true)]
    open_hour: Option<u32>,

    /// Closing hour used when the store has no working days
    #[arg(long, env = "SLOTS_BUSINESS_END", global = true)]
    close_hour: Option<u32>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the slots for a package on a date, marking unavailable ones
    Slots {
        /// Event date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Package id
        #[arg(long)]
        package: String,
        /// Selected add-on id (repeatable)
        #[arg(long = "addon")]
        addons: Vec<String>,
        /// Extension hours as ADDON=HOURS (repeatable)
        #[arg(long = "hours", value_parser = parse_extension_hours)]
        hours: Vec<(String, u32)>,
    },
    /// Show the price breakdown for a package and add-ons
    Quote {
        /// Package id
        #[arg(long)]
        package: String,
        /// Selected add-on id (repeatable)
        #[arg(long = "addon")]
        addons: Vec<String>,
        /// Extension hours as ADDON=HOURS (repeatable)
        #[arg(long = "hours", value_parser = parse_extension_hours)]
        hours: Vec<(String, u32)>,
    },
    /// Check whether a date can be booked
    CheckDate {
        /// Date to check (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
    },
    /// Check whether two HH:MM-HH:MM slots overlap
    Overlap {
        candidate: String,
        booked: String,
    },
    /// List packages with their tier, badge and display name
    Tiers {
        /// Only packages of this category
        #[arg(long, value_enum)]
        category: Option<Category>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Category {
    Birthday,
    Romantic,
    Anniversary,
    Theatre,
}

impl From<Category> for ServiceCategory {
    fn from(c: Category) -> Self {
        match c {
            Category::Birthday => ServiceCategory::Birthday,
            Category::Romantic => ServiceCategory::Romantic,
            Category::Anniversary => ServiceCategory::Anniversary,
            Category::Theatre => ServiceCategory::Theatre,
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::new(cli.store, cli.today, cli.open_hour, cli.close_hour, cli.json)?;

    match cli.command {
        Commands::Slots {
            date,
            package,
            addons,
            hours,
        } => {
            let store = config.load_store()?;
            let draft = build_draft(&package, &addons, &hours)?.apply(DraftAction::SelectDate { date })?;
            let day = availability_for_draft(&store, &draft, date, config.today)
                .context("Failed to compute availability")?;

            if config.json {
                print_json(&day)?;
            } else if day.slots.is_empty() {
                println!(
                    "{} ({} hour service): no time slots available for this day.",
                    date, day.duration_hours
                );
            } else {
                println!("{} ({} hour service)", date, day.duration_hours);
                for s in &day.slots {
                    let status = match s.reason {
                        None => "available",
                        Some(UnavailableReason::Booked) => "booked",
                        Some(UnavailableReason::Disabled) => "disabled",
                    };
                    println!("  {}  {:<22} {}", s.slot, s.slot.to_12_hour_string(), status);
                }
            }
        }
        Commands::Quote {
            package,
            addons,
            hours,
        } => {
            let store = config.load_store()?;
            let catalog = store.catalog()?;
            let quote = build_draft(&package, &addons, &hours)?
                .quote(&catalog)
                .context("Failed to price booking")?;

            if config.json {
                print_json(&quote)?;
            } else {
                println!("Package {:<28} {:>8}", quote.package_id, quote.package_price);
                for line in &quote.addons {
                    let label = match line.hours {
                        Some(h) => format!("{} ({}h)", line.name, h),
                        None => line.name.clone(),
                    };
                    println!("  + {:<32} {:>8}", label, line.price);
                }
                println!("Total{:>39}", quote.total_amount);
                println!("Advance (20%){:>31}", quote.advance_amount);
                println!("Remaining{:>35}", quote.remaining_amount);
            }
        }
        Commands::CheckDate { date } => {
            let store = config.load_store()?;
            let disabled = store.disabled_availability()?;
            let schedule = store.working_schedule()?;

            let reason = if !is_date_selectable(date, config.today, &disabled.dates) {
                Some(if date < config.today { "past date" } else { "disabled by administrator" })
            } else if schedule.is_holiday(date) {
                Some("holiday")
            } else if !schedule.is_working_day(date) {
                Some("closed on this weekday")
            } else {
                None
            };

            let check = DateCheck {
                date,
                bookable: reason.is_none(),
                reason,
            };
            if config.json {
                print_json(&check)?;
            } else {
                match check.reason {
                    None => println!("{}: bookable", date),
                    Some(reason) => println!("{}: not bookable ({})", date, reason),
                }
            }
        }
        Commands::Overlap { candidate, booked } => {
            let overlapping =
                is_overlapping_str(&candidate, &booked).context("Failed to compare slots")?;
            if config.json {
                print_json(&serde_json::json!({ "overlapping": overlapping }))?;
            } else {
                println!("{}", if overlapping { "overlap" } else { "no overlap" });
            }
        }
        Commands::Tiers { category } => {
            let store = config.load_store()?;
            let packages = store.packages()?;
            let mut views = present_packages(&packages);
            if let Some(category) = category {
                let category = ServiceCategory::from(category);
                views.retain(|v| v.package.service_type == category);
            }
            views.sort_by_key(|v| (v.package.service_type, v.package.price));

            if config.json {
                print_json(&views)?;
            } else {
                for v in &views {
                    println!(
                        "{:<12} {:<20} {:<9} {:<22} {:>6}  {}",
                        v.package.service_type,
                        v.package.id,
                        v.tier,
                        v.display_name,
                        v.package.price,
                        v.badge
                    );
                }
            }
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct DateCheck {
    date: NaiveDate,
    bookable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'static str>,
}

/// Replay the selection as draft actions, so duration and pricing follow the
/// same rules as the wizard.
fn build_draft(package: &str, addons: &[String], hours: &[(String, u32)]) -> Result<BookingDraft> {
    let mut draft = BookingDraft::new().apply(DraftAction::SelectPackage {
        package_id: package.to_string(),
    })?;
    for addon in addons {
        draft = draft.apply(DraftAction::ToggleAddon {
            addon_id: addon.clone(),
        })?;
    }
    for (addon_id, h) in hours {
        draft = draft.apply(DraftAction::SetExtensionHours {
            addon_id: addon_id.clone(),
            hours: *h,
        })?;
    }
    Ok(draft)
}

/// Parse `ADDON=HOURS`.
fn parse_extension_hours(raw: &str) -> Result<(String, u32), String> {
    let (id, hours) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ADDON=HOURS, got '{}'", raw))?;
    let id = id.trim();
    if id.is_empty() {
        return Err(format!("missing add-on id in '{}'", raw));
    }
    let hours = hours
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid hours in '{}': {}", raw, e))?;
    Ok((id.to_string(), hours))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
