use std::env;

use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_HORIZON_DAYS: u32 = 30;
pub const DEFAULT_SLOT_HOURS: [u32; 6] = [7, 8, 9, 10, 15, 16];

/// Tunable parameters of the scheduling engine, loaded from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingConfig {
    /// Number of future days offered for booking, starting from tomorrow.
    pub horizon_days: u32,
    /// Bookable hours of day, in display order.
    pub slot_hours: Vec<u32>,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            slot_hours: DEFAULT_SLOT_HOURS.to_vec(),
        }
    }
}

impl SchedulingConfig {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let horizon_days = match env::var("BOOKING_HORIZON_DAYS") {
            Ok(raw) => match raw.trim().parse::<u32>() {
                Ok(days) if days > 0 => days,
                _ => {
                    warn!("BOOKING_HORIZON_DAYS={} is not a positive integer, using default {}",
                          raw, DEFAULT_HORIZON_DAYS);
                    DEFAULT_HORIZON_DAYS
                }
            },
            Err(_) => DEFAULT_HORIZON_DAYS,
        };

        let slot_hours = match env::var("SLOT_HOURS") {
            Ok(raw) => match parse_slot_hours(&raw) {
                Some(hours) => hours,
                None => {
                    warn!("SLOT_HOURS={} is not a valid hour list, using defaults", raw);
                    DEFAULT_SLOT_HOURS.to_vec()
                }
            },
            Err(_) => DEFAULT_SLOT_HOURS.to_vec(),
        };

        Self {
            horizon_days,
            slot_hours,
        }
    }
}

/// Parse a comma-separated list of hours, e.g. "7,8,9,10,15,16".
/// Order is preserved; duplicates and out-of-range hours reject the list.
fn parse_slot_hours(raw: &str) -> Option<Vec<u32>> {
    let mut hours = Vec::new();
    for part in raw.split(',') {
        let hour = part.trim().parse::<u32>().ok()?;
        if hour > 23 || hours.contains(&hour) {
            return None;
        }
        hours.push(hour);
    }
    if hours.is_empty() {
        None
    } else {
        Some(hours)
    }
}
