// libs/scheduling-cell/src/models.rs
use chrono::{DateTime, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use shared_config::SchedulingConfig;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// A committed booking. Immutable once created; the engine only ever appends
/// new appointments to the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub patient_id: Uuid,
    /// Slot position as an instant; minute and second are always zero.
    pub scheduled_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    /// Build an appointment for a whole-hour slot. Returns `None` if `hour`
    /// is not a valid hour of day.
    pub fn for_slot(
        doctor_id: Uuid,
        patient_id: Uuid,
        date: NaiveDate,
        hour: u32,
        created_at: DateTime<Utc>,
    ) -> Option<Self> {
        let scheduled_at = date.and_hms_opt(hour, 0, 0)?.and_utc();
        Some(Self {
            id: Uuid::new_v4(),
            doctor_id,
            patient_id,
            scheduled_at,
            created_at,
        })
    }

    pub fn slot_date(&self) -> NaiveDate {
        self.scheduled_at.date_naive()
    }

    pub fn slot_hour(&self) -> u32 {
        self.scheduled_at.hour()
    }
}

// ==============================================================================
// SLOT CATALOG
// ==============================================================================

/// The fixed, doctor-independent set of bookable hours, in display order.
/// Injected configuration; the services never assume specific hours.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotCatalog {
    hours: Vec<u32>,
}

impl SlotCatalog {
    /// Build a catalog from an hour list, preserving order. Out-of-range and
    /// repeated hours are dropped with a warning rather than rejected.
    pub fn new(hours: impl IntoIterator<Item = u32>) -> Self {
        let mut accepted = Vec::new();
        for hour in hours {
            if hour > 23 {
                warn!("Dropping out-of-range slot hour {}", hour);
                continue;
            }
            if accepted.contains(&hour) {
                warn!("Dropping repeated slot hour {}", hour);
                continue;
            }
            accepted.push(hour);
        }
        Self { hours: accepted }
    }

    pub fn contains(&self, hour: u32) -> bool {
        self.hours.contains(&hour)
    }

    pub fn hours(&self) -> &[u32] {
        &self.hours
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hours.len()
    }
}

impl Default for SlotCatalog {
    fn default() -> Self {
        Self::new(shared_config::DEFAULT_SLOT_HOURS)
    }
}

impl From<&SchedulingConfig> for SlotCatalog {
    fn from(config: &SchedulingConfig) -> Self {
        Self::new(config.slot_hours.iter().copied())
    }
}

// ==============================================================================
// AVAILABILITY GRID (DERIVED, NOT PERSISTED)
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotCell {
    pub hour: u32,
    pub is_booked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySlots {
    pub date: NaiveDate,
    pub slots: Vec<SlotCell>,
}

/// Day-by-slot availability view for one doctor, computed from the store
/// contents at `computed_at`. Never cached; callers recompute for freshness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityGrid {
    pub doctor_id: Uuid,
    pub computed_at: DateTime<Utc>,
    pub days: Vec<DaySlots>,
}

impl AvailabilityGrid {
    /// Whether the cell exists in the grid and is free.
    pub fn is_available(&self, date: NaiveDate, hour: u32) -> bool {
        self.cell(date, hour).map(|c| !c.is_booked).unwrap_or(false)
    }

    pub fn cell(&self, date: NaiveDate, hour: u32) -> Option<&SlotCell> {
        self.days
            .iter()
            .find(|day| day.date == date)
            .and_then(|day| day.slots.iter().find(|slot| slot.hour == hour))
    }

    pub fn booked_count(&self) -> usize {
        self.days
            .iter()
            .map(|day| day.slots.iter().filter(|slot| slot.is_booked).count())
            .sum()
    }

    pub fn available_count(&self) -> usize {
        self.cell_count() - self.booked_count()
    }

    pub fn cell_count(&self) -> usize {
        self.days.iter().map(|day| day.slots.len()).sum()
    }
}

/// The first free slot within the booking horizon, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenSlot {
    pub date: NaiveDate,
    pub hour: u32,
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSlotRequest {
    pub doctor_id: Uuid,
    pub patient_id: Uuid,
    pub slot_date: NaiveDate,
    pub slot_hour: u32,
}
