// libs/scheduling-cell/src/services/availability.rs
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;
use uuid::Uuid;

use shared_config::SchedulingConfig;

use crate::error::SchedulingError;
use crate::models::{AvailabilityGrid, DaySlots, OpenSlot, SlotCatalog, SlotCell};
use crate::services::conflict::SlotConflictService;
use crate::store::AppointmentStore;

/// Computes the rolling grid of bookable slots for a doctor. The grid is a
/// pure function of the store contents at call time and the injected `now`;
/// nothing here is cached between calls.
pub struct AvailabilityService {
    conflict_service: SlotConflictService,
    catalog: SlotCatalog,
    horizon_days: u32,
}

impl AvailabilityService {
    pub fn new(store: Arc<dyn AppointmentStore>, config: &SchedulingConfig) -> Self {
        Self {
            conflict_service: SlotConflictService::new(store),
            catalog: SlotCatalog::from(config),
            horizon_days: config.horizon_days,
        }
    }

    pub fn with_catalog(
        store: Arc<dyn AppointmentStore>,
        catalog: SlotCatalog,
        horizon_days: u32,
    ) -> Self {
        Self {
            conflict_service: SlotConflictService::new(store),
            catalog,
            horizon_days,
        }
    }

    /// Build the availability grid for one doctor.
    ///
    /// Candidate days run from the day after `now` through `horizon_days`
    /// ahead, in chronological order; same-day booking is excluded. Slots
    /// keep the catalog's order. A cell is booked iff an appointment for
    /// this doctor occupies exactly that `(date, hour)`.
    pub async fn compute_availability(
        &self,
        doctor_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<AvailabilityGrid, SchedulingError> {
        debug!(
            "Computing availability for doctor {} over {} days from {}",
            doctor_id,
            self.horizon_days,
            now.date_naive()
        );

        let occupied = self.conflict_service.occupied_slots(doctor_id).await?;

        let today = now.date_naive();
        let days = (1..=self.horizon_days as i64)
            .map(|offset| {
                let date = today + Duration::days(offset);
                let slots = self
                    .catalog
                    .hours()
                    .iter()
                    .map(|&hour| SlotCell {
                        hour,
                        is_booked: occupied.contains(&(date, hour)),
                    })
                    .collect();
                DaySlots { date, slots }
            })
            .collect();

        Ok(AvailabilityGrid {
            doctor_id,
            computed_at: now,
            days,
        })
    }

    /// Grids for several doctors in one call; each doctor still gets its own
    /// consistent snapshot read.
    pub async fn compute_availability_for_doctors(
        &self,
        doctor_ids: &[Uuid],
        now: DateTime<Utc>,
    ) -> Result<Vec<AvailabilityGrid>, SchedulingError> {
        let mut grids = Vec::with_capacity(doctor_ids.len());
        for &doctor_id in doctor_ids {
            grids.push(self.compute_availability(doctor_id, now).await?);
        }
        Ok(grids)
    }

    /// First free `(date, hour)` within the horizon, scanning days in
    /// chronological order and hours in catalog order.
    pub async fn next_available_slot(
        &self,
        doctor_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<OpenSlot>, SchedulingError> {
        let occupied = self.conflict_service.occupied_slots(doctor_id).await?;

        let today = now.date_naive();
        for offset in 1..=self.horizon_days as i64 {
            let date = today + Duration::days(offset);
            for &hour in self.catalog.hours() {
                if !occupied.contains(&(date, hour)) {
                    return Ok(Some(OpenSlot { date, hour }));
                }
            }
        }

        debug!(
            "No open slot for doctor {} within {} days",
            doctor_id, self.horizon_days
        );
        Ok(None)
    }
}
