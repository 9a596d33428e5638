// libs/scheduling-cell/src/services/conflict.rs
use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use crate::error::SchedulingError;
use crate::store::AppointmentStore;

/// Answers "is this slot taken?" from the current store contents. Every call
/// reads the store fresh; there is no caching layer between a check and the
/// state it reports on.
pub struct SlotConflictService {
    store: Arc<dyn AppointmentStore>,
}

impl SlotConflictService {
    pub fn new(store: Arc<dyn AppointmentStore>) -> Self {
        Self { store }
    }

    /// Occupancy index for one doctor, keyed by `(date, hour)`. Built once
    /// per availability computation so each grid cell is an O(1) lookup
    /// instead of a scan over the appointment list.
    pub async fn occupied_slots(
        &self,
        doctor_id: Uuid,
    ) -> Result<HashSet<(NaiveDate, u32)>, SchedulingError> {
        let appointments = self.store.list_for_doctor(doctor_id).await?;
        debug!(
            "Indexed {} committed appointments for doctor {}",
            appointments.len(),
            doctor_id
        );

        Ok(appointments
            .iter()
            .map(|appointment| (appointment.slot_date(), appointment.slot_hour()))
            .collect())
    }

    /// Point check against current store state, used at booking commit time.
    pub async fn is_slot_taken(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
        hour: u32,
    ) -> Result<bool, SchedulingError> {
        let appointments = self.store.list_for_doctor(doctor_id).await?;
        Ok(appointments
            .iter()
            .any(|appointment| appointment.slot_date() == date && appointment.slot_hour() == hour))
    }
}
