// libs/scheduling-cell/src/store/memory.rs
use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::models::Appointment;
use crate::store::{AppointmentStore, StoreError};

type SlotKey = (Uuid, NaiveDate, u32);

#[derive(Default)]
struct StoreInner {
    by_doctor: HashMap<Uuid, Vec<Appointment>>,
    occupied: HashSet<SlotKey>,
}

/// Process-local appointment store. The occupancy check and the insert run
/// under a single write-lock acquisition, so two concurrent appends for the
/// same `(doctor, date, hour)` key cannot both succeed.
#[derive(Default)]
pub struct InMemoryAppointmentStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn appointment_count(&self, doctor_id: Uuid) -> usize {
        let inner = self.inner.read().await;
        inner
            .by_doctor
            .get(&doctor_id)
            .map(|appointments| appointments.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl AppointmentStore for InMemoryAppointmentStore {
    async fn list_for_doctor(&self, doctor_id: Uuid) -> Result<Vec<Appointment>, StoreError> {
        let inner = self.inner.read().await;
        let mut appointments = inner
            .by_doctor
            .get(&doctor_id)
            .cloned()
            .unwrap_or_default();
        appointments.sort_by_key(|appointment| appointment.scheduled_at);
        Ok(appointments)
    }

    async fn append(&self, appointment: Appointment) -> Result<(), StoreError> {
        let key = (
            appointment.doctor_id,
            appointment.slot_date(),
            appointment.slot_hour(),
        );

        let mut inner = self.inner.write().await;
        if inner.occupied.contains(&key) {
            return Err(StoreError::DuplicateSlot {
                doctor_id: appointment.doctor_id,
                date: appointment.slot_date(),
                hour: appointment.slot_hour(),
            });
        }

        inner.occupied.insert(key);
        inner
            .by_doctor
            .entry(appointment.doctor_id)
            .or_default()
            .push(appointment.clone());

        debug!(
            "Appointment {} committed for doctor {} at {}",
            appointment.id, appointment.doctor_id, appointment.scheduled_at
        );
        Ok(())
    }
}
