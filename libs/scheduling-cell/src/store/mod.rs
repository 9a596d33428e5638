// libs/scheduling-cell/src/store/mod.rs
use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::models::Appointment;

pub mod memory;

pub use memory::InMemoryAppointmentStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Slot {hour}:00 on {date} is already occupied for doctor {doctor_id}")]
    DuplicateSlot {
        doctor_id: Uuid,
        date: NaiveDate,
        hour: u32,
    },

    #[error("Store operation failed: {0}")]
    Unavailable(String),
}

/// Read/append boundary over committed appointment records. The concrete
/// transport (database, remote API, in-memory list) lives behind this trait.
///
/// Implementations must enforce uniqueness of `(doctor_id, date, hour)` on
/// append and report a violation as `StoreError::DuplicateSlot` rather than
/// silently ignoring the write.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// All committed appointments for one doctor, ordered by scheduled time.
    async fn list_for_doctor(&self, doctor_id: Uuid) -> Result<Vec<Appointment>, StoreError>;

    /// Commit a new appointment.
    async fn append(&self, appointment: Appointment) -> Result<(), StoreError>;
}
