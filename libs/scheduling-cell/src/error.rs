use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum SchedulingError {
    #[error("Invalid slot selection: {0}")]
    InvalidSlotSelection(String),

    #[error("Slot {hour}:00 on {date} is already booked for doctor {doctor_id}")]
    SlotAlreadyBooked {
        doctor_id: Uuid,
        date: NaiveDate,
        hour: u32,
    },

    #[error("Appointment store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<StoreError> for SchedulingError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateSlot {
                doctor_id,
                date,
                hour,
            } => SchedulingError::SlotAlreadyBooked {
                doctor_id,
                date,
                hour,
            },
            StoreError::Unavailable(reason) => SchedulingError::StoreUnavailable(reason),
        }
    }
}
