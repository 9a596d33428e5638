#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use mockall::mock;
use uuid::Uuid;

use scheduling_cell::models::Appointment;
use scheduling_cell::store::{AppointmentStore, InMemoryAppointmentStore, StoreError};
use shared_config::SchedulingConfig;

mock! {
    pub Store {}

    #[async_trait::async_trait]
    impl AppointmentStore for Store {
        async fn list_for_doctor(&self, doctor_id: Uuid) -> Result<Vec<Appointment>, StoreError>;
        async fn append(&self, appointment: Appointment) -> Result<(), StoreError>;
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".into()),
        ))
        .try_init();
}

pub fn test_config(horizon_days: u32, slot_hours: &[u32]) -> SchedulingConfig {
    SchedulingConfig {
        horizon_days,
        slot_hours: slot_hours.to_vec(),
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

/// Fresh in-memory store pre-seeded with `(doctor, patient, date, hour)` rows.
pub async fn seeded_store(
    entries: &[(Uuid, Uuid, NaiveDate, u32)],
) -> Arc<InMemoryAppointmentStore> {
    let store = Arc::new(InMemoryAppointmentStore::new());
    for &(doctor_id, patient_id, slot_date, slot_hour) in entries {
        let appointment =
            Appointment::for_slot(doctor_id, patient_id, slot_date, slot_hour, noon(2024, 1, 1))
                .expect("valid test slot");
        store.append(appointment).await.expect("seed append");
    }
    store
}
