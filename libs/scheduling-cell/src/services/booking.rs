// libs/scheduling-cell/src/services/booking.rs
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use shared_config::SchedulingConfig;

use crate::error::SchedulingError;
use crate::models::{Appointment, BookSlotRequest, SlotCatalog};
use crate::services::conflict::SlotConflictService;
use crate::store::AppointmentStore;

/// Performs conflict-checked appointment creation. Booking is deliberately
/// not idempotent: a second call with identical arguments fails with
/// `SlotAlreadyBooked` because the first call's write occupies the slot.
pub struct BookingService {
    store: Arc<dyn AppointmentStore>,
    conflict_service: SlotConflictService,
    catalog: SlotCatalog,
    horizon_days: u32,
}

impl BookingService {
    pub fn new(store: Arc<dyn AppointmentStore>, config: &SchedulingConfig) -> Self {
        Self {
            conflict_service: SlotConflictService::new(Arc::clone(&store)),
            catalog: SlotCatalog::from(config),
            horizon_days: config.horizon_days,
            store,
        }
    }

    pub fn with_catalog(
        store: Arc<dyn AppointmentStore>,
        catalog: SlotCatalog,
        horizon_days: u32,
    ) -> Self {
        Self {
            conflict_service: SlotConflictService::new(Arc::clone(&store)),
            catalog,
            horizon_days,
            store,
        }
    }

    /// Book one slot for a patient with a doctor.
    ///
    /// The slot is re-checked against the current store state immediately
    /// before the write; a grid computed earlier may be stale by the time
    /// the caller confirms. On success exactly one appointment is appended;
    /// every failure path leaves the store untouched.
    pub async fn book_slot(
        &self,
        request: BookSlotRequest,
        now: DateTime<Utc>,
    ) -> Result<Appointment, SchedulingError> {
        debug!(
            "Booking slot {}:00 on {} with doctor {} for patient {}",
            request.slot_hour, request.slot_date, request.doctor_id, request.patient_id
        );

        self.validate_slot_selection(&request, now)?;

        if self
            .conflict_service
            .is_slot_taken(request.doctor_id, request.slot_date, request.slot_hour)
            .await?
        {
            warn!(
                "Slot {}:00 on {} already booked for doctor {}",
                request.slot_hour, request.slot_date, request.doctor_id
            );
            return Err(SchedulingError::SlotAlreadyBooked {
                doctor_id: request.doctor_id,
                date: request.slot_date,
                hour: request.slot_hour,
            });
        }

        let appointment = Appointment::for_slot(
            request.doctor_id,
            request.patient_id,
            request.slot_date,
            request.slot_hour,
            now,
        )
        .ok_or_else(|| {
            SchedulingError::InvalidSlotSelection(format!(
                "Hour {} is not a valid hour of day",
                request.slot_hour
            ))
        })?;

        // The store's uniqueness guarantee closes the race between the check
        // above and this append; a duplicate surfaces as SlotAlreadyBooked.
        self.store.append(appointment.clone()).await?;

        info!(
            "Appointment {} booked for patient {} with doctor {} at {}",
            appointment.id, appointment.patient_id, appointment.doctor_id, appointment.scheduled_at
        );
        Ok(appointment)
    }

    fn validate_slot_selection(
        &self,
        request: &BookSlotRequest,
        now: DateTime<Utc>,
    ) -> Result<(), SchedulingError> {
        let today = now.date_naive();

        if request.slot_date <= today {
            return Err(SchedulingError::InvalidSlotSelection(format!(
                "Requested day {} is not strictly in the future",
                request.slot_date
            )));
        }

        let last_bookable = today + Duration::days(self.horizon_days as i64);
        if request.slot_date > last_bookable {
            return Err(SchedulingError::InvalidSlotSelection(format!(
                "Requested day {} is beyond the {}-day booking horizon",
                request.slot_date, self.horizon_days
            )));
        }

        if !self.catalog.contains(request.slot_hour) {
            return Err(SchedulingError::InvalidSlotSelection(format!(
                "Hour {} is not in the slot catalog",
                request.slot_hour
            )));
        }

        Ok(())
    }
}
