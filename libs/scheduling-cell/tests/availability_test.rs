// libs/scheduling-cell/tests/availability_test.rs
use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::Duration;
use uuid::Uuid;

use scheduling_cell::models::{Appointment, OpenSlot, SlotCatalog};
use scheduling_cell::store::{AppointmentStore, InMemoryAppointmentStore, StoreError};
use scheduling_cell::{AvailabilityService, SchedulingError};

mod common;
use common::{date, noon, seeded_store, test_config, MockStore};

#[tokio::test]
async fn grid_covers_horizon_starting_tomorrow() {
    let store = Arc::new(InMemoryAppointmentStore::new());
    let service = AvailabilityService::new(store, &test_config(10, &[7, 8, 9, 10]));

    let now = noon(2024, 10, 1);
    let grid = service
        .compute_availability(Uuid::new_v4(), now)
        .await
        .unwrap();

    assert_eq!(grid.days.len(), 10);
    assert_eq!(grid.days[0].date, date(2024, 10, 2));
    assert_eq!(grid.days[9].date, date(2024, 10, 11));
    for window in grid.days.windows(2) {
        assert_eq!(window[1].date, window[0].date + Duration::days(1));
    }
}

#[tokio::test]
async fn grid_never_includes_today_or_earlier() {
    let store = Arc::new(InMemoryAppointmentStore::new());
    let service = AvailabilityService::new(store, &test_config(30, &[7, 8, 9, 10, 15, 16]));

    let now = noon(2024, 2, 28);
    let grid = service
        .compute_availability(Uuid::new_v4(), now)
        .await
        .unwrap();

    for day in &grid.days {
        assert!(day.date > now.date_naive(), "{} is not strictly future", day.date);
    }
}

#[tokio::test]
async fn slot_order_follows_catalog_not_numeric_order() {
    let store = Arc::new(InMemoryAppointmentStore::new());
    let catalog = SlotCatalog::new([10, 7, 15]);
    let service = AvailabilityService::with_catalog(store, catalog, 5);

    let grid = service
        .compute_availability(Uuid::new_v4(), noon(2024, 10, 1))
        .await
        .unwrap();

    for day in &grid.days {
        let hours: Vec<u32> = day.slots.iter().map(|slot| slot.hour).collect();
        assert_eq!(hours, vec![10, 7, 15]);
    }
}

#[tokio::test]
async fn marks_booked_cell_and_leaves_rest_available() {
    let doctor_id = Uuid::new_v4();
    let store = seeded_store(&[(doctor_id, Uuid::new_v4(), date(2024, 10, 5), 9)]).await;
    let service = AvailabilityService::new(store, &test_config(10, &[7, 8, 9, 10]));

    let grid = service
        .compute_availability(doctor_id, noon(2024, 10, 1))
        .await
        .unwrap();

    assert_eq!(grid.cell_count(), 40);
    assert_eq!(grid.booked_count(), 1);
    assert_eq!(grid.available_count(), 39);
    assert!(!grid.is_available(date(2024, 10, 5), 9));
    assert!(grid.cell(date(2024, 10, 5), 9).unwrap().is_booked);
    assert!(grid.is_available(date(2024, 10, 5), 10));
}

#[tokio::test]
async fn grid_is_recomputed_from_store_on_every_call() {
    let doctor_id = Uuid::new_v4();
    let store = Arc::new(InMemoryAppointmentStore::new());
    let service = AvailabilityService::new(store.clone(), &test_config(10, &[7, 8]));

    let now = noon(2024, 10, 1);
    let before = service.compute_availability(doctor_id, now).await.unwrap();
    assert!(before.is_available(date(2024, 10, 3), 8));

    let appointment =
        Appointment::for_slot(doctor_id, Uuid::new_v4(), date(2024, 10, 3), 8, now).unwrap();
    store.append(appointment).await.unwrap();

    let after = service.compute_availability(doctor_id, now).await.unwrap();
    assert!(!after.is_available(date(2024, 10, 3), 8));
}

#[tokio::test]
async fn other_doctors_bookings_do_not_mark_cells() {
    let doctor_id = Uuid::new_v4();
    let other_doctor = Uuid::new_v4();
    let store = seeded_store(&[(other_doctor, Uuid::new_v4(), date(2024, 10, 5), 9)]).await;
    let service = AvailabilityService::new(store, &test_config(10, &[7, 8, 9, 10]));

    let grid = service
        .compute_availability(doctor_id, noon(2024, 10, 1))
        .await
        .unwrap();

    assert_eq!(grid.booked_count(), 0);
}

#[tokio::test]
async fn bulk_computation_returns_one_grid_per_doctor() {
    let busy_doctor = Uuid::new_v4();
    let free_doctor = Uuid::new_v4();
    let store = seeded_store(&[(busy_doctor, Uuid::new_v4(), date(2024, 10, 2), 7)]).await;
    let service = AvailabilityService::new(store, &test_config(3, &[7, 8]));

    let grids = service
        .compute_availability_for_doctors(&[busy_doctor, free_doctor], noon(2024, 10, 1))
        .await
        .unwrap();

    assert_eq!(grids.len(), 2);
    assert_eq!(grids[0].doctor_id, busy_doctor);
    assert_eq!(grids[0].booked_count(), 1);
    assert_eq!(grids[1].doctor_id, free_doctor);
    assert_eq!(grids[1].booked_count(), 0);
}

#[tokio::test]
async fn next_available_slot_skips_booked_cells() {
    let doctor_id = Uuid::new_v4();
    let store = seeded_store(&[(doctor_id, Uuid::new_v4(), date(2024, 10, 2), 7)]).await;
    let service = AvailabilityService::new(store, &test_config(5, &[7, 8]));

    let open = service
        .next_available_slot(doctor_id, noon(2024, 10, 1))
        .await
        .unwrap();

    assert_eq!(
        open,
        Some(OpenSlot {
            date: date(2024, 10, 2),
            hour: 8
        })
    );
}

#[tokio::test]
async fn next_available_slot_is_none_when_horizon_is_full() {
    let doctor_id = Uuid::new_v4();
    let patient_id = Uuid::new_v4();
    let store = seeded_store(&[
        (doctor_id, patient_id, date(2024, 10, 2), 7),
        (doctor_id, patient_id, date(2024, 10, 2), 8),
    ])
    .await;
    let service = AvailabilityService::new(store, &test_config(1, &[7, 8]));

    let open = service
        .next_available_slot(doctor_id, noon(2024, 10, 1))
        .await
        .unwrap();

    assert_eq!(open, None);
}

#[tokio::test]
async fn store_read_failure_surfaces_as_store_unavailable() {
    let mut mock = MockStore::new();
    mock.expect_list_for_doctor()
        .returning(|_| Err(StoreError::Unavailable("connection reset".to_string())));

    let service =
        AvailabilityService::with_catalog(Arc::new(mock), SlotCatalog::default(), 30);

    let result = service
        .compute_availability(Uuid::new_v4(), noon(2024, 10, 1))
        .await;

    assert_matches!(result, Err(SchedulingError::StoreUnavailable(_)));
}
