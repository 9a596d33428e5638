pub mod error;
pub mod models;
pub mod services;
pub mod store;

pub use error::*;
pub use models::*;
pub use services::availability::AvailabilityService;
pub use services::booking::BookingService;
pub use services::conflict::SlotConflictService;
pub use store::{AppointmentStore, InMemoryAppointmentStore, StoreError};
