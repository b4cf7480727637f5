//! Demo data seeding for the clinic appointment database.
//!
//! This crate inserts a fixed set of sample appointments (two unpaid, one
//! paid) for the first clinic in the store, so billing and appointment
//! screens have something to show during manual verification.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use clinic_seed::prelude::*;
//!
//! let db = Database::new(pool);
//! let console = TracingConsole;
//!
//! match SeedRunner::new(&db, &console).run().await? {
//!     SeedOutcome::NoClinic => {}
//!     SeedOutcome::Seeded { appointments, .. } => assert_eq!(appointments.len(), 3),
//! }
//! ```

pub mod config;
pub mod console;
pub mod db;
pub mod fixtures;

// Re-export core types from the clinic crate
pub use clinic::models::{
    Appointment, AppointmentDraft, AppointmentStatus, ClinicalNotes, Money, NewAppointment,
    PaymentStatus,
};

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::SeedConfig;
    pub use crate::console::{Console, RecordingConsole, TracingConsole};
    pub use crate::db::{SeedError, SeedOutcome, SeedRunner};
    pub use crate::fixtures::sample_appointments;
    pub use crate::{AppointmentStatus, ClinicalNotes, Money, PaymentStatus};
    pub use clinic::database::Database;
    pub use clinic::store::{ClinicStore, MemoryStore};
}
