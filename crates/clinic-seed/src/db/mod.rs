//! Database integration for seeding demo data.
//!
//! The [`SeedRunner`] looks up the demo clinic and doctor through a
//! [`clinic::store::ClinicStore`] and inserts the sample appointments,
//! reporting progress through a [`crate::console::Console`].

mod seeder;

pub use seeder::{NO_CLINIC_MESSAGE, SeedError, SeedOutcome, SeedRunner};
