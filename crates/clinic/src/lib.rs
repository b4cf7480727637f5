//! Clinic appointment and payment records.
//!
//! Models for clinics, doctors, and appointments, the [`store::ClinicStore`]
//! data-access trait, and its PostgreSQL ([`database::Database`]) and
//! in-memory ([`store::MemoryStore`]) implementations.

pub mod database;
pub mod errors;
pub mod models;
pub mod store;
