//! Data-access seam for clinics, doctors, and appointments.
//!
//! [`ClinicStore`] is implemented by [`crate::database::Database`] for
//! PostgreSQL and by [`MemoryStore`] for tests and local runs.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    errors::ClinicError,
    models::{Appointment, Clinic, Doctor, NewAppointment},
};

#[async_trait]
pub trait ClinicStore: Send + Sync {
    /// Returns the first clinic in the store's default order, if any.
    async fn first_clinic(&self) -> Result<Option<Clinic>, ClinicError>;

    /// Returns the first doctor belonging to `clinic_id`, if any.
    async fn first_doctor_for_clinic(&self, clinic_id: Uuid)
    -> Result<Option<Doctor>, ClinicError>;

    /// Persists a new appointment row and returns it.
    async fn create_appointment(
        &self,
        appointment: &NewAppointment,
    ) -> Result<Appointment, ClinicError>;
}

#[derive(Debug, Default)]
struct MemoryState {
    clinics: Vec<Clinic>,
    doctors: Vec<Doctor>,
    appointments: Vec<Appointment>,
    /// Remaining inserts before `create_appointment` starts failing.
    inserts_before_failure: Option<usize>,
}

/// In-memory store keeping rows in insertion order.
///
/// Foreign keys are checked the way the database would: an appointment must
/// reference a known clinic, and a doctor id (when present) must exist.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        // A poisoned lock only means another test thread panicked mid-write.
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn add_clinic(&self, clinic: Clinic) -> Uuid {
        let id = clinic.id;
        self.state().clinics.push(clinic);
        id
    }

    pub fn add_doctor(&self, doctor: Doctor) -> Uuid {
        let id = doctor.id;
        self.state().doctors.push(doctor);
        id
    }

    /// Makes `create_appointment` fail once `successes` more inserts have
    /// gone through.
    pub fn fail_after(&self, successes: usize) {
        self.state().inserts_before_failure = Some(successes);
    }

    pub fn appointments(&self) -> Vec<Appointment> {
        self.state().appointments.clone()
    }

    pub fn appointment_count(&self) -> usize {
        self.state().appointments.len()
    }
}

#[async_trait]
impl ClinicStore for MemoryStore {
    async fn first_clinic(&self) -> Result<Option<Clinic>, ClinicError> {
        Ok(self.state().clinics.first().cloned())
    }

    async fn first_doctor_for_clinic(
        &self,
        clinic_id: Uuid,
    ) -> Result<Option<Doctor>, ClinicError> {
        Ok(self
            .state()
            .doctors
            .iter()
            .find(|d| d.clinic_id == clinic_id)
            .cloned())
    }

    async fn create_appointment(
        &self,
        appointment: &NewAppointment,
    ) -> Result<Appointment, ClinicError> {
        let mut state = self.state();

        if let Some(remaining) = state.inserts_before_failure.as_mut() {
            if *remaining == 0 {
                return Err(ClinicError::Store("injected insert failure".to_string()));
            }
            *remaining -= 1;
        }

        if !state.clinics.iter().any(|c| c.id == appointment.clinic_id) {
            return Err(ClinicError::Store(format!(
                "clinic {} does not exist",
                appointment.clinic_id
            )));
        }
        if let Some(doctor_id) = appointment.doctor_id {
            if !state.doctors.iter().any(|d| d.id == doctor_id) {
                return Err(ClinicError::Store(format!(
                    "doctor {doctor_id} does not exist"
                )));
            }
        }

        let row = Appointment::from_new(Uuid::new_v4(), OffsetDateTime::now_utc(), appointment)?;
        state.appointments.push(row.clone());
        Ok(row)
    }
}
