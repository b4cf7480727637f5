//! Sample appointment seeding.

use thiserror::Error;
use time::OffsetDateTime;
use tracing::debug;

use clinic::errors::ClinicError;
use clinic::models::{Appointment, Clinic, Doctor};
use clinic::store::ClinicStore;

use crate::console::Console;
use crate::fixtures::sample_appointments;

pub const NO_CLINIC_MESSAGE: &str = "No clinic found. Please create a clinic before seeding appointments.";

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Store error: {0}")]
    Store(#[from] ClinicError),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// What a seeding run did.
#[derive(Debug)]
pub enum SeedOutcome {
    /// The store had no clinic; nothing was written.
    NoClinic,
    /// The sample appointments were inserted, in fixture order.
    Seeded {
        clinic: Clinic,
        doctor: Option<Doctor>,
        appointments: Vec<Appointment>,
    },
}

impl SeedOutcome {
    pub fn appointments(&self) -> &[Appointment] {
        match self {
            SeedOutcome::NoClinic => &[],
            SeedOutcome::Seeded { appointments, .. } => appointments,
        }
    }
}

/// Inserts the sample appointments for the first clinic in a store.
///
/// Each insert is its own unit of work: a failure part way through leaves
/// the earlier rows in place and is returned as-is. Running twice inserts
/// the samples twice.
pub struct SeedRunner<'a> {
    store: &'a dyn ClinicStore,
    console: &'a dyn Console,
}

impl<'a> SeedRunner<'a> {
    pub fn new(store: &'a dyn ClinicStore, console: &'a dyn Console) -> Self {
        Self { store, console }
    }

    /// Seeds relative to the current UTC time.
    pub async fn run(&self) -> Result<SeedOutcome, SeedError> {
        self.run_at(OffsetDateTime::now_utc()).await
    }

    /// Seeds with "today" and payment times derived from `now`.
    pub async fn run_at(&self, now: OffsetDateTime) -> Result<SeedOutcome, SeedError> {
        let Some(clinic) = self.store.first_clinic().await? else {
            self.console.info(NO_CLINIC_MESSAGE);
            return Ok(SeedOutcome::NoClinic);
        };

        let doctor = self.store.first_doctor_for_clinic(clinic.id).await?;
        let doctor_id = doctor.as_ref().map(|d| d.id);
        if doctor.is_none() {
            debug!(clinic_id = %clinic.id, "No doctor for clinic; appointments will be unassigned");
        }

        let drafts = sample_appointments(now);
        debug!("Seeding {} appointments...", drafts.len());

        let mut appointments = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let appointment = draft.for_clinic(clinic.id, doctor_id);
            appointments.push(self.store.create_appointment(&appointment).await?);
        }

        for line in summary_lines(&clinic, doctor.as_ref(), &appointments) {
            self.console.info(&line);
        }

        Ok(SeedOutcome::Seeded {
            clinic,
            doctor,
            appointments,
        })
    }
}

/// The three status lines printed after a successful run.
fn summary_lines(
    clinic: &Clinic,
    doctor: Option<&Doctor>,
    appointments: &[Appointment],
) -> [String; 3] {
    let assigned = match doctor {
        Some(doctor) => format!("assigned to {}", doctor.name),
        None => "no doctor assigned".to_string(),
    };

    let (paid, unpaid): (Vec<&Appointment>, Vec<&Appointment>) =
        appointments.iter().partition(|a| a.is_paid());

    let unpaid_names: Vec<&str> = unpaid.iter().map(|a| a.owner_name.as_str()).collect();
    let paid_details: Vec<String> = paid
        .iter()
        .map(|a| match (&a.receipt_number, a.amount) {
            (Some(receipt), Some(amount)) => format!("{} ({receipt}, {amount})", a.owner_name),
            _ => a.owner_name.clone(),
        })
        .collect();

    [
        format!(
            "Created {} sample appointments for {} ({assigned})",
            appointments.len(),
            clinic.name
        ),
        format!("  Unpaid: {} [{}]", unpaid.len(), unpaid_names.join(", ")),
        format!("  Paid: {} [{}]", paid.len(), paid_details.join(", ")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic::store::MemoryStore;
    use time::macros::datetime;

    use crate::console::RecordingConsole;

    #[tokio::test]
    async fn test_summary_mentions_every_owner() {
        let store = MemoryStore::new();
        store.add_clinic(Clinic::new("Happy Paws Clinic"));
        let console = RecordingConsole::new();

        SeedRunner::new(&store, &console)
            .run_at(datetime!(2025-06-15 08:00 UTC))
            .await
            .unwrap();

        let lines = console.lines();
        assert_eq!(
            lines,
            vec![
                "Created 3 sample appointments for Happy Paws Clinic (no doctor assigned)",
                "  Unpaid: 2 [John Doe, Maria Santos]",
                "  Paid: 1 [Pedro Garcia (RCPT-2025-00001, 500.00)]",
            ]
        );
    }

    #[test]
    fn test_outcome_without_clinic_has_no_appointments() {
        assert!(SeedOutcome::NoClinic.appointments().is_empty());
    }
}
