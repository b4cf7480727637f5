//! Behaviour of a full seeding run against the in-memory store.

use clinic::models::{Clinic, ClinicalNotes, Doctor};
use clinic::store::MemoryStore;
use clinic_seed::console::RecordingConsole;
use clinic_seed::db::{NO_CLINIC_MESSAGE, SeedError, SeedOutcome, SeedRunner};
use clinic_seed::{AppointmentStatus, Money, PaymentStatus};
use time::OffsetDateTime;
use time::macros::{date, datetime};

const NOW: OffsetDateTime = datetime!(2025-06-15 08:45 UTC);

#[tokio::test]
async fn no_clinic_writes_nothing_and_prints_one_line() {
    let store = MemoryStore::new();
    let console = RecordingConsole::new();

    let outcome = SeedRunner::new(&store, &console).run_at(NOW).await.unwrap();

    assert!(matches!(outcome, SeedOutcome::NoClinic));
    assert_eq!(store.appointment_count(), 0);
    assert_eq!(console.lines(), vec![NO_CLINIC_MESSAGE]);
}

#[tokio::test]
async fn clinic_without_doctor_leaves_doctor_null() {
    let store = MemoryStore::new();
    let clinic_id = store.add_clinic(Clinic::new("Happy Paws Clinic"));
    store.add_clinic(Clinic::new("Second Clinic"));
    let console = RecordingConsole::new();

    SeedRunner::new(&store, &console).run_at(NOW).await.unwrap();

    let appointments = store.appointments();
    assert_eq!(appointments.len(), 3);
    for appointment in &appointments {
        assert_eq!(appointment.clinic_id, clinic_id);
        assert_eq!(appointment.doctor_id, None);
    }
    assert_eq!(console.lines().len(), 3);
}

#[tokio::test]
async fn doctor_of_first_clinic_is_attached() {
    let store = MemoryStore::new();
    let clinic_id = store.add_clinic(Clinic::new("Happy Paws Clinic"));
    let other_clinic = store.add_clinic(Clinic::new("Second Clinic"));
    store.add_doctor(Doctor::new(other_clinic, "Dr. Other"));
    let doctor_id = store.add_doctor(Doctor::new(clinic_id, "Dr. Reyes"));
    let console = RecordingConsole::new();

    let outcome = SeedRunner::new(&store, &console).run_at(NOW).await.unwrap();

    match &outcome {
        SeedOutcome::Seeded { clinic, doctor, .. } => {
            assert_eq!(clinic.id, clinic_id);
            assert_eq!(doctor.as_ref().map(|d| d.id), Some(doctor_id));
        }
        SeedOutcome::NoClinic => panic!("expected a seeded outcome"),
    }
    for appointment in store.appointments() {
        assert_eq!(appointment.clinic_id, clinic_id);
        assert_eq!(appointment.doctor_id, Some(doctor_id));
    }
    assert!(console.lines()[0].contains("assigned to Dr. Reyes"));
}

#[tokio::test]
async fn creates_fixed_appointments_in_order() {
    let store = MemoryStore::new();
    store.add_clinic(Clinic::new("Happy Paws Clinic"));
    let console = RecordingConsole::new();

    let outcome = SeedRunner::new(&store, &console).run_at(NOW).await.unwrap();
    let appointments = outcome.appointments();

    let owners: Vec<&str> = appointments.iter().map(|a| a.owner_name.as_str()).collect();
    assert_eq!(owners, vec!["John Doe", "Maria Santos", "Pedro Garcia"]);
    assert_eq!(appointments, store.appointments().as_slice());

    let john = &appointments[0];
    assert_eq!(john.status, AppointmentStatus::Completed);
    assert_eq!(john.payment_status, PaymentStatus::Unpaid);
    assert_eq!(john.appointment_date, date!(2025 - 06 - 14));
    assert!(john.amount.is_none() && john.payment_method.is_none());
    assert!(john.receipt_number.is_none() && john.payment_date.is_none());

    let maria = &appointments[1];
    assert_eq!(maria.status, AppointmentStatus::Completed);
    assert_eq!(maria.payment_status, PaymentStatus::Unpaid);
    assert_eq!(maria.appointment_date, date!(2025 - 06 - 15));
    assert!(maria.amount.is_none() && maria.payment_method.is_none());
    assert!(maria.receipt_number.is_none() && maria.payment_date.is_none());

    let pedro = &appointments[2];
    assert_eq!(pedro.status, AppointmentStatus::Completed);
    assert_eq!(pedro.payment_status, PaymentStatus::Paid);
    assert_eq!(pedro.appointment_date, date!(2025 - 06 - 13));
    assert_eq!(pedro.amount, Some(Money::from_cents(50_000)));
    assert_eq!(pedro.payment_method.as_deref(), Some("cash"));
    assert_eq!(pedro.receipt_number.as_deref(), Some("RCPT-2025-00001"));
    assert_eq!(pedro.payment_date, Some(datetime!(2025-06-13 10:45 UTC)));
}

#[tokio::test]
async fn notes_parse_with_exactly_three_keys() {
    let store = MemoryStore::new();
    store.add_clinic(Clinic::new("Happy Paws Clinic"));
    let console = RecordingConsole::new();

    SeedRunner::new(&store, &console).run_at(NOW).await.unwrap();

    for appointment in store.appointments() {
        let value: serde_json::Value = serde_json::from_str(&appointment.notes).unwrap();
        let mut keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort();
        assert_eq!(keys, vec!["chief_complaint", "diagnosis", "plan_recommendations"]);
    }

    let notes: Vec<ClinicalNotes> = store
        .appointments()
        .iter()
        .map(|a| a.clinical_notes().unwrap())
        .collect();
    assert_eq!(notes[0].diagnosis, "Acute gastroenteritis");
    assert_eq!(notes[1].diagnosis, "Flea allergy dermatitis");
    assert_eq!(notes[2].diagnosis, "Healthy, no abnormalities found");
}

#[tokio::test]
async fn running_twice_duplicates_rows() {
    let store = MemoryStore::new();
    store.add_clinic(Clinic::new("Happy Paws Clinic"));
    let console = RecordingConsole::new();
    let runner = SeedRunner::new(&store, &console);

    runner.run_at(NOW).await.unwrap();
    runner.run().await.unwrap();

    assert_eq!(store.appointment_count(), 6);
    assert_eq!(console.lines().len(), 6);
}

#[tokio::test]
async fn store_failure_keeps_earlier_inserts() {
    let store = MemoryStore::new();
    store.add_clinic(Clinic::new("Happy Paws Clinic"));
    store.fail_after(1);
    let console = RecordingConsole::new();

    let result = SeedRunner::new(&store, &console).run_at(NOW).await;

    assert!(matches!(result, Err(SeedError::Store(_))));
    let appointments = store.appointments();
    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0].owner_name, "John Doe");
    assert!(console.lines().is_empty());
}
