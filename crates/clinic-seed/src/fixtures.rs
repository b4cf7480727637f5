//! Fixed sample appointments.
//!
//! Three completed visits relative to a reference instant:
//! - John Doe, unpaid, yesterday
//! - Maria Santos, unpaid, today
//! - Pedro Garcia, paid in cash, two days ago

use time::macros::time;
use time::{Duration, OffsetDateTime};

use clinic::models::{AppointmentDraft, AppointmentStatus, ClinicalNotes, Money, PaymentStatus};

pub const SAMPLE_RECEIPT_NUMBER: &str = "RCPT-2025-00001";
pub const SAMPLE_PAYMENT_METHOD: &str = "cash";

/// Builds the sample payloads, in insertion order, with dates relative to `now`.
pub fn sample_appointments(now: OffsetDateTime) -> Vec<AppointmentDraft> {
    let today = now.date();
    let two_days_ago = now - Duration::days(2);

    vec![
        AppointmentDraft {
            owner_name: "John Doe".to_string(),
            owner_phone: "09171234567".to_string(),
            appointment_date: today - Duration::days(1),
            appointment_time: time!(9:00),
            status: AppointmentStatus::Completed,
            payment_status: PaymentStatus::Unpaid,
            amount: None,
            payment_method: None,
            receipt_number: None,
            payment_date: None,
            notes: ClinicalNotes::new(
                "Vomiting and loss of appetite for two days",
                "Acute gastroenteritis",
                "Bland diet for 3 days with oral rehydration. Return if vomiting persists beyond 48 hours.",
            ),
        },
        AppointmentDraft {
            owner_name: "Maria Santos".to_string(),
            owner_phone: "09181234567".to_string(),
            appointment_date: today,
            appointment_time: time!(10:30),
            status: AppointmentStatus::Completed,
            payment_status: PaymentStatus::Unpaid,
            amount: None,
            payment_method: None,
            receipt_number: None,
            payment_date: None,
            notes: ClinicalNotes::new(
                "Persistent scratching and hair loss on the back",
                "Flea allergy dermatitis",
                "Monthly flea prevention, medicated bath once a week, antihistamine for 7 days.",
            ),
        },
        AppointmentDraft {
            owner_name: "Pedro Garcia".to_string(),
            owner_phone: "09191234567".to_string(),
            appointment_date: two_days_ago.date(),
            appointment_time: time!(14:00),
            status: AppointmentStatus::Completed,
            payment_status: PaymentStatus::Paid,
            amount: Some(Money::from_major(500)),
            payment_method: Some(SAMPLE_PAYMENT_METHOD.to_string()),
            receipt_number: Some(SAMPLE_RECEIPT_NUMBER.to_string()),
            payment_date: Some(two_days_ago + Duration::hours(2)),
            notes: ClinicalNotes::new(
                "Annual wellness check and vaccination",
                "Healthy, no abnormalities found",
                "Booster and anti-rabies vaccines given. Next wellness visit in 12 months.",
            ),
        },
    ]
}
