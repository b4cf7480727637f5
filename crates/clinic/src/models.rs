use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;
use time::{Date, OffsetDateTime, Time};
use uuid::Uuid;
use validator::Validate;

use crate::errors::ClinicError;

time::serde::format_description!(calendar_date, Date, "[year]-[month]-[day]");
time::serde::format_description!(clock_time, Time, "[hour]:[minute]:[second]");

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Clinic {
    pub id: Uuid,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Clinic {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: OffsetDateTime::now_utc(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Doctor {
    pub id: Uuid,
    pub clinic_id: Uuid,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Doctor {
    pub fn new(clinic_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            clinic_id,
            name: name.into(),
            created_at: OffsetDateTime::now_utc(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Paid => "paid",
        }
    }
}

/// A currency amount with two fraction digits.
///
/// Bounded by the `NUMERIC(10, 2)` column it is stored in; anything with more
/// precision or a larger magnitude is rejected rather than rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const SCALE: u32 = 2;

    /// Largest absolute amount the `amount` column holds.
    pub const MAX: Decimal = Decimal::from_parts(0x540B_E3FF, 0x2, 0, false, Self::SCALE);

    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, Self::SCALE))
    }

    pub fn from_major(units: i64) -> Self {
        Self::from_cents(units * 100)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Validates precision and range, normalising to two fraction digits.
    pub fn try_from_decimal(value: Decimal) -> Result<Self, ClinicError> {
        let normalized = value.normalize();
        if normalized.scale() > Self::SCALE {
            return Err(ClinicError::InvalidInput(format!(
                "Amount {value} has more than {} fraction digits",
                Self::SCALE
            )));
        }
        if normalized.abs() > Self::MAX {
            return Err(ClinicError::InvalidInput(format!(
                "Amount {value} exceeds {}",
                Self::MAX
            )));
        }

        let mut scaled = normalized;
        scaled.rescale(Self::SCALE);
        Ok(Self(scaled))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = ClinicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.trim_start_matches('-').starts_with('.') {
            return Err(ClinicError::InvalidInput(format!("Invalid amount: {s:?}")));
        }

        let value = Decimal::from_str_exact(trimmed)
            .map_err(|e| ClinicError::InvalidInput(format!("Invalid amount {s:?}: {e}")))?;
        Self::try_from_decimal(value)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(f64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
            Raw::Number(n) => {
                let value = Decimal::from_f64(n).ok_or_else(|| {
                    serde::de::Error::custom(format!("Invalid amount: {n}"))
                })?;
                Self::try_from_decimal(value).map_err(serde::de::Error::custom)
            }
        }
    }
}

/// Free-text clinical notes, stored as one JSON-encoded column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClinicalNotes {
    pub chief_complaint: String,
    pub diagnosis: String,
    pub plan_recommendations: String,
}

impl ClinicalNotes {
    pub fn new(
        chief_complaint: impl Into<String>,
        diagnosis: impl Into<String>,
        plan_recommendations: impl Into<String>,
    ) -> Self {
        Self {
            chief_complaint: chief_complaint.into(),
            diagnosis: diagnosis.into(),
            plan_recommendations: plan_recommendations.into(),
        }
    }

    /// Encodes the notes for the `notes` column.
    pub fn to_json(&self) -> Result<String, ClinicError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a `notes` column value.
    pub fn from_json(encoded: &str) -> Result<Self, ClinicError> {
        Ok(serde_json::from_str(encoded)?)
    }
}

/// Appointment payload before it is bound to a clinic.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentDraft {
    pub owner_name: String,
    pub owner_phone: String,
    pub appointment_date: Date,
    pub appointment_time: Time,
    pub status: AppointmentStatus,
    pub payment_status: PaymentStatus,
    pub amount: Option<Money>,
    pub payment_method: Option<String>,
    pub receipt_number: Option<String>,
    pub payment_date: Option<OffsetDateTime>,
    pub notes: ClinicalNotes,
}

impl AppointmentDraft {
    /// Binds the draft to a clinic and, optionally, one of its doctors.
    pub fn for_clinic(self, clinic_id: Uuid, doctor_id: Option<Uuid>) -> NewAppointment {
        NewAppointment {
            clinic_id,
            doctor_id,
            owner_name: self.owner_name,
            owner_phone: self.owner_phone,
            appointment_date: self.appointment_date,
            appointment_time: self.appointment_time,
            status: self.status,
            payment_status: self.payment_status,
            amount: self.amount,
            payment_method: self.payment_method,
            receipt_number: self.receipt_number,
            payment_date: self.payment_date,
            notes: self.notes,
        }
    }
}

/// Appointment ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub clinic_id: Uuid,
    pub doctor_id: Option<Uuid>,
    pub owner_name: String,
    pub owner_phone: String,
    pub appointment_date: Date,
    pub appointment_time: Time,
    pub status: AppointmentStatus,
    pub payment_status: PaymentStatus,
    pub amount: Option<Money>,
    pub payment_method: Option<String>,
    pub receipt_number: Option<String>,
    pub payment_date: Option<OffsetDateTime>,
    pub notes: ClinicalNotes,
}

/// Notes may arrive already encoded or as a structured object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NotesField {
    Encoded(String),
    Structured(ClinicalNotes),
}

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
struct AppointmentFields {
    clinic_id: Option<Uuid>,
    #[serde(default)]
    doctor_id: Option<Uuid>,
    #[validate(length(min = 1, message = "owner_name must not be empty"))]
    owner_name: String,
    #[serde(default)]
    owner_phone: String,
    #[serde(with = "calendar_date")]
    appointment_date: Date,
    #[serde(with = "clock_time")]
    appointment_time: Time,
    #[serde(default)]
    status: AppointmentStatus,
    #[serde(default)]
    payment_status: PaymentStatus,
    #[serde(default)]
    amount: Option<Money>,
    #[serde(default)]
    payment_method: Option<String>,
    #[serde(default)]
    receipt_number: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    payment_date: Option<OffsetDateTime>,
    notes: NotesField,
}

impl NewAppointment {
    /// Builds an appointment from a field-value mapping.
    ///
    /// Unknown fields are rejected and `clinic_id` must be present. Dates use
    /// `YYYY-MM-DD`, times `HH:MM:SS`, and `payment_date` RFC 3339. `notes`
    /// may be the encoded JSON string or the object itself.
    pub fn from_fields(fields: serde_json::Value) -> Result<Self, ClinicError> {
        let fields: AppointmentFields = serde_json::from_value(fields)
            .map_err(|e| ClinicError::InvalidInput(e.to_string()))?;
        fields.validate().map_err(ClinicError::from_validation)?;
        let clinic_id = fields
            .clinic_id
            .ok_or_else(|| ClinicError::InvalidInput("clinic_id is required".to_string()))?;

        let notes = match fields.notes {
            NotesField::Encoded(encoded) => ClinicalNotes::from_json(&encoded)
                .map_err(|e| ClinicError::InvalidInput(format!("notes: {e}")))?,
            NotesField::Structured(notes) => notes,
        };

        Ok(Self {
            clinic_id,
            doctor_id: fields.doctor_id,
            owner_name: fields.owner_name,
            owner_phone: fields.owner_phone,
            appointment_date: fields.appointment_date,
            appointment_time: fields.appointment_time,
            status: fields.status,
            payment_status: fields.payment_status,
            amount: fields.amount,
            payment_method: fields.payment_method,
            receipt_number: fields.receipt_number,
            payment_date: fields.payment_date,
            notes,
        })
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }
}

/// A persisted appointment row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Appointment {
    pub id: Uuid,
    pub clinic_id: Uuid,
    pub doctor_id: Option<Uuid>,
    pub owner_name: String,
    pub owner_phone: String,
    #[serde(with = "calendar_date")]
    pub appointment_date: Date,
    #[serde(with = "clock_time")]
    pub appointment_time: Time,
    pub status: AppointmentStatus,
    pub payment_status: PaymentStatus,
    pub amount: Option<Money>,
    pub payment_method: Option<String>,
    pub receipt_number: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub payment_date: Option<OffsetDateTime>,
    /// JSON-encoded [`ClinicalNotes`], as stored.
    pub notes: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Appointment {
    /// Assembles the stored row from the inserted values and the generated keys.
    pub fn from_new(
        id: Uuid,
        created_at: OffsetDateTime,
        new: &NewAppointment,
    ) -> Result<Self, ClinicError> {
        Ok(Self {
            id,
            clinic_id: new.clinic_id,
            doctor_id: new.doctor_id,
            owner_name: new.owner_name.clone(),
            owner_phone: new.owner_phone.clone(),
            appointment_date: new.appointment_date,
            appointment_time: new.appointment_time,
            status: new.status,
            payment_status: new.payment_status,
            amount: new.amount,
            payment_method: new.payment_method.clone(),
            receipt_number: new.receipt_number.clone(),
            payment_date: new.payment_date,
            notes: new.notes.to_json()?,
            created_at,
        })
    }

    /// Decodes the stored notes column.
    pub fn clinical_notes(&self) -> Result<ClinicalNotes, ClinicError> {
        ClinicalNotes::from_json(&self.notes)
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }
}
