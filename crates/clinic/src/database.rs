use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use crate::errors::ClinicError;
use crate::models::{Appointment, Clinic, Doctor, NewAppointment};
use crate::store::ClinicStore;

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), ClinicError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub async fn create_clinic(&self, clinic: &Clinic) -> Result<(), ClinicError> {
        sqlx::query(
            r#"
            INSERT INTO clinics (id, name, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(clinic.id)
        .bind(&clinic.name)
        .bind(clinic.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn create_doctor(&self, doctor: &Doctor) -> Result<(), ClinicError> {
        sqlx::query(
            r#"
            INSERT INTO doctors (id, clinic_id, name, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(doctor.id)
        .bind(doctor.clinic_id)
        .bind(&doctor.name)
        .bind(doctor.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_clinic_appointment_ids(
        &self,
        clinic_id: Uuid,
    ) -> Result<Vec<Uuid>, ClinicError> {
        let ids = sqlx::query_scalar(
            r#"
            SELECT id
            FROM appointments
            WHERE clinic_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(clinic_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }
}

#[async_trait]
impl ClinicStore for Database {
    async fn first_clinic(&self) -> Result<Option<Clinic>, ClinicError> {
        let clinic = sqlx::query_as(
            r#"
            SELECT id, name, created_at
            FROM clinics
            ORDER BY created_at, id
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(clinic)
    }

    async fn first_doctor_for_clinic(
        &self,
        clinic_id: Uuid,
    ) -> Result<Option<Doctor>, ClinicError> {
        let doctor = sqlx::query_as(
            r#"
            SELECT id, clinic_id, name, created_at
            FROM doctors
            WHERE clinic_id = $1
            ORDER BY created_at, id
            LIMIT 1
            "#,
        )
        .bind(clinic_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(doctor)
    }

    async fn create_appointment(
        &self,
        appointment: &NewAppointment,
    ) -> Result<Appointment, ClinicError> {
        let notes = appointment.notes.to_json()?;

        let (id, created_at): (Uuid, OffsetDateTime) = sqlx::query_as(
            r#"
            INSERT INTO appointments (
                clinic_id, doctor_id, owner_name, owner_phone,
                appointment_date, appointment_time, status, payment_status,
                amount, payment_method, receipt_number, payment_date,
                notes, created_at
            )
            VALUES (
                $1, $2, $3, $4,
                $5, $6, $7, $8,
                $9, $10, $11, $12,
                $13, NOW()
            )
            RETURNING id, created_at
            "#,
        )
        .bind(appointment.clinic_id)
        .bind(appointment.doctor_id)
        .bind(&appointment.owner_name)
        .bind(&appointment.owner_phone)
        .bind(appointment.appointment_date)
        .bind(appointment.appointment_time)
        .bind(appointment.status.as_str())
        .bind(appointment.payment_status.as_str())
        .bind(appointment.amount.map(|a| a.amount()))
        .bind(&appointment.payment_method)
        .bind(&appointment.receipt_number)
        .bind(appointment.payment_date)
        .bind(&notes)
        .fetch_one(&self.pool)
        .await?;

        debug!(appointment_id = %id, owner = %appointment.owner_name, "Inserted appointment");

        Appointment::from_new(id, created_at, appointment)
    }
}
