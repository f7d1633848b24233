use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{SalonError, SalonResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    /// Only confirmed appointments occupy slots.
    pub fn blocks_slots(self) -> bool {
        self == AppointmentStatus::Confirmed
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = SalonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AppointmentStatus::Pending),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(SalonError::Validation(format!(
                "Invalid appointment status: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    /// Service name at the time of booking.
    pub service: String,
    pub appointment_date: NaiveDate,
    /// `HH:MM`
    pub appointment_time: String,
    pub status: AppointmentStatus,
    pub observations: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub service: String,
    pub date: NaiveDate,
    pub time: String,
    pub observations: Option<String>,
}

impl CreateAppointmentRequest {
    /// Checks the client-entered fields, reporting the first failure.
    pub fn validate(&self) -> SalonResult<()> {
        let name = self.client_name.trim().chars().count();
        if name < 2 {
            return invalid("Name must be at least 2 characters");
        }
        if name > 100 {
            return invalid("Name must be at most 100 characters");
        }

        if self.client_email.chars().count() > 255 || !is_valid_email(&self.client_email) {
            return invalid("Invalid email address");
        }

        let phone = self.client_phone.trim().chars().count();
        if !(10..=20).contains(&phone) {
            return invalid("Invalid phone number");
        }

        if self.service.trim().is_empty() {
            return invalid("A service must be selected");
        }
        if self.time.trim().is_empty() {
            return invalid("A time must be selected");
        }

        Ok(())
    }
}

fn invalid(message: &str) -> SalonResult<()> {
    Err(SalonError::Validation(message.to_string()))
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return false;
    }
    domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAppointmentStatusRequest {
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAppointmentStatusResponse {
    pub id: Uuid,
    pub status: AppointmentStatus,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub date: NaiveDate,
    pub open: bool,
    pub hours: Vec<String>,
}
