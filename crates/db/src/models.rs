use chrono::{DateTime, NaiveDate, Utc};
use salon_core::{
    errors::SalonError,
    models::{
        announcement::Announcement, appointment::Appointment, blocked_slot::BlockedSlotRecord,
        service::Service,
    },
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbService {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub duration: String,
    pub category: String,
    pub is_combo: bool,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub service: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    pub status: String,
    pub observations: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBlockedSlot {
    pub id: Uuid,
    pub blocked_date: NaiveDate,
    pub blocked_time: String,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAnnouncement {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Duration lookup row: service name and its raw duration text.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbServiceDuration {
    pub name: String,
    pub duration: String,
}

impl From<DbService> for Service {
    fn from(row: DbService) -> Self {
        Service {
            id: row.id,
            name: row.name,
            price: row.price,
            duration: row.duration,
            category: row.category,
            is_combo: row.is_combo,
            is_active: row.is_active,
            display_order: row.display_order,
            created_at: row.created_at,
        }
    }
}

impl TryFrom<DbAppointment> for Appointment {
    type Error = SalonError;

    fn try_from(row: DbAppointment) -> Result<Self, Self::Error> {
        Ok(Appointment {
            id: row.id,
            client_name: row.client_name,
            client_email: row.client_email,
            client_phone: row.client_phone,
            service: row.service,
            appointment_date: row.appointment_date,
            appointment_time: row.appointment_time,
            status: row.status.parse()?,
            observations: row.observations,
            created_at: row.created_at,
        })
    }
}

impl TryFrom<DbBlockedSlot> for BlockedSlotRecord {
    type Error = SalonError;

    fn try_from(row: DbBlockedSlot) -> Result<Self, Self::Error> {
        Ok(BlockedSlotRecord {
            id: row.id,
            blocked_date: row.blocked_date,
            blocked_time: row.blocked_time.parse()?,
            reason: row.reason,
            created_at: row.created_at,
        })
    }
}

impl From<DbAnnouncement> for Announcement {
    fn from(row: DbAnnouncement) -> Self {
        Announcement {
            id: row.id,
            title: row.title,
            message: row.message,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}
