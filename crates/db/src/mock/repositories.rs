use chrono::NaiveDate;
use mockall::mock;

use crate::models::{DbAppointment, DbBlockedSlot, DbServiceDuration};

// Mock repositories for the reads behind availability
mock! {
    pub ServiceRepo {
        pub async fn get_service_durations(&self) -> eyre::Result<Vec<DbServiceDuration>>;
    }
}

mock! {
    pub AppointmentRepo {
        pub async fn get_confirmed_appointments_by_date(
            &self,
            date: NaiveDate,
        ) -> eyre::Result<Vec<DbAppointment>>;
    }
}

mock! {
    pub BlockedSlotRepo {
        pub async fn get_blocked_slots_by_date(
            &self,
            blocked_date: NaiveDate,
        ) -> eyre::Result<Vec<DbBlockedSlot>>;
    }
}
