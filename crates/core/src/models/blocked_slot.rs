use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    availability::{self, TimeOfDay},
    errors::SalonResult,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockedSlotRecord {
    pub id: Uuid,
    pub blocked_date: NaiveDate,
    pub blocked_time: TimeOfDay,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<BlockedSlotRecord> for availability::BlockedSlot {
    fn from(record: BlockedSlotRecord) -> Self {
        availability::BlockedSlot {
            date: record.blocked_date,
            time: record.blocked_time,
            reason: record.reason,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBlockedSlotRequest {
    pub date: NaiveDate,
    pub time: String,
    pub reason: Option<String>,
}

impl CreateBlockedSlotRequest {
    pub fn parsed_time(&self) -> SalonResult<TimeOfDay> {
        self.time.parse()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockedSlotQuery {
    pub date: Option<NaiveDate>,
}
