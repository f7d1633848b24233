use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    availability::{ServiceDuration, parse_duration},
    errors::{SalonError, SalonResult},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    /// Free text as authored in the admin panel, e.g. `"1h10min"`.
    pub duration: String,
    pub category: String,
    pub is_combo: bool,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

impl Service {
    pub fn duration_minutes(&self) -> ServiceDuration {
        parse_duration(&self.duration)
    }
}

fn default_category() -> String {
    "general".to_string()
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateServiceRequest {
    pub name: String,
    pub price: f64,
    pub duration: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub is_combo: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub display_order: i32,
}

impl CreateServiceRequest {
    pub fn validate(&self) -> SalonResult<()> {
        validate_name(&self.name)?;
        validate_price(self.price)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateServiceRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub duration: Option<String>,
    pub category: Option<String>,
    pub is_combo: Option<bool>,
    pub is_active: Option<bool>,
    pub display_order: Option<i32>,
}

impl UpdateServiceRequest {
    pub fn validate(&self) -> SalonResult<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }
}

/// Public view of a service with its parsed length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub duration: String,
    pub duration_minutes: u32,
    pub category: String,
    pub is_combo: bool,
    pub is_active: bool,
    pub display_order: i32,
}

impl From<Service> for ServiceResponse {
    fn from(service: Service) -> Self {
        let duration_minutes = service.duration_minutes().minutes();
        Self {
            id: service.id,
            name: service.name,
            price: service.price,
            duration: service.duration,
            duration_minutes,
            category: service.category,
            is_combo: service.is_combo,
            is_active: service.is_active,
            display_order: service.display_order,
        }
    }
}

fn validate_name(name: &str) -> SalonResult<()> {
    if name.trim().is_empty() {
        return Err(SalonError::Validation("Service name cannot be empty".to_string()));
    }
    Ok(())
}

fn validate_price(price: f64) -> SalonResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(SalonError::Validation(
            "Service price must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}
