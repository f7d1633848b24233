pub mod admin;
pub mod announcement;
pub mod appointment;
pub mod availability;
pub mod blocked_slot;
pub mod service;
