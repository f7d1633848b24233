pub mod announcement;
pub mod appointment;
pub mod blocked_slot;
pub mod service;
