pub mod admin;
pub mod appointment;
pub mod catalog;
pub mod health;
