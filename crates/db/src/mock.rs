//! Mockall doubles for the repository functions, used by handler tests.
pub mod repositories;
