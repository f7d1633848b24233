//! # Salon Core
//!
//! Domain types shared by the salon booking service: the service catalog,
//! appointments, blocked slots and announcements, together with the
//! slot-availability resolver that decides which times are still offered to
//! a client on a given day.
//!
//! Nothing in this crate performs I/O. The resolver takes fully materialized
//! inputs (and the current wall-clock reading) and returns a fresh result.

pub mod availability;
pub mod errors;
pub mod models;

pub use availability::{
    AvailabilityRequest, AvailabilityResult, AvailabilityWarning, BlockedSlot, BookedAppointment,
    BusinessHours, ServiceDuration, TimeOfDay, expand_slots, parse_duration, resolve_availability,
};
pub use errors::{SalonError, SalonResult};
