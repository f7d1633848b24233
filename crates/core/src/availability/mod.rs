//! # Slot Availability
//!
//! Decides which start times are still offered to a client on a given day.
//!
//! ## Resolution Algorithm
//!
//! 1. For every confirmed appointment, look up its service's duration text;
//!    appointments whose service is unknown are skipped.
//! 2. Expand each appointment into the slots it occupies, stepping from its
//!    start time until the step start reaches `start + duration`.
//! 3. Union the occupied slots with the blocked slots for the target date.
//! 4. Keep every catalog entry not in that exclusion set, in catalog order.
//! 5. If the target date is today, keep only entries strictly after the
//!    current minute.
//!
//! The resolver never fails. Skipped appointments and services with a zero
//! duration are reported as [`AvailabilityWarning`]s next to the hours so the
//! caller can log them without blocking the client.

mod duration;
mod hours;
mod resolver;
mod time_of_day;

pub use duration::{ServiceDuration, parse_duration};
pub use hours::{BusinessHours, DEFAULT_STEP_MINUTES, parse_hours, parse_weekdays};
pub use resolver::{
    AvailabilityRequest, AvailabilityResult, AvailabilityWarning, BlockedSlot, BookedAppointment,
    expand_slots, resolve_availability,
};
pub use time_of_day::TimeOfDay;
