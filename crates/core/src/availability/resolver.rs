use std::collections::{BTreeSet, HashMap};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{DEFAULT_STEP_MINUTES, ServiceDuration, TimeOfDay, parse_duration};

/// A confirmed appointment on the target date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedAppointment {
    /// Service name, matched against the duration lookup.
    pub service: String,
    pub start: TimeOfDay,
}

/// A time an administrator has closed for booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedSlot {
    pub date: NaiveDate,
    pub time: TimeOfDay,
    /// Free text for the admin panel; not used when resolving.
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityRequest {
    pub date: NaiveDate,
    /// Candidate start times for the day, in the order they are offered.
    pub catalog: Vec<TimeOfDay>,
    pub appointments: Vec<BookedAppointment>,
    /// Blocked slots for any date; only those on `date` apply.
    pub blocked: Vec<BlockedSlot>,
    /// Service name to raw duration text, e.g. `"Lash Lifting" -> "1h10min"`.
    pub durations: HashMap<String, String>,
    pub step_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AvailabilityWarning {
    /// The appointment's service has no duration entry, so it blocks nothing.
    UnknownService { service: String, start: TimeOfDay },
    /// The service's duration text parsed to zero minutes, so it blocks nothing.
    ZeroDuration { service: String, duration: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResult {
    /// Remaining start times; always a subsequence of the request catalog.
    pub hours: Vec<TimeOfDay>,
    pub warnings: Vec<AvailabilityWarning>,
}

/// Expands an appointment into the slots it occupies.
///
/// Yields `start + k * step` for every `k >= 0` whose value is still before
/// `start + duration`, so a trailing partial step still occupies a slot. A
/// zero duration occupies nothing. A zero step falls back to the default.
pub fn expand_slots(start: TimeOfDay, duration: ServiceDuration, step_minutes: u32) -> Vec<TimeOfDay> {
    let step = if step_minutes == 0 {
        DEFAULT_STEP_MINUTES
    } else {
        step_minutes
    };
    let end = start.add_minutes(duration.minutes());

    let mut slots = Vec::new();
    let mut current = start;
    while current < end {
        slots.push(current);
        current = current.add_minutes(step);
    }
    slots
}

/// Computes the start times still offered for `req.date`.
///
/// `now` is the salon's local wall-clock time. It only matters when
/// `req.date` is today: then entries at or before the current minute are
/// dropped.
pub fn resolve_availability(req: &AvailabilityRequest, now: NaiveDateTime) -> AvailabilityResult {
    let mut warnings = Vec::new();
    let mut excluded: BTreeSet<TimeOfDay> = BTreeSet::new();
    let mut reported_zero: BTreeSet<&str> = BTreeSet::new();

    for appointment in &req.appointments {
        let Some(text) = req.durations.get(&appointment.service) else {
            warnings.push(AvailabilityWarning::UnknownService {
                service: appointment.service.clone(),
                start: appointment.start,
            });
            continue;
        };

        let duration = parse_duration(text);
        if duration.is_zero() && reported_zero.insert(appointment.service.as_str()) {
            warnings.push(AvailabilityWarning::ZeroDuration {
                service: appointment.service.clone(),
                duration: text.clone(),
            });
        }

        excluded.extend(expand_slots(appointment.start, duration, req.step_minutes));
    }

    excluded.extend(
        req.blocked
            .iter()
            .filter(|slot| slot.date == req.date)
            .map(|slot| slot.time),
    );

    let cutoff = (req.date == now.date()).then(|| TimeOfDay::from(now.time()));

    let hours = req
        .catalog
        .iter()
        .copied()
        .filter(|time| !excluded.contains(time))
        .filter(|time| cutoff.is_none_or(|cutoff| *time > cutoff))
        .collect();

    AvailabilityResult { hours, warnings }
}
