use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap};

///
/// EventState
/// Ephemeral, in-memory validation counters.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub records: BTreeMap<String, RecordCounters>,
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventOps {
    // Pipeline stages
    pub records_validated: u64,
    pub structural_violations: u64,
    pub groups_failed: u64,
    pub custom_check_failures: u64,

    // Narrowing
    pub narrow_attempts: u64,
    pub narrow_substitutions: u64,
    pub narrow_failures: u64,

    // Notices
    pub deprecations: u64,
}

///
/// RecordCounters
/// Per record type.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RecordCounters {
    pub validated: u64,
    pub structural_violations: u64,
    pub groups_failed: u64,
    pub custom_check_failures: u64,
    pub narrowed_to: u64,
    pub narrow_failures: u64,
    pub deprecations: u64,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters.
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

/// Counters for one record type, created on first touch.
pub(crate) fn record_entry<'a>(m: &'a mut EventState, path: &str) -> &'a mut RecordCounters {
    m.records.entry(path.to_string()).or_default()
}

///
/// EventReport
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventReport {
    pub counters: EventOps,
    pub records: Vec<RecordSummary>,
}

///
/// RecordSummary
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RecordSummary {
    pub path: String,
    pub counters: RecordCounters,
    /// Share of validations of this type that hit at least one failed group.
    pub group_failure_rate: f64,
}

/// Build a report from the in-memory counters.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub(crate) fn report() -> EventReport {
    let snap = with_state(Clone::clone);

    let records = snap
        .records
        .into_iter()
        .map(|(path, counters)| {
            let group_failure_rate = if counters.validated > 0 {
                counters.groups_failed.min(counters.validated) as f64 / counters.validated as f64
            } else {
                0.0
            };

            RecordSummary {
                path,
                counters,
                group_failure_rate,
            }
        })
        .collect();

    EventReport {
        counters: snap.ops,
        records,
    }
}
