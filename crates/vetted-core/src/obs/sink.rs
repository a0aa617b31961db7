//! Metrics sink boundary.
//!
//! Validation logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
use crate::obs::metrics;
use std::cell::RefCell;

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<*const dyn MetricsSink>> = RefCell::new(None);
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[remain::sorted]
pub enum MetricsEvent {
    CustomCheckFailed {
        record_path: &'static str,
    },
    Deprecation {
        record_path: &'static str,
    },
    GroupFailed {
        record_path: &'static str,
    },
    NarrowAttempt {
        candidate: &'static str,
    },
    NarrowFailed {
        record_path: &'static str,
    },
    NarrowSubstituted {
        from: &'static str,
        to: &'static str,
    },
    RecordValidated {
        record_path: &'static str,
    },
    StructuralViolation {
        record_path: &'static str,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink that writes into the thread-local metrics state.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        metrics::with_state_mut(|m| match event {
            MetricsEvent::CustomCheckFailed { record_path } => {
                m.ops.custom_check_failures = m.ops.custom_check_failures.saturating_add(1);
                let entry = metrics::record_entry(m, record_path);
                entry.custom_check_failures = entry.custom_check_failures.saturating_add(1);
            }

            MetricsEvent::Deprecation { record_path } => {
                m.ops.deprecations = m.ops.deprecations.saturating_add(1);
                let entry = metrics::record_entry(m, record_path);
                entry.deprecations = entry.deprecations.saturating_add(1);
            }

            MetricsEvent::GroupFailed { record_path } => {
                m.ops.groups_failed = m.ops.groups_failed.saturating_add(1);
                let entry = metrics::record_entry(m, record_path);
                entry.groups_failed = entry.groups_failed.saturating_add(1);
            }

            MetricsEvent::NarrowAttempt { .. } => {
                m.ops.narrow_attempts = m.ops.narrow_attempts.saturating_add(1);
            }

            MetricsEvent::NarrowFailed { record_path } => {
                m.ops.narrow_failures = m.ops.narrow_failures.saturating_add(1);
                let entry = metrics::record_entry(m, record_path);
                entry.narrow_failures = entry.narrow_failures.saturating_add(1);
            }

            MetricsEvent::NarrowSubstituted { to, .. } => {
                m.ops.narrow_substitutions = m.ops.narrow_substitutions.saturating_add(1);
                let entry = metrics::record_entry(m, to);
                entry.narrowed_to = entry.narrowed_to.saturating_add(1);
            }

            MetricsEvent::RecordValidated { record_path } => {
                m.ops.records_validated = m.ops.records_validated.saturating_add(1);
                let entry = metrics::record_entry(m, record_path);
                entry.validated = entry.validated.saturating_add(1);
            }

            MetricsEvent::StructuralViolation { record_path } => {
                m.ops.structural_violations = m.ops.structural_violations.saturating_add(1);
                let entry = metrics::record_entry(m, record_path);
                entry.structural_violations = entry.structural_violations.saturating_add(1);
            }
        });
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let override_ptr = SINK_OVERRIDE.with(|cell| *cell.borrow());
    if let Some(ptr) = override_ptr {
        // SAFETY: `ptr` comes from a live `&dyn MetricsSink` installed by
        // `with_metrics_sink`, whose guard clears it on every exit path.
        // It is only dereferenced synchronously, as a shared reference.
        unsafe { (&*ptr).record(event) };
    } else {
        GLOBAL_METRICS_SINK.record(event);
    }
}

/// Snapshot the current metrics state.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
pub fn with_metrics_sink<T>(sink: &dyn MetricsSink, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<*const dyn MetricsSink>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = self.0;
            });
        }
    }

    // SAFETY: the lifetime is erased only for the dynamic extent of `f`;
    // `Guard` restores the previous slot before `sink` can go out of scope.
    let sink_ptr = unsafe { std::mem::transmute::<&dyn MetricsSink, *const dyn MetricsSink>(sink) };
    let prev = SINK_OVERRIDE.with(|cell| {
        let mut slot = cell.borrow_mut();
        slot.replace(sink_ptr)
    });
    let _guard = Guard(prev);

    f()
}

///
/// TESTS
///
