//! Critical Path Method engine for activity-on-arrow project networks.
//!
//! The [`Network`] holds events (milestones) and activities (timed arrows
//! between them) and computes earliest/latest times, floats and the critical
//! path. The same engine is exposed to Python as the `rust` extension module.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::NaiveDate;
use pyo3::exceptions::{PyKeyError, PyValueError};
use pyo3::prelude::*;

pub mod calendar;
mod config;
pub mod logging;
mod models;
pub mod network;

pub use calendar::{project_onto_calendar, CalendarSchedule, DatedActivity};
pub use config::CpmConfig;
pub use models::{normalize_label, Activity, ActivityId, Event, EventId};
pub use network::{
    ActivitySummary, CriticalPath, EntityKind, EventSummary, Network, NetworkError,
    ProjectSummary,
};

/// Unknown or duplicate ids surface as `KeyError`, everything else as `ValueError`.
fn to_py_err(err: NetworkError) -> PyErr {
    match err {
        NetworkError::DuplicateKey { .. } | NetworkError::NotFound { .. } => {
            PyKeyError::new_err(err.to_string())
        }
        _ => PyValueError::new_err(err.to_string()),
    }
}

/// CPM network (PyO3 wrapper).
#[pyclass(name = "Network")]
pub struct PyNetwork {
    inner: Network,
}

#[pymethods]
impl PyNetwork {
    #[new]
    #[pyo3(signature = (config=None))]
    fn new(config: Option<CpmConfig>) -> Self {
        Self {
            inner: Network::with_config(config.unwrap_or_default()),
        }
    }

    #[pyo3(signature = (event_id, name=""))]
    fn add_event(&mut self, event_id: EventId, name: &str) -> PyResult<()> {
        self.inner.add_event(event_id, name).map_err(to_py_err)
    }

    fn remove_event(&mut self, event_id: EventId) -> PyResult<Event> {
        self.inner.remove_event(event_id).map_err(to_py_err)
    }

    /// Add an activity.
    ///
    /// # Raises
    /// * KeyError if the id is taken or an endpoint event does not exist
    /// * ValueError if the duration is negative or both endpoints are the same
    fn add_activity(
        &mut self,
        activity_id: ActivityId,
        name: &str,
        duration: f64,
        start_event: EventId,
        end_event: EventId,
    ) -> PyResult<()> {
        let activity = Activity::new(activity_id, name, duration, start_event, end_event)
            .map_err(to_py_err)?;
        self.inner.add_activity(activity).map_err(to_py_err)
    }

    fn remove_activity(&mut self, activity_id: ActivityId) -> PyResult<Activity> {
        self.inner.remove_activity(activity_id).map_err(to_py_err)
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    fn compute(&mut self) -> PyResult<()> {
        self.inner.compute().map_err(to_py_err)
    }

    /// Returns (critical activity ids, project duration).
    fn critical_path(&mut self) -> PyResult<(Vec<ActivityId>, f64)> {
        let path = self.inner.critical_path().map_err(to_py_err)?;
        Ok((path.activity_ids, path.project_duration))
    }

    fn critical_events(&mut self) -> PyResult<Vec<EventId>> {
        Ok(self.inner.critical_path().map_err(to_py_err)?.event_ids)
    }

    fn project_summary(&mut self) -> PyResult<ProjectSummary> {
        self.inner.project_summary().map_err(to_py_err)
    }

    /// Compute the network and lay it out on dates from `start_date`.
    ///
    /// # Raises
    /// * ValueError on a cycle or when a date falls outside the supported range
    fn calendar(&mut self, start_date: NaiveDate) -> PyResult<CalendarSchedule> {
        let summary = self.inner.project_summary().map_err(to_py_err)?;
        project_onto_calendar(&summary, start_date).map_err(to_py_err)
    }

    fn event(&self, event_id: EventId) -> Option<Event> {
        self.inner.event(event_id)
    }

    fn activity(&self, activity_id: ActivityId) -> Option<Activity> {
        self.inner.activity(activity_id)
    }

    fn event_ids(&self) -> Vec<EventId> {
        self.inner.event_ids()
    }

    fn activity_ids(&self) -> Vec<ActivityId> {
        self.inner.activity_ids()
    }

    fn __repr__(&self) -> String {
        format!(
            "Network(events={}, activities={}, duration={:?})",
            self.inner.event_count(),
            self.inner.activity_count(),
            self.inner.project_duration()
        )
    }
}

/// The cpm.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Network and records
    m.add_class::<PyNetwork>()?;
    m.add_class::<Event>()?;
    m.add_class::<Activity>()?;

    // Reports
    m.add_class::<CriticalPath>()?;
    m.add_class::<EventSummary>()?;
    m.add_class::<ActivitySummary>()?;
    m.add_class::<ProjectSummary>()?;
    m.add_class::<CalendarSchedule>()?;
    m.add_class::<DatedActivity>()?;

    // Config
    m.add_class::<CpmConfig>()?;

    Ok(())
}
