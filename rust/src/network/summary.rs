//! Critical path extraction and the read-only project report.

use pyo3::prelude::*;
use rustc_hash::FxHashMap;

use crate::models::{ActivityId, EventId};

use super::{Network, NetworkError};

/// Critical activities and events of a computed network.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CriticalPath {
    /// Critical activities ordered by the topological rank of their start
    /// event. Parallel critical chains are interleaved, not threaded.
    #[pyo3(get)]
    pub activity_ids: Vec<ActivityId>,
    /// Events with zero slack, in topological order.
    #[pyo3(get)]
    pub event_ids: Vec<EventId>,
    #[pyo3(get)]
    pub project_duration: f64,
}

/// Event row of a [`ProjectSummary`].
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct EventSummary {
    #[pyo3(get)]
    pub id: EventId,
    #[pyo3(get)]
    pub name: String,
    #[pyo3(get)]
    pub earliest_start: f64,
    #[pyo3(get)]
    pub latest_finish: Option<f64>,
}

/// Activity row of a [`ProjectSummary`], including every derived field.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct ActivitySummary {
    #[pyo3(get)]
    pub id: ActivityId,
    #[pyo3(get)]
    pub name: String,
    #[pyo3(get)]
    pub duration: f64,
    #[pyo3(get)]
    pub start_event: EventId,
    #[pyo3(get)]
    pub end_event: EventId,
    #[pyo3(get)]
    pub earliest_start: Option<f64>,
    #[pyo3(get)]
    pub earliest_finish: Option<f64>,
    #[pyo3(get)]
    pub latest_start: Option<f64>,
    #[pyo3(get)]
    pub latest_finish: Option<f64>,
    #[pyo3(get)]
    pub total_float: Option<f64>,
    #[pyo3(get)]
    pub free_float: Option<f64>,
    #[pyo3(get)]
    pub is_critical: bool,
}

/// Snapshot of a computed network. Owns its data; later edits to the
/// network do not show through.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectSummary {
    #[pyo3(get)]
    pub duration: f64,
    #[pyo3(get)]
    pub critical_path: Vec<ActivityId>,
    #[pyo3(get)]
    pub critical_events: Vec<EventId>,
    /// Sorted by id.
    #[pyo3(get)]
    pub events: Vec<EventSummary>,
    /// Sorted by id.
    #[pyo3(get)]
    pub activities: Vec<ActivitySummary>,
}

#[pymethods]
impl ProjectSummary {
    fn __repr__(&self) -> String {
        format!(
            "ProjectSummary(duration={}, critical_path={:?}, events={}, activities={})",
            self.duration,
            self.critical_path,
            self.events.len(),
            self.activities.len()
        )
    }
}

impl Network {
    /// Compute the network and list its critical activities and events.
    ///
    /// # Errors
    /// * `NetworkError::CyclicGraph` if the events cannot be ordered.
    pub fn critical_path(&mut self) -> Result<CriticalPath, NetworkError> {
        let order = self.compute_ordered()?;
        let Some(project_duration) = self.project_duration else {
            return Ok(CriticalPath::default());
        };

        let rank: FxHashMap<EventId, usize> = order
            .iter()
            .enumerate()
            .map(|(position, &id)| (id, position))
            .collect();

        let mut critical: Vec<(usize, ActivityId)> = self
            .activity_order
            .iter()
            .filter_map(|id| self.activities.get(id))
            .filter(|a| a.is_critical)
            .map(|a| (rank.get(&a.start_event).copied().unwrap_or(usize::MAX), a.id))
            .collect();
        // Stable: ties keep activity insertion order.
        critical.sort_by_key(|&(position, _)| position);

        let tolerance = self.config.critical_tolerance;
        let event_ids = order
            .iter()
            .filter(|id| {
                self.events
                    .get(*id)
                    .and_then(|e| e.slack())
                    .is_some_and(|slack| slack.abs() < tolerance)
            })
            .copied()
            .collect();

        Ok(CriticalPath {
            activity_ids: critical.into_iter().map(|(_, id)| id).collect(),
            event_ids,
            project_duration,
        })
    }

    /// Compute the network and project it into an owned report.
    ///
    /// # Errors
    /// * `NetworkError::CyclicGraph` if the events cannot be ordered.
    pub fn project_summary(&mut self) -> Result<ProjectSummary, NetworkError> {
        let critical = self.critical_path()?;

        let events = self
            .event_ids()
            .into_iter()
            .filter_map(|id| self.events.get(&id))
            .map(|e| EventSummary {
                id: e.id,
                name: e.name.clone(),
                earliest_start: e.earliest_start,
                latest_finish: e.latest_finish,
            })
            .collect();

        let activities = self
            .activity_ids()
            .into_iter()
            .filter_map(|id| self.activities.get(&id))
            .map(|a| ActivitySummary {
                id: a.id,
                name: a.name.clone(),
                duration: a.duration,
                start_event: a.start_event,
                end_event: a.end_event,
                earliest_start: a.earliest_start,
                earliest_finish: a.earliest_finish,
                latest_start: a.latest_start,
                latest_finish: a.latest_finish,
                total_float: a.total_float,
                free_float: a.free_float,
                is_critical: a.is_critical,
            })
            .collect();

        Ok(ProjectSummary {
            duration: critical.project_duration,
            critical_path: critical.activity_ids,
            critical_events: critical.event_ids,
            events,
            activities,
        })
    }
}
