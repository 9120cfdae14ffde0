//! Activity-on-arrow network with Critical Path Method computation.
//!
//! The [`Network`] owns every event and activity plus the adjacency indexes
//! linking them. Callers edit it through the mutation API, then run
//! [`Network::compute`] (or one of the queries built on it) and read the
//! derived times back as copies.
//!
//! Iteration over events and activities follows insertion order, which makes
//! the topological order and therefore the critical path listing deterministic.

mod calculation;
mod error;
mod summary;
mod topology;

use rustc_hash::FxHashMap;

use crate::config::CpmConfig;
use crate::logging::rejected;
use crate::models::{Activity, ActivityId, Event, EventId};
use crate::log_changes;

pub use error::{EntityKind, NetworkError};
pub use summary::{ActivitySummary, CriticalPath, EventSummary, ProjectSummary};

/// In-memory event graph. Not internally synchronised; one owner edits and
/// queries it sequentially.
#[derive(Clone, Debug, Default)]
pub struct Network {
    config: CpmConfig,
    events: FxHashMap<EventId, Event>,
    activities: FxHashMap<ActivityId, Activity>,
    /// Event ids in insertion order.
    event_order: Vec<EventId>,
    /// Activity ids in insertion order.
    activity_order: Vec<ActivityId>,
    /// Activities leaving each event. Every event has an entry, possibly empty.
    outgoing: FxHashMap<EventId, Vec<ActivityId>>,
    /// Activities entering each event. Every event has an entry, possibly empty.
    incoming: FxHashMap<EventId, Vec<ActivityId>>,
    /// Project duration of the last successful compute.
    project_duration: Option<f64>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CpmConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &CpmConfig {
        &self.config
    }

    /// Add an event with ES=0 and LF unset.
    pub fn add_event(&mut self, id: EventId, name: &str) -> Result<(), NetworkError> {
        let verbosity = self.config.verbosity;
        if self.events.contains_key(&id) {
            return Err(rejected(
                verbosity,
                NetworkError::DuplicateKey {
                    kind: EntityKind::Event,
                    id,
                },
            ));
        }

        let event = Event::new(id, name);
        log_changes!(verbosity, "Added event {} ({:?})", id, event.name);
        self.events.insert(id, event);
        self.event_order.push(id);
        self.outgoing.insert(id, Vec::new());
        self.incoming.insert(id, Vec::new());
        Ok(())
    }

    /// Remove an event that no activity references. Returns the removed record.
    pub fn remove_event(&mut self, id: EventId) -> Result<Event, NetworkError> {
        let verbosity = self.config.verbosity;
        if !self.events.contains_key(&id) {
            return Err(rejected(verbosity, NetworkError::event_not_found(id)));
        }

        let incident = self.outgoing.get(&id).map_or(0, Vec::len)
            + self.incoming.get(&id).map_or(0, Vec::len);
        if incident > 0 {
            return Err(rejected(
                verbosity,
                NetworkError::InUse {
                    event_id: id,
                    incident,
                },
            ));
        }

        self.outgoing.remove(&id);
        self.incoming.remove(&id);
        self.event_order.retain(|&e| e != id);
        let event = self
            .events
            .remove(&id)
            .ok_or_else(|| NetworkError::event_not_found(id))?;
        log_changes!(verbosity, "Removed event {}", id);
        Ok(event)
    }

    /// Add an activity between two existing events.
    ///
    /// Validation runs before any state changes, so a rejected activity
    /// leaves the network untouched.
    pub fn add_activity(&mut self, activity: Activity) -> Result<(), NetworkError> {
        let verbosity = self.config.verbosity;
        if self.activities.contains_key(&activity.id) {
            return Err(rejected(
                verbosity,
                NetworkError::DuplicateKey {
                    kind: EntityKind::Activity,
                    id: activity.id,
                },
            ));
        }
        for endpoint in [activity.start_event, activity.end_event] {
            if !self.events.contains_key(&endpoint) {
                return Err(rejected(verbosity, NetworkError::event_not_found(endpoint)));
            }
        }
        if activity.start_event == activity.end_event {
            return Err(rejected(
                verbosity,
                NetworkError::InvalidEdge {
                    activity_id: activity.id,
                    event_id: activity.start_event,
                },
            ));
        }

        let id = activity.id;
        log_changes!(
            verbosity,
            "Added activity {} ({:?}, duration {}) {} -> {}",
            id,
            activity.name,
            activity.duration,
            activity.start_event,
            activity.end_event
        );
        self.outgoing
            .entry(activity.start_event)
            .or_default()
            .push(id);
        self.incoming.entry(activity.end_event).or_default().push(id);
        self.activities.insert(id, activity);
        self.activity_order.push(id);
        Ok(())
    }

    /// Remove an activity and unlink it from both adjacency indexes.
    /// Returns the removed record.
    pub fn remove_activity(&mut self, id: ActivityId) -> Result<Activity, NetworkError> {
        let verbosity = self.config.verbosity;
        let Some(activity) = self.activities.get(&id) else {
            return Err(rejected(verbosity, NetworkError::activity_not_found(id)));
        };
        let (start, end) = (activity.start_event, activity.end_event);

        // Either index may already lack the id; removal is tolerant of that.
        if let Some(ids) = self.outgoing.get_mut(&start) {
            ids.retain(|&a| a != id);
        }
        if let Some(ids) = self.incoming.get_mut(&end) {
            ids.retain(|&a| a != id);
        }
        self.activity_order.retain(|&a| a != id);
        let activity = self
            .activities
            .remove(&id)
            .ok_or_else(|| NetworkError::activity_not_found(id))?;
        log_changes!(verbosity, "Removed activity {}", id);
        Ok(activity)
    }

    /// Drop every event, activity and computed result.
    pub fn clear(&mut self) {
        log_changes!(
            self.config.verbosity,
            "Cleared network ({} events, {} activities)",
            self.events.len(),
            self.activities.len()
        );
        self.events.clear();
        self.activities.clear();
        self.event_order.clear();
        self.activity_order.clear();
        self.outgoing.clear();
        self.incoming.clear();
        self.project_duration = None;
    }

    pub fn event(&self, id: EventId) -> Option<Event> {
        self.events.get(&id).cloned()
    }

    pub fn activity(&self, id: ActivityId) -> Option<Activity> {
        self.activities.get(&id).cloned()
    }

    /// Event ids in ascending order.
    pub fn event_ids(&self) -> Vec<EventId> {
        let mut ids = self.event_order.clone();
        ids.sort_unstable();
        ids
    }

    /// Activity ids in ascending order.
    pub fn activity_ids(&self) -> Vec<ActivityId> {
        let mut ids = self.activity_order.clone();
        ids.sort_unstable();
        ids
    }

    /// Activities leaving `event_id`, in insertion order.
    pub fn outgoing(&self, event_id: EventId) -> Vec<ActivityId> {
        self.outgoing.get(&event_id).cloned().unwrap_or_default()
    }

    /// Activities entering `event_id`, in insertion order.
    pub fn incoming(&self, event_id: EventId) -> Vec<ActivityId> {
        self.incoming.get(&event_id).cloned().unwrap_or_default()
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    pub fn activity_count(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Project duration from the last compute, if it produced one.
    pub fn project_duration(&self) -> Option<f64> {
        self.project_duration
    }

    fn outgoing_slice(&self, event_id: EventId) -> &[ActivityId] {
        self.outgoing
            .get(&event_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
