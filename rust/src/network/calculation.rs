//! Forward pass, backward pass and float derivation.
//!
//! All passes walk events in topological order and touch each activity a
//! constant number of times, so a full compute is O(V + E).

use crate::models::EventId;
use crate::{log_changes, log_debug};

use super::{Network, NetworkError};

impl Network {
    /// Recompute every derived time, float and critical flag from scratch.
    ///
    /// With no events or no activities this resets all derived fields to
    /// their defaults and succeeds without computing anything. A failed
    /// ordering also resets them, so no earlier result outlives it.
    ///
    /// # Errors
    /// * `NetworkError::CyclicGraph` if the events cannot be ordered.
    pub fn compute(&mut self) -> Result<(), NetworkError> {
        self.compute_ordered().map(|_| ())
    }

    /// [`Network::compute`], handing back the topological order it used.
    /// The order is empty when nothing was computed.
    pub(super) fn compute_ordered(&mut self) -> Result<Vec<EventId>, NetworkError> {
        if self.events.is_empty() || self.activities.is_empty() {
            self.reset_computed();
            return Ok(Vec::new());
        }

        let order = match self.topological_order() {
            Ok(order) => order,
            Err(err) => {
                self.reset_computed();
                return Err(err);
            }
        };
        let project_duration = self.forward_pass(&order);
        self.backward_pass(&order, project_duration);
        self.derive_floats();
        self.project_duration = Some(project_duration);

        log_changes!(
            self.config.verbosity,
            "Computed {} events, {} activities: project duration {}",
            self.events.len(),
            self.activities.len(),
            project_duration
        );
        Ok(order)
    }

    fn reset_computed(&mut self) {
        for event in self.events.values_mut() {
            event.reset();
        }
        for activity in self.activities.values_mut() {
            activity.reset();
        }
        self.project_duration = None;
    }

    /// Earliest times. Returns the project duration (the largest event ES).
    fn forward_pass(&mut self, order: &[EventId]) -> f64 {
        let verbosity = self.config.verbosity;
        let Network {
            events,
            activities,
            outgoing,
            ..
        } = self;

        for event in events.values_mut() {
            event.earliest_start = 0.0;
        }

        for event_id in order {
            let Some(start_es) = events.get(event_id).map(|e| e.earliest_start) else {
                continue;
            };
            let Some(leaving) = outgoing.get(event_id) else {
                continue;
            };

            for activity_id in leaving {
                let Some(activity) = activities.get_mut(activity_id) else {
                    continue;
                };
                let earliest_finish = start_es + activity.duration;
                activity.earliest_start = Some(start_es);
                activity.earliest_finish = Some(earliest_finish);

                if let Some(end) = events.get_mut(&activity.end_event) {
                    end.earliest_start = end.earliest_start.max(earliest_finish);
                }
            }
            log_debug!(verbosity, "forward: event {} ES={}", event_id, start_es);
        }

        events
            .values()
            .map(|e| e.earliest_start)
            .fold(0.0, f64::max)
    }

    /// Latest times, walking events in reverse topological order so each
    /// event's successors are final before the event itself is settled.
    fn backward_pass(&mut self, order: &[EventId], project_duration: f64) {
        let verbosity = self.config.verbosity;
        let Network {
            events,
            activities,
            outgoing,
            ..
        } = self;

        for event in events.values_mut() {
            event.latest_finish = Some(project_duration);
        }

        for event_id in order.iter().rev() {
            let Some(leaving) = outgoing.get(event_id) else {
                continue;
            };

            let mut latest = f64::INFINITY;
            for activity_id in leaving {
                let Some(activity) = activities.get_mut(activity_id) else {
                    continue;
                };
                let end_lf = events
                    .get(&activity.end_event)
                    .and_then(|e| e.latest_finish)
                    .unwrap_or(project_duration);
                let latest_start = end_lf - activity.duration;
                activity.latest_finish = Some(end_lf);
                activity.latest_start = Some(latest_start);
                latest = latest.min(latest_start);
            }

            // Sinks keep LF = project duration.
            if latest.is_finite() {
                if let Some(event) = events.get_mut(event_id) {
                    event.latest_finish = Some(latest);
                }
            }
            log_debug!(
                verbosity,
                "backward: event {} LF={}",
                event_id,
                events
                    .get(event_id)
                    .and_then(|e| e.latest_finish)
                    .unwrap_or(project_duration)
            );
        }
    }

    /// Total float, free float and criticality for every activity.
    fn derive_floats(&mut self) {
        let Network {
            config,
            events,
            activities,
            ..
        } = self;

        for activity in activities.values_mut() {
            let (Some(es), Some(ef), Some(ls)) = (
                activity.earliest_start,
                activity.earliest_finish,
                activity.latest_start,
            ) else {
                activity.total_float = None;
                activity.free_float = None;
                activity.is_critical = false;
                continue;
            };

            let total_float = config.round_float(ls - es);
            let end_es = events
                .get(&activity.end_event)
                .map_or(ef, |e| e.earliest_start);

            activity.total_float = Some(total_float);
            activity.free_float = Some(config.round_float(end_es - ef));
            activity.is_critical = config.is_zero_float(total_float);
        }
    }
}
