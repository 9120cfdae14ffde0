//! Topological ordering of events (Kahn's algorithm).

use rustc_hash::FxHashMap;
use std::collections::VecDeque;

use crate::log_checks;
use crate::models::EventId;

use super::{Network, NetworkError};

impl Network {
    /// Order all events so every activity's start event precedes its end event.
    ///
    /// Events whose in-degree reaches zero at the same time are emitted in
    /// the order they were first queued: sources in event insertion order,
    /// later events in the order their last incoming activity was released.
    ///
    /// # Errors
    /// * `NetworkError::CyclicGraph` if some events can never be released.
    pub fn topological_order(&self) -> Result<Vec<EventId>, NetworkError> {
        let mut in_degree: FxHashMap<EventId, usize> =
            FxHashMap::with_capacity_and_hasher(self.events.len(), Default::default());
        for &id in &self.event_order {
            in_degree.insert(id, 0);
        }
        for activity in self.activities.values() {
            if let Some(degree) = in_degree.get_mut(&activity.end_event) {
                *degree += 1;
            }
        }

        let mut queue: VecDeque<EventId> = self
            .event_order
            .iter()
            .copied()
            .filter(|id| in_degree.get(id) == Some(&0))
            .collect();

        let mut order: Vec<EventId> = Vec::with_capacity(self.event_order.len());
        while let Some(event_id) = queue.pop_front() {
            order.push(event_id);

            for activity_id in self.outgoing_slice(event_id) {
                let Some(activity) = self.activities.get(activity_id) else {
                    continue;
                };
                if let Some(degree) = in_degree.get_mut(&activity.end_event) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(activity.end_event);
                    }
                }
            }
        }

        if order.len() != self.events.len() {
            log_checks!(
                self.config.verbosity,
                "Topological order covers {} of {} events",
                order.len(),
                self.events.len()
            );
            return Err(NetworkError::CyclicGraph {
                ordered: order.len(),
                total: self.events.len(),
            });
        }

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Activity;

    fn build(events: &[EventId], arrows: &[(i64, EventId, EventId)]) -> Network {
        let mut network = Network::new();
        for &id in events {
            network.add_event(id, "").unwrap();
        }
        for &(id, start, end) in arrows {
            network
                .add_activity(Activity::new(id, "", 1.0, start, end).unwrap())
                .unwrap();
        }
        network
    }

    #[test]
    fn test_chain_order() {
        let network = build(&[3, 2, 1], &[(1, 1, 2), (2, 2, 3)]);
        assert_eq!(network.topological_order().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_sources_follow_insertion_order() {
        // Three independent sources inserted out of numeric order.
        let network = build(&[9, 4, 7, 1], &[(1, 9, 1), (2, 4, 1), (3, 7, 1)]);
        assert_eq!(network.topological_order().unwrap(), vec![9, 4, 7, 1]);
    }

    #[test]
    fn test_isolated_events_are_ordered() {
        let network = build(&[1, 2, 3], &[(1, 1, 2)]);
        let order = network.topological_order().unwrap();
        assert_eq!(order, vec![1, 3, 2]);
    }

    #[test]
    fn test_every_arrow_points_forward() {
        let network = build(
            &[1, 2, 3, 4, 5],
            &[(1, 1, 2), (2, 1, 3), (3, 3, 2), (4, 2, 4), (5, 3, 5), (6, 4, 5)],
        );
        let order = network.topological_order().unwrap();
        let pos: FxHashMap<EventId, usize> =
            order.iter().enumerate().map(|(i, &e)| (e, i)).collect();
        for id in network.activity_ids() {
            let activity = network.activity(id).unwrap();
            assert!(pos[&activity.start_event] < pos[&activity.end_event]);
        }
    }

    #[test]
    fn test_cycle_detected() {
        let network = build(&[1, 2, 3], &[(1, 1, 2), (2, 2, 3), (3, 3, 2)]);
        assert_eq!(
            network.topological_order().unwrap_err(),
            NetworkError::CyclicGraph {
                ordered: 1,
                total: 3
            }
        );
    }

    #[test]
    fn test_empty_network() {
        assert!(Network::new().topological_order().unwrap().is_empty());
    }
}
