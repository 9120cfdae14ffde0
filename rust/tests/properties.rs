use cpm_rust::{Activity, Network, NetworkError};
use proptest::prelude::*;

// A random DAG: arrows only run from a lower to a higher event index, so the
// graph is acyclic by construction. Durations are whole numbers.
fn dag_strategy(max_events: usize) -> impl Strategy<Value = (usize, Vec<(usize, usize, u32)>)> {
    (2..=max_events).prop_flat_map(|n| {
        let arrows = proptest::collection::vec((0..n, 0..n, 0u32..20), 1..20);
        arrows.prop_map(move |raw| {
            let arrows = raw
                .into_iter()
                .filter(|(a, b, _)| a != b)
                .map(|(a, b, d)| (a.min(b), a.max(b), d))
                .collect::<Vec<_>>();
            (n, arrows)
        })
    })
}

fn build(n: usize, arrows: &[(usize, usize, u32)]) -> Network {
    let mut network = Network::new();
    for event in 0..n {
        network.add_event(event as i64 + 1, "").unwrap();
    }
    for (i, &(start, end, duration)) in arrows.iter().enumerate() {
        let activity =
            Activity::new(i as i64 + 1, "", duration as f64, start as i64 + 1, end as i64 + 1)
                .unwrap();
        network.add_activity(activity).unwrap();
    }
    network
}

/// Longest path over the DAG, computed directly from the arrow list.
fn longest_path(n: usize, arrows: &[(usize, usize, u32)]) -> f64 {
    let mut reach = vec![0.0f64; n];
    let mut sorted = arrows.to_vec();
    sorted.sort_by_key(|&(start, _, _)| start);
    for (start, end, duration) in sorted {
        reach[end] = reach[end].max(reach[start] + duration as f64);
    }
    reach.into_iter().fold(0.0, f64::max)
}

proptest! {
    #[test]
    fn test_pass_identities_hold((n, arrows) in dag_strategy(8)) {
        let mut network = build(n, &arrows);
        network.compute().unwrap();

        for id in network.activity_ids() {
            let a = network.activity(id).unwrap();
            if let (Some(es), Some(ef)) = (a.earliest_start, a.earliest_finish) {
                prop_assert_eq!(ef, es + a.duration);
            }
            if let (Some(ls), Some(lf)) = (a.latest_start, a.latest_finish) {
                prop_assert_eq!(ls, lf - a.duration);
            }
        }
    }

    #[test]
    fn test_critical_iff_zero_float((n, arrows) in dag_strategy(8)) {
        let mut network = build(n, &arrows);
        network.compute().unwrap();

        for id in network.activity_ids() {
            let a = network.activity(id).unwrap();
            let zero = a.total_float.is_some_and(|tf| tf.abs() < 1e-9);
            prop_assert_eq!(a.is_critical, zero);
            if let Some(tf) = a.total_float {
                prop_assert!(tf > -1e-9, "negative float {} on activity {}", tf, id);
            }
        }
    }

    #[test]
    fn test_duration_is_longest_path((n, arrows) in dag_strategy(8)) {
        let mut network = build(n, &arrows);
        let path = network.critical_path().unwrap();

        let expected = if arrows.is_empty() { 0.0 } else { longest_path(n, &arrows) };
        prop_assert!((path.project_duration - expected).abs() < 1e-9);

        // Some activity always lies on a longest path.
        if !arrows.is_empty() {
            prop_assert!(!path.activity_ids.is_empty());
        }
    }

    #[test]
    fn test_compute_is_idempotent((n, arrows) in dag_strategy(8)) {
        let mut network = build(n, &arrows);
        let first = network.project_summary().unwrap();
        network.compute().unwrap();
        let second = network.project_summary().unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_back_arrow_makes_cycle(len in 2usize..8) {
        let chain: Vec<(usize, usize, u32)> = (0..len - 1).map(|i| (i, i + 1, 1)).collect();
        let mut network = build(len, &chain);
        network
            .add_activity(Activity::new(100, "back", 1.0, len as i64, 1).unwrap())
            .unwrap();

        let is_cyclic = matches!(network.compute(), Err(NetworkError::CyclicGraph { .. }));
        prop_assert!(is_cyclic);
    }

    #[test]
    fn test_incident_events_cannot_be_removed((n, arrows) in dag_strategy(6)) {
        let mut network = build(n, &arrows);
        for event in network.event_ids() {
            let incident = network.outgoing(event).len() + network.incoming(event).len();
            let result = network.clone().remove_event(event);
            if incident > 0 {
                let in_use = matches!(result, Err(NetworkError::InUse { .. }));
                prop_assert!(in_use);
            } else {
                prop_assert!(result.is_ok());
            }
        }
        let missing = network.add_activity(Activity::new(999, "", 1.0, 1, 1000).unwrap());
        prop_assert_eq!(missing, Err(NetworkError::NotFound {
            kind: cpm_rust::EntityKind::Event,
            id: 1000,
        }));
    }
}
