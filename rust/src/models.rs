//! Core records of an activity-on-arrow network.
//!
//! Events are the nodes (milestones), activities are the timed arrows between
//! them. Computed fields stay `None` until the network has been computed, so a
//! value of `0.0` always means "computed to zero" and never "not computed yet".

use pyo3::prelude::*;

use crate::network::NetworkError;

/// Caller-assigned event identifier.
pub type EventId = i64;

/// Caller-assigned activity identifier.
pub type ActivityId = i64;

/// Normalise a display label: typographic quotes become ASCII quotes and
/// surrounding whitespace is trimmed.
pub fn normalize_label(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2019}' | '\u{2018}' | '`' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            other => other,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// A milestone node of the network.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    #[pyo3(get)]
    pub id: EventId,
    #[pyo3(get)]
    pub name: String,
    /// Earliest occurrence time (ES).
    #[pyo3(get)]
    pub earliest_start: f64,
    /// Latest occurrence time (LF), unset until computed.
    #[pyo3(get)]
    pub latest_finish: Option<f64>,
}

impl Event {
    pub fn new(id: EventId, name: &str) -> Self {
        Self {
            id,
            name: normalize_label(name),
            earliest_start: 0.0,
            latest_finish: None,
        }
    }

    /// Time the event may slip without delaying the project (LF - ES).
    pub fn slack(&self) -> Option<f64> {
        self.latest_finish.map(|lf| lf - self.earliest_start)
    }

    pub(crate) fn reset(&mut self) {
        self.earliest_start = 0.0;
        self.latest_finish = None;
    }
}

#[pymethods]
impl Event {
    #[pyo3(name = "slack")]
    fn py_slack(&self) -> Option<f64> {
        self.slack()
    }

    fn __repr__(&self) -> String {
        format!(
            "Event(id={}, name={:?}, ES={}, LF={:?})",
            self.id, self.name, self.earliest_start, self.latest_finish
        )
    }
}

/// A timed arrow from `start_event` to `end_event`.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct Activity {
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

impl Activity {
    /// Build an activity, rejecting negative, NaN and infinite durations.
    ///
    /// Endpoint existence and the self-loop check happen when the activity is
    /// added to a network.
    pub fn new(
        id: ActivityId,
        name: &str,
        duration: f64,
        start_event: EventId,
        end_event: EventId,
    ) -> Result<Self, NetworkError> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(NetworkError::NegativeDuration {
                activity_id: id,
                duration,
            });
        }

        Ok(Self {
            id,
            name: normalize_label(name),
            duration,
            start_event,
            end_event,
            earliest_start: None,
            earliest_finish: None,
            latest_start: None,
            latest_finish: None,
            total_float: None,
            free_float: None,
            is_critical: false,
        })
    }

    pub(crate) fn reset(&mut self) {
        self.earliest_start = None;
        self.earliest_finish = None;
        self.latest_start = None;
        self.latest_finish = None;
        self.total_float = None;
        self.free_float = None;
        self.is_critical = false;
    }
}

#[pymethods]
impl Activity {
    fn __repr__(&self) -> String {
        format!(
            "Activity(id={}, name={:?}, duration={}, {} -> {}, critical={})",
            self.id, self.name, self.duration, self.start_event, self.end_event, self.is_critical
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("  Pour \u{201C}slab\u{201D} "), "Pour \"slab\"");
        assert_eq!(normalize_label("Owner\u{2019}s `sign-off`"), "Owner's 'sign-off'");
        assert_eq!(normalize_label(""), "");
    }

    #[test]
    fn test_new_event_defaults() {
        let event = Event::new(1, " Start ");
        assert_eq!(event.name, "Start");
        assert_eq!(event.earliest_start, 0.0);
        assert_eq!(event.latest_finish, None);
        assert_eq!(event.slack(), None);
    }

    #[test]
    fn test_event_slack() {
        let mut event = Event::new(2, "Foundations done");
        event.earliest_start = 4.0;
        event.latest_finish = Some(5.5);
        assert!((event.slack().unwrap() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_activity_rejects_negative_duration() {
        let err = Activity::new(7, "Dig", -1.0, 1, 2).unwrap_err();
        assert!(matches!(
            err,
            NetworkError::NegativeDuration { activity_id: 7, .. }
        ));
    }

    #[test]
    fn test_activity_rejects_nan_duration() {
        assert!(Activity::new(7, "Dig", f64::NAN, 1, 2).is_err());
    }

    #[test]
    fn test_activity_rejects_infinite_duration() {
        let err = Activity::new(8, "Wait", f64::INFINITY, 1, 2).unwrap_err();
        assert!(matches!(
            err,
            NetworkError::NegativeDuration { activity_id: 8, .. }
        ));
        assert!(Activity::new(8, "Wait", f64::NEG_INFINITY, 1, 2).is_err());
    }

    #[test]
    fn test_activity_accepts_zero_duration() {
        let activity = Activity::new(3, "Dummy", 0.0, 1, 2).unwrap();
        assert_eq!(activity.duration, 0.0);
        assert_eq!(activity.earliest_start, None);
        assert!(!activity.is_critical);
    }
}
