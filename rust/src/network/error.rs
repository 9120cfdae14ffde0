//! Errors raised by network mutation and computation.

use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{ActivityId, EventId};

/// Which kind of record an identifier refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Event,
    Activity,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Event => write!(f, "event"),
            EntityKind::Activity => write!(f, "activity"),
        }
    }
}

/// Errors that can occur while editing or computing a network.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    #[error("{kind} with id {id} already exists")]
    DuplicateKey { kind: EntityKind, id: i64 },
    #[error("no {kind} with id {id}")]
    NotFound { kind: EntityKind, id: i64 },
    #[error("event {event_id} is still referenced by {incident} activities")]
    InUse { event_id: EventId, incident: usize },
    #[error("activity {activity_id} starts and ends at the same event {event_id}")]
    InvalidEdge {
        activity_id: ActivityId,
        event_id: EventId,
    },
    #[error("activity {activity_id} has invalid duration {duration}: must be finite and not negative")]
    NegativeDuration {
        activity_id: ActivityId,
        duration: f64,
    },
    #[error("event graph contains a cycle or is inconsistent: ordered {ordered} of {total} events")]
    CyclicGraph { ordered: usize, total: usize },
    #[error("offset of {offset} days from {start_date} is outside the supported date range")]
    DateOutOfRange { start_date: NaiveDate, offset: f64 },
}

impl NetworkError {
    pub(crate) fn event_not_found(id: EventId) -> Self {
        NetworkError::NotFound {
            kind: EntityKind::Event,
            id,
        }
    }

    pub(crate) fn activity_not_found(id: ActivityId) -> Self {
        NetworkError::NotFound {
            kind: EntityKind::Activity,
            id,
        }
    }
}
