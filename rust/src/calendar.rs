//! Projection of computed network times onto calendar dates.
//!
//! Network times are abstract units; here one unit is one day counted from a
//! project start date. Offsets are rounded up to whole days, so an activity
//! finishing at 2.5 is shown as finishing on day 3.

use chrono::{NaiveDate, TimeDelta};
use pyo3::prelude::*;

use crate::models::ActivityId;
use crate::network::{ActivitySummary, NetworkError, ProjectSummary};

/// Calendar dates for one activity.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct DatedActivity {
    #[pyo3(get)]
    pub activity_id: ActivityId,
    #[pyo3(get)]
    pub name: String,
    #[pyo3(get)]
    pub earliest_start: Option<NaiveDate>,
    #[pyo3(get)]
    pub earliest_finish: Option<NaiveDate>,
    #[pyo3(get)]
    pub latest_start: Option<NaiveDate>,
    #[pyo3(get)]
    pub latest_finish: Option<NaiveDate>,
    #[pyo3(get)]
    pub is_critical: bool,
}

/// Calendar view of a project summary.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct CalendarSchedule {
    #[pyo3(get)]
    pub start_date: NaiveDate,
    #[pyo3(get)]
    pub finish_date: NaiveDate,
    /// In the same (id) order as the summary.
    #[pyo3(get)]
    pub activities: Vec<DatedActivity>,
}

/// Date `offset` days after `start`, rounding fractional offsets up.
fn offset_date(start: NaiveDate, offset: f64) -> Result<NaiveDate, NetworkError> {
    // `as` saturates, so huge offsets land on i64::MAX and fail below.
    TimeDelta::try_days(offset.ceil() as i64)
        .and_then(|delta| start.checked_add_signed(delta))
        .ok_or(NetworkError::DateOutOfRange {
            start_date: start,
            offset,
        })
}

fn date_activity(
    start: NaiveDate,
    activity: &ActivitySummary,
) -> Result<DatedActivity, NetworkError> {
    let at = |offset: Option<f64>| offset.map(|o| offset_date(start, o)).transpose();
    Ok(DatedActivity {
        activity_id: activity.id,
        name: activity.name.clone(),
        earliest_start: at(activity.earliest_start)?,
        earliest_finish: at(activity.earliest_finish)?,
        latest_start: at(activity.latest_start)?,
        latest_finish: at(activity.latest_finish)?,
        is_critical: activity.is_critical,
    })
}

/// Map a computed summary onto dates counted from `start_date`.
///
/// # Errors
/// * `NetworkError::DateOutOfRange` if any offset lands outside the dates
///   chrono can represent.
pub fn project_onto_calendar(
    summary: &ProjectSummary,
    start_date: NaiveDate,
) -> Result<CalendarSchedule, NetworkError> {
    Ok(CalendarSchedule {
        start_date,
        finish_date: offset_date(start_date, summary.duration)?,
        activities: summary
            .activities
            .iter()
            .map(|a| date_activity(start_date, a))
            .collect::<Result<_, _>>()?,
    })
}
