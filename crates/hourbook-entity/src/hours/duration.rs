//! Wall-clock arithmetic for hours requests.

use chrono::NaiveTime;

use hourbook_core::AppError;

/// Seconds per hour.
const SECONDS_PER_HOUR: f64 = 3600.0;

/// Compute the fractional hours between two wall-clock times on the same day.
///
/// `to` must be strictly after `from`; requests spanning midnight are not
/// representable and are rejected like any other non-positive span.
pub fn compute_hours(from: NaiveTime, to: NaiveTime) -> Result<f64, AppError> {
    let seconds = (to - from).num_seconds();
    if seconds <= 0 {
        return Err(AppError::validation(format!(
            "to_time ({to}) must be later than from_time ({from})"
        )));
    }
    Ok(seconds as f64 / SECONDS_PER_HOUR)
}
