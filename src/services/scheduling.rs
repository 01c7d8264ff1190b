use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::models::Booking;

/// The bookable start times offered by the restaurant.
pub const SLOTS: [&str; 4] = ["6:00 PM", "7:00 PM", "8:00 PM", "9:00 PM"];

/// Nominal duration used when probing slot availability.
const PROBE_HOURS: i64 = 1;

#[derive(Debug, Clone, Serialize)]
pub struct SlotAvailability {
    pub time: &'static str,
    pub available: bool,
}

pub fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// The single point where date/time strings become an instant. All interval
/// arithmetic happens on the returned `NaiveDateTime`, never on strings.
pub fn slot_datetime(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = parse_date(date)?;
    let time = NaiveTime::parse_from_str(time, "%I:%M %p").ok()?;
    Some(date.and_time(time))
}

/// Half-open interval test: `[a, a+ah)` intersects `[b, b+bh)`. Touching
/// boundaries do not count (a booking may start exactly when another ends).
fn overlaps(a: NaiveDateTime, a_hours: i64, b: NaiveDateTime, b_hours: i64) -> bool {
    let a_end = a + Duration::hours(a_hours);
    let b_end = b + Duration::hours(b_hours);
    a < b_end && a_end > b
}

/// Returns the first existing booking whose interval intersects the
/// candidate's, or `None` when the candidate fits. Pure over the candidate
/// and the given set; callers pass the bookings for the candidate's date.
/// Rows whose stored date/time no longer parse are skipped.
pub fn find_conflict<'a>(
    start: NaiveDateTime,
    hours: i64,
    existing: &'a [Booking],
) -> Option<&'a Booking> {
    existing.iter().find(|booking| {
        slot_datetime(&booking.date, &booking.time)
            .map(|booked_start| overlaps(start, hours, booked_start, booking.hours))
            .unwrap_or(false)
    })
}

/// Per-slot availability for a date: a slot is open iff a 1-hour booking
/// starting there would not overlap any existing booking on that date.
pub fn slot_availability(date: &str, existing: &[Booking]) -> Vec<SlotAvailability> {
    SLOTS
        .iter()
        .map(|slot| {
            let available = match slot_datetime(date, slot) {
                Some(start) => find_conflict(start, PROBE_HOURS, existing).is_none(),
                None => false,
            };
            SlotAvailability {
                time: slot,
                available,
            }
        })
        .collect()
}
