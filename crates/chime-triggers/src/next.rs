//! Next-occurrence resolution for recurrence rules.

use chrono::{
    DateTime, Datelike, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Timelike,
    Utc, Weekday,
};

use crate::types::{CalendarComponents, RecurrenceRule};

/// Forward search horizon, in minutes. Four years covers every satisfiable
/// recurring constraint including leap-day yearly rules; contradictory
/// constraints (Feb 31) exhaust it and yield `None`.
const MAX_SEARCH_MINUTES: i64 = 4 * 366 * 24 * 60;

/// Compute the earliest future instant at which a rule fires.
///
/// Interval rules fire `seconds` after `now`; a zero or negative delay
/// fires immediately (at `now`), and a delay past the representable range
/// of timestamps yields `None`. Calendar rules are searched forward in the
/// rule's timezone, falling back to the system-local zone when unset.
/// Returns `None` when no instant within the search horizon satisfies the
/// constrained components.
pub fn next_occurrence(rule: &RecurrenceRule, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match rule {
        RecurrenceRule::Interval { seconds, .. } => {
            let delay = Duration::milliseconds((seconds * 1000.0).round() as i64);
            if delay <= Duration::zero() {
                return Some(now);
            }
            now.checked_add_signed(delay)
        }
        RecurrenceRule::Calendar {
            components,
            timezone,
            ..
        } => match timezone {
            Some(tz) => search_forward(components, now, tz),
            None => search_forward(components, now, &Local),
        },
    }
}

/// Minute-stepping forward search for the earliest local time matching the
/// constrained components, mapped back to UTC.
///
/// DST handling follows the usual convention: local times inside a
/// spring-forward gap do not exist and are skipped; fall-back overlaps
/// resolve to the earliest (pre-transition) mapping.
fn search_forward<Z: TimeZone>(
    components: &CalendarComponents,
    now: DateTime<Utc>,
    tz: &Z,
) -> Option<DateTime<Utc>> {
    // No instant has a second outside 0-59.
    if components.second.is_some_and(|s| s > 59) {
        return None;
    }

    let local_now = now.with_timezone(tz).naive_local();
    // Start at the current minute: its fire second may still be ahead of
    // `now`. The strictly-after check below rejects it otherwise.
    let mut candidate = truncate_to_minute(local_now);

    for _ in 0..MAX_SEARCH_MINUTES {
        if minute_matches(components, &candidate) {
            let fire = candidate + Duration::seconds(i64::from(components.second.unwrap_or(0)));
            if fire <= local_now {
                candidate += Duration::minutes(1);
                continue;
            }
            match tz.from_local_datetime(&fire) {
                LocalResult::Single(dt) => return Some(dt.with_timezone(&Utc)),
                LocalResult::Ambiguous(earliest, _) => return Some(earliest.with_timezone(&Utc)),
                LocalResult::None => {}
            }
        }
        candidate += Duration::minutes(1);
    }

    None
}

fn truncate_to_minute(dt: NaiveDateTime) -> NaiveDateTime {
    dt.with_second(0)
        .and_then(|d| d.with_nanosecond(0))
        .unwrap_or(dt)
}

/// Check every constrained component except `second` against a candidate
/// minute. Unset components are wildcards.
fn minute_matches(c: &CalendarComponents, dt: &NaiveDateTime) -> bool {
    let date = dt.date();
    c.year.map_or(true, |y| date.year() == y)
        && c.month.map_or(true, |m| date.month() == m)
        && c.day.map_or(true, |d| date.day() == d)
        && c.hour.map_or(true, |h| dt.hour() == h)
        && c.minute.map_or(true, |m| dt.minute() == m)
        && c.weekday.map_or(true, |w| weekday_number(date.weekday()) == w)
        && c.week_of_month.map_or(true, |w| week_of_month(date) == w)
        && c.week_of_year.map_or(true, |w| date.iso_week().week() == w)
        && c.weekday_ordinal.map_or(true, |o| date.day0() / 7 + 1 == o)
}

/// Day of week on the wire contract's scale: 1-7 with 1 = Sunday.
fn weekday_number(weekday: Weekday) -> u32 {
    weekday.num_days_from_sunday() + 1
}

/// Week of month, where week 1 is the week containing the 1st and weeks
/// start on Monday.
fn week_of_month(date: NaiveDate) -> u32 {
    let first_weekday = date
        .with_day(1)
        .map(|d| d.weekday().num_days_from_monday())
        .unwrap_or(0);
    (date.day0() + first_weekday) / 7 + 1
}
