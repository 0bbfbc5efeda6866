//! Trigger and recurrence rule types.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Partial date-component matcher.
///
/// Only the fields that are set constrain matching; unset fields are
/// wildcards. Values are not range-checked here: an out-of-range value
/// (e.g. `hour: 99`) simply never matches any instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarComponents {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub second: Option<u32>,
    /// Day of week, 1-7 with 1 = Sunday.
    pub weekday: Option<u32>,
    /// Week within the month; week 1 is the week containing the 1st,
    /// with weeks starting on Monday.
    pub week_of_month: Option<u32>,
    /// ISO 8601 week number.
    pub week_of_year: Option<u32>,
    /// The nth occurrence of `weekday` within the month (1-based).
    pub weekday_ordinal: Option<u32>,
}

/// A validated scheduling rule supplied by the caller.
///
/// Immutable once built; consumed by [`RecurrenceRule::from_trigger`].
#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
    /// Fire after a delay, optionally repeating at that interval.
    TimeInterval { seconds: f64, repeats: bool },
    /// Fire once at an absolute instant (epoch milliseconds).
    Date { timestamp_ms: f64 },
    /// Fire every day at the given time.
    Daily { hour: u32, minute: u32 },
    /// Fire every week on the given weekday (1 = Sunday) at the given time.
    Weekly { weekday: u32, hour: u32, minute: u32 },
    /// Fire every month on the given day at the given time.
    Monthly { day: u32, hour: u32, minute: u32 },
    /// Fire every year on the given month/day at the given time.
    Yearly {
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
    },
    /// Fire whenever the given date components match, in the given zone.
    Calendar {
        components: CalendarComponents,
        timezone: Option<Tz>,
        repeats: bool,
    },
}

impl Trigger {
    /// Short name of this trigger's kind, for logging and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Trigger::TimeInterval { .. } => "timeInterval",
            Trigger::Date { .. } => "date",
            Trigger::Daily { .. } => "daily",
            Trigger::Weekly { .. } => "weekly",
            Trigger::Monthly { .. } => "monthly",
            Trigger::Yearly { .. } => "yearly",
            Trigger::Calendar { .. } => "calendar",
        }
    }
}

/// The scheduler-level form of a trigger: either a relative delay or a
/// calendar-component matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecurrenceRule {
    /// Fire `seconds` from submission, optionally repeating.
    Interval { seconds: f64, repeats: bool },
    /// Fire whenever the constrained components match.
    Calendar {
        components: CalendarComponents,
        timezone: Option<Tz>,
        repeats: bool,
    },
}

impl RecurrenceRule {
    /// Convert a trigger into the rule the OS scheduler accepts.
    ///
    /// `now` anchors the `date` normalization: an absolute timestamp is
    /// truncated to whole seconds and flattened into a one-shot delay
    /// relative to `now`. The delay may be zero or negative for past dates,
    /// in which case the scheduler fires immediately.
    ///
    /// The builder performs no range validation; out-of-range component
    /// values pass through and never match.
    pub fn from_trigger(trigger: &Trigger, now: DateTime<Utc>) -> Self {
        match trigger {
            Trigger::TimeInterval { seconds, repeats } => RecurrenceRule::Interval {
                seconds: *seconds,
                repeats: *repeats,
            },
            Trigger::Date { timestamp_ms } => {
                let target_secs = (*timestamp_ms / 1000.0).trunc() as i64;
                RecurrenceRule::Interval {
                    seconds: (target_secs - now.timestamp()) as f64,
                    repeats: false,
                }
            }
            Trigger::Daily { hour, minute } => RecurrenceRule::Calendar {
                components: CalendarComponents {
                    hour: Some(*hour),
                    minute: Some(*minute),
                    ..Default::default()
                },
                timezone: None,
                repeats: true,
            },
            Trigger::Weekly {
                weekday,
                hour,
                minute,
            } => RecurrenceRule::Calendar {
                components: CalendarComponents {
                    weekday: Some(*weekday),
                    hour: Some(*hour),
                    minute: Some(*minute),
                    ..Default::default()
                },
                timezone: None,
                repeats: true,
            },
            Trigger::Monthly { day, hour, minute } => RecurrenceRule::Calendar {
                components: CalendarComponents {
                    day: Some(*day),
                    hour: Some(*hour),
                    minute: Some(*minute),
                    ..Default::default()
                },
                timezone: None,
                repeats: true,
            },
            Trigger::Yearly {
                month,
                day,
                hour,
                minute,
            } => RecurrenceRule::Calendar {
                components: CalendarComponents {
                    month: Some(*month),
                    day: Some(*day),
                    hour: Some(*hour),
                    minute: Some(*minute),
                    ..Default::default()
                },
                timezone: None,
                repeats: true,
            },
            Trigger::Calendar {
                components,
                timezone,
                repeats,
            } => RecurrenceRule::Calendar {
                components: *components,
                timezone: *timezone,
                repeats: *repeats,
            },
        }
    }

    /// Whether this rule fires more than once.
    pub fn repeats(&self) -> bool {
        match self {
            RecurrenceRule::Interval { repeats, .. } => *repeats,
            RecurrenceRule::Calendar { repeats, .. } => *repeats,
        }
    }
}
