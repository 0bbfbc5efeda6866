//! Decoding of loosely-typed trigger specifications.
//!
//! Callers hand the scheduler an untyped JSON object discriminated by a
//! `type` field. Decoding is schema-validated: missing optional fields
//! default (numerics to 0, booleans to false), while a field that is
//! present with the wrong JSON type aborts the whole parse with
//! [`TriggerError::InvalidInput`]. One policy, applied to every variant.

use chrono_tz::Tz;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::error::TriggerError;
use crate::types::{CalendarComponents, Trigger};

/// Wire shape of a trigger specification.
///
/// Field names and units are the compatibility contract with callers:
/// `timestamp` is epoch milliseconds, `weekday` is 1-7 with 1 = Sunday.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TriggerInput {
    TimeInterval {
        #[serde(default)]
        seconds: f64,
        #[serde(default)]
        repeats: bool,
    },
    Date {
        #[serde(default)]
        timestamp: f64,
    },
    Daily {
        #[serde(default)]
        hour: u32,
        #[serde(default)]
        minute: u32,
    },
    Weekly {
        #[serde(default)]
        weekday: u32,
        #[serde(default)]
        hour: u32,
        #[serde(default)]
        minute: u32,
    },
    Monthly {
        #[serde(default)]
        day: u32,
        #[serde(default)]
        hour: u32,
        #[serde(default)]
        minute: u32,
    },
    Yearly {
        #[serde(default)]
        month: u32,
        #[serde(default)]
        day: u32,
        #[serde(default)]
        hour: u32,
        #[serde(default)]
        minute: u32,
    },
    Calendar {
        #[serde(default)]
        value: CalendarComponents,
        #[serde(default)]
        timezone: Option<String>,
        #[serde(default)]
        repeats: bool,
    },
}

impl Trigger {
    /// Validate a decoded specification into a typed trigger.
    ///
    /// An unresolvable IANA timezone id is logged and dropped, falling back
    /// to the system-local zone rather than failing.
    pub fn from_input(input: TriggerInput) -> Result<Trigger, TriggerError> {
        match input {
            TriggerInput::TimeInterval { seconds, repeats } => {
                if !seconds.is_finite() || seconds < 0.0 {
                    return Err(TriggerError::InvalidField {
                        field: "seconds",
                        reason: format!("must be a finite non-negative number, got {seconds}"),
                    });
                }
                Ok(Trigger::TimeInterval { seconds, repeats })
            }
            TriggerInput::Date { timestamp } => {
                if !timestamp.is_finite() {
                    return Err(TriggerError::InvalidField {
                        field: "timestamp",
                        reason: format!("must be a finite epoch-millisecond value, got {timestamp}"),
                    });
                }
                Ok(Trigger::Date {
                    timestamp_ms: timestamp,
                })
            }
            TriggerInput::Daily { hour, minute } => Ok(Trigger::Daily { hour, minute }),
            TriggerInput::Weekly {
                weekday,
                hour,
                minute,
            } => Ok(Trigger::Weekly {
                weekday,
                hour,
                minute,
            }),
            TriggerInput::Monthly { day, hour, minute } => {
                Ok(Trigger::Monthly { day, hour, minute })
            }
            TriggerInput::Yearly {
                month,
                day,
                hour,
                minute,
            } => Ok(Trigger::Yearly {
                month,
                day,
                hour,
                minute,
            }),
            TriggerInput::Calendar {
                value,
                timezone,
                repeats,
            } => {
                let timezone = timezone.as_deref().and_then(|id| match id.parse::<Tz>() {
                    Ok(tz) => Some(tz),
                    Err(_) => {
                        warn!(timezone = id, "unresolvable timezone id, using system-local");
                        None
                    }
                });
                Ok(Trigger::Calendar {
                    components: value,
                    timezone,
                    repeats,
                })
            }
        }
    }
}

/// Parse a caller-supplied trigger specification.
///
/// Returns `Ok(None)` for an absent or JSON-null input, which means a
/// trigger-less notification (the OS fires it immediately on submission).
/// Any other undecodable input is an error.
pub fn parse_trigger(input: Option<&Value>) -> Result<Option<Trigger>, TriggerError> {
    let value = match input {
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value,
    };

    let decoded: TriggerInput = serde_json::from_value(value.clone())
        .map_err(|e| TriggerError::InvalidInput(e.to_string()))?;

    Trigger::from_input(decoded).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_absent_input_is_triggerless() {
        assert!(parse_trigger(None).unwrap().is_none());
        assert!(parse_trigger(Some(&Value::Null)).unwrap().is_none());
    }

    #[test]
    fn test_parse_time_interval() {
        let input = json!({"type": "timeInterval", "seconds": 60, "repeats": true});
        let trigger = parse_trigger(Some(&input)).unwrap().unwrap();
        assert_eq!(
            trigger,
            Trigger::TimeInterval {
                seconds: 60.0,
                repeats: true
            }
        );
    }

    #[test]
    fn test_parse_time_interval_defaults() {
        let input = json!({"type": "timeInterval"});
        let trigger = parse_trigger(Some(&input)).unwrap().unwrap();
        assert_eq!(
            trigger,
            Trigger::TimeInterval {
                seconds: 0.0,
                repeats: false
            }
        );
    }

    #[test]
    fn test_parse_rejects_negative_interval() {
        let input = json!({"type": "timeInterval", "seconds": -5});
        let err = parse_trigger(Some(&input)).unwrap_err();
        assert!(matches!(
            err,
            TriggerError::InvalidField { field: "seconds", .. }
        ));
    }

    #[test]
    fn test_parse_rejects_wrong_field_type() {
        let input = json!({"type": "daily", "hour": "nine", "minute": 0});
        let err = parse_trigger(Some(&input)).unwrap_err();
        assert!(matches!(err, TriggerError::InvalidInput(_)));
    }

    #[test]
    fn test_parse_rejects_unknown_type() {
        let input = json!({"type": "bogus"});
        assert!(matches!(
            parse_trigger(Some(&input)),
            Err(TriggerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_parse_rejects_missing_type() {
        let input = json!({"seconds": 10});
        assert!(matches!(
            parse_trigger(Some(&input)),
            Err(TriggerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_parse_rejects_non_object() {
        let input = json!("daily");
        assert!(matches!(
            parse_trigger(Some(&input)),
            Err(TriggerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_parse_daily() {
        let input = json!({"type": "daily", "hour": 9, "minute": 30});
        let trigger = parse_trigger(Some(&input)).unwrap().unwrap();
        assert_eq!(trigger, Trigger::Daily { hour: 9, minute: 30 });
    }

    #[test]
    fn test_parse_weekly_and_monthly_and_yearly() {
        let weekly = json!({"type": "weekly", "weekday": 1, "hour": 8, "minute": 15});
        assert_eq!(
            parse_trigger(Some(&weekly)).unwrap().unwrap(),
            Trigger::Weekly {
                weekday: 1,
                hour: 8,
                minute: 15
            }
        );

        let monthly = json!({"type": "monthly", "day": 31, "hour": 23, "minute": 59});
        assert_eq!(
            parse_trigger(Some(&monthly)).unwrap().unwrap(),
            Trigger::Monthly {
                day: 31,
                hour: 23,
                minute: 59
            }
        );

        let yearly = json!({"type": "yearly", "month": 12, "day": 25, "hour": 0, "minute": 0});
        assert_eq!(
            parse_trigger(Some(&yearly)).unwrap().unwrap(),
            Trigger::Yearly {
                month: 12,
                day: 25,
                hour: 0,
                minute: 0
            }
        );
    }

    #[test]
    fn test_parse_date_timestamp_in_milliseconds() {
        let input = json!({"type": "date", "timestamp": 1_700_000_000_000i64});
        let trigger = parse_trigger(Some(&input)).unwrap().unwrap();
        assert_eq!(
            trigger,
            Trigger::Date {
                timestamp_ms: 1_700_000_000_000.0
            }
        );
    }

    #[test]
    fn test_parse_calendar_with_components_and_timezone() {
        let input = json!({
            "type": "calendar",
            "value": {"month": 2, "day": 14, "hour": 9, "weekOfMonth": 3},
            "timezone": "Europe/Warsaw",
            "repeats": true,
        });
        let trigger = parse_trigger(Some(&input)).unwrap().unwrap();
        assert_eq!(
            trigger,
            Trigger::Calendar {
                components: CalendarComponents {
                    month: Some(2),
                    day: Some(14),
                    hour: Some(9),
                    week_of_month: Some(3),
                    ..Default::default()
                },
                timezone: Some(chrono_tz::Europe::Warsaw),
                repeats: true,
            }
        );
    }

    #[test]
    fn test_parse_calendar_unresolvable_timezone_falls_back() {
        let input = json!({
            "type": "calendar",
            "value": {"hour": 9},
            "timezone": "Mars/Olympus_Mons",
        });
        let trigger = parse_trigger(Some(&input)).unwrap().unwrap();
        match trigger {
            Trigger::Calendar { timezone, .. } => assert!(timezone.is_none()),
            other => panic!("expected calendar trigger, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_calendar_ignores_unknown_component_keys() {
        let input = json!({
            "type": "calendar",
            "value": {"hour": 9, "nanosecond": 1},
        });
        let trigger = parse_trigger(Some(&input)).unwrap().unwrap();
        match trigger {
            Trigger::Calendar { components, .. } => {
                assert_eq!(components.hour, Some(9));
            }
            other => panic!("expected calendar trigger, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_calendar_empty_value_is_all_wildcards() {
        let input = json!({"type": "calendar"});
        let trigger = parse_trigger(Some(&input)).unwrap().unwrap();
        match trigger {
            Trigger::Calendar {
                components,
                timezone,
                repeats,
            } => {
                assert_eq!(components, CalendarComponents::default());
                assert!(timezone.is_none());
                assert!(!repeats);
            }
            other => panic!("expected calendar trigger, got {other:?}"),
        }
    }
}
