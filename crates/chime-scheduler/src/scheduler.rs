//! The scheduling façade.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info};

use chime_triggers::{RecurrenceRule, next_occurrence, parse_trigger};

use crate::error::SchedulingError;
use crate::os::{OsScheduler, SerializedRequest};

/// Façade over the platform notification scheduler.
///
/// Orchestrates parse → build → submit and translates platform responses
/// into [`SchedulingError`]s with stable codes. Holds no local state.
pub struct NotificationScheduler<S> {
    os: S,
}

impl<S: OsScheduler> NotificationScheduler<S> {
    /// Create a new façade over the given platform scheduler.
    pub fn new(os: S) -> Self {
        Self { os }
    }

    /// Schedule a notification.
    ///
    /// An absent (`None`/null) trigger specification schedules a
    /// trigger-less notification, which the platform fires immediately.
    /// A malformed specification or a platform rejection both surface with
    /// code [`crate::ERR_FAILED_TO_SCHEDULE`].
    pub async fn schedule_notification(
        &self,
        id: &str,
        content: &Value,
        trigger_input: Option<&Value>,
    ) -> Result<(), SchedulingError> {
        let trigger = parse_trigger(trigger_input)?;
        let rule = trigger
            .as_ref()
            .map(|t| RecurrenceRule::from_trigger(t, Utc::now()));

        debug!(id, kind = ?trigger.as_ref().map(|t| t.kind()), "submitting notification request");
        self.os
            .schedule(id, content, rule.as_ref())
            .await
            .map_err(SchedulingError::SchedulingFailed)?;

        info!(id, "scheduled notification");
        Ok(())
    }

    /// Cancel a pending notification. Fire-and-forget: no local state to
    /// reconcile, and cancelling an unknown id is not an error.
    pub async fn cancel_scheduled_notification(&self, id: &str) -> Result<(), SchedulingError> {
        let ids = [id.to_string()];
        self.os
            .cancel_pending(&ids)
            .await
            .map_err(SchedulingError::SchedulingFailed)?;
        debug!(id, "cancelled notification");
        Ok(())
    }

    /// Cancel every pending notification.
    pub async fn cancel_all_scheduled_notifications(&self) -> Result<(), SchedulingError> {
        self.os
            .cancel_all_pending()
            .await
            .map_err(SchedulingError::SchedulingFailed)?;
        debug!("cancelled all notifications");
        Ok(())
    }

    /// List pending notifications in the platform's serialized form.
    pub async fn get_all_scheduled_notifications(
        &self,
    ) -> Result<Vec<SerializedRequest>, SchedulingError> {
        self.os
            .list_pending()
            .await
            .map_err(SchedulingError::SchedulingFailed)
    }

    /// Compute the next fire time of a trigger specification, in epoch
    /// milliseconds.
    ///
    /// Returns `Ok(None)` when the trigger's calendar constraints are
    /// unsatisfiable (a legitimate result, not a failure). Malformed input
    /// and trigger-less requests reject with code
    /// [`crate::ERR_INVALID_CALENDAR_TRIGGER`].
    pub async fn get_next_trigger_date(
        &self,
        trigger_input: Option<&Value>,
    ) -> Result<Option<i64>, SchedulingError> {
        self.next_trigger_date_at(trigger_input, Utc::now())
    }

    /// [`Self::get_next_trigger_date`] with an explicit `now` anchor.
    pub fn next_trigger_date_at(
        &self,
        trigger_input: Option<&Value>,
        now: DateTime<Utc>,
    ) -> Result<Option<i64>, SchedulingError> {
        let trigger = parse_trigger(trigger_input)
            .map_err(SchedulingError::InvalidCalendarTrigger)?
            .ok_or_else(|| SchedulingError::UnsupportedTriggerKind {
                kind: "missing".to_string(),
            })?;

        let rule = RecurrenceRule::from_trigger(&trigger, now);
        Ok(next_occurrence(&rule, now).map(|dt| dt.timestamp_millis()))
    }
}
