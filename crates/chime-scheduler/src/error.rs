//! Error types for the scheduling façade.

use thiserror::Error;

use chime_triggers::TriggerError;

/// Wire code for schedule-path failures (bad trigger or OS rejection).
pub const ERR_FAILED_TO_SCHEDULE: &str = "ERR_NOTIFICATIONS_FAILED_TO_SCHEDULE";

/// Wire code for next-trigger-date failures (malformed or unsupported trigger).
pub const ERR_INVALID_CALENDAR_TRIGGER: &str = "ERR_NOTIFICATIONS_INVALID_CALENDAR_TRIGGER";

/// Errors surfaced by scheduling operations.
///
/// Parse and build failures are always local and synchronous; OS scheduler
/// failures carry the underlying message through unchanged.
#[derive(Debug, Error)]
pub enum SchedulingError {
    /// The trigger specification for a schedule request could not be parsed.
    #[error("invalid notification trigger: {0}")]
    InvalidTrigger(#[from] TriggerError),

    /// The OS scheduler rejected the request.
    #[error("failed to schedule notification: {0}")]
    SchedulingFailed(String),

    /// The trigger specification for a next-trigger-date request could not
    /// be parsed.
    #[error("invalid calendar trigger: {0}")]
    InvalidCalendarTrigger(TriggerError),

    /// The request has no next-trigger-date semantics (e.g. no trigger at all).
    #[error("no next trigger date is defined for a {kind} trigger")]
    UnsupportedTriggerKind { kind: String },
}

impl SchedulingError {
    /// Stable error code exposed across the API boundary.
    pub fn code(&self) -> &'static str {
        match self {
            SchedulingError::InvalidTrigger(_) | SchedulingError::SchedulingFailed(_) => {
                ERR_FAILED_TO_SCHEDULE
            }
            SchedulingError::InvalidCalendarTrigger(_)
            | SchedulingError::UnsupportedTriggerKind { .. } => ERR_INVALID_CALENDAR_TRIGGER,
        }
    }
}
