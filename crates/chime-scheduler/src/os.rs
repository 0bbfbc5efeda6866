//! Abstract boundary to the platform notification scheduler.

use async_trait::async_trait;
use serde_json::Value;

use chime_triggers::RecurrenceRule;

/// A pending notification request as serialized by the platform.
///
/// Produced externally and passed through unchanged; this crate does not
/// define its shape.
pub type SerializedRequest = Value;

/// The platform notification scheduler, treated as a black box.
///
/// The platform serializes access internally; callers must not assume
/// ordering between concurrently submitted requests with different
/// identifiers. Errors are the platform's human-readable message.
#[async_trait]
pub trait OsScheduler: Send + Sync {
    /// Submit a notification. `rule: None` means fire immediately.
    async fn schedule(
        &self,
        id: &str,
        content: &Value,
        rule: Option<&RecurrenceRule>,
    ) -> Result<(), String>;

    /// Remove the pending notifications with the given identifiers.
    async fn cancel_pending(&self, ids: &[String]) -> Result<(), String>;

    /// Remove every pending notification.
    async fn cancel_all_pending(&self) -> Result<(), String>;

    /// List pending notifications in the platform's serialized form.
    async fn list_pending(&self) -> Result<Vec<SerializedRequest>, String>;
}
