//! Notification trigger model.
//!
//! This crate is the pure core of the notification scheduler:
//! - Decodes loosely-typed trigger specifications into a typed [`Trigger`]
//! - Converts triggers into the [`RecurrenceRule`] form the OS scheduler accepts
//! - Computes the next future occurrence of a recurrence rule
//!
//! Absolute-date triggers are normalized to a relative delay at rule-build
//! time; the original wall-clock instant is discarded. Rebuilding a rule from
//! the same `date` trigger at a later `now` therefore yields a shorter delay,
//! not the original instant.

mod error;
mod input;
mod next;
mod types;

pub use error::TriggerError;
pub use input::{TriggerInput, parse_trigger};
pub use next::next_occurrence;
pub use types::{CalendarComponents, RecurrenceRule, Trigger};
