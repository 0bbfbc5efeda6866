//! Async scheduling façade over the platform notification scheduler.
//!
//! This crate orchestrates parse → build → submit against an abstract
//! [`OsScheduler`] and exposes the cancel/list operations. It keeps no
//! local state: the OS scheduler is the single source of truth for
//! pending notifications, and every operation resolves or rejects exactly
//! once with a stable error code.

mod error;
mod os;
mod scheduler;

pub use error::{ERR_FAILED_TO_SCHEDULE, ERR_INVALID_CALENDAR_TRIGGER, SchedulingError};
pub use os::{OsScheduler, SerializedRequest};
pub use scheduler::NotificationScheduler;
