//! Expiration reminder boundary.
//!
//! # Responsibility
//! - Build one-shot reminder requests for newly tracked food items.
//! - Define the one-way scheduling contract implemented by the platform side.
//!
//! # Invariants
//! - Reminder identifier equals the food item ID.
//! - Fire time is the expiration date at 09:00 local time.
//! - Scheduling failures never affect pantry state.

use crate::model::food_item::{FoodItem, FoodItemId};
use chrono::{NaiveDateTime, NaiveTime};
use std::error::Error;
use std::fmt::{Display, Formatter};

mod outbox;

pub use outbox::{ReminderOutbox, DEFAULT_OUTBOX_CAPACITY};

/// Local hour at which expiration reminders fire.
pub const REMINDER_HOUR: u32 = 9;

const REMINDER_TITLE: &str = "Food Expiration Reminder";

/// Request for a single local alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRequest {
    /// Equals the item ID; rescheduling the same ID replaces on the platform side.
    pub id: FoodItemId,
    pub title: String,
    pub body: String,
    /// Local wall-clock time, no timezone attached.
    pub fire_at: NaiveDateTime,
}

impl ReminderRequest {
    /// Builds the expiration-day reminder for `item`.
    pub fn for_item(item: &FoodItem) -> Self {
        Self {
            id: item.id,
            title: REMINDER_TITLE.to_string(),
            body: format!("{} is expiring today!", item.name),
            fire_at: reminder_fire_at(item),
        }
    }
}

/// Expiration date pinned to [`REMINDER_HOUR`]:00 local time.
pub fn reminder_fire_at(item: &FoodItem) -> NaiveDateTime {
    let at = NaiveTime::from_hms_opt(REMINDER_HOUR, 0, 0).unwrap_or(NaiveTime::MIN);
    item.expiration_date.and_time(at)
}

/// Scheduling failure reported by a scheduler implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// Request was refused (e.g. queue full, permission denied).
    Rejected(String),
    /// Scheduler backend is not reachable.
    Unavailable(String),
}

impl Display for SchedulerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(reason) => write!(f, "reminder rejected: {reason}"),
            Self::Unavailable(reason) => write!(f, "reminder scheduler unavailable: {reason}"),
        }
    }
}

impl Error for SchedulerError {}

/// One-way reminder sink.
///
/// Implementations must return promptly; callers never wait for delivery.
pub trait ReminderScheduler {
    fn schedule(&self, request: &ReminderRequest) -> Result<(), SchedulerError>;
}

impl<T: ReminderScheduler + ?Sized> ReminderScheduler for &T {
    fn schedule(&self, request: &ReminderRequest) -> Result<(), SchedulerError> {
        (**self).schedule(request)
    }
}

#[cfg(test)]
mod tests {
    use super::{reminder_fire_at, ReminderRequest};
    use crate::model::food_item::FoodItem;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn fire_time_is_nine_am_on_expiration_date() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let item = FoodItem::new("Milk", date);

        let fire_at = reminder_fire_at(&item);
        assert_eq!(fire_at.date(), date);
        assert_eq!(fire_at.hour(), 9);
        assert_eq!(fire_at.minute(), 0);
        assert_eq!(fire_at.second(), 0);
    }

    #[test]
    fn request_uses_item_id_and_name() {
        let item = FoodItem::new("Yogurt", NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        let request = ReminderRequest::for_item(&item);

        assert_eq!(request.id, item.id);
        assert_eq!(request.title, "Food Expiration Reminder");
        assert_eq!(request.body, "Yogurt is expiring today!");
    }
}
