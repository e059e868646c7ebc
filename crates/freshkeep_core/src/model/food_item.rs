//! Food item domain model and freshness classification.
//!
//! # Responsibility
//! - Define the canonical tracked food record shared by storage and FFI.
//! - Classify items by whole calendar days until expiration.
//!
//! # Invariants
//! - `id` is generated once and never reused for another item.
//! - Freshness is derived from dates only; it is never stored.
//! - Day distance is computed on calendar dates, never on elapsed seconds.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Last day offset (inclusive) still reported as expiring soon.
pub const EXPIRING_SOON_MAX_DAYS: i64 = 2;

/// Stable identifier for a tracked food item.
///
/// Also used as the reminder identifier for that item.
pub type FoodItemId = Uuid;

/// Tracked perishable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    /// Stable ID used for removal and reminder keys.
    pub id: FoodItemId,
    /// Display name, trimmed and non-empty when created through collection ops.
    pub name: String,
    /// Calendar date the item expires on. Serialized as `YYYY-MM-DD`.
    pub expiration_date: NaiveDate,
}

impl FoodItem {
    /// Creates a new item with a generated stable ID.
    pub fn new(name: impl Into<String>, expiration_date: NaiveDate) -> Self {
        Self::with_id(Uuid::new_v4(), name, expiration_date)
    }

    /// Creates an item with a caller-provided ID.
    ///
    /// Used by restore paths where identity already exists in storage.
    pub fn with_id(id: FoodItemId, name: impl Into<String>, expiration_date: NaiveDate) -> Self {
        Self {
            id,
            name: name.into(),
            expiration_date,
        }
    }

    /// Signed whole days from `today` until this item's expiration date.
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        days_between(today, self.expiration_date)
    }

    /// Freshness state of this item relative to `today`.
    pub fn freshness(&self, today: NaiveDate) -> Freshness {
        classify(self, today)
    }
}

/// Derived freshness bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Freshness {
    /// Expiration date is in the past.
    Expired,
    /// Expires today or within the next two days.
    ExpiringSoon,
    /// More than two days left.
    Fresh,
}

impl Freshness {
    /// Maps a signed day distance onto the three freshness buckets.
    ///
    /// - `days_until < 0` -> `Expired`
    /// - `0 <= days_until <= 2` -> `ExpiringSoon`
    /// - `days_until > 2` -> `Fresh`
    pub fn from_days_until(days_until: i64) -> Self {
        if days_until < 0 {
            Self::Expired
        } else if days_until <= EXPIRING_SOON_MAX_DAYS {
            Self::ExpiringSoon
        } else {
            Self::Fresh
        }
    }

    /// Stable wire label used by FFI and CLI output.
    pub fn label(self) -> &'static str {
        match self {
            Self::Expired => "expired",
            Self::ExpiringSoon => "expiring_soon",
            Self::Fresh => "fresh",
        }
    }
}

/// Classifies one item against the current calendar date.
pub fn classify(item: &FoodItem, today: NaiveDate) -> Freshness {
    Freshness::from_days_until(item.days_until(today))
}

/// Signed number of calendar days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Read model pairing an item with its derived freshness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodItemView {
    pub item: FoodItem,
    pub days_until: i64,
    pub freshness: Freshness,
}

/// Builds display rows for `items`, preserving insertion order.
pub fn food_item_views(items: &[FoodItem], today: NaiveDate) -> Vec<FoodItemView> {
    items
        .iter()
        .map(|item| {
            let days_until = item.days_until(today);
            FoodItemView {
                item: item.clone(),
                days_until,
                freshness: Freshness::from_days_until(days_until),
            }
        })
        .collect()
}

/// Per-bucket item counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FreshnessSummary {
    pub expired: usize,
    pub expiring_soon: usize,
    pub fresh: usize,
}

impl FreshnessSummary {
    pub fn total(&self) -> usize {
        self.expired + self.expiring_soon + self.fresh
    }
}

/// Counts items per freshness bucket.
pub fn summarize(items: &[FoodItem], today: NaiveDate) -> FreshnessSummary {
    items
        .iter()
        .fold(FreshnessSummary::default(), |mut summary, item| {
            match classify(item, today) {
                Freshness::Expired => summary.expired += 1,
                Freshness::ExpiringSoon => summary.expiring_soon += 1,
                Freshness::Fresh => summary.fresh += 1,
            }
            summary
        })
}
