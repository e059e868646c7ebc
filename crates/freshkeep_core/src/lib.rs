//! Core domain logic for FreshKeep.
//! This crate is the single source of truth for pantry invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod reminder;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::food_item::{
    classify, days_between, food_item_views, summarize, FoodItem, FoodItemId, FoodItemView,
    Freshness, FreshnessSummary,
};
pub use model::pantry::{
    add_food_item, add_grocery_item, promote_grocery_item, remove_food_item,
    remove_grocery_item_named, remove_grocery_items_at, PantryError, PantryState, Promotion,
};
pub use reminder::{ReminderOutbox, ReminderRequest, ReminderScheduler, SchedulerError};
pub use service::pantry_service::PantryService;
pub use store::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StoreError, StoreResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
