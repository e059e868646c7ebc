//! Domain model for tracked food and the grocery list.
//!
//! # Responsibility
//! - Define the food record and its derived freshness state.
//! - Provide pure collection operations over explicit pantry state.
//!
//! # Invariants
//! - Every food item is identified by a stable `FoodItemId`.
//! - Grocery entries have no identity beyond their string value.

pub mod food_item;
pub mod pantry;
