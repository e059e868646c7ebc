//! Pantry state container and pure collection operations.
//!
//! # Responsibility
//! - Hold the two in-memory collections (food items, grocery names).
//! - Provide side-effect free add/remove/promote operations over them.
//!
//! # Invariants
//! - Names are trimmed; blank names are rejected without any change.
//! - Food order is insertion order; removal keeps relative order.
//! - Bulk grocery removal is all-or-nothing on out-of-range positions.
//! - Promotion removes at most one grocery entry (the first exact match).

use crate::model::food_item::{FoodItem, FoodItemId};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Domain-level rejection for collection operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PantryError {
    /// Name is empty or whitespace-only.
    EmptyName,
    /// Removal position does not exist in the list.
    OutOfRange { index: usize, len: usize },
}

impl Display for PantryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be blank"),
            Self::OutOfRange { index, len } => {
                write!(f, "position {index} is out of range for list of length {len}")
            }
        }
    }
}

impl Error for PantryError {}

/// In-memory application state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PantryState {
    pub food_items: Vec<FoodItem>,
    pub grocery_items: Vec<String>,
}

impl PantryState {
    pub fn new(food_items: Vec<FoodItem>, grocery_items: Vec<String>) -> Self {
        Self {
            food_items,
            grocery_items,
        }
    }
}

/// Output of a grocery-to-food promotion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Promotion {
    pub food_items: Vec<FoodItem>,
    pub grocery_items: Vec<String>,
    pub created: FoodItem,
}

/// Returns the trimmed name, or `EmptyName` when nothing is left.
pub fn normalize_name(name: &str) -> Result<&str, PantryError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(PantryError::EmptyName);
    }
    Ok(trimmed)
}

/// Appends a new food item with a generated ID.
///
/// Returns the new collection together with the created item so callers can
/// request a reminder for it.
pub fn add_food_item(
    items: &[FoodItem],
    name: &str,
    expiration_date: NaiveDate,
) -> Result<(Vec<FoodItem>, FoodItem), PantryError> {
    let name = normalize_name(name)?;
    let created = FoodItem::new(name, expiration_date);
    let mut next = items.to_vec();
    next.push(created.clone());
    Ok((next, created))
}

/// Removes the first item with `id`. Missing IDs leave the list unchanged.
pub fn remove_food_item(items: &[FoodItem], id: FoodItemId) -> Vec<FoodItem> {
    let mut next = items.to_vec();
    if let Some(position) = next.iter().position(|item| item.id == id) {
        next.remove(position);
    }
    next
}

/// Appends a grocery name. Duplicates are kept.
pub fn add_grocery_item(items: &[String], name: &str) -> Result<Vec<String>, PantryError> {
    let name = normalize_name(name)?;
    let mut next = items.to_vec();
    next.push(name.to_string());
    Ok(next)
}

/// Removes grocery entries at the given positions.
///
/// Positions refer to the list before removal. Repeated positions count once.
/// Any position outside the list rejects the whole request.
pub fn remove_grocery_items_at(
    items: &[String],
    positions: &[usize],
) -> Result<Vec<String>, PantryError> {
    let len = items.len();
    if let Some(&index) = positions.iter().find(|&&index| index >= len) {
        return Err(PantryError::OutOfRange { index, len });
    }

    let doomed: BTreeSet<usize> = positions.iter().copied().collect();
    Ok(items
        .iter()
        .enumerate()
        .filter(|(index, _)| !doomed.contains(index))
        .map(|(_, name)| name.clone())
        .collect())
}

/// Removes the first entry equal to `name`. Missing names are a no-op.
pub fn remove_grocery_item_named(items: &[String], name: &str) -> Vec<String> {
    let mut next = items.to_vec();
    if let Some(position) = next.iter().position(|item| item == name) {
        next.remove(position);
    }
    next
}

/// Converts one grocery entry into a tracked food item.
///
/// Equivalent to `add_food_item` followed by `remove_grocery_item_named` for
/// the same (trimmed) name. Only the first matching grocery entry is removed.
pub fn promote_grocery_item(
    food_items: &[FoodItem],
    grocery_items: &[String],
    name: &str,
    expiration_date: NaiveDate,
) -> Result<Promotion, PantryError> {
    let (food_items, created) = add_food_item(food_items, name, expiration_date)?;
    let grocery_items = remove_grocery_item_named(grocery_items, created.name.as_str());
    Ok(Promotion {
        food_items,
        grocery_items,
        created,
    })
}
