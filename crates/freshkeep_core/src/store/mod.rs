//! Durable key-value persistence for pantry collections.
//!
//! # Responsibility
//! - Define the key-value contract consumed by the pantry service.
//! - Serialize the two collections under fixed keys.
//!
//! # Invariants
//! - Saves always write the full collection; there is no incremental diff.
//! - Loads never surface errors: absent or corrupt data yields an empty list.
//! - Log lines carry keys and counts only, never item names.

use crate::db::DbError;
use crate::model::food_item::FoodItem;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory_store;
mod sqlite_store;

pub use memory_store::MemoryKeyValueStore;
pub use sqlite_store::SqliteKeyValueStore;

/// Storage key for the serialized food item list.
pub const FOOD_ITEMS_KEY: &str = "FoodItems";
/// Storage key for the serialized grocery name list.
pub const GROCERY_ITEMS_KEY: &str = "GroceryItems";

pub type StoreResult<T> = Result<T, StoreError>;

/// Key-value transport or encoding failure.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Serialize(serde_json::Error),
    /// Connection was not migrated for key-value access.
    MissingRequiredTable(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to encode store value: {err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "store is missing required table `{table}`")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Restart-surviving string store keyed by name.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn put(&self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&self, key: &str) -> StoreResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).put(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

/// Saves the full food item list under [`FOOD_ITEMS_KEY`].
pub fn save_food_items(store: &impl KeyValueStore, items: &[FoodItem]) -> StoreResult<()> {
    save_json(store, FOOD_ITEMS_KEY, items)
}

/// Loads the food item list, or an empty list when absent/unreadable.
pub fn load_food_items(store: &impl KeyValueStore) -> Vec<FoodItem> {
    load_json(store, FOOD_ITEMS_KEY)
}

/// Saves the full grocery list under [`GROCERY_ITEMS_KEY`].
pub fn save_grocery_items(store: &impl KeyValueStore, items: &[String]) -> StoreResult<()> {
    save_json(store, GROCERY_ITEMS_KEY, items)
}

/// Loads the grocery list, or an empty list when absent/unreadable.
pub fn load_grocery_items(store: &impl KeyValueStore) -> Vec<String> {
    load_json(store, GROCERY_ITEMS_KEY)
}

fn save_json<T: Serialize + ?Sized>(
    store: &impl KeyValueStore,
    key: &str,
    value: &T,
) -> StoreResult<()> {
    let encoded = serde_json::to_string(value)?;
    store.put(key, encoded.as_str())
}

fn load_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Vec<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!("event=store_load module=store status=error key={key} error={err}");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<T>>(raw.as_str()) {
        Ok(items) => items,
        Err(err) => {
            // Why: serde messages can echo payload fragments; log position only.
            warn!(
                "event=store_load module=store status=corrupt key={key} line={} column={}",
                err.line(),
                err.column()
            );
            Vec::new()
        }
    }
}
