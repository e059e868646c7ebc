//! Pantry use-case service.
//!
//! # Responsibility
//! - Own the only mutable `PantryState` for one session.
//! - Order every use-case as: mutate in memory, save, then request reminder.
//!
//! # Invariants
//! - Rejected operations (blank name, out-of-range position) never touch the
//!   store or the scheduler.
//! - Store write and scheduler failures are logged and never roll back
//!   in-memory state.
//! - Deleting a food item does not cancel its reminder.

use crate::model::food_item::{
    food_item_views, summarize, FoodItem, FoodItemId, FoodItemView, FreshnessSummary,
};
use crate::model::pantry::{self, PantryError, PantryState};
use crate::reminder::{ReminderRequest, ReminderScheduler};
use crate::store::{
    load_food_items, load_grocery_items, save_food_items, save_grocery_items, KeyValueStore,
};
use chrono::NaiveDate;
use log::{error, info, warn};

/// Use-case facade over a key-value store and reminder scheduler.
pub struct PantryService<S: KeyValueStore, N: ReminderScheduler> {
    store: S,
    scheduler: N,
    state: PantryState,
}

impl<S: KeyValueStore, N: ReminderScheduler> PantryService<S, N> {
    /// Creates a service and hydrates state from `store`.
    ///
    /// Absent or corrupt persisted data starts the matching collection empty.
    pub fn load(store: S, scheduler: N) -> Self {
        let state = PantryState::new(load_food_items(&store), load_grocery_items(&store));
        info!(
            "event=pantry_load module=service status=ok food_count={} grocery_count={}",
            state.food_items.len(),
            state.grocery_items.len()
        );
        Self {
            store,
            scheduler,
            state,
        }
    }

    pub fn state(&self) -> &PantryState {
        &self.state
    }

    pub fn food_items(&self) -> &[FoodItem] {
        &self.state.food_items
    }

    pub fn grocery_items(&self) -> &[String] {
        &self.state.grocery_items
    }

    /// Food rows with derived freshness, in display order.
    pub fn food_item_views(&self, today: NaiveDate) -> Vec<FoodItemView> {
        food_item_views(&self.state.food_items, today)
    }

    pub fn freshness_summary(&self, today: NaiveDate) -> FreshnessSummary {
        summarize(&self.state.food_items, today)
    }

    /// Tracks a new food item and requests its expiration reminder.
    pub fn add_food_item(
        &mut self,
        name: &str,
        expiration_date: NaiveDate,
    ) -> Result<FoodItem, PantryError> {
        let (food_items, created) =
            pantry::add_food_item(&self.state.food_items, name, expiration_date)?;
        self.state.food_items = food_items;
        self.persist_food_items();
        self.request_reminder(&created);
        Ok(created)
    }

    /// Removes a food item by ID. Returns whether anything was removed.
    pub fn remove_food_item(&mut self, id: FoodItemId) -> bool {
        let food_items = pantry::remove_food_item(&self.state.food_items, id);
        if food_items.len() == self.state.food_items.len() {
            return false;
        }
        self.state.food_items = food_items;
        self.persist_food_items();
        true
    }

    pub fn add_grocery_item(&mut self, name: &str) -> Result<(), PantryError> {
        self.state.grocery_items = pantry::add_grocery_item(&self.state.grocery_items, name)?;
        self.persist_grocery_items();
        Ok(())
    }

    /// Removes grocery entries at `positions` as one all-or-nothing request.
    pub fn remove_grocery_items_at(&mut self, positions: &[usize]) -> Result<(), PantryError> {
        if positions.is_empty() {
            return Ok(());
        }
        self.state.grocery_items =
            pantry::remove_grocery_items_at(&self.state.grocery_items, positions)?;
        self.persist_grocery_items();
        Ok(())
    }

    /// Removes the first grocery entry equal to `name`.
    pub fn remove_grocery_item_named(&mut self, name: &str) -> bool {
        let grocery_items = pantry::remove_grocery_item_named(&self.state.grocery_items, name);
        if grocery_items.len() == self.state.grocery_items.len() {
            return false;
        }
        self.state.grocery_items = grocery_items;
        self.persist_grocery_items();
        true
    }

    /// Moves one grocery entry into tracked food with an expiration date.
    pub fn promote_grocery_item(
        &mut self,
        name: &str,
        expiration_date: NaiveDate,
    ) -> Result<FoodItem, PantryError> {
        let promotion = pantry::promote_grocery_item(
            &self.state.food_items,
            &self.state.grocery_items,
            name,
            expiration_date,
        )?;
        let grocery_changed = promotion.grocery_items.len() != self.state.grocery_items.len();
        self.state.food_items = promotion.food_items;
        self.state.grocery_items = promotion.grocery_items;

        self.persist_food_items();
        if grocery_changed {
            self.persist_grocery_items();
        }
        self.request_reminder(&promotion.created);
        Ok(promotion.created)
    }

    fn persist_food_items(&self) {
        match save_food_items(&self.store, &self.state.food_items) {
            Ok(()) => info!(
                "event=pantry_save module=service status=ok collection=food count={}",
                self.state.food_items.len()
            ),
            Err(err) => error!(
                "event=pantry_save module=service status=error collection=food error={err}"
            ),
        }
    }

    fn persist_grocery_items(&self) {
        match save_grocery_items(&self.store, &self.state.grocery_items) {
            Ok(()) => info!(
                "event=pantry_save module=service status=ok collection=grocery count={}",
                self.state.grocery_items.len()
            ),
            Err(err) => error!(
                "event=pantry_save module=service status=error collection=grocery error={err}"
            ),
        }
    }

    fn request_reminder(&self, item: &FoodItem) {
        let request = ReminderRequest::for_item(item);
        if let Err(err) = self.scheduler.schedule(&request) {
            warn!(
                "event=reminder_schedule module=service status=error reminder_id={} error={err}",
                request.id
            );
        }
    }
}
