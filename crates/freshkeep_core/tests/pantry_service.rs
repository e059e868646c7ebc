use chrono::{NaiveDate, NaiveTime};
use freshkeep_core::db::{open_db, DbError};
use freshkeep_core::store::{FOOD_ITEMS_KEY, GROCERY_ITEMS_KEY};
use freshkeep_core::{
    Freshness, KeyValueStore, MemoryKeyValueStore, PantryError, PantryService, ReminderOutbox,
    ReminderRequest, ReminderScheduler, SchedulerError, SqliteKeyValueStore, StoreError,
    StoreResult,
};
use std::cell::Cell;

fn june(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
}

/// Memory store that counts writes.
#[derive(Default)]
struct CountingStore {
    inner: MemoryKeyValueStore,
    puts: Cell<usize>,
}

impl KeyValueStore for CountingStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.inner.get(key)
    }

    fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        self.puts.set(self.puts.get() + 1);
        self.inner.put(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.inner.remove(key)
    }
}

struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        Err(StoreError::Db(DbError::Sqlite(
            rusqlite::Error::InvalidQuery,
        )))
    }

    fn put(&self, _key: &str, _value: &str) -> StoreResult<()> {
        Err(StoreError::Db(DbError::Sqlite(
            rusqlite::Error::InvalidQuery,
        )))
    }

    fn remove(&self, _key: &str) -> StoreResult<()> {
        Ok(())
    }
}

struct DeniedScheduler;

impl ReminderScheduler for DeniedScheduler {
    fn schedule(&self, _request: &ReminderRequest) -> Result<(), SchedulerError> {
        Err(SchedulerError::Rejected("permission denied".to_string()))
    }
}

#[test]
fn load_from_empty_store_starts_empty() {
    let service = PantryService::load(MemoryKeyValueStore::new(), ReminderOutbox::new());

    assert!(service.food_items().is_empty());
    assert!(service.grocery_items().is_empty());
}

#[test]
fn load_from_unreadable_store_starts_empty() {
    let service = PantryService::load(BrokenStore, ReminderOutbox::new());
    assert!(service.state().food_items.is_empty());
}

#[test]
fn add_food_item_saves_and_requests_nine_am_reminder() {
    let store = CountingStore::default();
    let outbox = ReminderOutbox::new();
    let mut service = PantryService::load(&store, outbox.clone());

    let created = service.add_food_item(" Milk ", june(18)).unwrap();

    assert_eq!(service.food_items(), &[created.clone()]);
    assert_eq!(store.puts.get(), 1);
    assert!(store.inner.get(FOOD_ITEMS_KEY).unwrap().is_some());

    let reminders = outbox.drain();
    assert_eq!(reminders.len(), 1);
    assert_eq!(reminders[0].id, created.id);
    assert_eq!(
        reminders[0].fire_at,
        june(18).and_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap())
    );
}

#[test]
fn blank_name_has_no_side_effects() {
    let store = CountingStore::default();
    let outbox = ReminderOutbox::new();
    let mut service = PantryService::load(&store, outbox.clone());

    assert_eq!(
        service.add_food_item("  ", june(18)).unwrap_err(),
        PantryError::EmptyName
    );
    assert_eq!(
        service.add_grocery_item("").unwrap_err(),
        PantryError::EmptyName
    );

    assert!(service.food_items().is_empty());
    assert!(service.grocery_items().is_empty());
    assert_eq!(store.puts.get(), 0);
    assert_eq!(outbox.pending_len(), 0);
}

#[test]
fn denied_reminder_does_not_block_add() {
    let store = MemoryKeyValueStore::new();
    let mut service = PantryService::load(&store, DeniedScheduler);

    let created = service.add_food_item("Yogurt", june(16)).unwrap();

    assert_eq!(service.food_items().len(), 1);
    let reloaded = PantryService::load(&store, DeniedScheduler);
    assert_eq!(reloaded.food_items(), &[created]);
}

#[test]
fn failed_save_keeps_in_memory_state() {
    let mut service = PantryService::load(BrokenStore, ReminderOutbox::new());

    service.add_food_item("Cheese", june(30)).unwrap();
    service.add_grocery_item("Bread").unwrap();

    assert_eq!(service.food_items().len(), 1);
    assert_eq!(service.grocery_items(), &["Bread".to_string()]);
}

#[test]
fn reload_reproduces_state() {
    let store = MemoryKeyValueStore::new();
    let outbox = ReminderOutbox::new();
    let mut service = PantryService::load(&store, &outbox);
    service.add_food_item("Milk", june(18)).unwrap();
    service.add_food_item("Eggs", june(25)).unwrap();
    service.add_grocery_item("Bread").unwrap();
    service.add_grocery_item("Bread").unwrap();

    let reloaded = PantryService::load(&store, &outbox);

    assert_eq!(reloaded.state(), service.state());
}

#[test]
fn remove_food_item_persists_and_does_not_cancel_reminder() {
    let store = CountingStore::default();
    let outbox = ReminderOutbox::new();
    let mut service = PantryService::load(&store, &outbox);
    let created = service.add_food_item("Milk", june(18)).unwrap();

    assert!(service.remove_food_item(created.id));
    assert!(!service.remove_food_item(created.id));

    assert!(service.food_items().is_empty());
    assert_eq!(store.puts.get(), 2);
    assert_eq!(outbox.drain().len(), 1);
}

#[test]
fn grocery_bulk_removal_is_all_or_nothing() {
    let store = CountingStore::default();
    let mut service = PantryService::load(&store, ReminderOutbox::new());
    for name in ["A", "B", "C"] {
        service.add_grocery_item(name).unwrap();
    }
    let writes_before = store.puts.get();

    let err = service.remove_grocery_items_at(&[1, 7]).unwrap_err();
    assert_eq!(err, PantryError::OutOfRange { index: 7, len: 3 });
    assert_eq!(service.grocery_items().len(), 3);
    assert_eq!(store.puts.get(), writes_before);

    service.remove_grocery_items_at(&[0, 2]).unwrap();
    assert_eq!(service.grocery_items(), &["B".to_string()]);
    assert_eq!(store.puts.get(), writes_before + 1);
}

#[test]
fn remove_grocery_by_name_reports_whether_removed() {
    let mut service = PantryService::load(MemoryKeyValueStore::new(), ReminderOutbox::new());
    service.add_grocery_item("Milk").unwrap();

    assert!(!service.remove_grocery_item_named("Eggs"));
    assert!(service.remove_grocery_item_named("Milk"));
    assert!(service.grocery_items().is_empty());
}

#[test]
fn promote_duplicate_grocery_entry_once() {
    let store = MemoryKeyValueStore::new();
    let outbox = ReminderOutbox::new();
    let mut service = PantryService::load(&store, &outbox);
    service.add_grocery_item("Eggs").unwrap();
    service.add_grocery_item("Eggs").unwrap();

    let created = service.promote_grocery_item("Eggs", june(22)).unwrap();

    assert_eq!(service.grocery_items(), &["Eggs".to_string()]);
    assert_eq!(service.food_items(), &[created.clone()]);
    assert_eq!(outbox.drain()[0].id, created.id);

    let reloaded = PantryService::load(&store, &outbox);
    assert_eq!(reloaded.grocery_items(), &["Eggs".to_string()]);
    assert_eq!(reloaded.food_items().len(), 1);
}

#[test]
fn views_and_summary_follow_today() {
    let mut service = PantryService::load(MemoryKeyValueStore::new(), ReminderOutbox::new());
    service.add_food_item("Old", june(10)).unwrap();
    service.add_food_item("Soon", june(16)).unwrap();
    service.add_food_item("Later", june(30)).unwrap();

    let views = service.food_item_views(june(15));
    let states: Vec<_> = views.iter().map(|view| view.freshness).collect();
    assert_eq!(
        states,
        vec![Freshness::Expired, Freshness::ExpiringSoon, Freshness::Fresh]
    );

    let summary = service.freshness_summary(june(15));
    assert_eq!((summary.expired, summary.expiring_soon, summary.fresh), (1, 1, 1));
}

#[test]
fn corrupt_grocery_entry_does_not_drop_food_items() {
    let store = MemoryKeyValueStore::new();
    {
        let mut service = PantryService::load(&store, ReminderOutbox::new());
        service.add_food_item("Milk", june(18)).unwrap();
    }
    store.put(GROCERY_ITEMS_KEY, "not-a-list").unwrap();

    let service = PantryService::load(&store, ReminderOutbox::new());
    assert_eq!(service.food_items().len(), 1);
    assert!(service.grocery_items().is_empty());
}

#[test]
fn sqlite_backed_service_persists_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pantry.sqlite3");
    let outbox = ReminderOutbox::new();

    let created = {
        let conn = open_db(&path).unwrap();
        let store = SqliteKeyValueStore::try_new(&conn).unwrap();
        let mut service = PantryService::load(store, &outbox);
        service.add_grocery_item("Butter").unwrap();
        let created = service.add_food_item("Milk", june(18)).unwrap();
        created
    };

    let conn = open_db(&path).unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    let service = PantryService::load(store, &outbox);
    assert_eq!(service.food_items(), &[created]);
    assert_eq!(service.grocery_items(), &["Butter".to_string()]);
}
