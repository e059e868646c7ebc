//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose pantry use-cases to Dart via FRB as flat envelopes.
//! - Hand pending expiration reminders to the platform notification layer.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Load-mutate-save sequences are serialized by one process-wide lock.
//! - Dates cross the boundary as `YYYY-MM-DD` strings.

use chrono::{Local, NaiveDate};
use freshkeep_core::db::open_db;
use freshkeep_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    FoodItemView, PantryService, ReminderOutbox, ReminderRequest, SqliteKeyValueStore,
};
use log::warn;
use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock, PoisonError};
use uuid::Uuid;

const STORE_FILE_NAME: &str = "freshkeep.sqlite3";
const STORE_PATH_ENV: &str = "FRESHKEEP_DB_PATH";
const DATE_FORMAT: &str = "%Y-%m-%d";
const FIRE_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

static STORE_PATH: OnceLock<PathBuf> = OnceLock::new();
static PANTRY_LOCK: Mutex<()> = Mutex::new(());
static REMINDER_OUTBOX: Lazy<ReminderOutbox> = Lazy::new(ReminderOutbox::new);

type FfiPantryService<'conn> = PantryService<SqliteKeyValueStore<'conn>, &'static ReminderOutbox>;

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the store database file used by every pantry call.
///
/// Call once at startup with the app documents path, before any pantry call.
/// Without it, `FRESHKEEP_DB_PATH` or `<temp>/freshkeep.sqlite3` is used.
///
/// # FFI contract
/// - Returns empty string on success (including repeating the same path).
/// - Returns an error message for blank paths or when another path is active.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_store_path(path: String) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return "store path cannot be empty".to_string();
    }
    let requested = PathBuf::from(trimmed);
    let active = STORE_PATH.get_or_init(|| requested.clone());
    if *active == requested {
        String::new()
    } else {
        format!(
            "store path already set to `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        )
    }
}

/// One food row with derived freshness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodItemDto {
    /// Stable item ID in string form.
    pub id: String,
    pub name: String,
    /// `YYYY-MM-DD`.
    pub expiration_date: String,
    /// Signed whole days from today.
    pub days_until: i64,
    /// `expired|expiring_soon|fresh`.
    pub freshness: String,
}

/// Full pantry read model for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PantrySnapshot {
    pub ok: bool,
    /// Food rows in insertion order.
    pub food_items: Vec<FoodItemDto>,
    /// Grocery names in insertion order; duplicates kept.
    pub grocery_items: Vec<String>,
    pub expired_count: u32,
    pub expiring_soon_count: u32,
    pub fresh_count: u32,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

impl PantrySnapshot {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            food_items: Vec::new(),
            grocery_items: Vec::new(),
            expired_count: 0,
            expiring_soon_count: 0,
            fresh_count: 0,
            message: message.into(),
        }
    }
}

/// Generic action response envelope for pantry mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PantryActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Created food item ID (add/promote only).
    pub item_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl PantryActionResponse {
    fn success(message: impl Into<String>, item_id: Option<String>) -> Self {
        Self {
            ok: true,
            item_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            item_id: None,
            message: message.into(),
        }
    }
}

/// Reminder request for the platform notification layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderDto {
    /// Notification identifier; equals the food item ID.
    pub id: String,
    pub title: String,
    pub body: String,
    /// Local wall-clock time, `YYYY-MM-DDTHH:MM:SS`.
    pub fire_at: String,
}

/// Loads the pantry and classifies food rows against `today`.
///
/// `today` defaults to the device's local date when `None`.
///
/// # FFI contract
/// - Never panics.
/// - Absent or corrupt persisted data yields empty lists with `ok = true`.
#[flutter_rust_bridge::frb(sync)]
pub fn pantry_snapshot(today: Option<String>) -> PantrySnapshot {
    let today = match today {
        Some(value) => match parse_date(value.as_str()) {
            Ok(date) => date,
            Err(err) => return PantrySnapshot::failure(format!("pantry_snapshot failed: {err}")),
        },
        None => Local::now().date_naive(),
    };

    let result = with_pantry_service(|service| {
        let summary = service.freshness_summary(today);
        PantrySnapshot {
            ok: true,
            food_items: service
                .food_item_views(today)
                .into_iter()
                .map(to_food_item_dto)
                .collect(),
            grocery_items: service.grocery_items().to_vec(),
            expired_count: count_u32(summary.expired),
            expiring_soon_count: count_u32(summary.expiring_soon),
            fresh_count: count_u32(summary.fresh),
            message: format!("{} food item(s).", summary.total()),
        }
    });

    result.unwrap_or_else(|err| PantrySnapshot::failure(format!("pantry_snapshot failed: {err}")))
}

/// Tracks a new food item and queues its expiration reminder.
///
/// # FFI contract
/// - Blank names and malformed dates fail without any state change.
/// - Returns created item ID on success.
#[flutter_rust_bridge::frb(sync)]
pub fn food_add(name: String, expiration_date: String) -> PantryActionResponse {
    let date = match parse_date(expiration_date.as_str()) {
        Ok(date) => date,
        Err(err) => return PantryActionResponse::failure(format!("food_add failed: {err}")),
    };
    let result = with_pantry_service(|service| service.add_food_item(name.as_str(), date));
    match result {
        Ok(Ok(item)) => {
            PantryActionResponse::success("Food item added.", Some(item.id.to_string()))
        }
        Ok(Err(err)) => PantryActionResponse::failure(format!("food_add failed: {err}")),
        Err(err) => PantryActionResponse::failure(format!("food_add failed: {err}")),
    }
}

/// Removes a food item by ID. Unknown IDs succeed as a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn food_remove(id: String) -> PantryActionResponse {
    let item_id = match Uuid::parse_str(id.trim()) {
        Ok(item_id) => item_id,
        Err(_) => {
            return PantryActionResponse::failure(format!(
                "food_remove failed: invalid item id `{id}`"
            ))
        }
    };
    match with_pantry_service(|service| service.remove_food_item(item_id)) {
        Ok(true) => PantryActionResponse::success("Food item removed.", None),
        Ok(false) => PantryActionResponse::success("Food item not found.", None),
        Err(err) => PantryActionResponse::failure(format!("food_remove failed: {err}")),
    }
}

/// Appends a grocery entry. Duplicates are allowed.
#[flutter_rust_bridge::frb(sync)]
pub fn grocery_add(name: String) -> PantryActionResponse {
    match with_pantry_service(|service| service.add_grocery_item(name.as_str())) {
        Ok(Ok(())) => PantryActionResponse::success("Grocery item added.", None),
        Ok(Err(err)) => PantryActionResponse::failure(format!("grocery_add failed: {err}")),
        Err(err) => PantryActionResponse::failure(format!("grocery_add failed: {err}")),
    }
}

/// Removes grocery entries at the given positions, all or nothing.
#[flutter_rust_bridge::frb(sync)]
pub fn grocery_remove_at(positions: Vec<u32>) -> PantryActionResponse {
    let positions: Vec<usize> = positions.into_iter().map(|p| p as usize).collect();
    match with_pantry_service(|service| service.remove_grocery_items_at(&positions)) {
        Ok(Ok(())) => PantryActionResponse::success("Grocery items removed.", None),
        Ok(Err(err)) => PantryActionResponse::failure(format!("grocery_remove_at failed: {err}")),
        Err(err) => PantryActionResponse::failure(format!("grocery_remove_at failed: {err}")),
    }
}

/// Removes the first grocery entry equal to `name`. Missing names succeed.
#[flutter_rust_bridge::frb(sync)]
pub fn grocery_remove_named(name: String) -> PantryActionResponse {
    match with_pantry_service(|service| service.remove_grocery_item_named(name.as_str())) {
        Ok(true) => PantryActionResponse::success("Grocery item removed.", None),
        Ok(false) => PantryActionResponse::success("Grocery item not found.", None),
        Err(err) => PantryActionResponse::failure(format!("grocery_remove_named failed: {err}")),
    }
}

/// Moves one grocery entry into tracked food and queues its reminder.
#[flutter_rust_bridge::frb(sync)]
pub fn grocery_promote(name: String, expiration_date: String) -> PantryActionResponse {
    let date = match parse_date(expiration_date.as_str()) {
        Ok(date) => date,
        Err(err) => return PantryActionResponse::failure(format!("grocery_promote failed: {err}")),
    };
    match with_pantry_service(|service| service.promote_grocery_item(name.as_str(), date)) {
        Ok(Ok(item)) => {
            PantryActionResponse::success("Grocery item promoted.", Some(item.id.to_string()))
        }
        Ok(Err(err)) => PantryActionResponse::failure(format!("grocery_promote failed: {err}")),
        Err(err) => PantryActionResponse::failure(format!("grocery_promote failed: {err}")),
    }
}

/// Drains reminders queued since the last call.
///
/// The Dart side schedules each one with the platform; failures there are
/// its own concern and never flow back into pantry state.
#[flutter_rust_bridge::frb(sync)]
pub fn reminders_take_pending() -> Vec<ReminderDto> {
    REMINDER_OUTBOX
        .drain()
        .into_iter()
        .map(to_reminder_dto)
        .collect()
}

fn resolve_store_path() -> PathBuf {
    STORE_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(STORE_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(STORE_FILE_NAME)
        })
        .clone()
}

fn with_pantry_service<T>(f: impl FnOnce(&mut FfiPantryService<'_>) -> T) -> Result<T, String> {
    with_pantry_service_at(resolve_store_path().as_path(), f)
}

fn with_pantry_service_at<T>(
    path: &Path,
    f: impl FnOnce(&mut FfiPantryService<'_>) -> T,
) -> Result<T, String> {
    let _guard = PANTRY_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    let conn = open_db(path).map_err(|err| {
        warn!("event=ffi_store_init module=ffi status=error stage=open error={err}");
        format!("store open failed: {err}")
    })?;
    let store = SqliteKeyValueStore::try_new(&conn).map_err(|err| {
        warn!("event=ffi_store_init module=ffi status=error stage=schema error={err}");
        format!("store init failed: {err}")
    })?;
    let mut service = PantryService::load(store, &*REMINDER_OUTBOX);
    let output = f(&mut service);
    Ok(output)
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|err| format!("invalid date `{value}` (expected YYYY-MM-DD): {err}"))
}

fn count_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

fn to_food_item_dto(view: FoodItemView) -> FoodItemDto {
    FoodItemDto {
        id: view.item.id.to_string(),
        name: view.item.name,
        expiration_date: view.item.expiration_date.format(DATE_FORMAT).to_string(),
        days_until: view.days_until,
        freshness: view.freshness.label().to_string(),
    }
}

fn to_reminder_dto(request: ReminderRequest) -> ReminderDto {
    ReminderDto {
        id: request.id.to_string(),
        title: request.title,
        body: request.body,
        fire_at: request.fire_at.format(FIRE_AT_FORMAT).to_string(),
    }
}
