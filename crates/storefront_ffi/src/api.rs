//! FFI use-case API for the storefront category menu.
//!
//! # Responsibility
//! - Expose menu lifecycle calls (configure, open, click, close) to a UI host
//!   via FRB.
//! - Hold the single process-wide menu session.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - The session lock is never held while a fetch is in flight, so
//!   `menu_snapshot` reports the loading state during a fetch.
//! - Bearer tokens are kept in the session only, never logged or returned.

use log::info;
use once_cell::sync::Lazy;
use std::sync::{Mutex, MutexGuard, PoisonError};
use storefront_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ApiClient,
    CategoryMenu, CategoryService, Credential, HttpCategoryRepository, MenuAction, MenuBody,
    MenuOptions, MenuRow,
};

static MENU_SESSION: Lazy<Mutex<MenuSession>> = Lazy::new(|| Mutex::new(MenuSession::default()));

#[derive(Default)]
struct MenuSession {
    endpoint: Option<Endpoint>,
    menu: CategoryMenu,
}

#[derive(Clone)]
struct Endpoint {
    client: ApiClient,
    credential: Option<Credential>,
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
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
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One visible menu line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuRowItem {
    pub id: i64,
    pub name: String,
    pub depth: u32,
    pub indent: u32,
    pub expandable: bool,
    pub expanded: bool,
    /// Rendered with the "too deep" treatment and not expandable.
    pub inert: bool,
    pub route: String,
}

/// Full menu state for one repaint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSnapshot {
    /// `not_loaded|loading|error|empty|rows`.
    pub state: String,
    /// Error text for `error`; empty otherwise.
    pub message: String,
    pub rows: Vec<MenuRowItem>,
    /// `false` while a fetch is in flight.
    pub control_enabled: bool,
    pub open: bool,
}

/// Result of clicking one menu node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuClickResponse {
    /// `toggled|navigate|ignored`.
    pub action: String,
    /// Navigation target when `action == "navigate"`.
    pub route: Option<String>,
    pub snapshot: MenuSnapshot,
}

/// Points the menu session at a backend and resets its state.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - `token` is forwarded as a bearer credential when non-blank.
/// - `max_depth = 0` keeps the default depth cap.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn menu_configure(base_url: String, token: Option<String>, max_depth: u32) -> String {
    let client = match ApiClient::new(base_url.as_str()) {
        Ok(client) => client,
        Err(err) => return format!("menu_configure failed: {err}"),
    };
    let mut options = MenuOptions::default();
    if max_depth > 0 {
        options.max_depth = max_depth as usize;
    }

    let mut session = lock_session();
    session.endpoint = Some(Endpoint {
        client,
        credential: token.and_then(Credential::bearer),
    });
    session.menu = CategoryMenu::new(options);
    info!(
        "event=menu_configure module=ffi status=ok max_depth={}",
        options.max_depth
    );
    String::new()
}

/// Fetches categories and opens the menu with every node collapsed.
///
/// # FFI contract
/// - Blocking network call; run off the UI thread.
/// - Never panics; fetch failures show up as `state == "error"`.
pub fn menu_open() -> MenuSnapshot {
    let endpoint = {
        let mut session = lock_session();
        let Some(endpoint) = session.endpoint.clone() else {
            return snapshot_with_message("error", "menu_open failed: menu is not configured");
        };
        session.menu.begin_loading();
        endpoint
    };

    let repo = HttpCategoryRepository::new(&endpoint.client, endpoint.credential.clone());
    let outcome = CategoryService::new(repo)
        .load_forest()
        .map_err(|err| err.user_message().to_string());

    let mut session = lock_session();
    session.menu.finish_loading(outcome);
    session.menu.open();
    to_snapshot(&session.menu)
}

/// Applies one click on node `id`.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never panics; unknown ids yield `action == "ignored"`.
#[flutter_rust_bridge::frb(sync)]
pub fn menu_click(id: i64) -> MenuClickResponse {
    let mut session = lock_session();
    let (action, route) = match session.menu.select(id) {
        MenuAction::Toggled { .. } => ("toggled", None),
        MenuAction::Navigate { route, .. } => ("navigate", Some(route)),
        MenuAction::Ignored => ("ignored", None),
    };
    MenuClickResponse {
        action: action.to_string(),
        route,
        snapshot: to_snapshot(&session.menu),
    }
}

/// Closes the menu without discarding the loaded forest.
#[flutter_rust_bridge::frb(sync)]
pub fn menu_close() -> MenuSnapshot {
    let mut session = lock_session();
    session.menu.close();
    to_snapshot(&session.menu)
}

/// Returns the current menu state.
#[flutter_rust_bridge::frb(sync)]
pub fn menu_snapshot() -> MenuSnapshot {
    to_snapshot(&lock_session().menu)
}

fn lock_session() -> MutexGuard<'static, MenuSession> {
    // Never panic across the boundary on a poisoned lock.
    MENU_SESSION.lock().unwrap_or_else(PoisonError::into_inner)
}

fn to_snapshot(menu: &CategoryMenu) -> MenuSnapshot {
    let (state, message, rows) = match menu.body() {
        MenuBody::NotLoaded => ("not_loaded", String::new(), Vec::new()),
        MenuBody::Loading => ("loading", String::new(), Vec::new()),
        MenuBody::Error(message) => ("error", message, Vec::new()),
        MenuBody::Empty => ("empty", String::new(), Vec::new()),
        MenuBody::Rows(rows) => (
            "rows",
            String::new(),
            rows.into_iter().map(to_row_item).collect(),
        ),
    };
    MenuSnapshot {
        state: state.to_string(),
        message,
        rows,
        control_enabled: menu.is_control_enabled(),
        open: menu.is_open(),
    }
}

fn snapshot_with_message(state: &str, message: &str) -> MenuSnapshot {
    MenuSnapshot {
        state: state.to_string(),
        message: message.to_string(),
        rows: Vec::new(),
        control_enabled: true,
        open: false,
    }
}

fn to_row_item(row: MenuRow) -> MenuRowItem {
    MenuRowItem {
        id: row.id,
        name: row.name,
        depth: saturating_u32(row.depth),
        indent: saturating_u32(row.indent),
        expandable: row.expandable,
        expanded: row.expanded,
        inert: row.inert,
        route: row.route,
    }
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
