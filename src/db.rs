// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::state::{AppState, initial_categories};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Pocketbook", "pocketbook"));

/// Overrides the store location.
pub const DB_ENV: &str = "POCKETBOOK_DB";

pub mod keys {
    pub const TRANSACTIONS: &str = "transactions";
    pub const DEBTS: &str = "debts";
    pub const INVESTMENTS: &str = "investments";
    pub const WALLETS: &str = "wallets";
    pub const CATEGORIES: &str = "categories";
    pub const CONTACTS: &str = "contacts";
    pub const CUSTOM_PACKAGES: &str = "customPackages";
    pub const GOALS: &str = "goals";
    pub const ZAKAT_SETTINGS: &str = "zakatSettings";
    pub const THEME: &str = "theme";
    pub const CURRENCY: &str = "currency";
    pub const DEFAULT_TRANSACTION_TYPE: &str = "defaultTransactionType";
}

pub fn db_path() -> Result<PathBuf> {
    if let Some(p) = env::var_os(DB_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("pocketbook.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS kv(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT
    );
    "#,
    )?;
    Ok(())
}

fn read_key<T: DeserializeOwned>(conn: &Connection, key: &str) -> Result<Option<T>> {
    let raw: Option<String> = conn
        .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| r.get(0))
        .optional()
        .with_context(|| format!("Read key '{}'", key))?;
    log::debug!("read key {} ({})", key, if raw.is_some() { "present" } else { "absent" });
    match raw {
        Some(s) => {
            let v = serde_json::from_str(&s)
                .with_context(|| format!("Stored value for key '{}' is malformed", key))?;
            Ok(Some(v))
        }
        None => Ok(None),
    }
}

fn write_key<T: Serialize>(conn: &Connection, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    conn.execute(
        "INSERT INTO kv(key, value, updated_at) VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=excluded.updated_at",
        params![key, json],
    )
    .with_context(|| format!("Write key '{}'", key))?;
    Ok(())
}

/// Loads every key, defaulting absent ones. Balances are recomputed, never
/// read back.
pub fn load_state(conn: &Connection) -> Result<AppState> {
    init_schema(conn)?;
    let mut state = AppState {
        transactions: read_key(conn, keys::TRANSACTIONS)?.unwrap_or_default(),
        debts: read_key(conn, keys::DEBTS)?.unwrap_or_default(),
        investments: read_key(conn, keys::INVESTMENTS)?.unwrap_or_default(),
        wallets: read_key(conn, keys::WALLETS)?.unwrap_or_default(),
        categories: read_key(conn, keys::CATEGORIES)?.unwrap_or_else(initial_categories),
        contacts: read_key(conn, keys::CONTACTS)?.unwrap_or_default(),
        custom_packages: read_key(conn, keys::CUSTOM_PACKAGES)?.unwrap_or_default(),
        goals: read_key(conn, keys::GOALS)?.unwrap_or_default(),
        zakat_settings: read_key(conn, keys::ZAKAT_SETTINGS)?.unwrap_or_default(),
        theme: read_key(conn, keys::THEME)?.unwrap_or_default(),
        currency: read_key(conn, keys::CURRENCY)?.unwrap_or_default(),
        default_transaction_type: read_key(conn, keys::DEFAULT_TRANSACTION_TYPE)?
            .unwrap_or_default(),
    };
    state.ensure_default_wallets();
    state.reconcile();
    Ok(state)
}

/// Writes every key in one SQLite transaction.
pub fn save_state(conn: &Connection, state: &AppState) -> Result<()> {
    init_schema(conn)?;
    let tx = conn.unchecked_transaction()?;
    write_key(&tx, keys::TRANSACTIONS, &state.transactions)?;
    write_key(&tx, keys::DEBTS, &state.debts)?;
    write_key(&tx, keys::INVESTMENTS, &state.investments)?;
    write_key(&tx, keys::WALLETS, &state.wallets)?;
    write_key(&tx, keys::CATEGORIES, &state.categories)?;
    write_key(&tx, keys::CONTACTS, &state.contacts)?;
    write_key(&tx, keys::CUSTOM_PACKAGES, &state.custom_packages)?;
    write_key(&tx, keys::GOALS, &state.goals)?;
    write_key(&tx, keys::ZAKAT_SETTINGS, &state.zakat_settings)?;
    write_key(&tx, keys::THEME, &state.theme)?;
    write_key(&tx, keys::CURRENCY, &state.currency)?;
    write_key(&tx, keys::DEFAULT_TRANSACTION_TYPE, &state.default_transaction_type)?;
    tx.commit().context("Commit state")?;
    log::debug!("saved state ({} transactions)", state.transactions.len());
    Ok(())
}
