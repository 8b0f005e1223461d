// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pocketbook::models::{Theme, Transaction, TransactionType};
use pocketbook::{cli, commands::importer, db};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::io::Write;
use tempfile::NamedTempFile;

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    let mut state = db::load_state(&conn).unwrap();
    let date = NaiveDate::from_ymd_opt(2025, 2, 3).unwrap();
    state
        .add_transaction(Transaction::new(TransactionType::Income, Decimal::from(80), "Salary", date))
        .unwrap();
    db::save_state(&conn, &state).unwrap();
    conn
}

fn import(conn: &Connection, contents: &str, padded: bool) -> anyhow::Result<()> {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file.flush().unwrap();

    let path = file.path().to_str().unwrap().to_string();
    let arg = if padded { format!("  {}  ", path) } else { path };
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["pocketbook", "import", "backup", "--path", &arg]);
    if let Some(("import", import_m)) = matches.subcommand() {
        importer::handle(conn, import_m)
    } else {
        panic!("no import subcommand");
    }
}

#[test]
fn importer_trims_cli_path_argument() {
    let conn = base_conn();
    import(&conn, r#"{"theme": "dark"}"#, true).unwrap();
    assert_eq!(db::load_state(&conn).unwrap().theme, Theme::Dark);
}

#[test]
fn wallets_only_backup_keeps_transactions() {
    let conn = base_conn();
    let before = db::load_state(&conn).unwrap().transactions;

    import(
        &conn,
        r#"{"wallets": [
            {"id": "main", "name": "Cash", "type": "CASH", "balance": 123, "currency": "YER"},
            {"id": "w2", "name": "Card", "type": "DIGITAL", "currency": "USD"}
        ]}"#,
        false,
    )
    .unwrap();

    let state = db::load_state(&conn).unwrap();
    assert_eq!(state.transactions, before);
    assert_eq!(state.wallets.len(), 3);
    assert_eq!(state.wallet("w2").unwrap().currency, "USD");
    // the stored balance is recomputed, not trusted
    assert_eq!(state.wallet("main").unwrap().balance, Decimal::from(80));
}

#[test]
fn malformed_backup_changes_nothing() {
    let conn = base_conn();
    let before = db::load_state(&conn).unwrap();

    let err = import(&conn, r#"{"wallets": "not a list"}"#, false).unwrap_err();
    assert!(format!("{:#}", err).contains("Import failed"));
    assert_eq!(db::load_state(&conn).unwrap(), before);
}

#[test]
fn importer_reports_missing_file() {
    let conn = base_conn();
    let cli = cli::build_cli();
    let matches =
        cli.get_matches_from(["pocketbook", "import", "backup", "--path", "/nonexistent/backup.json"]);
    if let Some(("import", import_m)) = matches.subcommand() {
        let err = importer::handle(&conn, import_m).unwrap_err();
        assert!(err.to_string().contains("Open backup /nonexistent/backup.json"));
    } else {
        panic!("no import subcommand");
    }
}
