// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pocketbook::commands::{transactions, wallets};
use pocketbook::state::MAIN_WALLET_ID;
use pocketbook::{cli, db};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn tx(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["pocketbook", "tx"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("tx", tx_m)) => transactions::handle(conn, tx_m),
        _ => panic!("no tx subcommand"),
    }
}

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    for (day, amount) in [("01", "10"), ("02", "20"), ("03", "30")] {
        tx(
            &conn,
            &[
                "add", "--type", "expense", "--amount", amount, "--category", "Food", "--date",
                &format!("2025-01-{}", day),
            ],
        )
        .unwrap();
    }
    conn
}

#[test]
fn list_limit_respected() {
    let conn = setup();
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["pocketbook", "tx", "list", "--limit", "2"]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            let rows = transactions::query_rows(&conn, list_m).unwrap();
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0].date, "2025-01-03");
            assert_eq!(rows[0].category, "Food & drink");
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn wallet_balance_follows_its_transactions() {
    let conn = Connection::open_in_memory().unwrap();
    let matches =
        cli::build_cli().get_matches_from(["pocketbook", "wallet", "add", "--name", "Bank", "--type", "bank"]);
    if let Some(("wallet", m)) = matches.subcommand() {
        wallets::handle(&conn, m).unwrap();
    }
    let bank = db::load_state(&conn)
        .unwrap()
        .wallets
        .iter()
        .find(|w| w.name == "Bank")
        .unwrap()
        .id
        .clone();

    tx(&conn, &["add", "--type", "income", "--amount", "1000", "--category", "Salary", "--wallet", &bank]).unwrap();
    tx(&conn, &["add", "--type", "expense", "--amount", "300", "--category", "Bills", "--wallet", &bank]).unwrap();
    tx(&conn, &["add", "--type", "expense", "--amount", "50", "--category", "Food", "--exclude"]).unwrap();

    let state = db::load_state(&conn).unwrap();
    assert_eq!(state.wallet(&bank).unwrap().balance, Decimal::from(700));
    assert_eq!(state.wallet(MAIN_WALLET_ID).unwrap().balance, Decimal::ZERO);
}

#[test]
fn edit_and_remove_rebalance_the_wallet() {
    let conn = setup();
    let id = db::load_state(&conn).unwrap().transactions[0].id.clone();
    tx(&conn, &["edit", "--id", &id, "--amount", "5", "--type", "income", "--category", "Other_Inc"]).unwrap();
    let state = db::load_state(&conn).unwrap();
    // -10 -20 +5
    assert_eq!(state.wallet(MAIN_WALLET_ID).unwrap().balance, Decimal::from(-25));

    tx(&conn, &["rm", "--id", &id]).unwrap();
    let state = db::load_state(&conn).unwrap();
    assert_eq!(state.transactions.len(), 2);
    assert_eq!(state.wallet(MAIN_WALLET_ID).unwrap().balance, Decimal::from(-30));
}

#[test]
fn unknown_wallet_is_rejected_and_nothing_saved() {
    let conn = setup();
    let err = tx(&conn, &["add", "--amount", "1", "--category", "Food", "--wallet", "nope"]).unwrap_err();
    assert!(err.to_string().contains("wallet 'nope' not found"));
    assert_eq!(db::load_state(&conn).unwrap().transactions.len(), 3);
}
