// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::models::{Wallet, WalletType};
use crate::utils::{date_or_today, maybe_print_json, parse_decimal, pretty_table, with_state, yes_no};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let kind: WalletType = sub.get_one::<String>("type").unwrap().parse()?;
            let id = with_state(conn, |s| {
                let ccy = sub
                    .get_one::<String>("currency")
                    .cloned()
                    .unwrap_or_else(|| s.currency.as_str().to_string());
                Ok(s.add_wallet(name, kind, &ccy))
            })?;
            println!("Added wallet '{}' ({}) id={}", name.trim(), kind, id);
        }
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            with_state(conn, |s| Ok(s.delete_wallet(id)?))?;
            println!("Removed wallet {}", id);
        }
        Some(("hide", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let hidden = with_state(conn, |s| Ok(s.toggle_wallet_visibility(id)?))?;
            println!(
                "Wallet {} is now {}",
                id,
                if hidden { "hidden" } else { "visible" }
            );
        }
        Some(("transfer", sub)) => {
            let from = sub.get_one::<String>("from").unwrap();
            let to = sub.get_one::<String>("to").unwrap();
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            let date = date_or_today(sub.get_one::<String>("date"))?;
            with_state(conn, |s| Ok(s.transfer_balance(from, to, amount, date)?))?;
            println!("Transferred {} from {} to {}", amount, from, to);
        }
        _ => {}
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let state = db::load_state(conn)?;
    let show_all = sub.get_flag("all");
    let data: Vec<&Wallet> = state
        .wallets
        .iter()
        .filter(|w| show_all || !w.is_hidden)
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|w| {
                vec![
                    w.id.clone(),
                    w.name.clone(),
                    w.kind.to_string(),
                    w.currency.clone(),
                    format!("{:.2}", w.balance),
                    yes_no(w.is_hidden),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Name", "Type", "CCY", "Balance", "Hidden"], rows)
        );
        println!("Visible total: {:.2} {}", state.visible_total(), state.currency);
    }
    Ok(())
}
