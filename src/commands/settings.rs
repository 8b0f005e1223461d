// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::models::{Currency, Theme, TransactionType};
use crate::utils::{maybe_print_json, pretty_table, with_state};
use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let state = db::load_state(conn)?;
            let v = json!({
                "theme": state.theme,
                "currency": state.currency,
                "defaultTransactionType": state.default_transaction_type,
                "zakatSettings": state.zakat_settings,
                "store": db::db_path()?.display().to_string(),
            });
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &v)? {
                let rows = vec![
                    vec!["theme".to_string(), state.theme.to_string()],
                    vec!["currency".to_string(), state.currency.to_string()],
                    vec![
                        "default type".to_string(),
                        state.default_transaction_type.to_string(),
                    ],
                    vec!["store".to_string(), db::db_path()?.display().to_string()],
                ];
                println!("{}", pretty_table(&["Setting", "Value"], rows));
            }
        }
        Some(("set", sub)) => {
            let theme = sub
                .get_one::<String>("theme")
                .map(|s| s.parse::<Theme>())
                .transpose()?;
            let currency = sub
                .get_one::<String>("currency")
                .map(|s| s.parse::<Currency>())
                .transpose()?;
            let default_type = sub
                .get_one::<String>("default-type")
                .map(|s| s.parse::<TransactionType>())
                .transpose()?;
            with_state(conn, |s| {
                if let Some(v) = theme {
                    s.theme = v;
                }
                if let Some(v) = currency {
                    s.currency = v;
                }
                if let Some(v) = default_type {
                    s.default_transaction_type = v;
                }
                Ok(())
            })?;
            println!("Settings updated");
        }
        _ => {}
    }
    Ok(())
}
