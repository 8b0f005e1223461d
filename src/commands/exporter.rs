// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::backup::{backup_file_name, export_document};
use crate::commands::transactions::TransactionRow;
use crate::db;
use crate::utils::today;
use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("backup", sub)) => export_backup(conn, sub),
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_backup(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let out = sub
        .get_one::<String>("out")
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| backup_file_name(today()));
    let state = db::load_state(conn)?;
    let doc = export_document(&state)?;
    std::fs::write(&out, doc).with_context(|| format!("Write backup {}", out))?;
    log::info!("exported backup to {}", out);
    println!("Backup written to {}", out);
    Ok(())
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim();
    if fmt != "csv" && fmt != "json" {
        return Err(anyhow!("Unknown format: {} (use csv|json)", fmt));
    }

    let state = db::load_state(conn)?;
    let mut rows: Vec<TransactionRow> = state
        .transactions
        .iter()
        .map(|t| TransactionRow::from_tx(&state, t))
        .collect();
    // oldest first for spreadsheets
    rows.reverse();
    rows.sort_by(|a, b| a.date.cmp(&b.date));

    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
        for row in &rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
    } else {
        std::fs::write(out, serde_json::to_string_pretty(&rows)?)
            .with_context(|| format!("Write {}", out))?;
    }
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}
