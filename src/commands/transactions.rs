// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::models::{Transaction, TransactionType};
use crate::state::{AppState, TransactionPatch};
use crate::utils::{
    date_or_today, maybe_print_json, parse_date, parse_decimal, parse_month, pretty_table,
    with_state,
};
use anyhow::{Result, anyhow};
use chrono::Datelike;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let removed = with_state(conn, |s| Ok(s.delete_transaction(id)?))?;
            println!("Removed {} {} ({})", removed.kind, removed.amount, removed.category_id);
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    let date = date_or_today(sub.get_one::<String>("date"))?;
    let explicit_kind = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<TransactionType>())
        .transpose()?;

    let tx = with_state(conn, |s| {
        if s.category(&category).is_none() {
            return Err(anyhow!("Category '{}' not found", category));
        }
        let kind = explicit_kind.unwrap_or(s.default_transaction_type);
        let mut tx = Transaction::new(kind, amount, category.clone(), date)
            .with_contact(sub.get_one::<String>("contact").map(|c| c.trim().to_string()));
        if let Some(w) = sub.get_one::<String>("wallet") {
            tx = tx.with_wallet(w.trim());
        }
        if let Some(d) = sub.get_one::<String>("description") {
            tx = tx.with_description(d.trim());
        }
        tx.is_excluded_from_balance = sub.get_flag("exclude");
        s.add_transaction(tx.clone())?;
        Ok(tx)
    })?;
    println!(
        "Recorded {} {} on {} ({}) id={}",
        tx.kind, tx.amount, tx.date, tx.category_id, tx.id
    );
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let patch = TransactionPatch {
        amount: sub
            .get_one::<String>("amount")
            .map(|s| parse_decimal(s))
            .transpose()?,
        kind: sub
            .get_one::<String>("type")
            .map(|s| s.parse::<TransactionType>())
            .transpose()?,
        category_id: sub.get_one::<String>("category").map(|s| s.trim().to_string()),
        wallet_id: sub.get_one::<String>("wallet").map(|w| match w.trim() {
            "default" | "" => None,
            other => Some(other.to_string()),
        }),
        date: sub
            .get_one::<String>("date")
            .map(|s| parse_date(s))
            .transpose()?,
        description: sub.get_one::<String>("description").cloned(),
        is_excluded_from_balance: sub.get_one::<bool>("exclude").copied(),
    };
    with_state(conn, |s| Ok(s.update_transaction(id, patch)?))?;
    println!("Updated transaction {}", id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.wallet.clone(),
                    r.contact.clone(),
                    r.description.clone(),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Type", "Amount", "Category", "Wallet", "Contact", "Description", "Id"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub wallet: String,
    pub contact: String,
    pub description: String,
    pub excluded: bool,
}

impl TransactionRow {
    pub fn from_tx(state: &AppState, t: &Transaction) -> Self {
        let wallet_id = t.wallet_id.as_deref().or(state.default_wallet_id());
        let wallet = wallet_id
            .and_then(|id| state.wallet(id).ok())
            .map(|w| w.name.clone())
            .unwrap_or_default();
        let category = state
            .category(&t.category_id)
            .map(|c| c.label.clone())
            .unwrap_or_else(|| t.category_id.clone());
        Self {
            id: t.id.clone(),
            date: t.date.to_string(),
            kind: t.kind.to_string(),
            amount: t.amount.to_string(),
            category,
            wallet,
            contact: t.contact_name.clone().unwrap_or_default(),
            description: t.description.clone(),
            excluded: t.is_excluded_from_balance,
        }
    }
}

/// Filtered transactions, newest first.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let state = db::load_state(conn)?;
    let month = sub
        .get_one::<String>("month")
        .map(|m| parse_month(m))
        .transpose()?;
    let kind = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<TransactionType>())
        .transpose()?;
    let wallet = sub.get_one::<String>("wallet");
    let category = sub.get_one::<String>("category");
    let default_wallet = state.default_wallet_id();

    let mut matched: Vec<&Transaction> = state
        .transactions
        .iter()
        .filter(|t| month.is_none_or(|m| t.date.year() == m.year() && t.date.month() == m.month()))
        .filter(|t| kind.is_none_or(|k| t.kind == k))
        .filter(|t| wallet.is_none_or(|w| t.wallet_id.as_deref().or(default_wallet) == Some(w.as_str())))
        .filter(|t| category.is_none_or(|c| &t.category_id == c))
        .collect();
    // stable sort keeps insertion order (newest first) within a day
    matched.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        matched.truncate(*limit);
    }
    Ok(matched
        .into_iter()
        .map(|t| TransactionRow::from_tx(&state, t))
        .collect())
}
