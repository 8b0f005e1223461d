// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::debts::DebtOrder;
use crate::models::{Debt, DebtType};
use crate::utils::{
    date_or_today, maybe_print_json, opt_str, parse_date, parse_decimal, pretty_table, with_state,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("settle", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let via = sub.get_one::<String>("via").unwrap();
            with_state(conn, |s| Ok(s.settle_via_third_party(id, via)?))?;
            println!("Settled debt {} via {}", id, via.trim());
        }
        Some(("transfer", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let to = sub.get_one::<String>("to").unwrap();
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            let notes = sub.get_one::<String>("notes").map(String::as_str);
            let receipt = sub.get_one::<String>("receipt").cloned();
            let (new_id, moved) = with_state(conn, |s| {
                let new_id = s.transfer_debt(id, to, amount, notes, receipt)?;
                let moved = s.debt(&new_id)?.amount;
                Ok((new_id, moved))
            })?;
            println!("Transferred {} to {} (new debt id={})", moved, to.trim(), new_id);
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            with_state(conn, |s| Ok(s.delete_debt(id)?))?;
            println!("Removed debt {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let person = sub.get_one::<String>("person").unwrap().trim().to_string();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let kind: DebtType = sub.get_one::<String>("type").unwrap().parse()?;
    let date = date_or_today(sub.get_one::<String>("date"))?;

    let mut debt = Debt::new(person.clone(), amount, kind);
    debt.due_date = sub
        .get_one::<String>("due")
        .map(|s| parse_date(s))
        .transpose()?;
    debt.notes = sub.get_one::<String>("notes").map(|s| s.trim().to_string());
    debt.wallet_id = sub.get_one::<String>("wallet").map(|s| s.trim().to_string());
    let book = sub.get_flag("book");

    let id = with_state(conn, |s| Ok(s.add_debt(debt, book, date)?))?;
    println!("Recorded {} debt {} with {} id={}", kind, amount, person, id);
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let amount = sub
        .get_one::<String>("amount")
        .map(|s| parse_decimal(s))
        .transpose()?;
    let initial = sub
        .get_one::<String>("initial")
        .map(|s| parse_decimal(s))
        .transpose()?;
    let kind = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<DebtType>())
        .transpose()?;
    let due = match sub.get_one::<String>("due").map(|s| s.trim()) {
        Some("none") => Some(None),
        Some(s) => Some(Some(parse_date(s)?)),
        None => None,
    };

    with_state(conn, |s| {
        let mut debt = s.debt(id)?.clone();
        if let Some(p) = sub.get_one::<String>("person") {
            debt.person_name = p.trim().to_string();
        }
        if let Some(v) = amount {
            debt.amount = v;
        }
        if let Some(v) = initial {
            debt.initial_amount = v;
        }
        if let Some(v) = kind {
            debt.kind = v;
        }
        if let Some(v) = due {
            debt.due_date = v;
        }
        if let Some(n) = sub.get_one::<String>("notes") {
            debt.notes = Some(n.trim().to_string()).filter(|n| !n.is_empty());
        }
        Ok(s.update_debt(debt)?)
    })?;
    println!("Updated debt {}", id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let state = db::load_state(conn)?;
    let kind = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<DebtType>())
        .transpose()?;
    let order: DebtOrder = sub.get_one::<String>("sort").unwrap().parse()?;
    let data = state.sorted_debts(kind, sub.get_flag("active"), order);

    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|d| {
                vec![
                    d.id.clone(),
                    d.person_name.clone(),
                    d.kind.to_string(),
                    format!("{:.2}", d.amount),
                    format!("{:.2}", d.initial_amount),
                    opt_str(d.due_date),
                    opt_str(d.notes.as_deref()),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Person", "Type", "Outstanding", "Initial", "Due", "Notes"],
                rows
            )
        );
        println!(
            "Owed to you: {:.2} | You owe: {:.2}",
            state.total_outstanding(DebtType::Lent),
            state.total_outstanding(DebtType::Borrowed)
        );
    }
    Ok(())
}
