// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::budget::{BudgetRow, budget_report};
use crate::db;
use crate::utils::{maybe_print_json, parse_month, pretty_table, today};
use anyhow::Result;
use chrono::Datelike;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("report", sub)) => report(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn cells(r: &BudgetRow) -> Vec<String> {
    let change = if r.change_pct.is_sign_positive() && !r.change_pct.is_zero() {
        format!("+{}%", r.change_pct)
    } else {
        format!("{}%", r.change_pct)
    };
    vec![
        r.label.clone(),
        format!("{:.2}", r.spent),
        format!("{:.2}", r.limit),
        format!("{}%", r.usage_pct),
        format!("{:.2}", r.spent_previous),
        change,
    ]
}

fn report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let first_day = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => {
            let t = today();
            t.with_day(1).unwrap_or(t)
        }
    };
    let state = db::load_state(conn)?;
    let report = budget_report(&state.categories, &state.transactions, first_day);

    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if jsonl_flag {
        return maybe_print_json(false, true, &report.rows).map(|_| ());
    }
    if !maybe_print_json(json_flag, false, &report)? {
        let mut rows: Vec<Vec<String>> = report.rows.iter().map(cells).collect();
        rows.push(cells(&report.total));
        println!("Budget {} (vs {})", report.month, report.previous_month);
        println!(
            "{}",
            pretty_table(
                &["Category", "Spent", "Limit", "Used", "Last month", "Change"],
                rows
            )
        );
    }
    Ok(())
}
