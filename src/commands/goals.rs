// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::utils::{maybe_print_json, opt_str, parse_date, parse_decimal, pretty_table, with_state};
use anyhow::Result;
use rust_decimal::Decimal;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let target = parse_decimal(sub.get_one::<String>("target").unwrap())?;
            let deadline = sub
                .get_one::<String>("deadline")
                .map(|s| parse_date(s))
                .transpose()?;
            let id = with_state(conn, |s| Ok(s.add_goal(name, target, deadline)?))?;
            println!("Added goal '{}' ({}) id={}", name.trim(), target, id);
        }
        Some(("progress", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            let now = with_state(conn, |s| Ok(s.record_goal_progress(id, amount)?))?;
            println!("Goal {} now at {}", id, now);
        }
        Some(("list", sub)) => {
            let state = db::load_state(conn)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &state.goals)? {
                let rows = state
                    .goals
                    .iter()
                    .map(|g| {
                        let pct = if g.target_amount.is_zero() {
                            Decimal::ZERO
                        } else {
                            g.current_amount * Decimal::ONE_HUNDRED / g.target_amount
                        };
                        vec![
                            g.id.clone(),
                            g.name.clone(),
                            format!("{:.2}", g.current_amount),
                            format!("{:.2}", g.target_amount),
                            format!("{:.0}%", pct),
                            opt_str(g.deadline),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Id", "Goal", "Saved", "Target", "Progress", "Deadline"], rows)
                );
            }
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            with_state(conn, |s| Ok(s.delete_goal(id)?))?;
            println!("Removed goal {}", id);
        }
        _ => {}
    }
    Ok(())
}
