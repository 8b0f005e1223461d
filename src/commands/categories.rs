// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::error::LedgerError;
use crate::models::{Category, TransactionType};
use crate::utils::{maybe_print_json, opt_str, parse_decimal, pretty_table, with_state};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let label = sub.get_one::<String>("label").unwrap().trim().to_string();
            let kind: TransactionType = sub.get_one::<String>("type").unwrap().parse()?;
            let id = sub
                .get_one::<String>("id")
                .map(|s| s.trim().to_string())
                .unwrap_or_default();
            let mut cat = Category::new(id, label.clone(), kind);
            cat.icon = sub.get_one::<String>("icon").cloned();
            cat.budget_limit = sub
                .get_one::<String>("limit")
                .map(|s| parse_decimal(s))
                .transpose()?;
            let parent = sub.get_one::<String>("parent").map(String::as_str);
            let id = with_state(conn, |s| Ok(s.add_category(cat, parent)?))?;
            println!("Added category '{}' id={}", label, id);
        }
        Some(("list", sub)) => {
            let state = db::load_state(conn)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &state.categories)? {
                let mut data = Vec::new();
                flatten(&state.categories, 0, &mut data);
                println!(
                    "{}",
                    pretty_table(&["Id", "Label", "Type", "Budget limit"], data)
                );
            }
        }
        Some(("edit", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let kind = sub
                .get_one::<String>("type")
                .map(|s| s.parse::<TransactionType>())
                .transpose()?;
            let label = with_state(conn, |s| {
                let mut cat = s
                    .category(id)
                    .cloned()
                    .ok_or_else(|| LedgerError::not_found("category", id))?;
                if let Some(l) = sub.get_one::<String>("label") {
                    cat.label = l.trim().to_string();
                }
                if let Some(i) = sub.get_one::<String>("icon") {
                    cat.icon = Some(i.clone());
                }
                if let Some(k) = kind {
                    cat.kind = k;
                }
                let label = cat.label.clone();
                s.update_category(cat)?;
                Ok(label)
            })?;
            println!("Updated category '{}' ({})", label, id);
        }
        Some(("budget", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let limit = if sub.get_flag("clear") {
                None
            } else {
                sub.get_one::<String>("limit")
                    .map(|s| parse_decimal(s))
                    .transpose()?
            };
            with_state(conn, |s| Ok(s.set_budget_limit(id, limit)?))?;
            match limit {
                Some(l) => println!("Budget limit for {} = {}", id, l),
                None => println!("Budget limit for {} cleared", id),
            }
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            with_state(conn, |s| Ok(s.delete_category(id)?))?;
            println!("Removed category '{}'", id);
        }
        _ => {}
    }
    Ok(())
}

fn flatten(cats: &[Category], depth: usize, out: &mut Vec<Vec<String>>) {
    for c in cats {
        out.push(vec![
            c.id.clone(),
            format!("{}{}", "  ".repeat(depth), c.label),
            c.kind.to_string(),
            opt_str(c.budget_limit),
        ]);
        flatten(&c.children, depth + 1, out);
    }
}
