// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::models::TelecomPackage;
use crate::utils::{maybe_print_json, opt_str, parse_decimal, pretty_table, with_state, yes_no};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let pkg = TelecomPackage {
                id: String::new(),
                provider: sub.get_one::<String>("provider").unwrap().trim().to_string(),
                name: sub.get_one::<String>("name").unwrap().trim().to_string(),
                cost: parse_decimal(sub.get_one::<String>("cost").unwrap())?,
                price: parse_decimal(sub.get_one::<String>("price").unwrap())?,
                description: sub.get_one::<String>("description").cloned(),
                is_custom: true,
            };
            let label = format!("{} / {}", pkg.provider, pkg.name);
            let id = with_state(conn, |s| Ok(s.add_package(pkg)?))?;
            println!("Added package {} id={}", label, id);
        }
        Some(("list", sub)) => {
            let state = db::load_state(conn)?;
            let provider = sub.get_one::<String>("provider").map(String::as_str);
            let data = state.packages(provider);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data
                    .iter()
                    .map(|p| {
                        vec![
                            p.id.clone(),
                            p.provider.clone(),
                            p.name.clone(),
                            p.cost.to_string(),
                            p.price.to_string(),
                            (p.price - p.cost).to_string(),
                            yes_no(p.is_custom),
                            opt_str(p.description.as_deref()),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(
                        &["Id", "Provider", "Name", "Cost", "Price", "Margin", "Custom", "Description"],
                        rows
                    )
                );
            }
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            with_state(conn, |s| Ok(s.delete_package(id)?))?;
            println!("Removed package {}", id);
        }
        _ => {}
    }
    Ok(())
}
