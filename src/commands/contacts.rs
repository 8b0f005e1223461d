// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::utils::{maybe_print_json, opt_str, pretty_table, with_state};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let phone = sub.get_one::<String>("phone").map(|p| p.trim().to_string());
            let added = with_state(conn, |s| {
                let before = s.contacts.len();
                s.remember_contact(name, phone);
                Ok(s.contacts.len() > before)
            })?;
            if added {
                println!("Added contact '{}'", name.trim());
            } else {
                println!("Contact '{}' already exists", name.trim());
            }
        }
        Some(("list", sub)) => {
            let state = db::load_state(conn)?;
            let mut data: Vec<_> = state.contacts.iter().collect();
            data.sort_by(|a, b| a.name.cmp(&b.name));
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data
                    .iter()
                    .map(|c| vec![c.name.clone(), opt_str(c.phone.as_deref())])
                    .collect();
                println!("{}", pretty_table(&["Name", "Phone"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}
