// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::backup::import_backup;
use crate::utils::with_state;
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("backup", sub)) => restore(conn, sub),
        _ => Ok(()),
    }
}

fn restore(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let raw = std::fs::read_to_string(path).with_context(|| format!("Open backup {}", path))?;
    with_state(conn, |s| {
        import_backup(s, &raw).with_context(|| format!("Restore backup {}", path))
    })?;
    println!("Imported backup from {}", path);
    Ok(())
}
