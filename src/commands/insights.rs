// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::insights::{smart_alerts, spending_trend};
use crate::utils::{date_or_today, maybe_print_json};
use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let today = date_or_today(m.get_one::<String>("date"))?;
    let state = db::load_state(conn)?;
    let alerts = smart_alerts(&state.transactions, &state.categories, &state.debts, today);
    let trend = spending_trend(&state.transactions, today);

    if m.get_flag("jsonl") {
        maybe_print_json(false, true, &alerts)?;
        return Ok(());
    }
    if maybe_print_json(
        m.get_flag("json"),
        false,
        &json!({ "alerts": alerts, "trend": trend }),
    )? {
        return Ok(());
    }
    for a in &alerts {
        println!("- {}", a.message);
    }
    if let Some(t) = trend {
        let direction = if t.change_pct.is_sign_positive() { "up" } else { "down" };
        println!(
            "Spending is {} {}% this month ({:.2} vs {:.2})",
            direction,
            t.change_pct.abs(),
            t.this_month,
            t.last_month
        );
    }
    Ok(())
}
