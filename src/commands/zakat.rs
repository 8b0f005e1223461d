// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::models::NisabType;
use crate::zakat::ZakatUpdate;
use crate::utils::{
    date_or_today, maybe_print_json, opt_str, parse_decimal, pretty_table, with_state, yes_no,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("status", sub)) => status(conn, sub)?,
        Some(("set", sub)) => set(conn, sub)?,
        Some(("pay", sub)) => {
            let date = date_or_today(sub.get_one::<String>("date"))?;
            let (paid, ccy) = with_state(conn, |s| Ok((s.pay_zakat(date)?, s.currency)))?;
            println!("Recorded zakat payment of {:.2} {} on {}", paid, ccy, date);
        }
        _ => {}
    }
    Ok(())
}

fn status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let state = db::load_state(conn)?;
    let a = state.zakat_assessment();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &a)? {
        return Ok(());
    }
    let s = &state.zakat_settings;
    let rows = vec![
        vec!["Cash".into(), format!("{:.2}", a.base.cash)],
        vec!["Investments".into(), format!("{:.2}", a.base.investments)],
        vec!["Receivables".into(), format!("{:.2}", a.base.receivables)],
        vec!["Liabilities".into(), format!("{:.2}", a.base.liabilities)],
        vec!["Total".into(), format!("{:.2}", a.base.total)],
        vec![format!("Nisab ({})", s.nisab_type), format!("{:.2}", a.nisab)],
        vec!["Eligible".into(), yes_no(a.eligible)],
        vec!["Due".into(), format!("{:.2}", a.due_amount)],
        vec!["Last paid".into(), opt_str(s.last_paid_date)],
    ];
    println!("{}", pretty_table(&["Item", state.currency.as_str()], rows));
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let update = ZakatUpdate {
        gold_price: sub
            .get_one::<String>("gold-price")
            .map(|s| parse_decimal(s))
            .transpose()?,
        silver_price: sub
            .get_one::<String>("silver-price")
            .map(|s| parse_decimal(s))
            .transpose()?,
        nisab_type: sub
            .get_one::<String>("nisab")
            .map(|s| s.parse::<NisabType>())
            .transpose()?,
        deduct_liabilities: sub.get_one::<bool>("deduct-liabilities").copied(),
    };

    let settings = with_state(conn, |s| Ok(s.update_zakat_settings(update)?.clone()))?;
    println!(
        "Zakat settings: gold {} | silver {} | nisab {} | deduct liabilities {}",
        settings.gold_price,
        opt_str(settings.silver_price),
        settings.nisab_type,
        yes_no(settings.deduct_liabilities)
    );
    Ok(())
}
