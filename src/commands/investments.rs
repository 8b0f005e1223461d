// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::investments::SaleRecord;
use crate::models::{Investment, InvestmentKind};
use crate::utils::{date_or_today, maybe_print_json, parse_decimal, pretty_table, with_state};
use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("price", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let price = parse_decimal(sub.get_one::<String>("price").unwrap())?;
            with_state(conn, |s| Ok(s.update_price(id, price)?))?;
            println!("Price of {} set to {}", id, price);
        }
        Some(("sell", sub)) => sell(conn, sub)?,
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            with_state(conn, |s| Ok(s.delete_investment(id)?))?;
            println!("Removed investment {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let kind: InvestmentKind = sub.get_one::<String>("type").unwrap().parse()?;
    let quantity = parse_decimal(sub.get_one::<String>("quantity").unwrap())?;
    let buy_price = parse_decimal(sub.get_one::<String>("buy-price").unwrap())?;
    let current_price = match sub.get_one::<String>("price") {
        Some(p) => parse_decimal(p)?,
        None => buy_price,
    };
    let date = date_or_today(sub.get_one::<String>("date"))?;
    let inv = Investment {
        id: String::new(),
        asset_name: name.clone(),
        kind,
        quantity,
        avg_buy_price: buy_price,
        current_price,
    };
    let deduct = sub.get_flag("deduct");
    let id = with_state(conn, |s| Ok(s.add_investment(inv, deduct, date)?))?;
    println!("Added {} x {} @ {} id={}", quantity, name, buy_price, id);
    Ok(())
}

fn sell(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let credit = sub.get_flag("credit");
    let buyer = sub.get_one::<String>("buyer").map(String::as_str);
    let date = date_or_today(sub.get_one::<String>("date"))?;

    let outcome = match sub.get_one::<String>("package") {
        Some(pkg) => with_state(conn, |s| Ok(s.sell_package(id, pkg, credit, buyer, date)?))?,
        None => {
            let quantity = parse_decimal(sub.get_one::<String>("quantity").unwrap())?;
            let price = parse_decimal(sub.get_one::<String>("price").unwrap())?;
            with_state(conn, |s| {
                Ok(s.sell_investment(id, quantity, price, credit, buyer, date)?)
            })?
        }
    };
    match outcome.created {
        SaleRecord::Debt(debt_id) => println!(
            "Sold on credit: profit {}, debt id={}, {} left",
            outcome.realized_profit, debt_id, outcome.remaining_quantity
        ),
        SaleRecord::Transaction(tx_id) => println!(
            "Sold: profit {}, income id={}, {} left",
            outcome.realized_profit, tx_id, outcome.remaining_quantity
        ),
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let state = db::load_state(conn)?;
    let summary = state.portfolio_summary();
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let printed = if json_flag {
        maybe_print_json(
            true,
            false,
            &json!({ "investments": state.investments, "summary": summary }),
        )?
    } else {
        maybe_print_json(false, jsonl_flag, &state.investments)?
    };
    if printed {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = state
        .investments
        .iter()
        .map(|i| {
            vec![
                i.id.clone(),
                i.asset_name.clone(),
                i.kind.to_string(),
                i.quantity.to_string(),
                format!("{:.2}", i.avg_buy_price),
                format!("{:.2}", i.current_price),
                format!("{:.2}", i.market_value()),
                format!("{:.2}", i.market_value() - i.cost_basis()),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Asset", "Type", "Qty", "Avg buy", "Price", "Value", "Unrealized"],
            rows
        )
    );
    println!(
        "Value {:.2} | Cost {:.2} | Unrealized {:.2} | Realized {:.2}",
        summary.market_value, summary.cost_basis, summary.unrealized, summary.realized
    );
    Ok(())
}
