// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::state::AppState;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection) -> Result<()> {
    let state = db::load_state(conn)?;
    let rows = check(&state);
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        log::warn!("doctor found {} issue(s)", rows.len());
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// `[issue, detail]` pairs for records that break ledger invariants.
pub fn check(state: &AppState) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    // 1) Debts outside [0, initial]
    for d in &state.debts {
        if d.amount < Decimal::ZERO || d.amount > d.initial_amount {
            rows.push(vec![
                "debt_amount_out_of_range".into(),
                format!("{} {}: {} of {}", d.id, d.person_name, d.amount, d.initial_amount),
            ]);
        }
    }

    // 2) Dangling references and type mismatches
    for t in &state.transactions {
        if let Some(w) = t.wallet_id.as_deref() {
            if state.wallet(w).is_err() {
                rows.push(vec!["txn_unknown_wallet".into(), format!("{} -> {}", t.id, w)]);
            }
        }
        match state.category(&t.category_id) {
            None => rows.push(vec![
                "txn_unknown_category".into(),
                format!("{} -> {}", t.id, t.category_id),
            ]),
            Some(c) if c.kind != t.kind => rows.push(vec![
                "txn_category_type_mismatch".into(),
                format!("{} is {} but {} is {}", t.id, t.kind, c.id, c.kind),
            ]),
            Some(_) => {}
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Debt, DebtType, Transaction, TransactionType};
    use chrono::NaiveDate;

    #[test]
    fn flags_broken_records() {
        let mut state = AppState::default();
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        state.transactions.push(
            Transaction::new(TransactionType::Income, Decimal::ONE, "Food", date).with_wallet("gone"),
        );
        state
            .transactions
            .push(Transaction::new(TransactionType::Expense, Decimal::ONE, "Nope", date));
        let mut debt = Debt::new("Ali", Decimal::from(5), DebtType::Lent);
        debt.amount = Decimal::from(6);
        state.debts.push(debt);

        let issues: Vec<String> = check(&state).into_iter().map(|r| r[0].clone()).collect();
        assert_eq!(
            issues,
            [
                "debt_amount_out_of_range",
                "txn_unknown_wallet",
                "txn_category_type_mismatch",
                "txn_unknown_category"
            ]
        );
        assert!(check(&AppState::default()).is_empty());
    }
}
