// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Offline, rule-based alerts computed from the ledger alone.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::budget::{previous_month, spent_in};
use crate::models::{Category, Debt, Transaction, TransactionType};

pub const MAX_ALERTS: usize = 5;

const HABIT_WINDOW_DAYS: u64 = 5;
const HABIT_MIN_ENTRIES: usize = 3;
const DEBT_REMINDER_DAYS: i64 = 3;
const TOP_SPEND_WINDOW_DAYS: u64 = 7;
const TREND_THRESHOLD_PCT: i64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Overspending,
    Habit,
    DebtDue,
    DebtOverdue,
    TopCategory,
    Tip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    fn new(kind: AlertKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

fn label_of<'a>(categories: &'a [Category], id: &'a str) -> &'a str {
    fn walk<'a>(cats: &'a [Category], id: &str) -> Option<&'a str> {
        cats.iter().find_map(|c| {
            if c.id == id {
                Some(c.label.as_str())
            } else {
                walk(&c.children, id)
            }
        })
    }
    walk(categories, id).unwrap_or(id)
}

fn days_back(today: NaiveDate, n: u64) -> NaiveDate {
    today.checked_sub_days(Days::new(n)).unwrap_or(today)
}

fn ratio_alert(transactions: &[Transaction]) -> Option<Alert> {
    let income: Decimal = transactions
        .iter()
        .filter(|t| t.kind == TransactionType::Income)
        .map(|t| t.amount)
        .sum();
    // stock purchases are capital, not spending
    let expense: Decimal = transactions
        .iter()
        .filter(|t| t.kind == TransactionType::Expense && t.category_id != "Inventory")
        .map(|t| t.amount)
        .sum();
    if income <= Decimal::ZERO {
        return None;
    }
    let pct = (expense * Decimal::ONE_HUNDRED / income).round();
    if pct > Decimal::from(90) {
        Some(Alert::new(
            AlertKind::Overspending,
            format!("Warning: you have spent {}% of your recorded income", pct),
        ))
    } else if pct > Decimal::from(75) {
        Some(Alert::new(
            AlertKind::Overspending,
            "Heads up: expenses passed 75% of income. Try to save a little.",
        ))
    } else {
        None
    }
}

fn habit_alerts(transactions: &[Transaction], categories: &[Category], today: NaiveDate) -> Vec<Alert> {
    let window_start = days_back(today, HABIT_WINDOW_DAYS);
    categories
        .iter()
        .filter(|c| c.kind == TransactionType::Expense && c.id != "Inventory" && c.id != "Zakat")
        .filter_map(|c| {
            let recent = transactions
                .iter()
                .filter(|t| t.category_id == c.id && t.date >= window_start && t.date < today)
                .count();
            let logged_today = transactions
                .iter()
                .any(|t| t.category_id == c.id && t.date == today);
            (recent >= HABIT_MIN_ENTRIES && !logged_today).then(|| {
                Alert::new(
                    AlertKind::Habit,
                    format!("Note: no \"{}\" expenses recorded today?", c.label),
                )
            })
        })
        .collect()
}

fn debt_alerts(debts: &[Debt], today: NaiveDate) -> Vec<Alert> {
    debts
        .iter()
        .filter(|d| d.is_outstanding())
        .filter_map(|d| {
            let due = d.due_date?;
            let days = (due - today).num_days();
            if days < 0 {
                Some(Alert::new(
                    AlertKind::DebtOverdue,
                    format!("Debt with \"{}\" is {} day(s) overdue", d.person_name, -days),
                ))
            } else if days <= DEBT_REMINDER_DAYS {
                let when = if days == 0 {
                    "today".to_string()
                } else {
                    format!("in {} day(s)", days)
                };
                Some(Alert::new(
                    AlertKind::DebtDue,
                    format!("Reminder: debt with \"{}\" is due {}", d.person_name, when),
                ))
            } else {
                None
            }
        })
        .collect()
}

fn top_category_alert(
    transactions: &[Transaction],
    categories: &[Category],
    today: NaiveDate,
) -> Option<Alert> {
    let since = days_back(today, TOP_SPEND_WINDOW_DAYS - 1);
    let mut by_category: BTreeMap<&str, Decimal> = BTreeMap::new();
    for t in transactions
        .iter()
        .filter(|t| t.kind == TransactionType::Expense && t.date >= since && t.date <= today)
    {
        *by_category.entry(t.category_id.as_str()).or_default() += t.amount;
    }
    let top = by_category
        .into_iter()
        .filter(|(_, amount)| *amount > Decimal::ZERO)
        .fold(None::<(&str, Decimal)>, |best, (cat, amount)| match best {
            Some((_, best_amount)) if best_amount >= amount => best,
            _ => Some((cat, amount)),
        });
    top.map(|(cat, amount)| {
        Alert::new(
            AlertKind::TopCategory,
            format!("Top spending this week: {} ({})", label_of(categories, cat), amount),
        )
    })
}

/// Up to five alerts for `today`, in rule order. Two tips stand in when no
/// rule fires.
pub fn smart_alerts(
    transactions: &[Transaction],
    categories: &[Category],
    debts: &[Debt],
    today: NaiveDate,
) -> Vec<Alert> {
    let mut alerts = Vec::new();
    alerts.extend(ratio_alert(transactions));
    alerts.extend(habit_alerts(transactions, categories, today));
    alerts.extend(debt_alerts(debts, today));
    alerts.extend(top_category_alert(transactions, categories, today));

    if alerts.is_empty() {
        alerts.push(Alert::new(AlertKind::Tip, "Your finances look healthy. Keep tracking!"));
        alerts.push(Alert::new(AlertKind::Tip, "Tip: try to save 10% of your income every month"));
    }
    alerts.truncate(MAX_ALERTS);
    log::debug!("generated {} alerts", alerts.len());
    alerts
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingTrend {
    pub this_month: Decimal,
    pub last_month: Decimal,
    pub change_pct: Decimal,
}

/// Month-over-month expense change, reported only when it moved by more
/// than 20% against a non-empty previous month.
pub fn spending_trend(transactions: &[Transaction], today: NaiveDate) -> Option<SpendingTrend> {
    let first = today.with_day(1).unwrap_or(today);
    let this_key = format!("{:04}-{:02}", first.year(), first.month());
    let last_key = previous_month(first);
    let this_month = spent_in(transactions, None, &this_key);
    let last_month = spent_in(transactions, None, &last_key);
    if last_month <= Decimal::ZERO {
        return None;
    }
    let change_pct = ((this_month - last_month) * Decimal::ONE_HUNDRED / last_month).round();
    (change_pct.abs() > Decimal::from(TREND_THRESHOLD_PCT)).then_some(SpendingTrend {
        this_month,
        last_month,
        change_pct,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DebtType;
    use crate::state::initial_categories;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 20).unwrap()
    }

    fn ago(days: u64) -> NaiveDate {
        days_back(today(), days)
    }

    fn tx(kind: TransactionType, cat: &str, amount: i64, date: NaiveDate) -> Transaction {
        Transaction::new(kind, Decimal::from(amount), cat, date)
    }

    #[test]
    fn high_expense_ratio_warns_with_percentage() {
        let txs = vec![
            tx(TransactionType::Income, "Salary", 1000, ago(10)),
            tx(TransactionType::Expense, "Bills", 950, ago(10)),
            // inventory does not count as spending
            tx(TransactionType::Expense, "Inventory", 5000, ago(10)),
        ];
        let alerts = smart_alerts(&txs, &initial_categories(), &[], today());
        assert_eq!(alerts[0].kind, AlertKind::Overspending);
        assert!(alerts[0].message.contains("95%"));
    }

    #[test]
    fn habit_reminder_needs_three_recent_entries_and_none_today() {
        let cats = initial_categories();
        let mut txs: Vec<Transaction> = (1..=3)
            .map(|d| tx(TransactionType::Expense, "Food", 10, ago(d)))
            .collect();
        let alerts = smart_alerts(&txs, &cats, &[], today());
        assert!(alerts.iter().any(|a| a.kind == AlertKind::Habit));

        txs.push(tx(TransactionType::Expense, "Food", 10, today()));
        let alerts = smart_alerts(&txs, &cats, &[], today());
        assert!(alerts.iter().all(|a| a.kind != AlertKind::Habit));
    }

    #[test]
    fn debt_due_soon_and_overdue_are_flagged() {
        let mut soon = Debt::new("Ali", Decimal::from(100), DebtType::Lent);
        soon.due_date = Some(today() + Days::new(2));
        let mut late = Debt::new("Sara", Decimal::from(100), DebtType::Borrowed);
        late.due_date = Some(ago(4));
        let mut settled = Debt::new("Omar", Decimal::from(100), DebtType::Borrowed);
        settled.amount = Decimal::ZERO;
        settled.due_date = Some(ago(4));

        let alerts = smart_alerts(&[], &[], &[soon, late, settled], today());
        assert_eq!(alerts[0].kind, AlertKind::DebtDue);
        assert!(alerts[0].message.contains("in 2 day(s)"));
        assert_eq!(alerts[1].kind, AlertKind::DebtOverdue);
        assert!(alerts[1].message.contains("4 day(s) overdue"));
        assert_eq!(alerts.len(), 2);
    }

    #[test]
    fn quiet_ledger_gets_two_tips() {
        let alerts = smart_alerts(&[], &initial_categories(), &[], today());
        assert_eq!(alerts.len(), 2);
        assert!(alerts.iter().all(|a| a.kind == AlertKind::Tip));
    }

    #[test]
    fn top_category_names_the_label() {
        let txs = vec![
            tx(TransactionType::Expense, "Transport", 30, ago(2)),
            tx(TransactionType::Expense, "Shopping", 70, ago(6)),
            tx(TransactionType::Expense, "Bills", 500, ago(8)),
        ];
        let alerts = smart_alerts(&txs, &initial_categories(), &[], today());
        let top = alerts.iter().find(|a| a.kind == AlertKind::TopCategory).unwrap();
        assert_eq!(top.message, "Top spending this week: Shopping (70)");
    }

    #[test]
    fn alerts_are_capped_at_five() {
        let debts: Vec<Debt> = (0..8)
            .map(|i| {
                let mut d = Debt::new(format!("p{}", i), Decimal::ONE, DebtType::Lent);
                d.due_date = Some(today());
                d
            })
            .collect();
        assert_eq!(smart_alerts(&[], &[], &debts, today()).len(), MAX_ALERTS);
    }

    #[test]
    fn trend_reports_only_large_moves() {
        let last = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let txs = vec![
            tx(TransactionType::Expense, "Food", 100, last),
            tx(TransactionType::Expense, "Food", 130, ago(1)),
        ];
        let trend = spending_trend(&txs, today()).unwrap();
        assert_eq!(trend.change_pct, Decimal::from(30));

        let flat = vec![
            tx(TransactionType::Expense, "Food", 100, last),
            tx(TransactionType::Expense, "Food", 110, ago(1)),
        ];
        assert!(spending_trend(&flat, today()).is_none());
    }
}
