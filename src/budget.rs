// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Category, Transaction, TransactionType};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRow {
    pub category_id: String,
    pub label: String,
    pub spent: Decimal,
    pub spent_previous: Decimal,
    pub limit: Decimal,
    /// Spent over limit in percent; zero when no limit is set.
    pub usage_pct: Decimal,
    /// Month-over-month change in percent; zero when last month was empty.
    pub change_pct: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetReport {
    pub month: String,
    pub previous_month: String,
    pub rows: Vec<BudgetRow>,
    pub total: BudgetRow,
}

/// Month key (`YYYY-MM`) of the month before `first_day`.
pub fn previous_month(first_day: NaiveDate) -> String {
    let prev = first_day
        .checked_sub_months(Months::new(1))
        .unwrap_or(first_day);
    format!("{:04}-{:02}", prev.year(), prev.month())
}

fn in_month(date: NaiveDate, month: &str) -> bool {
    format!("{:04}-{:02}", date.year(), date.month()) == month
}

/// Σ expense amounts in `month`, for one category or for all when `None`.
pub fn spent_in(transactions: &[Transaction], category: Option<&str>, month: &str) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.kind == TransactionType::Expense && in_month(t.date, month))
        .filter(|t| category.is_none_or(|c| t.category_id == c))
        .map(|t| t.amount)
        .sum()
}

fn percent(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        Decimal::ZERO
    } else {
        (part * Decimal::ONE_HUNDRED / whole).round_dp(1)
    }
}

fn row(id: &str, label: &str, spent: Decimal, prev: Decimal, limit: Decimal) -> BudgetRow {
    BudgetRow {
        category_id: id.to_string(),
        label: label.to_string(),
        spent,
        spent_previous: prev,
        limit,
        usage_pct: percent(spent, limit),
        change_pct: percent(spent - prev, prev),
    }
}

fn flatten_expense<'a>(cats: &'a [Category], out: &mut Vec<&'a Category>) {
    for c in cats {
        if c.kind == TransactionType::Expense {
            out.push(c);
        }
        flatten_expense(&c.children, out);
    }
}

/// Spending against limits for the month starting at `first_day`.
/// Every expense category is listed, subcategories included.
pub fn budget_report(
    categories: &[Category],
    transactions: &[Transaction],
    first_day: NaiveDate,
) -> BudgetReport {
    let month = format!("{:04}-{:02}", first_day.year(), first_day.month());
    let previous = previous_month(first_day);

    let mut expense = Vec::new();
    flatten_expense(categories, &mut expense);

    let rows: Vec<BudgetRow> = expense
        .iter()
        .map(|c| {
            row(
                &c.id,
                &c.label,
                spent_in(transactions, Some(&c.id), &month),
                spent_in(transactions, Some(&c.id), &previous),
                c.budget_limit.unwrap_or(Decimal::ZERO),
            )
        })
        .collect();

    let total = row(
        "*",
        "All categories",
        spent_in(transactions, None, &month),
        spent_in(transactions, None, &previous),
        rows.iter().map(|r| r.limit).sum(),
    );
    BudgetReport {
        month,
        previous_month: previous,
        rows,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn spend(cat: &str, amount: i64, date: NaiveDate) -> Transaction {
        Transaction::new(TransactionType::Expense, Decimal::from(amount), cat, date)
    }

    fn cats() -> Vec<Category> {
        let mut food = Category::new("Food", "Food", TransactionType::Expense);
        food.budget_limit = Some(Decimal::from(1000));
        food.children
            .push(Category::new("fruits", "Fruits", TransactionType::Expense));
        vec![
            food,
            Category::new("Salary", "Salary", TransactionType::Income),
        ]
    }

    #[test]
    fn report_compares_with_previous_month() {
        let txs = vec![
            spend("Food", 600, ymd(2025, 3, 4)),
            spend("Food", 400, ymd(2025, 2, 20)),
            spend("fruits", 50, ymd(2025, 3, 9)),
            Transaction::new(TransactionType::Income, Decimal::from(9000), "Salary", ymd(2025, 3, 1)),
        ];
        let report = budget_report(&cats(), &txs, ymd(2025, 3, 1));
        assert_eq!(report.previous_month, "2025-02");
        assert_eq!(report.rows.len(), 2);

        let food = &report.rows[0];
        assert_eq!(food.spent, Decimal::from(600));
        assert_eq!(food.spent_previous, Decimal::from(400));
        assert_eq!(food.usage_pct, Decimal::from(60));
        assert_eq!(food.change_pct, Decimal::from(50));

        assert_eq!(report.rows[1].category_id, "fruits");
        assert_eq!(report.rows[1].usage_pct, Decimal::ZERO);
        assert_eq!(report.total.spent, Decimal::from(650));
        assert_eq!(report.total.limit, Decimal::from(1000));
    }

    #[test]
    fn january_looks_back_to_december() {
        assert_eq!(previous_month(ymd(2025, 1, 1)), "2024-12");
        let txs = vec![spend("Food", 10, ymd(2025, 1, 2))];
        let report = budget_report(&cats(), &txs, ymd(2025, 1, 1));
        // no spending last month means no change figure
        assert_eq!(report.rows[0].change_pct, Decimal::ZERO);
    }
}
