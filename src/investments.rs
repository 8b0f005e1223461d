// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Debt, DebtType, Investment, Transaction, TransactionType, new_id};
use crate::state::{AppState, ensure_non_negative, ensure_positive};

/// Record created as the side effect of a sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaleRecord {
    Debt(String),
    Transaction(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaleOutcome {
    pub realized_profit: Decimal,
    pub remaining_quantity: Decimal,
    pub created: SaleRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub market_value: Decimal,
    pub cost_basis: Decimal,
    pub unrealized: Decimal,
    pub realized: Decimal,
}

impl AppState {
    pub fn investment(&self, id: &str) -> LedgerResult<&Investment> {
        self.investments
            .iter()
            .find(|i| i.id == id)
            .ok_or_else(|| LedgerError::not_found("investment", id))
    }

    fn investment_mut(&mut self, id: &str) -> LedgerResult<&mut Investment> {
        self.investments
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| LedgerError::not_found("investment", id))
    }

    /// Adds a holding. With `deduct_from_wallet`, its cost is booked as an
    /// inventory expense against the default wallet.
    pub fn add_investment(
        &mut self,
        mut inv: Investment,
        deduct_from_wallet: bool,
        date: NaiveDate,
    ) -> LedgerResult<String> {
        ensure_non_negative(inv.quantity)?;
        ensure_non_negative(inv.avg_buy_price)?;
        ensure_non_negative(inv.current_price)?;
        if inv.id.trim().is_empty() {
            inv.id = new_id();
        }
        let id = inv.id.clone();
        if deduct_from_wallet {
            let category = self.pick_category(&["Inventory", "Other_Exp"], TransactionType::Expense);
            let tx = Transaction::new(TransactionType::Expense, inv.cost_basis(), category, date)
                .with_description(format!("Stock purchase: {}", inv.asset_name));
            self.add_transaction(tx)?;
        }
        log::info!("added investment {} x {}", inv.quantity, inv.asset_name);
        self.investments.insert(0, inv);
        Ok(id)
    }

    pub fn update_price(&mut self, id: &str, price: Decimal) -> LedgerResult<()> {
        ensure_non_negative(price)?;
        self.investment_mut(id)?.current_price = price;
        Ok(())
    }

    pub fn delete_investment(&mut self, id: &str) -> LedgerResult<()> {
        self.investment(id)?;
        self.investments.retain(|i| i.id != id);
        Ok(())
    }

    /// Sells `quantity` units for `sale_price` total proceeds.
    ///
    /// Profit is `sale_price - quantity * avg_buy_price`. A credit sale opens a
    /// lent debt for the buyer; a cash sale books trading income carrying the
    /// profit. Overselling is rejected without touching the holding.
    pub fn sell_investment(
        &mut self,
        id: &str,
        quantity: Decimal,
        sale_price: Decimal,
        credit: bool,
        buyer: Option<&str>,
        date: NaiveDate,
    ) -> LedgerResult<SaleOutcome> {
        ensure_positive(quantity)?;
        ensure_non_negative(sale_price)?;
        let buyer = buyer.map(str::trim).filter(|b| !b.is_empty());
        if credit && buyer.is_none() {
            return Err(LedgerError::MissingBuyer);
        }
        let inv = self.investment(id)?;
        if quantity > inv.quantity {
            log::warn!(
                "oversell of {} rejected: {} requested, {} held",
                inv.asset_name,
                quantity,
                inv.quantity
            );
            return Err(LedgerError::Oversell {
                requested: quantity,
                available: inv.quantity,
            });
        }
        let asset_name = inv.asset_name.clone();
        let realized_profit = sale_price - quantity * inv.avg_buy_price;

        let created = match buyer {
            Some(name) if credit => {
                let mut debt = Debt::new(name, sale_price, DebtType::Lent);
                debt.notes = Some(format!("Bought {} (profit: {})", asset_name, realized_profit));
                SaleRecord::Debt(self.add_debt(debt, false, date)?)
            }
            _ => {
                let category = self.pick_category(&["Trading", "Investment"], TransactionType::Income);
                let mut tx = Transaction::new(TransactionType::Income, sale_price, category, date)
                    .with_description(format!("Sale of {}", asset_name))
                    .with_contact(buyer.map(str::to_string));
                tx.profit = Some(realized_profit);
                SaleRecord::Transaction(self.add_transaction(tx)?)
            }
        };

        let inv = self.investment_mut(id)?;
        inv.quantity -= quantity;
        let remaining_quantity = inv.quantity;
        log::info!(
            "sold {} x {} for {} (profit {})",
            quantity,
            asset_name,
            sale_price,
            realized_profit
        );
        Ok(SaleOutcome {
            realized_profit,
            remaining_quantity,
            created,
        })
    }

    /// Sells a telecom package out of a credit-balance holding: the package's
    /// cost is the quantity consumed and its price the proceeds.
    pub fn sell_package(
        &mut self,
        investment_id: &str,
        package_id: &str,
        credit: bool,
        buyer: Option<&str>,
        date: NaiveDate,
    ) -> LedgerResult<SaleOutcome> {
        let pkg = self.package(package_id)?;
        let (cost, price) = (pkg.cost, pkg.price);
        self.sell_investment(investment_id, cost, price, credit, buyer, date)
    }

    pub fn portfolio_summary(&self) -> PortfolioSummary {
        let market_value: Decimal = self.investments.iter().map(Investment::market_value).sum();
        let cost_basis: Decimal = self.investments.iter().map(Investment::cost_basis).sum();
        let realized = self.transactions.iter().filter_map(|t| t.profit).sum();
        PortfolioSummary {
            market_value,
            cost_basis,
            unrealized: market_value - cost_basis,
            realized,
        }
    }
}
