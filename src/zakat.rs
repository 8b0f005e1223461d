// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Debt, DebtType, Investment, NisabType, Transaction, TransactionType, ZakatSettings,
};
use crate::reconcile::{sum_by_type, sum_debts};
use crate::state::{AppState, ensure_non_negative};

pub const GOLD_NISAB_GRAMS: Decimal = Decimal::from_parts(85, 0, 0, false, 0);
pub const SILVER_NISAB_GRAMS: Decimal = Decimal::from_parts(595, 0, 0, false, 0);
/// 2.5%
pub const ZAKAT_RATE: Decimal = Decimal::from_parts(25, 0, 0, false, 3);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZakatBase {
    pub cash: Decimal,
    pub investments: Decimal,
    pub receivables: Decimal,
    pub liabilities: Decimal,
    pub total: Decimal,
}

/// Eligible wealth. Net cash is floored at zero; investments count at market
/// value; lent debts count as receivables. Borrowed debts are subtracted only
/// when `deduct_liabilities` is set.
pub fn zakat_base(
    transactions: &[Transaction],
    investments: &[Investment],
    debts: &[Debt],
    deduct_liabilities: bool,
) -> ZakatBase {
    let net = sum_by_type(transactions, TransactionType::Income)
        - sum_by_type(transactions, TransactionType::Expense);
    let cash = net.max(Decimal::ZERO);
    let investments: Decimal = investments.iter().map(Investment::market_value).sum();
    let receivables = sum_debts(debts, DebtType::Lent);
    let liabilities = if deduct_liabilities {
        sum_debts(debts, DebtType::Borrowed)
    } else {
        Decimal::ZERO
    };
    let total = (cash + investments + receivables - liabilities).max(Decimal::ZERO);
    ZakatBase {
        cash,
        investments,
        receivables,
        liabilities,
        total,
    }
}

pub fn nisab_threshold(settings: &ZakatSettings) -> Decimal {
    match settings.nisab_type {
        NisabType::Gold => settings.gold_price * GOLD_NISAB_GRAMS,
        NisabType::Silver => settings.silver_price.unwrap_or(Decimal::ZERO) * SILVER_NISAB_GRAMS,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZakatAssessment {
    pub base: ZakatBase,
    pub nisab: Decimal,
    pub eligible: bool,
    pub due_amount: Decimal,
}

/// An unset price gives a zero nisab, which is never treated as reached.
pub fn assess(base: ZakatBase, settings: &ZakatSettings) -> ZakatAssessment {
    let nisab = nisab_threshold(settings);
    let eligible = nisab > Decimal::ZERO && base.total >= nisab;
    let due_amount = if eligible {
        base.total * ZAKAT_RATE
    } else {
        Decimal::ZERO
    };
    ZakatAssessment {
        base,
        nisab,
        eligible,
        due_amount,
    }
}

/// Partial change to the zakat settings; `None` keeps the current value.
#[derive(Debug, Default, Clone)]
pub struct ZakatUpdate {
    pub gold_price: Option<Decimal>,
    pub silver_price: Option<Decimal>,
    pub nisab_type: Option<NisabType>,
    pub deduct_liabilities: Option<bool>,
}

impl AppState {
    pub fn update_zakat_settings(&mut self, update: ZakatUpdate) -> LedgerResult<&ZakatSettings> {
        for price in [update.gold_price, update.silver_price].into_iter().flatten() {
            ensure_non_negative(price)?;
        }
        let z = &mut self.zakat_settings;
        if let Some(v) = update.gold_price {
            z.gold_price = v;
        }
        if update.silver_price.is_some() {
            z.silver_price = update.silver_price;
        }
        if let Some(v) = update.nisab_type {
            z.nisab_type = v;
        }
        if let Some(v) = update.deduct_liabilities {
            z.deduct_liabilities = v;
        }
        log::info!("updated zakat settings");
        Ok(z)
    }

    pub fn zakat_base(&self) -> ZakatBase {
        zakat_base(
            &self.transactions,
            &self.investments,
            &self.debts,
            self.zakat_settings.deduct_liabilities,
        )
    }

    pub fn zakat_assessment(&self) -> ZakatAssessment {
        assess(self.zakat_base(), &self.zakat_settings)
    }

    /// Books the due zakat as an expense and stamps the payment date.
    pub fn pay_zakat(&mut self, date: NaiveDate) -> LedgerResult<Decimal> {
        let assessment = self.zakat_assessment();
        if !assessment.eligible {
            log::warn!(
                "zakat payment refused: total {} below nisab {}",
                assessment.base.total,
                assessment.nisab
            );
            return Err(LedgerError::NotEligible {
                total: assessment.base.total,
                nisab: assessment.nisab,
            });
        }
        let category = self.pick_category(&["Zakat"], TransactionType::Expense);
        let tx = Transaction::new(TransactionType::Expense, assessment.due_amount, category, date)
            .with_description("Zakat payment");
        self.add_transaction(tx)?;
        self.zakat_settings.last_paid_date = Some(date);
        Ok(assessment.due_amount)
    }
}
