// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Debt, DebtType, Transaction, TransactionType, new_id};
use crate::state::{AppState, ensure_non_negative, ensure_positive};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebtOrder {
    #[default]
    AmountDesc,
    AmountAsc,
    DueAsc,
    DueDesc,
}

impl FromStr for DebtOrder {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "amount-desc" => Ok(DebtOrder::AmountDesc),
            "amount-asc" => Ok(DebtOrder::AmountAsc),
            "due-asc" => Ok(DebtOrder::DueAsc),
            "due-desc" => Ok(DebtOrder::DueDesc),
            _ => Err(LedgerError::unknown_value("debt order", s)),
        }
    }
}

// Undated debts always sort after dated ones.
fn cmp_due(a: Option<NaiveDate>, b: Option<NaiveDate>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) if descending => y.cmp(&x),
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn validate_debt(debt: &Debt) -> LedgerResult<()> {
    ensure_non_negative(debt.amount)?;
    ensure_non_negative(debt.initial_amount)?;
    if debt.amount > debt.initial_amount {
        return Err(LedgerError::AmountAboveInitial {
            amount: debt.amount,
            initial: debt.initial_amount,
        });
    }
    Ok(())
}

impl AppState {
    pub fn debt(&self, id: &str) -> LedgerResult<&Debt> {
        self.debts
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| LedgerError::not_found("debt", id))
    }

    fn debt_index(&self, id: &str) -> LedgerResult<usize> {
        self.debts
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| LedgerError::not_found("debt", id))
    }

    /// Records a debt. With `update_wallet`, the cash movement is booked too:
    /// borrowing is income into the wallet, lending is an expense out of it.
    pub fn add_debt(&mut self, mut debt: Debt, update_wallet: bool, date: NaiveDate) -> LedgerResult<String> {
        validate_debt(&debt)?;
        let mut movement = None;
        if update_wallet {
            let target = match debt.wallet_id.as_deref() {
                Some(wid) => self.wallet(wid)?.id.clone(),
                None => self
                    .default_wallet_id()
                    .map(str::to_string)
                    .ok_or_else(|| LedgerError::not_found("wallet", "default"))?,
            };
            let (kind, category, description) = match debt.kind {
                DebtType::Borrowed => (
                    TransactionType::Income,
                    "Debt_Inc",
                    format!("Borrowed from {}", debt.person_name),
                ),
                DebtType::Lent => (
                    TransactionType::Expense,
                    "Debt_Exp",
                    format!("Lent to {}", debt.person_name),
                ),
            };
            movement = Some(
                Transaction::new(kind, debt.amount, category, date)
                    .with_wallet(target.clone())
                    .with_description(description)
                    .with_contact(Some(debt.person_name.clone())),
            );
            debt.wallet_id = Some(target);
        }

        self.remember_contact(&debt.person_name, None);
        let id = debt.id.clone();
        log::info!("recorded {} debt {} with {}", debt.kind, debt.amount, debt.person_name);
        self.debts.insert(0, debt);
        if let Some(tx) = movement {
            self.transactions.insert(0, tx);
        }
        self.reconcile();
        Ok(id)
    }

    /// Replaces a debt record wholesale.
    pub fn update_debt(&mut self, debt: Debt) -> LedgerResult<()> {
        validate_debt(&debt)?;
        let idx = self.debt_index(&debt.id)?;
        log::info!("updated debt {} with {}", debt.id, debt.person_name);
        self.remember_contact(&debt.person_name, None);
        self.debts[idx] = debt;
        self.reconcile();
        Ok(())
    }

    pub fn delete_debt(&mut self, id: &str) -> LedgerResult<()> {
        let idx = self.debt_index(id)?;
        self.debts.remove(idx);
        self.reconcile();
        log::info!("deleted debt {}", id);
        Ok(())
    }

    /// Marks a debt as settled through a mediator. Terminal: the outstanding
    /// amount drops to zero and the mediator is noted.
    pub fn settle_via_third_party(&mut self, id: &str, mediator: &str) -> LedgerResult<()> {
        let idx = self.debt_index(id)?;
        let debt = &mut self.debts[idx];
        debt.amount = Decimal::ZERO;
        debt.append_note(&format!("Settled via third party: {}", mediator.trim()));
        log::info!("settled debt {} via {}", id, mediator.trim());
        self.reconcile();
        Ok(())
    }

    /// Re-assigns part of an outstanding debt to a new counterparty.
    ///
    /// The moved amount is `min(amount, outstanding)`. The source keeps the
    /// remainder (possibly zero, kept as an audit record) and a new debt of the
    /// same type is created for `new_person`. Returns the new debt's id.
    pub fn transfer_debt(
        &mut self,
        id: &str,
        new_person: &str,
        amount: Decimal,
        notes: Option<&str>,
        receipt_image: Option<String>,
    ) -> LedgerResult<String> {
        ensure_positive(amount)?;
        let idx = self.debt_index(id)?;
        let moved = amount.min(self.debts[idx].amount);
        if moved.is_zero() {
            log::warn!("debt {} has no outstanding amount to transfer", id);
            return Err(LedgerError::NothingToTransfer(id.to_string()));
        }
        let new_person = new_person.trim().to_string();

        let source = &mut self.debts[idx];
        source.amount -= moved;
        source.append_note(&format!("Transferred {} to {}", moved, new_person));

        let mut origin = format!("Transferred from {}", source.person_name);
        if let Some(extra) = notes.map(str::trim).filter(|n| !n.is_empty()) {
            origin = format!("{} - {}", origin, extra);
        }
        let created = Debt {
            id: new_id(),
            person_name: new_person.clone(),
            amount: moved,
            initial_amount: moved,
            kind: source.kind,
            due_date: source.due_date,
            notes: Some(origin),
            receipt_image: receipt_image.or_else(|| source.receipt_image.clone()),
            wallet_id: None,
        };
        let created_id = created.id.clone();
        log::info!("transferred {} of debt {} to {}", moved, id, new_person);

        self.debts.insert(0, created);
        self.remember_contact(&new_person, None);
        self.reconcile();
        Ok(created_id)
    }

    /// Debts of one type, optionally only outstanding ones, in the given order.
    pub fn sorted_debts(&self, kind: Option<DebtType>, active_only: bool, order: DebtOrder) -> Vec<&Debt> {
        let mut out: Vec<&Debt> = self
            .debts
            .iter()
            .filter(|d| kind.is_none_or(|k| d.kind == k))
            .filter(|d| !active_only || d.is_outstanding())
            .collect();
        out.sort_by(|a, b| match order {
            DebtOrder::AmountDesc => b.amount.cmp(&a.amount),
            DebtOrder::AmountAsc => a.amount.cmp(&b.amount),
            DebtOrder::DueAsc => cmp_due(a.due_date, b.due_date, false),
            DebtOrder::DueDesc => cmp_due(a.due_date, b.due_date, true),
        });
        out
    }

    pub fn total_outstanding(&self, kind: DebtType) -> Decimal {
        crate::reconcile::sum_debts(&self.debts, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{DEBT_WALLET_ID, MAIN_WALLET_ID};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn state_with(person: &str, amount: i64, kind: DebtType) -> (AppState, String) {
        let mut state = AppState::default();
        let id = state
            .add_debt(Debt::new(person, Decimal::from(amount), kind), false, today())
            .unwrap();
        (state, id)
    }

    #[test]
    fn partial_transfer_splits_outstanding_amount() {
        let (mut state, ali) = state_with("Ali", 500, DebtType::Borrowed);
        let sara = state
            .transfer_debt(&ali, "Sara", Decimal::from(200), None, None)
            .unwrap();

        let old = state.debt(&ali).unwrap();
        let new = state.debt(&sara).unwrap();
        assert_eq!(old.amount, Decimal::from(300));
        assert_eq!(new.amount, Decimal::from(200));
        assert_eq!(new.initial_amount, Decimal::from(200));
        assert_eq!(new.kind, DebtType::Borrowed);
        assert_eq!(new.person_name, "Sara");
        assert!(state.contacts.iter().any(|c| c.name == "Sara"));
    }

    #[test]
    fn transfer_is_clamped_to_outstanding_amount() {
        let (mut state, ali) = state_with("Ali", 500, DebtType::Lent);
        let sara = state
            .transfer_debt(&ali, "Sara", Decimal::from(900), Some("by phone"), Some("img".into()))
            .unwrap();
        let old = state.debt(&ali).unwrap();
        let new = state.debt(&sara).unwrap();
        assert_eq!(old.amount, Decimal::ZERO);
        assert_eq!(new.amount, Decimal::from(500));
        assert_eq!(new.receipt_image.as_deref(), Some("img"));
        assert_eq!(new.notes.as_deref(), Some("Transferred from Ali - by phone"));
        // zero-balance source stays on record
        assert_eq!(state.debts.len(), 2);
        assert_eq!(
            state.transfer_debt(&ali, "Omar", Decimal::ONE, None, None).unwrap_err().to_string(),
            format!("Debt '{}' has nothing left to transfer", ali)
        );
    }

    #[test]
    fn transfer_keeps_debt_wallet_balance() {
        let (mut state, ali) = state_with("Ali", 500, DebtType::Lent);
        let before = state.wallet(DEBT_WALLET_ID).unwrap().balance;
        state
            .transfer_debt(&ali, "Sara", Decimal::from(120), None, None)
            .unwrap();
        assert_eq!(state.wallet(DEBT_WALLET_ID).unwrap().balance, before);
    }

    #[test]
    fn settlement_zeroes_amount_and_is_repeatable() {
        let (mut state, ali) = state_with("Ali", 250, DebtType::Lent);
        state.settle_via_third_party(&ali, "Khaled").unwrap();
        state.settle_via_third_party(&ali, "Khaled").unwrap();
        let debt = state.debt(&ali).unwrap();
        assert_eq!(debt.amount, Decimal::ZERO);
        assert!(debt.notes.as_deref().unwrap().contains("Khaled"));
        assert_eq!(state.wallet(DEBT_WALLET_ID).unwrap().balance, Decimal::ZERO);
    }

    #[test]
    fn booking_debt_in_wallet_moves_cash() {
        let mut state = AppState::default();
        state
            .add_debt(Debt::new("Ali", Decimal::from(80), DebtType::Borrowed), true, today())
            .unwrap();
        state
            .add_debt(Debt::new("Sara", Decimal::from(30), DebtType::Lent), true, today())
            .unwrap();
        assert_eq!(state.wallet(MAIN_WALLET_ID).unwrap().balance, Decimal::from(50));
        assert_eq!(state.wallet(DEBT_WALLET_ID).unwrap().balance, Decimal::from(-50));
        assert_eq!(state.debts[0].wallet_id.as_deref(), Some(MAIN_WALLET_ID));
    }

    #[test]
    fn outstanding_above_initial_is_rejected() {
        let mut state = AppState::default();
        let mut debt = Debt::new("Ali", Decimal::from(10), DebtType::Lent);
        debt.amount = Decimal::from(11);
        assert!(matches!(
            state.add_debt(debt, false, today()),
            Err(LedgerError::AmountAboveInitial { .. })
        ));
        assert!(state.debts.is_empty());
    }

    #[test]
    fn due_date_order_puts_undated_last() {
        let mut state = AppState::default();
        for (name, due) in [("a", None), ("b", Some(20)), ("c", Some(5))] {
            let mut d = Debt::new(name, Decimal::ONE, DebtType::Lent);
            d.due_date = due.map(|day| NaiveDate::from_ymd_opt(2025, 7, day).unwrap());
            state.add_debt(d, false, today()).unwrap();
        }
        let names = |order| -> Vec<String> {
            state
                .sorted_debts(Some(DebtType::Lent), false, order)
                .into_iter()
                .map(|d| d.person_name.clone())
                .collect()
        };
        assert_eq!(names(DebtOrder::DueAsc), ["c", "b", "a"]);
        assert_eq!(names(DebtOrder::DueDesc), ["b", "c", "a"]);
    }

    #[test]
    fn update_keeps_amount_within_initial() {
        let (mut state, id) = state_with("Ali", 400, DebtType::Lent);
        let mut edited = state.debt(&id).unwrap().clone();
        edited.amount = Decimal::from(450);
        assert!(matches!(
            state.update_debt(edited.clone()),
            Err(LedgerError::AmountAboveInitial { .. })
        ));
        assert_eq!(state.debt(&id).unwrap().amount, Decimal::from(400));

        edited.initial_amount = Decimal::from(450);
        state.update_debt(edited).unwrap();
        assert_eq!(state.debt(&id).unwrap().amount, Decimal::from(450));
        assert_eq!(
            state.wallet(DEBT_WALLET_ID).unwrap().balance,
            Decimal::from(450)
        );
    }
}

