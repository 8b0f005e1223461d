// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Wallet balances are derived data: every pass recomputes them from the full
//! transaction and debt lists. Stored balances are never read.

use rust_decimal::Decimal;

use crate::models::{Debt, DebtType, Transaction, TransactionType, Wallet, WalletType};

/// Wallet that receives transactions without an explicit `wallet_id`:
/// the first CASH wallet, otherwise the first wallet.
pub fn default_wallet_id(wallets: &[Wallet]) -> Option<&str> {
    wallets
        .iter()
        .find(|w| w.kind == WalletType::Cash)
        .or_else(|| wallets.first())
        .map(|w| w.id.as_str())
}

pub fn sum_by_type(transactions: &[Transaction], kind: TransactionType) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.kind == kind && !t.is_excluded_from_balance)
        .map(|t| t.amount)
        .sum()
}

pub fn sum_debts(debts: &[Debt], kind: DebtType) -> Decimal {
    debts
        .iter()
        .filter(|d| d.kind == kind)
        .map(|d| d.amount)
        .sum()
}

/// Lent minus borrowed across all debts.
pub fn debt_ledger_balance(debts: &[Debt]) -> Decimal {
    sum_debts(debts, DebtType::Lent) - sum_debts(debts, DebtType::Borrowed)
}

/// Recomputes `balance` on every wallet. Only the wallet slice is written.
pub fn reconcile_wallets(wallets: &mut [Wallet], transactions: &[Transaction], debts: &[Debt]) {
    let Some(default_id) = default_wallet_id(wallets).map(str::to_string) else {
        return;
    };
    let debt_balance = debt_ledger_balance(debts);

    for wallet in wallets.iter_mut() {
        if wallet.kind == WalletType::Debt {
            wallet.balance = debt_balance;
            continue;
        }
        wallet.balance = transactions
            .iter()
            .filter(|t| !t.is_excluded_from_balance)
            .filter(|t| t.wallet_id.as_deref().unwrap_or(default_id.as_str()) == wallet.id)
            .map(|t| t.kind.signed(t.amount))
            .sum();
    }
    log::debug!(
        "reconciled {} wallets from {} transactions and {} debts",
        wallets.len(),
        transactions.len(),
        debts.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn wallet(id: &str, kind: WalletType) -> Wallet {
        Wallet {
            id: id.into(),
            name: id.into(),
            kind,
            balance: Decimal::from(999),
            currency: "YER".into(),
            is_hidden: false,
        }
    }

    fn tx(kind: TransactionType, amount: i64, wallet: Option<&str>) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let mut t = Transaction::new(kind, Decimal::from(amount), "Other", date);
        t.wallet_id = wallet.map(str::to_string);
        t
    }

    #[test]
    fn wallet_balance_is_signed_sum_of_its_transactions() {
        let mut wallets = vec![wallet("main", WalletType::Cash)];
        let txs = vec![
            tx(TransactionType::Income, 1000, Some("main")),
            tx(TransactionType::Expense, 300, Some("main")),
        ];
        reconcile_wallets(&mut wallets, &txs, &[]);
        assert_eq!(wallets[0].balance, Decimal::from(700));
    }

    #[test]
    fn unassigned_transactions_land_in_default_cash_wallet() {
        let mut wallets = vec![wallet("bank", WalletType::Bank), wallet("main", WalletType::Cash)];
        let txs = vec![
            tx(TransactionType::Income, 50, None),
            tx(TransactionType::Income, 20, Some("bank")),
        ];
        reconcile_wallets(&mut wallets, &txs, &[]);
        assert_eq!(wallets[0].balance, Decimal::from(20));
        assert_eq!(wallets[1].balance, Decimal::from(50));
    }

    #[test]
    fn excluded_transactions_do_not_move_balances() {
        let mut wallets = vec![wallet("main", WalletType::Cash)];
        let mut skipped = tx(TransactionType::Expense, 400, Some("main"));
        skipped.is_excluded_from_balance = true;
        let txs = vec![tx(TransactionType::Income, 100, Some("main")), skipped];
        reconcile_wallets(&mut wallets, &txs, &[]);
        assert_eq!(wallets[0].balance, Decimal::from(100));
    }

    #[test]
    fn debt_wallet_tracks_lent_minus_borrowed() {
        let mut wallets = vec![
            wallet("main", WalletType::Cash),
            wallet("debt_ledger", WalletType::Debt),
        ];
        let debts = vec![
            Debt::new("Ali", Decimal::from(500), DebtType::Borrowed),
            Debt::new("Sara", Decimal::from(800), DebtType::Lent),
        ];
        // a transaction pointing at the debt wallet is ignored there
        let txs = vec![tx(TransactionType::Income, 10, Some("debt_ledger"))];
        reconcile_wallets(&mut wallets, &txs, &debts);
        assert_eq!(wallets[1].balance, Decimal::from(300));
        assert_eq!(wallets[0].balance, Decimal::ZERO);
    }

    #[test]
    fn default_wallet_falls_back_to_first() {
        let wallets = vec![wallet("bank", WalletType::Bank), wallet("x", WalletType::Other)];
        assert_eq!(default_wallet_id(&wallets), Some("bank"));
        assert_eq!(default_wallet_id(&[]), None);
    }
}
