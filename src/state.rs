// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The application state: every collection the ledger owns, plus the named
//! operations that mutate it. Anything touching transactions or debts ends
//! with a full wallet reconciliation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Category, Contact, Currency, Debt, FinancialGoal, Investment, TelecomPackage, Theme,
    Transaction, TransactionType, Wallet, WalletType, ZakatSettings, new_id,
};
use crate::reconcile;

pub const MAIN_WALLET_ID: &str = "main";
pub const DEBT_WALLET_ID: &str = "debt_ledger";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub transactions: Vec<Transaction>,
    pub debts: Vec<Debt>,
    pub investments: Vec<Investment>,
    pub wallets: Vec<Wallet>,
    pub categories: Vec<Category>,
    pub contacts: Vec<Contact>,
    pub custom_packages: Vec<TelecomPackage>,
    pub goals: Vec<FinancialGoal>,
    pub zakat_settings: ZakatSettings,
    pub theme: Theme,
    pub currency: Currency,
    pub default_transaction_type: TransactionType,
}

impl Default for AppState {
    fn default() -> Self {
        let mut state = Self {
            transactions: Vec::new(),
            debts: Vec::new(),
            investments: Vec::new(),
            wallets: Vec::new(),
            categories: initial_categories(),
            contacts: Vec::new(),
            custom_packages: Vec::new(),
            goals: Vec::new(),
            zakat_settings: ZakatSettings::default(),
            theme: Theme::default(),
            currency: Currency::default(),
            default_transaction_type: TransactionType::Expense,
        };
        state.ensure_default_wallets();
        state
    }
}

fn seed(id: &str, label: &str, icon: &str, kind: TransactionType, limit: Option<i64>) -> Category {
    Category {
        icon: Some(icon.to_string()),
        is_default: true,
        budget_limit: limit.map(Decimal::from),
        ..Category::new(id, label, kind)
    }
}

pub fn initial_categories() -> Vec<Category> {
    use TransactionType::{Expense, Income};
    vec![
        seed("Food", "Food & drink", "🍔", Expense, Some(50_000)),
        seed("Transport", "Transport", "🚕", Expense, Some(20_000)),
        seed("Inventory", "Stock / inventory", "📦", Expense, Some(0)),
        seed("Shopping", "Shopping", "🛍️", Expense, Some(30_000)),
        seed("Bills", "Bills", "🧾", Expense, Some(15_000)),
        seed("Health", "Health", "💊", Expense, Some(10_000)),
        seed("Education", "Education", "🎓", Expense, Some(20_000)),
        seed("Zakat", "Zakat & charity", "🤝", Expense, Some(0)),
        seed("Salary", "Salary", "💰", Income, None),
        seed("Investment", "Investment return", "📈", Income, None),
        seed("Trading", "Sales / trading", "🏪", Income, None),
        seed("Debt_Inc", "Borrowing (debt)", "📥", Income, None),
        seed("Debt_Exp", "Lending (debt)", "📤", Expense, None),
        seed("Transfer_Out", "Outgoing transfer", "📤", Expense, None),
        seed("Transfer_In", "Incoming transfer", "📥", Income, None),
        seed("Other_Inc", "Other income", "💵", Income, None),
        seed("Other_Exp", "Other expense", "💸", Expense, None),
    ]
}

/// Partial update for an existing transaction; `None` keeps the current value.
#[derive(Debug, Default, Clone)]
pub struct TransactionPatch {
    pub amount: Option<Decimal>,
    pub kind: Option<TransactionType>,
    pub category_id: Option<String>,
    pub wallet_id: Option<Option<String>>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub is_excluded_from_balance: Option<bool>,
}

fn find_category<'a>(cats: &'a [Category], id: &str) -> Option<&'a Category> {
    for c in cats {
        if c.id == id {
            return Some(c);
        }
        if let Some(found) = find_category(&c.children, id) {
            return Some(found);
        }
    }
    None
}

fn find_category_mut<'a>(cats: &'a mut [Category], id: &str) -> Option<&'a mut Category> {
    for c in cats.iter_mut() {
        if c.id == id {
            return Some(c);
        }
        if let Some(found) = find_category_mut(&mut c.children, id) {
            return Some(found);
        }
    }
    None
}

fn remove_category(cats: &mut Vec<Category>, id: &str) -> bool {
    let before = cats.len();
    cats.retain(|c| c.id != id);
    let mut removed = cats.len() != before;
    for c in cats.iter_mut() {
        removed |= remove_category(&mut c.children, id);
    }
    removed
}

/// Largest amount, quantity or price accepted as input (10^12). Products and
/// sums of bounded values stay far inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

fn ensure_bounded(amount: Decimal) -> LedgerResult<()> {
    if amount > MAX_AMOUNT {
        log::warn!("rejected oversized amount {}", amount);
        return Err(LedgerError::AmountTooLarge {
            amount,
            max: MAX_AMOUNT,
        });
    }
    Ok(())
}

pub(crate) fn ensure_non_negative(amount: Decimal) -> LedgerResult<()> {
    if amount < Decimal::ZERO {
        return Err(LedgerError::NegativeAmount(amount));
    }
    ensure_bounded(amount)
}

pub(crate) fn ensure_positive(amount: Decimal) -> LedgerResult<()> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(amount));
    }
    ensure_bounded(amount)
}

impl AppState {
    // Restored wallets may already use a well-known id with another type.
    fn unused_wallet_id(&self, preferred: &str) -> String {
        if self.wallets.iter().any(|w| w.id == preferred) {
            new_id()
        } else {
            preferred.to_string()
        }
    }

    /// Adds the cash wallet and the debt-ledger wallet when missing.
    pub fn ensure_default_wallets(&mut self) {
        let currency = self.currency.as_str().to_string();
        if !self.wallets.iter().any(|w| w.kind == WalletType::Cash) {
            let id = self.unused_wallet_id(MAIN_WALLET_ID);
            self.wallets.push(Wallet {
                id,
                name: "Cash".into(),
                kind: WalletType::Cash,
                balance: Decimal::ZERO,
                currency: currency.clone(),
                is_hidden: false,
            });
        }
        if !self.wallets.iter().any(|w| w.kind == WalletType::Debt) {
            let id = self.unused_wallet_id(DEBT_WALLET_ID);
            self.wallets.push(Wallet {
                id,
                name: "Debt ledger".into(),
                kind: WalletType::Debt,
                balance: Decimal::ZERO,
                currency,
                is_hidden: false,
            });
        }
    }

    pub fn reconcile(&mut self) {
        reconcile::reconcile_wallets(&mut self.wallets, &self.transactions, &self.debts);
    }

    pub fn default_wallet_id(&self) -> Option<&str> {
        reconcile::default_wallet_id(&self.wallets)
    }

    pub fn wallet(&self, id: &str) -> LedgerResult<&Wallet> {
        self.wallets
            .iter()
            .find(|w| w.id == id)
            .ok_or_else(|| LedgerError::not_found("wallet", id))
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        find_category(&self.categories, id)
    }

    /// Id of the first category in `preferred` that exists, else the first
    /// top-level category of `kind`.
    pub fn pick_category(&self, preferred: &[&str], kind: TransactionType) -> String {
        preferred
            .iter()
            .find(|id| self.category(id).is_some())
            .map(|id| id.to_string())
            .or_else(|| {
                self.categories
                    .iter()
                    .find(|c| c.kind == kind)
                    .map(|c| c.id.clone())
            })
            .unwrap_or_else(|| preferred.first().copied().unwrap_or("Other").to_string())
    }

    /// Records a contact by name unless one already exists.
    pub fn remember_contact(&mut self, name: &str, phone: Option<String>) {
        let name = name.trim();
        if name.is_empty() || self.contacts.iter().any(|c| c.name == name) {
            return;
        }
        self.contacts.push(Contact {
            id: new_id(),
            name: name.to_string(),
            phone,
        });
        log::info!("added contact '{}'", name);
    }

    // --- transactions ---

    fn validate_transaction(&self, tx: &Transaction) -> LedgerResult<()> {
        ensure_non_negative(tx.amount)?;
        if let Some(wid) = tx.wallet_id.as_deref() {
            self.wallet(wid)?;
        }
        Ok(())
    }

    pub fn add_transaction(&mut self, tx: Transaction) -> LedgerResult<String> {
        self.validate_transaction(&tx)?;
        if let Some(contact) = tx.contact_name.clone() {
            self.remember_contact(&contact, None);
        }
        let id = tx.id.clone();
        log::info!("recorded {} {} ({})", tx.kind, tx.amount, tx.category_id);
        self.transactions.insert(0, tx);
        self.reconcile();
        Ok(id)
    }

    pub fn update_transaction(&mut self, id: &str, patch: TransactionPatch) -> LedgerResult<()> {
        let idx = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| LedgerError::not_found("transaction", id))?;
        let mut tx = self.transactions[idx].clone();
        if let Some(v) = patch.amount {
            tx.amount = v;
        }
        if let Some(v) = patch.kind {
            tx.kind = v;
        }
        if let Some(v) = patch.category_id {
            if self.category(&v).is_none() {
                return Err(LedgerError::not_found("category", &v));
            }
            tx.category_id = v;
        }
        if let Some(v) = patch.wallet_id {
            tx.wallet_id = v;
        }
        if let Some(v) = patch.date {
            tx.date = v;
        }
        if let Some(v) = patch.description {
            tx.description = v;
        }
        if let Some(v) = patch.is_excluded_from_balance {
            tx.is_excluded_from_balance = v;
        }
        self.validate_transaction(&tx)?;
        self.transactions[idx] = tx;
        self.reconcile();
        log::info!("updated transaction {}", id);
        Ok(())
    }

    pub fn delete_transaction(&mut self, id: &str) -> LedgerResult<Transaction> {
        let idx = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| LedgerError::not_found("transaction", id))?;
        let removed = self.transactions.remove(idx);
        self.reconcile();
        log::info!("deleted transaction {}", id);
        Ok(removed)
    }

    // --- wallets ---

    pub fn add_wallet(&mut self, name: &str, kind: WalletType, currency: &str) -> String {
        let id = new_id();
        self.wallets.push(Wallet {
            id: id.clone(),
            name: name.trim().to_string(),
            kind,
            balance: Decimal::ZERO,
            currency: currency.trim().to_uppercase(),
            is_hidden: false,
        });
        self.reconcile();
        log::info!("added wallet '{}' ({})", name, kind);
        id
    }

    pub fn delete_wallet(&mut self, id: &str) -> LedgerResult<()> {
        self.wallet(id)?;
        if self.wallets.len() <= 1 {
            log::warn!("refused to delete last wallet {}", id);
            return Err(LedgerError::LastWallet);
        }
        self.wallets.retain(|w| w.id != id);
        self.reconcile();
        log::info!("deleted wallet {}", id);
        Ok(())
    }

    pub fn toggle_wallet_visibility(&mut self, id: &str) -> LedgerResult<bool> {
        let wallet = self
            .wallets
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| LedgerError::not_found("wallet", id))?;
        wallet.is_hidden = !wallet.is_hidden;
        Ok(wallet.is_hidden)
    }

    /// Moves money between wallets as a paired expense/income.
    pub fn transfer_balance(
        &mut self,
        from: &str,
        to: &str,
        amount: Decimal,
        date: NaiveDate,
    ) -> LedgerResult<()> {
        ensure_positive(amount)?;
        if from == to {
            return Err(LedgerError::SameWallet);
        }
        let from_name = self.wallet(from)?.name.clone();
        let to_name = self.wallet(to)?.name.clone();
        let out_cat = self.pick_category(&["Transfer_Out", "Other_Exp"], TransactionType::Expense);
        let in_cat = self.pick_category(&["Transfer_In", "Other_Inc"], TransactionType::Income);

        let outgoing = Transaction::new(TransactionType::Expense, amount, out_cat, date)
            .with_wallet(from)
            .with_description(format!("Transfer to {}", to_name));
        let incoming = Transaction::new(TransactionType::Income, amount, in_cat, date)
            .with_wallet(to)
            .with_description(format!("Transfer from {}", from_name));
        self.transactions.insert(0, incoming);
        self.transactions.insert(0, outgoing);
        self.reconcile();
        log::info!("transferred {} from {} to {}", amount, from_name, to_name);
        Ok(())
    }

    /// Sum of balances over wallets that are not hidden.
    pub fn visible_total(&self) -> Decimal {
        self.wallets
            .iter()
            .filter(|w| !w.is_hidden)
            .map(|w| w.balance)
            .sum()
    }

    // --- categories ---

    pub fn add_category(&mut self, mut category: Category, parent: Option<&str>) -> LedgerResult<String> {
        if let Some(v) = category.budget_limit {
            ensure_non_negative(v)?;
        }
        if category.id.trim().is_empty() {
            category.id = new_id();
        }
        let id = category.id.clone();
        match parent {
            Some(pid) => {
                let parent = find_category_mut(&mut self.categories, pid)
                    .ok_or_else(|| LedgerError::not_found("category", pid))?;
                parent.children.push(category);
            }
            None => self.categories.push(category),
        }
        log::info!("added category {}", id);
        Ok(id)
    }

    /// Replaces a category in place, wherever it sits in the tree.
    pub fn update_category(&mut self, category: Category) -> LedgerResult<()> {
        if let Some(v) = category.budget_limit {
            ensure_non_negative(v)?;
        }
        let slot = find_category_mut(&mut self.categories, &category.id)
            .ok_or_else(|| LedgerError::not_found("category", &category.id))?;
        log::info!("updated category {}", category.id);
        *slot = category;
        Ok(())
    }

    pub fn set_budget_limit(&mut self, id: &str, limit: Option<Decimal>) -> LedgerResult<()> {
        if let Some(v) = limit {
            ensure_non_negative(v)?;
        }
        let slot = find_category_mut(&mut self.categories, id)
            .ok_or_else(|| LedgerError::not_found("category", id))?;
        slot.budget_limit = limit;
        Ok(())
    }

    /// Removes the category and its subtree.
    pub fn delete_category(&mut self, id: &str) -> LedgerResult<()> {
        if !remove_category(&mut self.categories, id) {
            return Err(LedgerError::not_found("category", id));
        }
        log::info!("deleted category {}", id);
        Ok(())
    }

    // --- goals ---

    pub fn add_goal(
        &mut self,
        name: &str,
        target: Decimal,
        deadline: Option<NaiveDate>,
    ) -> LedgerResult<String> {
        ensure_positive(target)?;
        let id = new_id();
        self.goals.push(FinancialGoal {
            id: id.clone(),
            name: name.trim().to_string(),
            target_amount: target,
            current_amount: Decimal::ZERO,
            deadline,
        });
        Ok(id)
    }

    pub fn record_goal_progress(&mut self, id: &str, amount: Decimal) -> LedgerResult<Decimal> {
        ensure_positive(amount)?;
        let goal = self
            .goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| LedgerError::not_found("goal", id))?;
        goal.current_amount += amount;
        Ok(goal.current_amount)
    }

    pub fn delete_goal(&mut self, id: &str) -> LedgerResult<()> {
        let before = self.goals.len();
        self.goals.retain(|g| g.id != id);
        if self.goals.len() == before {
            return Err(LedgerError::not_found("goal", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, d).unwrap()
    }

    #[test]
    fn default_state_has_cash_and_debt_wallets() {
        let state = AppState::default();
        assert!(state.wallets.iter().any(|w| w.id == MAIN_WALLET_ID));
        assert!(state.wallets.iter().any(|w| w.id == DEBT_WALLET_ID));
        assert_eq!(state.default_wallet_id(), Some(MAIN_WALLET_ID));
    }

    #[test]
    fn add_transaction_rejects_unknown_wallet_and_negative_amount() {
        let mut state = AppState::default();
        let bad_wallet = Transaction::new(TransactionType::Income, Decimal::ONE, "Salary", day(1))
            .with_wallet("nope");
        assert!(matches!(
            state.add_transaction(bad_wallet),
            Err(LedgerError::NotFound { .. })
        ));
        let negative = Transaction::new(TransactionType::Income, Decimal::NEGATIVE_ONE, "Salary", day(1));
        assert!(matches!(
            state.add_transaction(negative),
            Err(LedgerError::NegativeAmount(_))
        ));
        assert!(state.transactions.is_empty());
    }

    #[test]
    fn editing_and_deleting_transactions_rebalances() {
        let mut state = AppState::default();
        let id = state
            .add_transaction(
                Transaction::new(TransactionType::Income, Decimal::from(100), "Salary", day(1))
                    .with_contact(Some("Omar".into())),
            )
            .unwrap();
        assert_eq!(state.wallet(MAIN_WALLET_ID).unwrap().balance, Decimal::from(100));
        assert_eq!(state.contacts.len(), 1);

        let patch = TransactionPatch {
            amount: Some(Decimal::from(40)),
            kind: Some(TransactionType::Expense),
            ..Default::default()
        };
        state.update_transaction(&id, patch).unwrap();
        assert_eq!(state.wallet(MAIN_WALLET_ID).unwrap().balance, Decimal::from(-40));

        state.delete_transaction(&id).unwrap();
        assert_eq!(state.wallet(MAIN_WALLET_ID).unwrap().balance, Decimal::ZERO);
    }

    #[test]
    fn last_wallet_cannot_be_deleted() {
        let mut state = AppState::default();
        state.delete_wallet(DEBT_WALLET_ID).unwrap();
        assert!(matches!(
            state.delete_wallet(MAIN_WALLET_ID),
            Err(LedgerError::LastWallet)
        ));
        assert_eq!(state.wallets.len(), 1);
    }

    #[test]
    fn transfer_between_wallets_conserves_total() {
        let mut state = AppState::default();
        let bank = state.add_wallet("Bank", WalletType::Bank, "yer");
        state
            .add_transaction(Transaction::new(TransactionType::Income, Decimal::from(500), "Salary", day(2)))
            .unwrap();
        state
            .transfer_balance(MAIN_WALLET_ID, &bank, Decimal::from(200), day(3))
            .unwrap();
        assert_eq!(state.wallet(MAIN_WALLET_ID).unwrap().balance, Decimal::from(300));
        assert_eq!(state.wallet(&bank).unwrap().balance, Decimal::from(200));
        assert_eq!(state.transactions[0].category_id, "Transfer_Out");
        assert!(matches!(
            state.transfer_balance(&bank, &bank, Decimal::ONE, day(3)),
            Err(LedgerError::SameWallet)
        ));
    }

    #[test]
    fn hidden_wallets_are_left_out_of_visible_total() {
        let mut state = AppState::default();
        let bank = state.add_wallet("Bank", WalletType::Bank, "YER");
        state
            .add_transaction(
                Transaction::new(TransactionType::Income, Decimal::from(70), "Salary", day(2))
                    .with_wallet(bank.clone()),
            )
            .unwrap();
        assert_eq!(state.visible_total(), Decimal::from(70));
        assert!(state.toggle_wallet_visibility(&bank).unwrap());
        assert_eq!(state.visible_total(), Decimal::ZERO);
    }

    #[test]
    fn subcategories_are_found_and_removed_with_parent() {
        let mut state = AppState::default();
        let child = Category::new("fruits", "Fruits", TransactionType::Expense);
        state.add_category(child, Some("Food")).unwrap();
        assert!(state.category("fruits").is_some());
        state.set_budget_limit("fruits", Some(Decimal::from(900))).unwrap();
        assert_eq!(
            state.category("fruits").unwrap().budget_limit,
            Some(Decimal::from(900))
        );
        state.delete_category("Food").unwrap();
        assert!(state.category("fruits").is_none());
        assert!(state.delete_category("Food").is_err());
    }

    #[test]
    fn goals_accumulate_progress() {
        let mut state = AppState::default();
        let id = state.add_goal("Laptop", Decimal::from(1000), None).unwrap();
        state.record_goal_progress(&id, Decimal::from(250)).unwrap();
        assert_eq!(
            state.record_goal_progress(&id, Decimal::from(100)).unwrap(),
            Decimal::from(350)
        );
        state.delete_goal(&id).unwrap();
        assert!(state.goals.is_empty());
    }

    #[test]
    fn goal_progress_must_be_positive() {
        let mut state = AppState::default();
        let id = state.add_goal("Car", Decimal::from(5000), None).unwrap();
        assert!(matches!(
            state.record_goal_progress(&id, Decimal::from(-20)),
            Err(LedgerError::InvalidAmount(_))
        ));
        assert_eq!(state.goals[0].current_amount, Decimal::ZERO);
    }

    #[test]
    fn editing_to_unknown_category_is_rejected() {
        let mut state = AppState::default();
        let id = state
            .add_transaction(Transaction::new(TransactionType::Expense, Decimal::TEN, "Food", day(4)))
            .unwrap();
        let patch = TransactionPatch {
            category_id: Some("Nope".into()),
            ..Default::default()
        };
        assert!(matches!(
            state.update_transaction(&id, patch),
            Err(LedgerError::NotFound { kind: "category", .. })
        ));
        assert_eq!(state.transactions[0].category_id, "Food");
    }

    #[test]
    fn oversized_amounts_are_rejected_instead_of_overflowing() {
        let mut state = AppState::default();
        state
            .add_transaction(Transaction::new(TransactionType::Income, MAX_AMOUNT, "Salary", day(1)))
            .unwrap();
        state
            .add_transaction(Transaction::new(TransactionType::Income, MAX_AMOUNT, "Salary", day(1)))
            .unwrap();
        assert_eq!(
            state.wallet(MAIN_WALLET_ID).unwrap().balance,
            MAX_AMOUNT * Decimal::TWO
        );

        let huge = Decimal::MAX;
        for _ in 0..2 {
            assert!(matches!(
                state.add_transaction(Transaction::new(TransactionType::Income, huge, "Salary", day(2))),
                Err(LedgerError::AmountTooLarge { .. })
            ));
        }
        assert_eq!(state.transactions.len(), 2);
        assert!(state
            .transfer_balance(MAIN_WALLET_ID, DEBT_WALLET_ID, huge, day(2))
            .is_err());
    }

    #[test]
    fn default_wallets_avoid_taken_ids() {
        let mut state = AppState::default();
        state.wallets = vec![Wallet {
            id: MAIN_WALLET_ID.into(),
            name: "Savings".into(),
            kind: WalletType::Bank,
            balance: Decimal::ZERO,
            currency: "YER".into(),
            is_hidden: false,
        }];
        state.ensure_default_wallets();

        assert_eq!(state.wallets.len(), 3);
        let cash = state.wallets.iter().find(|w| w.kind == WalletType::Cash).unwrap();
        assert_ne!(cash.id, MAIN_WALLET_ID);
        let mut ids: Vec<&str> = state.wallets.iter().map(|w| w.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
        assert_eq!(state.default_wallet_id(), Some(cash.id.as_str()));
    }
}
