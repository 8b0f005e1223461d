// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Category, Contact, Currency, Debt, FinancialGoal, Investment, TelecomPackage, Theme,
    Transaction, TransactionType, Wallet, ZakatSettings,
};
use crate::state::{AppState, ensure_non_negative};

/// Backup document. Every field is optional on import; absent ones leave the
/// current value alone and unknown keys are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<Transaction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debts: Option<Vec<Debt>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investments: Option<Vec<Investment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallets: Option<Vec<Wallet>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contacts: Option<Vec<Contact>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_packages: Option<Vec<TelecomPackage>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<FinancialGoal>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zakat_settings: Option<ZakatSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_transaction_type: Option<TransactionType>,
}

impl From<&AppState> for Backup {
    fn from(state: &AppState) -> Self {
        Self {
            transactions: Some(state.transactions.clone()),
            debts: Some(state.debts.clone()),
            investments: Some(state.investments.clone()),
            wallets: Some(state.wallets.clone()),
            categories: Some(state.categories.clone()),
            contacts: Some(state.contacts.clone()),
            custom_packages: Some(state.custom_packages.clone()),
            goals: Some(state.goals.clone()),
            zakat_settings: Some(state.zakat_settings.clone()),
            theme: Some(state.theme),
            currency: Some(state.currency),
            default_transaction_type: Some(state.default_transaction_type),
        }
    }
}

pub fn backup_file_name(date: NaiveDate) -> String {
    format!("pocketbook_backup_{}.json", date.format("%Y-%m-%d"))
}

pub fn export_document(state: &AppState) -> LedgerResult<String> {
    Ok(serde_json::to_string_pretty(&Backup::from(state))?)
}

fn category_limits(cats: &[Category], out: &mut Vec<Decimal>) {
    for c in cats {
        out.extend(c.budget_limit);
        category_limits(&c.children, out);
    }
}

// Amounts in a document are held to the same bounds as typed input.
// Wallet balances are skipped: they are recomputed on restore.
fn check_amounts(doc: &Backup) -> LedgerResult<()> {
    let mut amounts = Vec::new();
    for t in doc.transactions.iter().flatten() {
        amounts.push(t.amount);
    }
    for d in doc.debts.iter().flatten() {
        amounts.extend([d.amount, d.initial_amount]);
    }
    for i in doc.investments.iter().flatten() {
        amounts.extend([i.quantity, i.avg_buy_price, i.current_price]);
    }
    for p in doc.custom_packages.iter().flatten() {
        amounts.extend([p.cost, p.price]);
    }
    for g in doc.goals.iter().flatten() {
        amounts.extend([g.target_amount, g.current_amount]);
    }
    if let Some(z) = &doc.zakat_settings {
        amounts.push(z.gold_price);
        amounts.extend(z.silver_price);
    }
    if let Some(cats) = &doc.categories {
        category_limits(cats, &mut amounts);
    }
    amounts.into_iter().try_for_each(ensure_non_negative)
}

/// Restores a backup over `state`. The document is parsed and checked in
/// full before anything is replaced, so a bad file leaves `state` untouched.
pub fn import_backup(state: &mut AppState, raw: &str) -> LedgerResult<()> {
    let doc: Backup = serde_json::from_str(raw).map_err(|e| {
        log::error!("backup rejected: {}", e);
        LedgerError::Import(e)
    })?;
    check_amounts(&doc)?;

    let mut restored = Vec::new();
    macro_rules! restore {
        ($($field:ident),*) => {
            $(if let Some(v) = doc.$field {
                state.$field = v;
                restored.push(stringify!($field));
            })*
        };
    }
    restore!(
        transactions,
        debts,
        investments,
        wallets,
        categories,
        contacts,
        custom_packages,
        goals,
        zakat_settings,
        theme,
        currency,
        default_transaction_type
    );

    state.ensure_default_wallets();
    state.reconcile();
    log::info!("restored backup keys: {}", restored.join(", "));
    Ok(())
}
