// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::LedgerError;

/// Fresh identifier for records created by the ledger itself.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
        }
    }

    /// Sign applied to an amount of this type when summing a balance.
    pub fn signed(&self, amount: Decimal) -> Decimal {
        match self {
            TransactionType::Income => amount,
            TransactionType::Expense => -amount,
        }
    }
}

impl FromStr for TransactionType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" | "in" => Ok(TransactionType::Income),
            "expense" | "out" => Ok(TransactionType::Expense),
            _ => Err(LedgerError::unknown_value("transaction type", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WalletType {
    Cash,
    Bank,
    Digital,
    Debt,
    Other,
}

impl WalletType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WalletType::Cash => "CASH",
            WalletType::Bank => "BANK",
            WalletType::Digital => "DIGITAL",
            WalletType::Debt => "DEBT",
            WalletType::Other => "OTHER",
        }
    }
}

impl FromStr for WalletType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(WalletType::Cash),
            "bank" => Ok(WalletType::Bank),
            "digital" => Ok(WalletType::Digital),
            "debt" => Ok(WalletType::Debt),
            "other" => Ok(WalletType::Other),
            _ => Err(LedgerError::unknown_value("wallet type", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DebtType {
    /// Money the user gave; someone owes the user.
    Lent,
    /// Money the user took; the user owes someone.
    Borrowed,
}

impl DebtType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebtType::Lent => "LENT",
            DebtType::Borrowed => "BORROWED",
        }
    }
}

impl FromStr for DebtType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lent" => Ok(DebtType::Lent),
            "borrowed" => Ok(DebtType::Borrowed),
            _ => Err(LedgerError::unknown_value("debt type", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvestmentKind {
    Stock,
    Crypto,
    RealEstate,
    Gold,
    Commodity,
    #[default]
    Other,
}

impl InvestmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvestmentKind::Stock => "STOCK",
            InvestmentKind::Crypto => "CRYPTO",
            InvestmentKind::RealEstate => "REAL_ESTATE",
            InvestmentKind::Gold => "GOLD",
            InvestmentKind::Commodity => "COMMODITY",
            InvestmentKind::Other => "OTHER",
        }
    }
}

impl FromStr for InvestmentKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "stock" => Ok(InvestmentKind::Stock),
            "crypto" => Ok(InvestmentKind::Crypto),
            "real_estate" => Ok(InvestmentKind::RealEstate),
            "gold" => Ok(InvestmentKind::Gold),
            "commodity" => Ok(InvestmentKind::Commodity),
            "other" => Ok(InvestmentKind::Other),
            _ => Err(LedgerError::unknown_value("investment type", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NisabType {
    #[default]
    Gold,
    Silver,
}

impl NisabType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NisabType::Gold => "GOLD",
            NisabType::Silver => "SILVER",
        }
    }
}

impl FromStr for NisabType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gold" => Ok(NisabType::Gold),
            "silver" => Ok(NisabType::Silver),
            _ => Err(LedgerError::unknown_value("nisab type", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl FromStr for Theme {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(LedgerError::unknown_value("theme", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Yer,
    Sar,
    Usd,
    Aed,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Yer => "YER",
            Currency::Sar => "SAR",
            Currency::Usd => "USD",
            Currency::Aed => "AED",
        }
    }
}

impl FromStr for Currency {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "YER" => Ok(Currency::Yer),
            "SAR" => Ok(Currency::Sar),
            "USD" => Ok(Currency::Usd),
            "AED" => Ok(Currency::Aed),
            _ => Err(LedgerError::unknown_value("currency", s)),
        }
    }
}

macro_rules! display_via_as_str {
    ($($t:ty),*) => {
        $(impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_via_as_str!(
    TransactionType,
    WalletType,
    DebtType,
    InvestmentKind,
    NisabType,
    Theme,
    Currency
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(rename = "category", alias = "categoryId")]
    pub category_id: String,
    /// `None` means the default cash wallet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_id: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub is_excluded_from_balance: bool,
    /// Realized profit carried by sale income.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_image: Option<String>,
}

impl Transaction {
    pub fn new(
        kind: TransactionType,
        amount: Decimal,
        category_id: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: new_id(),
            amount,
            kind,
            category_id: category_id.into(),
            wallet_id: None,
            date,
            description: String::new(),
            contact_name: None,
            is_excluded_from_balance: false,
            profit: None,
            receipt_image: None,
        }
    }

    pub fn with_wallet(mut self, wallet_id: impl Into<String>) -> Self {
        self.wallet_id = Some(wallet_id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_contact(mut self, contact: Option<String>) -> Self {
        self.contact_name = contact;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: WalletType,
    /// Derived by reconciliation; never trusted as input.
    #[serde(default)]
    pub balance: Decimal,
    pub currency: String,
    #[serde(default)]
    pub is_hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub id: String,
    pub person_name: String,
    /// Outstanding amount, within `[0, initial_amount]`.
    pub amount: Decimal,
    pub initial_amount: Decimal,
    #[serde(rename = "type")]
    pub kind: DebtType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_id: Option<String>,
}

impl Debt {
    pub fn new(person_name: impl Into<String>, amount: Decimal, kind: DebtType) -> Self {
        Self {
            id: new_id(),
            person_name: person_name.into(),
            amount,
            initial_amount: amount,
            kind,
            due_date: None,
            notes: None,
            receipt_image: None,
            wallet_id: None,
        }
    }

    pub fn is_outstanding(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Appends a `|`-separated entry to the notes.
    pub fn append_note(&mut self, entry: &str) {
        self.notes = Some(match self.notes.take().filter(|n| !n.trim().is_empty()) {
            Some(existing) => format!("{} | {}", existing, entry),
            None => entry.to_string(),
        });
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_limit: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Category>,
}

impl Category {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: TransactionType) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: None,
            kind,
            is_default: false,
            budget_limit: None,
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: String,
    pub asset_name: String,
    #[serde(rename = "type", default)]
    pub kind: InvestmentKind,
    pub quantity: Decimal,
    pub avg_buy_price: Decimal,
    pub current_price: Decimal,
}

impl Investment {
    pub fn market_value(&self) -> Decimal {
        self.quantity * self.current_price
    }

    pub fn cost_basis(&self) -> Decimal {
        self.quantity * self.avg_buy_price
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialGoal {
    pub id: String,
    pub name: String,
    pub target_amount: Decimal,
    #[serde(default)]
    pub current_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
}

/// Prepaid bundle sold out of a telecom-credit investment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelecomPackage {
    pub id: String,
    pub provider: String,
    pub name: String,
    /// Units of credit consumed.
    pub cost: Decimal,
    /// Price charged to the buyer.
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_custom: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZakatSettings {
    #[serde(default)]
    pub gold_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub silver_price: Option<Decimal>,
    #[serde(default)]
    pub nisab_type: NisabType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_paid_date: Option<NaiveDate>,
    /// Subtract borrowed amounts from the zakat base.
    #[serde(default)]
    pub deduct_liabilities: bool,
}

impl Default for ZakatSettings {
    fn default() -> Self {
        Self {
            gold_price: Decimal::ZERO,
            silver_price: None,
            nisab_type: NisabType::Gold,
            last_paid_date: None,
            deduct_liabilities: false,
        }
    }
}
