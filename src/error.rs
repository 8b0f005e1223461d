// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Failures raised by ledger operations. A failed operation leaves the state untouched.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error("Unknown {kind} '{value}'")]
    UnknownValue { kind: &'static str, value: String },

    #[error("Amount must not be negative (got {0})")]
    NegativeAmount(Decimal),

    #[error("Amount must be greater than zero (got {0})")]
    InvalidAmount(Decimal),

    #[error("Amount {amount} exceeds the supported maximum of {max}")]
    AmountTooLarge { amount: Decimal, max: Decimal },

    #[error("Outstanding amount {amount} exceeds initial amount {initial}")]
    AmountAboveInitial { amount: Decimal, initial: Decimal },

    #[error("Cannot sell {requested}: only {available} available")]
    Oversell {
        requested: Decimal,
        available: Decimal,
    },

    #[error("Cannot delete the only remaining wallet")]
    LastWallet,

    #[error("Source and destination wallet are the same")]
    SameWallet,

    #[error("Package '{0}' is built in and cannot be removed")]
    BuiltinPackage(String),

    #[error("A credit sale needs a buyer name")]
    MissingBuyer,

    #[error("Debt '{0}' has nothing left to transfer")]
    NothingToTransfer(String),

    #[error("Zakat is not due: total {total} is below nisab {nisab}")]
    NotEligible { total: Decimal, nisab: Decimal },

    #[error("Import failed: {0}")]
    Import(#[from] serde_json::Error),
}

impl LedgerError {
    pub fn not_found(kind: &'static str, id: &str) -> Self {
        LedgerError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn unknown_value(kind: &'static str, value: &str) -> Self {
        LedgerError::UnknownValue {
            kind,
            value: value.trim().to_string(),
        }
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
