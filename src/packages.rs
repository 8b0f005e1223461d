// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Telecom packages sold out of a credit balance. A fixed catalogue of
//! carrier bundles ships with the ledger; users add their own on top.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{TelecomPackage, new_id};
use crate::state::{AppState, ensure_non_negative, ensure_positive};

fn builtin(id: &str, provider: &str, name: &str, cost: i64, price: i64, description: &str) -> TelecomPackage {
    TelecomPackage {
        id: id.to_string(),
        provider: provider.to_string(),
        name: name.to_string(),
        cost: Decimal::from(cost),
        price: Decimal::from(price),
        description: (!description.is_empty()).then(|| description.to_string()),
        is_custom: false,
    }
}

pub static BUILTIN_PACKAGES: Lazy<Vec<TelecomPackage>> = Lazy::new(|| {
    vec![
        builtin("ym_mzaia_monthly", "Yemen Mobile", "Mazaya monthly (4G)", 3000, 3500, "300 min + 2 GB data"),
        builtin("ym_mzaia_weekly", "Yemen Mobile", "Mazaya weekly", 1000, 1200, "100 min + 300 MB"),
        builtin("ym_hadaya_monthly", "Yemen Mobile", "Hadaya monthly", 2000, 2300, "200 min + 400 MB"),
        builtin("ym_hadaya_max", "Yemen Mobile", "Hadaya Max", 4000, 4500, "Double minutes and data"),
        builtin("ym_net_4g_12gb", "Yemen Mobile", "4G data 12 GB", 4400, 4800, "Valid 30 days"),
        builtin("you_mix_300", "You", "Mix 300", 300, 400, "Daily"),
        builtin("you_mix_monthly", "You", "Mix monthly", 3000, 3500, ""),
        builtin("saba_super_yal", "SabaFon", "Super Yal", 2500, 2800, "Minutes to all networks"),
    ]
});

fn is_builtin(id: &str) -> bool {
    BUILTIN_PACKAGES.iter().any(|p| p.id == id)
}

impl AppState {
    /// Built-in packages first, then custom ones. Provider matching ignores case.
    pub fn packages(&self, provider: Option<&str>) -> Vec<&TelecomPackage> {
        BUILTIN_PACKAGES
            .iter()
            .chain(self.custom_packages.iter())
            .filter(|p| provider.is_none_or(|want| p.provider.eq_ignore_ascii_case(want.trim())))
            .collect()
    }

    pub fn package(&self, id: &str) -> LedgerResult<&TelecomPackage> {
        BUILTIN_PACKAGES
            .iter()
            .chain(self.custom_packages.iter())
            .find(|p| p.id == id)
            .ok_or_else(|| LedgerError::not_found("package", id))
    }

    pub fn add_package(&mut self, mut pkg: TelecomPackage) -> LedgerResult<String> {
        ensure_positive(pkg.cost)?;
        ensure_non_negative(pkg.price)?;
        if pkg.id.trim().is_empty() || self.package(&pkg.id).is_ok() {
            pkg.id = new_id();
        }
        pkg.is_custom = true;
        let id = pkg.id.clone();
        log::info!("added package {} / {}", pkg.provider, pkg.name);
        self.custom_packages.push(pkg);
        Ok(id)
    }

    pub fn delete_package(&mut self, id: &str) -> LedgerResult<()> {
        if is_builtin(id) {
            log::warn!("refused to delete built-in package {}", id);
            return Err(LedgerError::BuiltinPackage(id.to_string()));
        }
        self.package(id)?;
        self.custom_packages.retain(|p| p.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Investment, InvestmentKind};
    use chrono::NaiveDate;

    fn credit(state: &mut AppState) -> String {
        let inv = Investment {
            id: String::new(),
            asset_name: "Yemen Mobile credit".into(),
            kind: InvestmentKind::Commodity,
            quantity: Decimal::from(5000),
            avg_buy_price: Decimal::ONE,
            current_price: Decimal::ONE,
        };
        let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        state.add_investment(inv, false, day).unwrap()
    }

    #[test]
    fn catalogue_package_can_be_sold() {
        let mut state = AppState::default();
        let inv = credit(&mut state);
        let day = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();

        let outcome = state
            .sell_package(&inv, "ym_mzaia_monthly", false, None, day)
            .unwrap();
        assert_eq!(outcome.realized_profit, Decimal::from(500));
        assert_eq!(state.investment(&inv).unwrap().quantity, Decimal::from(2000));
        assert_eq!(state.transactions[0].amount, Decimal::from(3500));
    }

    #[test]
    fn listing_merges_catalogue_and_custom_packages() {
        let mut state = AppState::default();
        let custom = TelecomPackage {
            id: String::new(),
            provider: "You".into(),
            name: "Night bundle".into(),
            cost: Decimal::from(150),
            price: Decimal::from(200),
            description: None,
            is_custom: false,
        };
        let id = state.add_package(custom).unwrap();

        assert_eq!(state.packages(None).len(), BUILTIN_PACKAGES.len() + 1);
        let you: Vec<&str> = state.packages(Some("you")).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(you, vec!["you_mix_300", "you_mix_monthly", id.as_str()]);
        assert!(state.package(&id).unwrap().is_custom);
    }

    #[test]
    fn catalogue_packages_cannot_be_removed() {
        let mut state = AppState::default();
        assert!(matches!(
            state.delete_package("saba_super_yal"),
            Err(LedgerError::BuiltinPackage(_))
        ));
        assert!(state.package("saba_super_yal").is_ok());
        assert!(matches!(
            state.delete_package("missing"),
            Err(LedgerError::NotFound { .. })
        ));
    }

    #[test]
    fn custom_id_never_shadows_catalogue() {
        let mut state = AppState::default();
        let clash = TelecomPackage {
            id: "ym_mzaia_weekly".into(),
            ..builtin("", "Yemen Mobile", "Copy", 10, 12, "")
        };
        let id = state.add_package(clash).unwrap();
        assert_ne!(id, "ym_mzaia_weekly");
        assert_eq!(state.package("ym_mzaia_weekly").unwrap().price, Decimal::from(1200));
    }
}
