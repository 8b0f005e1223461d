// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod backup;
pub mod budget;
pub mod cli;
pub mod commands;
pub mod db;
pub mod debts;
pub mod error;
pub mod insights;
pub mod investments;
pub mod models;
pub mod packages;
pub mod reconcile;
pub mod state;
pub mod utils;
pub mod zakat;
