// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use pocketbook::{cli, commands, db};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            let state = db::load_state(&conn)?;
            db::save_state(&conn, &state)?;
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("wallet", sub)) => commands::wallets::handle(&conn, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&conn, sub)?,
        Some(("debt", sub)) => commands::debts::handle(&conn, sub)?,
        Some(("invest", sub)) => commands::investments::handle(&conn, sub)?,
        Some(("category", sub)) => commands::categories::handle(&conn, sub)?,
        Some(("contact", sub)) => commands::contacts::handle(&conn, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&conn, sub)?,
        Some(("package", sub)) => commands::packages::handle(&conn, sub)?,
        Some(("zakat", sub)) => commands::zakat::handle(&conn, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&conn, sub)?,
        Some(("insights", sub)) => commands::insights::handle(&conn, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&conn, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        Some(("import", sub)) => commands::importer::handle(&conn, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
