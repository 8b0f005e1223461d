// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, ArgGroup, Command, crate_version, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id").long("id").required(true).help("Record id")
}

fn date_arg() -> Arg {
    Arg::new("date")
        .long("date")
        .help("YYYY-MM-DD (default: today)")
}

fn wallet_cmd() -> Command {
    Command::new("wallet")
        .about("Manage wallets")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .default_value("cash")
                        .help("cash|bank|digital|debt|other"),
                )
                .arg(
                    Arg::new("currency")
                        .long("currency")
                        .help("Defaults to the configured currency"),
                ),
        )
        .subcommand(json_args(
            Command::new("list").arg(
                Arg::new("all")
                    .long("all")
                    .action(ArgAction::SetTrue)
                    .help("Include hidden wallets"),
            ),
        ))
        .subcommand(Command::new("rm").arg(id_arg()))
        .subcommand(
            Command::new("hide")
                .about("Toggle whether a wallet counts toward the visible total")
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("transfer")
                .arg(Arg::new("from").long("from").required(true))
                .arg(Arg::new("to").long("to").required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(date_arg()),
        )
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and list transactions")
        .subcommand(
            Command::new("add")
                .arg(
                    Arg::new("type")
                        .long("type")
                        .help("income|expense (default: configured default type)"),
                )
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("wallet").long("wallet"))
                .arg(date_arg())
                .arg(Arg::new("description").long("description"))
                .arg(Arg::new("contact").long("contact"))
                .arg(
                    Arg::new("exclude")
                        .long("exclude")
                        .action(ArgAction::SetTrue)
                        .help("Record without affecting wallet balances"),
                ),
        )
        .subcommand(json_args(
            Command::new("list")
                .arg(Arg::new("month").long("month").help("YYYY-MM"))
                .arg(Arg::new("wallet").long("wallet"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("type").long("type"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(
            Command::new("edit")
                .arg(id_arg())
                .arg(Arg::new("amount").long("amount"))
                .arg(Arg::new("type").long("type"))
                .arg(Arg::new("category").long("category"))
                .arg(
                    Arg::new("wallet")
                        .long("wallet")
                        .help("Wallet id, or 'default' to clear"),
                )
                .arg(date_arg())
                .arg(Arg::new("description").long("description"))
                .arg(
                    Arg::new("exclude")
                        .long("exclude")
                        .value_parser(value_parser!(bool)),
                ),
        )
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn debt_cmd() -> Command {
    Command::new("debt")
        .about("Track money lent and borrowed")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("person").long("person").required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .help("lent|borrowed"),
                )
                .arg(Arg::new("due").long("due").help("Due date YYYY-MM-DD"))
                .arg(Arg::new("notes").long("notes"))
                .arg(Arg::new("wallet").long("wallet"))
                .arg(
                    Arg::new("book")
                        .long("book")
                        .action(ArgAction::SetTrue)
                        .help("Also record the cash movement in a wallet"),
                )
                .arg(date_arg()),
        )
        .subcommand(json_args(
            Command::new("list")
                .arg(Arg::new("type").long("type"))
                .arg(
                    Arg::new("active")
                        .long("active")
                        .action(ArgAction::SetTrue)
                        .help("Only debts with an outstanding amount"),
                )
                .arg(
                    Arg::new("sort")
                        .long("sort")
                        .default_value("amount-desc")
                        .help("amount-desc|amount-asc|due-asc|due-desc"),
                ),
        ))
        .subcommand(
            Command::new("edit")
                .about("Correct a debt record")
                .arg(id_arg())
                .arg(Arg::new("person").long("person"))
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .help("Outstanding amount"),
                )
                .arg(Arg::new("initial").long("initial").help("Initial amount"))
                .arg(Arg::new("type").long("type").help("lent|borrowed"))
                .arg(
                    Arg::new("due")
                        .long("due")
                        .help("Due date YYYY-MM-DD, or 'none' to clear"),
                )
                .arg(Arg::new("notes").long("notes")),
        )
        .subcommand(
            Command::new("settle")
                .about("Settle a debt through a third party")
                .arg(id_arg())
                .arg(Arg::new("via").long("via").required(true)),
        )
        .subcommand(
            Command::new("transfer")
                .about("Move part of a debt to another person")
                .arg(id_arg())
                .arg(Arg::new("to").long("to").required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("notes").long("notes"))
                .arg(Arg::new("receipt").long("receipt")),
        )
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn invest_cmd() -> Command {
    Command::new("invest")
        .about("Holdings and sales")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .default_value("other")
                        .help("stock|crypto|real-estate|gold|commodity|other"),
                )
                .arg(Arg::new("quantity").long("quantity").required(true))
                .arg(Arg::new("buy-price").long("buy-price").required(true))
                .arg(
                    Arg::new("price")
                        .long("price")
                        .help("Current price (default: buy price)"),
                )
                .arg(
                    Arg::new("deduct")
                        .long("deduct")
                        .action(ArgAction::SetTrue)
                        .help("Book the purchase cost as an expense"),
                )
                .arg(date_arg()),
        )
        .subcommand(json_args(Command::new("list")))
        .subcommand(
            Command::new("price")
                .arg(id_arg())
                .arg(Arg::new("price").long("price").required(true)),
        )
        .subcommand(
            Command::new("sell")
                .arg(id_arg())
                .arg(Arg::new("quantity").long("quantity").requires("price"))
                .arg(
                    Arg::new("price")
                        .long("price")
                        .requires("quantity")
                        .help("Total proceeds of the sale"),
                )
                .arg(Arg::new("package").long("package").help("Sell a package id"))
                .group(
                    ArgGroup::new("what")
                        .args(["quantity", "package"])
                        .required(true),
                )
                .arg(
                    Arg::new("credit")
                        .long("credit")
                        .action(ArgAction::SetTrue)
                        .requires("buyer")
                        .help("Sell on credit, opening a debt for the buyer"),
                )
                .arg(Arg::new("buyer").long("buyer"))
                .arg(date_arg()),
        )
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn category_cmd() -> Command {
    Command::new("category")
        .about("Manage categories and budget limits")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("id").long("id"))
                .arg(Arg::new("label").long("label").required(true))
                .arg(Arg::new("type").long("type").default_value("expense"))
                .arg(Arg::new("parent").long("parent"))
                .arg(Arg::new("icon").long("icon"))
                .arg(Arg::new("limit").long("limit")),
        )
        .subcommand(json_args(Command::new("list")))
        .subcommand(
            Command::new("edit")
                .arg(id_arg())
                .arg(Arg::new("label").long("label"))
                .arg(Arg::new("icon").long("icon"))
                .arg(Arg::new("type").long("type").help("income|expense")),
        )
        .subcommand(
            Command::new("budget")
                .about("Set or clear a monthly budget limit")
                .arg(id_arg())
                .arg(Arg::new("limit").long("limit"))
                .arg(
                    Arg::new("clear")
                        .long("clear")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("limit"),
                )
                .group(
                    ArgGroup::new("change")
                        .args(["limit", "clear"])
                        .required(true),
                ),
        )
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn contact_cmd() -> Command {
    Command::new("contact")
        .about("Address book")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("phone").long("phone")),
        )
        .subcommand(json_args(Command::new("list")))
}

fn goal_cmd() -> Command {
    Command::new("goal")
        .about("Savings goals")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("target").long("target").required(true))
                .arg(Arg::new("deadline").long("deadline")),
        )
        .subcommand(
            Command::new("progress")
                .arg(id_arg())
                .arg(Arg::new("amount").long("amount").required(true)),
        )
        .subcommand(json_args(Command::new("list")))
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn package_cmd() -> Command {
    Command::new("package")
        .about("Telecom packages: built-in catalogue plus your own")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("provider").long("provider").required(true))
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("cost")
                        .long("cost")
                        .required(true)
                        .help("Credit units consumed"),
                )
                .arg(
                    Arg::new("price")
                        .long("price")
                        .required(true)
                        .help("Price charged"),
                )
                .arg(Arg::new("description").long("description")),
        )
        .subcommand(json_args(
            Command::new("list").arg(
                Arg::new("provider")
                    .long("provider")
                    .help("Only packages from this provider"),
            ),
        ))
        .subcommand(
            Command::new("rm")
                .about("Remove a custom package")
                .arg(id_arg()),
        )
}

fn zakat_cmd() -> Command {
    Command::new("zakat")
        .about("Zakat base, nisab and payment")
        .subcommand(json_args(Command::new("status")))
        .subcommand(
            Command::new("set")
                .arg(Arg::new("gold-price").long("gold-price"))
                .arg(Arg::new("silver-price").long("silver-price"))
                .arg(Arg::new("nisab").long("nisab").help("gold|silver"))
                .arg(
                    Arg::new("deduct-liabilities")
                        .long("deduct-liabilities")
                        .value_parser(value_parser!(bool)),
                ),
        )
        .subcommand(Command::new("pay").arg(date_arg()))
}

fn export_cmd() -> Command {
    Command::new("export")
        .about("Export data")
        .subcommand(
            Command::new("backup").arg(
                Arg::new("out")
                    .long("out")
                    .help("File path (default: dated file in the current directory)"),
            ),
        )
        .subcommand(
            Command::new("transactions")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("csv")
                        .help("csv|json"),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
}

pub fn build_cli() -> Command {
    Command::new("pocketbook")
        .version(crate_version!())
        .about("Wallets, debts, investments and zakat from the terminal")
        .subcommand(Command::new("init").about("Create the data store"))
        .subcommand(wallet_cmd())
        .subcommand(tx_cmd())
        .subcommand(debt_cmd())
        .subcommand(invest_cmd())
        .subcommand(category_cmd())
        .subcommand(contact_cmd())
        .subcommand(goal_cmd())
        .subcommand(package_cmd())
        .subcommand(zakat_cmd())
        .subcommand(
            Command::new("budget")
                .about("Monthly budget")
                .subcommand(json_args(
                    Command::new("report").arg(
                        Arg::new("month")
                            .long("month")
                            .help("YYYY-MM (default: current month)"),
                    ),
                )),
        )
        .subcommand(json_args(
            Command::new("insights")
                .about("Rule-based alerts and spending trend")
                .arg(date_arg()),
        ))
        .subcommand(
            Command::new("settings")
                .about("Theme, currency and defaults")
                .subcommand(json_args(Command::new("show")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("theme").long("theme").help("light|dark"))
                        .arg(
                            Arg::new("currency")
                                .long("currency")
                                .help("YER|SAR|USD|AED"),
                        )
                        .arg(
                            Arg::new("default-type")
                                .long("default-type")
                                .help("income|expense"),
                        ),
                ),
        )
        .subcommand(export_cmd())
        .subcommand(
            Command::new("import")
                .about("Import data")
                .subcommand(
                    Command::new("backup")
                        .arg(Arg::new("path").long("path").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check the ledger for inconsistencies"))
}
