// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

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

fn period_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("month")
            .long("month")
            .help("Month to report, YYYY-MM (default: month of --today)"),
    )
    .arg(
        Arg::new("today")
            .long("today")
            .help("Reference date YYYY-MM-DD (default: system date)"),
    )
}

fn required(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).required(true).help(help)
}

fn optional(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).help(help)
}

pub fn build_cli() -> Command {
    Command::new("moneyhub")
        .about("Personal budgeting dashboard: safe-to-spend, budgets, goals, subscriptions")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("user")
                .long("user")
                .global(true)
                .help("Whose data to use (default: the default_user setting)"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(required("date", "YYYY-MM-DD"))
                        .arg(required("amount", "Non-negative amount"))
                        .arg(required("type", "income|expense|spending"))
                        .arg(required("category", "Category name"))
                        .arg(optional("merchant", "Merchant"))
                        .arg(optional("note", "Free-text note")),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(optional("month", "YYYY-MM"))
                        .arg(optional("category", "Category name"))
                        .arg(optional("type", "income|expense|spending"))
                        .arg(optional("merchant", "Merchant substring"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize))
                                .help("Maximum rows"),
                        ),
                ))
                .subcommand(
                    Command::new("edit")
                        .about("Change fields of a transaction, keeping its id")
                        .arg(required("id", "Transaction id"))
                        .arg(optional("date", "YYYY-MM-DD"))
                        .arg(optional("amount", "Non-negative amount"))
                        .arg(optional("type", "income|expense|spending"))
                        .arg(optional("category", "Category name"))
                        .arg(optional("merchant", "Merchant"))
                        .arg(optional("note", "Free-text note")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(required("id", "Transaction id")),
                )
                .subcommand(
                    Command::new("clear-month")
                        .about("Delete every transaction of a month")
                        .arg(required("month", "YYYY-MM")),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly limits")
                .subcommand_required(true)
                .subcommand(
                    Command::new("set")
                        .about("Add or replace a category limit")
                        .arg(required("category", "Category name or All"))
                        .arg(required("amount", "Monthly limit")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove a category limit")
                        .arg(required("category", "Category name or All")),
                )
                .subcommand(json_args(Command::new("list").about("List limits")))
                .subcommand(json_args(period_args(
                    Command::new("status").about("Spend against limits with pace"),
                ))),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Create a goal")
                        .arg(required("name", "Goal name"))
                        .arg(required("target", "Target amount (> 0)"))
                        .arg(optional("current", "Amount already saved (default 0)")),
                )
                .subcommand(
                    Command::new("update")
                        .about("Set the saved amount of a goal")
                        .arg(required("id", "Goal id"))
                        .arg(required("current", "Amount saved")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a goal")
                        .arg(required("id", "Goal id")),
                )
                .subcommand(json_args(Command::new("list").about("List goals"))),
        )
        .subcommand(
            Command::new("report")
                .about("Summaries")
                .subcommand_required(true)
                .subcommand(json_args(period_args(
                    Command::new("month").about("Month snapshot: income, spend, safe-to-spend"),
                )))
                .subcommand(json_args(
                    Command::new("ytd")
                        .about("Year-to-date totals")
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .value_parser(value_parser!(i32))
                                .help("Year (default: year of --today)"),
                        )
                        .arg(optional("today", "Reference date YYYY-MM-DD")),
                ))
                .subcommand(json_args(
                    Command::new("breakdown")
                        .about("Income and expenses per month of a year")
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .value_parser(value_parser!(i32))
                                .help("Year (default: year of --today)"),
                        )
                        .arg(optional("today", "Reference date YYYY-MM-DD")),
                ))
                .subcommand(json_args(period_args(
                    Command::new("by-category").about("Spend per category for a month"),
                ))),
        )
        .subcommand(json_args(
            Command::new("subs").about("Merchants charging in two or more months"),
        ))
        .subcommand(json_args(
            Command::new("categories")
                .about("Known categories")
                .arg(optional("type", "income|expense|spending")),
        ))
        .subcommand(
            Command::new("import")
                .about("Bring data in")
                .subcommand_required(true)
                .subcommand(
                    Command::new("matrix")
                        .about("Budget sheet (months across, categories down)")
                        .arg(optional("path", "CSV export of the sheet"))
                        .arg(
                            Arg::new("remote")
                                .long("remote")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("path")
                                .help("Read the sheet from the configured mirror"),
                        )
                        .arg(
                            Arg::new("replace")
                                .long("replace")
                                .action(ArgAction::SetTrue)
                                .help("Replace stored transactions instead of appending"),
                        ),
                )
                .subcommand(
                    Command::new("json")
                        .about("JSON list of transaction records")
                        .arg(required("path", "JSON file"))
                        .arg(
                            Arg::new("replace")
                                .long("replace")
                                .action(ArgAction::SetTrue)
                                .help("Replace stored transactions instead of appending"),
                        ),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Write data out")
                .subcommand_required(true)
                .subcommand(
                    Command::new("transactions")
                        .about("Export transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv|json"),
                        )
                        .arg(required("out", "Output file")),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Settings")
                .subcommand_required(true)
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                )
                .subcommand(Command::new("get").arg(Arg::new("key").required(true)))
                .subcommand(Command::new("list")),
        )
        .subcommand(Command::new("doctor").about("Check stored data"))
}
