// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::budgets::{self, Pace};
use crate::db;
use crate::session::Session;
use crate::taxonomy;
use crate::utils::{
    fmt_money, fmt_pct, maybe_print_json, month_from, parse_decimal, pretty_table, today,
    today_from,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, user: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, user, sub)?,
        Some(("rm", sub)) => remove(conn, user, sub)?,
        Some(("list", sub)) => list(conn, user, sub)?,
        Some(("status", sub)) => status(conn, user, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &mut Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let cat = sub.get_one::<String>("category").unwrap().trim();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    if !taxonomy::budgetable_categories().contains(&cat) {
        println!("Note: '{}' is not a known expense category", cat);
    }
    let mut session = Session::load(conn, user, today())?;
    let previous = budgets::set_limit(&mut session.budgets, cat, amount)?;
    session.save_budgets(conn)?;
    match previous {
        Some(old) => println!(
            "Budget for {} changed {} -> {}",
            cat,
            fmt_money(&old),
            fmt_money(&amount)
        ),
        None => println!("Budget set for {} = {}", cat, fmt_money(&amount)),
    }
    Ok(())
}

fn remove(conn: &mut Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let cat = sub.get_one::<String>("category").unwrap();
    let mut session = Session::load(conn, user, today())?;
    match budgets::remove_limit(&mut session.budgets, cat) {
        Some(_) => {
            session.save_budgets(conn)?;
            println!("Removed budget for {}", cat.trim());
        }
        None => println!("No budget set for {}", cat.trim()),
    }
    Ok(())
}

fn list(conn: &mut Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let budgets = db::load_budgets(conn, user)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &budgets)? {
        let rows = budgets
            .iter()
            .map(|(c, a)| vec![c.clone(), fmt_money(a)])
            .collect();
        println!("{}", pretty_table(&["Category", "Monthly limit"], rows));
    }
    Ok(())
}

fn status(conn: &mut Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let today = today_from(sub)?;
    let period = month_from(sub, today)?;
    let session = Session::load(conn, user, today)?;
    let report = session.budget_report(period);

    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        if report.is_empty() {
            println!("No budgets set. Add one with `budget set`.");
            return Ok(());
        }
        let rows = report
            .iter()
            .map(|s| {
                let flag = if s.pace == Pace::OnPace { "" } else { s.pace.label() };
                vec![
                    s.category.clone(),
                    fmt_money(&s.spent),
                    fmt_money(&s.limit),
                    fmt_pct(&s.pct),
                    fmt_money(&s.remaining),
                    flag.to_string(),
                ]
            })
            .collect();
        println!("{} budgets", period.label());
        println!(
            "{}",
            pretty_table(
                &["Category", "Spent", "Limit", "Used", "Remaining", "Pace"],
                rows
            )
        );
    }
    Ok(())
}
