// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::metrics::{self, MonthMetrics};
use crate::session::Session;
use crate::utils::{fmt_money, fmt_pct, maybe_print_json, month_from, pretty_table, today_from};
use anyhow::Result;
use chrono::Datelike;
use rusqlite::Connection;

pub fn handle(conn: &Connection, user: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("month", sub)) => month(conn, user, sub)?,
        Some(("ytd", sub)) => ytd(conn, user, sub)?,
        Some(("breakdown", sub)) => breakdown(conn, user, sub)?,
        Some(("by-category", sub)) => by_category(conn, user, sub)?,
        _ => {}
    }
    Ok(())
}

fn year_from(sub: &clap::ArgMatches) -> Result<i32> {
    match sub.get_one::<i32>("year") {
        Some(y) => Ok(*y),
        None => Ok(today_from(sub)?.year()),
    }
}

pub fn month_rows(m: &MonthMetrics) -> Vec<Vec<String>> {
    let row = |k: &str, v: String| vec![k.to_string(), v];
    vec![
        row("Income", fmt_money(&m.income)),
        row("Expenses", fmt_money(&m.expenses)),
        row("Fixed", fmt_money(&m.fixed_spend)),
        row("Flexible", fmt_money(&m.flex_spend)),
        row("Needs", fmt_money(&m.needs)),
        row("Wants", fmt_money(&m.wants)),
        row("Net", fmt_money(&m.net)),
        row("Savings rate", fmt_pct(&m.savings_rate)),
        row("Fixed share of income", fmt_pct(&m.fixed_pct)),
        row("Transactions", m.tx_count.to_string()),
        row("Avg transaction", fmt_money(&m.avg_tx)),
        row("Safe to spend", fmt_money(&m.safe_to_spend)),
        row(
            "Daily budget",
            format!("{} ({} days left)", fmt_money(&m.daily_safe), m.days_remaining),
        ),
        row("Spending pace", format!("{}/day", fmt_money(&m.daily_spend))),
        row("Projected month", fmt_money(&m.projected_month)),
        row(
            "Month elapsed",
            format!(
                "{} (day {} of {})",
                fmt_pct(&m.expected_pct),
                m.day_of_month,
                m.days_in_month
            ),
        ),
    ]
}

fn month(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let today = today_from(sub)?;
    let period = month_from(sub, today)?;
    let session = Session::load(conn, user, today)?;
    let m = session.month_metrics(period);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &m)? {
        println!("{} summary", period.label());
        println!("{}", pretty_table(&["Metric", "Value"], month_rows(&m)));
        match m.overspend() {
            Some(over) => println!("On pace to overspend by {}", fmt_money(&over)),
            None => println!("You're in control."),
        }
    }
    Ok(())
}

fn ytd(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let year = year_from(sub)?;
    let session = Session::load(conn, user, today_from(sub)?)?;
    let y = session.ytd(year);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &y)? {
        let rows = vec![
            vec!["Income".to_string(), fmt_money(&y.income)],
            vec!["Expenses".to_string(), fmt_money(&y.expenses)],
            vec!["Net".to_string(), fmt_money(&y.net)],
            vec!["Savings rate".to_string(), fmt_pct(&y.savings_rate)],
            vec!["Transactions".to_string(), y.tx_count.to_string()],
        ];
        println!("{} year to date", year);
        println!("{}", pretty_table(&["Metric", "Value"], rows));
    }
    Ok(())
}

fn breakdown(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let year = year_from(sub)?;
    let session = Session::load(conn, user, today_from(sub)?)?;
    let data = metrics::monthly_breakdown(&session.transactions, year);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        if data.is_empty() {
            println!("No transactions for {} yet.", year);
            return Ok(());
        }
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.period.to_string(),
                    fmt_money(&r.income),
                    fmt_money(&r.expenses),
                    fmt_money(&r.net),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expenses", "Net"], rows)
        );
    }
    Ok(())
}

fn by_category(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let today = today_from(sub)?;
    let period = month_from(sub, today)?;
    let session = Session::load(conn, user, today)?;
    let data = metrics::spend_by_category(&session.transactions, period);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        if data.is_empty() {
            println!("No expenses in {}", period.label());
            return Ok(());
        }
        let rows = data
            .iter()
            .map(|c| vec![c.category.clone(), fmt_money(&c.amount), c.color.to_string()])
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Spent", "Color"], rows)
        );
    }
    Ok(())
}
