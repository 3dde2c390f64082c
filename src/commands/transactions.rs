// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::db;
use crate::mirror::{HttpMirror, Mirror, SyncOutcome, record_transaction};
use crate::models::Transaction;
use crate::session::Session;
use crate::store::{self, TxEdit, TxFilter};
use crate::taxonomy;
use crate::utils::{
    fmt_money, maybe_print_json, parse_date, parse_decimal, parse_month, parse_type,
    pretty_table, today,
};
use anyhow::{Result, anyhow};
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &mut Connection, user: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, user, sub)?,
        Some(("list", sub)) => list(conn, user, sub)?,
        Some(("edit", sub)) => edit(conn, user, sub)?,
        Some(("rm", sub)) => remove(conn, user, sub)?,
        Some(("clear-month", sub)) => clear_month(conn, user, sub)?,
        _ => {}
    }
    Ok(())
}

fn text(sub: &clap::ArgMatches, name: &str) -> String {
    sub.get_one::<String>(name)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn add(conn: &mut Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let r#type = parse_type(sub.get_one::<String>("type").unwrap())?;
    let category = text(sub, "category");
    if category.is_empty() {
        return Err(anyhow!("Category cannot be empty"));
    }
    if !taxonomy::is_known(&category) {
        println!("Note: '{}' is not a known category", category);
    }
    let tx = Transaction::new(
        date,
        amount,
        r#type,
        category,
        text(sub, "merchant"),
        text(sub, "note"),
    );

    let settings = Settings::load(conn)?;
    let mirror = HttpMirror::from_settings(&settings)?;
    let summary = format!("{} {} {} on {}", tx.r#type, fmt_money(&tx.amount), tx.category, tx.date);
    let id = tx.id.clone();
    let mut session = Session::load(conn, user, today())?;
    let outcome = record_transaction(
        conn,
        &mut session,
        tx,
        &settings,
        mirror.as_ref().map(|m| m as &dyn Mirror),
    )?;
    match outcome {
        SyncOutcome::Synced => println!("Recorded {} ({}), synced", summary, id),
        SyncOutcome::SavedLocally(reason) => {
            println!("Recorded {} ({}), saved locally only: {}", summary, id, reason)
        }
        SyncOutcome::NotMirrored => println!("Recorded {} ({})", summary, id),
    }
    Ok(())
}

fn list(conn: &mut Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, user, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.r#type.clone(),
                    r.category.clone(),
                    r.merchant.clone(),
                    r.amount.clone(),
                    r.notes.clone(),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Type", "Category", "Merchant", "Amount", "Notes", "ID"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub r#type: String,
    pub category: String,
    pub merchant: String,
    pub amount: String,
    pub notes: String,
}

pub fn query_rows(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let txs = db::load_transactions(conn, user)?.transactions;
    let filter = TxFilter {
        period: sub.get_one::<String>("month").map(|m| parse_month(m)).transpose()?,
        category: sub.get_one::<String>("category").map(|s| s.trim().to_string()),
        r#type: sub.get_one::<String>("type").map(|t| parse_type(t)).transpose()?,
        merchant: sub.get_one::<String>("merchant").map(|s| s.trim().to_string()),
        limit: sub.get_one::<usize>("limit").copied(),
    };
    Ok(store::filter(&txs, &filter)
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id.clone(),
            date: t.date.to_string(),
            r#type: t.r#type.to_string(),
            category: t.category.clone(),
            merchant: t.merchant.clone(),
            amount: fmt_money(&t.amount),
            notes: t.notes.clone(),
        })
        .collect())
}

fn edit(conn: &mut Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let mut session = Session::load(conn, user, today())?;
    let current = session
        .transactions
        .iter()
        .find(|t| t.id == id)
        .ok_or_else(|| anyhow!("Transaction '{}' not found", id))?;

    let change = TxEdit {
        date: match sub.get_one::<String>("date") {
            Some(d) => parse_date(d)?,
            None => current.date,
        },
        amount: match sub.get_one::<String>("amount") {
            Some(a) => parse_decimal(a)?,
            None => current.amount,
        },
        r#type: match sub.get_one::<String>("type") {
            Some(t) => parse_type(t)?,
            None => current.r#type,
        },
        category: sub
            .get_one::<String>("category")
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| current.category.clone()),
        merchant: sub
            .get_one::<String>("merchant")
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| current.merchant.clone()),
        notes: sub
            .get_one::<String>("note")
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| current.notes.clone()),
    };
    store::edit(&mut session.transactions, id, change)?;
    session.save_transactions(conn)?;
    println!("Updated transaction {}", id);
    Ok(())
}

fn remove(conn: &mut Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let mut session = Session::load(conn, user, today())?;
    let gone = store::delete(&mut session.transactions, id)?;
    session.save_transactions(conn)?;
    println!(
        "Removed {} {} on {} ({})",
        gone.category,
        fmt_money(&gone.amount),
        gone.date,
        gone.id
    );
    Ok(())
}

fn clear_month(conn: &mut Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let period = parse_month(sub.get_one::<String>("month").unwrap())?;
    let mut session = Session::load(conn, user, today())?;
    let n = store::delete_period(&mut session.transactions, period);
    session.save_transactions(conn)?;
    println!("Removed {} transaction(s) from {}", n, period.label());
    Ok(())
}
