// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ingest::{ParseReport, RawTransaction, parse_row, parse_rows};
use crate::models::{Budgets, Goal, Transaction};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.moneyhub", "MoneyHub", "moneyhub"));

pub const DB_ENV: &str = "MONEYHUB_DB";

pub fn db_path() -> Result<PathBuf> {
    if let Some(p) = std::env::var_os(DB_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("moneyhub.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS transactions(
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        user TEXT NOT NULL,
        id TEXT NOT NULL,
        date TEXT NOT NULL,
        amount TEXT NOT NULL,
        type TEXT NOT NULL,
        category TEXT NOT NULL,
        merchant TEXT NOT NULL DEFAULT '',
        notes TEXT NOT NULL DEFAULT '',
        UNIQUE(user, id)
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_user_date ON transactions(user, date);

    CREATE TABLE IF NOT EXISTS budgets(
        user TEXT NOT NULL,
        category TEXT NOT NULL,
        amount TEXT NOT NULL,
        PRIMARY KEY(user, category)
    );

    CREATE TABLE IF NOT EXISTS goals(
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        user TEXT NOT NULL,
        id TEXT NOT NULL,
        name TEXT NOT NULL,
        target TEXT NOT NULL,
        current TEXT NOT NULL,
        UNIQUE(user, id)
    );
    "#,
    )?;
    Ok(())
}

/// Stored rows of `user` in entry order, keyed by their sqlite sequence.
fn read_rows(conn: &Connection, user: &str) -> Result<Vec<(i64, RawTransaction)>> {
    let mut stmt = conn.prepare(
        "SELECT seq, id, date, amount, type, category, merchant, notes
         FROM transactions WHERE user=?1 ORDER BY seq",
    )?;
    let rows = stmt.query_map(params![user], |r| {
        let seq: i64 = r.get(0)?;
        let id: String = r.get(1)?;
        let date: String = r.get(2)?;
        let amount: String = r.get(3)?;
        let r#type: String = r.get(4)?;
        let category: String = r.get(5)?;
        let merchant: String = r.get(6)?;
        let notes: String = r.get(7)?;
        Ok((
            seq,
            RawTransaction::from_text(
                Some(id.as_str()),
                &date,
                &amount,
                &r#type,
                &category,
                &merchant,
                &notes,
            ),
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// Every usable stored transaction of `user` in entry order; unusable rows
/// are reported in `skipped` and left out.
pub fn load_transactions(conn: &Connection, user: &str) -> Result<ParseReport> {
    let rows = read_rows(conn, user)?;
    Ok(parse_rows(rows.iter().map(|(_, raw)| raw)))
}

/// Replaces the usable transactions of `user` in one sqlite transaction.
///
/// Unusable rows stay stored untouched unless a saved transaction reuses
/// their id.
pub fn save_transactions(conn: &mut Connection, user: &str, txs: &[Transaction]) -> Result<()> {
    let tx = conn.transaction()?;
    let ids: HashSet<&str> = txs.iter().map(|t| t.id.as_str()).collect();
    let stale: Vec<i64> = read_rows(&tx, user)?
        .into_iter()
        .filter(|(_, raw)| {
            parse_row(raw).is_ok() || raw.id_text().is_some_and(|id| ids.contains(id.as_str()))
        })
        .map(|(seq, _)| seq)
        .collect();
    {
        let mut del = tx.prepare("DELETE FROM transactions WHERE seq=?1")?;
        for seq in stale {
            del.execute(params![seq])?;
        }
        let mut stmt = tx.prepare(
            "INSERT INTO transactions(user, id, date, amount, type, category, merchant, notes)
             VALUES (?1,?2,?3,?4,?5,?6,?7,?8)",
        )?;
        for t in txs {
            stmt.execute(params![
                user,
                t.id,
                t.date.to_string(),
                t.amount.to_string(),
                t.r#type.as_str(),
                t.category,
                t.merchant,
                t.notes
            ])
            .with_context(|| format!("Store transaction {}", t.id))?;
        }
    }
    tx.commit()?;
    Ok(())
}

pub fn load_budgets(conn: &Connection, user: &str) -> Result<Budgets> {
    let mut stmt = conn.prepare("SELECT category, amount FROM budgets WHERE user=?1")?;
    let rows = stmt.query_map(params![user], |r| {
        Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?))
    })?;
    let mut out = Budgets::new();
    for row in rows {
        let (cat, amount_s) = row?;
        match amount_s.parse::<Decimal>() {
            Ok(a) => {
                out.insert(cat, a);
            }
            Err(_) => tracing::warn!(category = %cat, amount = %amount_s, "skipping unreadable budget"),
        }
    }
    Ok(out)
}

pub fn save_budgets(conn: &mut Connection, user: &str, budgets: &Budgets) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM budgets WHERE user=?1", params![user])?;
    for (cat, amount) in budgets {
        tx.execute(
            "INSERT INTO budgets(user, category, amount) VALUES (?1,?2,?3)",
            params![user, cat, amount.to_string()],
        )?;
    }
    tx.commit()?;
    Ok(())
}

pub fn load_goals(conn: &Connection, user: &str) -> Result<Vec<Goal>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, target, current FROM goals WHERE user=?1 ORDER BY seq",
    )?;
    let rows = stmt.query_map(params![user], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, name, target_s, current_s) = row?;
        match (target_s.parse::<Decimal>(), current_s.parse::<Decimal>()) {
            (Ok(target_amount), Ok(current_amount)) => out.push(Goal {
                id,
                name,
                target_amount,
                current_amount,
            }),
            _ => tracing::warn!(goal = %id, "skipping goal with unreadable amounts"),
        }
    }
    Ok(out)
}

pub fn save_goals(conn: &mut Connection, user: &str, goals: &[Goal]) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM goals WHERE user=?1", params![user])?;
    for g in goals {
        tx.execute(
            "INSERT INTO goals(user, id, name, target, current) VALUES (?1,?2,?3,?4,?5)",
            params![
                user,
                g.id,
                g.name,
                g.target_amount.to_string(),
                g.current_amount.to_string()
            ],
        )?;
    }
    tx.commit()?;
    Ok(())
}
