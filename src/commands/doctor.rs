// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::models::{ALL_CATEGORIES, SYNTHETIC_MERCHANT};
use crate::taxonomy;
use crate::utils::pretty_table;
use anyhow::Result;
use chrono::Datelike;
use rusqlite::Connection;

/// Issues found in the stored data of `user`, as (kind, detail) pairs.
pub fn check(conn: &Connection, user: &str) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    // 1) Stored rows that cannot be used; saves leave them in place
    let report = db::load_transactions(conn, user)?;
    for (idx, reason) in &report.skipped {
        rows.push(vec!["unusable_row".into(), format!("row {}: {}", idx, reason)]);
    }

    // 2) Budgets on categories no transaction form can produce
    for cat in db::load_budgets(conn, user)?.keys() {
        if cat != ALL_CATEGORIES && !taxonomy::is_known(cat) {
            rows.push(vec!["budget_unknown_category".into(), cat.clone()]);
        }
    }

    // 3) Categories outside the taxonomy; they never count as fixed spend
    let mut unknown: Vec<&str> = report
        .transactions
        .iter()
        .map(|t| t.category.as_str())
        .filter(|c| !taxonomy::is_known(c))
        .collect();
    unknown.sort_unstable();
    unknown.dedup();
    for c in unknown {
        rows.push(vec!["txn_unknown_category".into(), c.to_string()]);
    }
    // 4) Reserved merchant on rows the budget sheet import cannot have made
    for t in report.transactions.iter().filter(|t| t.is_synthetic()) {
        if t.date.day() != 1 || !t.notes.is_empty() {
            rows.push(vec![
                "reserved_merchant".into(),
                format!("{} on {} ({})", SYNTHETIC_MERCHANT, t.date, t.id),
            ]);
        }
    }
    Ok(rows)
}

pub fn handle(conn: &Connection, user: &str) -> Result<()> {
    let rows = check(conn, user)?;
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
