// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::recurring;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let txs = db::load_transactions(conn, user)?.transactions;
    let subs = recurring::detect(&txs);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &subs)? {
        if subs.is_empty() {
            println!("No recurring charges found.");
            return Ok(());
        }
        let rows = subs
            .iter()
            .map(|s| {
                vec![
                    s.merchant.clone(),
                    s.months_seen.to_string(),
                    fmt_money(&s.avg_amount),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Merchant", "Months seen", "Avg amount"], rows)
        );
        println!(
            "Estimated monthly total: {}",
            fmt_money(&recurring::recurring_total(&subs))
        );
    }
    Ok(())
}
