// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, user: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, user, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim();
    let txs = db::load_transactions(conn, user)?.transactions;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id", "date", "amount", "type", "category", "merchant", "notes",
            ])?;
            for t in &txs {
                let date = t.date.to_string();
                let amount = t.amount.to_string();
                wtr.write_record([
                    t.id.as_str(),
                    date.as_str(),
                    amount.as_str(),
                    t.r#type.as_str(),
                    t.category.as_str(),
                    t.merchant.as_str(),
                    t.notes.as_str(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&txs)?)?;
        }
        _ => return Err(anyhow!("Unknown format: {} (use csv|json)", fmt)),
    }
    println!("Exported {} transaction(s) to {}", txs.len(), out);
    Ok(())
}
