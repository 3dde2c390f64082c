// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::goals;
use crate::session::Session;
use crate::utils::{fmt_money, fmt_pct, maybe_print_json, parse_decimal, pretty_table, today};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &mut Connection, user: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let target = parse_decimal(sub.get_one::<String>("target").unwrap())?;
            let current = match sub.get_one::<String>("current") {
                Some(c) => parse_decimal(c)?,
                None => Decimal::ZERO,
            };
            let mut session = Session::load(conn, user, today())?;
            let goal = goals::create(&mut session.goals, name, target, current)?;
            session.save_goals(conn)?;
            println!(
                "Created goal '{}' ({}) target {}",
                goal.name,
                goal.id,
                fmt_money(&goal.target_amount)
            );
        }
        Some(("update", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            let current = parse_decimal(sub.get_one::<String>("current").unwrap())?;
            let mut session = Session::load(conn, user, today())?;
            goals::update_current(&mut session.goals, id, current)?;
            session.save_goals(conn)?;
            println!("Goal {} now at {}", id, fmt_money(&current));
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            let mut session = Session::load(conn, user, today())?;
            let gone = goals::delete(&mut session.goals, id)?;
            session.save_goals(conn)?;
            println!("Removed goal '{}'", gone.name);
        }
        Some(("list", sub)) => list(conn, user, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct GoalRow {
    id: String,
    name: String,
    target_amount: Decimal,
    current_amount: Decimal,
    completion_pct: Decimal,
}

fn list(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let data: Vec<GoalRow> = db::load_goals(conn, user)?
        .into_iter()
        .map(|g| GoalRow {
            completion_pct: g.completion_pct(),
            id: g.id,
            name: g.name,
            target_amount: g.target_amount,
            current_amount: g.current_amount,
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|g| {
                vec![
                    g.name.clone(),
                    fmt_money(&g.current_amount),
                    fmt_money(&g.target_amount),
                    fmt_pct(&g.completion_pct),
                    g.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Goal", "Saved", "Target", "Done", "ID"], rows)
        );
    }
    Ok(())
}
