// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::error::{MirrorError, TxError};
use crate::ingest::{RawTransaction, parse_rows};
use crate::matrix::{parse_matrix, read_grid};
use crate::mirror::{HttpMirror, MatrixSource};
use crate::models::Transaction;
use crate::session::Session;
use crate::store;
use crate::utils::today;
use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;
use std::path::Path;
use std::time::Instant;

pub fn handle(conn: &mut Connection, user: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("matrix", sub)) => import_matrix(conn, user, sub),
        Some(("json", sub)) => import_json(conn, user, sub),
        _ => Ok(()),
    }
}

/// Appends `incoming` to the session (or replaces everything with it).
///
/// Sheet rows already stored for the same month and category are replaced
/// by the incoming ones, so importing a sheet twice does not double it.
/// Rows whose id is already stored are skipped. Returns how many rows were
/// added.
pub fn merge(session: &mut Session, incoming: Vec<Transaction>, replace: bool) -> Result<usize> {
    if replace {
        let dropped = store::replace_all(&mut session.transactions, Vec::new())?;
        tracing::info!(dropped, "replacing stored transactions");
    } else {
        let superseded = store::drop_superseded_synthetic(&mut session.transactions, &incoming);
        if superseded > 0 {
            tracing::info!(superseded, "refreshing budget sheet rows");
        }
    }
    let mut added = 0;
    for t in incoming {
        match store::add(&mut session.transactions, t) {
            Ok(()) => added += 1,
            Err(TxError::DuplicateId(id)) => {
                tracing::warn!(%id, "skipping duplicate transaction id");
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(added)
}

fn merge_and_save(
    conn: &mut Connection,
    user: &str,
    incoming: Vec<Transaction>,
    replace: bool,
) -> Result<usize> {
    let mut session = Session::load(conn, user, today())?;
    let added = merge(&mut session, incoming, replace)?;
    session.save_transactions(conn)?;
    Ok(added)
}

fn import_matrix(conn: &mut Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let grid = if sub.get_flag("remote") {
        let settings = Settings::load(conn)?;
        let mirror = HttpMirror::from_settings(&settings)?.ok_or(MirrorError::NotConfigured)?;
        let mut source = MatrixSource::new(&mirror, settings.mirror_ttl);
        source.grid(Instant::now())?
    } else {
        let path = sub
            .get_one::<String>("path")
            .ok_or_else(|| anyhow!("Pass --path <csv> or --remote"))?
            .trim();
        read_grid(Path::new(path))?
    };
    let parsed = parse_matrix(&grid);
    let skipped = parsed.skipped.len();
    let added = merge_and_save(conn, user, parsed.transactions, sub.get_flag("replace"))?;
    println!(
        "Imported {} budget sheet row(s), skipped {} unreadable cell(s)",
        added, skipped
    );
    Ok(())
}

fn import_json(conn: &mut Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let data = std::fs::read_to_string(path).with_context(|| format!("Read {}", path))?;
    let raw: Vec<RawTransaction> =
        serde_json::from_str(&data).with_context(|| format!("Parse JSON {}", path))?;
    let report = parse_rows(&raw);
    let skipped = report.skipped.len();
    let added = merge_and_save(conn, user, report.transactions, sub.get_flag("replace"))?;
    println!(
        "Imported {} transaction(s) from {}, skipped {} unusable row(s)",
        added, path, skipped
    );
    Ok(())
}
