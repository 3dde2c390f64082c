// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Wide budget sheet import: rows are categories, columns are "Month Year"
//! headers. Each filled cell becomes one synthetic transaction dated on the
//! first of its month.

use crate::error::SkipReason;
use crate::ingest::parse_amount;
use crate::models::{SYNTHETIC_MERCHANT, Transaction};
use crate::taxonomy;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::path::Path;

const CATEGORY_COL: usize = 2;

const SECTION_LABELS: &[&str] = &["INCOME:", "SPENDING:", "EXPENSES:", "SAVINGS", "TOTAL SAVED"];

static MONTH_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(January|February|March|April|May|June|July|August|September|October|November|December)\s+(\d{4})\b",
    )
    .expect("month header pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixSkip {
    pub row: usize,
    pub col: usize,
    pub reason: SkipReason,
}

#[derive(Debug, Default)]
pub struct MatrixImport {
    pub transactions: Vec<Transaction>,
    pub skipped: Vec<MatrixSkip>,
}

/// Reads a sheet export as a grid of trimmed cells; rows may differ in length.
pub fn read_grid(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path.display()))?;
    let mut grid = Vec::new();
    for rec in rdr.records() {
        let rec = rec.with_context(|| format!("Read CSV {}", path.display()))?;
        grid.push(rec.iter().map(|c| c.trim().to_string()).collect());
    }
    Ok(grid)
}

fn month_of(cell: &str) -> Option<NaiveDate> {
    let caps = MONTH_HEADER.captures(cell)?;
    let label = format!("01 {} {}", &caps[1], &caps[2]);
    NaiveDate::parse_from_str(&label, "%d %B %Y").ok()
}

fn clean_amount(cell: &str) -> String {
    cell.chars()
        .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
        .collect()
}

/// Month columns of the first row that has any, as (column, first day).
fn header(grid: &[Vec<String>]) -> Option<(usize, Vec<(usize, NaiveDate)>)> {
    grid.iter().enumerate().find_map(|(idx, row)| {
        let cols: Vec<(usize, NaiveDate)> = row
            .iter()
            .enumerate()
            .filter_map(|(col, cell)| month_of(cell).map(|d| (col, d)))
            .collect();
        if cols.is_empty() { None } else { Some((idx, cols)) }
    })
}

pub fn parse_matrix(grid: &[Vec<String>]) -> MatrixImport {
    let mut out = MatrixImport::default();
    let Some((header_idx, months)) = header(grid) else {
        tracing::warn!("no month header row found in budget sheet");
        return out;
    };

    for (row_idx, row) in grid.iter().enumerate().skip(header_idx + 1) {
        if row.len() <= CATEGORY_COL {
            continue;
        }
        let category = row[CATEGORY_COL].trim();
        if category.is_empty() || SECTION_LABELS.contains(&category) {
            continue;
        }
        let r#type = taxonomy::infer_type(category);

        for &(col, date) in &months {
            let Some(cell) = row.get(col) else { continue };
            let cleaned = clean_amount(cell);
            if cleaned.is_empty() {
                continue;
            }
            let amount = match parse_amount(&cleaned) {
                Some(a) if a < Decimal::ZERO => Err(SkipReason::NegativeAmount(a)),
                Some(a) => Ok(a),
                None => Err(SkipReason::BadAmount(cell.clone())),
            };
            match amount {
                Ok(amount) => out.transactions.push(Transaction::new(
                    date,
                    amount,
                    r#type,
                    category,
                    SYNTHETIC_MERCHANT,
                    "",
                )),
                Err(reason) => {
                    tracing::warn!(row = row_idx, col, %reason, "skipping budget sheet cell");
                    out.skipped.push(MatrixSkip {
                        row: row_idx,
                        col,
                        reason,
                    });
                }
            }
        }
    }
    tracing::info!(
        imported = out.transactions.len(),
        skipped = out.skipped.len(),
        "parsed budget sheet"
    );
    out
}
