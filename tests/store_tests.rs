// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moneyhub::error::{GoalError, TxError};
use moneyhub::goals;
use moneyhub::models::{Period, SYNTHETIC_MERCHANT, Transaction, TxType};
use moneyhub::store::{self, TxEdit, TxFilter};
use rust_decimal::Decimal;

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn sample() -> Vec<Transaction> {
    vec![
        Transaction::new(date("2025-01-03"), d("12"), TxType::Spending, "Eating Out", "Cafe Roma", ""),
        Transaction::new(date("2025-01-03"), d("40"), TxType::Spending, "Groceries", "Corner Market", ""),
        Transaction::new(date("2025-02-01"), d("1500"), TxType::Expense, "Rent", "Landlord", ""),
        Transaction::new(date("2025-01-01"), d("3000"), TxType::Income, "Paycheck", "", ""),
    ]
}

#[test]
fn add_rejects_negative_amounts() {
    let mut txs = Vec::new();
    let bad = Transaction::new(date("2025-01-01"), d("-1"), TxType::Spending, "Shopping", "", "");
    assert_eq!(store::add(&mut txs, bad), Err(TxError::NegativeAmount(d("-1"))));
    assert!(txs.is_empty());
}

#[test]
fn filter_sorts_newest_first_with_later_entry_winning_ties() {
    let txs = sample();
    let all = store::filter(&txs, &TxFilter::default());
    let amounts: Vec<Decimal> = all.iter().map(|t| t.amount).collect();
    assert_eq!(amounts, vec![d("1500"), d("40"), d("12"), d("3000")]);
}

#[test]
fn filter_combines_criteria() {
    let txs = sample();
    let f = TxFilter {
        period: Some(Period::new(2025, 1).unwrap()),
        r#type: Some(TxType::Spending),
        merchant: Some("roma".into()),
        ..TxFilter::default()
    };
    let out = store::filter(&txs, &f);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].category, "Eating Out");

    let f = TxFilter {
        limit: Some(2),
        ..TxFilter::default()
    };
    assert_eq!(store::filter(&txs, &f).len(), 2);
}

#[test]
fn edit_keeps_id_and_replaces_fields() {
    let mut txs = sample();
    let id = txs[0].id.clone();
    store::edit(
        &mut txs,
        &id,
        TxEdit {
            date: date("2025-01-04"),
            amount: d("14"),
            r#type: TxType::Spending,
            category: "Eating Out".into(),
            merchant: "Cafe Roma".into(),
            notes: "tip".into(),
        },
    )
    .unwrap();
    assert_eq!(txs[0].id, id);
    assert_eq!(txs[0].amount, d("14"));
    assert_eq!(txs[0].notes, "tip");
}

#[test]
fn delete_unknown_id_is_an_error() {
    let mut txs = sample();
    assert_eq!(
        store::delete(&mut txs, "nope").unwrap_err(),
        TxError::NotFound("nope".into())
    );
    let id = txs[1].id.clone();
    assert_eq!(store::delete(&mut txs, &id).unwrap().amount, d("40"));
    assert_eq!(txs.len(), 3);
}

#[test]
fn delete_period_removes_only_that_month() {
    let mut txs = sample();
    let n = store::delete_period(&mut txs, Period::new(2025, 1).unwrap());
    assert_eq!(n, 3);
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].category, "Rent");
}

#[test]
fn available_periods_include_today() {
    let txs = sample();
    let months = store::available_months(&txs, date("2025-04-10"));
    let labels: Vec<String> = months.iter().map(|p| p.to_string()).collect();
    assert_eq!(labels, vec!["2025-04", "2025-02", "2025-01"]);
    assert_eq!(store::available_years(&txs, date("2026-01-01")), vec![2026, 2025]);
}

#[test]
fn goals_validate_and_cap_completion() {
    let mut all = Vec::new();
    assert_eq!(
        goals::create(&mut all, " ", d("10"), Decimal::ZERO).unwrap_err(),
        GoalError::EmptyName
    );
    assert_eq!(
        goals::create(&mut all, "Trip", Decimal::ZERO, Decimal::ZERO).unwrap_err(),
        GoalError::NonPositiveTarget(Decimal::ZERO)
    );
    let g = goals::create(&mut all, "Trip", d("1000"), d("250")).unwrap();
    assert_eq!(g.completion_pct(), d("25"));

    goals::update_current(&mut all, &g.id, d("1500")).unwrap();
    assert_eq!(all[0].completion_pct(), d("100"));
    assert!(goals::update_current(&mut all, &g.id, d("-5")).is_err());

    let gone = goals::delete(&mut all, &g.id).unwrap();
    assert_eq!(gone.name, "Trip");
    assert_eq!(
        goals::delete(&mut all, &g.id).unwrap_err(),
        GoalError::NotFound(g.id.clone())
    );
}

#[test]
fn replace_all_swaps_the_collection() {
    let mut txs = sample();
    let fresh = vec![Transaction::new(date("2025-03-01"), d("5"), TxType::Spending, "Health", "", "")];
    assert_eq!(store::replace_all(&mut txs, fresh.clone()), Ok(4));
    assert_eq!(txs, fresh);

    let bad = vec![Transaction::new(date("2025-03-01"), d("-5"), TxType::Spending, "Health", "", "")];
    assert!(store::replace_all(&mut txs, bad).is_err());
    assert_eq!(txs, fresh);
}

#[test]
fn ids_stay_unique_within_a_store() {
    let mut txs = Vec::new();
    let t = Transaction::new(date("2025-01-01"), d("5"), TxType::Spending, "Health", "", "");
    store::add(&mut txs, t.clone()).unwrap();
    assert_eq!(
        store::add(&mut txs, t.clone()),
        Err(TxError::DuplicateId(t.id.clone()))
    );
    assert_eq!(txs.len(), 1);

    let doubled = vec![t.clone(), t.clone()];
    assert_eq!(
        store::replace_all(&mut txs, doubled),
        Err(TxError::DuplicateId(t.id.clone()))
    );
    assert_eq!(txs, vec![t]);
}

#[test]
fn newer_sheet_rows_supersede_stored_ones() {
    let sheet = |amount: &str| {
        Transaction::new(date("2025-03-01"), d(amount), TxType::Expense, "Rent", SYNTHETIC_MERCHANT, "")
    };
    let typed = Transaction::new(date("2025-03-01"), d("900"), TxType::Expense, "Rent", "Landlord", "");
    let mut txs = vec![sheet("900"), typed.clone()];
    let dropped = store::drop_superseded_synthetic(&mut txs, &[sheet("950")]);
    assert_eq!(dropped, 1);
    assert_eq!(txs, vec![typed]);
}

#[test]
fn goal_completion_survives_tiny_targets() {
    let mut all = Vec::new();
    let g = goals::create(&mut all, "Coffee", d("0.01"), d("1000000000000000000000000000")).unwrap();
    assert_eq!(g.completion_pct(), d("100"));
}
