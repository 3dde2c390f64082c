// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moneyhub::models::{SYNTHETIC_MERCHANT, Transaction, TxType};
use moneyhub::recurring::{detect, recurring_total};
use rust_decimal::Decimal;

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn charge(day: &str, amount: &str, merchant: &str) -> Transaction {
    Transaction::new(
        NaiveDate::parse_from_str(day, "%Y-%m-%d").unwrap(),
        d(amount),
        TxType::Spending,
        "Subscriptions",
        merchant,
        "",
    )
}

#[test]
fn merchant_in_two_months_is_recurring() {
    let txs = vec![
        charge("2025-01-15", "15.99", "Netflix"),
        charge("2025-02-15", "15.99", "Netflix"),
        charge("2025-02-20", "4.50", "Bakery"),
    ];
    let found = detect(&txs);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].merchant, "Netflix");
    assert_eq!(found[0].months_seen, 2);
    assert_eq!(found[0].avg_amount, d("15.99"));
}

#[test]
fn average_spans_every_occurrence() {
    let txs = vec![
        charge("2025-01-03", "10", "Gym"),
        charge("2025-01-20", "20", "Gym"),
        charge("2025-02-03", "30", "Gym"),
    ];
    let found = detect(&txs);
    assert_eq!(found[0].months_seen, 2);
    assert_eq!(found[0].occurrences, 3);
    assert_eq!(found[0].avg_amount, d("20"));
}

#[test]
fn synthetic_and_blank_merchants_are_ignored() {
    let txs = vec![
        charge("2025-01-01", "100", SYNTHETIC_MERCHANT),
        charge("2025-02-01", "100", SYNTHETIC_MERCHANT),
        charge("2025-01-05", "5", "  "),
        charge("2025-02-05", "5", "  "),
    ];
    assert!(detect(&txs).is_empty());
}

#[test]
fn sorted_by_months_seen_descending() {
    let txs = vec![
        charge("2025-01-01", "9", "Spotify"),
        charge("2025-02-01", "9", "Spotify"),
        charge("2025-01-02", "12", "Phone"),
        charge("2025-02-02", "12", "Phone"),
        charge("2025-03-02", "12", "Phone"),
    ];
    let found = detect(&txs);
    let names: Vec<&str> = found.iter().map(|c| c.merchant.as_str()).collect();
    assert_eq!(names, vec!["Phone", "Spotify"]);
    assert_eq!(recurring_total(&found), d("21"));
}
