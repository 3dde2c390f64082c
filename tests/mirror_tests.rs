// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moneyhub::cache::TtlCache;
use moneyhub::config::Settings;
use moneyhub::db;
use moneyhub::error::MirrorError;
use moneyhub::mirror::{MatrixSource, Mirror, SyncOutcome, mirror_after_save, record_transaction};
use moneyhub::models::{Transaction, TxType};
use moneyhub::session::Session;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::cell::{Cell, RefCell};
use std::time::{Duration, Instant};

struct FakeMirror {
    fail: bool,
    appended: RefCell<Vec<(String, String)>>,
    fetches: Cell<usize>,
}

impl FakeMirror {
    fn new(fail: bool) -> Self {
        Self {
            fail,
            appended: RefCell::new(Vec::new()),
            fetches: Cell::new(0),
        }
    }
}

impl Mirror for FakeMirror {
    fn append(&self, tx: &Transaction, user: &str) -> Result<(), MirrorError> {
        if self.fail {
            return Err(MirrorError::Status(503));
        }
        self.appended
            .borrow_mut()
            .push((tx.id.clone(), user.to_string()));
        Ok(())
    }

    fn fetch_matrix(&self) -> Result<Vec<Vec<String>>, MirrorError> {
        self.fetches.set(self.fetches.get() + 1);
        if self.fail {
            return Err(MirrorError::Status(500));
        }
        Ok(vec![vec!["".into(), "".into(), "Rent".into(), "1500".into()]])
    }
}

fn mirrored(user: Option<&str>) -> Settings {
    Settings {
        mirror_url: Some("http://localhost:9".into()),
        mirror_user: user.map(str::to_string),
        ..Settings::default()
    }
}

fn conn() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn sample() -> Transaction {
    Transaction::new(
        NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
        Decimal::new(1250, 2),
        TxType::Spending,
        "Groceries",
        "Corner Market",
        "",
    )
}

#[test]
fn mirror_failure_still_saves_locally() {
    let mut conn = conn();
    let mirror = FakeMirror::new(true);
    let tx = sample();
    let mut session = Session::load(&conn, "ana", tx.date).unwrap();
    let outcome =
        record_transaction(&mut conn, &mut session, tx.clone(), &mirrored(None), Some(&mirror))
            .unwrap();
    assert!(matches!(outcome, SyncOutcome::SavedLocally(reason) if reason.contains("503")));

    let stored = db::load_transactions(&conn, "ana").unwrap().transactions;
    assert_eq!(stored, vec![tx]);
}

#[test]
fn successful_mirror_reports_synced() {
    let mut conn = conn();
    let mirror = FakeMirror::new(false);
    let tx = sample();
    let mut session = Session::load(&conn, "ana", tx.date).unwrap();
    let outcome =
        record_transaction(&mut conn, &mut session, tx.clone(), &mirrored(None), Some(&mirror))
            .unwrap();
    assert_eq!(outcome, SyncOutcome::Synced);
    assert_eq!(mirror.appended.borrow()[0], (tx.id.clone(), "ana".to_string()));

    let again = record_transaction(&mut conn, &mut session, tx, &mirrored(None), Some(&mirror));
    assert!(again.is_err());
    assert_eq!(mirror.appended.borrow().len(), 1);
    assert_eq!(db::load_transactions(&conn, "ana").unwrap().transactions.len(), 1);
}

#[test]
fn only_the_configured_user_is_mirrored() {
    let mirror = FakeMirror::new(false);
    let settings = mirrored(Some("ana"));
    let tx = sample();
    assert_eq!(
        mirror_after_save(Some(&mirror), &settings, &tx, "ben"),
        SyncOutcome::NotMirrored
    );
    assert_eq!(
        mirror_after_save(Some(&mirror), &settings, &tx, "ana"),
        SyncOutcome::Synced
    );
    assert_eq!(
        mirror_after_save(None, &settings, &tx, "ana"),
        SyncOutcome::NotMirrored
    );
    assert_eq!(
        mirror_after_save(Some(&mirror), &Settings::default(), &tx, "ana"),
        SyncOutcome::NotMirrored
    );
}

#[test]
fn matrix_reads_are_cached_until_ttl() {
    let mirror = FakeMirror::new(false);
    let mut source = MatrixSource::new(&mirror, Duration::from_secs(60));
    let t0 = Instant::now();
    source.grid(t0).unwrap();
    source.grid(t0 + Duration::from_secs(30)).unwrap();
    assert_eq!(mirror.fetches.get(), 1);
    source.grid(t0 + Duration::from_secs(61)).unwrap();
    assert_eq!(mirror.fetches.get(), 2);
    source.refresh();
    source.grid(t0 + Duration::from_secs(62)).unwrap();
    assert_eq!(mirror.fetches.get(), 3);
}

#[test]
fn failed_fetch_keeps_stale_entry() {
    let mut cache: TtlCache<&str, u32> = TtlCache::new();
    let t0 = Instant::now();
    let ttl = Duration::from_secs(10);
    assert_eq!(cache.get_or_fetch("k", ttl, t0, || Ok::<_, String>(1)), Ok(1));
    let later = t0 + Duration::from_secs(20);
    assert_eq!(
        cache.get_or_fetch("k", ttl, later, || Err::<u32, _>("down".to_string())),
        Err("down".to_string())
    );
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get_or_fetch("k", ttl, later, || Ok::<_, String>(2)), Ok(2));
    cache.invalidate(&"k");
    assert!(cache.is_empty());
}
