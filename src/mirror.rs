// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Best-effort remote copy of entered transactions.
//!
//! The local store is the source of truth: rows are always saved locally
//! first, and a mirror failure only downgrades the outcome to
//! [`SyncOutcome::SavedLocally`].

use crate::cache::TtlCache;
use crate::config::Settings;
use crate::error::MirrorError;
use crate::models::Transaction;
use crate::session::Session;
use crate::store;
use crate::utils::http_client;
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;
use std::time::{Duration, Instant};

/// One appended row, in sheet column order.
#[derive(Debug, Clone, Serialize)]
pub struct MirrorRow<'a> {
    pub date: String,
    pub amount: String,
    pub r#type: &'a str,
    pub category: &'a str,
    pub merchant: &'a str,
    pub notes: &'a str,
    pub user: &'a str,
}

impl<'a> MirrorRow<'a> {
    pub fn new(tx: &'a Transaction, user: &'a str) -> Self {
        Self {
            date: tx.date.to_string(),
            amount: tx.amount.to_string(),
            r#type: tx.r#type.as_str(),
            category: &tx.category,
            merchant: &tx.merchant,
            notes: &tx.notes,
            user,
        }
    }
}

pub trait Mirror {
    fn append(&self, tx: &Transaction, user: &str) -> Result<(), MirrorError>;

    /// The remote budget sheet as a grid of cells.
    fn fetch_matrix(&self) -> Result<Vec<Vec<String>>, MirrorError>;
}

pub struct HttpMirror {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpMirror {
    pub fn new(url: &str) -> Result<Self> {
        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            client: http_client()?,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Option<Self>> {
        match settings.mirror_url.as_deref() {
            Some(url) => Ok(Some(Self::new(url)?)),
            None => Ok(None),
        }
    }
}

impl Mirror for HttpMirror {
    fn append(&self, tx: &Transaction, user: &str) -> Result<(), MirrorError> {
        let resp = self
            .client
            .post(format!("{}/transactions", self.url))
            .json(&MirrorRow::new(tx, user))
            .send()?;
        if !resp.status().is_success() {
            return Err(MirrorError::Status(resp.status().as_u16()));
        }
        Ok(())
    }

    fn fetch_matrix(&self) -> Result<Vec<Vec<String>>, MirrorError> {
        let resp = self.client.get(format!("{}/matrix", self.url)).send()?;
        if !resp.status().is_success() {
            return Err(MirrorError::Status(resp.status().as_u16()));
        }
        Ok(resp.json()?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SyncOutcome {
    Synced,
    /// Saved locally; the mirror append failed for the given reason.
    SavedLocally(String),
    NotMirrored,
}

pub fn mirror_after_save(
    mirror: Option<&dyn Mirror>,
    settings: &Settings,
    tx: &Transaction,
    user: &str,
) -> SyncOutcome {
    let Some(mirror) = mirror.filter(|_| settings.mirrors_user(user)) else {
        return SyncOutcome::NotMirrored;
    };
    match mirror.append(tx, user) {
        Ok(()) => SyncOutcome::Synced,
        Err(err) => {
            tracing::warn!(id = %tx.id, %err, "mirror append failed; kept local copy");
            SyncOutcome::SavedLocally(err.to_string())
        }
    }
}

/// Adds `tx` to the session's collection and saves it, then mirrors it.
pub fn record_transaction(
    conn: &mut Connection,
    session: &mut Session,
    tx: Transaction,
    settings: &Settings,
    mirror: Option<&dyn Mirror>,
) -> Result<SyncOutcome> {
    store::add(&mut session.transactions, tx.clone())?;
    session.save_transactions(conn)?;
    Ok(mirror_after_save(mirror, settings, &tx, &session.user))
}

/// Remote sheet reads, reused until `ttl` has passed.
pub struct MatrixSource<'m> {
    mirror: &'m dyn Mirror,
    ttl: Duration,
    cache: TtlCache<&'static str, Vec<Vec<String>>>,
}

impl<'m> MatrixSource<'m> {
    pub fn new(mirror: &'m dyn Mirror, ttl: Duration) -> Self {
        Self {
            mirror,
            ttl,
            cache: TtlCache::new(),
        }
    }

    pub fn grid(&mut self, now: Instant) -> Result<Vec<Vec<String>>, MirrorError> {
        let mirror = self.mirror;
        self.cache
            .get_or_fetch("matrix", self.ttl, now, || mirror.fetch_matrix())
    }

    pub fn refresh(&mut self) {
        self.cache.clear();
    }
}
