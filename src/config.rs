// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use rusqlite::{Connection, OptionalExtension, params};
use std::time::Duration;

pub const DEFAULT_USER: &str = "default";
pub const DEFAULT_MIRROR_TTL_SECS: u64 = 300;

pub const KEY_DEFAULT_USER: &str = "default_user";
pub const KEY_MIRROR_URL: &str = "mirror_url";
pub const KEY_MIRROR_USER: &str = "mirror_user";
pub const KEY_MIRROR_TTL: &str = "mirror_ttl_secs";

pub const KNOWN_KEYS: &[&str] = &[KEY_DEFAULT_USER, KEY_MIRROR_URL, KEY_MIRROR_USER, KEY_MIRROR_TTL];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub default_user: Option<String>,
    pub mirror_url: Option<String>,
    /// Only this user's adds are mirrored; `None` mirrors everyone.
    pub mirror_user: Option<String>,
    pub mirror_ttl: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_user: None,
            mirror_url: None,
            mirror_user: None,
            mirror_ttl: Duration::from_secs(DEFAULT_MIRROR_TTL_SECS),
        }
    }
}

impl Settings {
    pub fn load(conn: &Connection) -> Result<Self> {
        let ttl = match get_setting(conn, KEY_MIRROR_TTL)? {
            Some(v) => v
                .parse::<u64>()
                .map_err(|_| anyhow!("Invalid {} '{}', expected seconds", KEY_MIRROR_TTL, v))?,
            None => DEFAULT_MIRROR_TTL_SECS,
        };
        Ok(Self {
            default_user: get_setting(conn, KEY_DEFAULT_USER)?,
            mirror_url: get_setting(conn, KEY_MIRROR_URL)?,
            mirror_user: get_setting(conn, KEY_MIRROR_USER)?,
            mirror_ttl: Duration::from_secs(ttl),
        })
    }

    /// Explicit `--user` wins, then the configured default.
    pub fn resolve_user(&self, cli_user: Option<&str>) -> String {
        cli_user
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .or_else(|| self.default_user.clone())
            .unwrap_or_else(|| DEFAULT_USER.to_string())
    }

    pub fn mirrors_user(&self, user: &str) -> bool {
        self.mirror_url.is_some() && self.mirror_user.as_deref().is_none_or(|u| u == user)
    }
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v.filter(|s| !s.trim().is_empty()))
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    if !KNOWN_KEYS.contains(&key) {
        return Err(anyhow!(
            "Unknown setting '{}', expected one of: {}",
            key,
            KNOWN_KEYS.join(", ")
        ));
    }
    if key == KEY_MIRROR_TTL {
        value
            .trim()
            .parse::<u64>()
            .map_err(|_| anyhow!("Invalid {} '{}', expected seconds", key, value))?;
    }
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value.trim()],
    )?;
    Ok(())
}

pub fn list_settings(conn: &Connection) -> Result<Vec<(String, String)>> {
    let mut stmt = conn.prepare("SELECT key, value FROM settings ORDER BY key")?;
    let rows = stmt.query_map([], |r| Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?)))?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}
