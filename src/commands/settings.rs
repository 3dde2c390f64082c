// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{get_setting, list_settings, set_setting};
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().trim();
            let value = sub.get_one::<String>("value").unwrap();
            set_setting(conn, key, value)?;
            println!("{} = {}", key, value.trim());
        }
        Some(("get", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().trim();
            match get_setting(conn, key)? {
                Some(v) => println!("{}", v),
                None => println!("{} is not set", key),
            }
        }
        Some(("list", _)) => {
            let rows = list_settings(conn)?
                .into_iter()
                .map(|(k, v)| vec![k, v])
                .collect();
            println!("{}", pretty_table(&["Key", "Value"], rows));
        }
        _ => {}
    }
    Ok(())
}
