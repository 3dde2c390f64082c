// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use moneyhub::config::Settings;
use moneyhub::{cli, commands, db, init_tracing};

fn main() -> Result<()> {
    init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut conn = db::open_or_init()?;
    let settings = Settings::load(&conn)?;
    let user = settings.resolve_user(matches.get_one::<String>("user").map(|s| s.as_str()));
    tracing::debug!(%user, "resolved user");

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut conn, &user, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut conn, &user, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&mut conn, &user, sub)?,
        Some(("report", sub)) => commands::reports::handle(&conn, &user, sub)?,
        Some(("subs", sub)) => commands::subs::handle(&conn, &user, sub)?,
        Some(("categories", sub)) => commands::categories::handle(sub)?,
        Some(("import", sub)) => commands::importer::handle(&mut conn, &user, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, &user, sub)?,
        Some(("config", sub)) => commands::settings::handle(&conn, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn, &user)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
