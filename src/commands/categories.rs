// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TxType;
use crate::taxonomy::{self, CategoryKind, NeedWant};
use crate::utils::{maybe_print_json, parse_type, pretty_table};
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
struct CategoryRow {
    name: &'static str,
    r#type: TxType,
    group: &'static str,
    color: &'static str,
}

fn group(name: &str) -> &'static str {
    match (taxonomy::kind_of(name), taxonomy::need_want(name)) {
        (Some(CategoryKind::Income), _) => "income",
        (_, Some(NeedWant::Need)) => "need",
        (_, Some(NeedWant::Want)) => "want",
        _ => "",
    }
}

pub fn handle(sub: &clap::ArgMatches) -> Result<()> {
    let types = match sub.get_one::<String>("type") {
        Some(t) => vec![parse_type(t)?],
        None => TxType::ALL.to_vec(),
    };
    let data: Vec<CategoryRow> = types
        .into_iter()
        .flat_map(|ty| {
            taxonomy::categories_for(ty).iter().map(move |&name| CategoryRow {
                name,
                r#type: ty,
                group: group(name),
                color: taxonomy::color_for(name),
            })
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|c| {
                vec![
                    c.name.to_string(),
                    c.r#type.to_string(),
                    c.group.to_string(),
                    c.color.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Type", "Group", "Color"], rows)
        );
    }
    Ok(())
}
