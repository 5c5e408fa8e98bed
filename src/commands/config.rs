// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::SqliteStore;
use crate::store::RecordStore;
use crate::utils::{get_currency, pretty_table, required, set_currency};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let db = conn.path().unwrap_or(":memory:").to_string();
            let baseline = SqliteStore::new(conn)
                .baseline()?
                .map(|b| b.to_string())
                .unwrap_or_else(|| "(not set)".into());
            let rows = vec![
                vec!["database".to_string(), db],
                vec!["currency".to_string(), get_currency(conn)?],
                vec!["initial_amount".to_string(), baseline],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
        Some(("set-currency", sub)) => {
            let ccy = required(sub, "currency")?.to_uppercase();
            set_currency(conn, &ccy)?;
            println!("Currency set to {}", ccy);
        }
        _ => {}
    }
    Ok(())
}
