// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::SqliteStore;
use crate::store::RecordStore;
use crate::utils::{fmt_money, get_currency, parse_decimal, required};
use anyhow::{anyhow, Result};
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let mut store = SqliteStore::new(conn);
    match m.subcommand() {
        Some(("set", sub)) => {
            let amount = parse_decimal(required(sub, "amount")?)?;
            if amount <= Decimal::ZERO {
                return Err(anyhow!("Initial amount must be greater than zero"));
            }
            store.set_baseline(Some(amount))?;
            tracing::info!(%amount, "baseline set");
            println!("Initial amount set to {}", fmt_money(&amount, &get_currency(conn)?));
        }
        Some(("show", _)) => match store.baseline()? {
            Some(a) => println!("{}", fmt_money(&a, &get_currency(conn)?)),
            None => println!("Initial amount not set"),
        },
        Some(("clear", _)) => {
            store.set_baseline(None)?;
            tracing::info!("baseline cleared");
            println!("Initial amount cleared");
        }
        _ => {}
    }
    Ok(())
}
