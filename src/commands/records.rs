// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::SqliteStore;
use crate::error::CapitalError;
use crate::ledger::Ledger;
use crate::models::{MonthKey, Record, RecordType};
use crate::store::RecordStore;
use crate::utils::{
    fmt_signed, maybe_print_json, month_arg, now_millis, optional_decimal, parse_date,
    pretty_table, required,
};
use crate::yields::{self, DailyYield};
use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn kind_arg(sub: &clap::ArgMatches) -> Result<Option<RecordType>> {
    Ok(sub
        .get_one::<String>("kind")
        .map(|s| s.parse::<RecordType>())
        .transpose()?)
}

/// Post-movement balance when only the movement size was given.
fn derive_total(
    ledger: &Ledger,
    date: NaiveDate,
    timestamp: i64,
    kind: RecordType,
    value: Option<Decimal>,
) -> Result<Decimal> {
    let value = match (kind, value) {
        (RecordType::Amount, _) => {
            return Err(anyhow!("--total is required for amount records"));
        }
        (_, Some(v)) => v,
        (_, None) => return Err(anyhow!("--value is required for {} records", kind)),
    };
    let prev = ledger
        .balance_before(date, timestamp)
        .ok_or_else(|| anyhow!("No earlier balance or baseline on record; pass --total"))?;
    Ok(if kind == RecordType::Deposit {
        prev + value
    } else {
        prev - value
    })
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(required(sub, "date")?)?;
    let timestamp = sub
        .get_one::<i64>("timestamp")
        .copied()
        .unwrap_or_else(now_millis);
    let kind = kind_arg(sub)?.unwrap_or(RecordType::Amount);
    let value = optional_decimal(sub, "value")?;

    let mut store = SqliteStore::new(conn);
    let total = match optional_decimal(sub, "total")? {
        Some(t) => t,
        None => derive_total(&store.load_ledger()?, date, timestamp, kind, value)?,
    };
    let record = Record::new(date, timestamp, kind, total, value)?;
    let replaced = store.upsert(record)?;
    tracing::info!(%date, timestamp, kind = %kind, %total, replaced, "record saved");
    println!(
        "{} {} of {} on {} (timestamp {})",
        if replaced { "Replaced" } else { "Recorded" },
        kind,
        total,
        date,
        timestamp
    );
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(required(sub, "date")?)?;
    let timestamp = *sub
        .get_one::<i64>("timestamp")
        .ok_or_else(|| anyhow!("--timestamp is required"))?;

    let mut store = SqliteStore::new(conn);
    let ledger = store.load_ledger()?;
    let existing = ledger
        .get(date, timestamp)
        .ok_or(CapitalError::RecordNotFound { date, timestamp })?;

    let kind = kind_arg(sub)?.unwrap_or(existing.record_type());
    let total = optional_decimal(sub, "total")?.unwrap_or(existing.total());
    let given = optional_decimal(sub, "value")?;
    let value = match kind {
        RecordType::Amount => given,
        _ => given.or(existing.value()),
    };
    let record = Record::new(date, timestamp, kind, total, value)?;
    store.upsert(record)?;
    tracing::info!(%date, timestamp, kind = %kind, %total, "record updated");
    println!("Updated {} on {} (timestamp {})", kind, date, timestamp);
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(required(sub, "date")?)?;
    let mut store = SqliteStore::new(conn);

    let timestamp = match sub.get_one::<i64>("timestamp") {
        Some(ts) => *ts,
        None => {
            let ledger = store.load_ledger()?;
            match ledger.on_date(date) {
                [only] => only.timestamp,
                [] => return Err(anyhow!("No record on {}", date)),
                many => {
                    return Err(CapitalError::AmbiguousRecord {
                        date,
                        count: many.len(),
                    }
                    .into());
                }
            }
        }
    };

    if !store.delete(date, timestamp)? {
        return Err(CapitalError::RecordNotFound { date, timestamp }.into());
    }
    tracing::info!(%date, timestamp, "record deleted");
    println!("Removed record on {} (timestamp {})", date, timestamp);
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct RecordRow {
    pub date: String,
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub total_amount: String,
    pub value: Option<String>,
    pub daily_yield: String,
    pub has_predecessor: bool,
}

impl From<&DailyYield> for RecordRow {
    fn from(d: &DailyYield) -> Self {
        Self {
            date: d.record.date.to_string(),
            timestamp: d.record.timestamp,
            kind: d.record.record_type().to_string(),
            total_amount: format!("{:.2}", d.record.total()),
            value: d.record.value().map(|v| format!("{:.2}", v)),
            daily_yield: format!("{:.2}", d.daily_yield.round_dp(2)),
            has_predecessor: d.has_predecessor,
        }
    }
}

pub fn month_rows(conn: &Connection, month: MonthKey) -> Result<Vec<RecordRow>> {
    let ledger = SqliteStore::new(conn).load_ledger()?;
    Ok(yields::daily_yields(&ledger, month)
        .iter()
        .map(RecordRow::from)
        .collect())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_arg(sub)?;
    let ledger = SqliteStore::new(conn).load_ledger()?;
    let daily = yields::daily_yields(&ledger, month);
    let data: Vec<RecordRow> = daily.iter().map(RecordRow::from).collect();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    if daily.is_empty() {
        println!("No records for {}.", month);
        return Ok(());
    }
    let rows: Vec<Vec<String>> = daily
        .iter()
        .zip(data)
        .map(|(d, r)| {
            let shown = if d.has_predecessor {
                fmt_signed(&d.daily_yield)
            } else {
                "—".to_string()
            };
            vec![
                r.date,
                r.timestamp.to_string(),
                r.kind,
                r.total_amount,
                r.value.unwrap_or_default(),
                shown,
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Date", "Timestamp", "Type", "Total", "Value", "Daily yield"],
            rows,
        )
    );
    println!("{} records in {}", daily.len(), month);
    Ok(())
}
