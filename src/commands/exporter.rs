// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::SqliteStore;
use crate::document::UserDocument;
use crate::store::RecordStore;
use crate::utils::required;
use anyhow::{anyhow, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("document", sub)) => export_document(conn, sub),
        _ => Ok(()),
    }
}

fn export_document(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = required(sub, "format")?.to_lowercase();
    let out = required(sub, "out")?;
    let ledger = SqliteStore::new(conn).load_ledger()?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["date", "timestamp", "type", "total_amount", "value"])?;
            for r in ledger.records() {
                wtr.write_record([
                    r.date.to_string(),
                    r.timestamp.to_string(),
                    r.record_type().to_string(),
                    r.total().to_string(),
                    r.value().map(|v| v.to_string()).unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let doc = UserDocument::from_ledger(&ledger);
            std::fs::write(out, doc.to_json()?)?;
        }
        _ => return Err(anyhow!("Unknown format: {} (use csv|json)", fmt)),
    }
    tracing::info!(records = ledger.records().len(), format = %fmt, out, "export finished");
    println!("Exported {} records to {}", ledger.records().len(), out);
    Ok(())
}
