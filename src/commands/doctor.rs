// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::SqliteStore;
use crate::ledger::Ledger;
use crate::store::RecordStore;
use crate::utils::pretty_table;
use crate::yields;
use anyhow::Result;
use rusqlite::Connection;

/// Advisory findings as `(issue, detail)` pairs.
pub fn findings(ledger: &Ledger) -> Vec<(String, String)> {
    let mut rows = Vec::new();

    // 1) Movements whose total disagrees with the previous balance
    for r in ledger.records().iter().filter(|r| !r.is_anchor()) {
        match ledger.balance_before(r.date, r.timestamp) {
            None => rows.push((
                "movement_without_prior_balance".into(),
                format!("{} {} #{}", r.date, r.record_type(), r.timestamp),
            )),
            Some(prev) if prev + r.net_movement() != r.total() => rows.push((
                "movement_total_mismatch".into(),
                format!(
                    "{} {} #{}: expected {}, recorded {}",
                    r.date,
                    r.record_type(),
                    r.timestamp,
                    prev + r.net_movement(),
                    r.total()
                ),
            )),
            Some(_) => {}
        }
    }

    // 2) Months without a measurable interval
    for (month, summary) in yields::yield_history(ledger) {
        if summary.is_none() {
            rows.push(("month_insufficient_records".into(), month.to_string()));
        }
    }
    rows
}

pub fn handle(conn: &Connection) -> Result<()> {
    let ledger = SqliteStore::new(conn).load_ledger()?;
    let rows: Vec<Vec<String>> = findings(&ledger)
        .into_iter()
        .map(|(issue, detail)| vec![issue, detail])
        .collect();

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        tracing::warn!(issues = rows.len(), "doctor found issues");
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
