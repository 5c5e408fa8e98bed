// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::SqliteStore;
use crate::document::UserDocument;
use crate::store::RecordStore;
use crate::utils::required;
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("document", sub)) => import_document(conn, sub),
        _ => Ok(()),
    }
}

fn import_document(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = required(sub, "path")?;
    let replace = sub.get_flag("replace");
    let raw = std::fs::read_to_string(path).with_context(|| format!("Read {}", path))?;
    let doc = UserDocument::from_json(&raw).with_context(|| format!("Parse {}", path))?;
    let incoming = doc.to_ledger()?;

    let tx = conn.transaction()?;
    let (mut added, mut replaced) = (0usize, 0usize);
    {
        let mut store = SqliteStore::new(&tx);
        if replace {
            tx.execute("DELETE FROM records", [])?;
            store.set_baseline(incoming.baseline())?;
        } else if let Some(b) = incoming.baseline() {
            store.set_baseline(Some(b))?;
        }
        for r in incoming.records() {
            if store.upsert(*r)? {
                replaced += 1;
            } else {
                added += 1;
            }
        }
    }
    tx.commit()?;
    tracing::info!(path, added, replaced, replace, "document imported");
    println!(
        "Imported {} new and {} updated records from {}",
        added, replaced, path
    );
    Ok(())
}
