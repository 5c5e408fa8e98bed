// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{MonthKey, Record, RecordType};
use crate::store::RecordStore;
use crate::utils::{get_setting, parse_date, parse_decimal};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Capital", "capital"));

pub const INITIAL_AMOUNT_KEY: &str = "initial_amount";

/// Explicit path (from `--db` or `CAPITAL_DB`) or the platform data dir.
pub fn db_path(explicit: Option<&str>) -> Result<PathBuf> {
    if let Some(p) = explicit.map(str::trim).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("capital.sqlite"))
}

pub fn open_or_init(explicit: Option<&str>) -> Result<Connection> {
    let path = db_path(explicit)?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    tracing::debug!(path = %path.display(), "database ready");
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS records(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        timestamp INTEGER NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('amount','deposit','withdrawal')),
        total_amount TEXT NOT NULL,
        value TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        UNIQUE(date, timestamp)
    );
    CREATE INDEX IF NOT EXISTS idx_records_date ON records(date);
    "#,
    )?;
    Ok(())
}

/// `RecordStore` over the local SQLite database.
pub struct SqliteStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn query(&self, sql: &str, args: &[&dyn rusqlite::ToSql]) -> Result<Vec<Record>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(args, |r| {
            Ok((
                r.get::<_, String>(0)?,
                r.get::<_, i64>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, String>(3)?,
                r.get::<_, Option<String>>(4)?,
            ))
        })?;
        let mut out = Vec::new();
        for row in rows {
            let (d, ts, typ, total, value) = row?;
            let date = parse_date(&d)?;
            let record_type: RecordType = typ.parse()?;
            let total = parse_decimal(&total)
                .with_context(|| format!("Invalid total for record {} #{}", d, ts))?;
            let value = value.as_deref().map(parse_decimal).transpose()?;
            out.push(Record::new(date, ts, record_type, total, value)?);
        }
        Ok(out)
    }
}

const SELECT_RECORDS: &str = "SELECT date, timestamp, type, total_amount, value FROM records";

impl RecordStore for SqliteStore<'_> {
    fn records_for_month(&self, month: MonthKey) -> Result<Vec<Record>> {
        let sql = format!("{SELECT_RECORDS} WHERE substr(date,1,7)=?1 ORDER BY date, timestamp");
        let key = month.to_string();
        self.query(&sql, &[&key])
    }

    fn all_records(&self) -> Result<Vec<Record>> {
        let sql = format!("{SELECT_RECORDS} ORDER BY date, timestamp");
        self.query(&sql, &[])
    }

    fn upsert(&mut self, record: Record) -> Result<bool> {
        let replaced = self.conn.query_row(
            "SELECT COUNT(*) FROM records WHERE date=?1 AND timestamp=?2",
            params![record.date.to_string(), record.timestamp],
            |r| r.get::<_, i64>(0),
        )? > 0;
        self.conn.execute(
            "INSERT INTO records(date, timestamp, type, total_amount, value)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(date, timestamp) DO UPDATE SET
                type=excluded.type,
                total_amount=excluded.total_amount,
                value=excluded.value",
            params![
                record.date.to_string(),
                record.timestamp,
                record.record_type().as_str(),
                record.total().to_string(),
                record.value().map(|v| v.to_string()),
            ],
        )?;
        Ok(replaced)
    }

    fn delete(&mut self, date: NaiveDate, timestamp: i64) -> Result<bool> {
        let n = self.conn.execute(
            "DELETE FROM records WHERE date=?1 AND timestamp=?2",
            params![date.to_string(), timestamp],
        )?;
        Ok(n > 0)
    }

    fn baseline(&self) -> Result<Option<Decimal>> {
        get_setting(self.conn, INITIAL_AMOUNT_KEY)?
            .map(|s| parse_decimal(&s))
            .transpose()
    }

    fn set_baseline(&mut self, amount: Option<Decimal>) -> Result<()> {
        match amount {
            Some(a) => crate::utils::set_setting(self.conn, INITIAL_AMOUNT_KEY, &a.to_string())?,
            None => {
                self.conn.execute(
                    "DELETE FROM settings WHERE key=?1",
                    params![INITIAL_AMOUNT_KEY],
                )?;
            }
        }
        Ok(())
    }
}
