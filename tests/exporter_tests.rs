// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use capital::db::{self, SqliteStore};
use capital::models::Record;
use capital::store::RecordStore;
use capital::{cli, commands::exporter, commands::importer};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde_json::json;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn seeded() -> Connection {
    let conn = base_conn();
    let mut store = SqliteStore::new(&conn);
    store
        .upsert(Record::amount(d("2025-01-02"), 1, Decimal::new(100000, 2)))
        .unwrap();
    store
        .upsert(Record::deposit(
            d("2025-01-10"),
            2,
            Decimal::from(1200),
            Decimal::from(200),
        ))
        .unwrap();
    store.set_baseline(Some(Decimal::from(900))).unwrap();
    conn
}

fn export(conn: &Connection, format: &str, out: &str) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from([
        "capital", "export", "document", "--format", format, "--out", out,
    ]);
    match matches.subcommand() {
        Some(("export", export_m)) => exporter::handle(conn, export_m),
        _ => panic!("no export subcommand"),
    }
}

fn import(conn: &mut Connection, path: &str, replace: bool) -> anyhow::Result<()> {
    let mut argv = vec!["capital", "import", "document", "--path", path];
    if replace {
        argv.push("--replace");
    }
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("import", import_m)) => importer::handle(conn, import_m),
        _ => panic!("no import subcommand"),
    }
}

#[test]
fn export_document_writes_month_shards() {
    let conn = seeded();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("capital.json");
    export(&conn, "json", &out_path.to_string_lossy()).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!({
            "data": {
                "2025-01": [
                    { "date": "2025-01-02", "totalAmount": 1000.0, "type": "amount", "timestamp": 1 },
                    { "date": "2025-01-10", "totalAmount": 1200.0, "type": "deposit", "value": 200.0, "timestamp": 2 }
                ]
            },
            "initialAmount": 900.0
        })
    );
}

#[test]
fn export_csv_has_one_row_per_record() {
    let conn = seeded();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("capital.csv");
    export(&conn, "csv", &out_path.to_string_lossy()).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "date,timestamp,type,total_amount,value");
    assert_eq!(lines[1], "2025-01-02,1,amount,1000.00,");
    assert_eq!(lines[2], "2025-01-10,2,deposit,1200,200");
}

#[test]
fn export_rejects_unknown_format() {
    let conn = seeded();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("capital.xml");
    assert!(export(&conn, "xml", &out_path.to_string_lossy()).is_err());
    assert!(!out_path.exists());
}

#[test]
fn import_merges_or_replaces() {
    let source = seeded();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("capital.json");
    let out_str = out_path.to_string_lossy().to_string();
    export(&source, "json", &out_str).unwrap();

    let mut target = base_conn();
    SqliteStore::new(&target)
        .upsert(Record::amount(d("2024-12-31"), 9, Decimal::from(950)))
        .unwrap();

    import(&mut target, &out_str, false).unwrap();
    let merged = SqliteStore::new(&target).load_ledger().unwrap();
    assert_eq!(merged.records().len(), 3);
    assert_eq!(merged.baseline(), Some(Decimal::from(900)));

    import(&mut target, &out_str, true).unwrap();
    let replaced = SqliteStore::new(&target).load_ledger().unwrap();
    assert_eq!(replaced.records().len(), 2);
    assert_eq!(replaced.records()[0].date, d("2025-01-02"));
}

#[test]
fn import_of_invalid_document_leaves_store_untouched() {
    let mut conn = seeded();
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "data": {{ "2025-02": [ {{ "date": "2025-02-01", "totalAmount": -3, "type": "amount" }} ] }} }}"#
    )
    .unwrap();
    file.flush().unwrap();

    let path = file.path().to_str().unwrap().to_string();
    assert!(import(&mut conn, &path, true).is_err());
    assert_eq!(SqliteStore::new(&conn).all_records().unwrap().len(), 2);
}
