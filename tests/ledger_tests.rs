// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use capital::error::CapitalError;
use capital::ledger::Ledger;
use capital::models::{MonthKey, Record, RecordType};
use capital::store::RecordStore;
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn sample() -> Ledger {
    Ledger::new(
        vec![
            Record::amount(d("2025-03-10"), 30, dec("1300")),
            Record::amount(d("2025-01-31"), 10, dec("1000")),
            Record::deposit(d("2025-02-01"), 20, dec("1200"), dec("200")),
            Record::amount(d("2025-03-10"), 25, dec("1250")),
        ],
        Some(dec("900")),
    )
}

#[test]
fn records_are_sorted_by_date_then_timestamp() {
    let ledger = sample();
    let keys: Vec<(NaiveDate, i64)> = ledger.records().iter().map(Record::key).collect();
    assert_eq!(
        keys,
        vec![
            (d("2025-01-31"), 10),
            (d("2025-02-01"), 20),
            (d("2025-03-10"), 25),
            (d("2025-03-10"), 30),
        ]
    );
}

#[test]
fn month_view_is_a_range_of_the_flat_history() {
    let ledger = sample();
    let march: MonthKey = "2025-03".parse().unwrap();
    assert_eq!(ledger.month(march).len(), 2);
    assert!(ledger.month("2024-12".parse().unwrap()).is_empty());
    assert_eq!(
        ledger
            .months()
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>(),
        vec!["2025-01", "2025-02", "2025-03"]
    );
}

#[test]
fn upsert_replaces_on_same_key_and_remove_deletes() {
    let mut ledger = sample();
    let replaced = ledger.upsert(Record::amount(d("2025-03-10"), 25, dec("1260")));
    assert!(replaced);
    assert_eq!(ledger.records().len(), 4);
    assert_eq!(ledger.get(d("2025-03-10"), 25).unwrap().total(), dec("1260"));

    assert!(!ledger.upsert(Record::amount(d("2025-03-11"), 1, dec("1270"))));
    assert_eq!(ledger.last_record().unwrap().total(), dec("1270"));

    let gone = ledger.remove(d("2025-02-01"), 20).unwrap();
    assert_eq!(gone.record_type(), RecordType::Deposit);
    assert!(ledger.remove(d("2025-02-01"), 20).is_none());
}

#[test]
fn duplicate_keys_on_construction_keep_the_last() {
    let ledger = Ledger::new(
        vec![
            Record::amount(d("2025-03-10"), 1, dec("10")),
            Record::amount(d("2025-03-10"), 1, dec("20")),
        ],
        None,
    );
    assert_eq!(ledger.records().len(), 1);
    assert_eq!(ledger.records()[0].total(), dec("20"));
}

#[test]
fn balance_before_falls_back_to_baseline() {
    let ledger = sample();
    assert_eq!(ledger.balance_before(d("2025-01-01"), 0), Some(dec("900")));
    assert_eq!(ledger.balance_before(d("2025-02-01"), 20), Some(dec("1000")));
    assert_eq!(ledger.balance_before(d("2025-03-10"), 27), Some(dec("1250")));
    assert_eq!(Ledger::default().balance_before(d("2025-01-01"), 0), None);
}

#[test]
fn first_anchor_skips_leading_movements() {
    let ledger = Ledger::new(
        vec![
            Record::deposit(d("2025-01-01"), 1, dec("100"), dec("100")),
            Record::amount(d("2025-01-02"), 2, dec("101")),
        ],
        None,
    );
    assert_eq!(ledger.first_anchor_index(), Some(1));
    assert_eq!(ledger.first_anchor().unwrap().total(), dec("101"));
}

#[test]
fn ledger_works_as_an_in_memory_store() {
    let mut store = sample();
    let march: MonthKey = "2025-03".parse().unwrap();
    assert_eq!(store.records_for_month(march).unwrap().len(), 2);
    assert!(RecordStore::delete(&mut store, d("2025-03-10"), 30).unwrap());
    assert!(!RecordStore::delete(&mut store, d("2025-03-10"), 30).unwrap());
    RecordStore::set_baseline(&mut store, None).unwrap();
    assert_eq!(RecordStore::baseline(&store).unwrap(), None);
    assert_eq!(store.load_ledger().unwrap().records().len(), 3);
}

#[test]
fn month_keys_parse_and_bound_their_days() {
    let feb: MonthKey = "2024-02".parse().unwrap();
    assert_eq!(feb.first_day(), d("2024-02-01"));
    assert_eq!(feb.last_day(), d("2024-02-29"));
    assert_eq!("2024-12".parse::<MonthKey>().unwrap().next().to_string(), "2025-01");
    assert_eq!(
        "2024-13".parse::<MonthKey>(),
        Err(CapitalError::InvalidMonthKey("2024-13".into()))
    );
    assert!("2024-1".parse::<MonthKey>().is_err());
    assert!("march".parse::<MonthKey>().is_err());
}

#[test]
fn record_validation_rejects_bad_shapes() {
    let date = d("2025-03-10");
    assert!(Record::new(date, 1, RecordType::Amount, dec("-1"), None).is_err());
    assert!(Record::new(date, 1, RecordType::Amount, dec("10"), Some(dec("1"))).is_err());
    assert!(Record::new(date, 1, RecordType::Deposit, dec("10"), None).is_err());
    assert!(Record::new(date, 1, RecordType::Withdrawal, dec("10"), Some(Decimal::ZERO)).is_err());

    let w = Record::new(date, 1, RecordType::Withdrawal, dec("10"), Some(dec("5"))).unwrap();
    assert_eq!(w.net_movement(), dec("-5"));
    assert!(!w.is_anchor());
    assert_eq!("Deposit".parse::<RecordType>().unwrap(), RecordType::Deposit);
    assert!(matches!(
        "transfer".parse::<RecordType>(),
        Err(CapitalError::UnknownRecordType(_))
    ));
}
