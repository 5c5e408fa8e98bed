// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use capital::document::UserDocument;
use capital::error::CapitalError;
use capital::models::RecordType;
use capital::yields;
use rust_decimal::Decimal;
use serde_json::json;

const DOC: &str = r#"{
    "data": {
        "2025-03": [
            { "date": "2025-03-28", "totalAmount": 1250, "type": "amount", "timestamp": 3 },
            { "date": "2025-03-01", "totalAmount": 1000, "type": "amount", "timestamp": 1 },
            { "date": "2025-03-15", "totalAmount": 1200, "type": "deposit", "value": 200, "timestamp": 2 }
        ],
        "2025-02": [
            { "date": "2025-02-27", "totalAmount": 990.5, "type": "amount" }
        ]
    },
    "initialAmount": 950
}"#;

#[test]
fn document_flattens_into_a_sorted_ledger() {
    let doc = UserDocument::from_json(DOC).unwrap();
    let ledger = doc.to_ledger().unwrap();
    assert_eq!(ledger.records().len(), 4);
    assert_eq!(ledger.baseline(), Some(Decimal::from(950)));
    assert_eq!(ledger.records()[0].timestamp, 0);
    assert_eq!(ledger.records()[2].record_type(), RecordType::Deposit);

    let s = yields::monthly_yield(&ledger, "2025-03".parse().unwrap()).unwrap();
    assert_eq!(s.real_yield, Decimal::from(50));
}

#[test]
fn document_written_back_keeps_month_shards_and_numbers() {
    let ledger = UserDocument::from_json(DOC).unwrap().to_ledger().unwrap();
    let doc = UserDocument::from_ledger(&ledger);
    assert_eq!(
        doc.data.keys().cloned().collect::<Vec<_>>(),
        vec!["2025-02", "2025-03"]
    );

    let value: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
    assert_eq!(value["initialAmount"], json!(950.0));
    assert_eq!(value["data"]["2025-03"][1]["type"], json!("deposit"));
    assert_eq!(value["data"]["2025-03"][1]["value"], json!(200.0));
    assert!(value["data"]["2025-03"][0].get("value").is_none());

    let again = UserDocument::from_json(&doc.to_json().unwrap())
        .unwrap()
        .to_ledger()
        .unwrap();
    assert_eq!(again, ledger);
}

#[test]
fn document_without_baseline_or_data_is_empty() {
    let doc = UserDocument::from_json("{}").unwrap();
    let ledger = doc.to_ledger().unwrap();
    assert!(ledger.is_empty());
    assert_eq!(ledger.baseline(), None);
}

#[test]
fn bad_month_key_or_record_is_rejected() {
    let bad_key = r#"{ "data": { "March": [] } }"#;
    let err = UserDocument::from_json(bad_key).unwrap().to_ledger().unwrap_err();
    assert_eq!(err, CapitalError::InvalidMonthKey("March".into()));

    let missing_value = r#"{ "data": { "2025-03": [
        { "date": "2025-03-01", "totalAmount": 10, "type": "withdrawal" }
    ] } }"#;
    let err = UserDocument::from_json(missing_value)
        .unwrap()
        .to_ledger()
        .unwrap_err();
    assert!(matches!(err, CapitalError::InvalidRecord { .. }));

    let unknown_type = r#"{ "data": { "2025-03": [
        { "date": "2025-03-01", "totalAmount": 10, "type": "transfer" }
    ] } }"#;
    assert!(UserDocument::from_json(unknown_type).is_err());
}

#[test]
fn untyped_records_import_as_balance_snapshots() {
    let legacy = r#"{ "data": { "2025-03": [
        { "date": "2025-03-01", "totalAmount": 1000 },
        { "date": "2025-03-28", "totalAmount": 1250.5 }
    ] } }"#;
    let ledger = UserDocument::from_json(legacy).unwrap().to_ledger().unwrap();
    assert!(ledger.records().iter().all(|r| r.record_type() == RecordType::Amount));

    let s = yields::monthly_yield(&ledger, "2025-03".parse().unwrap()).unwrap();
    assert_eq!(s.real_yield, Decimal::new(2505, 1));
    assert!(!s.from_baseline);
}
