// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The per-user document exchanged with the hosted app:
//! `{ "data": { "YYYY-MM": [record, ...] }, "initialAmount": 1000 }`.

use crate::error::{CapitalError, Result};
use crate::ledger::Ledger;
use crate::models::{MonthKey, Record, RecordType};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    #[serde(rename = "type", default)]
    pub record_type: RecordType,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Decimal>,
    #[serde(default)]
    pub timestamp: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    #[serde(default)]
    pub data: BTreeMap<String, Vec<DocumentRecord>>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub initial_amount: Option<Decimal>,
}

impl From<&Record> for DocumentRecord {
    fn from(r: &Record) -> Self {
        Self {
            date: r.date,
            total_amount: r.total(),
            record_type: r.record_type(),
            value: r.value(),
            timestamp: r.timestamp,
        }
    }
}

impl TryFrom<&DocumentRecord> for Record {
    type Error = CapitalError;

    fn try_from(d: &DocumentRecord) -> Result<Self> {
        Record::new(d.date, d.timestamp, d.record_type, d.total_amount, d.value)
    }
}

impl UserDocument {
    /// Flattens the month shards into one ledger. A record filed under the
    /// wrong month key is still placed by its own date.
    pub fn to_ledger(&self) -> Result<Ledger> {
        let mut records = Vec::new();
        for (key, shard) in &self.data {
            let month: MonthKey = key.parse()?;
            for d in shard {
                if !month.contains(d.date) {
                    tracing::warn!(month = %month, date = %d.date, "record filed under another month");
                }
                records.push(Record::try_from(d)?);
            }
        }
        Ok(Ledger::new(records, self.initial_amount))
    }

    pub fn from_ledger(ledger: &Ledger) -> Self {
        let mut data: BTreeMap<String, Vec<DocumentRecord>> = BTreeMap::new();
        for r in ledger.records() {
            data.entry(r.month().to_string())
                .or_default()
                .push(DocumentRecord::from(r));
        }
        Self {
            data,
            initial_amount: ledger.baseline(),
        }
    }

    pub fn from_json(s: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
