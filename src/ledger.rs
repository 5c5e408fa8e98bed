// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{MonthKey, Record};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A user's whole history: one flat sequence sorted by `(date, timestamp)`
/// plus the optional baseline balance that precedes it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    records: Vec<Record>,
    baseline: Option<Decimal>,
}

impl Ledger {
    /// Later duplicates of a `(date, timestamp)` key win.
    pub fn new(records: Vec<Record>, baseline: Option<Decimal>) -> Self {
        let mut ledger = Self {
            records: Vec::with_capacity(records.len()),
            baseline,
        };
        for r in records {
            ledger.upsert(r);
        }
        ledger
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn baseline(&self) -> Option<Decimal> {
        self.baseline
    }

    pub fn set_baseline(&mut self, baseline: Option<Decimal>) {
        self.baseline = baseline;
    }

    /// Index range of the records dated inside `month`.
    pub fn month_range(&self, month: MonthKey) -> std::ops::Range<usize> {
        let start = self
            .records
            .partition_point(|r| r.date < month.first_day());
        let end = self
            .records
            .partition_point(|r| r.date <= month.last_day());
        start..end.max(start)
    }

    pub fn month(&self, month: MonthKey) -> &[Record] {
        &self.records[self.month_range(month)]
    }

    /// Distinct months that hold at least one record, oldest first.
    pub fn months(&self) -> Vec<MonthKey> {
        let mut out: Vec<MonthKey> = Vec::new();
        for r in &self.records {
            let m = r.month();
            if out.last() != Some(&m) {
                out.push(m);
            }
        }
        out
    }

    pub fn position(&self, date: NaiveDate, timestamp: i64) -> Result<usize, usize> {
        self.records
            .binary_search_by(|r| r.key().cmp(&(date, timestamp)))
    }

    pub fn get(&self, date: NaiveDate, timestamp: i64) -> Option<&Record> {
        self.position(date, timestamp)
            .ok()
            .map(|idx| &self.records[idx])
    }

    pub fn on_date(&self, date: NaiveDate) -> &[Record] {
        let start = self.records.partition_point(|r| r.date < date);
        let end = self.records.partition_point(|r| r.date <= date);
        &self.records[start..end]
    }

    /// Inserts at the sorted position, or replaces the record with the same
    /// key. Returns `true` on replacement.
    pub fn upsert(&mut self, record: Record) -> bool {
        match self.position(record.date, record.timestamp) {
            Ok(idx) => {
                self.records[idx] = record;
                true
            }
            Err(idx) => {
                self.records.insert(idx, record);
                false
            }
        }
    }

    pub fn remove(&mut self, date: NaiveDate, timestamp: i64) -> Option<Record> {
        self.position(date, timestamp)
            .ok()
            .map(|idx| self.records.remove(idx))
    }

    pub fn first_anchor_index(&self) -> Option<usize> {
        self.records.iter().position(Record::is_anchor)
    }

    pub fn first_anchor(&self) -> Option<&Record> {
        self.first_anchor_index().map(|idx| &self.records[idx])
    }

    pub fn last_record(&self) -> Option<&Record> {
        self.records.last()
    }

    /// Balance in effect just before the given key: the total of the latest
    /// earlier record, falling back to the baseline.
    pub fn balance_before(&self, date: NaiveDate, timestamp: i64) -> Option<Decimal> {
        let idx = match self.position(date, timestamp) {
            Ok(i) | Err(i) => i,
        };
        if idx == 0 {
            self.baseline
        } else {
            Some(self.records[idx - 1].total())
        }
    }
}
