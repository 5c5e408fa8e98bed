// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::models::{MonthKey, Record};
use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Data access consumed by the front end. Records are keyed by
/// `(date, timestamp)`; there is no concurrency control, the last write wins.
pub trait RecordStore {
    fn records_for_month(&self, month: MonthKey) -> Result<Vec<Record>>;
    fn all_records(&self) -> Result<Vec<Record>>;
    /// Returns `true` when an existing record was replaced.
    fn upsert(&mut self, record: Record) -> Result<bool>;
    /// Returns `true` when a record was removed.
    fn delete(&mut self, date: NaiveDate, timestamp: i64) -> Result<bool>;
    fn baseline(&self) -> Result<Option<Decimal>>;
    fn set_baseline(&mut self, amount: Option<Decimal>) -> Result<()>;

    /// Snapshot for the yield calculator.
    fn load_ledger(&self) -> Result<Ledger> {
        Ok(Ledger::new(self.all_records()?, self.baseline()?))
    }
}

impl RecordStore for Ledger {
    fn records_for_month(&self, month: MonthKey) -> Result<Vec<Record>> {
        Ok(self.month(month).to_vec())
    }

    fn all_records(&self) -> Result<Vec<Record>> {
        Ok(self.records().to_vec())
    }

    fn upsert(&mut self, record: Record) -> Result<bool> {
        Ok(Ledger::upsert(self, record))
    }

    fn delete(&mut self, date: NaiveDate, timestamp: i64) -> Result<bool> {
        Ok(self.remove(date, timestamp).is_some())
    }

    fn baseline(&self) -> Result<Option<Decimal>> {
        Ok(Ledger::baseline(self))
    }

    fn set_baseline(&mut self, amount: Option<Decimal>) -> Result<()> {
        Ledger::set_baseline(self, amount);
        Ok(())
    }

    fn load_ledger(&self) -> Result<Ledger> {
        Ok(self.clone())
    }
}
