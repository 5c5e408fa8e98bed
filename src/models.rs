// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{CapitalError, Result};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar month used to group records, rendered as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        self.next().first_day().pred_opt().unwrap_or(NaiveDate::MAX)
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::of(date) == *self
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = CapitalError;

    fn from_str(s: &str) -> Result<Self> {
        let bad = || CapitalError::InvalidMonthKey(s.to_string());
        let (y, m) = s.trim().split_once('-').ok_or_else(bad)?;
        if y.len() != 4 || m.len() != 2 {
            return Err(bad());
        }
        let year: i32 = y.parse().map_err(|_| bad())?;
        let month: u32 = m.parse().map_err(|_| bad())?;
        MonthKey::new(year, month).ok_or_else(bad)
    }
}

/// Untyped records from older documents are balance snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    #[default]
    Amount,
    Deposit,
    Withdrawal,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Amount => "amount",
            RecordType::Deposit => "deposit",
            RecordType::Withdrawal => "withdrawal",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = CapitalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "amount" => Ok(RecordType::Amount),
            "deposit" => Ok(RecordType::Deposit),
            "withdrawal" => Ok(RecordType::Withdrawal),
            other => Err(CapitalError::UnknownRecordType(other.to_string())),
        }
    }
}

/// What a record observed. `total` is always the account balance once the
/// entry is applied; `value` is the size of the cash movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Amount { total: Decimal },
    Deposit { total: Decimal, value: Decimal },
    Withdrawal { total: Decimal, value: Decimal },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub date: NaiveDate,
    /// Creation time in milliseconds; orders records sharing a date.
    pub timestamp: i64,
    pub kind: RecordKind,
}

impl Record {
    pub fn amount(date: NaiveDate, timestamp: i64, total: Decimal) -> Self {
        Self {
            date,
            timestamp,
            kind: RecordKind::Amount { total },
        }
    }

    pub fn deposit(date: NaiveDate, timestamp: i64, total: Decimal, value: Decimal) -> Self {
        Self {
            date,
            timestamp,
            kind: RecordKind::Deposit { total, value },
        }
    }

    pub fn withdrawal(date: NaiveDate, timestamp: i64, total: Decimal, value: Decimal) -> Self {
        Self {
            date,
            timestamp,
            kind: RecordKind::Withdrawal { total, value },
        }
    }

    /// Builds a record from its flat form, rejecting negative balances and
    /// movements without a positive value.
    pub fn new(
        date: NaiveDate,
        timestamp: i64,
        record_type: RecordType,
        total: Decimal,
        value: Option<Decimal>,
    ) -> Result<Self> {
        let invalid = |reason: &str| CapitalError::InvalidRecord {
            date,
            reason: reason.to_string(),
        };
        if total < Decimal::ZERO {
            return Err(invalid("total amount cannot be negative"));
        }
        match record_type {
            RecordType::Amount => {
                if value.is_some() {
                    return Err(invalid("value only applies to deposits and withdrawals"));
                }
                Ok(Self::amount(date, timestamp, total))
            }
            RecordType::Deposit | RecordType::Withdrawal => {
                let value = value.ok_or_else(|| invalid("movement value is required"))?;
                if value <= Decimal::ZERO {
                    return Err(invalid("movement value must be positive"));
                }
                if record_type == RecordType::Deposit {
                    Ok(Self::deposit(date, timestamp, total, value))
                } else {
                    Ok(Self::withdrawal(date, timestamp, total, value))
                }
            }
        }
    }

    pub fn key(&self) -> (NaiveDate, i64) {
        (self.date, self.timestamp)
    }

    pub fn month(&self) -> MonthKey {
        MonthKey::of(self.date)
    }

    pub fn record_type(&self) -> RecordType {
        match self.kind {
            RecordKind::Amount { .. } => RecordType::Amount,
            RecordKind::Deposit { .. } => RecordType::Deposit,
            RecordKind::Withdrawal { .. } => RecordType::Withdrawal,
        }
    }

    pub fn total(&self) -> Decimal {
        match self.kind {
            RecordKind::Amount { total }
            | RecordKind::Deposit { total, .. }
            | RecordKind::Withdrawal { total, .. } => total,
        }
    }

    pub fn value(&self) -> Option<Decimal> {
        match self.kind {
            RecordKind::Amount { .. } => None,
            RecordKind::Deposit { value, .. } | RecordKind::Withdrawal { value, .. } => {
                Some(value)
            }
        }
    }

    /// Anchors are observed balances; movements are cash flow.
    pub fn is_anchor(&self) -> bool {
        matches!(self.kind, RecordKind::Amount { .. })
    }

    /// Signed cash flow: deposits positive, withdrawals negative.
    pub fn net_movement(&self) -> Decimal {
        match self.kind {
            RecordKind::Amount { .. } => Decimal::ZERO,
            RecordKind::Deposit { value, .. } => value,
            RecordKind::Withdrawal { value, .. } => -value,
        }
    }
}
