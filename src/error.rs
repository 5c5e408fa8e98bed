// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use thiserror::Error;

/// Validation failures raised while building or mutating records.
///
/// The yield calculator itself never produces these; it degrades to
/// `None`/zero instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CapitalError {
    #[error("Invalid record on {date}: {reason}")]
    InvalidRecord { date: NaiveDate, reason: String },

    #[error("Unknown record type '{0}' (use amount|deposit|withdrawal)")]
    UnknownRecordType(String),

    #[error("Invalid month key '{0}', expected YYYY-MM")]
    InvalidMonthKey(String),

    #[error("No record on {date} with timestamp {timestamp}")]
    RecordNotFound { date: NaiveDate, timestamp: i64 },

    #[error("{count} records on {date}; pass --timestamp to pick one")]
    AmbiguousRecord { date: NaiveDate, count: usize },
}

pub type Result<T> = std::result::Result<T, CapitalError>;
