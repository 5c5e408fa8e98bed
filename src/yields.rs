// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Real-yield attribution.
//!
//! A yield interval always runs between two `Amount` anchors (or the baseline
//! and an anchor). Deposits and withdrawals dated strictly inside the interval
//! are netted out of the balance delta, so only market performance remains.
//! None of these functions fail: missing data comes back as `None` or zero.

use crate::ledger::Ledger;
use crate::models::{MonthKey, Record};
use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YieldSummary {
    #[serde(rename = "yield")]
    pub real_yield: Decimal,
    /// Day of month of the first anchor in the window.
    pub first_day: u32,
    pub last_day: u32,
    pub base_amount: Decimal,
    pub end_amount: Decimal,
    pub deposits: Decimal,
    pub withdrawals: Decimal,
    /// The baseline stood in for the first anchor.
    pub from_baseline: bool,
    /// `real_yield / base_amount`; absent for a zero base.
    pub rate: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyYield {
    pub record: Record,
    pub daily_yield: Decimal,
    /// False for movements and for an anchor with nothing to compare against.
    pub has_predecessor: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthStats {
    pub best_gain: Option<Decimal>,
    pub worst_loss: Option<Decimal>,
    pub total: Decimal,
    pub working_days: u32,
    pub daily_average: Decimal,
    pub days_recorded: usize,
    pub anchors: usize,
}

pub fn interval_yield(
    base: Decimal,
    end: Decimal,
    deposits: Decimal,
    withdrawals: Decimal,
) -> Decimal {
    (end - base) - (deposits - withdrawals)
}

fn movement_totals(records: &[Record]) -> (Decimal, Decimal) {
    records
        .iter()
        .fold((Decimal::ZERO, Decimal::ZERO), |(dep, wd), r| {
            let net = r.net_movement();
            if net > Decimal::ZERO {
                (dep + net, wd)
            } else {
                (dep, wd - net)
            }
        })
}

/// Real yield of `month`, from its first anchor to its last.
///
/// When the month's first anchor is the first anchor ever recorded and a
/// baseline exists, the baseline becomes the starting balance and every
/// movement since the start of history counts. Returns `None` when the month
/// has no interval to measure.
pub fn monthly_yield(ledger: &Ledger, month: MonthKey) -> Option<YieldSummary> {
    let records = ledger.records();
    let range = ledger.month_range(month);
    let first = range.clone().find(|&i| records[i].is_anchor())?;
    let last = range.rev().find(|&i| records[i].is_anchor())?;

    let baseline = ledger
        .baseline()
        .filter(|_| ledger.first_anchor_index() == Some(first));
    let (base_amount, movements_from, from_baseline) = match baseline {
        Some(b) => (b, 0, true),
        None if last > first => (records[first].total(), first + 1, false),
        None => return None,
    };

    let end_amount = records[last].total();
    let (deposits, withdrawals) = movement_totals(&records[movements_from..last]);
    let real_yield = interval_yield(base_amount, end_amount, deposits, withdrawals);

    Some(YieldSummary {
        real_yield,
        first_day: records[first].date.day(),
        last_day: records[last].date.day(),
        base_amount,
        end_amount,
        deposits,
        withdrawals,
        from_baseline,
        rate: real_yield.checked_div(base_amount),
    })
}

/// Daily yield of every record up to index `end`, walking the whole history
/// so a month's first anchor is compared with the previous month's last one.
fn daily_series(ledger: &Ledger, end: usize) -> Vec<DailyYield> {
    let mut out = Vec::with_capacity(end);
    let mut prev_total = ledger.baseline();
    let mut pending = Decimal::ZERO;
    for record in &ledger.records()[..end] {
        if !record.is_anchor() {
            pending += record.net_movement();
            out.push(DailyYield {
                record: *record,
                daily_yield: Decimal::ZERO,
                has_predecessor: false,
            });
            continue;
        }
        let (daily_yield, has_predecessor) = match prev_total {
            Some(prev) => (record.total() - prev - pending, true),
            None => (Decimal::ZERO, false),
        };
        out.push(DailyYield {
            record: *record,
            daily_yield,
            has_predecessor,
        });
        prev_total = Some(record.total());
        pending = Decimal::ZERO;
    }
    out
}

pub fn daily_yields(ledger: &Ledger, month: MonthKey) -> Vec<DailyYield> {
    let range = ledger.month_range(month);
    let mut series = daily_series(ledger, range.end);
    series.split_off(range.start)
}

pub fn is_working_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Monday-to-Friday dates from the 1st of `month` through `as_of`, capped at
/// the month end.
pub fn working_days(month: MonthKey, as_of: NaiveDate) -> u32 {
    let end = month.last_day().min(as_of);
    month
        .first_day()
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| is_working_day(*d))
        .count() as u32
}

pub fn working_day_average(total: Decimal, days: u32) -> Decimal {
    if days == 0 {
        Decimal::ZERO
    } else {
        total / Decimal::from(days)
    }
}

pub fn month_stats(ledger: &Ledger, month: MonthKey, as_of: NaiveDate) -> MonthStats {
    let daily = daily_yields(ledger, month);
    let compared: Vec<Decimal> = daily
        .iter()
        .filter(|d| d.has_predecessor)
        .map(|d| d.daily_yield)
        .collect();
    let total: Decimal = daily.iter().map(|d| d.daily_yield).sum();
    let working_days = working_days(month, as_of);

    let mut days_recorded = 0;
    let mut last_date = None;
    for d in &daily {
        if last_date != Some(d.record.date) {
            days_recorded += 1;
            last_date = Some(d.record.date);
        }
    }

    MonthStats {
        best_gain: compared.iter().copied().max(),
        worst_loss: compared.iter().copied().min(),
        total,
        working_days,
        daily_average: working_day_average(total, working_days),
        days_recorded,
        anchors: daily.iter().filter(|d| d.record.is_anchor()).count(),
    }
}

/// Latest balance on record, or the baseline when nothing is recorded yet.
pub fn current_amount(ledger: &Ledger) -> Option<Decimal> {
    ledger
        .last_record()
        .map(Record::total)
        .or(ledger.baseline())
}

/// Monthly yield of every month with records, newest first.
pub fn yield_history(ledger: &Ledger) -> Vec<(MonthKey, Option<YieldSummary>)> {
    ledger
        .months()
        .into_iter()
        .rev()
        .map(|m| (m, monthly_yield(ledger, m)))
        .collect()
}
