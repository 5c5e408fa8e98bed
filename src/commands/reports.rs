// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::SqliteStore;
use crate::models::MonthKey;
use crate::store::RecordStore;
use crate::utils::{
    fmt_money, fmt_signed, get_currency, maybe_print_json, month_arg, parse_date, pretty_table,
    today,
};
use crate::yields::{self, MonthStats, YieldSummary};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

const INSUFFICIENT: &str = "Add at least two balance records to calculate the yield";

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("yield", sub)) => yield_report(conn, sub)?,
        Some(("stats", sub)) => stats_report(conn, sub)?,
        Some(("months", sub)) => months_report(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn fmt_rate(rate: Option<Decimal>) -> String {
    rate.map(|r| format!("{:.2}%", (r * Decimal::ONE_HUNDRED).round_dp(2)))
        .unwrap_or_else(|| "—".to_string())
}

#[derive(Debug, Serialize)]
pub struct YieldCard {
    pub month: String,
    pub currency: String,
    pub current_amount: Option<Decimal>,
    pub summary: Option<YieldSummary>,
}

pub fn yield_card(conn: &Connection, month: MonthKey) -> Result<YieldCard> {
    let ledger = SqliteStore::new(conn).load_ledger()?;
    Ok(YieldCard {
        month: month.to_string(),
        currency: get_currency(conn)?,
        current_amount: yields::current_amount(&ledger),
        summary: yields::monthly_yield(&ledger, month),
    })
}

fn yield_report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let card = yield_card(conn, month_arg(sub)?)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &card)? {
        return Ok(());
    }
    let ccy = &card.currency;
    let mut rows = vec![vec![
        "Current amount".to_string(),
        card.current_amount
            .map(|a| fmt_money(&a, ccy))
            .unwrap_or_else(|| "—".to_string()),
    ]];
    match &card.summary {
        Some(s) => {
            let start = if s.from_baseline {
                format!("{} (initial amount)", fmt_money(&s.base_amount, ccy))
            } else {
                format!("{} (day {})", fmt_money(&s.base_amount, ccy), s.first_day)
            };
            rows.push(vec![format!("Yield {}", card.month), fmt_signed(&s.real_yield)]);
            rows.push(vec!["Rate".into(), fmt_rate(s.rate)]);
            rows.push(vec!["Start".into(), start]);
            rows.push(vec![
                "End".into(),
                format!("{} (day {})", fmt_money(&s.end_amount, ccy), s.last_day),
            ]);
            rows.push(vec!["Deposits".into(), fmt_money(&s.deposits, ccy)]);
            rows.push(vec!["Withdrawals".into(), fmt_money(&s.withdrawals, ccy)]);
        }
        None => rows.push(vec![format!("Yield {}", card.month), INSUFFICIENT.to_string()]),
    }
    println!("{}", pretty_table(&["", ""], rows));
    Ok(())
}

pub fn month_stats(conn: &Connection, month: MonthKey, as_of: NaiveDate) -> Result<MonthStats> {
    let ledger = SqliteStore::new(conn).load_ledger()?;
    Ok(yields::month_stats(&ledger, month, as_of))
}

fn stats_report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_arg(sub)?;
    let as_of = match sub.get_one::<String>("as-of") {
        Some(d) => parse_date(d)?,
        None => today(),
    };
    let stats = month_stats(conn, month, as_of)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &stats)? {
        return Ok(());
    }
    let opt = |d: Option<Decimal>| d.map(|v| fmt_signed(&v)).unwrap_or_else(|| "—".into());
    let rows = vec![
        vec!["Best gain".to_string(), opt(stats.best_gain)],
        vec!["Worst loss".to_string(), opt(stats.worst_loss)],
        vec!["Month total".to_string(), fmt_signed(&stats.total)],
        vec!["Working days".to_string(), stats.working_days.to_string()],
        vec!["Daily average".to_string(), fmt_signed(&stats.daily_average)],
        vec!["Days recorded".to_string(), stats.days_recorded.to_string()],
    ];
    println!("{}", pretty_table(&["Stat", month.to_string().as_str()], rows));
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct MonthYieldRow {
    pub month: String,
    #[serde(rename = "yield")]
    pub real_yield: Option<String>,
    pub rate: Option<String>,
    pub end_amount: Option<String>,
}

pub fn history_rows(conn: &Connection, months: usize) -> Result<Vec<MonthYieldRow>> {
    let ledger = SqliteStore::new(conn).load_ledger()?;
    Ok(yields::yield_history(&ledger)
        .into_iter()
        .take(months)
        .map(|(m, s)| MonthYieldRow {
            month: m.to_string(),
            real_yield: s.as_ref().map(|s| format!("{:.2}", s.real_yield.round_dp(2))),
            rate: s.as_ref().map(|s| fmt_rate(s.rate)),
            end_amount: s.as_ref().map(|s| format!("{:.2}", s.end_amount)),
        })
        .collect())
}

fn months_report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let months: usize = *sub.get_one::<usize>("months").unwrap_or(&12);
    let data = history_rows(conn, months)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .into_iter()
            .map(|r| {
                vec![
                    r.month,
                    r.real_yield.unwrap_or_else(|| "insufficient records".into()),
                    r.rate.unwrap_or_default(),
                    r.end_amount.unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Yield", "Rate", "End amount"], rows)
        );
    }
    Ok(())
}
