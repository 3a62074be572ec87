//! The reporting core: turns raw payment and consumption rows into bounded,
//! periodized summaries.
//!
//! Every operation is a stateless read; an empty match set produces an
//! explicit zero/empty summary, never an error. Grouping, distinct counting,
//! ordering and rounding all happen here rather than in the store, so the
//! output contract is enforced in one place.

use std::collections::{BTreeMap, HashSet};

use reports_client::domain::PaymentRecord;
use serde::Serialize;
use time::{Date, Month};

use crate::{
    error::ReportError,
    period::{self, Period},
    store::ReportStore,
};

/// Summed amounts keyed by currency code. Collapses to a single entry in a
/// single-currency deployment; empty when nothing matched.
pub type CurrencyTotals = BTreeMap<String, f64>;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MeterPaymentSummary {
    pub meter_id: String,
    pub total_payment: CurrencyTotals,
    pub payment_count: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthlyPaymentSummary {
    pub year: i32,
    pub month: u8,
    pub total_payment: CurrencyTotals,
    pub payment_count: u64,
    pub unique_meters: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthBreakdown {
    pub month: u8,
    pub month_name: String,
    pub total_payment: CurrencyTotals,
    pub payment_count: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct YearlyPaymentSummary {
    pub year: i32,
    pub total_payment: CurrencyTotals,
    pub payment_count: u64,
    pub unique_meters: u64,
    /// Ascending by month number; months without payments are omitted.
    pub monthly_breakdown: Vec<MonthBreakdown>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DailyTotal {
    pub date: String,
    pub kwh: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MeterConsumption {
    pub meter_id: String,
    pub date: String,
    pub consumption_kwh: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DayConsumptionSummary {
    pub date: String,
    pub total_consumption_kwh: f64,
    pub meter_count: u64,
    pub consumption_by_meter: Vec<MeterConsumption>,
}

/// Stateless reporting operations over an injected store handle.
pub struct ReportingService<S> {
    store: S,
}

impl<S: ReportStore> ReportingService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Sum of completed payments for one meter inside an inclusive window.
    pub async fn total_payment_for_meter(
        &self,
        meter_id: &str,
        period: &Period,
    ) -> Result<MeterPaymentSummary, ReportError> {
        if meter_id.is_empty() {
            return Err(ReportError::validation("meter_id", "must not be empty"));
        }

        let rows = self
            .store
            .completed_payments_for_meter(meter_id, period)
            .await?;

        Ok(MeterPaymentSummary {
            meter_id: meter_id.to_string(),
            total_payment: rounded_currency_totals(&rows),
            payment_count: rows.len() as u64,
        })
    }

    /// Cross-meter totals for one calendar month (UTC boundaries).
    pub async fn total_payment_for_month(
        &self,
        year: i32,
        month: u8,
    ) -> Result<MonthlyPaymentSummary, ReportError> {
        let window = Period::month_window(year, month)?;
        let rows = self.store.completed_payments_in_window(&window).await?;

        Ok(MonthlyPaymentSummary {
            year,
            month,
            total_payment: rounded_currency_totals(&rows),
            payment_count: rows.len() as u64,
            unique_meters: distinct_meters(&rows),
        })
    }

    /// Cross-meter totals for one calendar year (UTC boundaries) plus a
    /// per-month breakdown of the same rows.
    pub async fn total_payment_for_year(
        &self,
        year: i32,
    ) -> Result<YearlyPaymentSummary, ReportError> {
        let window = Period::year_window(year)?;
        let rows = self.store.completed_payments_in_window(&window).await?;

        // BTreeMap keyed by the UTC-normalized month number keeps the
        // breakdown ascending; months with no payments simply never get an
        // entry.
        let mut by_month: BTreeMap<u8, (Month, Vec<&PaymentRecord>)> = BTreeMap::new();
        for row in &rows {
            let month = row.month();
            by_month
                .entry(month as u8)
                .or_insert_with(|| (month, Vec::new()))
                .1
                .push(row);
        }

        let monthly_breakdown = by_month
            .into_iter()
            .map(|(number, (month, group))| MonthBreakdown {
                month: number,
                month_name: month.to_string(),
                total_payment: rounded_currency_totals_ref(&group),
                payment_count: group.len() as u64,
            })
            .collect();

        Ok(YearlyPaymentSummary {
            year,
            total_payment: rounded_currency_totals(&rows),
            payment_count: rows.len() as u64,
            unique_meters: distinct_meters(&rows),
            monthly_breakdown,
        })
    }

    /// Per-day cross-meter kWh totals inside an optional date range,
    /// ascending by date. Days absent from the data are omitted.
    pub async fn daily_consumption_range(
        &self,
        start: Option<Date>,
        end: Option<Date>,
    ) -> Result<Vec<DailyTotal>, ReportError> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(ReportError::validation(
                    "period",
                    format!("start ({s}) must not be after end ({e})"),
                ));
            }
        }

        let rows = self.store.consumption_in_range(start, end).await?;

        let mut by_date: BTreeMap<Date, f64> = BTreeMap::new();
        for row in rows {
            *by_date.entry(row.date).or_insert(0.0) += row.kwh;
        }

        Ok(by_date
            .into_iter()
            .map(|(date, kwh)| DailyTotal {
                date: period::format_date(date),
                kwh: round_kwh(kwh),
            })
            .collect())
    }

    /// Per-meter breakdown for a single day, defaulting to today (UTC),
    /// plus the cross-meter total and meter count.
    pub async fn daily_consumption_for_day(
        &self,
        date: Option<Date>,
    ) -> Result<DayConsumptionSummary, ReportError> {
        let day = date.unwrap_or_else(period::today_utc);
        let rows = self.store.consumption_for_day(day).await?;

        let total: f64 = rows.iter().map(|r| r.kwh).sum();
        let meter_count = rows.len() as u64;

        let consumption_by_meter = rows
            .into_iter()
            .map(|r| MeterConsumption {
                meter_id: r.meter_id,
                date: period::format_date(r.date),
                consumption_kwh: round_kwh(r.kwh),
            })
            .collect();

        Ok(DayConsumptionSummary {
            date: period::format_date(day),
            total_consumption_kwh: round_kwh(total),
            meter_count,
            consumption_by_meter,
        })
    }
}

/// Monetary output precision: 2 decimal places, applied once per aggregation.
fn round_amount(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Energy output precision: 1 decimal place, applied once per aggregation.
fn round_kwh(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn rounded_currency_totals(rows: &[PaymentRecord]) -> CurrencyTotals {
    sum_then_round(rows.iter())
}

fn rounded_currency_totals_ref(rows: &[&PaymentRecord]) -> CurrencyTotals {
    sum_then_round(rows.iter().copied())
}

/// Exact running sum per currency, rounded once at the end.
fn sum_then_round<'a>(rows: impl Iterator<Item = &'a PaymentRecord>) -> CurrencyTotals {
    let mut totals = CurrencyTotals::new();
    for row in rows {
        *totals.entry(row.currency.clone()).or_insert(0.0) += row.amount;
    }
    for v in totals.values_mut() {
        *v = round_amount(*v);
    }
    totals
}

/// Distinct meter count by exact identifier equality; no normalization.
fn distinct_meters(rows: &[PaymentRecord]) -> u64 {
    rows.iter()
        .map(|r| r.meter_id.as_str())
        .collect::<HashSet<_>>()
        .len() as u64
}
