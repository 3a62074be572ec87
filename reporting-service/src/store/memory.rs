//! In-memory `ReportStore` used by the reporting core's tests. Applies the
//! same filters the SQL queries push down to Postgres.

use reports_client::domain::{DailyConsumptionRecord, PaymentRecord, PaymentStatus};
use time::Date;

use crate::{error::ReportError, period::Period};

use super::ReportStore;

#[derive(Default)]
pub struct InMemoryStore {
    pub payments: Vec<PaymentRecord>,
    pub consumption: Vec<DailyConsumptionRecord>,
}

#[async_trait::async_trait]
impl ReportStore for InMemoryStore {
    async fn completed_payments_for_meter(
        &self,
        meter_id: &str,
        period: &Period,
    ) -> Result<Vec<PaymentRecord>, ReportError> {
        Ok(self
            .payments
            .iter()
            .filter(|p| {
                p.meter_id == meter_id
                    && p.status == PaymentStatus::Completed
                    && period.contains(p.paid_at)
            })
            .cloned()
            .collect())
    }

    async fn completed_payments_in_window(
        &self,
        period: &Period,
    ) -> Result<Vec<PaymentRecord>, ReportError> {
        Ok(self
            .payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Completed && period.contains(p.paid_at))
            .cloned()
            .collect())
    }

    async fn consumption_in_range(
        &self,
        start: Option<Date>,
        end: Option<Date>,
    ) -> Result<Vec<DailyConsumptionRecord>, ReportError> {
        Ok(self
            .consumption
            .iter()
            .filter(|c| {
                start.map_or(true, |s| c.date >= s) && end.map_or(true, |e| c.date <= e)
            })
            .cloned()
            .collect())
    }

    async fn consumption_for_day(
        &self,
        day: Date,
    ) -> Result<Vec<DailyConsumptionRecord>, ReportError> {
        let mut rows: Vec<_> = self
            .consumption
            .iter()
            .filter(|c| c.date == day)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.meter_id.cmp(&b.meter_id));
        Ok(rows)
    }
}

/// Store whose every query fails; exercises the infrastructure-error path.
pub struct FailingStore;

#[async_trait::async_trait]
impl ReportStore for FailingStore {
    async fn completed_payments_for_meter(
        &self,
        _meter_id: &str,
        _period: &Period,
    ) -> Result<Vec<PaymentRecord>, ReportError> {
        Err(ReportError::Store(anyhow::anyhow!("store unreachable")))
    }

    async fn completed_payments_in_window(
        &self,
        _period: &Period,
    ) -> Result<Vec<PaymentRecord>, ReportError> {
        Err(ReportError::Store(anyhow::anyhow!("store unreachable")))
    }

    async fn consumption_in_range(
        &self,
        _start: Option<Date>,
        _end: Option<Date>,
    ) -> Result<Vec<DailyConsumptionRecord>, ReportError> {
        Err(ReportError::Store(anyhow::anyhow!("store unreachable")))
    }

    async fn consumption_for_day(
        &self,
        _day: Date,
    ) -> Result<Vec<DailyConsumptionRecord>, ReportError> {
        Err(ReportError::Store(anyhow::anyhow!("store unreachable")))
    }
}
