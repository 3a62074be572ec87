use reports_client::{
    db::{consumption_queries, payment_queries},
    domain::{DailyConsumptionRecord, PaymentRecord},
};
use sqlx::PgPool;
use time::Date;

use crate::{error::ReportError, period::Period};

#[cfg(test)]
pub(crate) mod memory;

/// Record-fetch capabilities the reporting core needs from the document
/// store. Filtering is pushed down here; grouping, summing and rounding stay
/// in the core so the output contract holds regardless of backend.
///
/// The handle is injected at construction; connection lifecycle belongs to
/// the process that built the pool, never to the core.
#[async_trait::async_trait]
pub trait ReportStore: Send + Sync {
    /// Completed payments for one meter inside an inclusive window.
    async fn completed_payments_for_meter(
        &self,
        meter_id: &str,
        period: &Period,
    ) -> Result<Vec<PaymentRecord>, ReportError>;

    /// Completed payments across all meters inside an inclusive window.
    async fn completed_payments_in_window(
        &self,
        period: &Period,
    ) -> Result<Vec<PaymentRecord>, ReportError>;

    /// Daily consumption rows with optional independent date bounds.
    async fn consumption_in_range(
        &self,
        start: Option<Date>,
        end: Option<Date>,
    ) -> Result<Vec<DailyConsumptionRecord>, ReportError>;

    /// Every meter's consumption row for a single day.
    async fn consumption_for_day(&self, day: Date)
        -> Result<Vec<DailyConsumptionRecord>, ReportError>;
}

/// Postgres-backed store delegating to the `reports-client` query functions.
#[derive(Clone)]
pub struct PgReportStore {
    pool: PgPool,
}

impl PgReportStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ReportStore for PgReportStore {
    async fn completed_payments_for_meter(
        &self,
        meter_id: &str,
        period: &Period,
    ) -> Result<Vec<PaymentRecord>, ReportError> {
        payment_queries::completed_payments_for_meter(&self.pool, meter_id, period.start, period.end)
            .await
            .map_err(ReportError::Store)
    }

    async fn completed_payments_in_window(
        &self,
        period: &Period,
    ) -> Result<Vec<PaymentRecord>, ReportError> {
        payment_queries::completed_payments_between(&self.pool, period.start, period.end)
            .await
            .map_err(ReportError::Store)
    }

    async fn consumption_in_range(
        &self,
        start: Option<Date>,
        end: Option<Date>,
    ) -> Result<Vec<DailyConsumptionRecord>, ReportError> {
        consumption_queries::consumption_in_range(&self.pool, start, end)
            .await
            .map_err(ReportError::Store)
    }

    async fn consumption_for_day(
        &self,
        day: Date,
    ) -> Result<Vec<DailyConsumptionRecord>, ReportError> {
        consumption_queries::consumption_for_day(&self.pool, day)
            .await
            .map_err(ReportError::Store)
    }
}
