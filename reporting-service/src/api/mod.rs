//! HTTP dispatcher for the reporting core: parses and validates wire input,
//! invokes the matching operation, and maps errors to structured responses.
//! Logging and metrics happen here; the core itself stays silent.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use time::Date;

use crate::{
    error::ReportError,
    period::{self, Period},
    reporting::{
        DailyTotal, DayConsumptionSummary, MeterPaymentSummary, MonthlyPaymentSummary,
        ReportingService, YearlyPaymentSummary,
    },
    store::PgReportStore,
};

pub struct AppState {
    pub service: ReportingService<PgReportStore>,
    pub pool: PgPool,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/reports/payments/meter/:meter_id", get(meter_payments))
        .route("/reports/payments/month", get(month_payments))
        .route("/reports/payments/year", get(year_payments))
        .route("/reports/consumption/daily", get(consumption_range))
        .route("/reports/consumption/day", get(consumption_day))
        .with_state(state)
}

/// Wire error wrapper. Validation failures name the offending field;
/// store failures are reported as unavailable, never as empty data.
pub struct ApiError(ReportError);

impl From<ReportError> for ApiError {
    fn from(e: ReportError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            ReportError::Validation { field, reason } => {
                metrics::counter!("report_validation_errors_total").increment(1);
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "validation",
                        "field": field,
                        "reason": reason,
                    })),
                )
                    .into_response()
            }
            ReportError::Store(e) => {
                tracing::error!(error = %e, "report store query failed");
                metrics::counter!("report_store_errors_total").increment(1);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({
                        "error": "store",
                        "reason": "report store unavailable",
                    })),
                )
                    .into_response()
            }
        }
    }
}

#[derive(Deserialize)]
struct PeriodParams {
    start: String,
    end: String,
}

#[derive(Deserialize)]
struct MonthParams {
    year: i32,
    month: u8,
}

#[derive(Deserialize)]
struct YearParams {
    year: i32,
}

#[derive(Deserialize)]
struct RangeParams {
    start: Option<String>,
    end: Option<String>,
}

#[derive(Deserialize)]
struct DayParams {
    date: Option<String>,
}

async fn health(State(state): State<Arc<AppState>>) -> Response {
    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (StatusCode::OK, "ok").into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "store unreachable").into_response()
        }
    }
}

async fn meter_payments(
    State(state): State<Arc<AppState>>,
    Path(meter_id): Path<String>,
    Query(params): Query<PeriodParams>,
) -> Result<Json<MeterPaymentSummary>, ApiError> {
    metrics::counter!("report_meter_payment_requests_total").increment(1);

    let start = period::parse_date("start", &params.start)?;
    let end = period::parse_date("end", &params.end)?;
    let window = Period::from_dates(start, end)?;

    let summary = state
        .service
        .total_payment_for_meter(&meter_id, &window)
        .await?;
    Ok(Json(summary))
}

async fn month_payments(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthParams>,
) -> Result<Json<MonthlyPaymentSummary>, ApiError> {
    metrics::counter!("report_month_payment_requests_total").increment(1);

    let summary = state
        .service
        .total_payment_for_month(params.year, params.month)
        .await?;
    Ok(Json(summary))
}

async fn year_payments(
    State(state): State<Arc<AppState>>,
    Query(params): Query<YearParams>,
) -> Result<Json<YearlyPaymentSummary>, ApiError> {
    metrics::counter!("report_year_payment_requests_total").increment(1);

    let summary = state.service.total_payment_for_year(params.year).await?;
    Ok(Json(summary))
}

async fn consumption_range(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RangeParams>,
) -> Result<Json<Vec<DailyTotal>>, ApiError> {
    metrics::counter!("report_consumption_range_requests_total").increment(1);

    let start = parse_optional_date("start", params.start.as_deref())?;
    let end = parse_optional_date("end", params.end.as_deref())?;

    let totals = state.service.daily_consumption_range(start, end).await?;
    Ok(Json(totals))
}

async fn consumption_day(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DayParams>,
) -> Result<Json<DayConsumptionSummary>, ApiError> {
    metrics::counter!("report_consumption_day_requests_total").increment(1);

    let date = parse_optional_date("date", params.date.as_deref())?;

    let summary = state.service.daily_consumption_for_day(date).await?;
    Ok(Json(summary))
}

fn parse_optional_date(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<Date>, ReportError> {
    raw.map(|s| period::parse_date(field, s)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn optional_date_passes_through_absence() {
        assert_eq!(parse_optional_date("date", None).unwrap(), None);
    }

    #[test]
    fn optional_date_parses_wire_format() {
        let parsed = parse_optional_date("date", Some("2025-10-01")).unwrap();
        assert_eq!(parsed, Some(date!(2025-10-01)));
    }

    #[test]
    fn optional_date_rejects_garbage() {
        let err = parse_optional_date("date", Some("not-a-date")).unwrap_err();
        assert!(matches!(err, ReportError::Validation { field: "date", .. }));
    }

    #[test]
    fn validation_errors_map_to_bad_request() {
        let resp =
            ApiError(ReportError::validation("month", "must be in 1..=12")).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_errors_map_to_service_unavailable() {
        let resp = ApiError(ReportError::Store(anyhow::anyhow!("down"))).into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
