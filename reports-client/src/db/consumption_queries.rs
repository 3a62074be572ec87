use anyhow::Result;
use sqlx::PgPool;
use time::Date;

use crate::domain::DailyConsumptionRecord;

/// Fetch daily consumption rows inside an optional inclusive date range.
///
/// Either bound may be absent independently; with neither bound this scans
/// the whole record set.
pub async fn consumption_in_range(
    pool: &PgPool,
    start: Option<Date>,
    end: Option<Date>,
) -> Result<Vec<DailyConsumptionRecord>> {
    let rows = sqlx::query_as::<_, DailyConsumptionRecord>(
        r#"
        SELECT
            meter_id,
            date,
            kwh
        FROM daily_consumption
        WHERE ($1::date IS NULL OR date >= $1)
          AND ($2::date IS NULL OR date <= $2)
        ORDER BY date, meter_id
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Fetch every meter's consumption row for a single calendar day.
pub async fn consumption_for_day(pool: &PgPool, day: Date) -> Result<Vec<DailyConsumptionRecord>> {
    let rows = sqlx::query_as::<_, DailyConsumptionRecord>(
        r#"
        SELECT
            meter_id,
            date,
            kwh
        FROM daily_consumption
        WHERE date = $1
        ORDER BY meter_id
        "#,
    )
    .bind(day)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
