use anyhow::Result;
use sqlx::PgPool;
use time::OffsetDateTime;

use crate::domain::PaymentRecord;

/// Fetch all completed payments for a single meter inside an inclusive window.
pub async fn completed_payments_for_meter(
    pool: &PgPool,
    meter_id: &str,
    start: OffsetDateTime,
    end: OffsetDateTime,
) -> Result<Vec<PaymentRecord>> {
    let rows = sqlx::query_as::<_, PaymentRecord>(
        r#"
        SELECT
            meter_id,
            amount,
            currency,
            paid_at,
            status
        FROM payments
        WHERE meter_id = $1
          AND status = 'completed'
          AND paid_at >= $2
          AND paid_at <= $3
        ORDER BY paid_at
        "#,
    )
    .bind(meter_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Fetch all completed payments across meters inside an inclusive window.
///
/// Used for calendar-month and calendar-year reports; the caller computes
/// the window boundaries in UTC.
pub async fn completed_payments_between(
    pool: &PgPool,
    start: OffsetDateTime,
    end: OffsetDateTime,
) -> Result<Vec<PaymentRecord>> {
    let rows = sqlx::query_as::<_, PaymentRecord>(
        r#"
        SELECT
            meter_id,
            amount,
            currency,
            paid_at,
            status
        FROM payments
        WHERE status = 'completed'
          AND paid_at >= $1
          AND paid_at <= $2
        ORDER BY paid_at
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
