use serde::{Deserialize, Serialize};
use time::Date;

/// One meter's consumption for one calendar day.
///
/// The store enforces at most one row per (meter_id, date).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DailyConsumptionRecord {
    pub meter_id: String,
    pub date: Date,
    pub kwh: f64,
}
