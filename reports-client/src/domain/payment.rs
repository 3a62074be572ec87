use serde::{Deserialize, Serialize};
use time::{Month, OffsetDateTime, UtcOffset};

/// Payment lifecycle status. Only `Completed` payments count toward totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Completed,
    Pending,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PaymentRecord {
    pub meter_id: String,
    pub amount: f64,
    pub currency: String,
    pub paid_at: OffsetDateTime,
    pub status: PaymentStatus,
}

impl PaymentRecord {
    /// Calendar month the payment falls in, normalized to UTC. Stored
    /// offsets are preserved as received; every calendar derivation goes
    /// through UTC.
    pub fn month(&self) -> Month {
        self.paid_at.to_offset(UtcOffset::UTC).month()
    }
}
