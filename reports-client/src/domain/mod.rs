mod daily_consumption;
mod payment;

pub use daily_consumption::DailyConsumptionRecord;
pub use payment::{PaymentRecord, PaymentStatus};
