pub mod consumption_queries;
pub mod payment_queries;
