/// Error taxonomy for report operations.
///
/// Absence of matching records is never an error: operations return explicit
/// zero-valued summaries. `Store` is reserved for infrastructure failures so
/// callers can tell "no data" apart from "query failed".
#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("store query failed: {0}")]
    Store(#[source] anyhow::Error),
}

impl ReportError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}
