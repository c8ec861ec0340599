use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, Level};

use super::domain::{Coordinate, FacilityId, UrgencyTier};

/// One triage invocation as written to the audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageLogRecord {
    pub symptoms: Vec<String>,
    pub urgency: UrgencyTier,
    pub recommended_facility_id: Option<FacilityId>,
    pub user_location: Option<Coordinate>,
    pub recorded_at: DateTime<Utc>,
}

/// Append-only sink for triage audit records.
pub trait TriageAuditLog: Send + Sync {
    fn record(&self, entry: TriageLogRecord) -> Result<(), AuditError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("audit sink unavailable: {0}")]
    Unavailable(String),
    #[error("failed to encode audit record: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Writes audit records to the `triage_audit` tracing target as JSON.
///
/// When the active subscriber filters that target out, the record is handed back
/// inside [`AuditError::Unavailable`] so the caller can surface it at a louder level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditLog;

impl TriageAuditLog for TracingAuditLog {
    fn record(&self, entry: TriageLogRecord) -> Result<(), AuditError> {
        let payload = serde_json::to_string(&entry)?;
        if !tracing::enabled!(target: "triage_audit", Level::INFO) {
            return Err(AuditError::Unavailable(format!(
                "triage_audit target is disabled; record {payload}"
            )));
        }
        info!(target: "triage_audit", urgency = %entry.urgency, record = %payload, "triage recorded");
        Ok(())
    }
}
