use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::appointments::{
    Appointment, AppointmentConfirmation, AppointmentId, AppointmentRepository,
    AppointmentStatus, AppointmentSubmission, RepositoryError,
};
use super::audit::{TriageAuditLog, TriageLogRecord};
use super::catalog::{CatalogError, FacilityCatalog, FacilitySummary};
use super::clock::{Clock, SystemClock};
use super::domain::{FacilityId, UrgencyTier};
use super::ranking::{rank_facilities, RankingPolicy, Recommendation};
use super::request::{TriageRequest, ValidationError};
use super::symptoms::{classify, Symptom, TriageError, SYMPTOMS};

/// Outcome returned to the caller of a triage request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageResult {
    pub urgency: UrgencyTier,
    pub message: &'static str,
    pub message_amharic: &'static str,
    pub recommendations: Vec<Recommendation>,
}

/// Service composing the classifier, facility catalog, audit trail, and booking store.
pub struct TriageService<C, L, R> {
    catalog: Arc<C>,
    audit: Arc<L>,
    appointments: Arc<R>,
    clock: Arc<dyn Clock>,
    policy: RankingPolicy,
}

static APPOINTMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_appointment_id() -> AppointmentId {
    let id = APPOINTMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AppointmentId(format!("apt-{id:06}"))
}

impl<C, L, R> TriageService<C, L, R>
where
    C: FacilityCatalog + 'static,
    L: TriageAuditLog + 'static,
    R: AppointmentRepository + 'static,
{
    pub fn new(catalog: Arc<C>, audit: Arc<L>, appointments: Arc<R>, policy: RankingPolicy) -> Self {
        Self::with_clock(catalog, audit, appointments, policy, Arc::new(SystemClock))
    }

    pub fn with_clock(
        catalog: Arc<C>,
        audit: Arc<L>,
        appointments: Arc<R>,
        policy: RankingPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            catalog,
            audit,
            appointments,
            clock,
            policy,
        }
    }

    /// Classify the symptoms, rank facilities, and write the audit record.
    ///
    /// A failed audit write is logged and otherwise ignored.
    pub fn triage(&self, request: TriageRequest) -> Result<TriageResult, TriageServiceError> {
        let assessment = classify(&request.symptoms)?;
        let facilities = self.catalog.active()?;
        let recommendations = rank_facilities(
            &facilities,
            request.user_location,
            self.clock.local_hour(),
            &self.policy,
        )?;

        let entry = TriageLogRecord {
            symptoms: request.symptoms,
            urgency: assessment.urgency,
            recommended_facility_id: recommendations.first().map(|top| top.id.clone()),
            user_location: request.user_location,
            recorded_at: self.clock.now_utc(),
        };
        if let Err(error) = self.audit.record(entry) {
            warn!(%error, urgency = %assessment.urgency, "failed to write triage audit record");
        }

        info!(
            urgency = %assessment.urgency,
            recommendations = recommendations.len(),
            located = request.user_location.is_some(),
            "triage completed"
        );

        Ok(TriageResult {
            urgency: assessment.urgency,
            message: assessment.message,
            message_amharic: assessment.message_amharic,
            recommendations,
        })
    }

    /// Validate and store an appointment request against a known facility.
    pub fn book(
        &self,
        submission: AppointmentSubmission,
    ) -> Result<AppointmentConfirmation, TriageServiceError> {
        let request = submission
            .validate()
            .ok_or(ValidationError::MissingAppointmentFields)?;
        let facility = self
            .catalog
            .find(&request.health_post_id)?
            .ok_or_else(|| TriageServiceError::FacilityNotFound(request.health_post_id.clone()))?;

        let appointment = Appointment {
            id: next_appointment_id(),
            health_post_id: facility.id,
            health_post_name: facility.name,
            health_post_name_amharic: facility.name_amharic,
            patient_name: request.patient_name,
            patient_phone: request.patient_phone,
            appointment_date: request.appointment_date,
            symptoms: request.symptoms,
            notes: request.notes,
            status: AppointmentStatus::Confirmed,
            created_at: self.clock.now_utc(),
        };

        let stored = self.appointments.insert(appointment)?;
        info!(
            appointment_id = %stored.id,
            health_post_id = %stored.health_post_id,
            "appointment booked"
        );
        Ok(AppointmentConfirmation::confirmed(stored))
    }

    pub fn appointment(&self, id: &AppointmentId) -> Result<Appointment, TriageServiceError> {
        self.appointments
            .fetch(id)?
            .ok_or_else(|| TriageServiceError::AppointmentNotFound(id.clone()))
    }

    pub fn symptoms(&self) -> &'static [Symptom] {
        &SYMPTOMS
    }

    pub fn facilities(&self) -> Result<Vec<FacilitySummary>, TriageServiceError> {
        let facilities = self.catalog.active()?;
        let summaries = facilities
            .iter()
            .map(FacilitySummary::from_facility)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(summaries)
    }
}

/// Error raised by the triage service.
#[derive(Debug, thiserror::Error)]
pub enum TriageServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Classification(#[from] TriageError),
    #[error("Health post not found")]
    FacilityNotFound(FacilityId),
    #[error("Appointment not found")]
    AppointmentNotFound(AppointmentId),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
