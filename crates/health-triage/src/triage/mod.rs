//! Symptom triage: urgency classification, facility ranking, audit logging, and
//! appointment booking behind a single service facade and HTTP router.

pub mod appointments;
pub mod audit;
pub mod catalog;
pub mod clock;
pub mod domain;
pub mod geo;
pub mod ranking;
pub mod request;
pub mod router;
pub mod service;
pub mod symptoms;

#[cfg(test)]
mod tests;

pub use appointments::{
    Appointment, AppointmentConfirmation, AppointmentId, AppointmentRepository,
    AppointmentStatus, AppointmentSubmission, InMemoryAppointmentRepository, RepositoryError,
};
pub use audit::{AuditError, TracingAuditLog, TriageAuditLog, TriageLogRecord};
pub use catalog::{
    CatalogError, CatalogImportError, FacilityCatalog, FacilityCsvImporter, FacilitySummary,
    StaticCatalog,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use domain::{Coordinate, Facility, FacilityId, UrgencyTier};
pub use geo::haversine_km;
pub use ranking::{rank_facilities, RankingPolicy, Recommendation, MAX_RECOMMENDATIONS};
pub use request::{TriageRequest, ValidationError};
pub use router::triage_router;
pub use service::{TriageResult, TriageService, TriageServiceError};
pub use symptoms::{classify, Assessment, Symptom, SymptomCategory, TriageError, SYMPTOMS};
