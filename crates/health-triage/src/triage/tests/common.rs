use std::io;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use crate::triage::appointments::{
    Appointment, AppointmentId, AppointmentRepository, AppointmentSubmission,
    InMemoryAppointmentRepository, RepositoryError,
};
use crate::triage::audit::{AuditError, TriageAuditLog, TriageLogRecord};
use crate::triage::catalog::{CatalogError, FacilityCatalog, StaticCatalog};
use crate::triage::clock::FixedClock;
use crate::triage::domain::{Coordinate, Facility, FacilityId};
use crate::triage::ranking::RankingPolicy;
use crate::triage::service::TriageService;

pub(super) const ADDIS_ABABA: Coordinate = Coordinate::new(9.0096, 38.7629);

pub(super) fn morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 6, 7, 15, 0).unwrap()
}

pub(super) fn clinic_hours_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(morning(), 10))
}

pub(super) type MemoryService =
    TriageService<StaticCatalog, MemoryAuditLog, InMemoryAppointmentRepository>;

pub(super) fn build_service() -> (
    MemoryService,
    Arc<MemoryAuditLog>,
    Arc<InMemoryAppointmentRepository>,
) {
    let audit = Arc::new(MemoryAuditLog::default());
    let appointments = Arc::new(InMemoryAppointmentRepository::default());
    let service = TriageService::with_clock(
        Arc::new(StaticCatalog::seeded()),
        audit.clone(),
        appointments.clone(),
        RankingPolicy::default(),
        clinic_hours_clock(),
    );
    (service, audit, appointments)
}

pub(super) fn submission() -> AppointmentSubmission {
    AppointmentSubmission {
        health_post_id: Some("hp-008".to_string()),
        patient_name: Some("Tigist Haile".to_string()),
        patient_phone: Some("+251 91 100 2000".to_string()),
        appointment_date: Some("2025-01-08T10:30".to_string()),
        symptoms: Some(vec!["fever".to_string(), "headache".to_string()]),
        notes: Some("Prefers morning".to_string()),
    }
}

#[derive(Default)]
pub(super) struct MemoryAuditLog {
    entries: Mutex<Vec<TriageLogRecord>>,
}

impl MemoryAuditLog {
    pub(super) fn entries(&self) -> Vec<TriageLogRecord> {
        self.entries.lock().expect("audit mutex poisoned").clone()
    }
}

impl TriageAuditLog for MemoryAuditLog {
    fn record(&self, entry: TriageLogRecord) -> Result<(), AuditError> {
        self.entries
            .lock()
            .expect("audit mutex poisoned")
            .push(entry);
        Ok(())
    }
}

pub(super) struct FailingAuditLog;

impl TriageAuditLog for FailingAuditLog {
    fn record(&self, _entry: TriageLogRecord) -> Result<(), AuditError> {
        Err(AuditError::Unavailable("disk full".to_string()))
    }
}

pub(super) struct UnavailableCatalog;

impl FacilityCatalog for UnavailableCatalog {
    fn active(&self) -> Result<Vec<Facility>, CatalogError> {
        Err(CatalogError::Unavailable("database offline".to_string()))
    }

    fn find(&self, _id: &FacilityId) -> Result<Option<Facility>, CatalogError> {
        Err(CatalogError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct UnavailableRepository;

impl AppointmentRepository for UnavailableRepository {
    fn insert(&self, _appointment: Appointment) -> Result<Appointment, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &AppointmentId) -> Result<Option<Appointment>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Shared buffer standing in for the log output stream.
#[derive(Clone, Default)]
pub(crate) struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

impl CapturedOutput {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8(self.0.lock().expect("capture mutex poisoned").clone())
            .expect("utf8 log output")
    }
}

impl io::Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .expect("capture mutex poisoned")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedOutput {
    type Writer = CapturedOutput;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `work` under a fmt subscriber using `filter`, returning its result and the log text.
pub(crate) fn capture_logs<T>(filter: &str, work: impl FnOnce() -> T) -> (T, String) {
    let output = CapturedOutput::default();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(output.clone())
        .with_ansi(false)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, work);
    (result, output.contents())
}
