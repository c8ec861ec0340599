use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::FacilityId;

pub const BOOKING_CONFIRMED_MESSAGE: &str = "Appointment booked successfully";
pub const BOOKING_CONFIRMED_MESSAGE_AMHARIC: &str = "ቀጠሮው በተሳካ ሁኔታ ተይዟል";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppointmentId(pub String);

impl fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Booking form as submitted; every field is optional until validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentSubmission {
    pub health_post_id: Option<String>,
    pub patient_name: Option<String>,
    pub patient_phone: Option<String>,
    pub appointment_date: Option<String>,
    pub symptoms: Option<Vec<String>>,
    pub notes: Option<String>,
}

/// Booking request with all required fields present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentRequest {
    pub health_post_id: FacilityId,
    pub patient_name: String,
    pub patient_phone: String,
    pub appointment_date: String,
    pub symptoms: Option<Vec<String>>,
    pub notes: Option<String>,
}

impl AppointmentSubmission {
    /// Blank strings count as missing.
    pub fn validate(self) -> Option<AppointmentRequest> {
        let required = |value: Option<String>| value.filter(|value| !value.trim().is_empty());

        Some(AppointmentRequest {
            health_post_id: FacilityId(required(self.health_post_id)?),
            patient_name: required(self.patient_name)?,
            patient_phone: required(self.patient_phone)?,
            appointment_date: required(self.appointment_date)?,
            symptoms: self.symptoms,
            notes: self.notes,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Confirmed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: AppointmentId,
    pub health_post_id: FacilityId,
    pub health_post_name: String,
    pub health_post_name_amharic: String,
    pub patient_name: String,
    pub patient_phone: String,
    pub appointment_date: String,
    pub symptoms: Option<Vec<String>>,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

/// Response body returned once a booking is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentConfirmation {
    pub success: bool,
    pub appointment: Appointment,
    pub message: &'static str,
    pub message_amharic: &'static str,
}

impl AppointmentConfirmation {
    pub fn confirmed(appointment: Appointment) -> Self {
        Self {
            success: true,
            appointment,
            message: BOOKING_CONFIRMED_MESSAGE,
            message_amharic: BOOKING_CONFIRMED_MESSAGE_AMHARIC,
        }
    }
}

/// Storage abstraction for booked appointments.
pub trait AppointmentRepository: Send + Sync {
    fn insert(&self, appointment: Appointment) -> Result<Appointment, RepositoryError>;
    fn fetch(&self, id: &AppointmentId) -> Result<Option<Appointment>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Process-local appointment store.
#[derive(Debug, Default)]
pub struct InMemoryAppointmentRepository {
    records: Mutex<HashMap<AppointmentId, Appointment>>,
}

impl InMemoryAppointmentRepository {
    pub fn len(&self) -> usize {
        self.records.lock().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AppointmentRepository for InMemoryAppointmentRepository {
    fn insert(&self, appointment: Appointment) -> Result<Appointment, RepositoryError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("appointment store poisoned".to_string()))?;
        if guard.contains_key(&appointment.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(appointment.id.clone(), appointment.clone());
        Ok(appointment)
    }

    fn fetch(&self, id: &AppointmentId) -> Result<Option<Appointment>, RepositoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("appointment store poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn submission() -> AppointmentSubmission {
        AppointmentSubmission {
            health_post_id: Some("hp-001".to_string()),
            patient_name: Some("Abebe Kebede".to_string()),
            patient_phone: Some("+251 91 234 5678".to_string()),
            appointment_date: Some("2025-01-07T09:00".to_string()),
            symptoms: Some(vec!["fever".to_string()]),
            notes: None,
        }
    }

    fn appointment(id: &str) -> Appointment {
        Appointment {
            id: AppointmentId(id.to_string()),
            health_post_id: FacilityId("hp-001".to_string()),
            health_post_name: "Addis Ababa General Hospital".to_string(),
            health_post_name_amharic: "አዲስ አበባ አጠቃላይ ሆስፒታል".to_string(),
            patient_name: "Abebe Kebede".to_string(),
            patient_phone: "+251 91 234 5678".to_string(),
            appointment_date: "2025-01-07T09:00".to_string(),
            symptoms: None,
            notes: None,
            status: AppointmentStatus::Confirmed,
            created_at: Utc.with_ymd_and_hms(2025, 1, 6, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn validate_accepts_complete_submissions() {
        let request = submission().validate().expect("valid submission");
        assert_eq!(request.health_post_id, FacilityId("hp-001".to_string()));
        assert_eq!(request.symptoms, Some(vec!["fever".to_string()]));
    }

    #[test]
    fn validate_rejects_missing_or_blank_required_fields() {
        let mut missing_name = submission();
        missing_name.patient_name = None;
        assert!(missing_name.validate().is_none());

        let mut blank_phone = submission();
        blank_phone.patient_phone = Some("   ".to_string());
        assert!(blank_phone.validate().is_none());

        let mut missing_date = submission();
        missing_date.appointment_date = None;
        assert!(missing_date.validate().is_none());

        assert!(AppointmentSubmission::default().validate().is_none());
    }

    #[test]
    fn submission_deserializes_camel_case_payloads() {
        let submission: AppointmentSubmission = serde_json::from_value(serde_json::json!({
            "healthPostId": "hp-002",
            "patientName": "Almaz",
            "patientPhone": "0911",
            "appointmentDate": "2025-02-01",
        }))
        .expect("deserialize");
        assert_eq!(submission.health_post_id.as_deref(), Some("hp-002"));
        assert!(submission.symptoms.is_none());
    }

    #[test]
    fn repository_rejects_duplicate_ids() {
        let repository = InMemoryAppointmentRepository::default();
        repository.insert(appointment("apt-1")).expect("insert");
        assert!(matches!(
            repository.insert(appointment("apt-1")),
            Err(RepositoryError::Conflict)
        ));
        assert_eq!(repository.len(), 1);
        assert!(repository
            .fetch(&AppointmentId("apt-1".to_string()))
            .expect("fetch")
            .is_some());
    }

    #[test]
    fn confirmation_serializes_status_and_messages() {
        let confirmation = AppointmentConfirmation::confirmed(appointment("apt-2"));
        let value = serde_json::to_value(&confirmation).expect("serialize");
        assert_eq!(value["success"], true);
        assert_eq!(value["appointment"]["status"], "confirmed");
        assert_eq!(value["appointment"]["healthPostId"], "hp-001");
        assert_eq!(value["message"], BOOKING_CONFIRMED_MESSAGE);
        assert_eq!(value["messageAmharic"], BOOKING_CONFIRMED_MESSAGE_AMHARIC);
    }
}
