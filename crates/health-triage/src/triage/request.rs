use serde_json::Value;

use super::domain::Coordinate;

/// Validated triage input.
#[derive(Debug, Clone, PartialEq)]
pub struct TriageRequest {
    pub symptoms: Vec<String>,
    pub user_location: Option<Coordinate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid symptoms data")]
    InvalidSymptoms,
    #[error("Invalid location data")]
    InvalidLocation,
    #[error("Missing required fields")]
    MissingAppointmentFields,
    #[error("Invalid request body")]
    MalformedBody,
}

impl TriageRequest {
    pub fn new(symptoms: Vec<String>, user_location: Option<Coordinate>) -> Self {
        Self {
            symptoms,
            user_location,
        }
    }

    /// Validate a raw JSON body of the form `{ symptoms: [..], userLocation?: {lat, lng} }`.
    ///
    /// `symptoms` must be a non-empty array of strings. A `null` location is the same as
    /// an absent one.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let symptoms = body
            .get("symptoms")
            .and_then(Value::as_array)
            .ok_or(ValidationError::InvalidSymptoms)?
            .iter()
            .map(|symptom| symptom.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .ok_or(ValidationError::InvalidSymptoms)?;
        if symptoms.is_empty() {
            return Err(ValidationError::InvalidSymptoms);
        }

        let user_location = match body.get("userLocation") {
            None | Some(Value::Null) => None,
            Some(raw) => {
                let coordinate: Coordinate = serde_json::from_value(raw.clone())
                    .map_err(|_| ValidationError::InvalidLocation)?;
                if !coordinate.is_valid() {
                    return Err(ValidationError::InvalidLocation);
                }
                Some(coordinate)
            }
        };

        Ok(Self::new(symptoms, user_location))
    }
}
