use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity assigned to a triage request, ordered from least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyTier {
    Low,
    Medium,
    High,
    Emergency,
}

impl UrgencyTier {
    pub const ALL: [UrgencyTier; 4] = [
        UrgencyTier::Low,
        UrgencyTier::Medium,
        UrgencyTier::High,
        UrgencyTier::Emergency,
    ];

    /// Numeric weight used when averaging symptom tiers.
    pub const fn weight(self) -> u32 {
        match self {
            UrgencyTier::Low => 1,
            UrgencyTier::Medium => 2,
            UrgencyTier::High => 3,
            UrgencyTier::Emergency => 4,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            UrgencyTier::Low => "low",
            UrgencyTier::Medium => "medium",
            UrgencyTier::High => "high",
            UrgencyTier::Emergency => "emergency",
        }
    }

    /// Patient-facing guidance shown alongside the tier.
    pub const fn advisory(self) -> Advisory {
        match self {
            UrgencyTier::Emergency => Advisory {
                english: "EMERGENCY: Seek immediate medical attention! Go to the nearest hospital emergency room.",
                amharic: "አደጋ: ወዲያውኑ የህክምና እርዳታ ይፈልጉ! ወደ ቅርብ ሆስፒታል ይሂዱ።",
            },
            UrgencyTier::High => Advisory {
                english: "HIGH PRIORITY: Please visit a health facility within 4-6 hours.",
                amharic: "ከፍተኛ ቅድሚያ: እባክዎ በ4-6 ሰዓታት ውስጥ የህክምና ተቋም ይጎብኙ።",
            },
            UrgencyTier::Medium => Advisory {
                english: "MODERATE: Visit a health post within 24 hours for evaluation.",
                amharic: "መካከለኛ: ለምርመራ በ24 ሰዓታት ውስጥ የህክምና ጣቢያ ይጎብኙ።",
            },
            UrgencyTier::Low => Advisory {
                english: "LOW PRIORITY: Monitor symptoms and visit a health post if they persist or worsen.",
                amharic: "ዝቅተኛ ቅድሚያ: ምልክቶችን ይቆጣጠሩ እና ከቀጠሉ ወይም ከባሱ የህክምና ጣቢያ ይጎብኙ።",
            },
        }
    }
}

impl fmt::Display for UrgencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Bilingual advisory message pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Advisory {
    pub english: &'static str,
    pub amharic: &'static str,
}

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Identifier wrapper for catalog facilities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacilityId(pub String);

impl fmt::Display for FacilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Health post or hospital record as stored in the catalog.
///
/// `services` keeps the stored serialized JSON list; call
/// [`Facility::parsed_services`] before presenting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub id: FacilityId,
    pub name: String,
    pub name_amharic: String,
    pub address: String,
    pub address_amharic: String,
    pub phone: String,
    pub coordinate: Coordinate,
    pub city: String,
    pub region: String,
    pub operating_hours: String,
    pub services: String,
    pub is_active: bool,
    pub rating: Option<f32>,
}

impl Facility {
    /// Decode the stored service list. A blank column is treated as no services.
    pub fn parsed_services(&self) -> Result<Vec<String>, serde_json::Error> {
        let raw = self.services.trim();
        if raw.is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_are_ordered_by_severity() {
        assert!(UrgencyTier::Low < UrgencyTier::Medium);
        assert!(UrgencyTier::Medium < UrgencyTier::High);
        assert!(UrgencyTier::High < UrgencyTier::Emergency);
        let weights: Vec<u32> = UrgencyTier::ALL.iter().map(|tier| tier.weight()).collect();
        assert_eq!(weights, vec![1, 2, 3, 4]);
    }

    #[test]
    fn tiers_serialize_lowercase() {
        let value = serde_json::to_value(UrgencyTier::Emergency).expect("serialize tier");
        assert_eq!(value, serde_json::json!("emergency"));
    }

    #[test]
    fn amharic_advisories_are_fixed_response_text() {
        let amharic: Vec<&str> = UrgencyTier::ALL
            .iter()
            .map(|tier| tier.advisory().amharic)
            .collect();
        assert_eq!(
            amharic,
            vec![
                "ዝቅተኛ ቅድሚያ: ምልክቶችን ይቆጣጠሩ እና ከቀጠሉ ወይም ከባሱ የህክምና ጣቢያ ይጎብኙ።",
                "መካከለኛ: ለምርመራ በ24 ሰዓታት ውስጥ የህክምና ጣቢያ ይጎብኙ።",
                "ከፍተኛ ቅድሚያ: እባክዎ በ4-6 ሰዓታት ውስጥ የህክምና ተቋም ይጎብኙ።",
                "አደጋ: ወዲያውኑ የህክምና እርዳታ ይፈልጉ! ወደ ቅርብ ሆስፒታል ይሂዱ።",
            ]
        );
    }

    #[test]
    fn coordinate_validation_rejects_out_of_range_values() {
        assert!(Coordinate::new(9.0096, 38.7629).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, f64::NAN).is_valid());
    }

    #[test]
    fn blank_service_column_parses_as_empty() {
        let mut facility = crate::triage::catalog::seed::facilities().remove(0);
        facility.services = "  ".to_string();
        assert!(facility.parsed_services().expect("parse").is_empty());

        facility.services = "not json".to_string();
        assert!(facility.parsed_services().is_err());
    }
}
