//! Static symptom table and the urgency classifier built on top of it.

use serde::Serialize;

use super::domain::UrgencyTier;

/// Body system a symptom belongs to, used to group the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SymptomCategory {
    General,
    Respiratory,
    Neurological,
    Digestive,
    Cardiac,
    Skin,
    Trauma,
}

impl SymptomCategory {
    pub const fn label(self) -> &'static str {
        match self {
            SymptomCategory::General => "general",
            SymptomCategory::Respiratory => "respiratory",
            SymptomCategory::Neurological => "neurological",
            SymptomCategory::Digestive => "digestive",
            SymptomCategory::Cardiac => "cardiac",
            SymptomCategory::Skin => "skin",
            SymptomCategory::Trauma => "trauma",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Symptom {
    pub id: &'static str,
    pub english: &'static str,
    pub amharic: &'static str,
    pub category: SymptomCategory,
    pub urgency: UrgencyTier,
}

const fn symptom(
    id: &'static str,
    english: &'static str,
    amharic: &'static str,
    category: SymptomCategory,
    urgency: UrgencyTier,
) -> Symptom {
    Symptom {
        id,
        english,
        amharic,
        category,
        urgency,
    }
}

pub const SYMPTOMS: [Symptom; 15] = [
    symptom("fever", "Fever", "ትኩሳት", SymptomCategory::General, UrgencyTier::Medium),
    symptom("cough", "Cough", "ሳል", SymptomCategory::Respiratory, UrgencyTier::Low),
    symptom("headache", "Headache", "ራስ ምታት", SymptomCategory::Neurological, UrgencyTier::Medium),
    symptom("stomach_pain", "Stomach pain", "የሆድ ህመም", SymptomCategory::Digestive, UrgencyTier::Medium),
    symptom("diarrhea", "Diarrhea", "ተቅማጥ", SymptomCategory::Digestive, UrgencyTier::Medium),
    symptom("vomiting", "Vomiting", "ማስመለስ", SymptomCategory::Digestive, UrgencyTier::Medium),
    symptom("chest_pain", "Chest pain", "የደረት ህመም", SymptomCategory::Cardiac, UrgencyTier::Emergency),
    symptom(
        "breathing_difficulty",
        "Breathing difficulty",
        "የመተንፈስ ችግር",
        SymptomCategory::Respiratory,
        UrgencyTier::Emergency,
    ),
    symptom("dizziness", "Dizziness", "መፍዘዝ", SymptomCategory::Neurological, UrgencyTier::Medium),
    symptom("fatigue", "Fatigue", "ድካም", SymptomCategory::General, UrgencyTier::Low),
    symptom(
        "loss_of_taste",
        "Loss of taste/smell",
        "ጣዕም ማጣት",
        SymptomCategory::Neurological,
        UrgencyTier::Medium,
    ),
    symptom("sore_throat", "Sore throat", "የጉሮሮ ህመም", SymptomCategory::Respiratory, UrgencyTier::Low),
    symptom("body_aches", "Body aches", "የሰውነት ህመም", SymptomCategory::General, UrgencyTier::Medium),
    symptom("rash", "Rash", "የቆዳ ሽፍታ", SymptomCategory::Skin, UrgencyTier::Low),
    symptom("injury", "Injury", "የሰውነት ጉዳት", SymptomCategory::Trauma, UrgencyTier::High),
];

/// Symptoms that force an emergency classification regardless of the rest of the set.
const EMERGENCY_OVERRIDES: [&str; 2] = ["chest_pain", "breathing_difficulty"];
/// Symptoms that force a high classification when no emergency override applies.
const HIGH_OVERRIDES: [&str; 1] = ["injury"];

pub fn lookup(id: &str) -> Option<&'static Symptom> {
    SYMPTOMS.iter().find(|symptom| symptom.id == id)
}

/// Tier for a single identifier; unknown identifiers count as low.
pub fn tier_for(id: &str) -> UrgencyTier {
    lookup(id)
        .map(|symptom| symptom.urgency)
        .unwrap_or(UrgencyTier::Low)
}

/// Outcome of classifying a symptom set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Assessment {
    pub urgency: UrgencyTier,
    pub message: &'static str,
    pub message_amharic: &'static str,
}

impl From<UrgencyTier> for Assessment {
    fn from(urgency: UrgencyTier) -> Self {
        let advisory = urgency.advisory();
        Self {
            urgency,
            message: advisory.english,
            message_amharic: advisory.amharic,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TriageError {
    #[error("at least one symptom is required")]
    NoSymptoms,
}

/// Classify a non-empty symptom set into a single urgency tier.
pub fn classify<S: AsRef<str>>(symptoms: &[S]) -> Result<Assessment, TriageError> {
    if symptoms.is_empty() {
        return Err(TriageError::NoSymptoms);
    }

    let contains = |needles: &[&str]| {
        symptoms
            .iter()
            .any(|symptom| needles.contains(&symptom.as_ref()))
    };

    if contains(&EMERGENCY_OVERRIDES) {
        return Ok(UrgencyTier::Emergency.into());
    }
    if contains(&HIGH_OVERRIDES) {
        return Ok(UrgencyTier::High.into());
    }

    let total: u32 = symptoms
        .iter()
        .map(|symptom| tier_for(symptom.as_ref()).weight())
        .sum();
    let mean = f64::from(total) / symptoms.len() as f64;

    Ok(tier_for_mean(mean).into())
}

/// Threshold an averaged weight. Never yields `Emergency`; that tier only comes
/// from the overrides.
pub fn tier_for_mean(mean: f64) -> UrgencyTier {
    if mean >= 3.5 {
        UrgencyTier::High
    } else if mean >= 2.5 {
        UrgencyTier::Medium
    } else {
        UrgencyTier::Low
    }
}
