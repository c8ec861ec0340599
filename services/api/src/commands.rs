use crate::infra::load_catalog;
use clap::Args;
use health_triage::config::AppConfig;
use health_triage::error::AppError;
use health_triage::telemetry;
use health_triage::triage::{
    Coordinate, FacilityCatalog, InMemoryAppointmentRepository, StaticCatalog, TracingAuditLog,
    TriageRequest, TriageResult, TriageService, ValidationError, SYMPTOMS,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct TriageArgs {
    /// Symptom identifier (repeat for several, e.g. --symptom fever --symptom cough)
    #[arg(long = "symptom", required = true)]
    pub(crate) symptoms: Vec<String>,
    /// Caller latitude in decimal degrees
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub(crate) lat: Option<f64>,
    /// Caller longitude in decimal degrees
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub(crate) lng: Option<f64>,
    /// Load facilities from a CSV export instead of the seeded catalog
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct FacilitiesArgs {
    /// Load facilities from a CSV export instead of the seeded catalog
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

pub(crate) fn run_triage(args: TriageArgs) -> Result<(), AppError> {
    let TriageArgs {
        symptoms,
        lat,
        lng,
        catalog,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    let catalog = load_catalog(&config.triage, catalog.as_deref())?;
    let location = match (lat, lng) {
        (Some(lat), Some(lng)) => {
            let coordinate = Coordinate::new(lat, lng);
            if !coordinate.is_valid() {
                return Err(AppError::Triage(ValidationError::InvalidLocation.into()));
            }
            Some(coordinate)
        }
        _ => None,
    };

    let service = TriageService::new(
        Arc::new(catalog),
        Arc::new(TracingAuditLog),
        Arc::new(InMemoryAppointmentRepository::default()),
        config.triage.ranking_policy(),
    );
    let result = service.triage(TriageRequest::new(symptoms, location))?;
    render_triage(&result);
    Ok(())
}

pub(crate) fn run_symptoms() -> Result<(), AppError> {
    println!("{:<22} {:<10} {:<13} LABEL", "ID", "URGENCY", "CATEGORY");
    for symptom in SYMPTOMS.iter() {
        println!(
            "{:<22} {:<10} {:<13} {} / {}",
            symptom.id,
            symptom.urgency,
            symptom.category.label(),
            symptom.english,
            symptom.amharic
        );
    }
    Ok(())
}

pub(crate) fn run_facilities(args: FacilitiesArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let catalog = load_catalog(&config.triage, args.catalog.as_deref())?;
    render_facilities(&catalog)
}

fn render_facilities(catalog: &StaticCatalog) -> Result<(), AppError> {
    let facilities = catalog.active().map_err(|err| AppError::Triage(err.into()))?;
    if facilities.is_empty() {
        println!("No active facilities in the catalog.");
        return Ok(());
    }

    for facility in facilities {
        println!(
            "{} | {} ({}) | {}, {} | {} | {}",
            facility.id,
            facility.name,
            facility.name_amharic,
            facility.city,
            facility.region,
            facility.phone,
            facility.operating_hours
        );
    }
    Ok(())
}

fn render_triage(result: &TriageResult) {
    println!("Urgency: {}", result.urgency);
    println!("{}", result.message);
    println!("{}", result.message_amharic);

    if result.recommendations.is_empty() {
        println!("\nNo active facilities available.");
        return;
    }

    println!("\nRecommended facilities:");
    for (index, entry) in result.recommendations.iter().enumerate() {
        let distance = entry
            .distance
            .map(|km| format!("{km:.1} km"))
            .unwrap_or_else(|| "distance unknown".to_string());
        let status = if entry.is_open { "open" } else { "closed" };
        println!(
            "{}. {} ({}) - {} - {} - {}",
            index + 1,
            entry.name,
            entry.city,
            distance,
            status,
            entry.phone
        );
        if !entry.services.is_empty() {
            println!("   Services: {}", entry.services.join(", "));
        }
    }
}
