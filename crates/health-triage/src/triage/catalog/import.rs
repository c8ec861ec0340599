use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::StaticCatalog;
use crate::triage::domain::{Coordinate, Facility, FacilityId};

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidCoordinate { facility: String },
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read facility catalog: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid facility catalog CSV: {}", err),
            CatalogImportError::InvalidCoordinate { facility } => {
                write!(f, "facility '{}' has an out-of-range coordinate", facility)
            }
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
            CatalogImportError::InvalidCoordinate { .. } => None,
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Loads a facility catalog from a CSV export.
///
/// Expected header: `id,name,name_amharic,address,address_amharic,phone,latitude,
/// longitude,city,region,operating_hours,services,is_active,rating`. The `services`
/// column holds a JSON array and is kept serialized until ranking time.
pub struct FacilityCsvImporter;

impl FacilityCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<StaticCatalog, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<StaticCatalog, CatalogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut facilities = Vec::new();

        for row in csv_reader.deserialize::<FacilityRow>() {
            facilities.push(row?.into_facility()?);
        }

        Ok(StaticCatalog::new(facilities))
    }
}

#[derive(Debug, Deserialize)]
struct FacilityRow {
    id: String,
    name: String,
    #[serde(default)]
    name_amharic: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    address_amharic: String,
    #[serde(default)]
    phone: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    city: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    operating_hours: String,
    #[serde(default)]
    services: String,
    #[serde(default = "default_active", deserialize_with = "flexible_bool")]
    is_active: bool,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    rating: Option<f32>,
}

impl FacilityRow {
    fn into_facility(self) -> Result<Facility, CatalogImportError> {
        let coordinate = Coordinate::new(self.latitude, self.longitude);
        if !coordinate.is_valid() {
            return Err(CatalogImportError::InvalidCoordinate { facility: self.id });
        }

        Ok(Facility {
            id: FacilityId(self.id),
            name: self.name,
            name_amharic: self.name_amharic,
            address: self.address,
            address_amharic: self.address_amharic,
            phone: self.phone,
            coordinate,
            city: self.city,
            region: self.region,
            operating_hours: self.operating_hours,
            services: self.services,
            is_active: self.is_active,
            rating: self.rating,
        })
    }
}

fn default_active() -> bool {
    true
}

fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "expected a boolean flag, got '{other}'"
        ))),
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<f32>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
