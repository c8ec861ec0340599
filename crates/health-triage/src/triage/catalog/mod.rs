mod import;
pub mod seed;

pub use import::{CatalogImportError, FacilityCsvImporter};

use serde::Serialize;

use super::domain::{Facility, FacilityId};

/// Read-only source of health facilities.
pub trait FacilityCatalog: Send + Sync {
    /// All facilities currently flagged active, in catalog order.
    fn active(&self) -> Result<Vec<Facility>, CatalogError>;
    /// Resolve a facility by id, whether or not it is active.
    fn find(&self, id: &FacilityId) -> Result<Option<Facility>, CatalogError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("facility {facility} has a malformed service list: {source}")]
    MalformedServices {
        facility: FacilityId,
        #[source]
        source: serde_json::Error,
    },
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Catalog backed by a fixed list loaded at startup.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    facilities: Vec<Facility>,
}

impl StaticCatalog {
    pub fn new(facilities: Vec<Facility>) -> Self {
        Self { facilities }
    }

    /// The eight regional facilities the service ships with.
    pub fn seeded() -> Self {
        Self::new(seed::facilities())
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }
}

impl FacilityCatalog for StaticCatalog {
    fn active(&self) -> Result<Vec<Facility>, CatalogError> {
        Ok(self
            .facilities
            .iter()
            .filter(|facility| facility.is_active)
            .cloned()
            .collect())
    }

    fn find(&self, id: &FacilityId) -> Result<Option<Facility>, CatalogError> {
        Ok(self
            .facilities
            .iter()
            .find(|facility| &facility.id == id)
            .cloned())
    }
}

/// Directory listing entry exposed by the facilities endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilitySummary {
    pub id: FacilityId,
    pub name: String,
    pub name_amharic: String,
    pub city: String,
    pub region: String,
    pub phone: String,
    pub hours: String,
    pub services: Vec<String>,
}

impl FacilitySummary {
    pub fn from_facility(facility: &Facility) -> Result<Self, CatalogError> {
        let services =
            facility
                .parsed_services()
                .map_err(|source| CatalogError::MalformedServices {
                    facility: facility.id.clone(),
                    source,
                })?;

        Ok(Self {
            id: facility.id.clone(),
            name: facility.name.clone(),
            name_amharic: facility.name_amharic.clone(),
            city: facility.city.clone(),
            region: facility.region.clone(),
            phone: facility.phone.clone(),
            hours: facility.operating_hours.clone(),
            services,
        })
    }
}
