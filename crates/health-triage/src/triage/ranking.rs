use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::catalog::CatalogError;
use super::domain::{Coordinate, Facility, FacilityId};
use super::geo::haversine_km;

/// Upper bound on recommendations returned for a single request.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Controls how many facilities are returned and when they count as open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingPolicy {
    pub max_results: usize,
    pub opening_hour: u32,
    pub closing_hour: u32,
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self {
            max_results: MAX_RECOMMENDATIONS,
            opening_hour: 8,
            closing_hour: 17,
        }
    }
}

impl RankingPolicy {
    /// Both ends of the window are inclusive, so 17:59 still counts as open.
    pub fn is_open_at(&self, hour: u32) -> bool {
        hour >= self.opening_hour && hour <= self.closing_hour
    }
}

/// Facility annotated for a specific triage request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: FacilityId,
    pub name: String,
    pub name_amharic: String,
    pub address: String,
    pub address_amharic: String,
    pub phone: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub region: String,
    /// Kilometres from the caller; `None` when no location was supplied.
    pub distance: Option<f64>,
    pub hours: String,
    pub services: Vec<String>,
    pub rating: Option<f32>,
    pub is_open: bool,
}

/// Order active facilities by distance from `origin` and keep the closest few.
///
/// `policy.max_results` is capped at [`MAX_RECOMMENDATIONS`]. Without an origin every
/// distance is unknown and catalog order is preserved.
pub fn rank_facilities(
    facilities: &[Facility],
    origin: Option<Coordinate>,
    hour: u32,
    policy: &RankingPolicy,
) -> Result<Vec<Recommendation>, CatalogError> {
    let mut candidates: Vec<(&Facility, Option<f64>)> = facilities
        .iter()
        .filter(|facility| facility.is_active)
        .map(|facility| {
            let distance = origin.map(|origin| haversine_km(origin, facility.coordinate));
            (facility, distance)
        })
        .collect();

    // `sort_by` is stable, which keeps catalog order for equal distances.
    candidates.sort_by(|(_, left), (_, right)| compare_distance(*left, *right));
    candidates.truncate(policy.max_results.min(MAX_RECOMMENDATIONS));

    let is_open = policy.is_open_at(hour);
    candidates
        .into_iter()
        .map(|(facility, distance)| recommend(facility, distance, is_open))
        .collect()
}

fn compare_distance(left: Option<f64>, right: Option<f64>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => left.partial_cmp(&right).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn recommend(
    facility: &Facility,
    distance: Option<f64>,
    is_open: bool,
) -> Result<Recommendation, CatalogError> {
    let services =
        facility
            .parsed_services()
            .map_err(|source| CatalogError::MalformedServices {
                facility: facility.id.clone(),
                source,
            })?;

    Ok(Recommendation {
        id: facility.id.clone(),
        name: facility.name.clone(),
        name_amharic: facility.name_amharic.clone(),
        address: facility.address.clone(),
        address_amharic: facility.address_amharic.clone(),
        phone: facility.phone.clone(),
        latitude: facility.coordinate.lat,
        longitude: facility.coordinate.lng,
        city: facility.city.clone(),
        region: facility.region.clone(),
        distance,
        hours: facility.operating_hours.clone(),
        services,
        rating: facility.rating,
        is_open,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::catalog::seed;

    const ADDIS_ABABA: Coordinate = Coordinate::new(9.0096, 38.7629);

    fn ids(recommendations: &[Recommendation]) -> Vec<&str> {
        recommendations
            .iter()
            .map(|recommendation| recommendation.id.0.as_str())
            .collect()
    }

    #[test]
    fn ranks_closest_facilities_first_and_truncates() {
        let facilities = seed::facilities();
        let ranked = rank_facilities(
            &facilities,
            Some(ADDIS_ABABA),
            10,
            &RankingPolicy::default(),
        )
        .expect("rank");

        assert_eq!(ranked.len(), 5);
        assert_eq!(
            ids(&ranked),
            vec!["hp-001", "hp-008", "hp-006", "hp-004", "hp-005"]
        );
        assert_eq!(ranked[0].distance, Some(0.0));
        assert!(ranked
            .windows(2)
            .all(|pair| pair[0].distance <= pair[1].distance));
        assert_eq!(ranked[0].services[0], "Emergency Care");
    }

    #[test]
    fn missing_origin_leaves_distance_unknown_in_catalog_order() {
        let facilities = seed::facilities();
        let ranked =
            rank_facilities(&facilities, None, 10, &RankingPolicy::default()).expect("rank");

        assert_eq!(
            ids(&ranked),
            vec!["hp-001", "hp-002", "hp-003", "hp-004", "hp-005"]
        );
        assert!(ranked.iter().all(|entry| entry.distance.is_none()));
        assert!(ranked.iter().all(|entry| entry.rating.is_none()));
    }

    #[test]
    fn equal_distances_keep_catalog_order() {
        let mut facilities = seed::facilities();
        for facility in facilities.iter_mut() {
            facility.coordinate = ADDIS_ABABA;
        }
        let ranked = rank_facilities(
            &facilities,
            Some(ADDIS_ABABA),
            10,
            &RankingPolicy::default(),
        )
        .expect("rank");

        assert_eq!(
            ids(&ranked),
            vec!["hp-001", "hp-002", "hp-003", "hp-004", "hp-005"]
        );
    }

    #[test]
    fn unknown_distances_sort_after_known_ones() {
        assert_eq!(compare_distance(Some(900.0), None), Ordering::Less);
        assert_eq!(compare_distance(None, Some(0.0)), Ordering::Greater);
        assert_eq!(compare_distance(None, None), Ordering::Equal);
        assert_eq!(compare_distance(Some(1.0), Some(2.0)), Ordering::Less);
    }

    #[test]
    fn skips_inactive_facilities() {
        let mut facilities = seed::facilities();
        facilities[0].is_active = false;
        let ranked = rank_facilities(
            &facilities,
            Some(ADDIS_ABABA),
            10,
            &RankingPolicy::default(),
        )
        .expect("rank");

        assert_eq!(ranked[0].id.0, "hp-008");
    }

    #[test]
    fn open_flag_follows_inclusive_window() {
        let policy = RankingPolicy::default();
        assert!(!policy.is_open_at(7));
        assert!(policy.is_open_at(8));
        assert!(policy.is_open_at(17));
        assert!(!policy.is_open_at(18));

        let facilities = seed::facilities();
        let closed = rank_facilities(&facilities, None, 22, &policy).expect("rank");
        assert!(closed.iter().all(|entry| !entry.is_open));
        let open = rank_facilities(&facilities, None, 8, &policy).expect("rank");
        assert!(open.iter().all(|entry| entry.is_open));
    }

    #[test]
    fn honours_custom_result_limit() {
        let facilities = seed::facilities();
        let policy = RankingPolicy {
            max_results: 2,
            ..RankingPolicy::default()
        };
        let ranked = rank_facilities(&facilities, Some(ADDIS_ABABA), 10, &policy).expect("rank");
        assert_eq!(ranked.len(), 2);

        let empty = rank_facilities(&[], Some(ADDIS_ABABA), 10, &policy).expect("rank");
        assert!(empty.is_empty());
    }

    #[test]
    fn oversized_limit_is_capped() {
        let facilities = seed::facilities();
        let policy = RankingPolicy {
            max_results: 50,
            ..RankingPolicy::default()
        };
        let ranked = rank_facilities(&facilities, Some(ADDIS_ABABA), 10, &policy).expect("rank");
        assert_eq!(ranked.len(), MAX_RECOMMENDATIONS);
    }

    #[test]
    fn malformed_service_list_is_a_catalog_error() {
        let mut facilities = seed::facilities();
        facilities[0].services = "{".to_string();
        let error = rank_facilities(
            &facilities,
            Some(ADDIS_ABABA),
            10,
            &RankingPolicy::default(),
        )
        .expect_err("malformed services");
        assert!(matches!(error, CatalogError::MalformedServices { .. }));
    }
}
