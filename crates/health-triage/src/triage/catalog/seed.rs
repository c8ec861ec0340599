use crate::triage::domain::{Coordinate, Facility, FacilityId};

struct SeedFacility {
    id: &'static str,
    name: &'static str,
    name_amharic: &'static str,
    address: &'static str,
    address_amharic: &'static str,
    phone: &'static str,
    latitude: f64,
    longitude: f64,
    city: &'static str,
    region: &'static str,
    operating_hours: &'static str,
    services: &'static [&'static str],
}

const SEED: [SeedFacility; 8] = [
    SeedFacility {
        id: "hp-001",
        name: "Addis Ababa General Hospital",
        name_amharic: "አዲስ አበባ አጠቃላይ ሆስፒታል",
        address: "Bole Road, Addis Ababa",
        address_amharic: "ቦሌ መንገድ፣ አዲስ አበባ",
        phone: "+251 11 123 4567",
        latitude: 9.0096,
        longitude: 38.7629,
        city: "Addis Ababa",
        region: "Addis Ababa",
        operating_hours: "24/7 Emergency, 8:00-17:00 Outpatient",
        services: &[
            "Emergency Care",
            "General Medicine",
            "Pediatrics",
            "Maternity",
            "Laboratory",
            "Pharmacy",
        ],
    },
    SeedFacility {
        id: "hp-002",
        name: "Mekelle Health Center",
        name_amharic: "መቀሌ የህክምና ማዕከል",
        address: "Mekelle City Center",
        address_amharic: "መቀሌ ከተማ ማዕከል",
        phone: "+251 34 441 2345",
        latitude: 13.4967,
        longitude: 39.4736,
        city: "Mekelle",
        region: "Tigray",
        operating_hours: "8:00-18:00",
        services: &[
            "General Medicine",
            "Maternal Health",
            "Vaccination",
            "Family Planning",
        ],
    },
    SeedFacility {
        id: "hp-003",
        name: "Gondar Health Post",
        name_amharic: "ጎንደር የህክምና ጣቢያ",
        address: "Gondar Town",
        address_amharic: "ጎንደር ከተማ",
        phone: "+251 58 111 2345",
        latitude: 12.6030,
        longitude: 37.4678,
        city: "Gondar",
        region: "Amhara",
        operating_hours: "8:30-17:30",
        services: &[
            "Primary Care",
            "Malaria Treatment",
            "Nutrition Support",
            "Health Education",
        ],
    },
    SeedFacility {
        id: "hp-004",
        name: "Jimma Medical Center",
        name_amharic: "ጂማ ሕክምና ማዕከል",
        address: "Jimma City",
        address_amharic: "ጂማ ከተማ",
        phone: "+251 47 111 6789",
        latitude: 7.6726,
        longitude: 36.8344,
        city: "Jimma",
        region: "Oromia",
        operating_hours: "24/7 Emergency, 8:00-20:00 General",
        services: &[
            "Emergency",
            "Surgery",
            "Internal Medicine",
            "Pediatrics",
            "Dental",
        ],
    },
    SeedFacility {
        id: "hp-005",
        name: "Bahir Dar Health Center",
        name_amharic: "ባህር ዳር የህክምና ማዕከል",
        address: "Near Lake Tana",
        address_amharic: "ከጣና ሀይቅ አጠገብ",
        phone: "+251 58 222 3456",
        latitude: 11.5946,
        longitude: 37.3858,
        city: "Bahir Dar",
        region: "Amhara",
        operating_hours: "8:00-18:00",
        services: &[
            "General Medicine",
            "Maternal Health",
            "Child Health",
            "HIV/AIDS Services",
        ],
    },
    SeedFacility {
        id: "hp-006",
        name: "Hawassa Referral Hospital",
        name_amharic: "ሀዋሳ ሪፈራል ሆስፒታል",
        address: "Hawassa City",
        address_amharic: "ሀዋሳ ከተማ",
        phone: "+251 46 221 1234",
        latitude: 7.0603,
        longitude: 38.4766,
        city: "Hawassa",
        region: "Sidama",
        operating_hours: "24/7",
        services: &[
            "Emergency",
            "Specialist Care",
            "Surgery",
            "Mental Health",
            "Rehabilitation",
        ],
    },
    SeedFacility {
        id: "hp-007",
        name: "Dire Dawa Health Post",
        name_amharic: "ድሬዳዋ የህክምና ጣቢያ",
        address: "Dire Dawa City",
        address_amharic: "ድሬዳዋ ከተማ",
        phone: "+251 25 112 3456",
        latitude: 9.5931,
        longitude: 41.8641,
        city: "Dire Dawa",
        region: "Dire Dawa",
        operating_hours: "8:00-17:00",
        services: &[
            "Primary Care",
            "Vaccination",
            "Family Planning",
            "Health Education",
        ],
    },
    SeedFacility {
        id: "hp-008",
        name: "Adama Medical Center",
        name_amharic: "አዳማ ሕክምና ማዕከል",
        address: "Adama City Center",
        address_amharic: "አዳማ ከተማ ማዕከል",
        phone: "+251 22 111 7890",
        latitude: 8.5436,
        longitude: 39.2667,
        city: "Adama",
        region: "Oromia",
        operating_hours: "8:00-20:00",
        services: &[
            "Emergency",
            "General Medicine",
            "Pediatrics",
            "Laboratory",
            "X-ray",
        ],
    },
];

/// Seed facilities, with service lists stored serialized the same way imported rows are.
pub fn facilities() -> Vec<Facility> {
    SEED.iter()
        .map(|seed| Facility {
            id: FacilityId(seed.id.to_string()),
            name: seed.name.to_string(),
            name_amharic: seed.name_amharic.to_string(),
            address: seed.address.to_string(),
            address_amharic: seed.address_amharic.to_string(),
            phone: seed.phone.to_string(),
            coordinate: Coordinate::new(seed.latitude, seed.longitude),
            city: seed.city.to_string(),
            region: seed.region.to_string(),
            operating_hours: seed.operating_hours.to_string(),
            services: serialize_services(seed.services),
            is_active: true,
            rating: None,
        })
        .collect()
}

fn serialize_services(services: &[&str]) -> String {
    serde_json::Value::from(services.to_vec()).to_string()
}
