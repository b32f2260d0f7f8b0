//! Static store → coordinate reference data for the geographic view.

use serde::Serialize;

/// Latitude / longitude of a known store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StoreLocation {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

/// The four stores the geo view knows how to place.
pub const STORE_LOCATIONS: [StoreLocation; 4] = [
    StoreLocation {
        name: "Medellín",
        latitude: 6.2442,
        longitude: -75.5812,
    },
    StoreLocation {
        name: "Bogotá",
        latitude: 4.7110,
        longitude: -74.0721,
    },
    StoreLocation {
        name: "Barranquilla",
        latitude: 10.9639,
        longitude: -74.7964,
    },
    StoreLocation {
        name: "Cali",
        latitude: 3.4516,
        longitude: -76.5320,
    },
];

/// Exact-name lookup. Returns `None` for stores outside the table.
pub fn lookup(store: &str) -> Option<&'static StoreLocation> {
    STORE_LOCATIONS.iter().find(|loc| loc.name == store)
}
