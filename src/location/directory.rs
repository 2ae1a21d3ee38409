//! Built-in directory of named observation sites.
//!
//! Read-only, defined at compile time. Order is significant: suggestions
//! are reported in table order.

use super::types::Coordinate;
use serde::Serialize;

/// A directory entry. Names are unique and matched case-sensitively.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NamedLocation {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

impl NamedLocation {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

const DIRECTORY: &[NamedLocation] = &[
    NamedLocation { name: "London", latitude: 51.5074, longitude: -0.1278 },
    NamedLocation { name: "Paris", latitude: 48.8566, longitude: 2.3522 },
    NamedLocation { name: "Moscow", latitude: 55.7558, longitude: 37.6173 },
    NamedLocation { name: "Prague", latitude: 50.0755, longitude: 14.4378 },
    NamedLocation { name: "Berlin", latitude: 52.5200, longitude: 13.4050 },
    NamedLocation { name: "Rome", latitude: 41.9028, longitude: 12.4964 },
    NamedLocation { name: "Madrid", latitude: 40.4168, longitude: -3.7038 },
    NamedLocation { name: "New York", latitude: 40.7128, longitude: -74.0060 },
];

/// All entries, in definition order.
pub fn entries() -> &'static [NamedLocation] {
    DIRECTORY
}

/// Exact, case-sensitive lookup.
pub fn lookup(name: &str) -> Option<&'static NamedLocation> {
    DIRECTORY.iter().find(|entry| entry.name == name)
}

pub fn names() -> impl Iterator<Item = &'static str> {
    DIRECTORY.iter().map(|entry| entry.name)
}
