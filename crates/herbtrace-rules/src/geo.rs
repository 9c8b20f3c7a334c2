//! # Geo-Fence Check
//!
//! Approved collection zones are named latitude/longitude bounding boxes.
//! A harvest location is valid iff it falls inside at least one zone; the
//! first containing zone in table order names the match.

use serde::{Deserialize, Serialize};

/// A named collection zone as a lat/long bounding box (degrees).
#[derive(Debug, Clone, Copy)]
pub struct Zone {
    /// Stable zone identifier.
    pub name: &'static str,
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl Zone {
    fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.lat_min && lat <= self.lat_max && lon >= self.lon_min && lon <= self.lon_max
    }
}

/// Approved collection zones, scanned in order. None of the boxes contains
/// the (0, 0) null island point, so unset coordinates always fail.
pub const ZONES: &[Zone] = &[
    Zone {
        name: "himalayan-foothills",
        lat_min: 28.0,
        lat_max: 32.0,
        lon_min: 77.0,
        lon_max: 81.0,
    },
    Zone {
        name: "western-ghats",
        lat_min: 8.0,
        lat_max: 16.0,
        lon_min: 73.0,
        lon_max: 77.5,
    },
    Zone {
        name: "aravalli-range",
        lat_min: 24.0,
        lat_max: 28.0,
        lon_min: 72.0,
        lon_max: 77.0,
    },
];

/// Outcome of a geo-fence check, embedded in the batch document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoCheck {
    /// True iff the location is inside an approved zone.
    pub valid: bool,
    /// The first matching zone, if any.
    pub zone: Option<String>,
}

/// Scan the zone table for the first zone containing (lat, lon).
pub fn check(lat: f64, lon: f64) -> GeoCheck {
    match ZONES.iter().find(|z| z.contains(lat, lon)) {
        Some(zone) => GeoCheck {
            valid: true,
            zone: Some(zone.name.to_string()),
        },
        None => GeoCheck {
            valid: false,
            zone: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_inside_zone_names_the_zone() {
        let out = check(30.0, 78.5);
        assert!(out.valid);
        assert_eq!(out.zone.as_deref(), Some("himalayan-foothills"));
    }

    #[test]
    fn null_island_is_invalid() {
        let out = check(0.0, 0.0);
        assert!(!out.valid);
        assert!(out.zone.is_none());
    }

    #[test]
    fn boundary_points_are_inside() {
        assert!(check(28.0, 77.0).valid);
        assert!(check(32.0, 81.0).valid);
    }

    #[test]
    fn first_matching_zone_wins() {
        // A point only in the western ghats box.
        let out = check(10.0, 75.0);
        assert_eq!(out.zone.as_deref(), Some("western-ghats"));
    }

    #[test]
    fn outside_all_zones() {
        assert!(!check(50.0, 10.0).valid);
        assert!(!check(-30.0, 75.0).valid);
    }
}
