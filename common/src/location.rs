//! Location related module
//!
//! Holds the fixed reference point the airspace view is centred on and the
//! bounding box derived from it.
//!

use serde::{Deserialize, Serialize};

/// one degree is circumference of earth / 360°, convert into nautical miles
const ONE_DEG_NM: f64 = (40_000. / 1.852) / 360.;

/// Actual location
///
#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Location {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lon: f64,
}

impl Default for Location {
    fn default() -> Self {
        Location { lat: 0., lon: 0. }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct BB {
    /// Longitude - X0
    pub min_lon: f64,
    /// Latitude - Y0
    pub min_lat: f64,
    /// Longitude - X1
    pub max_lon: f64,
    /// Latitude - Y1
    pub max_lat: f64,
}

impl BB {
    /// Take a location and create a bounding box of `dist` nautical miles away
    ///
    /// So from (lat, lon) we generate the following bounding box:
    /// (lat - dist, lon - dist, lat + dist, lon + dist)
    ///
    pub fn from_location(value: &Location, dist: u32) -> Self {
        Self::from_lat_lon(value.lat, value.lon, dist)
    }

    /// Take a lat lon tuple and create a bounding box of `dist` nautical miles away
    ///
    /// NOTE: `dist` is in Nautical Miles
    ///
    pub fn from_lat_lon(lat: f64, lon: f64, dist: u32) -> Self {
        let dist = dist as f64 / ONE_DEG_NM;

        // Calculate the four corners
        //
        let (min_lat, max_lat) = (lat - dist, lat + dist);
        let (min_lon, max_lon) = (lon - dist, lon + dist);

        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bb_from_lat_lon() {
        let bb = BB::from_lat_lon(33.3152, 44.3661, 6);

        assert!(bb.min_lat < 33.3152 && 33.3152 < bb.max_lat);
        assert!(bb.min_lon < 44.3661 && 44.3661 < bb.max_lon);

        // 6 nm is 0.1 degree
        //
        assert!((bb.max_lat - bb.min_lat - 0.2).abs() < 1e-9);
        assert!((bb.max_lon - bb.min_lon - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_bb_from_location() {
        let loc = Location {
            lat: 33.3152,
            lon: 44.3661,
        };
        let bb = BB::from_location(&loc, 10);
        assert!(bb.min_lat < loc.lat);
        assert!(bb.max_lon > loc.lon);
    }
}
