//! Sites and geographic locations

use std::fmt;

/// Mean Earth radius in kilometers, as used for epicentral distances.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Identity of a site within one calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SiteId(pub u32);

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Geographic location in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

impl Location {
    pub fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }

    /// Great-circle distance to `other` in kilometers (haversine on a
    /// mean-radius sphere). This is the horizontal distance the spatial
    /// correlation model is defined over.
    pub fn horizontal_distance_km(&self, other: &Location) -> f64 {
        let lat1 = self.lat_deg.to_radians();
        let lat2 = other.lat_deg.to_radians();
        let dlat = (other.lat_deg - self.lat_deg).to_radians();
        let dlon = (other.lon_deg - self.lon_deg).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
    }
}

/// Site where ground motion is evaluated. Immutable for the duration of one
/// calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    pub id: SiteId,
    pub location: Location,
    /// Time-averaged shear-wave velocity in the top 30 m, when known.
    pub vs30: Option<f64>,
}

impl Site {
    pub fn new(id: SiteId, location: Location) -> Self {
        Self {
            id,
            location,
            vs30: None,
        }
    }

    pub fn with_vs30(id: SiteId, location: Location, vs30: f64) -> Self {
        Self {
            id,
            location,
            vs30: Some(vs30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn distance_to_self_is_zero() {
        let loc = Location::new(45.2, 9.1);
        assert_eq!(loc.horizontal_distance_km(&loc), 0.0);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let a = Location::new(0.0, 0.0);
        let b = Location::new(1.0, 0.0);
        assert_relative_eq!(a.horizontal_distance_km(&b), 111.19, epsilon = 0.01);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Location::new(37.77, -122.42);
        let b = Location::new(34.05, -118.24);
        assert_relative_eq!(
            a.horizontal_distance_km(&b),
            b.horizontal_distance_km(&a),
            epsilon = 1e-12
        );
    }

    #[test]
    fn site_carries_optional_vs30() {
        let plain = Site::new(SiteId(1), Location::new(0.0, 0.0));
        let soft = Site::with_vs30(SiteId(2), Location::new(0.0, 0.1), 260.0);
        assert_eq!(plain.vs30, None);
        assert_eq!(soft.vs30, Some(260.0));
    }
}
