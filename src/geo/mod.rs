pub mod eta;
pub mod navigation;

use serde::Deserialize;

use crate::models::itinerary::Location;

const EARTH_RADIUS_KM: f64 = 6_371.0;

/// A bare coordinate pair, e.g. the traveller's reported position.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&Location> for Position {
    fn from(location: &Location) -> Self {
        Self {
            latitude: location.latitude,
            longitude: location.longitude,
        }
    }
}

pub fn haversine_km(a: Position, b: Position) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lng = (b.longitude - a.longitude).to_radians();

    let sin_lat = (delta_lat / 2.0).sin();
    let sin_lng = (delta_lng / 2.0).sin();

    let haversine = sin_lat * sin_lat + lat1.cos() * lat2.cos() * sin_lng * sin_lng;
    let central_angle = 2.0 * haversine.sqrt().asin();

    EARTH_RADIUS_KM * central_angle
}

#[cfg(test)]
mod tests {
    use super::{haversine_km, Position};

    #[test]
    fn zero_distance_for_same_point() {
        let hotel = Position {
            latitude: 16.0544,
            longitude: 108.2022,
        };
        assert!(haversine_km(hotel, hotel) < 1e-9);
    }

    #[test]
    fn da_nang_airport_to_hoi_an_is_around_23_km() {
        let airport = Position {
            latitude: 16.0439,
            longitude: 108.1995,
        };
        let hoi_an = Position {
            latitude: 15.8801,
            longitude: 108.3380,
        };
        let distance = haversine_km(airport, hoi_an);
        assert!((distance - 23.5).abs() < 1.5, "got {distance}");
    }
}
