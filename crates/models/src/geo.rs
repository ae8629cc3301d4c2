use serde::{Deserialize, Serialize};

/// Mean Earth radius (IUGG).
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Great-circle distance between two points, in kilometres.
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Lat/lon rectangle, bounds inclusive. Does not wrap the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    pub const ILE_DE_FRANCE: Self = Self {
        south: 48.12,
        west: 1.44,
        north: 49.24,
        east: 3.56,
    };

    pub const fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            south,
            west,
            north,
            east,
        }
    }

    pub fn contains(&self, point: Coordinates) -> bool {
        point.lat >= self.south
            && point.lat <= self.north
            && point.lon >= self.west
            && point.lon <= self.east
    }
}

impl std::str::FromStr for BoundingBox {
    type Err = eyre::Report;

    /// Accepts "south,west,north,east" or "idf" for the Île-de-France box.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("idf") || trimmed.eq_ignore_ascii_case("ile-de-france") {
            return Ok(Self::ILE_DE_FRANCE);
        }

        let values = trimmed
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| eyre::eyre!("invalid bounding box: {s:?}"))?;
        let [south, west, north, east] = values[..] else {
            return Err(eyre::eyre!(
                "bounding box needs south,west,north,east: {s:?}"
            ));
        };

        if !(-90.0..=90.0).contains(&south)
            || !(-90.0..=90.0).contains(&north)
            || !(-180.0..=180.0).contains(&west)
            || !(-180.0..=180.0).contains(&east)
        {
            return Err(eyre::eyre!("bounding box out of range: {s:?}"));
        }
        if south > north || west > east {
            return Err(eyre::eyre!("bounding box is inverted: {s:?}"));
        }

        Ok(Self::new(south, west, north, east))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOTRE_DAME: Coordinates = Coordinates::new(48.852968, 2.349902);
    const SACRE_COEUR: Coordinates = Coordinates::new(48.886705, 2.343104);
    const VERSAILLES: Coordinates = Coordinates::new(48.804865, 2.120355);

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(haversine_km(NOTRE_DAME, NOTRE_DAME), 0.0);
    }

    #[test]
    fn known_distances() {
        let d = haversine_km(NOTRE_DAME, SACRE_COEUR);
        assert!((d - 3.78).abs() < 0.05, "got {d}");

        let d = haversine_km(NOTRE_DAME, VERSAILLES);
        assert!((d - 17.6).abs() < 0.3, "got {d}");
        assert!((d - haversine_km(VERSAILLES, NOTRE_DAME)).abs() < 1e-9);
    }

    #[test]
    fn bounding_box_is_inclusive() {
        let bbox = BoundingBox::new(48.8, 2.2, 48.9, 2.4);
        assert!(bbox.contains(NOTRE_DAME));
        assert!(bbox.contains(Coordinates::new(48.8, 2.2)));
        assert!(!bbox.contains(VERSAILLES));
        assert!(BoundingBox::ILE_DE_FRANCE.contains(VERSAILLES));
        assert!(!BoundingBox::ILE_DE_FRANCE.contains(Coordinates::new(43.2965, 5.3698)));
    }

    #[test]
    fn parses_bounding_boxes() {
        let bbox: BoundingBox = " 48.8, 2.2 ,48.9,2.4".parse().unwrap();
        assert_eq!(bbox, BoundingBox::new(48.8, 2.2, 48.9, 2.4));
        assert_eq!("IDF".parse::<BoundingBox>().unwrap(), BoundingBox::ILE_DE_FRANCE);

        for bad in ["", "48.8,2.2,48.9", "a,b,c,d", "48.9,2.2,48.8,2.4", "91,0,92,1"] {
            assert!(bad.parse::<BoundingBox>().is_err(), "{bad:?}");
        }
    }
}
