use core::fmt;

/// A coordinate tuple as stored in track files: longitude first.
#[derive(Clone, Debug, PartialEq)]
pub struct WGS84Point {
    pub lon: f64,
    pub lat: f64,
    pub ele: Option<f64>,
}

impl WGS84Point {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            lon,
            lat,
            ele: None,
        }
    }
    pub fn with_ele(lon: f64, lat: f64, ele: Option<f64>) -> Self {
        Self { lon, lat, ele }
    }
    pub fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }
    /// Axis swap for map rendering. The elevation is dropped.
    pub fn latlon(&self) -> LatLon {
        LatLon {
            lat: self.lat,
            lon: self.lon,
        }
    }
}

impl fmt::Display for WGS84Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = match self.ele {
            Some(z) => format!("{:.1}", z),
            None => "None".to_string(),
        };
        write!(
            f,
            "wgs(lat: {:.5}, lon: {:.5}, ele: {})",
            self.lat, self.lon, e
        )
    }
}

/// A point in the order Leaflet expects it: latitude first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn as_array(&self) -> [f64; 2] {
        [self.lat, self.lon]
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "latlon({:.5}, {:.5})", self.lat, self.lon)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WGS84BoundingBox {
    pub min: WGS84Point,
    pub max: WGS84Point,
}

impl WGS84BoundingBox {
    pub fn from(p1: &WGS84Point, p2: &WGS84Point) -> Self {
        let min = WGS84Point::new(p1.lon.min(p2.lon), p1.lat.min(p2.lat));
        let max = WGS84Point::new(p1.lon.max(p2.lon), p1.lat.max(p2.lat));
        Self { min, max }
    }
    /// South-west and north-east corners, as Leaflet's `fitBounds` takes them.
    pub fn corners(&self) -> [LatLon; 2] {
        [self.min.latlon(), self.max.latlon()]
    }
}

impl fmt::Display for WGS84BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wgsbbox(min: {}, max: {})", self.min, self.max)
    }
}
