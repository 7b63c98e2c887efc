use geo::{BoundingRect, Coord, LineString};

use crate::point::{LatLon, WGS84BoundingBox, WGS84Point};

/// The flat, ordered coordinate list extracted from a track file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Track {
    pub wgs: Vec<WGS84Point>,
}

impl Track {
    /// Points that do not have a finite longitude and latitude are dropped;
    /// they cannot be drawn.
    pub fn new(wgs: Vec<WGS84Point>) -> Self {
        let wgs = wgs
            .into_iter()
            .filter(|w| {
                if !w.is_finite() {
                    log::warn!("track: skipping non-finite point {}", w);
                }
                w.is_finite()
            })
            .collect();
        Self { wgs }
    }

    pub fn is_empty(&self) -> bool {
        self.wgs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.wgs.len()
    }

    pub fn info(&self) {
        log::info!("track: len: {}", self.len());
        if let Some(bbox) = self.wgsbbox() {
            log::info!("track: wgs bbox: {}", bbox);
        }
        match self.elevation_range() {
            Some((lo, hi)) => log::info!("track: elevation: {:.1} .. {:.1}", lo, hi),
            None => log::info!("track: elevation: None"),
        }
    }

    /// Every point axis-swapped for rendering, in track order.
    pub fn latlon(&self) -> Vec<LatLon> {
        self.wgs.iter().map(|w| w.latlon()).collect()
    }

    /// The first point, axis-swapped.
    pub fn center(&self) -> Option<LatLon> {
        self.wgs.first().map(|w| w.latlon())
    }

    pub fn wgsbbox(&self) -> Option<WGS84BoundingBox> {
        let line: LineString<f64> = self
            .wgs
            .iter()
            .map(|p| Coord { x: p.lon, y: p.lat })
            .collect();
        let rect = line.bounding_rect()?;
        Some(WGS84BoundingBox {
            min: WGS84Point::new(rect.min().x, rect.min().y),
            max: WGS84Point::new(rect.max().x, rect.max().y),
        })
    }

    pub fn elevation_range(&self) -> Option<(f64, f64)> {
        self.wgs
            .iter()
            .filter_map(|w| w.ele)
            .fold(None, |acc, e| match acc {
                None => Some((e, e)),
                Some((lo, hi)) => Some((f64::min(lo, e), f64::max(hi, e))),
            })
    }
}
