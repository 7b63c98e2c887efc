use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::point::{LatLon, WGS84BoundingBox};

pub const DEFAULT_ZOOM: u8 = 15;
pub const DEFAULT_COLOR: &str = "green";
pub const DEFAULT_WEIGHT: u32 = 3;
pub const OSM_TILES: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

const LEAFLET_CSS: &str = "https://cdn.jsdelivr.net/npm/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://cdn.jsdelivr.net/npm/leaflet@1.9.4/dist/leaflet.js";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PolylineStyle {
    pub color: String,
    pub weight: u32,
}

impl Default for PolylineStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            weight: DEFAULT_WEIGHT,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TileLayer {
    pub url: String,
    pub attribution: String,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url: OSM_TILES.to_string(),
            attribution: OSM_ATTRIBUTION.to_string(),
        }
    }
}

#[derive(Serialize)]
struct TileOptions<'a> {
    attribution: &'a str,
    #[serde(rename = "maxZoom")]
    max_zoom: u8,
}

/// JSON for embedding inside an inline `<script>`. `</` is escaped so a
/// value can never close the script element.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

#[derive(Clone, Debug)]
pub struct Polyline {
    pub points: Vec<LatLon>,
    pub style: PolylineStyle,
}

/// An interactive Leaflet map, rendered to a single HTML page.
#[derive(Clone, Debug)]
pub struct MapView {
    center: LatLon,
    zoom: u8,
    tiles: TileLayer,
    polylines: Vec<Polyline>,
    bounds: Option<WGS84BoundingBox>,
}

impl MapView {
    pub fn init(center: LatLon, zoom: u8) -> Self {
        Self {
            center,
            zoom,
            tiles: TileLayer::default(),
            polylines: Vec::new(),
            bounds: None,
        }
    }
    pub fn with_tiles(mut self, tiles: TileLayer) -> Self {
        self.tiles = tiles;
        self
    }
    pub fn center(&self) -> LatLon {
        self.center
    }
    pub fn zoom(&self) -> u8 {
        self.zoom
    }
    pub fn polylines(&self) -> &[Polyline] {
        &self.polylines
    }
    pub fn add_polyline(&mut self, points: Vec<LatLon>, style: &PolylineStyle) {
        self.polylines.push(Polyline {
            points,
            style: style.clone(),
        });
    }
    /// Fit the viewport to `bounds` once the page has loaded.
    pub fn fit_bounds(&mut self, bounds: WGS84BoundingBox) {
        self.bounds = Some(bounds);
    }

    pub fn render(&self) -> Result<String> {
        let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n");
        html.push_str(
            r#"<meta http-equiv="content-type" content="text/html; charset=UTF-8" />"#,
        );
        html.push('\n');
        html.push_str(
            r#"<meta name="viewport" content="width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no" />"#,
        );
        html.push('\n');
        html.push_str(&format!(r#"<link rel="stylesheet" href="{}"/>"#, LEAFLET_CSS));
        html.push('\n');
        html.push_str(&format!(r#"<script src="{}"></script>"#, LEAFLET_JS));
        html.push('\n');
        html.push_str(
            "<style>html, body {width: 100%; height: 100%; margin: 0; padding: 0;} \
             #map {position: absolute; top: 0; bottom: 0; right: 0; left: 0;}</style>\n",
        );
        html.push_str("</head>\n<body>\n<div id=\"map\"></div>\n<script>\n");

        html.push_str(&format!(
            "var map = L.map(\"map\", {{center: {}, zoom: {}}});\n",
            to_js(&self.center.as_array())?,
            self.zoom
        ));
        let tile_options = TileOptions {
            attribution: &self.tiles.attribution,
            max_zoom: 19,
        };
        html.push_str(&format!(
            "L.tileLayer({}, {}).addTo(map);\n",
            to_js(&self.tiles.url)?,
            to_js(&tile_options)?
        ));
        for polyline in &self.polylines {
            let points: Vec<[f64; 2]> = polyline.points.iter().map(|p| p.as_array()).collect();
            html.push_str(&format!(
                "L.polyline({}, {}).addTo(map);\n",
                to_js(&points)?,
                to_js(&polyline.style)?
            ));
        }
        if let Some(bounds) = &self.bounds {
            let corners = bounds.corners().map(|c| c.as_array());
            html.push_str(&format!(
                "map.fitBounds({});\n",
                to_js(&corners)?
            ));
        }
        html.push_str("</script>\n</body>\n</html>\n");
        Ok(html)
    }

    /// Write the page to `path`, replacing whatever is there.
    pub fn save(&self, path: &Path) -> Result<()> {
        let html = self.render()?;
        std::fs::write(path, html)?;
        log::info!("map: wrote {} ({} polylines)", path.display(), self.polylines.len());
        Ok(())
    }
}
