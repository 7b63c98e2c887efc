use clap::Parser;
use std::path::PathBuf;

use crate::map::{
    DEFAULT_COLOR, DEFAULT_WEIGHT, DEFAULT_ZOOM, OSM_ATTRIBUTION, OSM_TILES, PolylineStyle,
    TileLayer,
};
use crate::read_track::{InputFormat, Traversal};

/// Draw the track of a KML (or GPX/GeoJSON) file on an interactive HTML map.
#[derive(Parser, Clone, Debug)]
#[command(version)]
pub struct Config {
    /// Track file to read.
    #[arg(default_value = "track.kml")]
    pub input: PathBuf,

    /// HTML file to write. An existing file is overwritten.
    #[arg(short, long, default_value = "mapa.html")]
    pub output: PathBuf,

    /// Input format; guessed from the file extension when omitted.
    #[arg(long, value_enum)]
    pub format: Option<InputFormat>,

    #[arg(long, value_enum, default_value_t = Traversal::Shallow)]
    pub traversal: Traversal,

    /// Initial zoom level of the map.
    #[arg(long, default_value_t = DEFAULT_ZOOM)]
    pub zoom: u8,

    /// Line color, any CSS color.
    #[arg(long, default_value = DEFAULT_COLOR)]
    pub color: String,

    /// Line width in pixels.
    #[arg(long, default_value_t = DEFAULT_WEIGHT)]
    pub weight: u32,

    /// Tile URL template.
    #[arg(long, default_value = OSM_TILES)]
    pub tiles: String,

    #[arg(long, default_value = OSM_ATTRIBUTION)]
    pub attribution: String,

    /// Fit the view to the whole track after centering on its first point.
    #[arg(long)]
    pub fit_bounds: bool,
}

impl Config {
    pub fn style(&self) -> PolylineStyle {
        PolylineStyle {
            color: self.color.clone(),
            weight: self.weight,
        }
    }
    pub fn tile_layer(&self) -> TileLayer {
        TileLayer {
            url: self.tiles.clone(),
            attribution: self.attribution.clone(),
        }
    }
}
