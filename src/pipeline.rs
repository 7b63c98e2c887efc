use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::map::MapView;
use crate::read_track::read_track;

#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// The input carried no coordinates; nothing was written.
    NoCoordinates,
    Saved(PathBuf),
}

/// Read the track, then draw it and write the map. Stops before creating the
/// map when the track is empty.
pub fn run(config: &Config) -> Result<Outcome> {
    let track = read_track(&config.input, config.format, config.traversal)?;
    let Some(center) = track.center() else {
        log::warn!("no coordinates in {}", config.input.display());
        return Ok(Outcome::NoCoordinates);
    };
    track.info();

    let mut map = MapView::init(center, config.zoom).with_tiles(config.tile_layer());
    log::debug!("map: center {} zoom {}", map.center(), map.zoom());
    map.add_polyline(track.latlon(), &config.style());
    if config.fit_bounds {
        if let Some(bbox) = track.wgsbbox() {
            map.fit_bounds(bbox);
        }
    }
    map.save(&config.output)?;
    Ok(Outcome::Saved(config.output.clone()))
}
