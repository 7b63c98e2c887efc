use crate::error::Result;
use crate::point::WGS84Point;
use crate::read_kml;
use crate::track::Track;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// How far the extractor descends into the feature tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Traversal {
    /// Placemarks one container below the root; only geometries carrying
    /// their own coordinate list.
    #[default]
    Shallow,
    /// Containers at any depth; polygons and multi-geometries included.
    Deep,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    Kml,
    Gpx,
    Geojson,
}

impl InputFormat {
    /// Guess from the file extension. Anything unknown is read as KML.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("gpx") => InputFormat::Gpx,
            Some("geojson") | Some("json") => InputFormat::Geojson,
            _ => InputFormat::Kml,
        }
    }
}

mod locgpx {
    use super::*;
    use gpx::{Gpx, Waypoint};
    use std::io::Cursor;

    fn to_wgs(point: &Waypoint) -> WGS84Point {
        WGS84Point::with_ele(point.point().x(), point.point().y(), point.elevation)
    }

    pub fn read(content: &str) -> Result<Vec<WGS84Point>> {
        let gpx: Gpx = gpx::read(Cursor::new(content))?;

        // Track segments first, then routes.
        let tracks = gpx
            .tracks
            .iter()
            .flat_map(|track| track.segments.iter())
            .flat_map(|segment| segment.points.iter());
        let routes = gpx.routes.iter().flat_map(|route| route.points.iter());
        Ok(tracks.chain(routes).map(to_wgs).collect())
    }
}

mod locjson {
    use super::*;
    use geojson::{GeoJson, Geometry, Value};

    pub(super) fn to_wgs(position: &[f64]) -> Option<WGS84Point> {
        if position.len() < 2 {
            log::warn!("geojson: skipping position with {} values", position.len());
            return None;
        }
        Some(WGS84Point::with_ele(
            position[0],
            position[1],
            position.get(2).copied(),
        ))
    }

    fn push_all<'a, P>(positions: P, wgs: &mut Vec<WGS84Point>)
    where
        P: IntoIterator<Item = &'a Vec<f64>>,
    {
        wgs.extend(positions.into_iter().filter_map(|p| to_wgs(p)));
    }

    fn extract_geometry(geometry: &Geometry, traversal: Traversal, wgs: &mut Vec<WGS84Point>) {
        match (&geometry.value, traversal) {
            (Value::Point(p), _) => push_all([p], wgs),
            (Value::LineString(ls), _) => push_all(ls, wgs),
            (_, Traversal::Shallow) => {}
            (Value::MultiPoint(points), Traversal::Deep) => push_all(points, wgs),
            (Value::MultiLineString(lines), Traversal::Deep) => {
                push_all(lines.iter().flatten(), wgs)
            }
            (Value::Polygon(rings), Traversal::Deep) => push_all(rings.iter().flatten(), wgs),
            (Value::MultiPolygon(polygons), Traversal::Deep) => {
                push_all(polygons.iter().flatten().flatten(), wgs)
            }
            (Value::GeometryCollection(geometries), Traversal::Deep) => {
                for g in geometries {
                    extract_geometry(g, traversal, wgs);
                }
            }
        }
    }

    pub fn read(content: &str, traversal: Traversal) -> Result<Vec<WGS84Point>> {
        let geojson: GeoJson = content.parse()?;
        let mut wgs = Vec::new();
        match &geojson {
            GeoJson::FeatureCollection(collection) => {
                for geometry in collection.features.iter().filter_map(|f| f.geometry.as_ref()) {
                    extract_geometry(geometry, traversal, &mut wgs);
                }
            }
            GeoJson::Feature(feature) => {
                if let Some(geometry) = &feature.geometry {
                    extract_geometry(geometry, traversal, &mut wgs);
                }
            }
            GeoJson::Geometry(geometry) => extract_geometry(geometry, traversal, &mut wgs),
        }
        Ok(wgs)
    }
}

pub fn read_str(content: &str, format: InputFormat, traversal: Traversal) -> Result<Track> {
    let wgs = match format {
        InputFormat::Kml => read_kml::read(content, traversal)?,
        InputFormat::Gpx => locgpx::read(content)?,
        InputFormat::Geojson => locjson::read(content, traversal)?,
    };
    Ok(Track::new(wgs))
}

pub fn read_track(
    path: &Path,
    format: Option<InputFormat>,
    traversal: Traversal,
) -> Result<Track> {
    let format = format.unwrap_or_else(|| InputFormat::from_path(path));
    log::info!("reading {} as {:?}", path.display(), format);
    let mut file = File::open(path)?;
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    read_str(&content, format, traversal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const KML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <Placemark>
      <LineString><coordinates>17.1,48.1,130 17.2,48.2,131</coordinates></LineString>
    </Placemark>
  </Document>
</kml>"#;

    const GPX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <trkseg>
      <trkpt lat="48.1" lon="17.1"><ele>130</ele></trkpt>
      <trkpt lat="48.2" lon="17.2"><ele>131</ele></trkpt>
    </trkseg>
  </trk>
</gpx>"#;

    const GEOJSON: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "properties": {},
      "geometry": {
        "type": "LineString",
        "coordinates": [[17.1, 48.1, 130.0], [17.2, 48.2, 131.0]]
      }
    },
    {
      "type": "Feature",
      "properties": {},
      "geometry": {
        "type": "Polygon",
        "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
      }
    }
  ]
}"#;

    fn expected() -> Track {
        Track::new(vec![
            WGS84Point::with_ele(17.1, 48.1, Some(130.0)),
            WGS84Point::with_ele(17.2, 48.2, Some(131.0)),
        ])
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(InputFormat::from_path(Path::new("track.kml")), InputFormat::Kml);
        assert_eq!(InputFormat::from_path(Path::new("ride.GPX")), InputFormat::Gpx);
        assert_eq!(
            InputFormat::from_path(Path::new("area.geojson")),
            InputFormat::Geojson
        );
        assert_eq!(InputFormat::from_path(Path::new("noext")), InputFormat::Kml);
    }

    #[test]
    fn test_formats_agree() {
        let kml = read_str(KML, InputFormat::Kml, Traversal::Shallow).unwrap();
        let gpx = read_str(GPX, InputFormat::Gpx, Traversal::Shallow).unwrap();
        let json = read_str(GEOJSON, InputFormat::Geojson, Traversal::Shallow).unwrap();
        assert_eq!(kml, expected());
        assert_eq!(gpx, expected());
        assert_eq!(json, expected());
    }

    fn lonlat(track: &Track) -> Vec<(f64, f64)> {
        track.wgs.iter().map(|w| (w.lon, w.lat)).collect()
    }

    #[test]
    fn test_gpx_tracks_before_routes() {
        let content = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <rte>
    <rtept lat="3" lon="30"></rtept>
    <rtept lat="4" lon="40"></rtept>
  </rte>
  <trk>
    <trkseg>
      <trkpt lat="1" lon="10"></trkpt>
    </trkseg>
    <trkseg>
      <trkpt lat="2" lon="20"></trkpt>
    </trkseg>
  </trk>
</gpx>"#;
        let track = read_str(content, InputFormat::Gpx, Traversal::Shallow).unwrap();
        assert_eq!(
            lonlat(&track),
            vec![(10.0, 1.0), (20.0, 2.0), (30.0, 3.0), (40.0, 4.0)]
        );
        assert_eq!(track.wgs[0].ele, None);
    }

    #[test]
    fn test_geojson_multi_geometries_deep_only() {
        let content = r#"{
  "type": "FeatureCollection",
  "features": [
    {"type": "Feature", "properties": {},
     "geometry": {"type": "MultiPoint", "coordinates": [[1.0, 1.0], [2.0, 2.0]]}},
    {"type": "Feature", "properties": {},
     "geometry": {"type": "MultiLineString", "coordinates": [[[3.0, 3.0], [4.0, 4.0]], [[5.0, 5.0], [5.0, 6.0]]]}},
    {"type": "Feature", "properties": {},
     "geometry": {"type": "MultiPolygon", "coordinates": [[[[6.0, 6.0], [7.0, 6.0], [7.0, 7.0], [6.0, 6.0]]]]}},
    {"type": "Feature", "properties": {},
     "geometry": {"type": "GeometryCollection", "geometries": [
       {"type": "Point", "coordinates": [8.0, 8.0]},
       {"type": "MultiPoint", "coordinates": [[9.0, 9.0]]}
     ]}}
  ]
}"#;
        let shallow = read_str(content, InputFormat::Geojson, Traversal::Shallow).unwrap();
        assert!(shallow.is_empty());

        let deep = read_str(content, InputFormat::Geojson, Traversal::Deep).unwrap();
        assert_eq!(
            lonlat(&deep),
            vec![
                (1.0, 1.0),
                (2.0, 2.0),
                (3.0, 3.0),
                (4.0, 4.0),
                (5.0, 5.0),
                (5.0, 6.0),
                (6.0, 6.0),
                (7.0, 6.0),
                (7.0, 7.0),
                (6.0, 6.0),
                (8.0, 8.0),
                (9.0, 9.0),
            ]
        );
    }

    #[test]
    fn test_geojson_short_position_skipped() {
        assert_eq!(locjson::to_wgs(&[17.1]), None);
        assert_eq!(locjson::to_wgs(&[]), None);
        assert_eq!(
            locjson::to_wgs(&[17.1, 48.1]),
            Some(WGS84Point::new(17.1, 48.1))
        );
        assert_eq!(
            locjson::to_wgs(&[17.1, 48.1, 130.0]),
            Some(WGS84Point::with_ele(17.1, 48.1, Some(130.0)))
        );
    }

    #[test]
    fn test_geojson_deep_includes_polygon() {
        let json = read_str(GEOJSON, InputFormat::Geojson, Traversal::Deep).unwrap();
        assert_eq!(json.len(), 6);
        assert_eq!(json.wgs[2], WGS84Point::new(0.0, 0.0));
        assert_eq!(json.wgs[5], WGS84Point::new(0.0, 0.0));
    }

    #[test]
    fn test_read_track_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("track.kml");
        std::fs::write(&path, KML).unwrap();
        assert_eq!(read_track(&path, None, Traversal::Shallow).unwrap(), expected());

        // An explicit format wins over the extension.
        let path = dir.path().join("ride.txt");
        std::fs::write(&path, GPX).unwrap();
        let track = read_track(&path, Some(InputFormat::Gpx), Traversal::Shallow).unwrap();
        assert_eq!(track, expected());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_track(&dir.path().join("missing.kml"), None, Traversal::Shallow).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_malformed_geojson() {
        let err = read_str("{ not json", InputFormat::Geojson, Traversal::Shallow).unwrap_err();
        assert!(matches!(err, Error::GeoJson(_)));
    }
}
