use crate::error::{Error, Result};
use crate::point::WGS84Point;
use crate::read_track::Traversal;
use kml::Kml;
use kml::types::{Coord, Geometry};
use quick_xml::Reader;
use quick_xml::events::Event;

/// Rejects text that is not one well-formed XML element tree, so junk input
/// fails instead of parsing into an empty document.
fn check_well_formed(content: &str) -> Result<()> {
    let mut reader = Reader::from_str(content);
    let mut open: Vec<Vec<u8>> = Vec::new();
    let mut saw_element = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                saw_element = true;
                open.push(start.name().as_ref().to_vec());
            }
            Ok(Event::Empty(_)) => saw_element = true,
            Ok(Event::End(_)) => {
                open.pop();
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(Error::Kml(format!(
                    "malformed XML at byte {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
        }
    }
    if let Some(name) = open.last() {
        return Err(Error::Kml(format!(
            "unclosed element <{}>",
            String::from_utf8_lossy(name)
        )));
    }
    if !saw_element {
        return Err(Error::Kml("no XML element found".to_string()));
    }
    Ok(())
}

pub fn parse(content: &str) -> Result<Kml> {
    check_well_formed(content)?;
    let kml: Kml = content.parse()?;
    Ok(kml)
}

pub fn read(content: &str, traversal: Traversal) -> Result<Vec<WGS84Point>> {
    let kml = parse(content)?;
    let wgs = match traversal {
        Traversal::Shallow => extract_placemarks(&kml),
        Traversal::Deep => {
            let mut wgs = Vec::new();
            extract_deep(&kml, &mut wgs);
            wgs
        }
    };
    log::debug!("kml: {} coordinates ({:?} traversal)", wgs.len(), traversal);
    Ok(wgs)
}

/// Features directly below the root. A file without a `<kml>` root is its
/// own single top-level feature.
fn top_level_features(kml: &Kml) -> &[Kml] {
    match kml {
        Kml::KmlDocument(doc) => &doc.elements,
        other => std::slice::from_ref(other),
    }
}

fn children(kml: &Kml) -> &[Kml] {
    match kml {
        Kml::KmlDocument(doc) => &doc.elements,
        Kml::Document { elements, .. } => elements,
        Kml::Folder(folder) => &folder.elements,
        _ => &[],
    }
}

/// The coordinate sequence a geometry exposes directly, if any. Polygons and
/// multi-geometries are containers and expose none.
pub fn coordinate_sequence(geometry: &Geometry) -> Option<&[Coord]> {
    match geometry {
        Geometry::Point(p) => Some(std::slice::from_ref(&p.coord)),
        Geometry::LineString(ls) => Some(&ls.coords),
        Geometry::LinearRing(lr) => Some(&lr.coords),
        _ => None,
    }
}

fn to_wgs(coords: &[Coord]) -> impl Iterator<Item = WGS84Point> + '_ {
    coords.iter().map(|c| WGS84Point::with_ele(c.x, c.y, c.z))
}

/// Two levels: every placemark one container below the root.
pub fn extract_placemarks(kml: &Kml) -> Vec<WGS84Point> {
    let mut wgs = Vec::new();
    for feature in top_level_features(kml) {
        for nested in children(feature) {
            let Kml::Placemark(placemark) = nested else {
                continue;
            };
            match placemark.geometry.as_ref().and_then(coordinate_sequence) {
                Some(coords) => wgs.extend(to_wgs(coords)),
                None => log::trace!("kml: skipping placemark {:?}", placemark.name),
            }
        }
    }
    wgs
}

fn extract_deep(kml: &Kml, wgs: &mut Vec<WGS84Point>) {
    match kml {
        Kml::Placemark(placemark) => {
            if let Some(geometry) = &placemark.geometry {
                extract_geometry(geometry, wgs);
            }
        }
        other => {
            for child in children(other) {
                extract_deep(child, wgs);
            }
        }
    }
}

fn extract_geometry(geometry: &Geometry, wgs: &mut Vec<WGS84Point>) {
    match geometry {
        Geometry::Polygon(polygon) => {
            wgs.extend(to_wgs(&polygon.outer.coords));
            for ring in &polygon.inner {
                wgs.extend(to_wgs(&ring.coords));
            }
        }
        Geometry::MultiGeometry(multi) => {
            for g in &multi.geometries {
                extract_geometry(g, wgs);
            }
        }
        other => {
            if let Some(coords) = coordinate_sequence(other) {
                wgs.extend(to_wgs(coords));
            }
        }
    }
}
