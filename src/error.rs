#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("KML parsing error: {0}")]
    Kml(String),

    #[error("GPX parsing error: {0}")]
    Gpx(#[from] gpx::errors::GpxError),

    #[error("GeoJSON parsing error: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<kml::Error> for Error {
    fn from(value: kml::Error) -> Self {
        Error::Kml(value.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
