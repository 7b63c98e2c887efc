pub mod config;
pub mod error;
pub mod map;
pub mod pipeline;
pub mod point;
pub mod read_kml;
pub mod read_track;
pub mod track;

pub use error::{Error, Result};
