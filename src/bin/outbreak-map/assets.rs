//! Embedded dataset access and parsing.

use eframe::egui;
use geojson::{GeoJson, Value};
use outbreak_map::{BOUNDARIES_ASSET, BoundaryCollection, BoundaryFeature, CASES_ASSET, CaseRecord};
use rust_embed::RustEmbed;
use std::io::Read;
use std::sync::mpsc;
use std::thread;
use thiserror::Error;

/// Embeds the data files fetched by `cargo run --bin fetch_data`.
/// In debug mode assets are read from the filesystem for faster iteration;
/// in release mode they are compressed into the binary.
#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct Assets;

/// Columns the case CSV must provide.
const REQUIRED_COLUMNS: [&str; 6] = ["county", "state", "long", "lat", "cases", "deaths"];

/// Errors that can occur when loading the boundary dataset.
#[derive(Error, Debug)]
pub enum BoundaryLoadError {
    #[error("{0} not found in assets (run `cargo run --bin fetch_data`)")]
    NotFound(&'static str),
    #[error("invalid UTF-8 in boundary file: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("failed to parse boundary GeoJSON: {0}")]
    Parse(#[from] geojson::Error),
    #[error("boundary file is not a FeatureCollection")]
    NotAFeatureCollection,
    #[error("boundary file contains no polygon features")]
    Empty,
}

/// Errors that can occur when loading the case dataset.
#[derive(Error, Debug)]
pub enum CaseLoadError {
    #[error("{0} not found in assets (run `cargo run --bin fetch_data`)")]
    NotFound(&'static str),
    #[error("failed to read case CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("case CSV is missing required column '{0}'")]
    MissingColumn(&'static str),
}

pub fn load_boundaries() -> Result<BoundaryCollection, BoundaryLoadError> {
    let file = Assets::get(BOUNDARIES_ASSET)
        .ok_or(BoundaryLoadError::NotFound(BOUNDARIES_ASSET))?;
    parse_boundaries(std::str::from_utf8(&file.data)?)
}

pub fn load_cases() -> Result<Vec<CaseRecord>, CaseLoadError> {
    let file = Assets::get(CASES_ASSET).ok_or(CaseLoadError::NotFound(CASES_ASSET))?;
    parse_cases(&file.data[..])
}

fn parse_boundaries(text: &str) -> Result<BoundaryCollection, BoundaryLoadError> {
    let geojson: GeoJson = text.parse()?;
    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(BoundaryLoadError::NotAFeatureCollection);
    };

    let mut boundaries = Vec::new();
    for feature in collection.features {
        let name = feature
            .properties
            .as_ref()
            .and_then(|props| props.get("name").or_else(|| props.get("NAME")))
            .and_then(|value| value.as_str())
            .unwrap_or("Unknown")
            .to_string();

        let Some(geometry) = feature.geometry else {
            continue;
        };
        let rings = match geometry.value {
            Value::Polygon(rings) => exterior_ring(&rings).into_iter().collect(),
            Value::MultiPolygon(polygons) => polygons
                .iter()
                .filter_map(|rings| exterior_ring(rings))
                .collect(),
            _ => continue,
        };

        boundaries.push(BoundaryFeature { name, rings });
    }

    if boundaries.iter().all(|feature| feature.rings.is_empty()) {
        return Err(BoundaryLoadError::Empty);
    }
    Ok(boundaries)
}

fn exterior_ring(rings: &[Vec<Vec<f64>>]) -> Option<Vec<[f64; 2]>> {
    let exterior = rings.first()?;
    let points: Vec<[f64; 2]> = exterior
        .iter()
        .filter(|coord| coord.len() >= 2)
        .map(|coord| [coord[0], coord[1]])
        .collect();
    (!points.is_empty()).then_some(points)
}

/// Parse case records, dropping rows that fail to deserialize (missing or
/// non-numeric fields) with a warning instead of failing the whole load.
fn parse_cases(reader: impl Read) -> Result<Vec<CaseRecord>, CaseLoadError> {
    let mut csv_reader = csv::ReaderBuilder::new().from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(CaseLoadError::MissingColumn(column));
        }
    }

    let mut records = Vec::new();
    for (index, result) in csv_reader.deserialize::<CaseRecord>().enumerate() {
        match result {
            Ok(record) => records.push(record),
            Err(err) => {
                // +2: one for the header row, one for 1-based numbering.
                log::warn!("dropping malformed case row {}: {}", index + 2, err);
            }
        }
    }
    Ok(records)
}

/// State of a dataset being parsed on a background thread.
pub enum LoadState<T> {
    Loading(mpsc::Receiver<Result<T, String>>),
    Ready(T),
    Failed(String),
}

impl<T> LoadState<T> {
    /// Poll the channel, transitioning out of `Loading` once the thread has
    /// finished.
    pub fn poll(&mut self) {
        if let LoadState::Loading(rx) = self {
            match rx.try_recv() {
                Ok(Ok(value)) => *self = LoadState::Ready(value),
                Ok(Err(message)) => *self = LoadState::Failed(message),
                Err(mpsc::TryRecvError::Disconnected) => {
                    *self = LoadState::Failed("load thread disconnected".to_string());
                }
                Err(mpsc::TryRecvError::Empty) => {}
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Run `load` on a background thread, repainting when it finishes.
pub fn spawn_load<T, E, F>(ctx: egui::Context, load: F) -> LoadState<T>
where
    T: Send + 'static,
    E: std::fmt::Display,
    F: FnOnce() -> Result<T, E> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = load().map_err(|err| err.to_string());
        let _ = tx.send(result);
        ctx.request_repaint();
    });
    LoadState::Loading(rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDARY_JSON: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"name": "Kansas"},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-102.0, 37.0], [-94.6, 37.0], [-94.6, 40.0], [-102.0, 40.0], [-102.0, 37.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": {"NAME": "Michigan"},
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[-90.4, 46.5], [-84.0, 46.5], [-84.0, 48.3], [-90.4, 46.5]]],
                        [[[-86.8, 41.7], [-82.4, 41.7], [-82.4, 45.9], [-86.8, 41.7]]]
                    ]
                }
            }
        ]
    }"#;

    #[test]
    fn parses_polygon_and_multipolygon_features() {
        let boundaries = parse_boundaries(BOUNDARY_JSON).unwrap();
        assert_eq!(boundaries.len(), 2);
        assert_eq!(boundaries[0].name, "Kansas");
        assert_eq!(boundaries[0].rings.len(), 1);
        assert_eq!(boundaries[1].name, "Michigan");
        assert_eq!(boundaries[1].rings.len(), 2);
        assert_eq!(boundaries[0].rings[0][0], [-102.0, 37.0]);
    }

    #[test]
    fn rejects_non_feature_collections() {
        let result = parse_boundaries(r#"{"type": "Point", "coordinates": [0.0, 0.0]}"#);
        assert!(matches!(result, Err(BoundaryLoadError::NotAFeatureCollection)));
    }

    #[test]
    fn parses_case_rows_and_drops_malformed_ones() {
        let csv = "\
county,state,long,lat,cases,deaths
Suffolk,Massachusetts,-71.06,42.36,1000,56
Bad Row,Nowhere,not-a-number,42.0,10,1
King,Washington,-122.33,47.61,2500,171
";
        let records = parse_cases(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].county, "Suffolk");
        assert_eq!(records[0].cases, 1000);
        assert_eq!(records[1].state, "Washington");
        assert_eq!(records[1].deaths, 171);
    }

    #[test]
    fn reports_missing_required_columns() {
        let csv = "county,state,long,lat,cases\nSuffolk,Massachusetts,-71.06,42.36,1000\n";
        let result = parse_cases(csv.as_bytes());
        assert!(matches!(result, Err(CaseLoadError::MissingColumn("deaths"))));
    }
}
