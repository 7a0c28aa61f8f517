use serde::Deserialize;

/// File names the viewer expects under `assets/` (written by `fetch_data`).
pub const BOUNDARIES_ASSET: &str = "us-states.geo.json";
pub const CASES_ASSET: &str = "covid-cases.csv";

/// One row of the case-count table.
///
/// Parsed straight from the CSV; `long`/`lat` are geographic degrees,
/// `cases`/`deaths` cumulative counts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CaseRecord {
    pub county: String,
    pub state: String,
    pub long: f64,
    pub lat: f64,
    pub cases: u64,
    pub deaths: u64,
}

impl CaseRecord {
    /// Stable identity used to reconcile markers across renders.
    pub fn key(&self) -> RecordKey {
        RecordKey {
            county: self.county.clone(),
            state: self.state.clone(),
        }
    }
}

/// Composite record identity: county name plus state name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub county: String,
    pub state: String,
}

/// A named region boundary: exterior rings in `[longitude, latitude]` order.
#[derive(Debug, Clone)]
pub struct BoundaryFeature {
    /// Region name from the feature properties ("Unknown" when absent).
    pub name: String,
    /// One exterior ring per polygon of the feature.
    pub rings: Vec<Vec<[f64; 2]>>,
}

/// The full boundary dataset backing the basemap.
pub type BoundaryCollection = Vec<BoundaryFeature>;
