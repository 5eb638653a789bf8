// File: src/feed.rs
// GeoJSON wire document and the in-memory Snapshot built from it
use chrono::{DateTime, Utc};
use serde::Deserialize;

pub const DEFAULT_FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_day.geojson";

/// A single earthquake as shown on the map and in the list.
/// Fields are carried over from the feed without validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: String,
    pub magnitude: Option<f64>,
    pub place: String,
    pub time: DateTime<Utc>,
    pub depth_km: f64,
    pub longitude: f64,
    pub latitude: f64,
    pub detail_url: String,
}

/// The most recent complete set of events, replaced wholesale on each fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub events: Vec<Event>,
    pub generated: DateTime<Utc>,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let doc: FeedDocument = serde_json::from_slice(bytes)?;
        Ok(doc.into())
    }
}

// --- Wire format ---

#[derive(Debug, Deserialize)]
pub struct FeedDocument {
    pub metadata: Metadata,
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
pub struct Metadata {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub generated: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct Feature {
    pub id: String,
    pub properties: Properties,
    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub struct Properties {
    // USGS publishes null magnitudes and places for some events
    pub mag: Option<f64>,
    pub place: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    /// [longitude, latitude, depth_km]
    pub coordinates: (f64, f64, f64),
}

impl From<Feature> for Event {
    fn from(f: Feature) -> Self {
        let (longitude, latitude, depth_km) = f.geometry.coordinates;
        Self {
            id: f.id,
            magnitude: f.properties.mag,
            place: f.properties.place.unwrap_or_default(),
            time: f.properties.time,
            depth_km,
            longitude,
            latitude,
            detail_url: f.properties.url,
        }
    }
}

impl From<FeedDocument> for Snapshot {
    fn from(doc: FeedDocument) -> Self {
        Self {
            events: doc.features.into_iter().map(Event::from).collect(),
            generated: doc.metadata.generated,
        }
    }
}
