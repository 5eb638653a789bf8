// File: src/projection.rs
// Pure views over a Snapshot. Map and list are both derived here so they never disagree.
use crate::feed::{Event, Snapshot};
use crate::marker::MarkerStyle;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerView {
    pub id: String,
    pub longitude: f64,
    pub latitude: f64,
    pub style: MarkerStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub id: String,
    pub title: String,
    pub time: DateTime<Utc>,
}

/// Contents of the detail popup for one event.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupView {
    pub title: String,
    pub depth: String,
    pub time: DateTime<Utc>,
    pub detail_url: String,
}

/// Formats a magnitude the way the feed prints it: `2.5`, `5`, `-0.41`.
pub fn format_magnitude(mag: Option<f64>) -> String {
    match mag {
        Some(m) => format!("{}", m),
        None => "?".to_string(),
    }
}

/// `M {magnitude} – {place}`
pub fn event_title(event: &Event) -> String {
    format!("M {} – {}", format_magnitude(event.magnitude), event.place)
}

pub fn markers(snapshot: &Snapshot) -> Vec<MarkerView> {
    snapshot
        .events
        .iter()
        .map(|e| MarkerView {
            id: e.id.clone(),
            longitude: e.longitude,
            latitude: e.latitude,
            style: MarkerStyle::for_magnitude(e.magnitude),
        })
        .collect()
}

pub fn list_entries(snapshot: &Snapshot) -> Vec<ListEntry> {
    snapshot
        .events
        .iter()
        .map(|e| ListEntry {
            id: e.id.clone(),
            title: event_title(e),
            time: e.time,
        })
        .collect()
}

pub fn popup(event: &Event) -> PopupView {
    PopupView {
        title: event_title(event),
        depth: format!("Depth: {:.1} km", event.depth_km),
        time: event.time,
        detail_url: event.detail_url.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::MarkerColor;
    use chrono::TimeZone;

    fn event(id: &str, mag: Option<f64>, place: &str, lon: f64, lat: f64) -> Event {
        Event {
            id: id.to_string(),
            magnitude: mag,
            place: place.to_string(),
            time: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
            depth_km: 12.345,
            longitude: lon,
            latitude: lat,
            detail_url: format!("https://example.org/{}", id),
        }
    }

    fn two_event_snapshot() -> Snapshot {
        Snapshot {
            events: vec![
                event("a", Some(2.5), "Northern California", -122.0, 38.0),
                event("b", Some(5.1), "Off the coast of Japan", 142.0, 37.0),
            ],
            generated: Utc.timestamp_millis_opt(1_700_000_100_000).unwrap(),
        }
    }

    #[test]
    fn list_titles_follow_feed_format() {
        let entries = list_entries(&two_event_snapshot());
        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["M 2.5 – Northern California", "M 5.1 – Off the coast of Japan"]
        );
    }

    #[test]
    fn markers_are_styled_by_magnitude() {
        let m = markers(&two_event_snapshot());
        assert_eq!(m[0].style.color, MarkerColor::Green);
        assert!((m[0].style.diameter_px - 17.5).abs() < 1e-9);
        assert_eq!(m[1].style.color, MarkerColor::Red);
        assert!((m[1].style.diameter_px - 25.3).abs() < 1e-9);
    }

    #[test]
    fn map_and_list_agree() {
        let snap = two_event_snapshot();
        let m = markers(&snap);
        let l = list_entries(&snap);
        assert_eq!(m.len(), snap.len());
        assert_eq!(l.len(), snap.len());
        for (marker, entry) in m.iter().zip(&l) {
            assert_eq!(marker.id, entry.id);
        }
    }

    #[test]
    fn marker_positions_come_from_coordinates() {
        let m = markers(&two_event_snapshot());
        assert_eq!((m[1].longitude, m[1].latitude), (142.0, 37.0));
    }

    #[test]
    fn whole_magnitudes_print_without_decimals() {
        assert_eq!(format_magnitude(Some(5.0)), "5");
        assert_eq!(format_magnitude(Some(-0.41)), "-0.41");
        assert_eq!(format_magnitude(None), "?");
    }

    #[test]
    fn popup_rounds_depth() {
        let p = popup(&event("x", Some(3.3), "Somewhere", 0.0, 0.0));
        assert_eq!(p.title, "M 3.3 – Somewhere");
        assert_eq!(p.depth, "Depth: 12.3 km");
        assert_eq!(p.detail_url, "https://example.org/x");
    }
}
