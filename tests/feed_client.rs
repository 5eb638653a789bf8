// Fetch cycle against a mocked USGS endpoint
use seismomap::client::{FeedClient, FeedError, FeedSource};
use seismomap::config::Config;
use seismomap::marker::MarkerColor;
use seismomap::viewer::{FeedViewer, RefreshOutcome};

const TWO_QUAKES: &str = r#"{
    "type": "FeatureCollection",
    "metadata": { "generated": 1700000000000, "title": "USGS All Earthquakes, Past Day" },
    "features": [
        {
            "type": "Feature",
            "id": "ak0001",
            "properties": { "mag": 2.5, "place": "50 km N of Anchorage, Alaska", "time": 1699990000000,
                            "url": "https://earthquake.usgs.gov/earthquakes/eventpage/ak0001" },
            "geometry": { "type": "Point", "coordinates": [-149.9, 61.7, 35.2] }
        },
        {
            "type": "Feature",
            "id": "us0002",
            "properties": { "mag": 5.1, "place": "Tonga Islands", "time": 1699980000000,
                            "url": "https://earthquake.usgs.gov/earthquakes/eventpage/us0002" },
            "geometry": { "type": "Point", "coordinates": [-174.3, -20.1, 110.0] }
        }
    ]
}"#;

fn client_for(server: &mockito::Server, path: &str) -> FeedClient {
    FeedClient::new(&format!("{}{}", server.url(), path), true).unwrap()
}

#[tokio::test]
async fn refresh_populates_list_and_markers() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/all_day.geojson")
        .with_status(200)
        .with_header("content-type", "application/geo+json")
        .with_body(TWO_QUAKES)
        .create_async()
        .await;

    let client = client_for(&server, "/all_day.geojson");
    let mut viewer = FeedViewer::new(&Config::default());

    assert_eq!(viewer.refresh(&client).await, RefreshOutcome::Applied);
    mock.assert_async().await;

    assert!(!viewer.is_loading());
    let entries = viewer.list_entries();
    let markers = viewer.markers();
    assert_eq!(entries.len(), 2);
    assert_eq!(markers.len(), 2);

    assert_eq!(entries[0].title, "M 2.5 – 50 km N of Anchorage, Alaska");
    assert_eq!(entries[1].title, "M 5.1 – Tonga Islands");

    assert_eq!(markers[0].style.color, MarkerColor::Green);
    assert!((markers[0].style.diameter_px - 17.5).abs() < 1e-9);
    assert_eq!(markers[1].style.color, MarkerColor::Red);
    assert!((markers[1].style.diameter_px - 25.3).abs() < 1e-9);
    assert_eq!((markers[1].longitude, markers[1].latitude), (-174.3, -20.1));
}

#[tokio::test]
async fn server_error_is_swallowed() {
    let mut server = mockito::Server::new_async().await;
    let _ok = server
        .mock("GET", "/good.geojson")
        .with_status(200)
        .with_body(TWO_QUAKES)
        .create_async()
        .await;
    let _bad = server
        .mock("GET", "/bad.geojson")
        .with_status(503)
        .create_async()
        .await;

    let mut viewer = FeedViewer::new(&Config::default());
    viewer.refresh(&client_for(&server, "/good.geojson")).await;

    let outcome = viewer.refresh(&client_for(&server, "/bad.geojson")).await;
    assert_eq!(outcome, RefreshOutcome::Failed);
    assert!(!viewer.is_loading());
    assert_eq!(viewer.events().len(), 2);
    assert!(viewer.last_error().unwrap().contains("503"));
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/feed")
        .with_status(404)
        .create_async()
        .await;

    let err = client_for(&server, "/feed").fetch().await.unwrap_err();
    assert!(matches!(err, FeedError::Status(s) if s.as_u16() == 404));
}

#[tokio::test]
async fn garbage_body_is_a_decode_error() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/feed")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let err = client_for(&server, "/feed").fetch().await.unwrap_err();
    assert!(matches!(err, FeedError::Decode(_)));
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    // Nothing listens on port 9 of localhost in test environments
    let client = FeedClient::new("http://127.0.0.1:9/feed.geojson", true).unwrap();
    let mut viewer = FeedViewer::new(&Config::default());
    assert_eq!(viewer.refresh(&client).await, RefreshOutcome::Failed);
    assert!(!viewer.is_loading());
    assert!(viewer.snapshot().is_none());
}
