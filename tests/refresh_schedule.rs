// Periodic refresh timing and sequence ordering, on a paused clock
use chrono::{TimeZone, Utc};
use futures::future::BoxFuture;
use seismomap::client::{FeedError, FeedSource};
use seismomap::config::Config;
use seismomap::feed::Snapshot;
use seismomap::refresh::{RefreshEvent, Refresher};
use seismomap::viewer::FeedViewer;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};

const PERIOD: Duration = Duration::from_secs(5 * 60);

#[derive(Default)]
struct CountingSource {
    calls: AtomicUsize,
}

impl CountingSource {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FeedSource for CountingSource {
    fn fetch(&self) -> BoxFuture<'_, Result<Snapshot, FeedError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async {
            Ok(Snapshot {
                events: vec![],
                generated: Utc.timestamp_millis_opt(0).unwrap(),
            })
        })
    }
}

async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

fn drain(rx: &mut UnboundedReceiver<RefreshEvent>) -> Vec<RefreshEvent> {
    let mut out = Vec::new();
    while let Ok(ev) = rx.try_recv() {
        out.push(ev);
    }
    out
}

#[tokio::test(start_paused = true)]
async fn fetches_once_at_startup() {
    let source = Arc::new(CountingSource::default());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let refresher = Refresher::new(source.clone(), tx);

    let _handle = refresher.spawn_periodic(PERIOD);
    settle().await;

    assert_eq!(source.calls(), 1);
    let events = drain(&mut rx);
    assert!(matches!(events[0], RefreshEvent::Started(1)));
    assert!(matches!(events[1], RefreshEvent::Finished(1, Ok(_))));
}

#[tokio::test(start_paused = true)]
async fn one_interval_triggers_exactly_one_fetch() {
    let source = Arc::new(CountingSource::default());
    let (tx, _rx) = mpsc::unbounded_channel();
    let refresher = Refresher::new(source.clone(), tx);

    let _handle = refresher.spawn_periodic(PERIOD);
    settle().await;
    assert_eq!(source.calls(), 1);

    tokio::time::advance(PERIOD - Duration::from_millis(1)).await;
    settle().await;
    assert_eq!(source.calls(), 1, "fired before the interval elapsed");

    tokio::time::advance(Duration::from_millis(1)).await;
    settle().await;
    assert_eq!(source.calls(), 2);

    tokio::time::advance(PERIOD).await;
    settle().await;
    assert_eq!(source.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_handle_stops_the_timer() {
    let source = Arc::new(CountingSource::default());
    let (tx, _rx) = mpsc::unbounded_channel();
    let refresher = Refresher::new(source.clone(), tx);

    let handle = refresher.spawn_periodic(PERIOD);
    settle().await;
    drop(handle);
    settle().await;

    tokio::time::advance(PERIOD * 10).await;
    settle().await;
    assert_eq!(source.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn timer_stops_when_receiver_is_gone() {
    let source = Arc::new(CountingSource::default());
    let (tx, rx) = mpsc::unbounded_channel();
    let refresher = Refresher::new(source.clone(), tx);

    let handle = refresher.spawn_periodic(PERIOD);
    settle().await;
    drop(rx);

    tokio::time::advance(PERIOD).await;
    settle().await;
    assert_eq!(source.calls(), 1);
    assert!(handle.is_finished());
}

#[tokio::test(start_paused = true)]
async fn manual_and_timer_refreshes_share_one_sequence() {
    let source = Arc::new(CountingSource::default());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let refresher = Refresher::new(source.clone(), tx);

    let _handle = refresher.spawn_periodic(PERIOD);
    settle().await;
    assert_eq!(refresher.trigger(), 2);
    settle().await;

    tokio::time::advance(PERIOD).await;
    settle().await;

    let mut viewer = FeedViewer::new(&Config::default());
    let mut started = Vec::new();
    for ev in drain(&mut rx) {
        match ev {
            RefreshEvent::Started(seq) => {
                started.push(seq);
                viewer.begin_refresh(seq);
            }
            RefreshEvent::Finished(seq, result) => {
                viewer.complete_refresh(seq, result);
            }
        }
    }
    assert_eq!(started, vec![1, 2, 3]);
    assert!(!viewer.is_loading());
}
