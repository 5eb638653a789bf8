// File: src/viewer.rs
use crate::client::{FeedError, FeedSource};
use crate::config::Config;
use crate::feed::{Event, Snapshot};
use crate::marker::Theme;
use crate::projection::{self, ListEntry, MarkerView};
use chrono::{DateTime, Utc};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Drawer {
    Open,
    #[default]
    Closed,
}

impl Drawer {
    pub fn is_open(self) -> bool {
        self == Drawer::Open
    }
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    /// A newer response had already been applied.
    Stale,
    Failed,
}

#[derive(Debug, Clone)]
pub struct TileSource {
    pub light: String,
    pub dark: String,
    pub attribution: String,
}

impl TileSource {
    pub fn url(&self, theme: Theme) -> &str {
        match theme {
            Theme::Light => &self.light,
            Theme::Dark => &self.dark,
        }
    }
}

impl From<&Config> for TileSource {
    fn from(c: &Config) -> Self {
        Self {
            light: c.light_tile_url.clone(),
            dark: c.dark_tile_url.clone(),
            attribution: c.attribution.clone(),
        }
    }
}

/// The whole view state. Mutated only through the methods below.
#[derive(Debug, Clone)]
pub struct FeedViewer {
    snapshot: Option<Snapshot>,
    theme: Theme,
    drawer: Drawer,
    loading: bool,
    tiles: TileSource,
    // Sequence of the snapshot currently shown (0 = none)
    applied_seq: u64,
    // Highest sequence handed out by begin_refresh
    issued_seq: u64,
    last_error: Option<String>,
}

impl FeedViewer {
    pub fn new(config: &Config) -> Self {
        Self {
            snapshot: None,
            theme: if config.dark_mode {
                Theme::Dark
            } else {
                Theme::Light
            },
            drawer: Drawer::Closed,
            // Startup fetch is always pending until the first response lands
            loading: true,
            tiles: TileSource::from(config),
            applied_seq: 0,
            issued_seq: 0,
            last_error: None,
        }
    }

    // --- Accessors ---

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn events(&self) -> &[Event] {
        self.snapshot.as_ref().map_or(&[], |s| s.events.as_slice())
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.snapshot.as_ref().map(|s| s.generated)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn drawer(&self) -> Drawer {
        self.drawer
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn tile_url(&self) -> &str {
        self.tiles.url(self.theme)
    }

    pub fn attribution(&self) -> &str {
        &self.tiles.attribution
    }

    pub fn next_seq(&self) -> u64 {
        self.issued_seq + 1
    }

    // --- Projections ---

    pub fn markers(&self) -> Vec<MarkerView> {
        self.snapshot.as_ref().map(projection::markers).unwrap_or_default()
    }

    pub fn list_entries(&self) -> Vec<ListEntry> {
        self.snapshot
            .as_ref()
            .map(projection::list_entries)
            .unwrap_or_default()
    }

    // --- Operations ---

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn toggle_drawer(&mut self) {
        self.drawer = match self.drawer {
            Drawer::Open => Drawer::Closed,
            Drawer::Closed => Drawer::Open,
        };
    }

    /// Marks request `seq` as in flight.
    pub fn begin_refresh(&mut self, seq: u64) {
        self.issued_seq = self.issued_seq.max(seq);
        self.loading = true;
    }

    /// Settles request `seq`. Errors are logged and swallowed; the previous snapshot stays.
    pub fn complete_refresh(
        &mut self,
        seq: u64,
        result: Result<Snapshot, FeedError>,
    ) -> RefreshOutcome {
        // Loading tracks the most recent request only
        if seq >= self.issued_seq {
            self.loading = false;
        }

        match result {
            Ok(snapshot) if seq > self.applied_seq => {
                log::info!(
                    "Applied snapshot #{} with {} events (generated {})",
                    seq,
                    snapshot.len(),
                    snapshot.generated
                );
                self.snapshot = Some(snapshot);
                self.applied_seq = seq;
                self.last_error = None;
                RefreshOutcome::Applied
            }
            Ok(_) => {
                log::debug!(
                    "Discarding stale snapshot #{} (showing #{})",
                    seq,
                    self.applied_seq
                );
                RefreshOutcome::Stale
            }
            Err(e) => {
                log::error!("Error fetching earthquake data (request #{}): {}", seq, e);
                self.last_error = Some(e.to_string());
                RefreshOutcome::Failed
            }
        }
    }

    /// One full fetch cycle against `source`, in place.
    pub async fn refresh<S: FeedSource + ?Sized>(&mut self, source: &S) -> RefreshOutcome {
        let seq = self.next_seq();
        self.begin_refresh(seq);
        let result = source.fetch().await;
        self.complete_refresh(seq, result)
    }
}
