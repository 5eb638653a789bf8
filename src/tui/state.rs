// File: src/tui/state.rs
use crate::config::Config;
use crate::feed::Event;
use crate::refresh::RefreshEvent;
use crate::viewer::{FeedViewer, RefreshOutcome};
use crate::viewport::Viewport;
use ratatui::widgets::ListState;

pub const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub struct AppState {
    pub viewer: FeedViewer,
    pub viewport: Viewport,
    pub list_state: ListState,

    pub show_popup: bool,
    pub show_full_help: bool,
    pub message: String,
    pub tick: usize,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            viewer: FeedViewer::new(config),
            viewport: Viewport::default(),
            list_state: ListState::default(),
            show_popup: false,
            show_full_help: false,
            message: "Fetching earthquake feed...".to_string(),
            tick: 0,
        }
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER[self.tick % SPINNER.len()]
    }

    pub fn apply(&mut self, event: RefreshEvent) {
        match event {
            RefreshEvent::Started(seq) => self.viewer.begin_refresh(seq),
            RefreshEvent::Finished(seq, result) => {
                let selected_id = self.selected_event().map(|e| e.id.clone());
                match self.viewer.complete_refresh(seq, result) {
                    RefreshOutcome::Applied => {
                        self.message = format!("Loaded {} events", self.viewer.events().len());
                        self.reselect(selected_id.as_deref());
                    }
                    RefreshOutcome::Stale => {}
                    RefreshOutcome::Failed => {
                        self.message = "Refresh failed (see log)".to_string();
                    }
                }
            }
        }
    }

    /// Keeps the same event selected across snapshots when it is still present.
    fn reselect(&mut self, id: Option<&str>) {
        let events = self.viewer.events();
        if events.is_empty() {
            self.list_state.select(None);
            self.show_popup = false;
            return;
        }
        let idx = id.and_then(|id| events.iter().position(|e| e.id == id));
        match (idx, self.list_state.selected()) {
            (Some(i), _) => self.list_state.select(Some(i)),
            (None, Some(i)) => {
                self.list_state.select(Some(i.min(events.len() - 1)));
                self.show_popup = false;
            }
            (None, None) => {}
        }
    }

    pub fn selected_event(&self) -> Option<&Event> {
        self.list_state
            .selected()
            .and_then(|i| self.viewer.events().get(i))
    }

    pub fn next(&mut self) {
        let len = self.viewer.events().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(_) => 0,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.viewer.events().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    /// Shows the popup for the selected event and centers the map on it.
    pub fn open_popup(&mut self) {
        let Some((lon, lat)) = self.selected_event().map(|e| (e.longitude, e.latitude)) else {
            return;
        };
        self.viewport.focus(lon, lat);
        self.show_popup = true;
    }
}
