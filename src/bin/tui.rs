// File: src/bin/tui.rs
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use seismomap::client::FeedClient;
use seismomap::config::Config;
use seismomap::logging;
use seismomap::paths::AppPaths;
use seismomap::refresh::{RefreshEvent, Refresher};
use seismomap::tui::action::Action;
use seismomap::tui::handler::handle_key_event;
use seismomap::tui::state::AppState;
use seismomap::tui::view::draw;
use std::io::{Stdout, stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};

const TICK_RATE: Duration = Duration::from_millis(120);

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut out = stdout();
        if let Err(err) = execute!(out, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }

        let terminal = match Terminal::new(CrosstermBackend::new(out)) {
            Ok(t) => t,
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = execute!(stdout(), LeaveAlternateScreen);
                return Err(err.into());
            }
        };
        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let log_path = logging::init()?;
    let config_path = AppPaths::config_file()?;
    let config = Config::load_from(&config_path).context("Could not load configuration")?;
    log::info!("Config: {}", config_path.display());
    let client = FeedClient::from_config(&config)
        .with_context(|| format!("Could not set up feed client for {}", config.feed_url))?;
    log::info!("Feed: {}", client.url());

    let (tx, rx) = mpsc::unbounded_channel();
    let refresher = Refresher::new(Arc::new(client), tx);
    let mut state = AppState::new(&config);

    let result = {
        let mut session = TerminalSession::new()?;
        // Timer is canceled when the handle drops at the end of this block
        let _auto_refresh = refresher.spawn_periodic(config.refresh_interval());
        run_app(&mut session.terminal, &mut state, &refresher, rx).await
    };

    if let Err(err) = &result {
        log::error!("Exiting on error: {:?}", err);
        eprintln!("Error: {err:?} (log: {})", log_path.display());
    }
    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut AppState,
    refresher: &Refresher,
    mut rx: UnboundedReceiver<RefreshEvent>,
) -> Result<()> {
    loop {
        while let Ok(ev) = rx.try_recv() {
            state.apply(ev);
        }

        terminal.draw(|f| draw(f, state))?;

        // crossterm's poll blocks; keep it off the async workers
        let input = tokio::task::spawn_blocking(|| -> std::io::Result<Option<Event>> {
            if event::poll(TICK_RATE)? {
                Ok(Some(event::read()?))
            } else {
                Ok(None)
            }
        })
        .await??;

        if let Some(Event::Key(key)) = input
            && key.kind == KeyEventKind::Press
        {
            match handle_key_event(key, state) {
                Some(Action::Quit) => return Ok(()),
                Some(Action::Refresh) => {
                    let seq = refresher.trigger();
                    log::info!("Manual refresh #{}", seq);
                }
                None => {}
            }
        }
        state.on_tick();
    }
}
