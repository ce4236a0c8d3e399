//! App: component-based event loop.
//!
//! Architecture:
//! - `App` owns all components and `AppState` (shared read-only data for components).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from background tasks.
//! - The event loop draws each frame, then awaits the next message or UI tick.
//! - Components return `Vec<Action>`; App dispatches each Action.
//! - Fetches run as detached tasks and report back with their ticket's sequence
//!   number; the page views decide whether the result still applies.

use std::io;
use std::time::Duration;

use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

use stream_proto::api::{ApiClient, FetchError};
use stream_proto::protocol::{LiveStreamStatus, ScheduledVideoEntry};
use stream_proto::refresh::FetchTicket;

use crate::action::{Action, Page};
use crate::app_state::AppState;
use crate::component::Component;
use crate::components::{live_panel::LivePanel, nav_bar::NavBar, schedule_panel::SchedulePanel};
use crate::theme::C_BG;
use crate::widgets::{status_bar, toast::ToastManager};

/// Messages delivered to the event loop from background tasks.
#[derive(Debug)]
pub enum AppMessage {
    Event(Event),
    ScheduleFetched(u64, Result<Vec<ScheduledVideoEntry>, FetchError>),
    LiveFetched(u64, Result<LiveStreamStatus, FetchError>),
}

pub struct App {
    state: AppState,
    api: ApiClient,
    nav_bar: NavBar,
    live_panel: LivePanel,
    schedule_panel: SchedulePanel,
    toast: ToastManager,
    tx: Option<mpsc::Sender<AppMessage>>,
    should_quit: bool,
}

impl App {
    pub fn new(state: AppState, api: ApiClient) -> Self {
        Self {
            state,
            api,
            nav_bar: NavBar::new(),
            live_panel: LivePanel::new(),
            schedule_panel: SchedulePanel::new(),
            toast: ToastManager::new(),
            tx: None,
            should_quit: false,
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);
        self.tx = Some(tx.clone());

        // ── Background task: keyboard events ──────────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });
        drop(tx);

        self.mount_page(self.state.page);

        let mut ui_tick = tokio::time::interval(Duration::from_millis(100));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    self.handle_message(msg);
                    while let Ok(next) = rx.try_recv() {
                        self.handle_message(next);
                    }
                    needs_redraw = true;
                }
                _ = ui_tick.tick() => {
                    let had_toasts = !self.toast.is_empty();
                    self.toast.tick();
                    self.on_ui_tick();
                    // The countdown bar animates while the live page is up.
                    needs_redraw = had_toasts || self.state.page == Page::Live;
                }
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        self.unmount_page(self.state.page);
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        info!("streamwatch exiting");

        Ok(())
    }

    // ── Page lifecycle ────────────────────────────────────────────────────────

    fn mount_page(&mut self, page: Page) {
        info!("mount {} page", page.label());
        match page {
            Page::Live => {
                let ticket = self.state.live.mount();
                self.state.countdown.restart();
                self.spawn_live_fetch(ticket);
            }
            Page::Schedule => {
                let ticket = self.state.schedule.mount();
                self.spawn_schedule_fetch(ticket);
            }
        }
    }

    fn unmount_page(&mut self, page: Page) {
        debug!("unmount {} page", page.label());
        match page {
            Page::Live => self.state.live.unmount(),
            Page::Schedule => self.state.schedule.unmount(),
        }
    }

    fn switch_page(&mut self, page: Page) {
        if page == self.state.page {
            return;
        }
        self.unmount_page(self.state.page);
        self.state.page = page;
        self.mount_page(page);
    }

    fn spawn_live_fetch(&self, ticket: FetchTicket) {
        let Some(tx) = self.tx.clone() else {
            return;
        };
        let api = self.api.clone();
        tokio::spawn(async move {
            if let Some((seq, result)) = ticket.run(api.fetch_live()).await {
                let _ = tx.send(AppMessage::LiveFetched(seq, result)).await;
            }
        });
    }

    fn spawn_schedule_fetch(&self, ticket: FetchTicket) {
        let Some(tx) = self.tx.clone() else {
            return;
        };
        let api = self.api.clone();
        tokio::spawn(async move {
            if let Some((seq, result)) = ticket.run(api.fetch_upcoming()).await {
                let _ = tx.send(AppMessage::ScheduleFetched(seq, result)).await;
            }
        });
    }

    // ── Message handling ──────────────────────────────────────────────────────

    fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Event(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                let actions = self.handle_key(key);
                self.dispatch_all(actions);
            }
            AppMessage::Event(_) => {}
            AppMessage::LiveFetched(seq, result) => {
                self.state.live.on_fetch_complete(seq, result);
            }
            AppMessage::ScheduleFetched(seq, result) => {
                self.state.schedule.on_fetch_complete(seq, result);
            }
        }
    }

    fn on_ui_tick(&mut self) {
        if self.state.page == Page::Live
            && self.state.live.auto_refresh()
            && self.state.countdown.poll_elapsed()
        {
            self.dispatch(Action::IntervalElapsed);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        match key.code {
            KeyCode::Char('c') if key.modifiers == KeyModifiers::CONTROL => {
                return vec![Action::Quit];
            }
            KeyCode::Char('q') | KeyCode::Esc => return vec![Action::Quit],
            _ => {}
        }

        let actions = self.nav_bar.handle_key(key, &self.state);
        if !actions.is_empty() {
            return actions;
        }
        let panel: &mut dyn Component = match self.state.page {
            Page::Live => &mut self.live_panel,
            Page::Schedule => &mut self.schedule_panel,
        };
        let actions = panel.handle_key(key, &self.state);
        if !actions.is_empty() {
            trace!("{:?} -> {:?}", panel.id(), actions);
        }
        actions
    }

    fn dispatch_all(&mut self, actions: Vec<Action>) {
        for action in actions {
            self.dispatch(action);
        }
    }

    fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::SwitchPage(page) => self.switch_page(page),
            Action::NextPage => self.switch_page(self.state.page.next()),

            Action::SelectUp(_) | Action::SelectDown(_) | Action::SelectFirst | Action::SelectLast => {
                let follow_up = self.schedule_panel.on_action(&action, &self.state);
                self.dispatch_all(follow_up);
            }

            Action::ToggleAutoRefresh => {
                let enabled = self.state.live.toggle_auto_refresh();
                if enabled {
                    self.state.countdown.restart();
                    self.toast.info("auto-refresh on");
                } else {
                    self.toast.info("auto-refresh off");
                }
            }

            Action::IntervalElapsed => {
                if let Some(ticket) = self.state.live.on_interval_elapsed() {
                    self.spawn_live_fetch(ticket);
                }
            }

            Action::CopyToClipboard(text) => {
                match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.clone())) {
                    Ok(()) => {
                        self.toast.success(format!("copied: {}", text));
                    }
                    Err(e) => {
                        warn!("clipboard error: {}", e);
                        self.toast.warning(format!("clipboard error: {}", e));
                    }
                }
            }
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(C_BG)), area);

        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        self.nav_bar.draw(frame, outer[0], &self.state);
        match self.state.page {
            Page::Live => self.live_panel.draw(frame, outer[1], &self.state),
            Page::Schedule => self.schedule_panel.draw(frame, outer[1], &self.state),
        }
        status_bar::draw_keys_bar(frame, outer[2], self.state.page);
        self.toast.draw(frame, area);
    }
}
