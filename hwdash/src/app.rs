//! App state and main loop: input handling, message pumping, repeating
//! requests and drawing.

use std::{
    io,
    time::{Duration, Instant},
};

use anyhow::Context;
use chrono::Utc;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::time::timeout;
use tracing::{error, info};

use crate::proto::Outbound;
use crate::session::Session;
use crate::settings::Settings;
use crate::ui::{grid::draw_grid, header::draw_header, sidebar::draw_sidebar};
use crate::widget::WidgetArena;
use crate::ws::{connect, recv, send, WsStream};

const SIDEBAR_W: u16 = 30;

pub struct App {
    session: Session,
    host: String,
    tick: Duration,

    // Requests re-sent every tick until the server restarts the handshake
    repeating: Vec<Outbound>,
    last_tick: Instant,

    should_quit: bool,
}

impl App {
    pub fn new(settings: &Settings) -> Self {
        Self {
            session: Session::new(WidgetArena::new(settings.history_cap)),
            host: settings.host.clone(),
            tick: Duration::from_millis(settings.tick_ms.max(1)),
            repeating: Vec::new(),
            last_tick: Instant::now(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self, url: &str) -> anyhow::Result<()> {
        let mut ws = connect(url)
            .await
            .with_context(|| format!("connecting to {url}"))?;
        info!(%url, "session started");

        // Terminal setup
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        // Main loop
        let res = self.event_loop(&mut terminal, &mut ws).await;

        // Teardown
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        if let Err(e) = &res {
            error!(error = %e, "session aborted");
        }
        res
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        ws: &mut WsStream,
    ) -> anyhow::Result<()> {
        loop {
            // Input (non-blocking)
            while event::poll(Duration::from_millis(10))? {
                if let Event::Key(k) = event::read()? {
                    if k.kind != KeyEventKind::Press {
                        continue;
                    }
                    let out = match k.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            self.should_quit = true;
                            Vec::new()
                        }
                        KeyCode::Char('e') => self.session.cycle_effect()?,
                        KeyCode::Char(c @ '1'..='9') => {
                            let idx = c as usize - '1' as usize;
                            if idx < self.session.selector().options().len() {
                                self.session.select_effect(idx)?
                            } else {
                                Vec::new()
                            }
                        }
                        _ => Vec::new(),
                    };
                    self.flush(ws, out).await?;
                }
            }
            if self.should_quit {
                break;
            }

            // Repeating requests
            if self.last_tick.elapsed() >= self.tick {
                for msg in &self.repeating {
                    send(ws, msg).await?;
                }
                self.last_tick = Instant::now();
            }

            // Inbound
            match timeout(Duration::from_millis(50), recv(ws)).await {
                Ok(Ok(Some(msg))) => {
                    let out = self.session.handle(msg, Utc::now())?;
                    self.flush(ws, out).await?;
                }
                Ok(Ok(None)) => anyhow::bail!("server closed the connection"),
                Ok(Err(e)) => return Err(e.into()),
                Err(_) => {}
            }

            // Draw
            terminal.draw(|f| self.draw(f))?;
        }

        Ok(())
    }

    // Send outbound messages in order; a repeating request replaces the
    // previous subscription and fires immediately.
    async fn flush(&mut self, ws: &mut WsStream, out: Vec<Outbound>) -> anyhow::Result<()> {
        if out.iter().any(Outbound::is_repeating) {
            self.repeating.clear();
        }
        for msg in out {
            send(ws, &msg).await?;
            if msg.is_repeating() {
                self.repeating.push(msg);
                self.last_tick = Instant::now();
            }
        }
        Ok(())
    }

    pub fn draw(&self, f: &mut ratatui::Frame<'_>) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(5)])
            .split(f.area());

        draw_header(f, rows[0], &self.host, &self.session);

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_W), Constraint::Min(10)])
            .split(rows[1]);

        draw_sidebar(f, cols[0], self.session.selector(), self.session.smart());
        draw_grid(f, cols[1], self.session.widgets());
    }
}
