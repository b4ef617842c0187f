//! Top header with target host, session state and the active effect.

use crate::session::Session;
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders},
};

pub fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect, host: &str, s: &Session) {
    let effect = s.config().map(|c| c.effect.as_str()).unwrap_or("-");
    let title = format!(
        "hwdash - host: {host} | {} | effect: {effect}  (e: effect, q: quit)",
        s.state().label()
    );
    f.render_widget(Block::default().title(title).borders(Borders::BOTTOM), area);
}
