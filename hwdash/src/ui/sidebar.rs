//! Left column: effect selector on top, SMART reports below.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::widget::{EffectSelector, SmartPanel};

pub fn draw_sidebar(f: &mut ratatui::Frame<'_>, area: Rect, sel: &EffectSelector, smart: &SmartPanel) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(sel.options().len() as u16 + 2),
            Constraint::Min(3),
        ])
        .split(area);
    draw_selector(f, rows[0], sel);
    draw_smart(f, rows[1], smart);
}

fn draw_selector(f: &mut ratatui::Frame<'_>, area: Rect, sel: &EffectSelector) {
    let lines: Vec<Line> = sel
        .options()
        .iter()
        .enumerate()
        .map(|(i, name)| {
            if i == sel.selected_index() {
                Line::from(Span::styled(
                    format!("> {}. {name}", i + 1),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(format!("  {}. {name}", i + 1))
            }
        })
        .collect();
    let p = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(sel.title.as_str()));
    f.render_widget(p, area);
}

fn draw_smart(f: &mut ratatui::Frame<'_>, area: Rect, smart: &SmartPanel) {
    let block = Block::default().borders(Borders::ALL).title("S.M.A.R.T.");
    if smart.is_empty() {
        f.render_widget(Paragraph::new("waiting for report...").block(block), area);
        return;
    }
    let mut lines: Vec<Line> = Vec::new();
    for r in smart.reports() {
        lines.push(Line::from(Span::styled(
            r.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.extend(r.text.lines().map(|l| Line::from(l.to_string())));
        lines.push(Line::default());
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }).block(block), area);
}
