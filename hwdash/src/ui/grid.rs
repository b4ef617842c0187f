//! Auto-generated grid of readout boxes and chart sparklines.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Sparkline},
};

use crate::ui::util::{inner, truncate_middle};
use crate::widget::{Widget, WidgetArena, WidgetBody};

const CELL_W: u16 = 26;
const READOUT_H: u16 = 5;
const CHART_H: u16 = 8;

pub fn draw_grid(f: &mut ratatui::Frame<'_>, area: Rect, widgets: &WidgetArena) {
    if widgets.is_empty() {
        f.render_widget(
            Paragraph::new("waiting for hardware data...")
                .block(Block::default().borders(Borders::ALL)),
            area,
        );
        return;
    }
    let cols = (area.width / CELL_W).max(1);
    let cell_w = area.width / cols;

    // Readouts first, then charts, each kind wrapping row by row
    let readouts: Vec<&Widget> = widgets.iter().filter(|w| !w.is_chart()).collect();
    let charts: Vec<&Widget> = widgets.iter().filter(|w| w.is_chart()).collect();

    let mut y = area.y;
    for (group, h) in [(readouts, READOUT_H), (charts, CHART_H)] {
        for row in group.chunks(cols as usize) {
            if y + h > area.y + area.height {
                return;
            }
            for (c, w) in row.iter().enumerate() {
                let cell = Rect {
                    x: area.x + c as u16 * cell_w,
                    y,
                    width: cell_w,
                    height: h,
                };
                draw_widget(f, cell, w);
            }
            y += h;
        }
    }
}

fn draw_widget(f: &mut ratatui::Frame<'_>, area: Rect, w: &Widget) {
    let title = truncate_middle(&w.title, area.width.saturating_sub(4) as usize);
    let mut block = Block::default().borders(Borders::ALL).title(title);
    if !w.subtitle.is_empty() {
        let sub = truncate_middle(&w.subtitle, area.width.saturating_sub(4) as usize);
        block = block.title_bottom(Line::from(sub).right_aligned());
    }
    match &w.body {
        WidgetBody::Readout { text } => {
            let value = if text.is_empty() { "-" } else { text.as_str() };
            let body = inner(area);
            f.render_widget(block, area);
            if body.height == 0 {
                return;
            }
            let mid = Rect {
                y: body.y + body.height / 2,
                height: 1,
                ..body
            };
            f.render_widget(
                Paragraph::new(value.to_string())
                    .alignment(Alignment::Center)
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                mid,
            );
        }
        WidgetBody::Chart { series } => {
            let max_points = area.width.saturating_sub(2) as usize;
            let data = series.tail_percent(max_points);
            let spark = Sparkline::default()
                .block(block)
                .data(&data)
                .max(100)
                .style(Style::default().fg(Color::Cyan));
            f.render_widget(spark, area);
        }
    }
}
