//! Overflow store contents, oldest first; the bottom row is restored next

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use voicesteal::OverflowStore;

use super::note_name;

pub fn render_overflow<const C: usize>(frame: &mut Frame, area: Rect, store: &OverflowStore<C>) {
    let block = Block::default().title(" Overflow ").borders(Borders::ALL);

    if store.is_empty() {
        let empty = Line::from(Span::styled(" empty", Style::default().fg(Color::DarkGray)));
        frame.render_widget(Paragraph::new(empty).block(block), area);
        return;
    }

    let last = store.len() - 1;
    let lines: Vec<Line> = store
        .iter()
        .enumerate()
        .map(|(position, pressed)| {
            let color = if position == last { Color::Yellow } else { Color::White };
            Line::from(vec![
                Span::styled(format!(" {:>2}  ", position), Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{:<4} vel {:>3}", note_name(pressed.note), pressed.velocity),
                    Style::default().fg(color),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
