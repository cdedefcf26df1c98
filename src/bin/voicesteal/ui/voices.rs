//! Voice slots, one row per voice

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use voicesteal::VoiceSlot;

use super::note_name;

pub fn render_voices(frame: &mut Frame, area: Rect, slots: &[VoiceSlot]) {
    let block = Block::default().title(" Voices ").borders(Borders::ALL);

    let lines: Vec<Line> = slots
        .iter()
        .enumerate()
        .map(|(index, slot)| {
            let label = Span::styled(format!(" {:>2}  ", index), Style::default().fg(Color::DarkGray));
            match slot.pressed() {
                Some(pressed) => Line::from(vec![
                    label,
                    Span::styled(
                        format!("{:<4} ({:>3})  ", note_name(pressed.note), pressed.note),
                        Style::default().fg(Color::Green),
                    ),
                    Span::styled(velocity_bar(pressed.velocity), Style::default().fg(Color::Magenta)),
                ]),
                None => Line::from(vec![
                    label,
                    Span::styled("idle", Style::default().fg(Color::DarkGray)),
                ]),
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// 16-character meter for a 7-bit velocity
fn velocity_bar(velocity: u8) -> String {
    let filled = (velocity as usize * 16).div_ceil(127).min(16);
    format!("{}{}", "█".repeat(filled), "·".repeat(16 - filled))
}
