//! TUI module for voicesteal
//!
//! Shows the voice slots, the overflow store and a log of recent allocations.

mod log;
mod overflow;
mod voices;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::Monitor;

use log::render_log;
use overflow::render_overflow;
use voices::render_voices;

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Scientific pitch name, middle C (60) = C4
pub fn note_name(note: u8) -> String {
    let octave = (note / 12) as i32 - 1;
    format!("{}{}", NOTE_NAMES[(note % 12) as usize], octave)
}

/// Render the whole screen
pub fn render(frame: &mut Frame, monitor: &Monitor) {
    let area = frame.area();

    // Main layout: status, voices/overflow, log, help
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Status bar and keys
            Constraint::Min(6),    // Voices and overflow
            Constraint::Length(10), // Allocation log
            Constraint::Length(1), // Help bar
        ])
        .split(area);

    render_status(frame, chunks[0], monitor);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    render_voices(frame, body[0], monitor.manager.slots());
    render_overflow(frame, body[1], monitor.manager.overflow());

    render_log(frame, chunks[2], &monitor.log);

    let help = Paragraph::new(
        " [A-K] Toggle note  [Z/X] Octave  [1-9] Velocity  [Space] All off  [Q] Quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[3]);
}

fn render_status(frame: &mut Frame, area: ratatui::layout::Rect, monitor: &Monitor) {
    let block = Block::default().title(" voicesteal ").borders(Borders::ALL);
    let manager = &monitor.manager;

    let line = Line::from(vec![
        Span::styled(
            format!(" Channel: {}  ", manager.channel() + 1),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("Voices: {}  ", manager.voice_count()),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!(
                "Queued: {}/{}  ",
                manager.overflow().len(),
                manager.overflow().capacity()
            ),
            Style::default().fg(if manager.overflow().is_full() {
                Color::Red
            } else {
                Color::Yellow
            }),
        ),
        Span::styled(
            format!(
                "Octave: {}  Velocity: {}",
                monitor.keyboard.octave(),
                monitor.keyboard.velocity()
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    // Held keys light up
    let keys = Line::from(
        monitor
            .keyboard
            .keys()
            .map(|(key, held)| {
                let style = if held {
                    Style::default().fg(Color::Black).bg(Color::Green)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                Span::styled(format!(" {} ", key.to_ascii_uppercase()), style)
            })
            .collect::<Vec<_>>(),
    );

    frame.render_widget(Paragraph::new(vec![line, keys]).block(block), area);
}
