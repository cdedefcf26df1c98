//! Recent allocations, newest at the bottom

use std::collections::VecDeque;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use voicesteal::Allocation;

use super::note_name;

pub fn render_log(frame: &mut Frame, area: Rect, log: &VecDeque<Allocation>) {
    let block = Block::default().title(" Allocations ").borders(Borders::ALL);
    let visible = area.height.saturating_sub(2) as usize;

    let lines: Vec<Line> = log
        .iter()
        .skip(log.len().saturating_sub(visible))
        .map(|allocation| {
            let (text, color) = describe(allocation);
            Line::from(Span::styled(format!(" {}", text), Style::default().fg(color)))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn describe(allocation: &Allocation) -> (String, Color) {
    match *allocation {
        Allocation::Ignored => ("ignored (other channel)".to_string(), Color::DarkGray),
        Allocation::Assigned { voice, note } => (
            format!("{} -> voice {}", note_name(note.note), voice),
            Color::Green,
        ),
        Allocation::Retriggered { voice, note } => (
            format!("{} retriggered on voice {} (vel {})", note_name(note.note), voice, note.velocity),
            Color::Cyan,
        ),
        Allocation::RetriggeredQueued { note } => (
            format!("{} retriggered while queued (vel {})", note_name(note.note), note.velocity),
            Color::Cyan,
        ),
        Allocation::Stolen {
            voice,
            note,
            displaced,
            queued,
        } => {
            let fate = if queued { "queued" } else { "dropped, overflow full" };
            (
                format!(
                    "{} stole voice {} from {} ({})",
                    note_name(note.note),
                    voice,
                    note_name(displaced.note),
                    fate
                ),
                if queued { Color::Yellow } else { Color::Red },
            )
        }
        Allocation::Restored {
            voice,
            released,
            note,
        } => (
            format!(
                "{} released, voice {} restored to {}",
                note_name(released),
                voice,
                note_name(note.note)
            ),
            Color::Magenta,
        ),
        Allocation::Silenced { voice, released } => (
            format!("{} released, voice {} idle", note_name(released), voice),
            Color::White,
        ),
        Allocation::Dequeued { note } => (
            format!("{} released while queued", note_name(note.note)),
            Color::White,
        ),
        Allocation::Untracked { note } => (
            format!("{} released but was not tracked", note_name(note)),
            Color::DarkGray,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voicesteal::PressedNote;

    #[test]
    fn dropped_steal_is_flagged() {
        let (text, color) = describe(&Allocation::Stolen {
            voice: 0,
            note: PressedNote::new(62, 100),
            displaced: PressedNote::new(60, 100),
            queued: false,
        });
        assert!(text.contains("dropped"));
        assert_eq!(color, Color::Red);
    }
}
