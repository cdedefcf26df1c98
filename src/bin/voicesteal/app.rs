//! Monitor - owns the manager and its message queue, runs the event loop

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use rtrb::{Consumer, Producer, RingBuffer};
use std::collections::VecDeque;
use std::time::Duration;

use voicesteal::{
    synth::{Allocation, VoiceManager, VoiceMessage},
    ManagerConfig,
};

use super::keymap::Keyboard;
use super::ui;

/// Voice slots compiled in; the config picks how many are used
pub const MAX_VOICES: usize = 8;

/// Messages the UI may queue between two drains
const QUEUE_SIZE: usize = 64;

/// Allocation history kept for display
pub const LOG_LINES: usize = 32;

pub struct Monitor {
    pub manager: VoiceManager<MAX_VOICES>,
    pub keyboard: Keyboard,
    pub log: VecDeque<Allocation>,
    tx: Producer<VoiceMessage>,
    rx: Consumer<VoiceMessage>,
    should_quit: bool,
}

impl Monitor {
    pub fn new(config: ManagerConfig) -> EyreResult<Self> {
        let manager = VoiceManager::from_config(&config)
            .wrap_err_with(|| format!("invalid manager config {:?}", config))?;
        let (tx, rx) = RingBuffer::new(QUEUE_SIZE);

        Ok(Self {
            manager,
            keyboard: Keyboard::new(config.channel),
            log: VecDeque::with_capacity(LOG_LINES),
            tx,
            rx,
            should_quit: false,
        })
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.apply_pending();

            terminal.draw(|frame| ui::render(frame, self))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Feed everything queued since the last frame to the manager
    fn apply_pending(&mut self) {
        let log = &mut self.log;
        self.manager.drain(&mut self.rx, |allocation| {
            if allocation == Allocation::Ignored {
                return;
            }
            if log.len() == LOG_LINES {
                log.pop_front();
            }
            log.push_back(allocation);
        });
    }

    fn send(&mut self, msg: VoiceMessage) {
        // A full queue only happens if drawing stalls; the key is dropped
        let _ = self.tx.push(msg);
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                self.keyboard.release_all();
                self.log.clear();
                self.send(VoiceMessage::Reset);
            }
            KeyCode::Char('z') => self.keyboard.octave_down(),
            KeyCode::Char('x') => self.keyboard.octave_up(),
            KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
                if let Some(step) = c.to_digit(10) {
                    self.keyboard.set_velocity_step(step);
                }
            }
            KeyCode::Char(c) => {
                if let Some(note) = self.keyboard.note_for(c) {
                    let event = self.keyboard.toggle(note);
                    self.send(event.into());
                }
            }
            _ => {}
        }
    }
}
