//! voicesteal - terminal monitor for the voice manager
//!
//! Play notes on the computer keyboard and watch voices get assigned,
//! stolen and restored.
//!
//! Run with: cargo run

mod app;
mod keymap;
mod ui;

use app::Monitor;
use voicesteal::ManagerConfig;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let mut monitor = Monitor::new(ManagerConfig::default())?;

    let mut terminal = ratatui::init();
    let result = monitor.run(&mut terminal);
    ratatui::restore();
    result
}
