//! Application event stream.
//!
//! Terminal input and store notifications arrive on one channel.  Frame
//! ticks come from a separate interval in the main loop so that a steady
//! stream of input cannot hold them back.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

use crate::core::scroll::ScrollOffset;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// The page container reported a new scroll offset.
    Scrolled(ScrollOffset),
    /// A new cart snapshot was published.
    CartChanged,
    /// The variant selection changed.
    SelectionChanged,
}

/// Spawns a blocking task that polls the terminal and forwards input into
/// `tx`.  `poll_rate` bounds how long a dropped receiver goes unnoticed.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<AppEvent>, poll_rate: Duration) {
    tokio::task::spawn_blocking(move || loop {
        if !event::poll(poll_rate).unwrap_or(false) {
            if tx.is_closed() {
                break;
            }
            continue;
        }
        let app_event = match event::read() {
            Ok(CtEvent::Key(k)) => AppEvent::Key(k),
            Ok(CtEvent::Mouse(m)) => AppEvent::Mouse(m),
            Ok(CtEvent::Resize(w, h)) => AppEvent::Resize(w, h),
            _ => continue,
        };
        if tx.send(app_event).is_err() {
            break; // receiver dropped
        }
    });
}
