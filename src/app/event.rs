//! Terminal event abstraction.
//!
//! A background task polls crossterm and forwards input over a channel; when
//! nothing arrives within the frame interval it sends a `Tick` so animations
//! and notification timers keep moving.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent, MouseEventKind};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick(Instant),
}

/// Roughly 30 frames per second.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Spawns a background task that polls the terminal for events and sends them
/// through the returned channel.
pub fn spawn_event_reader(frame_interval: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || {
        let mut last_tick = Instant::now();
        loop {
            let timeout = frame_interval.saturating_sub(last_tick.elapsed());
            let has_event = event::poll(timeout).unwrap_or(false);
            if has_event {
                if let Ok(ev) = event::read() {
                    let app_event = match ev {
                        CtEvent::Key(k) => AppEvent::Key(k),
                        // Motion events would flood the channel; the board
                        // only reacts to presses.
                        CtEvent::Mouse(m) if m.kind == MouseEventKind::Moved => continue,
                        CtEvent::Mouse(m) => AppEvent::Mouse(m),
                        CtEvent::Resize(w, h) => AppEvent::Resize(w, h),
                        _ => continue,
                    };
                    if tx.send(app_event).is_err() {
                        break; // receiver dropped
                    }
                }
            }
            if last_tick.elapsed() >= frame_interval {
                last_tick = Instant::now();
                if tx.send(AppEvent::Tick(last_tick)).is_err() {
                    break;
                }
            }
        }
    });

    rx
}
