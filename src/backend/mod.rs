//! Backend — the display side of the animation.
//!
//! A backend owns the drawable context, presents it (whole or by damage
//! rectangle) and hands out input events one at a time. The terminal backend
//! is the real one; the memory backend records everything for tests.

mod memory;
mod terminal;

use std::fmt;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::surface::Surface;
use crate::types::Rect;

pub use memory::MemoryBackend;
pub use terminal::TerminalBackend;

/// Fullscreen request for [`Backend::fullscreen`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fullscreen {
    Off,
    On,
    Toggle,
}

pub trait Backend {
    fn name(&self) -> &str;

    /// The surface all rendering goes to.
    fn context(&self) -> &Surface;

    fn context_mut(&mut self) -> &mut Surface;

    /// Present the whole context.
    fn flip(&mut self) -> Result<()>;

    /// Present one region of the context. The rectangle is clipped to the
    /// context first; nothing happens if it lies outside.
    fn update_rect(&mut self, rect: Rect) -> Result<()>;

    /// Next queued event, never blocks.
    fn poll_event(&mut self) -> Result<Option<Event>>;

    /// Returns whether the caption was applied.
    fn set_caption(&mut self, _caption: &str) -> bool {
        false
    }

    /// Resize the context (and the display, if possible). Returns whether
    /// the display followed.
    fn resize(&mut self, _width: u32, _height: u32) -> bool {
        false
    }

    fn fullscreen(&mut self, _mode: Fullscreen) -> bool {
        false
    }
}

/// Clip a damage rectangle against the context bounds.
pub(crate) fn clip_to_context(context: &Surface, rect: Rect) -> Option<Rect> {
    Rect::new(rect.x0, rect.y0, rect.x1, rect.y1).intersect(&context.bounds())
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SysEvent {
    Quit,
    Resize { cols: u16, rows: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Sys(SysEvent),
}

impl Event {
    /// Escape key or a system quit request.
    pub fn is_quit(&self) -> bool {
        match self {
            Event::Key(key) => key.code == KeyCode::Esc,
            Event::Sys(sys) => *sys == SysEvent::Quit,
        }
    }
}

/// Diagnostic event dump.
impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Key(key) => {
                let kind = match key.kind {
                    KeyEventKind::Press => "press",
                    KeyEventKind::Repeat => "repeat",
                    KeyEventKind::Release => "release",
                };
                write!(f, "KEY {:?} {kind}", key.code)?;
                if !key.modifiers.is_empty() {
                    write!(f, " ({:?})", key.modifiers)?;
                }
                Ok(())
            }
            Event::Sys(SysEvent::Quit) => f.write_str("SYS QUIT"),
            Event::Sys(SysEvent::Resize { cols, rows }) => write!(f, "SYS RESIZE {cols}x{rows}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn quit_events() {
        assert!(key(KeyCode::Esc).is_quit());
        assert!(Event::Sys(SysEvent::Quit).is_quit());
        assert!(!key(KeyCode::Char('q')).is_quit());
        assert!(!Event::Sys(SysEvent::Resize { cols: 80, rows: 24 }).is_quit());
    }

    #[test]
    fn event_dump() {
        assert_eq!(key(KeyCode::Esc).to_string(), "KEY Esc press");
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        let dump = ctrl_c.to_string();
        assert!(dump.starts_with("KEY Char('c') press ("));
        assert!(dump.contains("CONTROL"));
        assert_eq!(Event::Sys(SysEvent::Quit).to_string(), "SYS QUIT");
        assert_eq!(
            Event::Sys(SysEvent::Resize { cols: 100, rows: 40 }).to_string(),
            "SYS RESIZE 100x40"
        );
    }

    #[test]
    fn clip_normalizes_and_clips() {
        let context = Surface::new(10, 10);
        assert_eq!(
            clip_to_context(&context, Rect { x0: 12, y0: 4, x1: -2, y1: 1 }),
            Some(Rect { x0: 0, y0: 1, x1: 9, y1: 4 })
        );
        assert_eq!(clip_to_context(&context, Rect::from_xywh(20, 20, 5, 5)), None);
    }
}
