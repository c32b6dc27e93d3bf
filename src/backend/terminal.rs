//! Terminal backend on top of crossterm.
//!
//! Each terminal cell shows two pixels stacked vertically: the upper half
//! block is painted with the upper pixel as foreground and the lower pixel
//! as background. A `w x h` context therefore needs `w` columns and
//! `ceil(h / 2)` rows.

use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use anyhow::{bail, Result};
use crossterm::event::{self, KeyCode, KeyModifiers};
use crossterm::{cursor, execute, queue, style, terminal};

use crate::surface::Surface;
use crate::types::{Rect, Rgb};

use super::{clip_to_context, Backend, Event, Fullscreen, SysEvent};

const HALF_BLOCK: char = '\u{2580}';

pub struct TerminalBackend {
    stdout: io::Stdout,
    context: Surface,
}

impl TerminalBackend {
    /// Take over the terminal for a `width x height` pixel context.
    ///
    /// Fails if stdout is not a terminal or the terminal is too small. The
    /// terminal is restored when the backend is dropped.
    pub fn init(width: u32, height: u32, caption: &str) -> Result<Self> {
        let mut stdout = io::stdout();
        if !stdout.is_terminal() {
            bail!("stdout is not a terminal");
        }

        let (term_w, term_h) = terminal::size()?;
        let need_w = width;
        let need_h = rows_for(height);
        if u32::from(term_w) < need_w || u32::from(term_h) < need_h {
            bail!(
                "Terminal too small: need {}x{}, have {}x{}",
                need_w,
                need_h,
                term_w,
                term_h,
            );
        }

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )?;

        let mut backend = TerminalBackend {
            stdout,
            context: Surface::new(width, height),
        };
        if !backend.set_caption(caption) {
            log::warn!("terminal refused the window title");
        }
        log::info!("terminal backend {width}x{height} on a {term_w}x{term_h} terminal");
        Ok(backend)
    }

    /// Scale factor (at most 1) that makes an image of `image` pixels fit a
    /// terminal of `terminal` cells.
    pub fn fit_scale(image: (u32, u32), terminal: (u16, u16)) -> f32 {
        let (w, h) = image;
        let (cols, rows) = terminal;
        if w == 0 || h == 0 {
            return 1.0;
        }
        let sx = f32::from(cols) / w as f32;
        let sy = f32::from(rows) * 2.0 / h as f32;
        sx.min(sy).min(1.0)
    }

    /// Current terminal size in cells.
    pub fn terminal_size() -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }

    fn present(&mut self, rect: Rect) -> Result<()> {
        let first_row = rect.y0 / 2;
        let last_row = rect.y1 / 2;

        for row in first_row..=last_row {
            queue!(self.stdout, cursor::MoveTo(rect.x0 as u16, row as u16))?;
            for x in rect.x0..=rect.x1 {
                let upper = self.context.pixel(x, row * 2);
                let lower = self.context.pixel(x, row * 2 + 1);
                let mut cs = style::ContentStyle::default();
                cs.foreground_color = Some(to_ct_color(upper));
                cs.background_color = Some(to_ct_color(lower));
                queue!(
                    self.stdout,
                    style::PrintStyledContent(style::StyledContent::new(cs, HALF_BLOCK))
                )?;
            }
        }
        self.stdout.flush()?;
        Ok(())
    }
}

impl Backend for TerminalBackend {
    fn name(&self) -> &str {
        "terminal"
    }

    fn context(&self) -> &Surface {
        &self.context
    }

    fn context_mut(&mut self) -> &mut Surface {
        &mut self.context
    }

    fn flip(&mut self) -> Result<()> {
        self.present(self.context.bounds())
    }

    fn update_rect(&mut self, rect: Rect) -> Result<()> {
        match clip_to_context(&self.context, rect) {
            Some(rect) => self.present(rect),
            None => Ok(()),
        }
    }

    fn poll_event(&mut self) -> Result<Option<Event>> {
        while event::poll(Duration::ZERO)? {
            if let Some(ev) = translate(event::read()?) {
                return Ok(Some(ev));
            }
        }
        Ok(None)
    }

    fn set_caption(&mut self, caption: &str) -> bool {
        execute!(self.stdout, terminal::SetTitle(caption)).is_ok()
    }

    fn resize(&mut self, width: u32, height: u32) -> bool {
        self.context = self.context.resized(width, height);
        let (Ok(cols), Ok(rows)) = (u16::try_from(width), u16::try_from(rows_for(height))) else {
            return false;
        };
        let applied = execute!(self.stdout, terminal::SetSize(cols, rows)).is_ok();
        if let Err(e) = execute!(self.stdout, terminal::Clear(terminal::ClearType::All)) {
            log::warn!("clear after resize failed: {e}");
        }
        applied
    }

    fn fullscreen(&mut self, mode: Fullscreen) -> bool {
        let seq: &[u8] = match mode {
            Fullscreen::Off => b"\x1b[10;0t",
            Fullscreen::On => b"\x1b[10;1t",
            Fullscreen::Toggle => b"\x1b[10;2t",
        };
        self.stdout.write_all(seq).and_then(|()| self.stdout.flush()).is_ok()
    }
}

impl Drop for TerminalBackend {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn rows_for(height: u32) -> u32 {
    height.div_ceil(2)
}

/// Map a crossterm event. Events the animation has no use for are dropped.
fn translate(ev: event::Event) -> Option<Event> {
    match ev {
        // Raw mode swallows SIGINT.
        event::Event::Key(key)
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            Some(Event::Sys(SysEvent::Quit))
        }
        event::Event::Key(key) => Some(Event::Key(key)),
        event::Event::Resize(cols, rows) => Some(Event::Sys(SysEvent::Resize { cols, rows })),
        _ => None,
    }
}

/// Pixels past the bottom edge use the terminal's own background.
fn to_ct_color(pixel: Option<Rgb>) -> style::Color {
    match pixel {
        Some(Rgb { r, g, b }) => style::Color::Rgb { r, g, b },
        None => style::Color::Reset,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEvent;

    use super::*;

    #[test]
    fn fit_scale_only_shrinks() {
        assert_eq!(TerminalBackend::fit_scale((80, 40), (100, 30)), 1.0);
        assert_eq!(TerminalBackend::fit_scale((400, 100), (100, 50)), 0.25);
        // Two pixel rows per cell row.
        assert_eq!(TerminalBackend::fit_scale((100, 200), (200, 50)), 0.5);
    }

    #[test]
    fn odd_heights_round_up() {
        assert_eq!(rows_for(7), 4);
        assert_eq!(rows_for(8), 4);
    }

    #[test]
    fn ctrl_c_is_quit() {
        let ev = event::Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(translate(ev), Some(Event::Sys(SysEvent::Quit)));
    }

    #[test]
    fn plain_keys_and_resizes_pass_through() {
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(translate(event::Event::Key(esc)), Some(Event::Key(esc)));
        assert_eq!(
            translate(event::Event::Resize(120, 40)),
            Some(Event::Sys(SysEvent::Resize { cols: 120, rows: 40 }))
        );
        assert_eq!(translate(event::Event::FocusGained), None);
    }

    #[test]
    fn missing_pixel_uses_reset() {
        assert_eq!(to_ct_color(None), style::Color::Reset);
        assert_eq!(
            to_ct_color(Some(Rgb::new(1, 2, 3))),
            style::Color::Rgb { r: 1, g: 2, b: 3 }
        );
    }
}
