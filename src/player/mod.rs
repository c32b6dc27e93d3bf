//! Player — the animation loop.
//!
//! Each tick drains the backend's event queue, sleeps for the frame delay
//! and then moves every sprite once, in order. A quit event ends the tick
//! right away, before any sprite moves.

use std::thread;
use std::time::Duration;

use anyhow::Result;

use crate::backend::{Backend, Event, Fullscreen, SysEvent};
use crate::config::{matches_binding, Config};
use crate::scene::Scene;
use crate::sprite::Sprite;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Quit,
}

pub struct Player<'a, B: Backend> {
    backend: B,
    scene: &'a Scene,
    sprites: Vec<Sprite<'a>>,
    frame_delay: Duration,
    fullscreen_key: String,
    ticks: u64,
}

impl<'a, B: Backend> Player<'a, B> {
    pub fn new(backend: B, scene: &'a Scene, sprites: Vec<Sprite<'a>>, config: &Config) -> Self {
        Self {
            backend,
            scene,
            sprites,
            frame_delay: config.frame_delay(),
            fullscreen_key: config.key_bindings.fullscreen.clone(),
            ticks: 0,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn sprites(&self) -> &[Sprite<'a>] {
        &self.sprites
    }

    /// Number of ticks that advanced the sprites.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run until a quit event arrives.
    pub fn play(&mut self) -> Result<()> {
        self.start()?;
        while self.tick()? == Tick::Continue {}
        log::info!("quit after {} ticks", self.ticks);
        Ok(())
    }

    /// Paint the background and present it.
    pub fn start(&mut self) -> Result<()> {
        self.scene.paint(&mut self.backend);
        self.backend.flip()
    }

    pub fn tick(&mut self) -> Result<Tick> {
        if self.drain_events()? == Tick::Quit {
            return Ok(Tick::Quit);
        }

        thread::sleep(self.frame_delay);

        for sprite in &mut self.sprites {
            sprite.advance(&mut self.backend)?;
        }
        self.ticks += 1;
        Ok(Tick::Continue)
    }

    // -----------------------------------------------------------------------
    // Event handling
    // -----------------------------------------------------------------------

    fn drain_events(&mut self) -> Result<Tick> {
        while let Some(event) = self.backend.poll_event()? {
            log::debug!("{event}");

            if event.is_quit() {
                return Ok(Tick::Quit);
            }

            match event {
                Event::Key(key) if matches_binding(&self.fullscreen_key, &key) => {
                    if !self.backend.fullscreen(Fullscreen::Toggle) {
                        log::debug!("{} backend has no fullscreen", self.backend.name());
                    }
                }
                Event::Sys(SysEvent::Resize { .. }) => {
                    // The terminal may have wiped the screen.
                    self.backend.flip()?;
                }
                _ => {}
            }
        }
        Ok(Tick::Continue)
    }
}
