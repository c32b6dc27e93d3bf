use std::collections::VecDeque;

use anyhow::Result;

use crate::surface::Surface;
use crate::types::Rect;

use super::{clip_to_context, Backend, Event, Fullscreen};

/// Headless backend. Events are scripted with [`MemoryBackend::push_event`];
/// every presentation request is recorded.
#[derive(Debug)]
pub struct MemoryBackend {
    context: Surface,
    events: VecDeque<Event>,
    caption: Option<String>,
    fullscreen: bool,
    pub flips: usize,
    pub updates: Vec<Rect>,
}

impl MemoryBackend {
    pub fn new(width: u32, height: u32) -> Self {
        MemoryBackend {
            context: Surface::new(width, height),
            events: VecDeque::new(),
            caption: None,
            fullscreen: false,
            flips: 0,
            updates: Vec::new(),
        }
    }

    pub fn push_event(&mut self, event: Event) {
        self.events.push_back(event);
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }
}

impl Backend for MemoryBackend {
    fn name(&self) -> &str {
        "memory"
    }

    fn context(&self) -> &Surface {
        &self.context
    }

    fn context_mut(&mut self) -> &mut Surface {
        &mut self.context
    }

    fn flip(&mut self) -> Result<()> {
        self.flips += 1;
        Ok(())
    }

    fn update_rect(&mut self, rect: Rect) -> Result<()> {
        if let Some(rect) = clip_to_context(&self.context, rect) {
            self.updates.push(rect);
        }
        Ok(())
    }

    fn poll_event(&mut self) -> Result<Option<Event>> {
        Ok(self.events.pop_front())
    }

    fn set_caption(&mut self, caption: &str) -> bool {
        self.caption = Some(caption.to_string());
        true
    }

    fn resize(&mut self, width: u32, height: u32) -> bool {
        self.context = self.context.resized(width, height);
        true
    }

    fn fullscreen(&mut self, mode: Fullscreen) -> bool {
        self.fullscreen = match mode {
            Fullscreen::Off => false,
            Fullscreen::On => true,
            Fullscreen::Toggle => !self.fullscreen,
        };
        true
    }
}
