//! Sprite — an image bouncing around inside the scene background.

use anyhow::Result;

use crate::backend::Backend;
use crate::surface::Surface;
use crate::types::{Point, Rect, Velocity};

pub struct Sprite<'a> {
    image: Surface,
    background: &'a Surface,
    position: Point,
    velocity: Velocity,
}

impl<'a> Sprite<'a> {
    pub fn new(image: Surface, background: &'a Surface, position: Point, velocity: Velocity) -> Self {
        Sprite {
            image,
            background,
            position,
            velocity,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn image(&self) -> &Surface {
        &self.image
    }

    /// Footprint of the sprite at `at`.
    pub fn footprint(&self, at: Point) -> Rect {
        Rect::from_xywh(at.x, at.y, self.image.width(), self.image.height())
    }

    /// Blit the whole image at the current position.
    pub fn draw<B: Backend + ?Sized>(&self, backend: &mut B) {
        self.image.blit(
            self.image.bounds(),
            backend.context_mut(),
            self.position.x,
            self.position.y,
        );
    }

    /// One animation step: erase, move, bounce, draw, submit damage.
    ///
    /// Returns the damage rectangle handed to the backend.
    pub fn advance<B: Backend + ?Sized>(&mut self, backend: &mut B) -> Result<Rect> {
        let old = self.position;

        // Restore what was under the previous frame.
        self.background
            .blit(self.footprint(old), backend.context_mut(), old.x, old.y);

        self.position.x += self.velocity.dx;
        self.position.y += self.velocity.dy;

        let max_x = self.background.width() as i32 - self.image.width() as i32;
        let max_y = self.background.height() as i32 - self.image.height() as i32;
        self.velocity.dx = reflect(self.position.x, self.velocity.dx, max_x);
        self.velocity.dy = reflect(self.position.y, self.velocity.dy, max_y);

        self.draw(backend);

        let damage = damage_rect(old, self.position, self.image.width(), self.image.height());
        backend.update_rect(damage)?;
        Ok(damage)
    }
}

/// Flip the velocity component once the coordinate touches or passes either
/// edge of `0..=max`.
///
/// There is no correction of the position itself, so a fast sprite can sit
/// up to `|v| - 1` pixels past the edge for one frame.
pub fn reflect(pos: i32, v: i32, max: i32) -> i32 {
    if pos <= 0 || pos >= max { -v } else { v }
}

/// Bounding box of the footprints at `old` and `new`.
pub fn damage_rect(old: Point, new: Point, w: u32, h: u32) -> Rect {
    Rect {
        x0: old.x.min(new.x),
        y0: old.y.min(new.y),
        x1: old.x.max(new.x) + w as i32 - 1,
        y1: old.y.max(new.y) + h as i32 - 1,
    }
}
