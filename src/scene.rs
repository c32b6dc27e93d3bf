//! Scene — the fixed background every sprite restores from.

use std::path::Path;

use crate::backend::Backend;
use crate::loader::{self, LoadError};
use crate::sprite::Sprite;
use crate::surface::Surface;
use crate::types::{Point, Velocity};

pub struct Scene {
    background: Surface,
}

impl Scene {
    pub fn new(background: Surface) -> Self {
        Scene { background }
    }

    pub fn load(path: impl AsRef<Path>, scale: f32) -> Result<Self, LoadError> {
        loader::load_scaled(path, scale).map(Scene::new)
    }

    pub fn background(&self) -> &Surface {
        &self.background
    }

    pub fn width(&self) -> u32 {
        self.background.width()
    }

    pub fn height(&self) -> u32 {
        self.background.height()
    }

    /// Blit the whole background onto the backend context.
    pub fn paint<B: Backend + ?Sized>(&self, backend: &mut B) {
        self.background
            .blit(self.background.bounds(), backend.context_mut(), 0, 0);
    }

    /// A sprite starting at the centre of the background.
    pub fn spawn(&self, image: Surface, velocity: Velocity) -> Sprite<'_> {
        let center = Point::new(self.width() as i32 / 2, self.height() as i32 / 2);
        Sprite::new(image, &self.background, center, velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::types::Rgb;

    #[test]
    fn paint_covers_context() {
        let scene = Scene::new(Surface::filled(30, 20, Rgb::new(0, 80, 0)));
        let mut backend = MemoryBackend::new(30, 20);
        scene.paint(&mut backend);
        assert_eq!(backend.context(), scene.background());
    }

    #[test]
    fn spawn_at_centre() {
        let scene = Scene::new(Surface::new(101, 60));
        let sprite = scene.spawn(Surface::new(8, 8), Velocity::new(-2, 3));
        assert_eq!(sprite.position(), Point::new(50, 30));
        assert_eq!(sprite.velocity(), Velocity::new(-2, 3));
    }
}
