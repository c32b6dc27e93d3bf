use std::process;

use anyhow::{Context, Result};

use spriteblit::{
    backend::{Backend, TerminalBackend},
    cli::{self, USAGE},
    config::Config,
    loader,
    player::Player,
    scene::Scene,
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let Some(path) = cli::background_arg(std::env::args().skip(1)) else {
        eprintln!("Takes an image as an argument\n\nUsage:\n  {USAGE}");
        process::exit(1);
    };

    if let Err(e) = run(&path) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(path: &str) -> Result<()> {
    let config = Config::load();

    let scale = if config.fit_to_terminal {
        let size = loader::dimensions(path)?;
        TerminalBackend::fit_scale(size, TerminalBackend::terminal_size()?)
    } else {
        1.0
    };
    if scale < 1.0 {
        log::info!("scaling images by {scale:.3} to fit the terminal");
    }

    let scene = Scene::load(path, scale)?;
    let mut sprites = Vec::with_capacity(config.sprites.len());
    for sprite in &config.sprites {
        let image = loader::load_scaled(&sprite.path, scale)
            .with_context(|| format!("Failed to load sprite {}", sprite.path.display()))?;
        sprites.push(scene.spawn(image, sprite.velocity()));
    }

    let backend = TerminalBackend::init(scene.width(), scene.height(), path)?;
    log::info!("{} backend ready", backend.name());

    let mut player = Player::new(backend, &scene, sprites, &config);
    player.play()
}
