pub mod backend;
pub mod cli;
pub mod config;
pub mod loader;
pub mod player;
pub mod scene;
pub mod sprite;
pub mod surface;
pub mod types;
