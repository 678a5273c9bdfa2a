pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod harmony;
pub mod interaction;
pub mod scene;
