//! Terminal rendering of the game state

pub mod renderer;

pub use renderer::Renderer;
