//! HIRO Snake - a terminal Snake game
//!
//! This library provides:
//! - Core game logic (game module)
//! - TUI rendering (render module)
//! - Keyboard and clickable control pad input (input module)
//! - Session bookkeeping (metrics module)
//! - The interactive session driver (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
