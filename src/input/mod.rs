pub mod handler;
pub mod pad;

pub use handler::{InputHandler, KeyAction};
pub use pad::{ControlPad, PadButton};
