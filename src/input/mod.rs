pub mod handler;
pub mod terminal;

pub use handler::{char_key, InputHandler, KeyAction};
pub use terminal::TerminalKeys;
