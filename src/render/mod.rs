//! Drawing the game onto camera frames

pub mod overlay;
pub mod renderer;
pub mod sprite;

pub use overlay::{compose, compose_hands, DrawCommand, TextBox, TextScale};
pub use renderer::Renderer;
pub use sprite::FoodSprite;
