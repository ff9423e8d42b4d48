//! One game from start to game over
//!
//! A [`SnakeGame`] bundles the engine, its state and the food sprite.
//! Restarting means building a new one; nothing is reset in place.

use std::path::Path;

use image::RgbImage;

use crate::error::{AssetLoadError, RenderError};
use crate::game::{GameConfig, GameEngine, GameState, Point, StepResult};
use crate::render::{FoodSprite, Renderer};
use crate::vision::Hand;

pub struct SnakeGame {
    engine: GameEngine,
    state: GameState,
    sprite: FoodSprite,
    renderer: Renderer,
}

impl SnakeGame {
    /// Load the food asset and start a fresh game
    ///
    /// `seed` makes food placement reproducible.
    pub fn load(
        food_path: &Path,
        config: GameConfig,
        seed: Option<u64>,
    ) -> Result<Self, AssetLoadError> {
        let sprite = FoodSprite::load(food_path)?;
        Ok(Self::with_sprite(sprite, config, seed))
    }

    pub fn with_sprite(sprite: FoodSprite, config: GameConfig, seed: Option<u64>) -> Self {
        let mut engine = match seed {
            Some(seed) => GameEngine::with_seed(config, sprite.size(), seed),
            None => GameEngine::new(config, sprite.size()),
        };
        let state = engine.reset();
        Self {
            engine,
            state,
            sprite,
            renderer: Renderer::new(),
        }
    }

    /// Advance to the fingertip and draw the result over `frame`
    pub fn update(&mut self, frame: &mut RgbImage, tip: Point) -> Result<StepResult, RenderError> {
        let result = self.engine.step(&mut self.state, tip);
        self.renderer
            .render(frame, &self.state, self.engine.config(), &self.sprite)?;
        Ok(result)
    }

    /// Draw the tracked hands; done before [`update`](Self::update) so the game sits on top
    pub fn draw_hands(&self, frame: &mut RgbImage, hands: &[Hand]) -> Result<(), RenderError> {
        self.renderer.render_hands(frame, hands)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GamePhase;
    use image::{Rgb, Rgba, RgbaImage};

    fn sprite() -> FoodSprite {
        FoodSprite::from_image(RgbaImage::from_pixel(40, 40, Rgba([0, 255, 0, 255])))
    }

    #[test]
    fn test_nonexistent_asset() {
        let result = SnakeGame::load(Path::new("no/such/Donut.png"), GameConfig::default(), None);
        let err = result.err().expect("loading must fail");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Donut.png");
        RgbaImage::from_pixel(60, 40, Rgba([1, 2, 3, 200]))
            .save(&path)
            .unwrap();

        let game = SnakeGame::load(&path, GameConfig::default(), Some(1)).unwrap();
        assert_eq!((game.state().food.width, game.state().food.height), (60, 40));
        assert_eq!(game.state().allowed_length, 150.0);
    }

    #[test]
    fn test_first_update_on_food() {
        let mut game = SnakeGame::with_sprite(sprite(), GameConfig::default(), Some(3));
        let food = game.state().food.position;
        let mut frame = RgbImage::from_pixel(1280, 720, Rgb([0, 0, 0]));

        let result = game.update(&mut frame, food).unwrap();

        assert!(result.info.ate_food);
        assert_eq!(game.state().score, 1);
        assert_eq!(game.state().allowed_length, 200.0);
        // The head marker is drawn where the fingertip was
        assert_ne!(frame.get_pixel(food.x as u32, food.y as u32), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_restart_matches_fresh_game() {
        let mut game = SnakeGame::with_sprite(sprite(), GameConfig::default(), Some(5));
        game.state_mut().score = 7;
        game.state_mut().allowed_length = 500.0;
        game.state_mut().path.push(Point::new(10, 10));
        game.state_mut().phase = GamePhase::GameOver;

        game = SnakeGame::with_sprite(sprite(), GameConfig::default(), Some(5));
        let fresh = SnakeGame::with_sprite(sprite(), GameConfig::default(), Some(5));

        assert_eq!(game.state(), fresh.state());
        assert!(game.state().path.is_empty());
        assert_eq!(game.state().score, 0);
        assert_eq!(game.state().allowed_length, 150.0);
        assert!(!game.is_game_over());
    }

    #[test]
    fn test_game_over_frame_shows_overlay_only() {
        let mut game = SnakeGame::with_sprite(sprite(), GameConfig::default(), Some(9));
        game.state_mut().phase = GamePhase::GameOver;
        let before = game.state().clone();
        let mut frame = RgbImage::from_pixel(1280, 720, Rgb([0, 0, 0]));

        let result = game.update(&mut frame, Point::new(640, 360)).unwrap();

        assert!(result.terminated);
        assert_eq!(game.state(), &before);
        // Game over box sits left of the "Game Over" text
        assert_eq!(frame.get_pixel(390, 190), &Rgb([255, 0, 0]));
    }
}
