use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::KeyEvent;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::input::{InputHandler, KeyAction};
use crate::metrics::{format_duration, GameMetrics};
use crate::session::SnakeGame;
use crate::video::{Display, FrameSource};
use crate::vision::{steering_fingertip, HandDetector};

/// The frame loop and everything it touches
///
/// Frames are read, tracked, drawn and shown one at a time on the calling
/// thread. Collaborators are dropped with the mode, which releases the
/// camera, window and detector process.
pub struct PlayMode<S, H, D> {
    source: S,
    detector: H,
    display: D,
    config: AppConfig,
    seed: Option<u64>,
    game: SnakeGame,
    metrics: GameMetrics,
    input_handler: InputHandler,
    should_quit: bool,
}

impl<S, H, D> PlayMode<S, H, D>
where
    S: FrameSource,
    H: HandDetector,
    D: Display,
{
    /// Load the first game; fails before any frame is read if the food asset is unusable
    pub fn new(config: AppConfig, seed: Option<u64>, source: S, detector: H, display: D) -> Result<Self> {
        let game = SnakeGame::load(&config.food_asset, config.game.clone(), seed)?;

        Ok(Self {
            source,
            detector,
            display,
            config,
            seed,
            game,
            metrics: GameMetrics::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
    }

    /// Run until the source runs dry or quit is pressed
    pub fn run(&mut self) -> Result<()> {
        info!(food = ?self.config.food_asset, "Game started");

        while !self.should_quit {
            if !self.run_frame()? {
                info!("Frame source exhausted");
                break;
            }
        }

        info!(
            games_played = self.metrics.games_played,
            high_score = self.metrics.high_score.max(self.game.state().score),
            foods_eaten = self.metrics.foods_eaten,
            frames = self.metrics.frames,
            tracking_rate = %format!("{:.1}%", self.metrics.tracking_rate()),
            "Session finished"
        );
        Ok(())
    }

    /// Process one frame; `false` once there are no frames left
    pub fn run_frame(&mut self) -> Result<bool> {
        let Some(mut frame) = self.source.next_frame().context("Failed to read frame")? else {
            return Ok(false);
        };

        let hands = self.detector.detect(&frame).context("Hand detection failed")?;
        self.game
            .draw_hands(&mut frame, &hands)
            .context("Failed to draw hands")?;
        let tip = steering_fingertip(&hands);
        self.metrics.on_frame(tip.is_some());

        // No hand means no update at all: the head stays where it was last seen
        if let Some(tip) = tip {
            let was_over = self.game.is_game_over();
            let result = self
                .game
                .update(&mut frame, tip)
                .context("Failed to draw game")?;

            if result.info.ate_food {
                self.metrics.on_food();
                debug!(score = self.game.state().score, "Food eaten");
            }
            if result.terminated && !was_over {
                self.metrics.on_game_over(self.game.state().score);
                info!(
                    score = self.game.state().score,
                    time = %format_duration(self.metrics.last_game_time),
                    "Game over"
                );
            }
        }

        self.display.present(&frame).context("Failed to show frame")?;

        let timeout = Duration::from_millis(self.config.key_timeout_ms);
        if let Some(key) = self.display.wait_key(timeout)? {
            self.handle_key(key)?;
        }

        Ok(true)
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.input_handler.handle_key_event(key) {
            KeyAction::Restart => self.reset_game()?,
            KeyAction::Quit => {
                info!("Quit requested");
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
        Ok(())
    }

    /// Replace the game with a freshly loaded one
    fn reset_game(&mut self) -> Result<()> {
        self.game = SnakeGame::load(&self.config.food_asset, self.config.game.clone(), self.seed)?;
        self.metrics.on_restart();
        info!("Game restarted");
        Ok(())
    }

    pub fn game(&self) -> &SnakeGame {
        &self.game
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
