use super::{
    config::GameConfig,
    geometry::{signed_distance, Point},
    state::{Food, GamePhase, GameState},
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

/// Fewer contour points than this can never register a self-collision
pub const MIN_CONTOUR_POINTS: usize = 3;

/// Information about a step
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepInfo {
    /// Whether the head entered the food this step
    pub ate_food: bool,
    /// Whether the head touched the body this step
    pub collided: bool,
    /// Number of oldest points trimmed to respect the cap
    pub trimmed: usize,
    /// Length of the segment added this step
    pub segment: f64,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has ended (this step or earlier)
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine that advances snake state from fingertip positions
pub struct GameEngine {
    config: GameConfig,
    food_size: (u32, u32),
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine for food sprites of the given size
    pub fn new(config: GameConfig, food_size: (u32, u32)) -> Self {
        Self {
            config,
            food_size,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine with reproducible food placement
    pub fn with_seed(config: GameConfig, food_size: (u32, u32), seed: u64) -> Self {
        Self {
            config,
            food_size,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build a fresh game state
    pub fn reset(&mut self) -> GameState {
        let (width, height) = self.food_size;
        let food = Food::new(self.random_food_position(), width, height);
        GameState::new(food, self.config.initial_allowed_length)
    }

    /// Move the food to a random position within the configured bounds
    pub fn randomize_food(&mut self, state: &mut GameState) {
        state.food.position = self.random_food_position();
    }

    fn random_food_position(&mut self) -> Point {
        let (x_min, x_max) = self.config.food_x;
        let (y_min, y_max) = self.config.food_y;
        Point::new(
            self.rng.gen_range(x_min..=x_max),
            self.rng.gen_range(y_min..=y_max),
        )
    }

    /// Advance the snake to the tracked fingertip
    ///
    /// Callers skip this entirely on frames without a hand so the previous
    /// head stays where it was last seen.
    pub fn step(&mut self, state: &mut GameState, tip: Point) -> StepResult {
        if state.is_game_over() {
            return StepResult {
                terminated: true,
                info: StepInfo::default(),
            };
        }

        state.food.eaten_at = None;
        let segment = state.path.push(tip);
        let trimmed = self.trim(state);

        let collided = self.check_self_collision(state, tip);
        if collided {
            state.phase = GamePhase::GameOver;
        }

        // Food is still collected on the frame the snake hits itself
        let ate_food = state.food.contains(tip);
        if ate_food {
            state.food.eaten_at = Some(state.food.position);
            self.randomize_food(state);
            state.score += 1;
            state.allowed_length += self.config.growth_per_food;
            debug!(
                score = state.score,
                allowed_length = state.allowed_length,
                "food collected"
            );
        }

        StepResult {
            terminated: collided,
            info: StepInfo {
                ate_food,
                collided,
                trimmed,
                segment,
            },
        }
    }

    /// Drop oldest points until the snake fits under the cap
    fn trim(&self, state: &mut GameState) -> usize {
        let mut trimmed = 0;
        while state.is_over_cap() && state.path.pop_oldest().is_some() {
            trimmed += 1;
        }
        if trimmed > 0 {
            debug!(trimmed, length = state.path.current_length(), "trimmed tail");
        }
        trimmed
    }

    /// Check whether the head lies on the body, excluding the newest points
    fn check_self_collision(&self, state: &GameState, head: Point) -> bool {
        let contour = state.path.body_contour(self.config.head_exclusion);
        if contour.len() < MIN_CONTOUR_POINTS {
            return false;
        }

        signed_distance(&contour, head, self.config.contour)
            .is_some_and(|d| d.abs() <= self.config.collision_tolerance)
    }
}
