use std::collections::VecDeque;

use super::geometry::Point;

/// The trail followed by the fingertip, oldest point first
///
/// `lengths[i]` is the distance between `points[i]` and `points[i + 1]`, so a
/// non-empty path always holds one more point than it has lengths.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SnakePath {
    points: VecDeque<Point>,
    lengths: VecDeque<f64>,
    current_length: f64,
    previous_head: Option<Point>,
}

impl SnakePath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tracked point, returning the length of the new segment
    pub fn push(&mut self, point: Point) -> f64 {
        let segment = match self.previous_head {
            Some(prev) => {
                let d = prev.distance(point);
                self.lengths.push_back(d);
                self.current_length += d;
                d
            }
            None => 0.0,
        };
        self.points.push_back(point);
        self.previous_head = Some(point);
        segment
    }

    /// Drop the oldest point and the segment leaving it
    ///
    /// Refuses to remove the head, so a path never empties once started.
    pub fn pop_oldest(&mut self) -> Option<Point> {
        let length = self.lengths.pop_front()?;
        self.current_length -= length;
        if self.lengths.is_empty() {
            // Clear accumulated float error once only the head remains
            self.current_length = 0.0;
        }
        self.points.pop_front()
    }

    pub fn head(&self) -> Option<Point> {
        self.points.back().copied()
    }

    pub fn current_length(&self) -> f64 {
        self.current_length
    }

    pub fn points(&self) -> &VecDeque<Point> {
        &self.points
    }

    pub fn lengths(&self) -> &VecDeque<f64> {
        &self.lengths
    }

    /// Points that the head can collide with, leaving out the newest `skip`
    pub fn body_contour(&self, skip: usize) -> Vec<Point> {
        let keep = self.points.len().saturating_sub(skip);
        self.points.iter().take(keep).copied().collect()
    }

    /// Get the number of points in the path
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Food placed on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    /// Centre of the sprite
    pub position: Point,
    pub width: u32,
    pub height: u32,
    /// Where the food sat when it was eaten this frame
    pub eaten_at: Option<Point>,
}

impl Food {
    pub fn new(position: Point, width: u32, height: u32) -> Self {
        Self {
            position,
            width,
            height,
            eaten_at: None,
        }
    }

    /// Whether `p` lies strictly inside the sprite's bounding box
    pub fn contains(&self, p: Point) -> bool {
        let half_w = (self.width / 2) as i32;
        let half_h = (self.height / 2) as i32;
        self.position.x - half_w < p.x
            && p.x < self.position.x + half_w
            && self.position.y - half_h < p.y
            && p.y < self.position.y + half_h
    }

    /// Top-left corner where the sprite is drawn this frame
    ///
    /// On the frame food is eaten the sprite stays where it was; it shows at
    /// the new position from the next frame on.
    pub fn top_left(&self) -> Point {
        self.eaten_at
            .unwrap_or(self.position)
            .moved_by(-((self.width / 2) as i32), -((self.height / 2) as i32))
    }
}

/// Whether the snake is still moving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    /// The head touched the body; only a restart leaves this phase
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub path: SnakePath,
    pub allowed_length: f64,
    pub food: Food,
    pub score: u32,
    pub phase: GamePhase,
}

impl GameState {
    /// Create a new game state
    pub fn new(food: Food, allowed_length: f64) -> Self {
        Self {
            path: SnakePath::new(),
            allowed_length,
            food,
            score: 0,
            phase: GamePhase::Playing,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn is_over_cap(&self) -> bool {
        self.path.current_length() > self.allowed_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_point_has_no_segment() {
        let mut path = SnakePath::new();
        assert_eq!(path.push(Point::new(10, 10)), 0.0);
        assert_eq!(path.len(), 1);
        assert!(path.lengths().is_empty());
        assert_eq!(path.current_length(), 0.0);
    }

    #[test]
    fn test_push_tracks_lengths() {
        let mut path = SnakePath::new();
        path.push(Point::new(0, 0));
        path.push(Point::new(3, 4));
        path.push(Point::new(3, 14));

        assert_eq!(path.len(), 3);
        assert_eq!(path.lengths().len(), 2);
        assert_relative_eq!(path.current_length(), 15.0);
        assert_eq!(path.head(), Some(Point::new(3, 14)));
    }

    #[test]
    fn test_pop_oldest_keeps_head() {
        let mut path = SnakePath::new();
        path.push(Point::new(0, 0));
        path.push(Point::new(0, 10));

        assert_eq!(path.pop_oldest(), Some(Point::new(0, 0)));
        assert_eq!(path.current_length(), 0.0);
        assert_eq!(path.pop_oldest(), None);
        assert_eq!(path.head(), Some(Point::new(0, 10)));
    }

    #[test]
    fn test_body_contour_skips_newest() {
        let mut path = SnakePath::new();
        for x in 0..5 {
            path.push(Point::new(x * 10, 0));
        }
        let contour = path.body_contour(2);
        assert_eq!(contour, vec![Point::new(0, 0), Point::new(10, 0), Point::new(20, 0)]);
        assert!(path.body_contour(10).is_empty());
    }

    #[test]
    fn test_food_bounds_are_strict() {
        let food = Food::new(Point::new(500, 300), 50, 40);
        assert!(food.contains(Point::new(500, 300)));
        assert!(food.contains(Point::new(524, 319)));
        assert!(!food.contains(Point::new(525, 300)));
        assert!(!food.contains(Point::new(475, 300)));
        assert!(!food.contains(Point::new(500, 280)));
        assert_eq!(food.top_left(), Point::new(475, 280));
    }

    #[test]
    fn test_eaten_food_drawn_at_old_place() {
        let mut food = Food::new(Point::new(800, 500), 50, 40);
        food.eaten_at = Some(Point::new(500, 300));
        assert_eq!(food.top_left(), Point::new(475, 280));
        assert!(food.contains(Point::new(800, 500)));
    }
}
