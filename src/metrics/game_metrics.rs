use std::time::{Duration, Instant};

/// Counters for one run of the frame loop, across restarts
#[derive(Debug)]
pub struct GameMetrics {
    game_started: Instant,
    /// Duration of the most recently finished game
    pub last_game_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    pub foods_eaten: u32,
    pub frames: u64,
    /// Frames in which a hand steered the snake
    pub tracked_frames: u64,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            game_started: Instant::now(),
            last_game_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            foods_eaten: 0,
            frames: 0,
            tracked_frames: 0,
        }
    }

    pub fn on_frame(&mut self, hand_visible: bool) {
        self.frames += 1;
        self.tracked_frames += u64::from(hand_visible);
    }

    pub fn on_food(&mut self) {
        self.foods_eaten += 1;
    }

    pub fn on_restart(&mut self) {
        self.game_started = Instant::now();
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.last_game_time = self.game_started.elapsed();
        self.games_played += 1;
        self.high_score = self.high_score.max(final_score);
    }

    /// Time spent in the current game so far
    pub fn game_time(&self) -> Duration {
        self.game_started.elapsed()
    }

    /// Share of frames with a visible hand, in percent
    pub fn tracking_rate(&self) -> f64 {
        if self.frames == 0 {
            return 0.0;
        }
        self.tracked_frames as f64 * 100.0 / self.frames as f64
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// `mm:ss`, minutes unbounded
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(125)), "02:05");
        assert_eq!(format_duration(Duration::ZERO), "00:00");
        assert_eq!(format_duration(Duration::from_millis(3_661_900)), "61:01");
    }

    #[test]
    fn test_game_over_keeps_best_score() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(10);
        metrics.on_game_over(5);

        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.games_played, 2);
    }

    #[test]
    fn test_tracking_rate() {
        let mut metrics = GameMetrics::new();
        assert_eq!(metrics.tracking_rate(), 0.0);

        for visible in [true, false, true, true] {
            metrics.on_frame(visible);
        }
        assert_eq!(metrics.frames, 4);
        assert_eq!(metrics.tracked_frames, 3);
        assert_eq!(metrics.tracking_rate(), 75.0);
    }

    #[test]
    fn test_restart_resets_game_clock() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(50));
        metrics.on_game_over(0);
        assert!(metrics.last_game_time >= Duration::from_millis(50));

        metrics.on_restart();
        assert!(metrics.game_time() < Duration::from_millis(50));
    }
}
