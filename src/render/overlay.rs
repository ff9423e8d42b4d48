//! Turns game state into a list of draw commands
//!
//! [`compose`] and [`compose_hands`] perform no I/O and touch no pixels, so
//! what a frame will show can be checked without a canvas.

use embedded_graphics::pixelcolor::Rgb888;

use crate::game::{GameConfig, GameState, Point};
use crate::vision::{landmarks, Hand};

pub const SNAKE_COLOR: Rgb888 = Rgb888::new(255, 0, 0);
pub const HEAD_COLOR: Rgb888 = Rgb888::new(200, 0, 200);
pub const BODY_OUTLINE_COLOR: Rgb888 = Rgb888::new(0, 200, 0);
pub const TEXT_COLOR: Rgb888 = Rgb888::new(255, 255, 255);
pub const HUD_BOX_COLOR: Rgb888 = Rgb888::new(255, 0, 255);
pub const GAME_OVER_BOX_COLOR: Rgb888 = Rgb888::new(255, 0, 0);

pub const SNAKE_THICKNESS: u32 = 20;
pub const HEAD_RADIUS: u32 = 20;
pub const OUTLINE_THICKNESS: u32 = 3;

pub const SKELETON_COLOR: Rgb888 = Rgb888::new(224, 224, 224);
pub const LANDMARK_COLOR: Rgb888 = Rgb888::new(255, 0, 0);
pub const HAND_BOX_COLOR: Rgb888 = Rgb888::new(255, 0, 255);
/// Space between the outermost landmarks and the hand box
pub const HAND_BOX_PADDING: i32 = 20;

/// Glyph size of a text box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextScale {
    Small,
    Medium,
    Large,
}

/// Text drawn over a filled rectangle padded by `offset` on every side
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub text: String,
    /// Left end of the text baseline
    pub origin: Point,
    pub scale: TextScale,
    pub offset: u32,
    pub text_color: Rgb888,
    pub box_color: Rgb888,
}

impl TextBox {
    fn hud(text: impl Into<String>, origin: Point, scale: TextScale, offset: u32) -> Self {
        Self {
            text: text.into(),
            origin,
            scale,
            offset,
            text_color: TEXT_COLOR,
            box_color: HUD_BOX_COLOR,
        }
    }

    fn game_over(text: impl Into<String>, origin: Point, scale: TextScale) -> Self {
        Self {
            text: text.into(),
            origin,
            scale,
            offset: 20,
            text_color: TEXT_COLOR,
            box_color: GAME_OVER_BOX_COLOR,
        }
    }
}

/// A single drawing step, applied in order
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        from: Point,
        to: Point,
        color: Rgb888,
        thickness: u32,
    },
    Polyline {
        points: Vec<Point>,
        color: Rgb888,
        thickness: u32,
    },
    FilledCircle {
        center: Point,
        radius: u32,
        color: Rgb888,
    },
    /// Outline of the rectangle spanned by two corners
    Rectangle {
        top_left: Point,
        bottom_right: Point,
        color: Rgb888,
        thickness: u32,
    },
    /// Food sprite with its top-left corner at the given point
    Food { top_left: Point },
    Text(TextBox),
    /// Bare text with its baseline starting at `origin`
    Label {
        text: String,
        origin: Point,
        scale: TextScale,
        color: Rgb888,
    },
}

/// Build the draw commands for the current state
pub fn compose(state: &GameState, config: &GameConfig) -> Vec<DrawCommand> {
    if state.is_game_over() {
        return game_over_screen(state.score);
    }

    let mut commands = Vec::new();
    let points = state.path.points();

    for (from, to) in points.iter().zip(points.iter().skip(1)) {
        commands.push(DrawCommand::Line {
            from: *from,
            to: *to,
            color: SNAKE_COLOR,
            thickness: SNAKE_THICKNESS,
        });
    }
    if let Some(head) = state.path.head() {
        commands.push(DrawCommand::FilledCircle {
            center: head,
            radius: HEAD_RADIUS,
            color: HEAD_COLOR,
        });
    }

    // The part of the body the head is tested against
    let contour = state.path.body_contour(config.head_exclusion);
    if !contour.is_empty() {
        commands.push(DrawCommand::Polyline {
            points: contour,
            color: BODY_OUTLINE_COLOR,
            thickness: OUTLINE_THICKNESS,
        });
    }

    commands.push(DrawCommand::Food {
        top_left: state.food.top_left(),
    });

    commands.push(DrawCommand::Text(TextBox::hud(
        format!("Score: {}", state.score),
        Point::new(50, 80),
        TextScale::Medium,
        10,
    )));
    commands.push(DrawCommand::Text(TextBox::hud(
        "Press 'Q' to Quit, 'R' to Restart",
        Point::new(50, 50),
        TextScale::Small,
        5,
    )));

    commands
}

/// Skeleton, landmarks, bounding box and handedness of every detected hand
pub fn compose_hands(hands: &[Hand]) -> Vec<DrawCommand> {
    let mut commands = Vec::new();
    for hand in hands {
        for (a, b) in landmarks::connections() {
            commands.push(DrawCommand::Line {
                from: hand.landmarks[a],
                to: hand.landmarks[b],
                color: SKELETON_COLOR,
                thickness: 2,
            });
        }
        for &center in &hand.landmarks {
            commands.push(DrawCommand::FilledCircle {
                center,
                radius: 2,
                color: LANDMARK_COLOR,
            });
        }

        let (min, max) = hand.bounds();
        commands.push(DrawCommand::Rectangle {
            top_left: min.moved_by(-HAND_BOX_PADDING, -HAND_BOX_PADDING),
            bottom_right: max.moved_by(HAND_BOX_PADDING, HAND_BOX_PADDING),
            color: HAND_BOX_COLOR,
            thickness: 2,
        });
        commands.push(DrawCommand::Label {
            text: hand.handedness.clone(),
            origin: min.moved_by(-30, -30),
            scale: TextScale::Medium,
            color: HAND_BOX_COLOR,
        });
    }
    commands
}

fn game_over_screen(score: u32) -> Vec<DrawCommand> {
    vec![
        DrawCommand::Text(TextBox::game_over(
            "Game Over",
            Point::new(400, 200),
            TextScale::Large,
        )),
        DrawCommand::Text(TextBox::game_over(
            format!("Your Score: {score}"),
            Point::new(400, 300),
            TextScale::Medium,
        )),
        DrawCommand::Text(TextBox::game_over(
            "Press 'R' to Restart",
            Point::new(400, 400),
            TextScale::Medium,
        )),
        DrawCommand::Text(TextBox::game_over(
            "Press 'Q' to Quit",
            Point::new(400, 500),
            TextScale::Medium,
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Food, GamePhase};

    fn state_with_path(points: &[(i32, i32)]) -> GameState {
        let mut state = GameState::new(Food::new(Point::new(500, 300), 40, 40), 150.0);
        for p in points {
            state.path.push((*p).into());
        }
        state
    }

    fn texts(commands: &[DrawCommand]) -> Vec<&str> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text(t) => Some(t.text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_empty_path_draws_food_and_hud() {
        let state = state_with_path(&[]);
        let commands = compose(&state, &GameConfig::default());

        assert_eq!(
            commands[0],
            DrawCommand::Food {
                top_left: Point::new(480, 280)
            }
        );
        assert_eq!(
            texts(&commands),
            vec!["Score: 0", "Press 'Q' to Quit, 'R' to Restart"]
        );
    }

    #[test]
    fn test_path_draws_segments_head_and_outline() {
        let state = state_with_path(&[(100, 100), (110, 100), (120, 100), (130, 100)]);
        let commands = compose(&state, &GameConfig::default());

        let lines = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count();
        assert_eq!(lines, 3);
        assert!(commands.contains(&DrawCommand::FilledCircle {
            center: Point::new(130, 100),
            radius: HEAD_RADIUS,
            color: HEAD_COLOR,
        }));
        assert!(commands.contains(&DrawCommand::Polyline {
            points: vec![Point::new(100, 100), Point::new(110, 100)],
            color: BODY_OUTLINE_COLOR,
            thickness: OUTLINE_THICKNESS,
        }));
    }

    #[test]
    fn test_game_over_screen() {
        let mut state = state_with_path(&[(100, 100), (200, 100)]);
        state.score = 4;
        state.phase = GamePhase::GameOver;

        let commands = compose(&state, &GameConfig::default());

        assert_eq!(
            texts(&commands),
            vec![
                "Game Over",
                "Your Score: 4",
                "Press 'R' to Restart",
                "Press 'Q' to Quit"
            ]
        );
        assert!(!commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Line { .. } | DrawCommand::Food { .. })));
    }

    #[test]
    fn test_hand_overlay() {
        let mut hand = Hand::from_fingertip(Point::new(300, 200));
        hand.landmarks[landmarks::WRIST] = Point::new(320, 400);
        hand.handedness = "Left".to_string();

        let commands = compose_hands(&[hand]);

        let lines = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { color, .. } if *color == SKELETON_COLOR))
            .count();
        let dots = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FilledCircle { .. }))
            .count();
        assert_eq!(lines, 21);
        assert_eq!(dots, 21);
        assert!(commands.contains(&DrawCommand::Rectangle {
            top_left: Point::new(280, 180),
            bottom_right: Point::new(340, 420),
            color: HAND_BOX_COLOR,
            thickness: 2,
        }));
        assert!(commands.contains(&DrawCommand::Label {
            text: "Left".to_string(),
            origin: Point::new(270, 170),
            scale: TextScale::Medium,
            color: HAND_BOX_COLOR,
        }));
        assert!(compose_hands(&[]).is_empty());
    }

    #[test]
    fn test_eaten_food_drawn_where_it_was() {
        let mut state = state_with_path(&[(500, 300)]);
        state.food.eaten_at = Some(Point::new(500, 300));
        state.food.position = Point::new(900, 150);

        let commands = compose(&state, &GameConfig::default());

        assert!(commands.contains(&DrawCommand::Food {
            top_left: Point::new(480, 280)
        }));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let state = state_with_path(&[(300, 300), (320, 310), (350, 330)]);
        let config = GameConfig::default();
        assert_eq!(compose(&state, &config), compose(&state, &config));
    }
}
