use crate::r#match::engine::config::PitchConfig;
use crate::r#match::engine::player::TeamSide;
use nalgebra::Vector3;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GoalSide {
    Left,
    Right,
}

impl GoalSide {
    /// The team credited when the ball enters this goal.
    pub fn scoring_team(&self) -> TeamSide {
        match self {
            GoalSide::Left => TeamSide::Blue,
            GoalSide::Right => TeamSide::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalMouth {
    pub side: GoalSide,
    pub line_x: f32,
    pub top_post: Vector3<f32>,
    pub bottom_post: Vector3<f32>,
}

impl GoalMouth {
    pub fn center(&self) -> Vector3<f32> {
        (self.top_post + self.bottom_post) * 0.5
    }

    pub fn posts(&self) -> [Vector3<f32>; 2] {
        [self.top_post, self.bottom_post]
    }

    pub fn contains_y(&self, y: f32) -> bool {
        y > self.top_post.y && y < self.bottom_post.y
    }
}

/// Rectangular playing area with a goal in the middle of each end line.
#[derive(Debug, Clone, PartialEq)]
pub struct Pitch {
    pub width: f32,
    pub height: f32,
    pub goal_width: f32,
    pub goal_depth: f32,
    pub post_radius: f32,
    pub crossbar_height: f32,
    pub boundary_epsilon: f32,
}

impl Pitch {
    pub fn new(config: &PitchConfig) -> Self {
        Pitch {
            width: config.width,
            height: config.height,
            goal_width: config.goal_width,
            goal_depth: config.goal_depth,
            post_radius: config.post_radius,
            crossbar_height: config.crossbar_height,
            boundary_epsilon: config.boundary_epsilon,
        }
    }

    pub fn center(&self) -> Vector3<f32> {
        Vector3::new(self.width / 2.0, self.height / 2.0, 0.0)
    }

    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    pub fn goal(&self, side: GoalSide) -> GoalMouth {
        let line_x = match side {
            GoalSide::Left => 0.0,
            GoalSide::Right => self.width,
        };
        let half = self.goal_width / 2.0;
        let center_y = self.height / 2.0;

        GoalMouth {
            side,
            line_x,
            top_post: Vector3::new(line_x, center_y - half, 0.0),
            bottom_post: Vector3::new(line_x, center_y + half, 0.0),
        }
    }

    pub fn own_goal(&self, team: TeamSide) -> GoalMouth {
        match team {
            TeamSide::Red => self.goal(GoalSide::Left),
            TeamSide::Blue => self.goal(GoalSide::Right),
        }
    }

    pub fn opponent_goal(&self, team: TeamSide) -> GoalMouth {
        self.own_goal(team.opponent())
    }

    /// True when a ball at `position` passes under the crossbar between the posts.
    pub fn is_in_goal_mouth(&self, position: &Vector3<f32>) -> bool {
        let mouth = self.goal(GoalSide::Left);
        mouth.contains_y(position.y) && position.z <= self.crossbar_height
    }

    /// Which goal the ball has entered, once it is fully behind a goal line.
    pub fn goal_crossed(&self, position: &Vector3<f32>, radius: f32) -> Option<GoalSide> {
        if !self.is_in_goal_mouth(position) {
            return None;
        }

        if position.x + radius < 0.0 {
            Some(GoalSide::Left)
        } else if position.x - radius > self.width {
            Some(GoalSide::Right)
        } else {
            None
        }
    }

    pub fn contains(&self, position: &Vector3<f32>, epsilon: f32) -> bool {
        let depth = self.goal_depth + epsilon;
        let in_field = position.x >= -epsilon
            && position.x <= self.width + epsilon
            && position.y >= -epsilon
            && position.y <= self.height + epsilon;

        let in_net = self.is_in_goal_mouth(position)
            && position.x >= -depth
            && position.x <= self.width + depth;

        in_field || in_net
    }

    pub fn clamp_inside(&self, position: &Vector3<f32>, radius: f32) -> Vector3<f32> {
        let x = if position.x.is_finite() { position.x } else { self.width / 2.0 };
        let y = if position.y.is_finite() { position.y } else { self.height / 2.0 };

        Vector3::new(
            x.clamp(radius, self.width - radius),
            y.clamp(radius, self.height - radius),
            0.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pitch() -> Pitch {
        Pitch::new(&PitchConfig::default())
    }

    #[test]
    fn test_goal_mouth_is_centered() {
        let pitch = pitch();
        let goal = pitch.goal(GoalSide::Right);

        assert_eq!(goal.line_x, 1200.0);
        assert_eq!(goal.top_post.y, 265.0);
        assert_eq!(goal.bottom_post.y, 385.0);
        assert_eq!(goal.center(), Vector3::new(1200.0, 325.0, 0.0));
    }

    #[test]
    fn test_goal_requires_full_crossing() {
        let pitch = pitch();

        assert_eq!(pitch.goal_crossed(&Vector3::new(-5.0, 325.0, 0.0), 8.0), None);
        assert_eq!(
            pitch.goal_crossed(&Vector3::new(-9.0, 325.0, 0.0), 8.0),
            Some(GoalSide::Left)
        );
        assert_eq!(
            pitch.goal_crossed(&Vector3::new(1209.0, 325.0, 0.0), 8.0),
            Some(GoalSide::Right)
        );
    }

    #[test]
    fn test_goal_outside_posts_or_over_bar() {
        let pitch = pitch();

        assert_eq!(pitch.goal_crossed(&Vector3::new(-20.0, 100.0, 0.0), 8.0), None);
        assert_eq!(pitch.goal_crossed(&Vector3::new(-20.0, 325.0, 80.0), 8.0), None);
    }

    #[test]
    fn test_scoring_team_by_goal() {
        assert_eq!(GoalSide::Left.scoring_team(), TeamSide::Blue);
        assert_eq!(GoalSide::Right.scoring_team(), TeamSide::Red);
        assert_eq!(pitch().opponent_goal(TeamSide::Red).side, GoalSide::Right);
    }

    #[test]
    fn test_clamp_inside_recovers_nan() {
        let clamped = pitch().clamp_inside(&Vector3::new(f32::NAN, -50.0, 0.0), 15.0);
        assert_eq!(clamped, Vector3::new(600.0, 15.0, 0.0));
    }
}
