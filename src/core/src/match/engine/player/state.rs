use serde::Serialize;
use std::fmt::Display;
use std::fmt::Formatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TeamSide {
    Red,
    Blue,
}

impl TeamSide {
    pub const ALL: [TeamSide; 2] = [TeamSide::Red, TeamSide::Blue];

    pub fn opponent(&self) -> TeamSide {
        match self {
            TeamSide::Red => TeamSide::Blue,
            TeamSide::Blue => TeamSide::Red,
        }
    }

    /// +1 when attacking towards the right goal, -1 towards the left.
    pub fn attacking_direction(&self) -> f32 {
        match self {
            TeamSide::Red => 1.0,
            TeamSide::Blue => -1.0,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            TeamSide::Red => 0,
            TeamSide::Blue => 1,
        }
    }
}

impl Display for TeamSide {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            TeamSide::Red => write!(f, "Red"),
            TeamSide::Blue => write!(f, "Blue"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlayerRole {
    Goalkeeper,
    Defender,
    Midfielder,
    Striker,
}

impl PlayerRole {
    pub const ALL: [PlayerRole; 4] = [
        PlayerRole::Goalkeeper,
        PlayerRole::Defender,
        PlayerRole::Midfielder,
        PlayerRole::Striker,
    ];

    pub fn index(&self) -> usize {
        match self {
            PlayerRole::Goalkeeper => 0,
            PlayerRole::Defender => 1,
            PlayerRole::Midfielder => 2,
            PlayerRole::Striker => 3,
        }
    }

    /// Kickoff depth as a fraction of the team's own half, measured from its goal line.
    pub fn formation_depth(&self) -> f32 {
        match self {
            PlayerRole::Goalkeeper => 0.06,
            PlayerRole::Defender => 0.28,
            PlayerRole::Midfielder => 0.52,
            PlayerRole::Striker => 0.78,
        }
    }
}

impl Display for PlayerRole {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            PlayerRole::Goalkeeper => write!(f, "Goalkeeper"),
            PlayerRole::Defender => write!(f, "Defender"),
            PlayerRole::Midfielder => write!(f, "Midfielder"),
            PlayerRole::Striker => write!(f, "Striker"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlayerState {
    Idle,
    Moving,
    Charging,
    Tackling,
    Celebrating,
}

impl Display for PlayerState {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            PlayerState::Idle => write!(f, "Idle"),
            PlayerState::Moving => write!(f, "Moving"),
            PlayerState::Charging => write!(f, "Charging"),
            PlayerState::Tackling => write!(f, "Tackling"),
            PlayerState::Celebrating => write!(f, "Celebrating"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attacking_directions_oppose() {
        assert_eq!(TeamSide::Red.attacking_direction(), 1.0);
        assert_eq!(TeamSide::Blue.attacking_direction(), -1.0);
        assert_eq!(TeamSide::Red.opponent(), TeamSide::Blue);
    }

    #[test]
    fn test_role_indices_match_order() {
        for (index, role) in PlayerRole::ALL.iter().enumerate() {
            assert_eq!(role.index(), index);
        }
    }
}
