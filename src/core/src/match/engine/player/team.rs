use crate::r#match::engine::player::state::{PlayerRole, TeamSide};

#[derive(Debug, Clone, PartialEq)]
pub struct MatchTeam {
    pub side: TeamSide,
    /// Player ids indexed by role.
    pub players: [u32; 4],
    pub selected: Option<u32>,
}

impl MatchTeam {
    pub fn new(side: TeamSide, first_id: u32) -> Self {
        MatchTeam {
            side,
            players: [first_id, first_id + 1, first_id + 2, first_id + 3],
            selected: None,
        }
    }

    pub fn player_id(&self, role: PlayerRole) -> u32 {
        self.players[role.index()]
    }

    pub fn contains(&self, player_id: u32) -> bool {
        self.players.contains(&player_id)
    }

    pub fn attacking_direction(&self) -> f32 {
        self.side.attacking_direction()
    }
}
