use crate::r#match::engine::ball::Ball;
use crate::r#match::engine::config::MatchConfig;
use crate::r#match::engine::pitch::Pitch;
use crate::r#match::engine::player::{MatchPlayer, MatchTeam, PlayerRole, TeamSide};
use itertools::Itertools;
use nalgebra::Vector3;

pub struct MatchField {
    pub pitch: Pitch,
    pub ball: Ball,
    /// Sorted by id.
    pub players: Vec<MatchPlayer>,
    pub teams: [MatchTeam; 2],
}

impl MatchField {
    pub fn new(config: &MatchConfig) -> Self {
        let pitch = Pitch::new(&config.pitch);
        let teams = [MatchTeam::new(TeamSide::Red, 1), MatchTeam::new(TeamSide::Blue, 5)];

        let players = teams
            .iter()
            .flat_map(|team| {
                PlayerRole::ALL.iter().map(|role| {
                    MatchPlayer::new(
                        team.player_id(*role),
                        team.side,
                        *role,
                        kickoff_position(&pitch, team.side, *role),
                    )
                })
            })
            .sorted_by_key(|player| player.id)
            .collect();

        let mut field = MatchField {
            ball: Ball::with_coord(pitch.width, pitch.height, config.ball.radius),
            pitch,
            players,
            teams,
        };

        field.select_nearest_to_ball();
        field
    }

    pub fn player(&self, player_id: u32) -> Option<&MatchPlayer> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn player_mut(&mut self, player_id: u32) -> Option<&mut MatchPlayer> {
        self.players.iter_mut().find(|p| p.id == player_id)
    }

    pub fn team(&self, side: TeamSide) -> &MatchTeam {
        &self.teams[side.index()]
    }

    pub fn team_players(&self, side: TeamSide) -> impl Iterator<Item = &MatchPlayer> {
        self.players.iter().filter(move |p| p.team == side)
    }

    pub fn teammates<'a>(&'a self, player: &'a MatchPlayer) -> impl Iterator<Item = &'a MatchPlayer> {
        self.players
            .iter()
            .filter(move |p| p.team == player.team && p.id != player.id)
    }

    pub fn opponents(&self, side: TeamSide) -> impl Iterator<Item = &MatchPlayer> {
        self.team_players(side.opponent())
    }

    pub fn ball_owner(&self) -> Option<&MatchPlayer> {
        self.ball.current_owner.and_then(|id| self.player(id))
    }

    pub fn selected_player_id(&self) -> Option<u32> {
        self.team(TeamSide::Red).selected
    }

    /// Hands human control to `player_id`. Returns true when the selection changed.
    pub fn select_player(&mut self, player_id: u32) -> bool {
        let is_red = self
            .player(player_id)
            .is_some_and(|player| player.team == TeamSide::Red);

        if !is_red || self.selected_player_id() == Some(player_id) {
            return false;
        }

        for player in self.players.iter_mut() {
            player.is_human_controlled = player.id == player_id;
        }

        self.teams[TeamSide::Red.index()].selected = Some(player_id);
        true
    }

    /// Field players of the human team ordered by distance to the ball, then id.
    fn switch_candidates(&self) -> Vec<u32> {
        let ball_position = self.ball.position;

        self.team_players(TeamSide::Red)
            .filter(|p| p.role != PlayerRole::Goalkeeper)
            .sorted_by(|a, b| {
                a.distance_to(&ball_position)
                    .total_cmp(&b.distance_to(&ball_position))
                    .then(a.id.cmp(&b.id))
            })
            .map(|p| p.id)
            .collect()
    }

    pub fn select_nearest_to_ball(&mut self) -> Option<u32> {
        let nearest = self.switch_candidates().first().copied()?;
        self.select_player(nearest);
        Some(nearest)
    }

    /// Switches to the field player nearest the ball other than the current one.
    pub fn cycle_selection(&mut self) -> Option<u32> {
        let current = self.selected_player_id();
        let next = self
            .switch_candidates()
            .into_iter()
            .find(|id| Some(*id) != current)?;

        self.select_player(next);
        Some(next)
    }

    pub fn reset_players_positions(&mut self) {
        self.players.iter_mut().for_each(|p| p.reset_to_start());
        self.ball.reset();
        self.select_nearest_to_ball();
    }
}

pub fn kickoff_position(pitch: &Pitch, side: TeamSide, role: PlayerRole) -> Vector3<f32> {
    let depth = role.formation_depth() * pitch.half_width();
    let x = match side {
        TeamSide::Red => depth,
        TeamSide::Blue => pitch.width - depth,
    };

    Vector3::new(x, pitch.height / 2.0, 0.0)
}
