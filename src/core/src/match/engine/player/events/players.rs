use crate::r#match::engine::context::MatchContext;
use crate::r#match::engine::error::SimulationError;
use crate::r#match::engine::events::Event;
use crate::r#match::engine::field::MatchField;
use crate::r#match::engine::passing::PassMode;
use log::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    Selected(u32),
    PassTo {
        passer_id: u32,
        receiver_id: u32,
        mode: PassMode,
    },
    ShotTaken {
        shooter_id: u32,
    },
    Tackle {
        tackler_id: u32,
        carrier_id: u32,
        success: bool,
    },
    Celebrate(u32),
    InvalidAction(SimulationError),
}

pub struct PlayerEventDispatcher;

impl PlayerEventDispatcher {
    pub fn dispatch(
        event: PlayerEvent,
        field: &mut MatchField,
        context: &mut MatchContext,
    ) -> Vec<Event> {
        let mut remaining_events = Vec::new();

        debug!("Player event: {:?}", event);

        match event {
            PlayerEvent::Selected(player_id) => {
                if field.select_player(player_id) {
                    context.charge.cancel();
                }
            }
            PlayerEvent::PassTo {
                passer_id,
                receiver_id,
                ..
            } => {
                if context.config.control.auto_switch_on_pass
                    && field.selected_player_id() == Some(passer_id)
                {
                    remaining_events.push(Event::PlayerEvent(PlayerEvent::Selected(receiver_id)));
                }
            }
            PlayerEvent::Celebrate(player_id) => {
                let duration = context.config.timing.player_celebration_time;
                if let Some(player) = field.player_mut(player_id) {
                    player.celebrate(duration);
                }
            }
            PlayerEvent::InvalidAction(error) => {
                warn!("{}", error);
            }
            PlayerEvent::ShotTaken { .. } | PlayerEvent::Tackle { .. } => {}
        }

        remaining_events
    }
}
