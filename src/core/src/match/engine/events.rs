use crate::r#match::engine::ball::events::{BallEvent, BallEventDispatcher};
use crate::r#match::engine::context::MatchContext;
use crate::r#match::engine::field::MatchField;
use crate::r#match::engine::player::events::{PlayerEvent, PlayerEventDispatcher};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    BallEvent(BallEvent),
    PlayerEvent(PlayerEvent),
}

#[derive(Debug, Default)]
pub struct EventCollection {
    events: Vec<Event>,
}

impl EventCollection {
    pub fn new() -> Self {
        EventCollection { events: Vec::new() }
    }

    pub fn add(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn add_ball_event(&mut self, event: BallEvent) {
        self.events.push(Event::BallEvent(event));
    }

    pub fn add_player_event(&mut self, event: PlayerEvent) {
        self.events.push(Event::PlayerEvent(event));
    }

    pub fn add_from_collection(&mut self, events: EventCollection) {
        self.events.extend(events.events);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn to_vec(self) -> Vec<Event> {
        self.events
    }
}

pub struct EventDispatcher;

impl EventDispatcher {
    /// Dispatches events in order, including the follow-up events they raise.
    pub fn dispatch(events: Vec<Event>, field: &mut MatchField, context: &mut MatchContext) {
        let mut pending = events;

        while !pending.is_empty() {
            let mut remaining_events = Vec::new();

            for event in pending {
                match event {
                    Event::BallEvent(ball_event) => {
                        remaining_events.extend(BallEventDispatcher::dispatch(
                            ball_event, field, context,
                        ));
                    }
                    Event::PlayerEvent(player_event) => {
                        remaining_events.extend(PlayerEventDispatcher::dispatch(
                            player_event,
                            field,
                            context,
                        ));
                    }
                }
            }

            pending = remaining_events;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_keeps_order() {
        let mut events = EventCollection::new();
        events.add_ball_event(BallEvent::Claimed(1));
        events.add_player_event(PlayerEvent::Celebrate(1));

        let mut other = EventCollection::new();
        other.add_ball_event(BallEvent::Landed);
        events.add_from_collection(other);

        assert_eq!(events.len(), 3);
        assert_eq!(
            events.to_vec(),
            vec![
                Event::BallEvent(BallEvent::Claimed(1)),
                Event::PlayerEvent(PlayerEvent::Celebrate(1)),
                Event::BallEvent(BallEvent::Landed),
            ]
        );
    }
}
