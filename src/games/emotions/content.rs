//! Built-in event content for the four emotions.

use crate::core::Identity;
use crate::events::{Event, EventCatalog, Mechanic};

pub const RAGE: &str = "rage";
pub const EXTASE: &str = "extase";
pub const MELANCOLIE: &str = "melancolie";
pub const ANGOISSE: &str = "angoisse";

/// The four playable emotions, in menu order.
pub const EMOTIONS: [&str; 4] = [RAGE, EXTASE, MELANCOLIE, ANGOISSE];

/// Identities for every emotion, in menu order.
#[must_use]
pub fn identities() -> Vec<Identity> {
    EMOTIONS.iter().copied().map(Identity::from).collect()
}

fn event(title: &str, description: &str, rule: &str, movement: u32) -> Event {
    Event::new(title, description).with_mechanic(Mechanic::new(rule, movement))
}

fn finale(title: &str, description: &str) -> Event {
    Event::new(title, description).final_event()
}

/// The built-in catalog: four drawable events and one finale per emotion.
#[must_use]
pub fn catalog() -> EventCatalog {
    EventCatalog::new()
        .with_events(
            RAGE,
            vec![
                event("Broken Glass", "Something shatters nearby.", "Every player moves twice.", 2),
                event("Red Mist", "Nobody can see straight.", "Skip your next bonus.", 0),
                event("Stampede", "The crowd surges forward.", "Every player moves three times.", 3),
                event("Clenched Fists", "Hold it in.", "No talking until the next round.", 0),
                finale("Eruption", "Everything that was held back comes out at once."),
            ],
        )
        .with_events(
            EXTASE,
            vec![
                event("Golden Hour", "The light is perfect.", "Every player moves once.", 1),
                event("Standing Ovation", "The room applauds.", "The leader picks a song.", 0),
                event("Dance Floor", "Nobody stays still.", "Every player moves twice.", 2),
                event("Second Wind", "Tiredness vanishes.", "Redo the last challenge.", 0),
                finale("Rapture", "The whole table shares the high."),
            ],
        )
        .with_events(
            MELANCOLIE,
            vec![
                event("Rainy Window", "The afternoon drags on.", "Everyone speaks softly.", 0),
                event("Old Letters", "A drawer full of memories.", "Every player moves once.", 1),
                event("Empty Station", "The last train has left.", "Every player moves twice.", 2),
                event("Faded Photo", "Who was that again?", "Tell a story from last year.", 0),
                finale("Long Goodbye", "The evening winds down together."),
            ],
        )
        .with_events(
            ANGOISSE,
            vec![
                event("Knock at the Door", "Nobody is expected.", "Every player moves once.", 1),
                event("Ticking Clock", "Time is running out.", "The next challenge is timed.", 0),
                event("Lights Out", "Total darkness.", "Every player moves three times.", 3),
                event("Whispers", "Someone said your name.", "Swap seats with a neighbour.", 0),
                finale("Dread", "The thing under the bed finally shows itself."),
            ],
        )
}
