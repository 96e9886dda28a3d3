//! Depletion behavior of event pools.

use std::collections::HashSet;

use proptest::prelude::*;

use party_rounds::core::{DrawError, GameRng, Identity};
use party_rounds::events::{Event, EventCatalog, EventPool};

fn catalog(size: usize) -> EventCatalog {
    let mut events: Vec<Event> = (0..size).map(|n| Event::new(format!("event-{n}"), "")).collect();
    events.insert(size / 2, Event::new("finale", "").final_event());
    EventCatalog::new().with_events("rage", events)
}

proptest! {
    // N draws never repeat; the next one is exhausted
    #[test]
    fn draws_never_repeat(size in 0..20usize, seed in any::<u64>()) {
        let rage = Identity::new("rage");
        let mut pool = EventPool::from_catalog(&catalog(size));
        let mut rng = GameRng::new(seed);
        let mut seen = HashSet::new();

        for _ in 0..size {
            let event = pool.draw_non_final(&rage, &mut rng).unwrap();
            prop_assert!(!event.is_final);
            prop_assert!(seen.insert(event.title));
        }

        prop_assert_eq!(
            pool.draw_non_final(&rage, &mut rng),
            Err(DrawError::PoolExhausted { identity: rage.clone() })
        );
        prop_assert_eq!(pool.draw_final(&rage).unwrap().title, "finale");
    }
}

#[test]
fn test_restore_undoes_depletion() {
    let rage = Identity::new("rage");
    let catalog = catalog(3);
    let mut pool = EventPool::from_catalog(&catalog);
    let mut rng = GameRng::new(1);

    pool.draw_non_final(&rage, &mut rng).unwrap();
    pool.draw_non_final(&rage, &mut rng).unwrap();
    assert_eq!(pool.remaining(&rage), 1);
    assert_eq!(catalog.non_final_count(&rage), 3);

    pool.restore(&catalog);
    assert_eq!(pool.remaining(&rage), 3);
    assert_eq!(pool, EventPool::from_catalog(&catalog));
}

#[test]
fn test_unknown_identity_is_exhausted() {
    let mut pool = EventPool::from_catalog(&catalog(2));
    let mut rng = GameRng::new(1);
    let ghost = Identity::new("ghost");

    assert!(matches!(
        pool.draw_non_final(&ghost, &mut rng),
        Err(DrawError::PoolExhausted { .. })
    ));
    assert!(matches!(pool.draw_final(&ghost), Err(DrawError::NoFinalEvent { .. })));
}
