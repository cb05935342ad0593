//! Round-robin fairness for rosters of any size.

use std::collections::HashMap;
use tally_tictactoe::{Controller, Marker, MarkerRegistry, RandomMover, Registrar, Roster};

fn roster_of(size: usize) -> Roster {
    let mut markers = MarkerRegistry::new();
    let mut registrar = Registrar::new();
    let mut roster = Roster::new();
    for i in 0..size {
        let marker = Marker::new(char::from(b'a' + i as u8));
        markers.register(marker).expect("register marker");
        let controller = if i % 2 == 0 {
            Controller::Human
        } else {
            Controller::Automated(RandomMover::seeded(i as u64))
        };
        let contestant = registrar
            .enrol(&format!("Player {i}"), marker, controller, &mut markers)
            .expect("enrol");
        roster.register(contestant);
    }
    roster
}

#[test]
fn test_two_cycles_visit_everyone_twice_in_order() {
    for size in 1..=8 {
        let mut roster = roster_of(size);
        let expected: Vec<_> = roster.contestants().iter().map(|c| c.id()).collect();

        let turns: Vec<_> = (0..2 * size)
            .map(|_| roster.next_contestant().expect("next").id())
            .collect();

        assert_eq!(turns[..size], expected[..], "first cycle, size {size}");
        assert_eq!(turns[size..], expected[..], "second cycle, size {size}");

        let mut counts = HashMap::new();
        for id in turns {
            *counts.entry(id).or_insert(0) += 1;
        }
        assert!(counts.values().all(|&n| n == 2));
    }
}
