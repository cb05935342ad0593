//! End-to-end match scenarios driven through scripted move input.

use std::collections::VecDeque;
use tally_tictactoe::{
    Contestant, ContestantKind, Controller, Enrolment, Grid, InputError, Line, Marker, MarkerError,
    MarkerRegistry, Match, MatchPhase, Move, MoveInput, Outcome, Position, Record, Registrar,
    Roster, Session, SetupError,
};

/// Replays typed positions; quits once the script runs out.
struct Script(VecDeque<(usize, usize)>);

impl Script {
    fn new(moves: &[(usize, usize)]) -> Self {
        Self(moves.iter().copied().collect())
    }
}

impl MoveInput for Script {
    fn prompt_for_move(
        &mut self,
        contestant: &Contestant,
        _grid: &Grid,
    ) -> Result<Move, InputError> {
        let (row, column) = self.0.pop_front().ok_or(InputError::Quit)?;
        Ok(Move::new(Position::new(row, column), contestant.marker()))
    }
}

fn humans(names: [&str; 2]) -> Roster {
    let mut markers = MarkerRegistry::new();
    markers.register(Marker::X).expect("register X");
    markers.register(Marker::O).expect("register O");
    let mut registrar = Registrar::new();
    let mut roster = Roster::new();
    for (name, marker) in names.into_iter().zip([Marker::X, Marker::O]) {
        let contestant = registrar
            .enrol(name, marker, Controller::Human, &mut markers)
            .expect("enrol");
        roster.register(contestant);
    }
    roster
}

#[test]
fn test_row_zero_win_after_five_moves() {
    let mut roster = humans(["Ann", "Bob"]);
    let mut game = Match::new();
    game.start(&roster).expect("start");
    let mut script = Script::new(&[(0, 0), (2, 2), (0, 1), (1, 1), (0, 2)]);

    let mut outcomes = Vec::new();
    for _ in 0..5 {
        outcomes.push(game.play_turn(&mut roster, &mut script).expect("turn").outcome);
    }

    assert!(outcomes[..4].iter().all(Option::is_none));
    let ann = roster.contestants()[0].id();
    assert_eq!(
        outcomes[4],
        Some(Outcome::Win {
            winner: ann,
            marker: Marker::X,
            line: Line::Row(0),
        })
    );
    assert_eq!(roster.owner_of_marker(Marker::X).map(|c| c.id()), Some(ann));
    assert!(matches!(game.phase(), MatchPhase::Resolved(_)));
}

#[test]
fn test_full_grid_without_line_draws_at_move_nine() {
    let mut roster = humans(["Ann", "Bob"]);
    let mut game = Match::new();
    game.start(&roster).expect("start");
    // X O X
    // O O X
    // X X O
    let mut script = Script::new(&[
        (0, 0),
        (0, 1),
        (0, 2),
        (1, 0),
        (1, 2),
        (1, 1),
        (2, 0),
        (2, 2),
        (2, 1),
    ]);

    for turn in 1..=9 {
        let report = game.play_turn(&mut roster, &mut script).expect("turn");
        if turn < 9 {
            assert_eq!(report.outcome, None, "no outcome before move 9");
        } else {
            assert_eq!(report.outcome, Some(Outcome::Draw));
        }
    }

    game.conclude(&mut roster).expect("conclude");
    for contestant in roster.contestants() {
        assert_eq!(*contestant.record(), Record::new(0, 0, 1));
    }
}

#[test]
fn test_second_dave_is_rejected() {
    let mut session = Session::new(&[Marker::X, Marker::O]).expect("session");
    let first = session
        .enrol(&Enrolment::new("Dave", ContestantKind::Human, Marker::X))
        .expect("first Dave");

    let second = session.enrol(&Enrolment::new("Dave", ContestantKind::Human, Marker::O));

    assert_eq!(second, Err(SetupError::DuplicateName("Dave".to_string())));
    assert_eq!(session.roster().len(), 1);
    assert_eq!(session.roster().get(first).map(|c| c.name()), Some("Dave"));
    assert!(session.markers().is_available(Marker::O));
}

#[test]
fn test_owned_marker_cannot_be_claimed_twice() {
    let mut session = Session::new(&[Marker::X, Marker::O]).expect("session");
    let ann = session
        .enrol(&Enrolment::new("Ann", ContestantKind::Human, Marker::X))
        .expect("Ann");

    let bob = session.enrol(&Enrolment::new("Bob", ContestantKind::Automated, Marker::X));

    assert_eq!(
        bob,
        Err(SetupError::Marker(MarkerError::MarkerAlreadyOwned(Marker::X)))
    );
    assert_eq!(session.markers().owner_of(Marker::X), Some(ann));
    assert_eq!(session.roster().get(ann).map(|c| c.marker()), Some(Marker::X));
}

#[test]
fn test_cursor_continues_into_next_match() {
    let mut roster = humans(["Ann", "Bob"]);
    let mut game = Match::new();
    game.start(&roster).expect("start");
    // Ann wins on the fifth move, so Bob opens the next match.
    let mut script = Script::new(&[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2), (2, 2)]);
    while game.play_turn(&mut roster, &mut script).expect("turn").outcome.is_none() {}
    game.conclude(&mut roster).expect("conclude");
    game.reset();

    game.start(&roster).expect("restart");
    let report = game.play_turn(&mut roster, &mut script).expect("turn");
    assert_eq!(Some(report.contestant), roster.contestants().get(1).map(|c| c.id()));
    assert_eq!(report.mv.marker(), Marker::O);
}
