//! Console implementation of the setup and move-input collaborators.

use crate::console::board::{parse_position, render_board, render_standings};
use crate::console::prompt::{INVALID_INPUT, Prompter, Tone};
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use strum::IntoEnumIterator;
use tally_tictactoe::{
    Contestant, ContestantKind, Enrolment, Grid, InputError, KnownPlayer, Marker, MatchEvent, Move,
    MoveInput, RegistrationRequest, SetupUi,
};
use tracing::{debug, info, instrument};

/// Shown when a typed move targets an occupied cell.
pub const CELL_TAKEN: &str = "Selected location already contains a marker, try again...";

/// Text console for registration, moves and match reports.
#[derive(Debug)]
pub struct ConsoleUi<R, W> {
    prompter: Prompter<R, W>,
    presets: VecDeque<Enrolment>,
    auto_confirm: bool,
}

impl<R: BufRead, W: Write> ConsoleUi<R, W> {
    /// Creates a console over the given streams.
    pub fn new(input: R, output: W, quit_keyword: impl Into<String>, color: bool) -> Self {
        Self {
            prompter: Prompter::new(input, output, quit_keyword, color),
            presets: VecDeque::new(),
            auto_confirm: false,
        }
    }

    /// Answers the first registrations with these forms instead of asking,
    /// and starts the first match without asking.
    pub fn with_presets(mut self, presets: impl IntoIterator<Item = Enrolment>) -> Self {
        self.presets = presets.into_iter().collect();
        self.auto_confirm = true;
        self
    }

    /// The output stream.
    pub fn output(&self) -> &W {
        self.prompter.output()
    }

    /// Consumes the console, returning the output stream.
    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    /// Prints the title banner.
    pub fn banner(&mut self) {
        self.prompter.header("TIC TAC TOE");
        let hint = format!("To exit type '{}' at any time", self.prompter.quit_keyword());
        self.prompter.blank();
        self.prompter.say(Tone::Plain, &hint);
    }

    /// Prints the stored records under a `PLAYER STATS` header.
    pub fn standings(&mut self, stored: &[KnownPlayer]) {
        self.prompter.header("PLAYER STATS");
        self.prompter.blank();
        if stored.is_empty() {
            self.prompter.say(Tone::Plain, "No stored records");
        }
        for line in render_standings(stored) {
            self.prompter.say(Tone::Plain, &line);
        }
    }

    /// Prints the farewell.
    pub fn goodbye(&mut self) {
        self.prompter.blank();
        self.prompter.say(Tone::Plain, "Goodbye");
    }

    fn board(&mut self, grid: &Grid) {
        self.prompter.blank();
        for line in render_board(grid).lines() {
            self.prompter.say(Tone::Plain, line);
        }
    }

    fn choose_marker(&mut self, available: &[Marker]) -> Result<Marker, InputError> {
        match available {
            [] => Err(InputError::Rejected("No markers available".to_string())),
            [only] => Ok(*only),
            _ => {
                let labels: Vec<String> = available.iter().map(Marker::to_string).collect();
                let index = self.prompter.choose("Marker", &labels)?;
                Ok(available[index])
            }
        }
    }

    fn new_contestant(&mut self, request: &RegistrationRequest) -> Result<Enrolment, InputError> {
        self.prompter
            .header(&format!("PLAYER {} REGISTRATION", request.sequence()));

        let kinds: Vec<ContestantKind> = ContestantKind::iter().collect();
        let labels: Vec<String> = kinds.iter().map(ContestantKind::to_string).collect();
        let kind = kinds[self.prompter.choose("Select Player Type", &labels)?];

        self.prompter.blank();
        let name = self.prompter.ask("Name")?;
        let marker = self.choose_marker(request.available())?;
        Ok(Enrolment::new(name, kind, marker))
    }
}

impl<R: BufRead, W: Write> SetupUi for ConsoleUi<R, W> {
    #[instrument(skip(self, request), fields(sequence = request.sequence()))]
    fn request_registration(
        &mut self,
        request: &RegistrationRequest,
    ) -> Result<Enrolment, InputError> {
        if let Some(preset) = self.presets.pop_front() {
            debug!(name = %preset.name(), "Using preset registration");
            return Ok(preset);
        }

        let known = request.known_players();
        if known.is_empty() {
            return self.new_contestant(request);
        }

        self.prompter.header("PLAYER SELECT");
        let mut labels: Vec<String> = known.iter().map(|p| p.name().clone()).collect();
        labels.push("New Player".to_string());
        let index = self.prompter.choose("Select Player", &labels)?;

        match known.get(index) {
            Some(player) => {
                info!(name = %player.name(), "Returning player selected");
                let marker = self.choose_marker(request.available())?;
                Ok(Enrolment::returning(player, marker))
            }
            None => self.new_contestant(request),
        }
    }

    #[instrument(skip(self))]
    fn confirm_new_match(&mut self) -> Result<bool, InputError> {
        if self.auto_confirm {
            self.auto_confirm = false;
            return Ok(true);
        }
        self.prompter.blank();
        self.prompter.confirm("Start New Game (y/n)")
    }

    fn notify(&mut self, event: &MatchEvent<'_>) {
        match event {
            MatchEvent::ContestantJoined(contestant) => {
                self.prompter.message(&format!(
                    "{} joins the game using marker '{}'",
                    contestant.name(),
                    contestant.marker()
                ));
            }
            MatchEvent::RegistrationRejected(error) => {
                self.prompter.blank();
                self.prompter.error(&format!("{error}, try again..."));
            }
            MatchEvent::TurnStarted { contestant, grid } => {
                if contestant.is_human() {
                    self.prompter.header(&format!(
                        "YOUR MOVE {} ({})",
                        contestant.name().to_uppercase(),
                        contestant.marker()
                    ));
                    self.board(grid);
                }
            }
            MatchEvent::MoveApplied { contestant, mv } => {
                if !contestant.is_human() {
                    self.prompter.message(&format!(
                        "{} places {} at {}",
                        contestant.name(),
                        mv.marker(),
                        mv.position()
                    ));
                }
            }
            MatchEvent::MatchWon { winner, line, grid } => {
                self.prompter.header("GAME OVER");
                self.board(grid);
                self.prompter.message(&format!(
                    "{} ({}) Wins The Game on {}!",
                    winner.name(),
                    winner.marker(),
                    line
                ));
            }
            MatchEvent::MatchDrawn { grid } => {
                self.prompter.header("GAME OVER");
                self.board(grid);
                self.prompter.message("Game is a Stalemate!");
            }
            MatchEvent::Standings {
                contestants,
                stored,
            } => {
                self.standings(stored);
                for contestant in contestants.iter().filter(|c| !c.is_human()) {
                    let line = format!("{}...{} (system)", contestant.name(), contestant.record());
                    self.prompter.say(Tone::Plain, &line);
                }
            }
            MatchEvent::StatsNotSaved(reason) => {
                debug!(%reason, "Reporting unsaved statistics");
                self.prompter.blank();
                self.prompter
                    .error("Unable to Open/Create player data! Stats Not Saved!");
            }
        }
    }
}

impl<R: BufRead, W: Write> MoveInput for ConsoleUi<R, W> {
    #[instrument(skip(self, contestant, grid), fields(contestant = %contestant.name()))]
    fn prompt_for_move(
        &mut self,
        contestant: &Contestant,
        grid: &Grid,
    ) -> Result<Move, InputError> {
        loop {
            let answer = self.prompter.ask("x,y")?;
            match parse_position(&answer) {
                Some(position) if position.is_on_grid() => {
                    if grid.is_occupiable(position) {
                        return Ok(Move::new(position, contestant.marker()));
                    }
                    self.prompter.error(CELL_TAKEN);
                }
                _ => {
                    debug!(%answer, "Unparsable move");
                    self.prompter.error(INVALID_INPUT);
                }
            }
        }
    }
}
