//! The interactive game session.
//!
//! The app owns everything the engine leaves to its surroundings:
//! sequencing the two-phase roll across a reveal delay, ticking the
//! turn clock once per second and forcing the hand-off at zero, and
//! rendering read-only snapshots of the state between moves.

use crate::commands::{self, Command};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;
use wordladders_core::{
    index_to_position, Dictionary, GameEvent, GameMode, GameState, JumpKind, PlayerId,
    RejectReason, Rules, RulesError, TurnPhase, BOT_SEAT,
};

/// How long the die "tumbles" before the value is revealed.
const ROLL_REVEAL_DELAY: Duration = Duration::from_millis(600);

/// Hints shown per request.
const HINT_LIMIT: usize = 5;

pub struct App {
    state: GameState,
    dictionary: Dictionary,
}

impl App {
    pub fn new(rules: Rules, dictionary: Dictionary) -> Result<Self, RulesError> {
        Ok(Self {
            state: GameState::new(rules)?,
            dictionary,
        })
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        println!("Welcome to Wordladders! Race to the last cell by playing words.");
        println!("Commands: <word>, !wild <word>, !hint, !pass, !board, !new, !quit");
        self.print_board();

        let stdin = BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();
        let mut ticker = tokio::time::interval(Duration::from_secs(1));

        loop {
            // Catch the state machine up before prompting: reveal any
            // due roll and hand over any resolved turn.
            self.settle().await;

            if let Some(winner) = self.state.winner() {
                println!("\n{} wins the game!", self.seat_name(winner));
                return Ok(());
            }
            self.print_prompt();

            // Wait for input; clock ticks only surface when the timer
            // said or did something.
            loop {
                tokio::select! {
                    line = lines.next_line() => {
                        let Some(line) = line? else {
                            return Ok(());
                        };
                        if !self.handle_line(&line) {
                            return Ok(());
                        }
                        break;
                    }
                    _ = ticker.tick() => {
                        if self.tick() {
                            break;
                        }
                    }
                }
            }
        }
    }

    /// Reveal pending rolls and hand over resolved turns until the
    /// game is waiting on the player again.
    async fn settle(&mut self) {
        loop {
            match self.state.phase {
                TurnPhase::AwaitingRoll => {
                    let player = self.state.current;
                    self.state.begin_roll();
                    println!("{} rolls the die...", self.seat_name(player));
                    tokio::time::sleep(ROLL_REVEAL_DELAY).await;
                    if let Some(die) = self.state.finish_roll() {
                        println!(
                            "Rolled a {die}: a {die}-letter word starting with '{}'.",
                            self.state.start_letter
                        );
                    }
                }
                TurnPhase::RollRevealing => {
                    if let Some(die) = self.state.finish_roll() {
                        println!("Rolled a {die}.");
                    }
                }
                TurnPhase::TurnResolved => {
                    let events = self.state.end_turn(&self.dictionary);
                    self.print_events(&events);
                }
                TurnPhase::AwaitingWord | TurnPhase::Finished { .. } => return,
            }
        }
    }

    /// Returns `false` when the session should end.
    fn handle_line(&mut self, line: &str) -> bool {
        let Some(command) = commands::parse(line) else {
            if !line.trim().is_empty() {
                println!("Unrecognized command. Try <word>, !hint, !pass, !board, !quit.");
            }
            return true;
        };
        debug!(?command, "player input");

        match command {
            Command::Word { word, wildcard } => {
                match self.state.submit_word(&self.dictionary, &word, wildcard) {
                    Ok(events) => self.print_events(&events),
                    Err(reason) => {
                        println!("Rejected: {reason}.");
                        // Only validator failures carry the challenge
                        // penalty; an overshoot forfeits the turn instead.
                        let penalized = matches!(
                            reason,
                            RejectReason::Length
                                | RejectReason::Start
                                | RejectReason::Dictionary
                                | RejectReason::Repeat
                        );
                        if penalized && self.state.rules.challenge_mode {
                            println!(
                                "Challenge penalty: {} falls back to cell {}.",
                                self.seat_name(self.state.current),
                                self.state.positions[self.state.current as usize]
                            );
                        }
                    }
                }
            }
            Command::Hint => match self.state.required_length {
                Some(length) => {
                    let letter = self.state.start_letter;
                    if !self.dictionary.can_satisfy(letter, length) {
                        println!(
                            "No {length}-letter word starts with '{letter}' - pass or wildcard."
                        );
                    } else {
                        let hints = self.dictionary.hints(letter, length, HINT_LIMIT);
                        println!("Try: {}", hints.join(", "));
                    }
                }
                None => println!("Nothing to hint: no roll is active."),
            },
            Command::Pass => {
                println!("{} passes.", self.seat_name(self.state.current));
                let events = self.state.end_turn(&self.dictionary);
                self.print_events(&events);
            }
            Command::Board => self.print_board(),
            Command::New => {
                match GameState::new(self.state.rules.clone()) {
                    Ok(state) => {
                        self.state = state;
                        println!("New game started.");
                        self.print_board();
                    }
                    Err(err) => println!("Could not restart: {err}"),
                }
            }
            Command::Quit => return false,
        }
        true
    }

    /// One second of the turn clock, when it is running. Returns
    /// whether anything visible happened.
    fn tick(&mut self) -> bool {
        if !self.state.rules.timer || !matches!(self.state.phase, TurnPhase::AwaitingWord) {
            return false;
        }
        let left = self.state.decrement_timer();
        if left == 10 || left == 5 {
            println!("{left} seconds left!");
        }
        if left == 0 {
            println!(
                "Time's up - {} forfeits the turn.",
                self.seat_name(self.state.current)
            );
            let events = self.state.end_turn(&self.dictionary);
            self.print_events(&events);
            return true;
        }
        false
    }

    fn seat_name(&self, player: PlayerId) -> String {
        if self.state.rules.mode == GameMode::Bot && player == BOT_SEAT {
            self.state
                .rules
                .bot
                .as_ref()
                .map(|b| b.name.clone())
                .unwrap_or_else(|| "Bot".to_string())
        } else {
            format!("Player {}", player + 1)
        }
    }

    fn print_prompt(&self) {
        let state = &self.state;
        let seats = if state.rules.mode == GameMode::Zen {
            format!("[{} @ {}]", self.seat_name(0), state.positions[0])
        } else {
            format!(
                "[{} @ {} | {} @ {}]",
                self.seat_name(0),
                state.positions[0],
                self.seat_name(1),
                state.positions[1],
            )
        };
        let mut prompt = format!("{seats} {}", self.seat_name(state.current));
        if let Some(length) = state.required_length {
            prompt.push_str(&format!(
                ": {length} letters, starts with '{}'",
                state.start_letter
            ));
        }
        let wildcards = state.wildcards[state.current as usize];
        if state.rules.allow_wildcards && wildcards > 0 {
            prompt.push_str(&format!(" ({wildcards} wildcards)"));
        }
        if state.rules.timer && state.remaining_time > 0 {
            prompt.push_str(&format!(" [{}s]", state.remaining_time));
        }
        println!("{prompt}");
    }

    fn print_events(&self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::DieRolled { player, die } => {
                    println!("{} rolled a {die}.", self.seat_name(*player));
                }
                GameEvent::WordAccepted {
                    player, word, to, ..
                } => {
                    println!("{} plays \"{word}\" and reaches cell {to}.", self.seat_name(*player));
                }
                GameEvent::JumpTaken { player, to, kind, .. } => match kind {
                    JumpKind::Snake => {
                        println!("A snake! {} slides down to cell {to}.", self.seat_name(*player));
                    }
                    JumpKind::Ladder => {
                        println!("A ladder! {} climbs to cell {to}.", self.seat_name(*player));
                    }
                },
                GameEvent::WildcardSpent { player, remaining } => {
                    println!(
                        "{} spends a wildcard ({remaining} left).",
                        self.seat_name(*player)
                    );
                }
                GameEvent::BotPlayed { player, word } => {
                    println!("{} answers with \"{word}\".", self.seat_name(*player));
                }
                GameEvent::BotPassed { player } => {
                    println!("{} has no word and passes.", self.seat_name(*player));
                }
                GameEvent::TurnEnded { next, .. } => {
                    debug!(next, "turn handed over");
                }
                GameEvent::GameWon { player } => {
                    println!("{} reaches the final cell!", self.seat_name(*player));
                }
            }
        }
    }

    /// Draw the serpentine board top row first, the way it is printed
    /// on a box lid.
    fn print_board(&self) {
        let state = &self.state;
        let size = state.rules.board_size;
        let width = wordladders_core::board_width(size);
        let mut grid = vec![vec!['.'; width]; width];

        for index in 0..size {
            let pos = index_to_position(index, size);
            let mut glyph = match state.board_letters[index] {
                Some(letter) => letter,
                None => '.',
            };
            if state.rules.snakes.iter().any(|s| s.from == index) {
                glyph = 'S';
            }
            if state.rules.ladders.iter().any(|l| l.from == index) {
                glyph = 'L';
            }
            let zen = state.rules.mode == GameMode::Zen;
            if !zen && state.positions[0] == index && state.positions[1] == index {
                glyph = '&';
            } else if state.positions[0] == index {
                glyph = '1';
            } else if !zen && state.positions[1] == index {
                glyph = '2';
            }
            grid[pos.row][pos.col] = glyph;
        }

        for row in grid.iter().rev() {
            let line: String = row
                .iter()
                .flat_map(|&c| [c, ' '])
                .collect();
            println!("  {}", line.trim_end());
        }
    }
}
