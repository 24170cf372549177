//! Player input parsing.
//!
//! A line is either a word submission or a bang-command. Parsing is
//! deliberately forgiving about whitespace and case; the engine
//! normalizes words again on its side.

/// One line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit a word; `wildcard` skips the start-letter rule.
    Word { word: String, wildcard: bool },
    /// Show hint words for the current constraints.
    Hint,
    /// Give up the turn.
    Pass,
    /// Print the board.
    Board,
    /// Start a fresh game with the same rules.
    New,
    /// Leave the game.
    Quit,
}

/// Parse a line of input. Returns `None` for blank lines and unknown
/// commands.
pub fn parse(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if let Some(rest) = line.strip_prefix('!') {
        let mut parts = rest.split_whitespace();
        let name = parts.next()?.to_ascii_lowercase();
        return match name.as_str() {
            "wild" | "w" => parts.next().map(|word| Command::Word {
                word: word.to_string(),
                wildcard: true,
            }),
            "hint" | "h" => Some(Command::Hint),
            "pass" | "p" => Some(Command::Pass),
            "board" | "b" => Some(Command::Board),
            "new" => Some(Command::New),
            "quit" | "q" => Some(Command::Quit),
            _ => None,
        };
    }

    // A bare line is a word submission; take the first token so
    // trailing chatter doesn't turn into a garbled word.
    line.split_whitespace().next().map(|word| Command::Word {
        word: word.to_string(),
        wildcard: false,
    })
}
