//! Line format for stored records.

use tally_tictactoe::{KnownPlayer, Record};

/// Field delimiter, also written after the last field.
pub const DELIMITER: char = ';';

/// One line of the statistics file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredLine {
    /// A well-formed record.
    Record(KnownPlayer),
    /// Anything else, written back untouched.
    Malformed(String),
}

impl StoredLine {
    /// The record, if the line held one.
    pub fn player(&self) -> Option<&KnownPlayer> {
        match self {
            StoredLine::Record(player) => Some(player),
            StoredLine::Malformed(_) => None,
        }
    }

    /// Returns true if this line holds a record for `name`, ignoring case.
    pub fn is_for(&self, name: &str) -> bool {
        self.player()
            .is_some_and(|player| player.name().to_lowercase() == name.to_lowercase())
    }

    /// The line as written to the file, without the newline.
    pub fn to_line(&self) -> String {
        match self {
            StoredLine::Record(player) => format_record(player),
            StoredLine::Malformed(raw) => raw.clone(),
        }
    }
}

/// Parses `name;wins;losses;drawn;`. The trailing delimiter is optional.
pub fn parse_line(line: &str) -> StoredLine {
    let malformed = || StoredLine::Malformed(line.to_string());

    let body = line.strip_suffix(DELIMITER).unwrap_or(line);
    let fields: Vec<&str> = body.split(DELIMITER).collect();
    let &[name, wins, losses, draws] = fields.as_slice() else {
        return malformed();
    };

    let name = name.trim();
    if name.is_empty() {
        return malformed();
    }

    let parse = |field: &str| field.trim().parse::<u32>().ok();
    match (parse(wins), parse(losses), parse(draws)) {
        (Some(wins), Some(losses), Some(draws)) => StoredLine::Record(KnownPlayer::new(
            name.to_string(),
            Record::new(wins, losses, draws),
        )),
        _ => malformed(),
    }
}

/// Formats a record as `name;wins;losses;drawn;`.
pub fn format_record(player: &KnownPlayer) -> String {
    let record = player.record();
    format!(
        "{name}{d}{wins}{d}{losses}{d}{draws}{d}",
        name = player.name(),
        wins = record.wins(),
        losses = record.losses(),
        draws = record.draws(),
        d = DELIMITER,
    )
}
