//! Line-oriented input events for interactive mode.

use job_board_core::{Msg, SortKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Apply(Msg),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command `{0}` (try: search, type, sort, select, toggle, write, quit)")]
    Unknown(String),
    #[error("`{command}` needs a card number, got `{raw}`")]
    BadIndex { command: &'static str, raw: String },
    #[error(transparent)]
    BadSort(#[from] job_board_core::SortKeyParseError),
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Option<Result<Command, CommandError>> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return None;
    }
    let (verb, rest) = match line.trim_start().split_once(' ') {
        Some((verb, rest)) => (verb, rest),
        None => (line.trim(), ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        // Search text keeps inner spacing; the state lowercases it.
        "search" => Ok(Command::Apply(Msg::SearchChanged(rest.to_string()))),
        "type" => Ok(Command::Apply(Msg::JobTypeChanged(rest.trim().to_string()))),
        "sort" => rest
            .parse::<SortKey>()
            .map(|key| Command::Apply(Msg::SortChanged(key)))
            .map_err(CommandError::from),
        "select" => parse_index("select", rest).map(|index| Command::Apply(Msg::JobSelected { index })),
        "toggle" => {
            parse_index("toggle", rest).map(|index| Command::Apply(Msg::ToggleExpanded { index }))
        }
        "write" => Ok(Command::Apply(Msg::ExportRequested)),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    };
    Some(command)
}

fn parse_index(command: &'static str, raw: &str) -> Result<usize, CommandError> {
    raw.trim().parse().map_err(|_| CommandError::BadIndex {
        command,
        raw: raw.trim().to_string(),
    })
}
