//! Command-line parsing.
//!
//! Turns one raw input line into a [`Command`]. Parsing never looks at the
//! task list, so index bounds are checked later by the list operations.

use chrono::NaiveDate;

use crate::error::CommandError;
use crate::persistence::FIELD_DELIMITER;
use crate::task::DATE_FORMAT;

const BY: &str = "/by";
const FROM: &str = "/from";
const TO: &str = "/to";
const MARKERS: [&str; 3] = [BY, FROM, TO];

/// Keyword that ends a session.
pub const EXIT_KEYWORD: &str = "bye";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Todo { name: String },
    Deadline { name: String, by: NaiveDate },
    Event { name: String, from: NaiveDate, to: NaiveDate },
    /// 1-based task numbers, as typed.
    Mark(usize),
    Unmark(usize),
    Delete(usize),
    Find { query: String },
    Help,
    Unknown(String),
    Exit,
}

impl Command {
    /// Whether the command changes the task list and must be persisted.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Command::Todo { .. }
                | Command::Deadline { .. }
                | Command::Event { .. }
                | Command::Mark(_)
                | Command::Unmark(_)
                | Command::Delete(_)
        )
    }
}

pub fn parse_command(input: &str) -> Result<Command, CommandError> {
    let tokens: Vec<&str> = input.split_whitespace().collect();
    let Some((keyword, args)) = tokens.split_first() else {
        return Ok(Command::Help);
    };

    match *keyword {
        "list" => Ok(Command::List),
        "todo" => Ok(Command::Todo {
            name: description(args, "Todo task")?,
        }),
        "deadline" => parse_deadline(args),
        "event" => parse_event(args),
        "mark" => Ok(Command::Mark(task_number(args)?)),
        "unmark" => Ok(Command::Unmark(task_number(args)?)),
        "delete" => Ok(Command::Delete(task_number(args)?)),
        "find" => Ok(Command::Find {
            query: description(args, "search query")?,
        }),
        "help" => Ok(Command::Help),
        EXIT_KEYWORD => Ok(Command::Exit),
        other => Ok(Command::Unknown(other.to_string())),
    }
}

fn parse_deadline(args: &[&str]) -> Result<Command, CommandError> {
    let marker = args.iter().position(|t| *t == BY);
    let head = &args[..marker.unwrap_or(args.len())];
    let name = description(head, "Deadline task")?;

    let marker = marker.ok_or(CommandError::MissingDeadline)?;
    let date_tokens = until_marker(&args[marker + 1..]);
    if date_tokens.is_empty() {
        return Err(CommandError::MissingDeadline);
    }
    let by = parse_date(&date_tokens.join(" "))?;
    Ok(Command::Deadline { name, by })
}

fn parse_event(args: &[&str]) -> Result<Command, CommandError> {
    let from_pos = args.iter().position(|t| *t == FROM);
    let head = &args[..from_pos.unwrap_or(args.len())];
    let name = description(head, "Event task")?;

    let from_pos = from_pos.ok_or(CommandError::MissingEventTime)?;
    let to_pos = args[from_pos + 1..]
        .iter()
        .position(|t| *t == TO)
        .map(|p| p + from_pos + 1)
        .ok_or(CommandError::MissingEventTime)?;

    let start = until_marker(&args[from_pos + 1..to_pos]);
    let end = until_marker(&args[to_pos + 1..]);
    if start.is_empty() || end.is_empty() {
        return Err(CommandError::MissingEventTime);
    }
    Ok(Command::Event {
        name,
        from: parse_date(&start.join(" "))?,
        to: parse_date(&end.join(" "))?,
    })
}

/// Tokens up to the next recognised marker.
fn until_marker<'a>(tokens: &'a [&'a str]) -> &'a [&'a str] {
    let end = tokens
        .iter()
        .position(|t| MARKERS.contains(t))
        .unwrap_or(tokens.len());
    &tokens[..end]
}

fn description(tokens: &[&str], what: &'static str) -> Result<String, CommandError> {
    if tokens.is_empty() {
        return Err(CommandError::EmptyDescription(what));
    }
    let text = tokens.join(" ");
    if text.contains(FIELD_DELIMITER) {
        return Err(CommandError::ReservedCharacter);
    }
    Ok(text)
}

fn parse_date(s: &str) -> Result<NaiveDate, CommandError> {
    // chrono accepts unpadded fields; only the fixed-width form is allowed.
    let well_formed = s.len() == 10
        && s.bytes()
            .enumerate()
            .all(|(i, b)| if i == 4 || i == 7 { b == b'-' } else { b.is_ascii_digit() });
    if !well_formed {
        return Err(CommandError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| CommandError::InvalidDate(s.to_string()))
}

fn task_number(args: &[&str]) -> Result<usize, CommandError> {
    let Some(token) = args.first() else {
        return Err(CommandError::InvalidNumber(String::new()));
    };
    match token.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::InvalidNumber(token.to_string())),
    }
}
