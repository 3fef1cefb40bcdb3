//! Parsing of typed input lines.

use crate::error::ClientError;

/// One line typed by the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// Plain text, sent as a chat message
    Chat(String),
    /// `/start <wager> <target>`
    Start { wager: f64, cash_out_target: f64 },
    /// `/reset`
    Reset,
    /// `/speed <factor>`
    Speed(f64),
    /// `/state`
    State,
    /// `/ranking`
    Ranking,
    /// `/help`
    Help,
}

pub const HELP: &str = "\
Commands:
  /start <wager> <target>  start a round (target is the cash-out multiplier)
  /reset                   clear the ended round
  /speed <factor>          set the speed factor (1 to 5) for the next round
  /state                   show the current round
  /ranking                 show the ranking
  /help                    show this help
Anything else is sent as a chat message.";

/// Parse a non-empty, trimmed input line.
pub fn parse_input(line: &str) -> Result<Input, ClientError> {
    let Some(command) = line.strip_prefix('/') else {
        return Ok(Input::Chat(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    match (name, args.as_slice()) {
        ("start", [wager, target]) => Ok(Input::Start {
            wager: parse_number(wager)?,
            cash_out_target: parse_number(target)?,
        }),
        ("start", _) => Err(ClientError::InvalidCommand(
            "usage: /start <wager> <target>".to_string(),
        )),
        ("reset", []) => Ok(Input::Reset),
        ("speed", [factor]) => Ok(Input::Speed(parse_number(factor)?)),
        ("speed", _) => Err(ClientError::InvalidCommand(
            "usage: /speed <factor>".to_string(),
        )),
        ("state", []) => Ok(Input::State),
        ("ranking", []) => Ok(Input::Ranking),
        ("help", _) => Ok(Input::Help),
        _ => Err(ClientError::InvalidCommand(format!(
            "unknown command '/{}', try /help",
            command
        ))),
    }
}

fn parse_number(raw: &str) -> Result<f64, ClientError> {
    raw.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| ClientError::InvalidCommand(format!("'{}' is not a number", raw)))
}
