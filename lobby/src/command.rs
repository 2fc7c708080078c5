//! Line commands accepted by the console.

use arcade_types::casino::{Action, DiceBet, GameType, RouletteBet, Wager};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Wager(Wager),
    Action(GameType, Action),
    Balance,
    Rescue,
    Mute,
    History,
    Paytable,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("missing {0}")]
    Missing(&'static str),
    #[error("invalid amount '{0}'")]
    InvalidAmount(String),
    #[error("invalid bet '{0}'")]
    InvalidBet(String),
    #[error("invalid card position '{0}' (1-5)")]
    InvalidPosition(String),
    #[error("unexpected '{0}'")]
    Trailing(String),
}

fn amount(word: Option<&str>) -> Result<u64, CommandError> {
    let word = word.ok_or(CommandError::Missing("amount"))?;
    word.parse()
        .map_err(|_| CommandError::InvalidAmount(word.to_string()))
}

fn dice_bet(word: Option<&str>) -> Result<DiceBet, CommandError> {
    match word.ok_or(CommandError::Missing("dice bet"))? {
        "under" | "low" => Ok(DiceBet::Under7),
        "over" | "high" => Ok(DiceBet::Over7),
        "seven" | "7" => Ok(DiceBet::Exact7),
        other => Err(CommandError::InvalidBet(other.to_string())),
    }
}

/// Numbers are straight bets. Range checks happen at the table.
fn roulette_bet(word: Option<&str>) -> Result<RouletteBet, CommandError> {
    let word = word.ok_or(CommandError::Missing("roulette bet"))?;
    if let Ok(number) = word.parse::<u8>() {
        return Ok(RouletteBet::Straight(number));
    }
    match word {
        "red" => Ok(RouletteBet::Red),
        "black" => Ok(RouletteBet::Black),
        "odd" => Ok(RouletteBet::Odd),
        "even" => Ok(RouletteBet::Even),
        "low" | "1-18" => Ok(RouletteBet::Low),
        "high" | "19-36" => Ok(RouletteBet::High),
        other => Err(CommandError::InvalidBet(other.to_string())),
    }
}

/// Card positions are typed 1-based and stored 0-based.
fn position(word: Option<&str>) -> Result<usize, CommandError> {
    let word = word.ok_or(CommandError::Missing("card position"))?;
    match word.parse::<usize>() {
        Ok(position) if position >= 1 => Ok(position - 1),
        _ => Err(CommandError::InvalidPosition(word.to_string())),
    }
}

pub fn parse(line: &str) -> Result<Command, CommandError> {
    let lowered = line.trim().to_lowercase();
    let mut words = lowered.split_whitespace();
    let verb = words.next().ok_or(CommandError::Empty)?;

    let command = match verb {
        "dice" => {
            let bet = dice_bet(words.next())?;
            Command::Wager(Wager::Dice {
                bet,
                amount: amount(words.next())?,
            })
        }
        "slots" => Command::Wager(Wager::Slots {
            amount: amount(words.next())?,
        }),
        "blackjack" | "bj" => Command::Wager(Wager::Blackjack {
            amount: amount(words.next())?,
        }),
        "poker" => Command::Wager(Wager::VideoPoker {
            amount: amount(words.next())?,
        }),
        "bet" | "roulette" => {
            let bet = roulette_bet(words.next())?;
            Command::Wager(Wager::Roulette {
                bet,
                amount: amount(words.next())?,
            })
        }
        "hit" => Command::Action(GameType::Blackjack, Action::Hit),
        "stand" => Command::Action(GameType::Blackjack, Action::Stand),
        "hold" => {
            let index = position(words.next())?;
            Command::Action(GameType::VideoPoker, Action::ToggleHold(index))
        }
        "draw" => Command::Action(GameType::VideoPoker, Action::Draw),
        "spin" => Command::Action(GameType::Roulette, Action::Spin),
        "clear" => Command::Action(GameType::Roulette, Action::ClearBets),
        "balance" => Command::Balance,
        "rescue" => Command::Rescue,
        "mute" => Command::Mute,
        "history" => Command::History,
        "paytable" => Command::Paytable,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    match words.next() {
        Some(extra) => Err(CommandError::Trailing(extra.to_string())),
        None => Ok(command),
    }
}
