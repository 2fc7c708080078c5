use core::fmt;
use serde::{Deserialize, Serialize};

use super::GameType;

/// Dice bet on the sum of two faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiceBet {
    Under7,
    Over7,
    Exact7,
}

/// Roulette layout positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouletteBet {
    /// Single number 0..=36 (35:1).
    Straight(u8),
    Red,
    Black,
    Odd,
    Even,
    /// 1-18
    Low,
    /// 19-36
    High,
}

impl fmt::Display for RouletteBet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouletteBet::Straight(number) => write!(f, "#{number}"),
            RouletteBet::Red => f.write_str("red"),
            RouletteBet::Black => f.write_str("black"),
            RouletteBet::Odd => f.write_str("odd"),
            RouletteBet::Even => f.write_str("even"),
            RouletteBet::Low => f.write_str("1-18"),
            RouletteBet::High => f.write_str("19-36"),
        }
    }
}

/// A roulette bet accepted onto the layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedBet {
    pub bet: RouletteBet,
    pub amount: u64,
}

/// A stake submitted to one of the tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wager {
    Dice { bet: DiceBet, amount: u64 },
    Slots { amount: u64 },
    Blackjack { amount: u64 },
    VideoPoker { amount: u64 },
    /// May be submitted repeatedly before a spin.
    Roulette { bet: RouletteBet, amount: u64 },
}

impl Wager {
    pub fn game(&self) -> GameType {
        match self {
            Wager::Dice { .. } => GameType::Dice,
            Wager::Slots { .. } => GameType::Slots,
            Wager::Blackjack { .. } => GameType::Blackjack,
            Wager::VideoPoker { .. } => GameType::VideoPoker,
            Wager::Roulette { .. } => GameType::Roulette,
        }
    }

    pub fn amount(&self) -> u64 {
        match *self {
            Wager::Dice { amount, .. }
            | Wager::Slots { amount }
            | Wager::Blackjack { amount }
            | Wager::VideoPoker { amount }
            | Wager::Roulette { amount, .. } => amount,
        }
    }
}
