use serde::{Deserialize, Serialize};

use super::{GameType, Phase, RoundResult};

/// Closed set of topics a subscriber may listen on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    BalanceUpdated,
    BankruptcyWarning,
    BalanceReset,
    RoundSettled,
    StageChanged,
}

impl Topic {
    pub const ALL: [Topic; 5] = [
        Topic::BalanceUpdated,
        Topic::BankruptcyWarning,
        Topic::BalanceReset,
        Topic::RoundSettled,
        Topic::StageChanged,
    ];
}

/// Notifications published on the event bus. Each variant maps to exactly
/// one [`Topic`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    BalanceUpdated { balance: u64 },
    /// Balance dropped below the low-balance floor after a debit attempt.
    BankruptcyWarning { balance: u64 },
    BalanceReset { amount: u64 },
    RoundSettled { result: RoundResult },
    StageChanged { game: GameType, phase: Phase },
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::BalanceUpdated { .. } => Topic::BalanceUpdated,
            Event::BankruptcyWarning { .. } => Topic::BankruptcyWarning,
            Event::BalanceReset { .. } => Topic::BalanceReset,
            Event::RoundSettled { .. } => Topic::RoundSettled,
            Event::StageChanged { .. } => Topic::StageChanged,
        }
    }
}
