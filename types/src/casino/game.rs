use core::fmt;
use serde::{Deserialize, Serialize};

/// Games offered by the lobby.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameType {
    Dice,
    Slots,
    Blackjack,
    VideoPoker,
    Roulette,
}

impl GameType {
    pub const ALL: [GameType; 5] = [
        GameType::Dice,
        GameType::Slots,
        GameType::Blackjack,
        GameType::VideoPoker,
        GameType::Roulette,
    ];

    /// Whether `action` belongs to this game at all.
    pub fn offers(self, action: Action) -> bool {
        matches!(
            (self, action),
            (GameType::Blackjack, Action::Hit | Action::Stand)
                | (GameType::VideoPoker, Action::ToggleHold(_) | Action::Draw)
                | (GameType::Roulette, Action::ClearBets | Action::Spin)
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            GameType::Dice => "dice",
            GameType::Slots => "slots",
            GameType::Blackjack => "blackjack",
            GameType::VideoPoker => "video poker",
            GameType::Roulette => "roulette",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position of a table in its round state machine.
///
/// Dice and slots only use `Idle` and `Resolving`. Card games and roulette
/// use the betting/decision phases; `Resolving` is also the transient phase
/// a table holds while a stake is being taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Resolving,
    Betting,
    PlayerTurn,
    DealerAutoplay,
    Holding,
    Drawing,
    Spinning,
    Settled,
}

impl Phase {
    /// Whether a suspended transition is in flight.
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            Phase::Resolving | Phase::DealerAutoplay | Phase::Drawing | Phase::Spinning
        )
    }

    /// Transition table: whether a table of `game` in this phase takes
    /// `action`.
    pub fn accepts(self, game: GameType, action: Action) -> bool {
        game.offers(action)
            && matches!(
                (game, self),
                (GameType::Blackjack, Phase::PlayerTurn)
                    | (GameType::VideoPoker, Phase::Holding)
                    | (GameType::Roulette, Phase::Betting)
            )
    }

    /// Whether a table of `game` in this phase takes a new wager.
    pub fn accepts_wager(self, game: GameType) -> bool {
        match game {
            GameType::Dice | GameType::Slots => self == Phase::Idle,
            GameType::Blackjack | GameType::VideoPoker => {
                matches!(self, Phase::Betting | Phase::Settled)
            }
            GameType::Roulette => self == Phase::Betting,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Resolving => "resolving",
            Phase::Betting => "betting",
            Phase::PlayerTurn => "player turn",
            Phase::DealerAutoplay => "dealer autoplay",
            Phase::Holding => "holding",
            Phase::Drawing => "drawing",
            Phase::Spinning => "spinning",
            Phase::Settled => "settled",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Player decisions that follow a wager.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Hit,
    Stand,
    /// Toggle the hold mark on a dealt poker card (0-based index).
    ToggleHold(usize),
    Draw,
    ClearBets,
    Spin,
}

impl Action {
    pub fn name(self) -> &'static str {
        match self {
            Action::Hit => "hit",
            Action::Stand => "stand",
            Action::ToggleHold(_) => "hold",
            Action::Draw => "draw",
            Action::ClearBets => "clear bets",
            Action::Spin => "spin",
        }
    }
}
