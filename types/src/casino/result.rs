use serde::{Deserialize, Serialize};

use super::{Card, DiceBet, GameType, PlacedBet};

/// Outcome label of a settled round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Win,
    /// Natural 21 on the first two cards.
    Blackjack,
    Lose,
    Push,
    /// Player went over 21.
    Bust,
    DealerBust,
}

impl Verdict {
    pub fn name(self) -> &'static str {
        match self {
            Verdict::Win => "win",
            Verdict::Blackjack => "blackjack",
            Verdict::Lose => "lose",
            Verdict::Push => "push",
            Verdict::Bust => "bust",
            Verdict::DealerBust => "dealer bust",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotSymbol {
    Cherry,
    Lemon,
    Grape,
    Diamond,
    Seven,
}

impl SlotSymbol {
    pub fn icon(self) -> &'static str {
        match self {
            SlotSymbol::Cherry => "🍒",
            SlotSymbol::Lemon => "🍋",
            SlotSymbol::Grape => "🍇",
            SlotSymbol::Diamond => "💎",
            SlotSymbol::Seven => "7️⃣",
        }
    }
}

/// Video poker hand categories, weakest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    HighCard,
    JacksOrBetter,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    RoyalFlush,
}

impl HandRank {
    pub fn name(self) -> &'static str {
        match self {
            HandRank::HighCard => "High Card",
            HandRank::JacksOrBetter => "Jacks or Better",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
            HandRank::RoyalFlush => "Royal Flush",
        }
    }
}

/// Game-specific record of how a round played out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Detail {
    Dice {
        bet: DiceBet,
        faces: [u8; 2],
    },
    Slots {
        reels: [SlotSymbol; 3],
    },
    Blackjack {
        player: Vec<Card>,
        dealer: Vec<Card>,
        player_score: u8,
        dealer_score: u8,
    },
    VideoPoker {
        hand: [Card; 5],
        rank: HandRank,
    },
    Roulette {
        pocket: u8,
        bets: Vec<PlacedBet>,
    },
}

/// A fully settled round, as published on the event bus.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub game: GameType,
    pub verdict: Verdict,
    /// Total debited for the round.
    pub staked: u64,
    /// Total credited back (stake included). Zero on a loss.
    pub payout: u64,
    pub detail: Detail,
}

impl RoundResult {
    /// Signed gain for the player.
    pub fn net(&self) -> i128 {
        self.payout as i128 - self.staked as i128
    }
}
