//! Video Poker (Jacks or Better) implementation.
//!
//! Stages:
//! Betting -> Holding (toggle holds freely) -> Drawing (one shot) -> Settled
//!
//! Non-held cards are replaced in position order from the same deck the hand
//! was dealt from.

use super::{
    deck::{Deck, Shoe},
    lock, validate_amount, GameError, TableContext,
};
use crate::pace::Step;
use arcade_types::casino::{
    Card, Detail, GameType, HandRank, Phase, RoundResult, Verdict, POKER_HAND_SIZE,
};
use std::sync::Mutex;
use tracing::warn;

/// Jacks or Better paytable (gross multiplier), best hand first.
pub const PAYTABLE: [(HandRank, u64); 9] = [
    (HandRank::RoyalFlush, 800),
    (HandRank::StraightFlush, 50),
    (HandRank::FourOfAKind, 25),
    (HandRank::FullHouse, 9),
    (HandRank::Flush, 6),
    (HandRank::Straight, 4),
    (HandRank::ThreeOfAKind, 3),
    (HandRank::TwoPair, 2),
    (HandRank::JacksOrBetter, 1),
];

/// Lowest rank value of a paying pair (jack).
const HIGH_PAIR_MIN: u8 = 11;

/// Payout multiplier for each hand; anything not on the paytable pays 0.
pub fn multiplier(hand: HandRank) -> u64 {
    PAYTABLE
        .iter()
        .find(|(rank, _)| *rank == hand)
        .map_or(0, |(_, multiplier)| *multiplier)
}

/// Evaluate a 5-card poker hand.
pub fn evaluate(cards: &[Card; 5]) -> HandRank {
    let mut ranks = [0u8; 5];
    for (slot, card) in ranks.iter_mut().zip(cards) {
        *slot = card.rank.value();
    }
    ranks.sort_unstable();

    let suit = cards[0].suit;
    let is_flush = cards.iter().all(|card| card.suit == suit);

    let has_duplicates = ranks.windows(2).any(|pair| pair[0] == pair[1]);

    // Ace plays low in the wheel (A-2-3-4-5)
    let is_wheel = ranks == [2, 3, 4, 5, 14];
    let is_straight = !has_duplicates && (is_wheel || ranks[4] - ranks[0] == 4);
    let is_royal = ranks == [10, 11, 12, 13, 14];

    // Count rank occurrences
    let mut counts = [0u8; 15];
    for &rank in &ranks {
        counts[rank as usize] += 1;
    }

    let mut pairs = 0u8;
    let mut three_kind = false;
    let mut four_kind = false;
    let mut high_pair = false;

    for (rank, &count) in counts.iter().enumerate() {
        match count {
            2 => {
                pairs += 1;
                if rank as u8 >= HIGH_PAIR_MIN {
                    high_pair = true;
                }
            }
            3 => three_kind = true,
            4 => four_kind = true,
            _ => {}
        }
    }

    if is_straight && is_flush && is_royal {
        HandRank::RoyalFlush
    } else if is_straight && is_flush {
        HandRank::StraightFlush
    } else if four_kind {
        HandRank::FourOfAKind
    } else if three_kind && pairs == 1 {
        HandRank::FullHouse
    } else if is_flush {
        HandRank::Flush
    } else if is_straight {
        HandRank::Straight
    } else if three_kind {
        HandRank::ThreeOfAKind
    } else if pairs == 2 {
        HandRank::TwoPair
    } else if pairs == 1 && high_pair {
        HandRank::JacksOrBetter
    } else {
        HandRank::HighCard
    }
}

pub fn payout(hand: HandRank, amount: u64) -> u64 {
    amount.saturating_mul(multiplier(hand))
}

#[derive(Clone, Debug)]
struct Round {
    amount: u64,
    deck: Deck,
    hand: [Card; POKER_HAND_SIZE],
    held: [bool; POKER_HAND_SIZE],
}

impl Round {
    fn view(&self) -> PokerView {
        PokerView {
            amount: self.amount,
            hand: self.hand,
            held: self.held,
        }
    }
}

enum Stage {
    Betting,
    Staking,
    Holding(Round),
    Drawing,
    Settled(RoundResult),
}

impl Stage {
    fn phase(&self) -> Phase {
        match self {
            Stage::Betting => Phase::Betting,
            Stage::Staking => Phase::Resolving,
            Stage::Holding(_) => Phase::Holding,
            Stage::Drawing => Phase::Drawing,
            Stage::Settled(_) => Phase::Settled,
        }
    }
}

fn deal_hand(deck: &mut Deck) -> Result<[Card; POKER_HAND_SIZE], GameError> {
    Ok([
        deck.deal()?,
        deck.deal()?,
        deck.deal()?,
        deck.deal()?,
        deck.deal()?,
    ])
}

/// Dealt hand and hold marks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PokerView {
    pub amount: u64,
    pub hand: [Card; POKER_HAND_SIZE],
    pub held: [bool; POKER_HAND_SIZE],
}

pub struct VideoPoker {
    ctx: TableContext,
    shoe: Shoe,
    stage: Mutex<Stage>,
}

impl VideoPoker {
    pub fn new(ctx: TableContext) -> Self {
        Self {
            ctx,
            shoe: Deck::fresh,
            stage: Mutex::new(Stage::Betting),
        }
    }

    #[cfg(test)]
    fn with_shoe(ctx: TableContext, shoe: Shoe) -> Self {
        Self {
            shoe,
            ..Self::new(ctx)
        }
    }

    pub fn phase(&self) -> Phase {
        lock(&self.stage).phase()
    }

    pub fn view(&self) -> Option<PokerView> {
        match &*lock(&self.stage) {
            Stage::Holding(round) => Some(round.view()),
            _ => None,
        }
    }

    fn enter(&self, stage: Stage) {
        let phase = stage.phase();
        *lock(&self.stage) = stage;
        self.ctx.announce(GameType::VideoPoker, phase);
    }

    fn abort(&self, err: GameError) -> GameError {
        warn!(error = %err, "video poker round aborted");
        self.enter(Stage::Betting);
        err
    }

    pub fn deal(&self, amount: u64) -> Result<PokerView, GameError> {
        validate_amount(amount)?;
        {
            let mut stage = lock(&self.stage);
            let phase = stage.phase();
            if !phase.accepts_wager(GameType::VideoPoker) {
                return Err(GameError::IllegalActionForState {
                    action: "deal",
                    stage: phase,
                });
            }
            *stage = Stage::Staking;
        }
        if let Err(err) = self.ctx.stake(amount) {
            *lock(&self.stage) = Stage::Betting;
            return Err(err);
        }

        let mut deck = (self.shoe)(self.ctx.rng.as_ref());
        let hand = match deal_hand(&mut deck) {
            Ok(hand) => hand,
            Err(err) => return Err(self.abort(err)),
        };

        let round = Round {
            amount,
            deck,
            hand,
            held: [false; POKER_HAND_SIZE],
        };
        let view = round.view();
        self.enter(Stage::Holding(round));
        Ok(view)
    }

    /// Flips the hold mark on card `index` (0-based).
    pub fn toggle_hold(&self, index: usize) -> Result<PokerView, GameError> {
        let mut stage = lock(&self.stage);
        let phase = stage.phase();
        let Stage::Holding(round) = &mut *stage else {
            return Err(GameError::IllegalActionForState {
                action: "hold",
                stage: phase,
            });
        };
        let held = round
            .held
            .get_mut(index)
            .ok_or(GameError::InvalidSelection)?;
        *held = !*held;
        Ok(round.view())
    }

    pub async fn draw(&self) -> Result<RoundResult, GameError> {
        let mut round = {
            let mut stage = lock(&self.stage);
            match std::mem::replace(&mut *stage, Stage::Drawing) {
                Stage::Holding(round) => round,
                other => {
                    let phase = other.phase();
                    *stage = other;
                    return Err(GameError::IllegalActionForState {
                        action: "draw",
                        stage: phase,
                    });
                }
            }
        };
        self.ctx.announce(GameType::VideoPoker, Phase::Drawing);
        self.ctx.pacer.pause(Step::PokerDraw).await;

        for index in 0..POKER_HAND_SIZE {
            if round.held[index] {
                continue;
            }
            match round.deck.deal() {
                Ok(card) => round.hand[index] = card,
                Err(err) => return Err(self.abort(err)),
            }
        }

        let rank = evaluate(&round.hand);
        let payout = payout(rank, round.amount);
        let result = RoundResult {
            game: GameType::VideoPoker,
            verdict: if payout > 0 { Verdict::Win } else { Verdict::Lose },
            staked: round.amount,
            payout,
            detail: Detail::VideoPoker {
                hand: round.hand,
                rank,
            },
        };
        self.enter(Stage::Settled(result.clone()));
        Ok(self.ctx.settle(result))
    }
}
