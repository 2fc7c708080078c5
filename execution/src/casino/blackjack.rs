//! Blackjack against a dealer who draws to 17.
//!
//! Stages:
//! Betting -> PlayerTurn (hit* | stand) -> DealerAutoplay -> Settled
//!
//! A natural 21 on the deal skips the player turn. `Settled` accepts a new
//! deal. Each round shuffles a fresh deck; cards are dealt player, player,
//! dealer, dealer.

use super::{
    deck::{Deck, Shoe},
    lock, validate_amount, GameError, TableContext,
};
use crate::pace::Step;
use arcade_types::casino::{
    Card, Detail, GameType, Phase, Rank, RoundResult, Verdict, BLACKJACK, DEALER_STANDS_ON,
};
use std::sync::Mutex;
use tracing::warn;

/// Blackjack weight: face cards 10, ace 11 (reduced later when soft).
pub fn card_weight(card: &Card) -> u8 {
    match card.rank {
        Rank::Ace => 11,
        Rank::Jack | Rank::Queen | Rank::King => 10,
        rank => rank.value(),
    }
}

/// Calculate the value of a blackjack hand and whether an ace still counts 11.
pub fn hand_value(cards: &[Card]) -> (u8, bool) {
    let mut value: u16 = 0;
    let mut aces: u8 = 0;

    for card in cards {
        if card.rank == Rank::Ace {
            aces += 1;
        }
        value += card_weight(card) as u16;
    }

    while value > BLACKJACK as u16 && aces > 0 {
        value -= 10;
        aces -= 1;
    }

    let is_soft = aces > 0;
    (value.min(u8::MAX as u16) as u8, is_soft)
}

pub fn score(cards: &[Card]) -> u8 {
    hand_value(cards).0
}

/// Two-card 21.
pub fn is_natural(cards: &[Card]) -> bool {
    cards.len() == 2 && score(cards) == BLACKJACK
}

/// Compare final hands. Returns the verdict and the gross payout.
///
/// A dealer bust pays even money to any standing hand, naturals included;
/// a natural beating a standing dealer pays 3:2 (rounded down).
pub fn resolve(player: &[Card], dealer: &[Card], amount: u64) -> (Verdict, u64) {
    let player_score = score(player);
    let dealer_score = score(dealer);

    if player_score > BLACKJACK {
        (Verdict::Bust, 0)
    } else if dealer_score > BLACKJACK {
        (Verdict::DealerBust, amount.saturating_mul(2))
    } else if player_score > dealer_score {
        if is_natural(player) {
            (Verdict::Blackjack, amount.saturating_mul(5) / 2)
        } else {
            (Verdict::Win, amount.saturating_mul(2))
        }
    } else if player_score < dealer_score {
        (Verdict::Lose, 0)
    } else {
        (Verdict::Push, amount)
    }
}

#[derive(Clone, Debug)]
struct Round {
    amount: u64,
    deck: Deck,
    player: Vec<Card>,
    dealer: Vec<Card>,
}

impl Round {
    fn deal(amount: u64, mut deck: Deck) -> Result<Self, GameError> {
        let player = vec![deck.deal()?, deck.deal()?];
        let dealer = vec![deck.deal()?, deck.deal()?];
        Ok(Self {
            amount,
            deck,
            player,
            dealer,
        })
    }

    fn view(&self) -> BlackjackView {
        let (player_score, soft) = hand_value(&self.player);
        BlackjackView {
            amount: self.amount,
            player: self.player.clone(),
            player_score,
            soft,
            dealer_upcard: self.dealer[0],
        }
    }

    fn settle(self) -> RoundResult {
        let (verdict, payout) = resolve(&self.player, &self.dealer, self.amount);
        RoundResult {
            game: GameType::Blackjack,
            verdict,
            staked: self.amount,
            payout,
            detail: Detail::Blackjack {
                player_score: score(&self.player),
                dealer_score: score(&self.dealer),
                player: self.player,
                dealer: self.dealer,
            },
        }
    }
}

enum Stage {
    Betting,
    /// Stake being taken for a new deal.
    Staking,
    PlayerTurn(Round),
    DealerAutoplay,
    Settled(RoundResult),
}

impl Stage {
    fn phase(&self) -> Phase {
        match self {
            Stage::Betting => Phase::Betting,
            Stage::Staking => Phase::Resolving,
            Stage::PlayerTurn(_) => Phase::PlayerTurn,
            Stage::DealerAutoplay => Phase::DealerAutoplay,
            Stage::Settled(_) => Phase::Settled,
        }
    }
}

/// What the player sees during their turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlackjackView {
    pub amount: u64,
    pub player: Vec<Card>,
    pub player_score: u8,
    pub soft: bool,
    pub dealer_upcard: Card,
}

/// Outcome of a deal or a hit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Play {
    /// Player to act.
    Continue(BlackjackView),
    Settled(RoundResult),
}

pub struct Blackjack {
    ctx: TableContext,
    shoe: Shoe,
    stage: Mutex<Stage>,
}

impl Blackjack {
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

    /// The player's hand while it is their turn.
    pub fn view(&self) -> Option<BlackjackView> {
        match &*lock(&self.stage) {
            Stage::PlayerTurn(round) => Some(round.view()),
            _ => None,
        }
    }

    /// The last settled round, until the next deal.
    pub fn last_result(&self) -> Option<RoundResult> {
        match &*lock(&self.stage) {
            Stage::Settled(result) => Some(result.clone()),
            _ => None,
        }
    }

    fn enter(&self, stage: Stage) {
        let phase = stage.phase();
        *lock(&self.stage) = stage;
        self.ctx.announce(GameType::Blackjack, phase);
    }

    fn abort(&self, err: GameError) -> GameError {
        warn!(error = %err, "blackjack round aborted");
        self.enter(Stage::Betting);
        err
    }

    pub async fn deal(&self, amount: u64) -> Result<Play, GameError> {
        validate_amount(amount)?;
        {
            let mut stage = lock(&self.stage);
            let phase = stage.phase();
            if !phase.accepts_wager(GameType::Blackjack) {
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

        let round = match Round::deal(amount, (self.shoe)(self.ctx.rng.as_ref())) {
            Ok(round) => round,
            Err(err) => return Err(self.abort(err)),
        };
        if is_natural(&round.player) {
            self.enter(Stage::DealerAutoplay);
            return self.dealer_play(round).await.map(Play::Settled);
        }

        let view = round.view();
        self.enter(Stage::PlayerTurn(round));
        Ok(Play::Continue(view))
    }

    pub fn hit(&self) -> Result<Play, GameError> {
        let mut round = self.take_turn("hit")?;
        match round.deck.deal() {
            Ok(card) => round.player.push(card),
            Err(err) => return Err(self.abort(err)),
        }

        if score(&round.player) > BLACKJACK {
            let result = round.settle();
            self.enter(Stage::Settled(result.clone()));
            return Ok(Play::Settled(self.ctx.settle(result)));
        }

        let view = round.view();
        *lock(&self.stage) = Stage::PlayerTurn(round);
        Ok(Play::Continue(view))
    }

    pub async fn stand(&self) -> Result<RoundResult, GameError> {
        let round = self.take_turn("stand")?;
        self.enter(Stage::DealerAutoplay);
        self.dealer_play(round).await
    }

    /// Removes the live round, leaving the table busy until it is put back.
    fn take_turn(&self, action: &'static str) -> Result<Round, GameError> {
        let mut stage = lock(&self.stage);
        match std::mem::replace(&mut *stage, Stage::DealerAutoplay) {
            Stage::PlayerTurn(round) => Ok(round),
            other => {
                let phase = other.phase();
                *stage = other;
                Err(GameError::IllegalActionForState {
                    action,
                    stage: phase,
                })
            }
        }
    }

    /// Dealer draws one paced card at a time while under 17.
    async fn dealer_play(&self, mut round: Round) -> Result<RoundResult, GameError> {
        while score(&round.dealer) < DEALER_STANDS_ON {
            self.ctx.pacer.pause(Step::DealerDraw).await;
            match round.deck.deal() {
                Ok(card) => round.dealer.push(card),
                Err(err) => return Err(self.abort(err)),
            }
        }

        let result = round.settle();
        self.enter(Stage::Settled(result.clone()));
        Ok(self.ctx.settle(result))
    }
}
