//! Casino game execution module.
//!
//! One table per game:
//! - Dice
//! - Slots
//! - Blackjack
//! - Video Poker
//! - Roulette
//!
//! Every table shares a [`TableContext`]: the ledger it stakes against and
//! credits, the random source it draws from, and the pacer that spaces out
//! its suspension points.

pub mod blackjack;
pub mod deck;
pub mod dice;
pub mod roulette;
pub mod slots;
pub mod video_poker;

use crate::{ledger::Ledger, pace::Pacer, rng::RandomSource};
use arcade_types::casino::{Event, GameType, Phase, RoundResult};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::info;

/// Error during game execution.
///
/// Every variant is recoverable: the table is left in a state that accepts a
/// valid retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("insufficient funds: balance {balance}, required {required}")]
    InsufficientFunds { balance: u64, required: u64 },
    #[error("wager amount must be positive")]
    InvalidWagerAmount,
    #[error("selection out of range")]
    InvalidSelection,
    #[error("cannot {action} while {stage}")]
    IllegalActionForState { action: &'static str, stage: Phase },
    #[error("{action} is not a {game} action")]
    UnsupportedAction { game: GameType, action: &'static str },
    #[error("no bets on the layout")]
    NoActiveBets,
    /// Deck is exhausted (no more cards to draw).
    #[error("deck exhausted, round aborted")]
    DeckExhausted,
    #[error("symbol weights must be non-negative and sum to 1.0")]
    InvalidPaytable,
}

pub(crate) fn validate_amount(amount: u64) -> Result<(), GameError> {
    if amount == 0 {
        return Err(GameError::InvalidWagerAmount);
    }
    Ok(())
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared services handed to every table.
#[derive(Clone)]
pub struct TableContext {
    pub ledger: Arc<Ledger>,
    pub rng: Arc<dyn RandomSource>,
    pub pacer: Pacer,
}

impl TableContext {
    pub fn new(ledger: Arc<Ledger>, rng: Arc<dyn RandomSource>, pacer: Pacer) -> Self {
        Self { ledger, rng, pacer }
    }

    pub(crate) fn announce(&self, game: GameType, phase: Phase) {
        self.ledger
            .bus()
            .publish(Event::StageChanged { game, phase });
    }

    /// Debits a validated stake.
    pub(crate) fn stake(&self, amount: u64) -> Result<(), GameError> {
        validate_amount(amount)?;
        if self.ledger.debit(amount) {
            Ok(())
        } else {
            Err(GameError::InsufficientFunds {
                balance: self.ledger.query(),
                required: amount,
            })
        }
    }

    /// Credits any payout and publishes the settlement.
    pub(crate) fn settle(&self, result: RoundResult) -> RoundResult {
        if result.payout > 0 {
            self.ledger.credit(result.payout);
        }
        info!(
            game = %result.game,
            verdict = result.verdict.name(),
            staked = result.staked,
            payout = result.payout,
            "round settled"
        );
        self.ledger.bus().publish(Event::RoundSettled {
            result: result.clone(),
        });
        result
    }
}

/// Busy guard for the single-step games (`Idle -> Resolving -> Idle`).
pub(crate) struct Turnstile {
    game: GameType,
    phase: Mutex<Phase>,
}

impl Turnstile {
    pub(crate) fn new(game: GameType) -> Self {
        Self {
            game,
            phase: Mutex::new(Phase::Idle),
        }
    }

    pub(crate) fn phase(&self) -> Phase {
        *lock(&self.phase)
    }

    /// Claims the table for one round. Rejected if a round is in flight.
    pub(crate) fn enter<'a>(
        &'a self,
        ctx: &'a TableContext,
        action: &'static str,
    ) -> Result<Pass<'a>, GameError> {
        let mut phase = lock(&self.phase);
        if !phase.accepts_wager(self.game) {
            return Err(GameError::IllegalActionForState {
                action,
                stage: *phase,
            });
        }
        *phase = Phase::Resolving;
        Ok(Pass {
            turnstile: self,
            ctx,
            announced: false,
        })
    }
}

/// Held for the duration of a round; returns the table to `Idle` on drop.
pub(crate) struct Pass<'a> {
    turnstile: &'a Turnstile,
    ctx: &'a TableContext,
    announced: bool,
}

impl Pass<'_> {
    pub(crate) fn announce(&mut self) {
        self.announced = true;
        self.ctx.announce(self.turnstile.game, Phase::Resolving);
    }
}

impl Drop for Pass<'_> {
    fn drop(&mut self) {
        *lock(&self.turnstile.phase) = Phase::Idle;
        if self.announced {
            self.ctx.announce(self.turnstile.game, Phase::Idle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{table, ScriptedRandom};
    use arcade_types::casino::{Detail, DiceBet, Topic, Verdict};

    #[test]
    fn test_stake_rejects_zero() {
        let (ctx, recorder) = table(100, ScriptedRandom::new());
        assert_eq!(ctx.stake(0), Err(GameError::InvalidWagerAmount));
        assert_eq!(ctx.ledger.query(), 100);
        assert!(recorder.events().is_empty());
    }

    #[test]
    fn test_stake_reports_insufficient_funds() {
        let (ctx, _recorder) = table(40, ScriptedRandom::new());
        assert_eq!(
            ctx.stake(50),
            Err(GameError::InsufficientFunds {
                balance: 40,
                required: 50
            })
        );
        assert_eq!(ctx.ledger.query(), 40);
    }

    #[test]
    fn test_settle_credits_and_publishes() {
        let (ctx, recorder) = table(100, ScriptedRandom::new());
        let result = RoundResult {
            game: GameType::Dice,
            verdict: Verdict::Win,
            staked: 10,
            payout: 20,
            detail: Detail::Dice {
                bet: DiceBet::Under7,
                faces: [2, 3],
            },
        };
        ctx.settle(result.clone());
        assert_eq!(ctx.ledger.query(), 120);
        assert_eq!(recorder.settled(), vec![result]);
    }

    #[test]
    fn test_settle_zero_payout_skips_credit() {
        let (ctx, recorder) = table(100, ScriptedRandom::new());
        ctx.settle(RoundResult {
            game: GameType::Dice,
            verdict: Verdict::Lose,
            staked: 10,
            payout: 0,
            detail: Detail::Dice {
                bet: DiceBet::Over7,
                faces: [1, 1],
            },
        });
        assert_eq!(recorder.count(Topic::BalanceUpdated), 0);
        assert_eq!(recorder.count(Topic::RoundSettled), 1);
    }

    #[test]
    fn test_turnstile_rejects_while_held() {
        let (ctx, recorder) = table(100, ScriptedRandom::new());
        let turnstile = Turnstile::new(GameType::Slots);
        {
            let mut pass = turnstile.enter(&ctx, "spin").unwrap();
            pass.announce();
            assert_eq!(turnstile.phase(), Phase::Resolving);
            assert!(matches!(
                turnstile.enter(&ctx, "spin"),
                Err(GameError::IllegalActionForState {
                    stage: Phase::Resolving,
                    ..
                })
            ));
        }
        assert_eq!(turnstile.phase(), Phase::Idle);
        assert_eq!(recorder.count(Topic::StageChanged), 2);
    }
}
