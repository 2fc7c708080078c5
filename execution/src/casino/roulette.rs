//! European roulette (single zero).
//!
//! Bets are debited as they are placed and can be refunded together until the
//! wheel spins. A spin settles every bet on the layout against one pocket.

use super::{lock, validate_amount, GameError, TableContext};
use crate::pace::Step;
use arcade_types::casino::{
    Detail, GameType, Phase, PlacedBet, RouletteBet, RoundResult, Verdict, ROULETTE_MAX_POCKET,
};
use std::sync::Mutex;

/// Red numbers on a European wheel.
pub const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

pub fn is_red(pocket: u8) -> bool {
    RED_NUMBERS.contains(&pocket)
}

/// Whether `bet` wins on `pocket`. Zero loses every outside bet.
pub fn bet_wins(bet: RouletteBet, pocket: u8) -> bool {
    if let RouletteBet::Straight(number) = bet {
        return number == pocket;
    }
    if pocket == 0 {
        return false;
    }
    match bet {
        RouletteBet::Red => is_red(pocket),
        RouletteBet::Black => !is_red(pocket),
        RouletteBet::Odd => pocket % 2 == 1,
        RouletteBet::Even => pocket % 2 == 0,
        RouletteBet::Low => pocket <= 18,
        RouletteBet::High => pocket >= 19,
        RouletteBet::Straight(_) => false,
    }
}

/// Odds paid on a win (the stake is returned on top).
pub fn multiplier(bet: RouletteBet) -> u64 {
    match bet {
        RouletteBet::Straight(_) => 35,
        _ => 1,
    }
}

/// Gross return of one bet on `pocket`.
pub fn payout(bet: &PlacedBet, pocket: u8) -> u64 {
    if bet_wins(bet.bet, pocket) {
        bet.amount.saturating_mul(multiplier(bet.bet) + 1)
    } else {
        0
    }
}

/// Sum of the stakes on a layout, saturating at `u64::MAX`.
fn layout_total(bets: &[PlacedBet]) -> u64 {
    bets.iter()
        .map(|placed| placed.amount)
        .fold(0, u64::saturating_add)
}

enum Stage {
    Betting(Vec<PlacedBet>),
    /// A bet's stake is being taken.
    Staking,
    Spinning,
}

impl Stage {
    fn phase(&self) -> Phase {
        match self {
            Stage::Betting(_) => Phase::Betting,
            Stage::Staking => Phase::Resolving,
            Stage::Spinning => Phase::Spinning,
        }
    }
}

pub struct Roulette {
    ctx: TableContext,
    stage: Mutex<Stage>,
}

impl Roulette {
    pub fn new(ctx: TableContext) -> Self {
        Self {
            ctx,
            stage: Mutex::new(Stage::Betting(Vec::new())),
        }
    }

    pub fn phase(&self) -> Phase {
        lock(&self.stage).phase()
    }

    /// Bets currently on the layout.
    pub fn pending(&self) -> Vec<PlacedBet> {
        match &*lock(&self.stage) {
            Stage::Betting(bets) => bets.clone(),
            _ => Vec::new(),
        }
    }

    fn take_layout(&self, action: &'static str, next: Stage) -> Result<Vec<PlacedBet>, GameError> {
        let mut stage = lock(&self.stage);
        match std::mem::replace(&mut *stage, next) {
            Stage::Betting(bets) => Ok(bets),
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

    fn restore_layout(&self, bets: Vec<PlacedBet>) {
        *lock(&self.stage) = Stage::Betting(bets);
    }

    /// Debits and places a bet. Returns the total now on the layout.
    pub fn place_bet(&self, bet: RouletteBet, amount: u64) -> Result<u64, GameError> {
        validate_amount(amount)?;
        if matches!(bet, RouletteBet::Straight(number) if number > ROULETTE_MAX_POCKET) {
            return Err(GameError::InvalidSelection);
        }

        let mut bets = self.take_layout("bet", Stage::Staking)?;
        if let Err(err) = self.ctx.stake(amount) {
            self.restore_layout(bets);
            return Err(err);
        }
        bets.push(PlacedBet { bet, amount });
        let total = layout_total(&bets);
        self.restore_layout(bets);
        Ok(total)
    }

    /// Returns every pending stake in one credit. Returns the refunded total.
    pub fn clear_bets(&self) -> Result<u64, GameError> {
        let bets = self.take_layout("clear bets", Stage::Betting(Vec::new()))?;
        let total = layout_total(&bets);
        if total > 0 {
            self.ctx.ledger.credit(total);
        }
        Ok(total)
    }

    pub async fn spin(&self) -> Result<RoundResult, GameError> {
        let bets = self.take_layout("spin", Stage::Spinning)?;
        if bets.is_empty() {
            self.restore_layout(bets);
            return Err(GameError::NoActiveBets);
        }
        self.ctx.announce(GameType::Roulette, Phase::Spinning);

        let pocket = self.ctx.rng.integer_in_range(0, ROULETTE_MAX_POCKET as u32) as u8;
        self.ctx.pacer.pause(Step::RouletteSpin).await;

        let staked = layout_total(&bets);
        let winnings = bets
            .iter()
            .map(|placed| payout(placed, pocket))
            .fold(0, u64::saturating_add);
        let result = RoundResult {
            game: GameType::Roulette,
            verdict: if winnings > 0 {
                Verdict::Win
            } else {
                Verdict::Lose
            },
            staked,
            payout: winnings,
            detail: Detail::Roulette { pocket, bets },
        };

        self.restore_layout(Vec::new());
        self.ctx.announce(GameType::Roulette, Phase::Betting);
        Ok(self.ctx.settle(result))
    }
}
