//! Two dice, one bet on the sum against seven.
//!
//! Under 7 and over 7 pay 2x, exactly 7 pays 5x (stake included).

use super::{GameError, TableContext, Turnstile};
use crate::pace::Step;
use arcade_types::casino::{Detail, DiceBet, GameType, Phase, RoundResult, Verdict};

/// Gross multiplier for a bet given the sum of both faces.
pub fn multiplier(bet: DiceBet, sum: u8) -> u64 {
    match bet {
        DiceBet::Under7 if sum < 7 => 2,
        DiceBet::Over7 if sum > 7 => 2,
        DiceBet::Exact7 if sum == 7 => 5,
        _ => 0,
    }
}

pub fn payout(bet: DiceBet, sum: u8, amount: u64) -> u64 {
    amount.saturating_mul(multiplier(bet, sum))
}

pub struct Dice {
    ctx: TableContext,
    turnstile: Turnstile,
}

impl Dice {
    pub fn new(ctx: TableContext) -> Self {
        Self {
            ctx,
            turnstile: Turnstile::new(GameType::Dice),
        }
    }

    pub fn phase(&self) -> Phase {
        self.turnstile.phase()
    }

    /// Stakes `amount`, rolls both dice after the roll delay and settles.
    pub async fn roll(&self, bet: DiceBet, amount: u64) -> Result<RoundResult, GameError> {
        let mut pass = self.turnstile.enter(&self.ctx, "roll")?;
        self.ctx.stake(amount)?;
        pass.announce();

        self.ctx.pacer.pause(Step::DiceRoll).await;
        let faces = [
            self.ctx.rng.integer_in_range(1, 6) as u8,
            self.ctx.rng.integer_in_range(1, 6) as u8,
        ];
        let payout = payout(bet, faces[0] + faces[1], amount);

        let result = self.ctx.settle(RoundResult {
            game: GameType::Dice,
            verdict: if payout > 0 { Verdict::Win } else { Verdict::Lose },
            staked: amount,
            payout,
            detail: Detail::Dice { bet, faces },
        });
        drop(pass);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{shared_table, table, ScriptedRandom};
    use arcade_types::casino::Topic;
    use std::sync::Arc;

    fn dice(opening: u64, faces: [u32; 2]) -> (Dice, crate::mocks::Recorder) {
        let rng = ScriptedRandom::new()
            .then_integer(faces[0], 1, 6)
            .then_integer(faces[1], 1, 6);
        let (ctx, recorder) = table(opening, rng);
        (Dice::new(ctx), recorder)
    }

    #[test]
    fn test_multipliers() {
        assert_eq!(payout(DiceBet::Under7, 6, 10), 20);
        assert_eq!(payout(DiceBet::Under7, 8, 10), 0);
        assert_eq!(payout(DiceBet::Under7, 7, 10), 0);
        assert_eq!(payout(DiceBet::Over7, 8, 10), 20);
        assert_eq!(payout(DiceBet::Over7, 7, 10), 0);
        assert_eq!(payout(DiceBet::Exact7, 7, 10), 50);
        assert_eq!(payout(DiceBet::Exact7, 12, 10), 0);
    }

    #[tokio::test]
    async fn test_under7_win() {
        let (dice, recorder) = dice(100, [2, 4]);
        let result = dice.roll(DiceBet::Under7, 10).await.unwrap();
        assert_eq!(result.verdict, Verdict::Win);
        assert_eq!(result.payout, 20);
        assert_eq!(
            result.detail,
            Detail::Dice {
                bet: DiceBet::Under7,
                faces: [2, 4]
            }
        );
        assert_eq!(dice.ctx.ledger.query(), 110);
        assert_eq!(recorder.settled(), vec![result]);
        assert_eq!(dice.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_under7_loss_on_eight() {
        let (dice, _recorder) = dice(100, [4, 4]);
        let result = dice.roll(DiceBet::Under7, 10).await.unwrap();
        assert_eq!(result.verdict, Verdict::Lose);
        assert_eq!(result.payout, 0);
        assert_eq!(dice.ctx.ledger.query(), 90);
    }

    #[tokio::test]
    async fn test_exact7_pays_five() {
        let (dice, _recorder) = dice(100, [3, 4]);
        let result = dice.roll(DiceBet::Exact7, 10).await.unwrap();
        assert_eq!(result.payout, 50);
        assert_eq!(dice.ctx.ledger.query(), 140);
    }

    #[tokio::test]
    async fn test_insufficient_funds_leaves_table_idle() {
        let rng = Arc::new(
            ScriptedRandom::new()
                .then_integer(1, 1, 6)
                .then_integer(1, 1, 6),
        );
        let (ctx, recorder) = shared_table(5, rng.clone());
        let dice = Dice::new(ctx);
        let err = dice.roll(DiceBet::Over7, 10).await.unwrap_err();
        assert_eq!(
            err,
            GameError::InsufficientFunds {
                balance: 5,
                required: 10
            }
        );
        assert_eq!(dice.ctx.ledger.query(), 5);
        assert_eq!(dice.phase(), Phase::Idle);
        assert_eq!(recorder.count(Topic::RoundSettled), 0);
        assert_eq!(recorder.count(Topic::StageChanged), 0);
        assert_eq!(dice.ctx.ledger.totals().debited, 0);
        // Nothing was drawn
        assert_eq!(rng.remaining(), 2);
    }

    #[tokio::test]
    async fn test_zero_amount_rejected() {
        let (dice, recorder) = dice(100, [1, 1]);
        assert_eq!(
            dice.roll(DiceBet::Under7, 0).await,
            Err(GameError::InvalidWagerAmount)
        );
        assert!(recorder.events().is_empty());
    }

    #[tokio::test]
    async fn test_stage_announcements() {
        let (dice, recorder) = dice(100, [6, 6]);
        dice.roll(DiceBet::Over7, 10).await.unwrap();
        let phases: Vec<Phase> = recorder
            .events()
            .into_iter()
            .filter_map(|event| match event {
                arcade_types::casino::Event::StageChanged { phase, .. } => Some(phase),
                _ => None,
            })
            .collect();
        assert_eq!(phases, vec![Phase::Resolving, Phase::Idle]);
    }
}
