//! Three-reel slots with a weighted symbol table.

use super::{GameError, TableContext, Turnstile};
use crate::{pace::Step, rng::RandomSource};
use arcade_types::casino::{Detail, GameType, Phase, RoundResult, SlotSymbol, Verdict};

/// Probability and triple payout of a reel symbol.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SymbolOdds {
    pub symbol: SlotSymbol,
    pub weight: f64,
    /// Multiplier when all three reels show this symbol.
    pub value: u64,
}

pub const DEFAULT_SYMBOLS: [SymbolOdds; 5] = [
    SymbolOdds {
        symbol: SlotSymbol::Cherry,
        weight: 0.40,
        value: 3,
    },
    SymbolOdds {
        symbol: SlotSymbol::Lemon,
        weight: 0.30,
        value: 5,
    },
    SymbolOdds {
        symbol: SlotSymbol::Grape,
        weight: 0.15,
        value: 10,
    },
    SymbolOdds {
        symbol: SlotSymbol::Diamond,
        weight: 0.10,
        value: 20,
    },
    SymbolOdds {
        symbol: SlotSymbol::Seven,
        weight: 0.05,
        value: 50,
    },
];

const WEIGHT_TOLERANCE: f64 = 1e-9;

#[derive(Clone, Debug, PartialEq)]
pub struct Paytable {
    symbols: Vec<SymbolOdds>,
}

impl Default for Paytable {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.to_vec(),
        }
    }
}

impl Paytable {
    /// Weights must be non-negative and sum to 1.0.
    pub fn new(symbols: Vec<SymbolOdds>) -> Result<Self, GameError> {
        let negative = symbols
            .iter()
            .any(|odds| odds.weight.is_nan() || odds.weight < 0.0);
        if symbols.is_empty() || negative {
            return Err(GameError::InvalidPaytable);
        }
        let total: f64 = symbols.iter().map(|odds| odds.weight).sum();
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(GameError::InvalidPaytable);
        }
        Ok(Self { symbols })
    }

    pub fn symbols(&self) -> &[SymbolOdds] {
        &self.symbols
    }

    /// Cumulative-weight scan. Rounding fall-through lands on the first symbol.
    pub fn sample(&self, rng: &dyn RandomSource) -> SlotSymbol {
        let draw = rng.uniform();
        let mut cumulative = 0.0;
        for odds in &self.symbols {
            cumulative += odds.weight;
            if draw < cumulative {
                return odds.symbol;
            }
        }
        self.symbols[0].symbol
    }

    pub fn value(&self, symbol: SlotSymbol) -> u64 {
        self.symbols
            .iter()
            .find(|odds| odds.symbol == symbol)
            .map_or(0, |odds| odds.value)
    }

    /// Triple pays the symbol value, two or more cherries pay 1x.
    pub fn payout(&self, reels: &[SlotSymbol; 3], amount: u64) -> u64 {
        if reels[0] == reels[1] && reels[1] == reels[2] {
            return amount.saturating_mul(self.value(reels[0]));
        }
        let cherries = reels
            .iter()
            .filter(|symbol| **symbol == SlotSymbol::Cherry)
            .count();
        if cherries >= 2 {
            amount
        } else {
            0
        }
    }
}

pub struct Slots {
    ctx: TableContext,
    paytable: Paytable,
    turnstile: Turnstile,
}

impl Slots {
    pub fn new(ctx: TableContext, paytable: Paytable) -> Self {
        Self {
            ctx,
            paytable,
            turnstile: Turnstile::new(GameType::Slots),
        }
    }

    pub fn phase(&self) -> Phase {
        self.turnstile.phase()
    }

    pub fn paytable(&self) -> &Paytable {
        &self.paytable
    }

    pub async fn spin(&self, amount: u64) -> Result<RoundResult, GameError> {
        let mut pass = self.turnstile.enter(&self.ctx, "spin")?;
        self.ctx.stake(amount)?;
        pass.announce();

        // Outcome is fixed before the reels stop.
        let rng = self.ctx.rng.as_ref();
        let reels = [
            self.paytable.sample(rng),
            self.paytable.sample(rng),
            self.paytable.sample(rng),
        ];
        self.ctx.pacer.pause(Step::SlotsSpin).await;

        let payout = self.paytable.payout(&reels, amount);
        let result = self.ctx.settle(RoundResult {
            game: GameType::Slots,
            verdict: if payout > 0 { Verdict::Win } else { Verdict::Lose },
            staked: amount,
            payout,
            detail: Detail::Slots { reels },
        });
        drop(pass);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{table, ScriptedRandom};
    use SlotSymbol::*;

    #[test]
    fn test_default_weights_valid() {
        assert!(Paytable::new(DEFAULT_SYMBOLS.to_vec()).is_ok());
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let mut symbols = DEFAULT_SYMBOLS.to_vec();
        symbols[0].weight = 0.5;
        assert_eq!(Paytable::new(symbols), Err(GameError::InvalidPaytable));

        let mut symbols = DEFAULT_SYMBOLS.to_vec();
        symbols[0].weight = -0.1;
        symbols[1].weight = 0.8;
        assert_eq!(Paytable::new(symbols), Err(GameError::InvalidPaytable));

        assert_eq!(Paytable::new(Vec::new()), Err(GameError::InvalidPaytable));
    }

    #[test]
    fn test_sample_boundaries() {
        let paytable = Paytable::default();
        let cases = [
            (0.0, Cherry),
            (0.399, Cherry),
            (0.40, Lemon),
            (0.69, Lemon),
            (0.71, Grape),
            (0.86, Diamond),
            (0.96, Seven),
            (0.999_999, Seven),
        ];
        for (draw, expected) in cases {
            let rng = ScriptedRandom::new().then_uniform(draw);
            assert_eq!(paytable.sample(&rng), expected, "draw {draw}");
        }
    }

    #[test]
    fn test_sample_fall_through_returns_first() {
        let paytable = Paytable::new(vec![
            SymbolOdds {
                symbol: Lemon,
                weight: 0.0,
                value: 5,
            },
            SymbolOdds {
                symbol: Seven,
                weight: 1.0 - 1e-10,
                value: 50,
            },
        ])
        .unwrap();
        let rng = ScriptedRandom::new().then_uniform(0.999_999_999_99);
        assert_eq!(paytable.sample(&rng), Lemon);
    }

    #[test]
    fn test_payouts() {
        let paytable = Paytable::default();
        assert_eq!(paytable.payout(&[Seven, Seven, Seven], 10), 500);
        assert_eq!(paytable.payout(&[Cherry, Cherry, Cherry], 10), 30);
        assert_eq!(paytable.payout(&[Cherry, Lemon, Cherry], 10), 10);
        assert_eq!(paytable.payout(&[Cherry, Lemon, Grape], 10), 0);
        assert_eq!(paytable.payout(&[Lemon, Lemon, Grape], 10), 0);
    }

    #[tokio::test]
    async fn test_spin_triple_diamond() {
        let rng = ScriptedRandom::new()
            .then_uniform(0.9)
            .then_uniform(0.9)
            .then_uniform(0.9);
        let (ctx, recorder) = table(100, rng);
        let slots = Slots::new(ctx, Paytable::default());
        let result = slots.spin(5).await.unwrap();
        assert_eq!(
            result.detail,
            Detail::Slots {
                reels: [Diamond, Diamond, Diamond]
            }
        );
        assert_eq!(result.payout, 100);
        assert_eq!(slots.ctx.ledger.query(), 195);
        assert_eq!(recorder.settled().len(), 1);
        assert_eq!(slots.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_spin_loss() {
        let rng = ScriptedRandom::new()
            .then_uniform(0.0)
            .then_uniform(0.5)
            .then_uniform(0.75);
        let (ctx, _recorder) = table(100, rng);
        let slots = Slots::new(ctx, Paytable::default());
        let result = slots.spin(20).await.unwrap();
        assert_eq!(result.verdict, Verdict::Lose);
        assert_eq!(slots.ctx.ledger.query(), 80);
    }
}
