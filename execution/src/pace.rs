use std::time::Duration;

/// Suspension points in a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    DiceRoll,
    SlotsSpin,
    /// Before each dealer card.
    DealerDraw,
    PokerDraw,
    RouletteSpin,
}

/// Delay provider for the timed waits between a round's steps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pacer {
    pub dice_roll: Duration,
    pub slots_spin: Duration,
    pub dealer_draw: Duration,
    pub poker_draw: Duration,
    pub roulette_spin: Duration,
}

impl Pacer {
    /// All waits zero. Rounds still yield at every suspension point.
    pub fn instant() -> Self {
        Self::default()
    }

    pub fn with(mut self, step: Step, duration: Duration) -> Self {
        *self.slot(step) = duration;
        self
    }

    fn slot(&mut self, step: Step) -> &mut Duration {
        match step {
            Step::DiceRoll => &mut self.dice_roll,
            Step::SlotsSpin => &mut self.slots_spin,
            Step::DealerDraw => &mut self.dealer_draw,
            Step::PokerDraw => &mut self.poker_draw,
            Step::RouletteSpin => &mut self.roulette_spin,
        }
    }

    pub fn delay(&self, step: Step) -> Duration {
        match step {
            Step::DiceRoll => self.dice_roll,
            Step::SlotsSpin => self.slots_spin,
            Step::DealerDraw => self.dealer_draw,
            Step::PokerDraw => self.poker_draw,
            Step::RouletteSpin => self.roulette_spin,
        }
    }

    pub async fn pause(&self, step: Step) {
        let delay = self.delay(step);
        if delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_overrides_single_step() {
        let pacer = Pacer::instant().with(Step::DealerDraw, Duration::from_millis(800));
        assert_eq!(pacer.delay(Step::DealerDraw), Duration::from_millis(800));
        assert_eq!(pacer.delay(Step::RouletteSpin), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_pause_waits_configured_delay() {
        let pacer = Pacer::instant().with(Step::RouletteSpin, Duration::from_millis(20));
        let start = tokio::time::Instant::now();
        pacer.pause(Step::RouletteSpin).await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
