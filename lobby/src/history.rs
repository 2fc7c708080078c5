//! Recent settled rounds, newest last.

use arcade_execution::{EventBus, Subscription};
use arcade_types::casino::{Event, RoundResult, Topic};
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

type Rounds = Arc<Mutex<VecDeque<RoundResult>>>;

fn locked(rounds: &Rounds) -> MutexGuard<'_, VecDeque<RoundResult>> {
    rounds.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct History {
    limit: usize,
    rounds: Rounds,
    subscription: Option<Subscription>,
}

impl History {
    /// Records every [`Event::RoundSettled`] on `bus`, keeping at most `limit`.
    pub fn attach(bus: &EventBus, limit: usize) -> Self {
        let recorded = Rounds::default();
        let sink = recorded.clone();
        let subscription = bus.subscribe(Topic::RoundSettled, move |event| {
            if let Event::RoundSettled { result } = event {
                let mut rounds = locked(&sink);
                if rounds.len() == limit {
                    rounds.pop_front();
                }
                if limit > 0 {
                    rounds.push_back(result.clone());
                }
            }
            Ok(())
        });
        Self {
            limit,
            rounds: recorded,
            subscription: Some(subscription),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        locked(&self.rounds).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn rounds(&self) -> Vec<RoundResult> {
        locked(&self.rounds).iter().cloned().collect()
    }

    pub fn last(&self) -> Option<RoundResult> {
        locked(&self.rounds).back().cloned()
    }

    /// One JSON object per line, oldest first.
    pub fn to_json_lines(&self) -> Result<String, serde_json::Error> {
        let mut out = String::new();
        for result in locked(&self.rounds).iter() {
            out.push_str(&serde_json::to_string(result)?);
            out.push('\n');
        }
        Ok(out)
    }
}

impl Drop for History {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_types::casino::{Detail, DiceBet, GameType, Verdict};

    fn dice(payout: u64) -> RoundResult {
        RoundResult {
            game: GameType::Dice,
            verdict: if payout > 0 { Verdict::Win } else { Verdict::Lose },
            staked: 10,
            payout,
            detail: Detail::Dice {
                bet: DiceBet::Over7,
                faces: [4, 5],
            },
        }
    }

    #[test]
    fn test_keeps_most_recent() {
        let bus = EventBus::new();
        let history = History::attach(&bus, 3);
        for payout in 0..5 {
            bus.publish(Event::RoundSettled {
                result: dice(payout),
            });
        }
        let payouts: Vec<u64> = history.rounds().iter().map(|r| r.payout).collect();
        assert_eq!(payouts, vec![2, 3, 4]);
        assert_eq!(history.last().map(|r| r.payout), Some(4));
    }

    #[test]
    fn test_ignores_other_topics() {
        let bus = EventBus::new();
        let history = History::attach(&bus, 50);
        bus.publish(Event::BalanceUpdated { balance: 1 });
        assert!(history.is_empty());
    }

    #[test]
    fn test_json_lines() {
        let bus = EventBus::new();
        let history = History::attach(&bus, 50);
        bus.publish(Event::RoundSettled { result: dice(20) });
        bus.publish(Event::RoundSettled { result: dice(0) });

        let text = history.to_json_lines().unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: RoundResult = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first, dice(20));
        let value: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(value["verdict"], "Lose");
        assert_eq!(value["detail"]["Dice"]["faces"][1], 5);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let bus = EventBus::new();
        let history = History::attach(&bus, 50);
        assert_eq!(bus.subscriber_count(Topic::RoundSettled), 1);
        drop(history);
        assert_eq!(bus.subscriber_count(Topic::RoundSettled), 0);
    }
}
