//! Test doubles for driving tables with known outcomes.

use crate::{
    bus::EventBus,
    casino::{deck::Deck, TableContext},
    ledger::Ledger,
    pace::Pacer,
    rng::RandomSource,
};
use arcade_types::casino::{Card, Event, RoundResult, Topic};
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

/// Uniform value that `integer_in_range(min, max)` maps back to `value`.
pub fn pick(value: u32, min: u32, max: u32) -> f64 {
    assert!(min <= value && value <= max, "{value} outside {min}..={max}");
    ((value - min) as f64 + 0.5) / ((max - min) as f64 + 1.0)
}

/// Random source that replays queued values, then repeats a fallback.
pub struct ScriptedRandom {
    queue: Mutex<VecDeque<f64>>,
    fallback: f64,
}

impl Default for ScriptedRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedRandom {
    pub fn new() -> Self {
        Self::with_fallback(0.0)
    }

    pub fn with_fallback(fallback: f64) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback,
        }
    }

    pub fn then_uniform(self, value: f64) -> Self {
        self.queue.lock().unwrap().push_back(value);
        self
    }

    pub fn then_integer(self, value: u32, min: u32, max: u32) -> Self {
        self.then_uniform(pick(value, min, max))
    }

    /// Queues the swap picks that make one Fisher-Yates shuffle of a standard
    /// deck deal `order` first (dealing pops from the tail).
    pub fn then_stacked_deck(self, order: &[Card]) -> Self {
        let mut target: Vec<Card> = Deck::standard()
            .cards()
            .iter()
            .filter(|card| !order.contains(card))
            .copied()
            .collect();
        target.extend(order.iter().rev().copied());
        assert_eq!(target.len(), 52, "stacked cards must be unique");

        let mut current = Deck::standard().cards().to_vec();
        let mut picks = Vec::with_capacity(51);
        for i in (1..current.len()).rev() {
            let j = current[..=i]
                .iter()
                .position(|card| *card == target[i])
                .expect("target card still unplaced");
            picks.push(pick(j as u32, 0, i as u32));
            current.swap(i, j);
        }

        let mut queue = self.queue.lock().unwrap();
        queue.extend(picks);
        drop(queue);
        self
    }

    pub fn remaining(&self) -> usize {
        self.queue.lock().unwrap().len()
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform(&self) -> f64 {
        self.queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.fallback)
    }
}

/// Collects every event published on a bus.
#[derive(Clone, Default)]
pub struct Recorder {
    events: Arc<Mutex<Vec<Event>>>,
}

impl Recorder {
    pub fn attach(bus: &EventBus) -> Self {
        let recorder = Self::default();
        for topic in Topic::ALL {
            let events = recorder.events.clone();
            let _ = bus.subscribe(topic, move |event| {
                events.lock().unwrap().push(event.clone());
                Ok(())
            });
        }
        recorder
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// Events excluding stage transitions.
    pub fn ledger_events(&self) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|event| {
                matches!(
                    event.topic(),
                    Topic::BalanceUpdated | Topic::BankruptcyWarning | Topic::BalanceReset
                )
            })
            .collect()
    }

    pub fn count(&self, topic: Topic) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| event.topic() == topic)
            .count()
    }

    pub fn last(&self, topic: Topic) -> Option<Event> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|event| event.topic() == topic)
            .cloned()
    }

    pub fn settled(&self) -> Vec<RoundResult> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::RoundSettled { result } => Some(result),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

/// Table context over a fresh ledger with instant pacing.
pub fn table<R: RandomSource + 'static>(opening: u64, rng: R) -> (TableContext, Recorder) {
    shared_table(opening, Arc::new(rng))
}

/// Like [`table`], for callers that keep their own handle on the source.
pub fn shared_table(opening: u64, rng: Arc<dyn RandomSource>) -> (TableContext, Recorder) {
    let bus = EventBus::new();
    let recorder = Recorder::attach(&bus);
    let ledger = Arc::new(Ledger::new(opening, bus));
    (TableContext::new(ledger, rng, Pacer::instant()), recorder)
}
