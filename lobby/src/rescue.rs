//! House loan offered when the balance runs low.
//!
//! A [`Event::BankruptcyWarning`] opens an offer. Any balance update back at
//! or above the floor withdraws it. Accepting resets the ledger to the
//! configured rescue amount.

use arcade_execution::{Ledger, Subscription};
use arcade_types::casino::{Event, Topic, LOW_BALANCE_FLOOR};
use std::{
    num::NonZeroU64,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use tracing::info;

type Offer = Arc<Mutex<Option<u64>>>;

fn offer(slot: &Offer) -> MutexGuard<'_, Option<u64>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct RescueDesk {
    ledger: Arc<Ledger>,
    amount: NonZeroU64,
    offer: Offer,
    subscriptions: Vec<Subscription>,
}

impl RescueDesk {
    pub fn open(ledger: Arc<Ledger>, amount: NonZeroU64) -> Self {
        let slot = Offer::default();
        let bus = ledger.bus();

        let warned = slot.clone();
        let warning = bus.subscribe(Topic::BankruptcyWarning, move |event| {
            if let Event::BankruptcyWarning { balance } = event {
                *offer(&warned) = Some(*balance);
            }
            Ok(())
        });
        let recovered = slot.clone();
        let update = bus.subscribe(Topic::BalanceUpdated, move |event| {
            if let Event::BalanceUpdated { balance } = event {
                if *balance >= LOW_BALANCE_FLOOR {
                    offer(&recovered).take();
                }
            }
            Ok(())
        });

        Self {
            ledger,
            amount,
            offer: slot,
            subscriptions: vec![warning, update],
        }
    }

    /// Balance at which the open offer was made.
    pub fn pending(&self) -> Option<u64> {
        *offer(&self.offer)
    }

    pub fn amount(&self) -> NonZeroU64 {
        self.amount
    }

    /// Takes the open offer. Returns the new balance, or `None` if nothing was
    /// offered.
    pub fn accept(&self) -> Option<u64> {
        let balance = offer(&self.offer).take()?;
        info!(balance, amount = self.amount.get(), "rescue accepted");
        self.ledger.reset(self.amount);
        Some(self.amount.get())
    }
}

impl Drop for RescueDesk {
    fn drop(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            subscription.cancel();
        }
    }
}
