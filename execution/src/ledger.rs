//! The single owner of the player's balance.

use crate::bus::EventBus;
use arcade_types::casino::{Event, DEFAULT_RESET_AMOUNT, LOW_BALANCE_FLOOR};
use std::{
    num::NonZeroU64,
    sync::{Mutex, MutexGuard, PoisonError},
};
use tracing::debug;

const DEFAULT_RESET: NonZeroU64 = match NonZeroU64::new(DEFAULT_RESET_AMOUNT) {
    Some(amount) => amount,
    None => panic!("default reset amount must be non-zero"),
};

/// Running totals since the last reset.
///
/// `opening + credited - debited` always equals the current balance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    pub opening: u64,
    pub credited: u64,
    pub debited: u64,
}

struct Book {
    balance: u64,
    totals: Totals,
}

pub struct Ledger {
    bus: EventBus,
    book: Mutex<Book>,
}

impl Ledger {
    pub fn new(opening: u64, bus: EventBus) -> Self {
        Self {
            bus,
            book: Mutex::new(Book {
                balance: opening,
                totals: Totals {
                    opening,
                    ..Totals::default()
                },
            }),
        }
    }

    fn book(&self) -> MutexGuard<'_, Book> {
        self.book.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn query(&self) -> u64 {
        self.book().balance
    }

    pub fn can_afford(&self, amount: u64) -> bool {
        self.book().balance >= amount
    }

    pub fn totals(&self) -> Totals {
        self.book().totals
    }

    pub fn credit(&self, amount: u64) {
        let balance = {
            let mut book = self.book();
            // Saturate rather than wrap; keep the totals consistent with what landed.
            let landed = u64::MAX - book.balance;
            let landed = amount.min(landed);
            book.balance += landed;
            book.totals.credited = book.totals.credited.saturating_add(landed);
            book.balance
        };
        debug!(amount, balance, "credit");
        self.bus.publish(Event::BalanceUpdated { balance });
    }

    /// Subtracts `amount` if the balance covers it.
    ///
    /// Returns `false` and leaves the balance untouched otherwise. Either way a
    /// balance left below [`LOW_BALANCE_FLOOR`] publishes one bankruptcy warning.
    pub fn debit(&self, amount: u64) -> bool {
        let (accepted, balance) = {
            let mut book = self.book();
            if book.balance >= amount {
                book.balance -= amount;
                book.totals.debited += amount;
                (true, book.balance)
            } else {
                (false, book.balance)
            }
        };

        if accepted {
            debug!(amount, balance, "debit");
            self.bus.publish(Event::BalanceUpdated { balance });
        } else {
            debug!(amount, balance, "debit refused");
        }
        if balance < LOW_BALANCE_FLOOR {
            self.bus.publish(Event::BankruptcyWarning { balance });
        }
        accepted
    }

    /// Replaces the balance and re-opens the totals.
    pub fn reset(&self, amount: NonZeroU64) {
        let amount = amount.get();
        {
            let mut book = self.book();
            book.balance = amount;
            book.totals = Totals {
                opening: amount,
                ..Totals::default()
            };
        }
        debug!(amount, "reset");
        self.bus.publish(Event::BalanceUpdated { balance: amount });
        self.bus.publish(Event::BalanceReset { amount });
    }

    pub fn reset_default(&self) {
        self.reset(DEFAULT_RESET);
    }
}
