pub mod bus;
pub mod casino;
pub mod ledger;
pub mod pace;
pub mod rng;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

pub use bus::{EventBus, Subscription};
pub use ledger::{Ledger, Totals};
pub use pace::{Pacer, Step};
pub use rng::{GameRng, OsRandom, RandomSource};
