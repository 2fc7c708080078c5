mod card;
mod constants;
mod event;
mod game;
mod result;
mod snapshot;
mod wager;

pub use card::*;
pub use constants::*;
pub use event::*;
pub use game::*;
pub use result::*;
pub use snapshot::*;
pub use wager::*;

#[cfg(test)]
mod tests;
