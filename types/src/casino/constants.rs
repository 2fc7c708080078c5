/// Balance below which a bankruptcy warning is published.
pub const LOW_BALANCE_FLOOR: u64 = 10;

/// Starting balance for a new player.
pub const STARTING_BALANCE: u64 = 1_000;

/// Balance restored by a reset when no amount is given.
pub const DEFAULT_RESET_AMOUNT: u64 = 1_000;

/// Number of settled rounds kept in the lobby history.
pub const HISTORY_LIMIT: usize = 50;

/// Cards in a standard deck.
pub const DECK_SIZE: usize = 52;

/// Cards in a video poker hand.
pub const POKER_HAND_SIZE: usize = 5;

/// Highest pocket on a European wheel (pockets are 0..=36).
pub const ROULETTE_MAX_POCKET: u8 = 36;

/// Best blackjack score; anything above busts.
pub const BLACKJACK: u8 = 21;

/// Dealer keeps drawing while below this score.
pub const DEALER_STANDS_ON: u8 = 17;

/// Snapshot format version
pub const SNAPSHOT_VERSION: u8 = 1;
