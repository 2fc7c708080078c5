use crate::{
    config::ValidatedConfig,
    history::History,
    rescue::RescueDesk,
    store::{Store, StoreError},
};
use arcade_execution::{
    casino::{
        blackjack::{Blackjack, BlackjackView, Play},
        dice::Dice,
        roulette::Roulette,
        slots::{Paytable, Slots},
        video_poker::{PokerView, VideoPoker},
        GameError, TableContext,
    },
    EventBus, Ledger, RandomSource, Subscription,
};
use arcade_types::casino::{
    Action, Event, GameType, Phase, PlacedBet, RoundResult, Snapshot, Topic, Wager, HISTORY_LIMIT,
};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ArcadeError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("no rescue on offer")]
    NoRescueOffer,
}

/// What a wager or action produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    Settled(RoundResult),
    /// Blackjack hand waiting on the player.
    Blackjack(BlackjackView),
    /// Poker hand waiting on holds and a draw.
    Poker(PokerView),
    /// Roulette bet accepted; total now on the layout.
    BetPlaced { pending: u64 },
    Refunded { amount: u64 },
}

impl From<Play> for Reply {
    fn from(play: Play) -> Self {
        match play {
            Play::Continue(view) => Reply::Blackjack(view),
            Play::Settled(result) => Reply::Settled(result),
        }
    }
}

/// The five tables over one ledger, plus the lobby services around them.
pub struct Arcade {
    ledger: Arc<Ledger>,
    store: Arc<dyn Store>,
    muted: Arc<AtomicBool>,
    dice: Dice,
    slots: Slots,
    blackjack: Blackjack,
    poker: VideoPoker,
    roulette: Roulette,
    rescue: RescueDesk,
    history: History,
    persistence: Option<Subscription>,
}

impl Arcade {
    /// Restores the last snapshot (or the configured starting balance) and
    /// wires every table to the shared services.
    pub fn open(
        config: &ValidatedConfig,
        rng: Arc<dyn RandomSource>,
        store: Arc<dyn Store>,
    ) -> Result<Self, ArcadeError> {
        let snapshot = store
            .load()?
            .unwrap_or_else(|| Snapshot::new(config.starting_balance, false));
        info!(
            balance = snapshot.balance,
            muted = snapshot.muted,
            "opening arcade"
        );

        let bus = EventBus::new();
        let ledger = Arc::new(Ledger::new(snapshot.balance, bus.clone()));
        let muted = Arc::new(AtomicBool::new(snapshot.muted));

        let persistence = {
            let store = store.clone();
            let muted = muted.clone();
            bus.subscribe(Topic::BalanceUpdated, move |event| {
                if let Event::BalanceUpdated { balance } = event {
                    store.save(&Snapshot::new(*balance, muted.load(Ordering::SeqCst)))?;
                }
                Ok(())
            })
        };

        let ctx = TableContext::new(ledger.clone(), rng, config.pacer);
        Ok(Self {
            store,
            muted,
            dice: Dice::new(ctx.clone()),
            slots: Slots::new(ctx.clone(), Paytable::default()),
            blackjack: Blackjack::new(ctx.clone()),
            poker: VideoPoker::new(ctx.clone()),
            roulette: Roulette::new(ctx),
            rescue: RescueDesk::open(ledger.clone(), config.rescue_amount),
            history: History::attach(&bus, HISTORY_LIMIT),
            persistence: Some(persistence),
            ledger,
        })
    }

    pub fn balance(&self) -> u64 {
        self.ledger.query()
    }

    pub fn bus(&self) -> &EventBus {
        self.ledger.bus()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn paytable(&self) -> &Paytable {
        self.slots.paytable()
    }

    pub fn muted(&self) -> bool {
        self.muted.load(Ordering::SeqCst)
    }

    pub fn phase(&self, game: GameType) -> Phase {
        match game {
            GameType::Dice => self.dice.phase(),
            GameType::Slots => self.slots.phase(),
            GameType::Blackjack => self.blackjack.phase(),
            GameType::VideoPoker => self.poker.phase(),
            GameType::Roulette => self.roulette.phase(),
        }
    }

    pub fn pending_bets(&self) -> Vec<PlacedBet> {
        self.roulette.pending()
    }

    pub fn blackjack_hand(&self) -> Option<BlackjackView> {
        self.blackjack.view()
    }

    pub fn poker_hand(&self) -> Option<PokerView> {
        self.poker.view()
    }

    pub async fn submit_wager(&self, wager: Wager) -> Result<Reply, GameError> {
        debug!(game = %wager.game(), amount = wager.amount(), "wager submitted");
        match wager {
            Wager::Dice { bet, amount } => self.dice.roll(bet, amount).await.map(Reply::Settled),
            Wager::Slots { amount } => self.slots.spin(amount).await.map(Reply::Settled),
            Wager::Blackjack { amount } => self.blackjack.deal(amount).await.map(Reply::from),
            Wager::VideoPoker { amount } => self.poker.deal(amount).map(Reply::Poker),
            Wager::Roulette { bet, amount } => self
                .roulette
                .place_bet(bet, amount)
                .map(|pending| Reply::BetPlaced { pending }),
        }
    }

    pub async fn player_action(&self, game: GameType, action: Action) -> Result<Reply, GameError> {
        if !game.offers(action) {
            return Err(GameError::UnsupportedAction {
                game,
                action: action.name(),
            });
        }
        let phase = self.phase(game);
        if !phase.accepts(game, action) {
            return Err(GameError::IllegalActionForState {
                action: action.name(),
                stage: phase,
            });
        }

        match (game, action) {
            (GameType::Blackjack, Action::Hit) => self.blackjack.hit().map(Reply::from),
            (GameType::Blackjack, Action::Stand) => {
                self.blackjack.stand().await.map(Reply::Settled)
            }
            (GameType::VideoPoker, Action::ToggleHold(index)) => {
                self.poker.toggle_hold(index).map(Reply::Poker)
            }
            (GameType::VideoPoker, Action::Draw) => self.poker.draw().await.map(Reply::Settled),
            (GameType::Roulette, Action::ClearBets) => self
                .roulette
                .clear_bets()
                .map(|amount| Reply::Refunded { amount }),
            (GameType::Roulette, Action::Spin) => self.roulette.spin().await.map(Reply::Settled),
            (game, action) => Err(GameError::UnsupportedAction {
                game,
                action: action.name(),
            }),
        }
    }

    /// Balance at which a rescue was offered, if one is open.
    pub fn rescue_offer(&self) -> Option<u64> {
        self.rescue.pending()
    }

    /// Accepts the open rescue offer. Returns the new balance.
    pub fn accept_rescue(&self) -> Result<u64, ArcadeError> {
        self.rescue.accept().ok_or(ArcadeError::NoRescueOffer)
    }

    /// Flips and persists the mute flag. Returns the new value.
    pub fn toggle_mute(&self) -> Result<bool, ArcadeError> {
        let muted = !self.muted.fetch_xor(true, Ordering::SeqCst);
        self.store
            .save(&Snapshot::new(self.ledger.query(), muted))?;
        Ok(muted)
    }
}

impl Drop for Arcade {
    fn drop(&mut self) {
        if let Some(persistence) = self.persistence.take() {
            persistence.cancel();
        }
    }
}
