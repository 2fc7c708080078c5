use super::*;
use commonware_codec::{Encode, EncodeSize};
use commonware_codec::ReadExt;

#[test]
fn test_snapshot_roundtrip() {
    for snapshot in [
        Snapshot::new(1_000, false),
        Snapshot::new(0, true),
        Snapshot::new(u64::MAX, true),
    ] {
        let encoded = snapshot.encode();
        assert_eq!(encoded.len(), snapshot.encode_size());
        let decoded = Snapshot::read(&mut &encoded[..]).unwrap();
        assert_eq!(snapshot, decoded);
    }
}

#[test]
fn test_snapshot_rejects_unknown_version() {
    let mut encoded = Snapshot::new(500, false).encode().to_vec();
    encoded[0] = SNAPSHOT_VERSION + 1;
    assert!(Snapshot::read(&mut &encoded[..]).is_err());
}

#[test]
fn test_snapshot_rejects_truncated_input() {
    let encoded = Snapshot::new(500, false).encode();
    assert!(Snapshot::read(&mut &encoded[..4]).is_err());
}

#[test]
fn test_card_display_and_color() {
    assert_eq!(Card::new(Rank::Ace, Suit::Spades).to_string(), "A♠");
    assert_eq!(Card::new(Rank::Ten, Suit::Hearts).to_string(), "10♥");
    assert_eq!(Card::new(Rank::Queen, Suit::Diamonds).color(), Color::Red);
    assert_eq!(Card::new(Rank::Two, Suit::Clubs).color(), Color::Black);
}

#[test]
fn test_rank_values_are_ace_high() {
    let values: Vec<u8> = Rank::ALL.iter().map(|rank| rank.value()).collect();
    assert_eq!(values, (2..=14).collect::<Vec<u8>>());
}

#[test]
fn test_event_topics() {
    assert_eq!(Event::BalanceUpdated { balance: 1 }.topic(), Topic::BalanceUpdated);
    assert_eq!(Event::BankruptcyWarning { balance: 1 }.topic(), Topic::BankruptcyWarning);
    assert_eq!(Event::BalanceReset { amount: 1 }.topic(), Topic::BalanceReset);
    assert_eq!(
        Event::StageChanged {
            game: GameType::Roulette,
            phase: Phase::Spinning,
        }
        .topic(),
        Topic::StageChanged
    );
}

#[test]
fn test_wager_game_mapping() {
    let wagers = [
        Wager::Dice { bet: DiceBet::Exact7, amount: 5 },
        Wager::Slots { amount: 6 },
        Wager::Blackjack { amount: 7 },
        Wager::VideoPoker { amount: 8 },
        Wager::Roulette { bet: RouletteBet::Red, amount: 9 },
    ];
    let games: Vec<GameType> = wagers.iter().map(Wager::game).collect();
    assert_eq!(games, GameType::ALL.to_vec());
    let amounts: Vec<u64> = wagers.iter().map(Wager::amount).collect();
    assert_eq!(amounts, vec![5, 6, 7, 8, 9]);
}

#[test]
fn test_round_result_net() {
    let result = RoundResult {
        game: GameType::Dice,
        verdict: Verdict::Lose,
        staked: 50,
        payout: 0,
        detail: Detail::Dice { bet: DiceBet::Over7, faces: [1, 2] },
    };
    assert_eq!(result.net(), -50);
}

#[test]
fn test_busy_phases() {
    assert!(Phase::Spinning.is_busy());
    assert!(Phase::DealerAutoplay.is_busy());
    assert!(!Phase::Betting.is_busy());
    assert!(!Phase::Holding.is_busy());
}

#[test]
fn test_actions_belong_to_one_game() {
    assert!(GameType::Blackjack.offers(Action::Hit));
    assert!(GameType::VideoPoker.offers(Action::ToggleHold(3)));
    assert!(GameType::Roulette.offers(Action::Spin));
    assert!(!GameType::Roulette.offers(Action::Draw));
    for action in [Action::Hit, Action::Stand, Action::Draw, Action::ClearBets, Action::Spin] {
        assert!(!GameType::Dice.offers(action));
        assert!(!GameType::Slots.offers(action));
    }
}

#[test]
fn test_transition_table() {
    assert!(Phase::PlayerTurn.accepts(GameType::Blackjack, Action::Stand));
    assert!(!Phase::DealerAutoplay.accepts(GameType::Blackjack, Action::Hit));
    assert!(!Phase::Betting.accepts(GameType::Blackjack, Action::Hit));
    assert!(Phase::Holding.accepts(GameType::VideoPoker, Action::Draw));
    assert!(!Phase::Drawing.accepts(GameType::VideoPoker, Action::ToggleHold(0)));
    assert!(Phase::Betting.accepts(GameType::Roulette, Action::ClearBets));
    assert!(!Phase::Spinning.accepts(GameType::Roulette, Action::Spin));
    assert!(!Phase::Holding.accepts(GameType::Blackjack, Action::Draw));

    assert!(Phase::Idle.accepts_wager(GameType::Dice));
    assert!(!Phase::Resolving.accepts_wager(GameType::Slots));
    assert!(Phase::Settled.accepts_wager(GameType::Blackjack));
    assert!(!Phase::Holding.accepts_wager(GameType::VideoPoker));
    assert!(!Phase::Spinning.accepts_wager(GameType::Roulette));
}
