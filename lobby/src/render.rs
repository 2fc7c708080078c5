//! Plain-text output for the console.

use crate::arcade::Reply;
use arcade_execution::casino::{
    blackjack::BlackjackView,
    slots::Paytable,
    video_poker::{PokerView, PAYTABLE},
};
use arcade_types::casino::{Card, Detail, DiceBet, PlacedBet, RoundResult};
use std::fmt::Write as _;

pub fn cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn dice_bet(bet: DiceBet) -> &'static str {
    match bet {
        DiceBet::Under7 => "under 7",
        DiceBet::Over7 => "over 7",
        DiceBet::Exact7 => "exactly 7",
    }
}

fn bets(bets: &[PlacedBet]) -> String {
    bets.iter()
        .map(|placed| format!("{} x{}", placed.bet, placed.amount))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn result(result: &RoundResult) -> String {
    let detail = match &result.detail {
        Detail::Dice { bet, faces } => format!(
            "rolled {} + {} = {} ({})",
            faces[0],
            faces[1],
            faces[0] + faces[1],
            dice_bet(*bet)
        ),
        Detail::Slots { reels } => reels
            .iter()
            .map(|symbol| symbol.icon())
            .collect::<Vec<_>>()
            .join(" | "),
        Detail::Blackjack {
            player,
            dealer,
            player_score,
            dealer_score,
        } => format!(
            "you {} ({player_score}) vs dealer {} ({dealer_score})",
            cards(player),
            cards(dealer)
        ),
        Detail::VideoPoker { hand, rank } => format!("{} {}", cards(hand), rank.name()),
        Detail::Roulette { pocket, bets: layout } => {
            format!("ball on {pocket} [{}]", bets(layout))
        }
    };

    let net = result.net();
    let outcome = if net > 0 {
        format!("+{net}")
    } else {
        net.to_string()
    };
    format!(
        "{}: {detail} => {} {outcome}",
        result.game,
        result.verdict.name()
    )
}

pub fn blackjack(view: &BlackjackView) -> String {
    let soft = if view.soft { " soft" } else { "" };
    format!(
        "you {} ({}{soft}), dealer shows {} - hit or stand",
        cards(&view.player),
        view.player_score,
        view.dealer_upcard
    )
}

pub fn poker(view: &PokerView) -> String {
    let mut out = String::new();
    for (index, (card, held)) in view.hand.iter().zip(view.held).enumerate() {
        let mark = if held { "*" } else { "" };
        let _ = write!(out, "{}:{card}{mark} ", index + 1);
    }
    out.push_str("- hold 1-5, then draw");
    out
}

pub fn reply(reply: &Reply) -> String {
    match reply {
        Reply::Settled(settled) => result(settled),
        Reply::Blackjack(view) => blackjack(view),
        Reply::Poker(view) => poker(view),
        Reply::BetPlaced { pending } => format!("bet placed, {pending} on the layout"),
        Reply::Refunded { amount } => format!("bets cleared, {amount} refunded"),
    }
}

pub fn paytables(slots: &Paytable) -> String {
    let mut out = String::from("slots (three of a kind, two cherries pay 1x):\n");
    for odds in slots.symbols() {
        let _ = writeln!(
            out,
            "  {} {:>4.1}%  {}x",
            odds.symbol.icon(),
            odds.weight * 100.0,
            odds.value
        );
    }
    out.push_str("video poker:\n");
    for (rank, multiplier) in PAYTABLE {
        let _ = writeln!(out, "  {:<16} {multiplier}x", rank.name());
    }
    out.push_str("dice: under/over 7 pay 2x, exactly 7 pays 5x\n");
    out.push_str("roulette: straight pays 35:1, outside bets 1:1");
    out
}

pub const HELP: &str = "\
dice <under|over|seven> <amount>
slots <amount>
blackjack <amount>, then hit | stand
poker <amount>, then hold <1-5> ... draw
bet <0-36|red|black|odd|even|low|high> <amount>, then spin | clear
balance | history | paytable | rescue | mute | quit";
