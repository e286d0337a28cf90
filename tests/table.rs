//! Table integration tests.
//!
//! Rounds are scripted with rigged shoes and driven by explicit clock
//! advancement. New tables seat three AI players at seats 1, 3, and 5, so
//! the human always takes seat 0 and the opening deal order is fixed.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use backcount::{
    ActionError, BetError, Card, CountingSystem, HandOutcome, InsuranceError, RoundPhase,
    SeatError, SeatView, Shoe, Suit, Table, TableEvent, TableOptions, DEALERS, DECK_SIZE,
};

const fn card(suit: Suit, rank: u8) -> Card {
    Card::new(suit, rank)
}

/// Replaces the shoe so draws come out in the given order, padded so the
/// cut card never comes into play.
fn set_shoe_from_draws(table: &Table, draws: &[Card]) {
    let mut cards = draws.to_vec();
    cards.extend(std::iter::repeat(card(Suit::Diamonds, 5)).take(300));
    table.shoe.lock().set_cards(cards);
}

/// The opening deal for a table with the human at seat 0 and AI at 1, 3,
/// and 5: first pass, dealer up-card, second pass, dealer hole card. The
/// AI seats all land on 20 so they stand without drawing.
fn opening_draws(human: [u8; 2], dealer: [u8; 2]) -> Vec<Card> {
    vec![
        card(Suit::Hearts, human[0]),
        card(Suit::Clubs, 10),
        card(Suit::Diamonds, 10),
        card(Suit::Spades, 10),
        card(Suit::Hearts, dealer[0]),
        card(Suit::Hearts, human[1]),
        card(Suit::Clubs, 13),
        card(Suit::Diamonds, 13),
        card(Suit::Spades, 13),
        card(Suit::Spades, dealer[1]),
    ]
}

fn human_view(table: &Table) -> (Vec<Vec<Card>>, u32) {
    let snapshot = table.snapshot();
    for seat in snapshot.seats {
        if let SeatView::Human { hands, chips, .. } = seat {
            return (hands, chips);
        }
    }
    panic!("human not seated");
}

#[test]
fn shoe_build_is_a_permutation_with_a_balanced_count() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut shoe = Shoe::build(2, CountingSystem::HiLo, &mut rng);
    assert_eq!(shoe.total_cards(), 2 * DECK_SIZE);

    let mut drawn = Vec::new();
    while shoe.cards_remaining() > 0 {
        drawn.push(shoe.draw().unwrap());
    }

    for suit in [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades] {
        for rank in 1..=13 {
            let copies = drawn
                .iter()
                .filter(|c| c.suit == suit && c.rank == rank)
                .count();
            assert_eq!(copies, 2, "{suit:?} {rank} appeared {copies} times");
        }
    }

    // Hi-Lo is balanced: a fully dealt shoe sums to zero.
    assert_eq!(shoe.running_count(), 0);
}

#[test]
fn betting_timeout_deals_the_round_without_confirmation() {
    let table = Table::new(TableOptions::default(), 7);
    table.sit(0).unwrap();
    set_shoe_from_draws(&table, &opening_draws([10, 7], [9, 8]));
    table.place_bet(50).unwrap();

    table.tick(9_999);
    assert_eq!(table.phase(), RoundPhase::Betting);

    table.tick(10_000);
    assert_eq!(table.phase(), RoundPhase::PlayerTurn);

    let (hands, chips) = human_view(&table);
    assert_eq!(hands, vec![vec![card(Suit::Hearts, 10), card(Suit::Hearts, 7)]]);
    assert_eq!(chips, 950);
    assert_eq!(table.snapshot().cards_dealt, 10);
}

#[test]
fn unseated_table_starts_dealing_after_half_a_second() {
    let table = Table::new(TableOptions::default(), 7);
    table.tick(499);
    assert_eq!(table.phase(), RoundPhase::Betting);
    table.tick(500);
    assert_ne!(table.phase(), RoundPhase::Betting);
}

#[test]
fn confirming_early_makes_the_betting_timer_a_no_op() {
    let table = Table::new(TableOptions::default(), 7);
    table.sit(0).unwrap();
    set_shoe_from_draws(&table, &opening_draws([10, 7], [9, 8]));
    table.place_bet(50).unwrap();
    table.confirm_bet(0).unwrap();
    assert_eq!(table.phase(), RoundPhase::PlayerTurn);

    // The 10 s betting timer fires into a stale generation: no second
    // deal, no second debit.
    table.tick(10_000);
    let (hands, chips) = human_view(&table);
    assert_eq!(hands[0].len(), 2);
    assert_eq!(chips, 950);
    assert_eq!(table.snapshot().cards_dealt, 10);
}

#[test]
fn end_to_end_scripted_round_pays_all_hands_on_a_dealer_bust() {
    let options = TableOptions::default().with_dealer_hits_soft_17(false);
    let table = Table::new(options, 7);
    table.sit(0).unwrap();

    // Player 17 against a 6 up-card; the hole card makes 16, forcing a
    // hit even on an S17 table, and the next card busts the dealer.
    let mut draws = opening_draws([10, 7], [6, 13]);
    draws.push(card(Suit::Hearts, 10));
    set_shoe_from_draws(&table, &draws);

    table.place_bet(50).unwrap();
    table.confirm_bet(0).unwrap();
    assert_eq!(table.phase(), RoundPhase::PlayerTurn);
    table.stand(0).unwrap();

    // AI stands cascade at 1-3 s, dealer settles at 4.5 s and busts, the
    // callout holds 10 s, resolution runs at 14.5 s.
    table.tick(15_000);
    assert_eq!(table.phase(), RoundPhase::Resolving);
    assert_eq!(table.snapshot().callout.as_deref(), Some("Paying all hands"));

    let (_, chips) = human_view(&table);
    assert_eq!(chips, 1_050);

    let events = table.drain_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, TableEvent::Callout(line) if line == "Paying all hands")));
    assert!(events.iter().any(|e| matches!(
        e,
        TableEvent::HandSettled {
            seat: 0,
            outcome: HandOutcome::Win,
            payout: 100,
        }
    )));
}

#[test]
fn suspicion_accrues_when_bets_swing_against_an_attentive_dealer() {
    let options = TableOptions::default().with_dealer_hits_soft_17(false);
    let table = Table::new(options, 7);
    table.sit(0).unwrap();

    let strict = *DEALERS
        .iter()
        .find(|dealer| dealer.id == "strict-harold")
        .unwrap();
    *table.dealer.lock() = strict;
    // A prior round's bet of 10 against this round's 50 is a 4x swing.
    table.heat.lock().previous_bet = 10;

    let mut draws = opening_draws([10, 7], [6, 13]);
    draws.push(card(Suit::Hearts, 10));
    set_shoe_from_draws(&table, &draws);

    table.place_bet(50).unwrap();
    table.confirm_bet(0).unwrap();
    table.stand(0).unwrap();
    table.tick(15_000);

    let snapshot = table.snapshot();
    assert_eq!(snapshot.phase, RoundPhase::Resolving);
    assert!(snapshot.suspicion_level > 0.0);
    assert!((0.0..=100.0).contains(&snapshot.suspicion_level));
    assert!((0.0..=100.0).contains(&snapshot.pit_boss_distance));
    assert_eq!(table.heat.lock().previous_bet, 50);
}

#[test]
fn insurance_pays_two_to_one_on_a_dealer_blackjack() {
    let table = Table::new(TableOptions::default(), 7);
    table.sit(0).unwrap();
    set_shoe_from_draws(&table, &opening_draws([10, 7], [1, 13]));

    table.place_bet(50).unwrap();
    table.confirm_bet(0).unwrap();
    assert_eq!(table.phase(), RoundPhase::Insurance);
    assert!(table
        .drain_events()
        .iter()
        .any(|e| matches!(e, TableEvent::InsuranceOffered)));

    // Taking insurance closes the window; the dealer has it, so the round
    // short-circuits straight to resolving.
    table.take_insurance(0).unwrap();
    assert_eq!(table.phase(), RoundPhase::Resolving);

    // 1000 - 50 (bet, lost) - 25 (insurance) + 75 (insurance pays 2:1).
    let (_, chips) = human_view(&table);
    assert_eq!(chips, 1_000);
    assert_eq!(table.snapshot().callout.as_deref(), Some("Dealer wins"));
}

#[test]
fn declined_insurance_plays_on_when_the_dealer_misses() {
    let table = Table::new(TableOptions::default(), 7);
    table.sit(0).unwrap();
    set_shoe_from_draws(&table, &opening_draws([10, 7], [1, 9]));

    table.place_bet(50).unwrap();
    table.confirm_bet(0).unwrap();
    assert_eq!(table.phase(), RoundPhase::Insurance);
    table.decline_insurance(0).unwrap();
    assert_eq!(table.phase(), RoundPhase::PlayerTurn);

    table.stand(0).unwrap();
    table.tick(15_000);

    // Dealer holds soft 20; the player's 17 loses, no insurance changed
    // hands.
    assert_eq!(table.phase(), RoundPhase::Resolving);
    assert_eq!(table.snapshot().callout.as_deref(), Some("Paying 21"));
    let (_, chips) = human_view(&table);
    assert_eq!(chips, 950);
}

#[test]
fn split_pairs_play_two_hands() {
    let options = TableOptions::default().with_dealer_hits_soft_17(false);
    let table = Table::new(options, 7);
    table.sit(0).unwrap();

    // Split eights; each hand catches a face card, the dealer busts from
    // 16, and both 18s win.
    let mut draws = opening_draws([8, 8], [6, 13]);
    draws.push(card(Suit::Hearts, 11));
    draws.push(card(Suit::Hearts, 12));
    draws.push(card(Suit::Clubs, 9));
    set_shoe_from_draws(&table, &draws);

    table.place_bet(50).unwrap();
    table.confirm_bet(0).unwrap();
    table.split(0).unwrap();

    let (hands, chips) = human_view(&table);
    assert_eq!(hands.len(), 2);
    assert_eq!(hands[0], vec![card(Suit::Hearts, 8), card(Suit::Hearts, 11)]);
    assert_eq!(hands[1], vec![card(Suit::Hearts, 8), card(Suit::Hearts, 12)]);
    assert_eq!(chips, 900);

    // One split per round.
    assert_eq!(table.split(0).unwrap_err(), ActionError::AlreadySplit);

    table.stand(0).unwrap();
    table.stand(0).unwrap();
    table.tick(15_000);

    assert_eq!(table.phase(), RoundPhase::Resolving);
    let (_, chips) = human_view(&table);
    assert_eq!(chips, 1_100);
}

#[test]
fn double_down_takes_one_card_and_doubles_the_payout() {
    let options = TableOptions::default().with_dealer_hits_soft_17(false);
    let table = Table::new(options, 7);
    table.sit(0).unwrap();

    let mut draws = opening_draws([5, 6], [6, 13]);
    draws.push(card(Suit::Hearts, 10)); // the double's card: 21
    draws.push(card(Suit::Clubs, 9)); // dealer's forced hit: bust
    set_shoe_from_draws(&table, &draws);

    table.place_bet(50).unwrap();
    table.confirm_bet(0).unwrap();
    table.double_down(0).unwrap();

    let (hands, chips) = human_view(&table);
    assert_eq!(hands[0].len(), 3);
    assert_eq!(chips, 900);

    table.tick(15_000);
    assert_eq!(table.phase(), RoundPhase::Resolving);
    let (_, chips) = human_view(&table);
    assert_eq!(chips, 1_100);
}

#[test]
fn blackjack_pays_the_configured_ratio() {
    let options = TableOptions::default()
        .with_dealer_hits_soft_17(false)
        .with_blackjack_pays((6, 5));
    let table = Table::new(options, 7);
    table.sit(0).unwrap();
    set_shoe_from_draws(&table, &opening_draws([1, 13], [9, 8]));

    table.place_bet(50).unwrap();
    table.confirm_bet(0).unwrap();

    // A natural never acts; the round flows straight through the AI
    // seats to the dealer's 17 and resolution.
    table.tick(15_000);
    assert_eq!(table.phase(), RoundPhase::Resolving);

    // 1000 - 50 + (50 + 50 * 6/5) = 1060.
    let (_, chips) = human_view(&table);
    assert_eq!(chips, 1_060);

    let events = table.drain_events();
    assert!(events.iter().any(|e| matches!(
        e,
        TableEvent::HandSettled {
            seat: 0,
            outcome: HandOutcome::Blackjack,
            payout: 110,
        }
    )));
}

#[test]
fn reshuffle_replaces_the_shoe_at_the_cut_card() {
    // One deck with the cut card 40 cards deep: 12 dealt cards trip it.
    let options = TableOptions::default()
        .with_decks(1)
        .with_penetration(12.0 / 52.0);
    let table = Table::new(options, 7);

    {
        let mut shoe = table.shoe.lock();
        for _ in 0..12 {
            shoe.draw().unwrap();
        }
        assert!(shoe.cut_card_reached(12.0 / 52.0));
    }

    // No human seated: the whole round plays out on its own, and the
    // round-end housekeeping rebuilds the shoe.
    table.tick(60_000);
    let events = table.drain_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, TableEvent::Reshuffled { shoes_dealt: 2 })));
}

#[test]
fn seat_and_bet_validation() {
    let table = Table::new(TableOptions::default(), 7);

    assert_eq!(table.sit(8).unwrap_err(), SeatError::OutOfRange);
    assert_eq!(table.sit(1).unwrap_err(), SeatError::SeatTaken);
    assert_eq!(table.place_bet(50).unwrap_err(), BetError::NotSeated);
    assert_eq!(table.leave_seat().unwrap_err(), SeatError::NotSeated);

    table.sit(0).unwrap();
    assert_eq!(table.sit(2).unwrap_err(), SeatError::AlreadySeated);
    assert_eq!(table.place_bet(0).unwrap_err(), BetError::ZeroBet);
    assert_eq!(
        table.place_bet(5_000).unwrap_err(),
        BetError::InsufficientChips
    );
    assert_eq!(table.confirm_bet(0).unwrap_err(), BetError::ZeroBet);
    assert_eq!(table.hit(0).unwrap_err(), ActionError::WrongPhase);
    assert_eq!(
        table.take_insurance(0).unwrap_err(),
        InsuranceError::NotOffered
    );

    set_shoe_from_draws(&table, &opening_draws([10, 7], [9, 8]));
    table.place_bet(50).unwrap();
    table.confirm_bet(0).unwrap();
    assert_eq!(table.confirm_bet(0).unwrap_err(), BetError::WrongPhase);
    assert_eq!(table.leave_seat().unwrap_err(), SeatError::MidRound);
    assert_eq!(table.split(0).unwrap_err(), ActionError::NotAPair);
    assert_eq!(table.place_bet(60).unwrap_err(), BetError::WrongPhase);
}
