mod support;

use matchbook::domain::{
    CustomBetResult, FixtureStatus, WagerStatus, WagerTarget,
};
use matchbook::error::Error;
use rust_decimal_macros::dec;

#[test]
fn e2e_register_bet_settle_pays_winners_and_flips_losers() {
    let (_dir, book) = support::open_book();
    book.seed_default_catalog().unwrap();
    let fixture = support::seed_fixture(&book);
    book.odds().instantiate(fixture.id).unwrap();

    book.accounts().register("alice", "pw").unwrap();
    book.accounts().register("bob", "pw").unwrap();

    // zero drift: home_win at the catalog 2.0, under_2_5 at 2.0
    let home_win = support::instance_for(&book, fixture.id, "home_win");
    let under = support::instance_for(&book, fixture.id, "under_2_5");
    book.ledger()
        .place("alice", fixture.id, 50, WagerTarget::Odds(home_win.id))
        .unwrap();
    book.ledger()
        .place("bob", fixture.id, 30, WagerTarget::Odds(under.id))
        .unwrap();
    assert_eq!(book.accounts().get("alice").unwrap().points, 50);
    assert_eq!(book.accounts().get("bob").unwrap().points, 70);

    // 3-1: home wins, 4 goals, under 2.5 loses
    let summary = book.settlement().settle_fixture(fixture.id, 3, 1).unwrap();
    assert_eq!(summary.wagers_settled, 2);
    assert_eq!(summary.wagers_won, 1);
    assert_eq!(summary.points_paid, 100);

    assert_eq!(book.accounts().get("alice").unwrap().points, 150);
    assert_eq!(book.accounts().get("bob").unwrap().points, 70);

    let fixture = book.fixtures().get(fixture.id).unwrap();
    assert_eq!(fixture.status, FixtureStatus::Completed);
    assert_eq!(fixture.final_score(), Some((3, 1)));

    let alice_wagers = book.ledger().user_wagers("alice").unwrap();
    assert_eq!(alice_wagers[0].status, WagerStatus::Won);
    let bob_wagers = book.ledger().user_wagers("bob").unwrap();
    assert_eq!(bob_wagers[0].status, WagerStatus::Lost);
}

#[test]
fn settlement_is_idempotent() {
    let (_dir, book) = support::open_book();
    book.seed_default_catalog().unwrap();
    let fixture = support::seed_fixture(&book);
    book.odds().instantiate(fixture.id).unwrap();

    book.accounts().register("alice", "pw").unwrap();
    let draw = support::instance_for(&book, fixture.id, "draw");
    book.ledger()
        .place("alice", fixture.id, 10, WagerTarget::Odds(draw.id))
        .unwrap();

    book.settlement().settle_fixture(fixture.id, 1, 1).unwrap();
    let balance = book.accounts().get("alice").unwrap().points;

    // a second settlement attempt must not re-pay, even with other scores
    for scores in [(1, 1), (0, 0), (5, 0)] {
        assert!(matches!(
            book.settlement()
                .settle_fixture(fixture.id, scores.0, scores.1),
            Err(Error::AlreadySettled {
                entity: "fixture",
                ..
            })
        ));
    }
    assert_eq!(book.accounts().get("alice").unwrap().points, balance);
}

#[test]
fn settlement_leaves_no_pending_wagers_behind() {
    let (_dir, book) = support::open_book();
    book.seed_default_catalog().unwrap();
    let fixture = support::seed_fixture(&book);
    book.odds().instantiate(fixture.id).unwrap();
    book.accounts().register("alice", "pw").unwrap();

    for bet_type in ["home_win", "away_win", "over_2_5", "both_score_no"] {
        let instance = support::instance_for(&book, fixture.id, bet_type);
        book.ledger()
            .place("alice", fixture.id, 5, WagerTarget::Odds(instance.id))
            .unwrap();
    }

    let summary = book.settlement().settle_fixture(fixture.id, 2, 0).unwrap();
    assert_eq!(summary.wagers_settled, 4);
    assert!(book.ledger().fixture_pending(fixture.id).unwrap().is_empty());
    for wager in book.ledger().user_wagers("alice").unwrap() {
        assert_ne!(wager.status, WagerStatus::Pending);
    }
}

#[test]
fn payouts_floor_fractional_products() {
    let (_dir, book) = support::open_book();
    book.seed_default_catalog().unwrap();
    let fixture = support::seed_fixture(&book);
    book.odds().instantiate(fixture.id).unwrap();
    book.accounts().register("alice", "pw").unwrap();

    // over_2_5 at the catalog 1.8: 10 * 1.8 = 18 exactly, 7 * 1.8 = 12.6 -> 12
    let over = support::instance_for(&book, fixture.id, "over_2_5");
    book.ledger()
        .place("alice", fixture.id, 7, WagerTarget::Odds(over.id))
        .unwrap();

    let summary = book.settlement().settle_fixture(fixture.id, 2, 1).unwrap();
    assert_eq!(summary.points_paid, 12);
    assert_eq!(book.accounts().get("alice").unwrap().points, 100 - 7 + 12);
}

#[test]
fn custom_bets_settle_independently_of_the_score() {
    let (_dir, book) = support::open_book();
    book.seed_default_catalog().unwrap();
    let fixture = support::seed_fixture(&book);
    book.odds().instantiate(fixture.id).unwrap();

    book.accounts().register("alice", "pw").unwrap();
    book.accounts().register("bob", "pw").unwrap();

    let bet = book
        .proposals()
        .add_custom_bet(fixture.id, "red card shown", dec!(3.5), None, "admin")
        .unwrap();
    book.ledger()
        .place("alice", fixture.id, 20, WagerTarget::Custom(bet.id))
        .unwrap();
    book.ledger()
        .place("bob", fixture.id, 10, WagerTarget::Custom(bet.id))
        .unwrap();

    // fixture settlement must not touch custom-bet wagers
    book.settlement().settle_fixture(fixture.id, 0, 0).unwrap();
    assert_eq!(
        book.ledger().user_wagers("alice").unwrap()[0].status,
        WagerStatus::Pending
    );

    let summary = book
        .settlement()
        .settle_custom_bet(bet.id, CustomBetResult::Yes)
        .unwrap();
    assert_eq!(summary.wagers_settled, 2);
    assert_eq!(summary.points_paid, 70 + 35);
    assert_eq!(book.accounts().get("alice").unwrap().points, 80 + 70);
    assert_eq!(book.accounts().get("bob").unwrap().points, 90 + 35);

    // terminal: a second declaration is refused, balances stand
    assert!(matches!(
        book.settlement().settle_custom_bet(bet.id, CustomBetResult::No),
        Err(Error::AlreadySettled {
            entity: "custom bet",
            ..
        })
    ));
    assert_eq!(book.accounts().get("alice").unwrap().points, 150);
}

#[test]
fn custom_bet_no_result_marks_all_wagers_lost() {
    let (_dir, book) = support::open_book();
    book.seed_default_catalog().unwrap();
    let fixture = support::seed_fixture(&book);

    book.accounts().register("alice", "pw").unwrap();
    let bet = book
        .proposals()
        .add_custom_bet(fixture.id, "hat-trick", dec!(9.0), None, "admin")
        .unwrap();
    book.ledger()
        .place("alice", fixture.id, 25, WagerTarget::Custom(bet.id))
        .unwrap();

    let summary = book
        .settlement()
        .settle_custom_bet(bet.id, CustomBetResult::No)
        .unwrap();
    assert_eq!(summary.wagers_settled, 1);
    assert_eq!(summary.wagers_won, 0);
    assert_eq!(summary.points_paid, 0);
    assert_eq!(book.accounts().get("alice").unwrap().points, 75);

    // the settled bet no longer accepts wagers
    assert!(matches!(
        book.ledger()
            .place("alice", fixture.id, 5, WagerTarget::Custom(bet.id)),
        Err(Error::NotFound { .. })
    ));
}

#[test]
fn settled_fixture_refuses_new_wagers() {
    let (_dir, book) = support::open_book();
    book.seed_default_catalog().unwrap();
    let fixture = support::seed_fixture(&book);
    book.odds().instantiate(fixture.id).unwrap();
    book.accounts().register("alice", "pw").unwrap();

    book.settlement().settle_fixture(fixture.id, 1, 0).unwrap();

    let home_win = support::instance_for(&book, fixture.id, "home_win");
    assert!(matches!(
        book.ledger()
            .place("alice", fixture.id, 10, WagerTarget::Odds(home_win.id)),
        Err(Error::BettingClosed { .. })
    ));
}

#[test]
fn total_points_are_conserved_up_to_floor_rounding() {
    let (_dir, book) = support::open_book();
    book.seed_default_catalog().unwrap();
    let fixture = support::seed_fixture(&book);
    book.odds().instantiate(fixture.id).unwrap();

    for name in ["alice", "bob", "carol"] {
        book.accounts().register(name, "pw").unwrap();
    }
    let start: i64 = book.accounts().list().unwrap().iter().map(|u| u.points).sum();

    let home_win = support::instance_for(&book, fixture.id, "home_win");
    let away_win = support::instance_for(&book, fixture.id, "away_win");
    book.ledger()
        .place("alice", fixture.id, 40, WagerTarget::Odds(home_win.id))
        .unwrap();
    book.ledger()
        .place("bob", fixture.id, 40, WagerTarget::Odds(away_win.id))
        .unwrap();

    let summary = book.settlement().settle_fixture(fixture.id, 2, 0).unwrap();
    let end: i64 = book.accounts().list().unwrap().iter().map(|u| u.points).sum();

    // stakes leave the system at placement; only payouts come back
    assert_eq!(end, start - 80 + summary.points_paid);
    assert_eq!(summary.points_paid, 80); // 40 * 2.0
}
