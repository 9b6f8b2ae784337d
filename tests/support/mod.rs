#![allow(dead_code)]

use chrono::Utc;
use matchbook::app::Sportsbook;
use matchbook::config::BettingConfig;
use matchbook::domain::{Fixture, OddsInstance};
use matchbook::service::FixedDrift;
use matchbook::store::{create_pool, run_migrations};
use rust_decimal::Decimal;
use tempfile::TempDir;

/// A sportsbook backed by a throwaway on-disk database.
///
/// Odds instantiate with zero drift so tests see catalog default prices;
/// the tempdir must outlive the book.
pub fn open_book() -> (TempDir, Sportsbook) {
    open_book_with_drift(Decimal::ZERO)
}

pub fn open_book_with_drift(drift: Decimal) -> (TempDir, Sportsbook) {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = dir.path().join("book.db");
    let pool = create_pool(url.to_str().expect("utf-8 path")).expect("pool");
    run_migrations(&pool).expect("migrations");

    let book = Sportsbook::with_drift(pool, &BettingConfig::default(), Box::new(FixedDrift(drift)));
    (dir, book)
}

/// Two teams, two players each, one upcoming fixture.
pub fn seed_fixture(book: &Sportsbook) -> Fixture {
    let home = book.fixtures().add_team("Dynamos").expect("home team");
    let away = book.fixtures().add_team("Lions").expect("away team");
    for name in ["Ana", "Bia"] {
        book.fixtures().add_player(name, home.id).expect("player");
    }
    for name in ["Caio", "Davi"] {
        book.fixtures().add_player(name, away.id).expect("player");
    }
    book.fixtures()
        .add_fixture(home.id, away.id, Utc::now())
        .expect("fixture")
}

/// The instantiated instance carrying a given bet-type key.
pub fn instance_for(book: &Sportsbook, fixture_id: i32, bet_type: &str) -> OddsInstance {
    let template = book
        .odds()
        .templates()
        .expect("templates")
        .into_iter()
        .find(|t| t.bet_type == bet_type)
        .unwrap_or_else(|| panic!("no template with bet type {bet_type}"));
    book.odds()
        .fixture_odds(fixture_id)
        .expect("fixture odds")
        .into_iter()
        .find(|i| i.template_id == template.id)
        .unwrap_or_else(|| panic!("no instance for bet type {bet_type}"))
}
