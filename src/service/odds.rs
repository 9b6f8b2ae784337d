//! Odds catalog, instantiation, and the price revision log.

use std::collections::HashSet;

use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, info};

use crate::config::BettingConfig;
use crate::domain::{
    odds::validate_price, OddsCategory, OddsInstance, OddsRevision, OddsTemplate, MIN_PRICE,
};
use crate::error::{Error, Result};
use crate::store::model::{
    encode_price, encode_ts, parse_price, NewOddsCategoryRow, NewOddsInstanceRow,
    NewOddsRevisionRow, NewOddsTemplateRow, OddsCategoryRow, OddsInstanceRow, OddsRevisionRow,
    OddsTemplateRow,
};
use crate::store::schema::{
    fixtures, odds_categories, odds_instances, odds_revisions, odds_templates, players,
};
use crate::store::{get_conn, last_insert_rowid, DbPool};

/// Source of the price perturbation applied at instantiation time.
///
/// Injected so tests can pin prices; production uses [`UniformDrift`].
pub trait DriftSource: Send {
    /// A value in `[-spread, +spread]`.
    fn sample(&mut self, spread: Decimal) -> Decimal;
}

/// Uniform random drift, the production default.
pub struct UniformDrift {
    rng: StdRng,
}

impl UniformDrift {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for UniformDrift {
    fn default() -> Self {
        Self::new()
    }
}

impl DriftSource for UniformDrift {
    fn sample(&mut self, spread: Decimal) -> Decimal {
        let spread = spread.to_f64().unwrap_or(0.0);
        if spread <= 0.0 {
            return Decimal::ZERO;
        }
        let drift = self.rng.gen_range(-spread..=spread);
        Decimal::from_f64(drift).unwrap_or(Decimal::ZERO)
    }
}

/// Constant drift, for deterministic instantiation in tests and replays.
pub struct FixedDrift(pub Decimal);

impl DriftSource for FixedDrift {
    fn sample(&mut self, _spread: Decimal) -> Decimal {
        self.0
    }
}

/// The odds catalog and everything priced from it.
pub struct OddsService {
    pool: DbPool,
    drift: Mutex<Box<dyn DriftSource>>,
    template_spread: Decimal,
    player_spread: Decimal,
}

impl OddsService {
    /// Service with uniform random drift per the betting config.
    #[must_use]
    pub fn new(pool: DbPool, betting: &BettingConfig) -> Self {
        Self::with_drift(pool, betting, Box::new(UniformDrift::new()))
    }

    /// Service with a caller-supplied drift source.
    #[must_use]
    pub fn with_drift(pool: DbPool, betting: &BettingConfig, drift: Box<dyn DriftSource>) -> Self {
        Self {
            pool,
            drift: Mutex::new(drift),
            template_spread: Decimal::from_f64(betting.template_drift_spread)
                .unwrap_or(Decimal::ZERO),
            player_spread: Decimal::from_f64(betting.player_drift_spread)
                .unwrap_or(Decimal::ZERO),
        }
    }

    /// # Errors
    /// [`Error::Duplicate`] on a category-name collision.
    pub fn add_category(&self, name: &str, description: &str) -> Result<OddsCategory> {
        let mut conn = get_conn(&self.pool)?;
        conn.immediate_transaction::<_, Error, _>(|conn| {
            let taken: Option<i32> = odds_categories::table
                .filter(odds_categories::name.eq(name))
                .select(odds_categories::id)
                .first(conn)
                .optional()?;
            if taken.is_some() {
                return Err(Error::Duplicate {
                    entity: "odds category",
                    name: name.to_string(),
                });
            }

            diesel::insert_into(odds_categories::table)
                .values(&NewOddsCategoryRow {
                    name: name.to_string(),
                    description: description.to_string(),
                    is_active: true,
                })
                .execute(conn)?;
            let id: i32 = diesel::select(last_insert_rowid()).get_result(conn)?;
            Ok(OddsCategory {
                id,
                name: name.to_string(),
                description: description.to_string(),
                is_active: true,
            })
        })
    }

    /// Add a template to the catalog.
    ///
    /// # Errors
    /// - [`Error::NotFound`] if the category does not exist.
    /// - [`Error::Duplicate`] on a bet-type key collision.
    /// - [`Error::Domain`] if the default price is below the floor.
    pub fn add_template(
        &self,
        category_id: i32,
        name: &str,
        description: &str,
        bet_type: &str,
        default_price: Decimal,
        requires_player: bool,
    ) -> Result<OddsTemplate> {
        validate_price(default_price)?;

        let mut conn = get_conn(&self.pool)?;
        conn.immediate_transaction::<_, Error, _>(|conn| {
            let category: Option<i32> = odds_categories::table
                .find(category_id)
                .select(odds_categories::id)
                .first(conn)
                .optional()?;
            if category.is_none() {
                return Err(Error::NotFound {
                    entity: "odds category",
                    id: category_id.to_string(),
                });
            }

            let taken: Option<i32> = odds_templates::table
                .filter(odds_templates::bet_type.eq(bet_type))
                .select(odds_templates::id)
                .first(conn)
                .optional()?;
            if taken.is_some() {
                return Err(Error::Duplicate {
                    entity: "odds template",
                    name: bet_type.to_string(),
                });
            }

            diesel::insert_into(odds_templates::table)
                .values(&NewOddsTemplateRow {
                    category_id,
                    name: name.to_string(),
                    description: description.to_string(),
                    bet_type: bet_type.to_string(),
                    default_price: encode_price(default_price),
                    requires_player,
                    is_active: true,
                })
                .execute(conn)?;
            let id: i32 = diesel::select(last_insert_rowid()).get_result(conn)?;
            Ok(OddsTemplate {
                id,
                category_id,
                name: name.to_string(),
                description: description.to_string(),
                bet_type: bet_type.to_string(),
                default_price,
                requires_player,
                is_active: true,
            })
        })
    }

    pub fn categories(&self) -> Result<Vec<OddsCategory>> {
        let mut conn = get_conn(&self.pool)?;
        let rows: Vec<OddsCategoryRow> = odds_categories::table
            .filter(odds_categories::is_active.eq(true))
            .order(odds_categories::name.asc())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(OddsCategory::from).collect())
    }

    /// Active templates, catalog order.
    pub fn templates(&self) -> Result<Vec<OddsTemplate>> {
        let mut conn = get_conn(&self.pool)?;
        let rows: Vec<OddsTemplateRow> = odds_templates::table
            .filter(odds_templates::is_active.eq(true))
            .order(odds_templates::id.asc())
            .load(&mut conn)?;
        rows.into_iter().map(OddsTemplate::try_from).collect()
    }

    /// Materialize priced odds for a fixture from every active template.
    ///
    /// Non-player templates produce one instance with drift within the
    /// template spread; player templates produce one independently drifted
    /// instance per player on either side of the fixture. Every price is
    /// rounded to two decimals and clamped to [`MIN_PRICE`].
    ///
    /// At most one instance exists per (fixture, template, player):
    /// combinations already materialized are skipped, so a repeat call
    /// creates instances only for templates or players added since, and
    /// returns just those.
    ///
    /// # Errors
    /// [`Error::NotFound`] if the fixture does not exist.
    pub fn instantiate(&self, fixture_id: i32) -> Result<Vec<OddsInstance>> {
        let mut conn = get_conn(&self.pool)?;
        let mut drift = self.drift.lock();
        let created = conn.immediate_transaction::<_, Error, _>(|conn| {
            let fixture: Option<(i32, i32)> = fixtures::table
                .find(fixture_id)
                .select((fixtures::home_team_id, fixtures::away_team_id))
                .first(conn)
                .optional()?;
            let (home_team_id, away_team_id) = fixture.ok_or(Error::NotFound {
                entity: "fixture",
                id: fixture_id.to_string(),
            })?;

            let templates: Vec<OddsTemplateRow> = odds_templates::table
                .filter(odds_templates::is_active.eq(true))
                .order(odds_templates::id.asc())
                .load(conn)?;

            let eligible: Vec<i32> = players::table
                .filter(
                    players::team_id
                        .eq(home_team_id)
                        .or(players::team_id.eq(away_team_id)),
                )
                .select(players::id)
                .order(players::id.asc())
                .load(conn)?;

            let existing: HashSet<(i32, Option<i32>)> = odds_instances::table
                .filter(odds_instances::fixture_id.eq(fixture_id))
                .select((odds_instances::template_id, odds_instances::player_id))
                .load::<(i32, Option<i32>)>(conn)?
                .into_iter()
                .collect();

            let now = Utc::now();
            let mut created = Vec::new();
            for template in &templates {
                let default_price = parse_price(&template.default_price)?;
                if template.requires_player {
                    for &player_id in &eligible {
                        if existing.contains(&(template.id, Some(player_id))) {
                            continue;
                        }
                        let price = drifted(default_price, drift.sample(self.player_spread));
                        created.push(insert_instance(
                            conn,
                            fixture_id,
                            template.id,
                            Some(player_id),
                            price,
                            now,
                        )?);
                    }
                } else {
                    if existing.contains(&(template.id, None)) {
                        continue;
                    }
                    let price = drifted(default_price, drift.sample(self.template_spread));
                    created.push(insert_instance(
                        conn,
                        fixture_id,
                        template.id,
                        None,
                        price,
                        now,
                    )?);
                }
            }
            Ok(created)
        })?;

        info!(fixture_id, instances = created.len(), "odds instantiated");
        Ok(created)
    }

    /// Active priced instances for a fixture.
    pub fn fixture_odds(&self, fixture_id: i32) -> Result<Vec<OddsInstance>> {
        let mut conn = get_conn(&self.pool)?;
        let rows: Vec<OddsInstanceRow> = odds_instances::table
            .filter(odds_instances::fixture_id.eq(fixture_id))
            .filter(odds_instances::is_active.eq(true))
            .order(odds_instances::id.asc())
            .load(&mut conn)?;
        rows.into_iter().map(OddsInstance::try_from).collect()
    }

    pub fn get_instance(&self, instance_id: i32) -> Result<OddsInstance> {
        let mut conn = get_conn(&self.pool)?;
        let row: Option<OddsInstanceRow> = odds_instances::table
            .find(instance_id)
            .first(&mut conn)
            .optional()?;
        row.ok_or(Error::NotFound {
            entity: "odds instance",
            id: instance_id.to_string(),
        })?
        .try_into()
    }

    /// Manually edit an instance price, appending one revision record.
    ///
    /// The instance update and the revision insert commit together or not
    /// at all; that is the audit-integrity invariant. Concurrent edits to
    /// the same row serialize on the immediate transaction.
    ///
    /// # Errors
    /// - [`Error::Domain`] if the new price is below the floor.
    /// - [`Error::NotFound`] if the instance does not exist.
    pub fn update_price(
        &self,
        instance_id: i32,
        new_price: Decimal,
        editor: &str,
        reason: &str,
    ) -> Result<OddsRevision> {
        validate_price(new_price)?;

        let mut conn = get_conn(&self.pool)?;
        let revision = conn.immediate_transaction::<_, Error, _>(|conn| {
            let row: Option<OddsInstanceRow> = odds_instances::table
                .find(instance_id)
                .first(conn)
                .optional()?;
            let row = row.ok_or(Error::NotFound {
                entity: "odds instance",
                id: instance_id.to_string(),
            })?;
            let old_price = parse_price(&row.price)?;
            let now = Utc::now();

            diesel::update(odds_instances::table.find(instance_id))
                .set((
                    odds_instances::price.eq(encode_price(new_price)),
                    odds_instances::updated_at.eq(encode_ts(now)),
                ))
                .execute(conn)?;

            diesel::insert_into(odds_revisions::table)
                .values(&NewOddsRevisionRow {
                    odds_instance_id: instance_id,
                    old_price: encode_price(old_price),
                    new_price: encode_price(new_price),
                    changed_by: editor.to_string(),
                    changed_at: encode_ts(now),
                    reason: reason.to_string(),
                })
                .execute(conn)?;
            let id: i32 = diesel::select(last_insert_rowid()).get_result(conn)?;

            Ok(OddsRevision {
                id,
                odds_instance_id: instance_id,
                old_price,
                new_price,
                changed_by: editor.to_string(),
                changed_at: now,
                reason: reason.to_string(),
            })
        })?;

        debug!(
            instance_id,
            old = %revision.old_price,
            new = %revision.new_price,
            editor,
            "price updated"
        );
        Ok(revision)
    }

    /// The full revision trail for one instance, oldest first.
    pub fn revisions(&self, instance_id: i32) -> Result<Vec<OddsRevision>> {
        let mut conn = get_conn(&self.pool)?;
        let rows: Vec<OddsRevisionRow> = odds_revisions::table
            .filter(odds_revisions::odds_instance_id.eq(instance_id))
            .order(odds_revisions::id.asc())
            .load(&mut conn)?;
        rows.into_iter().map(OddsRevision::try_from).collect()
    }

    /// Seed the default catalog the book ships with. Idempotent: does
    /// nothing once any template exists.
    pub fn seed_default_catalog(&self) -> Result<()> {
        let existing: i64 = {
            let mut conn = get_conn(&self.pool)?;
            odds_templates::table.count().get_result(&mut conn)?
        };
        if existing > 0 {
            return Ok(());
        }

        let result_cat = self.add_category("Match result", "Bets on the final result")?;
        let goals_cat = self.add_category("Goals", "Goal-count markets")?;
        let players_cat = self.add_category("Players", "Player-scoped markets")?;
        let specials_cat = self.add_category("Specials", "Event-specific markets")?;

        let templates: &[(i32, &str, &str, &str, Decimal, bool)] = &[
            (result_cat.id, "Home win", "Home side wins", "home_win", dec!(2.0), false),
            (result_cat.id, "Draw", "Fixture ends level", "draw", dec!(3.0), false),
            (result_cat.id, "Away win", "Away side wins", "away_win", dec!(2.5), false),
            (result_cat.id, "Double chance 1X", "Home wins or draw", "double_1x", dec!(1.3), false),
            (result_cat.id, "Double chance X2", "Draw or away wins", "double_x2", dec!(1.4), false),
            (result_cat.id, "Double chance 12", "Either side wins", "double_12", dec!(1.2), false),
            (goals_cat.id, "Over 2.5 goals", "More than 2.5 goals in total", "over_2_5", dec!(1.8), false),
            (goals_cat.id, "Under 2.5 goals", "Fewer than 2.5 goals in total", "under_2_5", dec!(2.0), false),
            (goals_cat.id, "Both teams score", "Both sides find the net", "both_score_yes", dec!(1.7), false),
            (goals_cat.id, "Both teams score - no", "At least one side stays blank", "both_score_no", dec!(2.1), false),
            (goals_cat.id, "Over 3.5 goals", "More than 3.5 goals in total", "over_3_5", dec!(2.5), false),
            (goals_cat.id, "Under 1.5 goals", "Fewer than 1.5 goals in total", "under_1_5", dec!(3.0), false),
            (players_cat.id, "Player scores", "Player scores at least once", "player_scores", dec!(3.0), true),
            (players_cat.id, "Top scorer", "Player is the fixture's top scorer", "top_scorer", dec!(5.0), true),
            (players_cat.id, "Player booked", "Player receives a card", "player_card", dec!(4.0), true),
            (specials_cat.id, "First goal - home", "Home side scores first", "first_goal_home", dec!(1.9), false),
            (specials_cat.id, "First goal - away", "Away side scores first", "first_goal_away", dec!(2.1), false),
        ];

        for &(category_id, name, description, bet_type, default_price, requires_player) in templates
        {
            self.add_template(
                category_id,
                name,
                description,
                bet_type,
                default_price,
                requires_player,
            )?;
        }

        info!(templates = templates.len(), "default catalog seeded");
        Ok(())
    }
}

/// Apply drift, round to two decimals, clamp to the floor.
fn drifted(default_price: Decimal, drift: Decimal) -> Decimal {
    (default_price + drift).round_dp(2).max(MIN_PRICE)
}

fn insert_instance(
    conn: &mut SqliteConnection,
    fixture_id: i32,
    template_id: i32,
    player_id: Option<i32>,
    price: Decimal,
    now: chrono::DateTime<Utc>,
) -> Result<OddsInstance> {
    diesel::insert_into(odds_instances::table)
        .values(&NewOddsInstanceRow {
            fixture_id,
            template_id,
            player_id,
            price: encode_price(price),
            is_active: true,
            created_at: encode_ts(now),
            updated_at: encode_ts(now),
        })
        .execute(conn)?;
    let id: i32 = diesel::select(last_insert_rowid()).get_result(conn)?;
    Ok(OddsInstance {
        id,
        fixture_id,
        template_id,
        player_id,
        price,
        is_active: true,
        created_at: now,
        updated_at: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::fixtures::FixtureService;
    use crate::store::{create_pool, run_migrations};
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn setup(drift: Box<dyn DriftSource>) -> (TempDir, OddsService, FixtureService) {
        let dir = tempfile::tempdir().expect("tempdir");
        let url = dir.path().join("odds.db");
        let pool = create_pool(url.to_str().unwrap()).expect("pool");
        run_migrations(&pool).expect("migrations");
        let odds = OddsService::with_drift(pool.clone(), &BettingConfig::default(), drift);
        (dir, odds, FixtureService::new(pool))
    }

    fn fixture_with_players(fixtures: &FixtureService, players_per_side: usize) -> i32 {
        let home = fixtures.add_team("Dynamos").unwrap();
        let away = fixtures.add_team("Lions").unwrap();
        for i in 0..players_per_side {
            fixtures.add_player(&format!("H{i}"), home.id).unwrap();
            fixtures.add_player(&format!("A{i}"), away.id).unwrap();
        }
        fixtures
            .add_fixture(home.id, away.id, Utc::now())
            .unwrap()
            .id
    }

    #[test]
    fn seeding_is_idempotent() {
        let (_dir, odds, _fixtures) = setup(Box::new(FixedDrift(Decimal::ZERO)));
        odds.seed_default_catalog().unwrap();
        let count = odds.templates().unwrap().len();
        odds.seed_default_catalog().unwrap();
        assert_eq!(odds.templates().unwrap().len(), count);
        assert_eq!(odds.categories().unwrap().len(), 4);
    }

    #[test]
    fn instantiate_creates_one_row_per_template_and_player() {
        let (_dir, odds, fixtures) = setup(Box::new(FixedDrift(Decimal::ZERO)));
        odds.seed_default_catalog().unwrap();
        let fixture_id = fixture_with_players(&fixtures, 2);

        let created = odds.instantiate(fixture_id).unwrap();
        let templates = odds.templates().unwrap();
        let general = templates.iter().filter(|t| !t.requires_player).count();
        let player_scoped = templates.iter().filter(|t| t.requires_player).count();

        // 4 eligible players for each player-scoped template
        assert_eq!(created.len(), general + player_scoped * 4);
        assert_eq!(odds.fixture_odds(fixture_id).unwrap().len(), created.len());
    }

    #[test]
    fn zero_drift_keeps_template_defaults() {
        let (_dir, odds, fixtures) = setup(Box::new(FixedDrift(Decimal::ZERO)));
        odds.seed_default_catalog().unwrap();
        let fixture_id = fixture_with_players(&fixtures, 0);

        let created = odds.instantiate(fixture_id).unwrap();
        let templates = odds.templates().unwrap();
        for instance in &created {
            let template = templates
                .iter()
                .find(|t| t.id == instance.template_id)
                .unwrap();
            assert_eq!(instance.price, template.default_price.round_dp(2));
        }
    }

    #[test]
    fn drift_below_floor_is_clamped() {
        let (_dir, odds, fixtures) = setup(Box::new(FixedDrift(dec!(-5))));
        odds.seed_default_catalog().unwrap();
        let fixture_id = fixture_with_players(&fixtures, 1);

        for instance in odds.instantiate(fixture_id).unwrap() {
            assert_eq!(instance.price, MIN_PRICE);
        }
    }

    #[test]
    fn instantiate_unknown_fixture_fails() {
        let (_dir, odds, _fixtures) = setup(Box::new(FixedDrift(Decimal::ZERO)));
        odds.seed_default_catalog().unwrap();
        assert!(matches!(
            odds.instantiate(404),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn update_price_appends_one_revision_per_edit() {
        let (_dir, odds, fixtures) = setup(Box::new(FixedDrift(Decimal::ZERO)));
        odds.seed_default_catalog().unwrap();
        let fixture_id = fixture_with_players(&fixtures, 0);
        let instance = odds.instantiate(fixture_id).unwrap().remove(0);

        odds.update_price(instance.id, dec!(2.4), "admin", "sharp money")
            .unwrap();
        odds.update_price(instance.id, dec!(2.2), "admin", "line move")
            .unwrap();
        odds.update_price(instance.id, dec!(2.6), "admin", "reverse")
            .unwrap();

        let revisions = odds.revisions(instance.id).unwrap();
        assert_eq!(revisions.len(), 3);
        // chain is consistent: each old is the previous new
        assert_eq!(revisions[1].old_price, revisions[0].new_price);
        assert_eq!(revisions[2].old_price, revisions[1].new_price);
        // current value equals the latest revision's new value
        let current = odds.get_instance(instance.id).unwrap();
        assert_eq!(current.price, revisions[2].new_price);
        assert_eq!(current.price, dec!(2.6));
    }

    #[test]
    fn update_price_rejects_sub_floor_values() {
        let (_dir, odds, fixtures) = setup(Box::new(FixedDrift(Decimal::ZERO)));
        odds.seed_default_catalog().unwrap();
        let fixture_id = fixture_with_players(&fixtures, 0);
        let instance = odds.instantiate(fixture_id).unwrap().remove(0);

        assert!(odds
            .update_price(instance.id, dec!(1.05), "admin", "")
            .is_err());
        // rejected edit leaves no revision behind
        assert!(odds.revisions(instance.id).unwrap().is_empty());
    }

    #[test]
    fn uniform_drift_samples_within_the_spread() {
        let mut drift = UniformDrift::new();
        let spread = dec!(0.3);
        for _ in 0..100 {
            let sample = drift.sample(spread);
            assert!(sample >= -spread && sample <= spread);
        }
        assert_eq!(drift.sample(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn uniform_drift_moves_across_threads() {
        let drift: Box<dyn DriftSource> = Box::new(UniformDrift::new());
        std::thread::spawn(move || drop(drift)).join().unwrap();
    }

    #[test]
    fn reinstantiation_materializes_only_new_combinations() {
        let (_dir, odds, fixtures) = setup(Box::new(FixedDrift(Decimal::ZERO)));
        odds.seed_default_catalog().unwrap();
        let fixture_id = fixture_with_players(&fixtures, 1);

        let first = odds.instantiate(fixture_id).unwrap();
        // a repeat call duplicates nothing
        assert!(odds.instantiate(fixture_id).unwrap().is_empty());
        assert_eq!(odds.fixture_odds(fixture_id).unwrap().len(), first.len());

        // a template added later fills in exactly one instance
        let category = odds.categories().unwrap().remove(0);
        odds.add_template(
            category.id,
            "Home clean sheet",
            "Away side stays blank",
            "home_clean_sheet",
            dec!(3.2),
            false,
        )
        .unwrap();
        let added = odds.instantiate(fixture_id).unwrap();
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].price, dec!(3.2));

        // a player added later gets one instance per player template
        let team_id = fixtures.list_teams().unwrap()[0].id;
        fixtures.add_player("Late Signing", team_id).unwrap();
        let player_templates = odds
            .templates()
            .unwrap()
            .iter()
            .filter(|t| t.requires_player)
            .count();
        let added = odds.instantiate(fixture_id).unwrap();
        assert_eq!(added.len(), player_templates);
        assert_eq!(
            odds.fixture_odds(fixture_id).unwrap().len(),
            first.len() + 1 + player_templates
        );
    }

    #[test]
    fn duplicate_bet_type_is_rejected() {
        let (_dir, odds, _fixtures) = setup(Box::new(FixedDrift(Decimal::ZERO)));
        odds.seed_default_catalog().unwrap();
        let category = odds.categories().unwrap().remove(0);
        assert!(matches!(
            odds.add_template(category.id, "Again", "", "home_win", dec!(2.0), false),
            Err(Error::Duplicate { .. })
        ));
    }
}
