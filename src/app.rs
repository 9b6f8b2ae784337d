//! The assembled book: one pool, every service wired to it.

use crate::config::{BettingConfig, Config};
use crate::error::Result;
use crate::service::{
    AccountService, DriftSource, FixtureService, OddsService, ProposalService, WagerLedger,
};
use crate::settlement::SettlementEngine;
use crate::store::{create_pool, run_migrations, DbPool};

/// Facade over the full betting core.
///
/// Opens (or attaches to) one SQLite database and exposes each service
/// through an accessor. Services share the pool, so cross-service flows
/// like place-then-settle observe a single consistent database.
pub struct Sportsbook {
    pool: DbPool,
    accounts: AccountService,
    fixtures: FixtureService,
    odds: OddsService,
    proposals: ProposalService,
    ledger: WagerLedger,
    settlement: SettlementEngine,
}

impl Sportsbook {
    /// Open the configured database, run pending migrations, and wire up
    /// every service.
    pub fn open(config: &Config) -> Result<Self> {
        let pool = create_pool(&config.database.url)?;
        run_migrations(&pool)?;
        Ok(Self::with_pool(pool, &config.betting))
    }

    /// Assemble services on an existing pool. Migrations are the caller's
    /// responsibility on this path.
    #[must_use]
    pub fn with_pool(pool: DbPool, betting: &BettingConfig) -> Self {
        let odds = OddsService::new(pool.clone(), betting);
        Self::assemble(pool, betting, odds)
    }

    /// Like [`Self::with_pool`], with a caller-supplied drift source for
    /// odds instantiation.
    #[must_use]
    pub fn with_drift(pool: DbPool, betting: &BettingConfig, drift: Box<dyn DriftSource>) -> Self {
        let odds = OddsService::with_drift(pool.clone(), betting, drift);
        Self::assemble(pool, betting, odds)
    }

    fn assemble(pool: DbPool, betting: &BettingConfig, odds: OddsService) -> Self {
        Self {
            accounts: AccountService::new(pool.clone(), betting.starting_points),
            fixtures: FixtureService::new(pool.clone()),
            odds,
            proposals: ProposalService::new(pool.clone()),
            ledger: WagerLedger::new(pool.clone()),
            settlement: SettlementEngine::new(pool.clone()),
            pool,
        }
    }

    /// Seed the default odds catalog if the catalog is empty.
    pub fn seed_default_catalog(&self) -> Result<()> {
        self.odds.seed_default_catalog()
    }

    #[must_use]
    pub fn accounts(&self) -> &AccountService {
        &self.accounts
    }

    #[must_use]
    pub fn fixtures(&self) -> &FixtureService {
        &self.fixtures
    }

    #[must_use]
    pub fn odds(&self) -> &OddsService {
        &self.odds
    }

    #[must_use]
    pub fn proposals(&self) -> &ProposalService {
        &self.proposals
    }

    #[must_use]
    pub fn ledger(&self) -> &WagerLedger {
        &self.ledger
    }

    #[must_use]
    pub fn settlement(&self) -> &SettlementEngine {
        &self.settlement
    }

    /// The shared connection pool, for callers that need raw access.
    #[must_use]
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}
