//! Matchbook - A points-based sportsbook core.
//!
//! This crate provides the full lifecycle of a small sportsbook: an odds
//! catalog, per-fixture price instantiation with random drift, a wager
//! ledger, an ad-hoc custom-bet pipeline with user proposals, and an
//! idempotent settlement engine driven by pluggable bet-type predicates.
//!
//! # Architecture
//!
//! Settlement dispatches through a predicate registry, so bet types are
//! data plus a predicate rather than branches in the engine:
//!
//! - **`settlement::PredicateRegistry`** - bet-type key to win predicate
//!   over the derived [`domain::FixtureOutcome`]
//! - **`settlement::SettlementEngine`** - transactional resolution of
//!   pending wagers, `floor(stake * price)` payouts, terminal-state guards
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files
//! - [`domain`] - Storage-agnostic types: fixtures, odds, wagers, outcomes
//! - [`store`] - SQLite persistence: pool, schema, row models, migrations
//! - [`service`] - Accounts, fixtures, odds, proposals, and the ledger
//! - [`settlement`] - The settlement engine and predicate registry
//! - [`app`] - The assembled [`app::Sportsbook`] facade
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use matchbook::app::Sportsbook;
//! use matchbook::config::Config;
//!
//! # fn main() -> matchbook::error::Result<()> {
//! let config = Config::default();
//! let book = Sportsbook::open(&config)?;
//! book.seed_default_catalog()?;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod settlement;
pub mod store;
