//! Application services, one per concern. Each service owns a pool handle
//! and runs its multi-step writes in immediate transactions.

pub mod accounts;
pub mod fixtures;
pub mod ledger;
pub mod odds;
pub mod proposals;

pub use accounts::AccountService;
pub use fixtures::FixtureService;
pub use ledger::WagerLedger;
pub use odds::{DriftSource, FixedDrift, OddsService, UniformDrift};
pub use proposals::ProposalService;
