//! Exchange-agnostic domain types for the betting core.
//!
//! Everything here is plain data plus invariant checks; persistence lives
//! in [`crate::store`] and behavior in [`crate::service`] and
//! [`crate::settlement`].

pub mod catalog;
pub mod custom;
pub mod error;
pub mod fixture;
pub mod odds;
pub mod outcome;
pub mod team;
pub mod user;
pub mod wager;

pub use catalog::{OddsCategory, OddsTemplate};
pub use custom::{
    CustomBet, CustomBetResult, CustomBetStatus, Proposal, ProposalStatus, ReviewAction,
};
pub use error::DomainError;
pub use fixture::{Fixture, FixtureStatus};
pub use odds::{validate_price, OddsInstance, OddsRevision, MIN_PRICE};
pub use outcome::{FixtureOutcome, Winner};
pub use team::{Player, Team};
pub use user::User;
pub use wager::{Wager, WagerStatus, WagerTarget};
