//! Bet-type predicate registry.
//!
//! Settlement dispatches on the bet-type key of the odds template behind
//! each wager. The registry maps keys to pure predicates over
//! [`FixtureOutcome`], so adding a bet type never touches the settlement
//! loop. Unknown keys evaluate to not-won: no payout on a predicate the
//! book does not recognize.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{FixtureOutcome, Winner};

/// A pure win/lose predicate over the derived outcome facts.
pub type Predicate = Box<dyn Fn(&FixtureOutcome) -> bool + Send + Sync>;

/// Registry of bet-type predicates, keyed by template bet-type.
pub struct PredicateRegistry {
    predicates: HashMap<String, Predicate>,
}

impl PredicateRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            predicates: HashMap::new(),
        }
    }

    /// Registry pre-populated with every bet type the default catalog ships.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();

        registry.register("home_win", |o| o.winner == Winner::Home);
        registry.register("away_win", |o| o.winner == Winner::Away);
        registry.register("draw", |o| o.winner == Winner::Draw);
        registry.register("double_1x", |o| {
            matches!(o.winner, Winner::Home | Winner::Draw)
        });
        registry.register("double_x2", |o| {
            matches!(o.winner, Winner::Draw | Winner::Away)
        });
        registry.register("double_12", |o| {
            matches!(o.winner, Winner::Home | Winner::Away)
        });

        for line in [1, 2, 3] {
            registry.register(format!("over_{line}_5"), move |o: &FixtureOutcome| {
                o.total_goals > line
            });
            registry.register(format!("under_{line}_5"), move |o: &FixtureOutcome| {
                o.total_goals <= line
            });
        }

        registry.register("both_score_yes", |o| o.both_scored);
        registry.register("both_score_no", |o| !o.both_scored);

        // Simplified first-goal markets: only whether the side scored at
        // all, not actual first-goal timing.
        registry.register("first_goal_home", |o| o.home_score > 0);
        registry.register("first_goal_away", |o| o.away_score > 0);

        registry
    }

    /// Register a predicate for a bet-type key, replacing any existing one.
    pub fn register<F>(&mut self, bet_type: impl Into<String>, predicate: F)
    where
        F: Fn(&FixtureOutcome) -> bool + Send + Sync + 'static,
    {
        self.predicates.insert(bet_type.into(), Box::new(predicate));
    }

    /// Whether a bet-type key is known.
    #[must_use]
    pub fn contains(&self, bet_type: &str) -> bool {
        self.predicates.contains_key(bet_type)
    }

    /// Number of registered bet types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Evaluate a bet type against the outcome. Unknown keys lose.
    #[must_use]
    pub fn wins(&self, bet_type: &str, outcome: &FixtureOutcome) -> bool {
        match self.predicates.get(bet_type) {
            Some(predicate) => predicate(outcome),
            None => {
                debug!(bet_type, "no predicate registered, resolving as lost");
                false
            }
        }
    }
}

impl Default for PredicateRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
