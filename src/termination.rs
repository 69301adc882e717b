//! Termination evaluation.
//!
//! The only code path that may declare a life over. Conditions are
//! checked in strict priority order and the first match wins, so an aged
//! debtor dies of age, not of debt.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{
    AGE_LIMIT, DEBT_COLLAPSE_THRESHOLD, REASON_AGE, REASON_DEBT, REASON_GENERIC, REASON_HEALTH,
    REASON_SAFETY,
};
use crate::outcome::TurnOutcome;

/// Why a life ended, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    /// Age passed the natural limit. Overrides everything else.
    OldAge,
    /// Treasury fell past the point creditors tolerate.
    Debt,
    /// Health reached zero.
    Health,
    /// Safety reached zero.
    Safety,
    /// The oracle declared a narrative death.
    Narrative,
}

impl DeathCause {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OldAge => "old_age",
            Self::Debt => "debt",
            Self::Health => "health",
            Self::Safety => "safety",
            Self::Narrative => "narrative",
        }
    }
}

impl fmt::Display for DeathCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved terminal verdict with its player-facing reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Death {
    pub cause: DeathCause,
    pub reason: String,
}

/// Evaluate the candidate next state's vitals against the terminal
/// conditions. Returns `None` when the turn is non-terminal.
#[must_use]
pub fn evaluate_termination(
    age: u32,
    treasury: i64,
    health: i32,
    safety: i32,
    outcome: &TurnOutcome,
) -> Option<Death> {
    let oracle_reason = outcome.game_over_reason.clone();
    if age > AGE_LIMIT {
        return Some(Death {
            cause: DeathCause::OldAge,
            reason: REASON_AGE.to_string(),
        });
    }
    if treasury < DEBT_COLLAPSE_THRESHOLD {
        return Some(Death {
            cause: DeathCause::Debt,
            reason: REASON_DEBT.to_string(),
        });
    }
    if health <= 0 {
        return Some(Death {
            cause: DeathCause::Health,
            reason: oracle_reason.unwrap_or_else(|| REASON_HEALTH.to_string()),
        });
    }
    if safety <= 0 {
        return Some(Death {
            cause: DeathCause::Safety,
            reason: oracle_reason.unwrap_or_else(|| REASON_SAFETY.to_string()),
        });
    }
    if outcome.game_over {
        return Some(Death {
            cause: DeathCause::Narrative,
            reason: oracle_reason.unwrap_or_else(|| REASON_GENERIC.to_string()),
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn healthy_state_is_non_terminal() {
        let outcome = TurnOutcome::default();
        assert!(evaluate_termination(40, 500, 80, 70, &outcome).is_none());
    }

    #[test]
    fn age_takes_precedence_over_debt() {
        let outcome = TurnOutcome::default();
        let death = evaluate_termination(91, -1_200, 50, 50, &outcome).unwrap();
        assert_eq!(death.cause, DeathCause::OldAge);
        assert!(death.reason.contains("Age"));
    }

    #[test]
    fn debt_takes_precedence_over_vitals() {
        let outcome = TurnOutcome::default();
        let death = evaluate_termination(40, -1_001, 0, 0, &outcome).unwrap();
        assert_eq!(death.cause, DeathCause::Debt);
    }

    #[test]
    fn exact_debt_threshold_is_survivable() {
        let outcome = TurnOutcome::default();
        assert!(evaluate_termination(40, -1_000, 50, 50, &outcome).is_none());
    }

    #[test]
    fn health_depletion_uses_oracle_reason_when_present() {
        let outcome = TurnOutcome {
            game_over_reason: Some("A fever took you in the night.".to_string()),
            ..TurnOutcome::default()
        };
        let death = evaluate_termination(40, 500, 0, 50, &outcome).unwrap();
        assert_eq!(death.cause, DeathCause::Health);
        assert_eq!(death.reason, "A fever took you in the night.");

        let bare = TurnOutcome::default();
        let death = evaluate_termination(40, 500, 0, 50, &bare).unwrap();
        assert_eq!(death.reason, REASON_HEALTH);
    }

    #[test]
    fn safety_depletion_is_checked_after_health() {
        let outcome = TurnOutcome::default();
        let death = evaluate_termination(40, 500, 50, 0, &outcome).unwrap();
        assert_eq!(death.cause, DeathCause::Safety);
    }

    #[test]
    fn oracle_declared_death_is_lowest_priority() {
        let outcome = TurnOutcome {
            game_over: true,
            game_over_reason: Some("Poisoned at the feast.".to_string()),
            ..TurnOutcome::default()
        };
        let death = evaluate_termination(40, 500, 50, 50, &outcome).unwrap();
        assert_eq!(death.cause, DeathCause::Narrative);
        assert_eq!(death.reason, "Poisoned at the feast.");
    }
}
