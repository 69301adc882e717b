//! Legacy and succession management.
//!
//! When a life ends the player chooses how the playthrough continues:
//! a brand-new soul, an heir carrying partial resources, or re-inhabiting
//! a predecessor from the lineage chronicle. Every choice produces a
//! fresh initial state; the lineage history always survives.

use crate::constants::{
    AGE_LIMIT, HEIR_STANDING_DENOMINATOR, HEIR_STANDING_MINIMUM, HEIR_STANDING_NUMERATOR,
    HEIR_TREASURY_DENOMINATOR, HEIR_TREASURY_MINIMUM, HEIR_TREASURY_NUMERATOR,
    REINHABIT_HEALTH_FLOOR, REINHABIT_SAFETY_FLOOR,
};
use crate::error::EngineError;
use crate::factory::initial_state;
use crate::state::GameState;

/// How the player continues after a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyChoice {
    /// Discard the character entirely; a new random soul begins.
    Restart,
    /// A named heir inherits part of the estate and the location.
    Heir,
    /// Re-inhabit the lineage entry at this index.
    Previous(usize),
}

fn inherited_standing(value: i32) -> i32 {
    let scaled = (i64::from(value) * HEIR_STANDING_NUMERATOR).div_euclid(HEIR_STANDING_DENOMINATOR);
    i32::try_from(scaled).unwrap_or(HEIR_STANDING_MINIMUM).max(HEIR_STANDING_MINIMUM)
}

fn roman(n: usize) -> String {
    const TABLE: &[(usize, &str)] = &[
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    let mut n = n;
    let mut out = String::new();
    for &(value, digits) in TABLE {
        while n >= value {
            out.push_str(digits);
            n -= value;
        }
    }
    out
}

fn strip_ordinal(name: &str) -> &str {
    match name.rsplit_once(' ') {
        Some((base, tail)) if !tail.is_empty() && tail.chars().all(|c| "IVX".contains(c)) => base,
        _ => name,
    }
}

/// Ordinal-suffixed name for the next bearer of a deceased's name.
#[must_use]
pub fn heir_name(deceased: &GameState) -> String {
    let base = strip_ordinal(&deceased.character_name);
    // The terminal state already carries its own lineage entry, so one
    // matching entry means the heir is the second bearer.
    let bearers = deceased
        .lineage
        .iter()
        .filter(|entry| strip_ordinal(&entry.name) == base)
        .count();
    format!("{base} {}", roman(bearers.max(1) + 1))
}

/// Produce the successor state for a terminal session.
///
/// `seed` feeds the initial-state factory for the `Restart` and `Heir`
/// paths (and the metadata-only fallback of `Previous`).
///
/// # Errors
///
/// Returns [`EngineError::UnknownLineageEntry`] when `Previous` points
/// outside the lineage.
pub fn succeed(
    current: &GameState,
    choice: LegacyChoice,
    seed: u64,
) -> Result<GameState, EngineError> {
    match choice {
        LegacyChoice::Restart => {
            let mut next = initial_state(seed);
            next.lineage = current.lineage.clone();
            Ok(next)
        }
        LegacyChoice::Heir => {
            let mut next = initial_state(seed);
            next.character_name = heir_name(current);
            next.treasury = (current.treasury * HEIR_TREASURY_NUMERATOR)
                .div_euclid(HEIR_TREASURY_DENOMINATOR)
                .max(HEIR_TREASURY_MINIMUM);
            next.noble_standing = inherited_standing(current.noble_standing);
            next.clergy_trust = inherited_standing(current.clergy_trust);
            next.location_path = current.location_path.clone();
            next.lineage = current.lineage.clone();
            Ok(next)
        }
        LegacyChoice::Previous(index) => {
            let entry = current
                .lineage
                .get(index)
                .ok_or(EngineError::UnknownLineageEntry(index))?;
            let mut next = if let Some(snapshot) = &entry.snapshot {
                (**snapshot).clone()
            } else {
                // Older lineage records carry only display metadata; the
                // best available reconstruction is a fresh start wearing
                // the predecessor's name and rank.
                let mut derived = initial_state(seed);
                derived.character_name = entry.name.clone();
                derived.rank_title = entry.rank.clone();
                derived.age = entry.age_at_death.min(AGE_LIMIT);
                derived
            };
            next.lineage = current.lineage.clone();
            next.game_over = false;
            next.game_over_reason = None;
            next.health = next.health.max(REINHABIT_HEALTH_FLOOR);
            next.safety = next.safety.max(REINHABIT_SAFETY_FLOOR);
            Ok(next)
        }
    }
}
